use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::error::{Result, SceneError};
use crate::schedule::{FrameHandle, FrameScheduler};

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// [`FrameScheduler`] over `requestAnimationFrame`.
///
/// The animation closure is created after the scene (it needs a reference
/// to it), so it is installed into a shared slot rather than passed in.
/// `armed` is shared with that closure: it holds the handle the pending
/// browser callback was registered for, and is cleared on cancel so a
/// callback the browser still delivers carries nothing.
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    armed: Rc<Cell<Option<FrameHandle>>>,
    request_id: Option<i32>,
    next_id: u64,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
            armed: Rc::new(Cell::new(None)),
            request_id: None,
            next_id: 0,
        }
    }

    pub fn callback_slot(&self) -> Rc<RefCell<Option<FrameCallback>>> {
        Rc::clone(&self.callback)
    }

    pub fn armed_slot(&self) -> Rc<Cell<Option<FrameHandle>>> {
        Rc::clone(&self.armed)
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| SceneError::Schedule("frame callback not installed".into()))?;
        let request_id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| SceneError::Schedule(format!("{e:?}")))?;

        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.armed.set(Some(handle));
        self.request_id = Some(request_id);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed.get() != Some(handle) {
            return;
        }
        self.armed.set(None);
        if let Some(request_id) = self.request_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(request_id) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
    }
}
