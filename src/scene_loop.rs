//! The animated scene: transform state, frame scheduling and the single
//! draw routine shared by every scene variant.

use log::{debug, error, info, warn};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::gfx::{self, GraphicsContext, Rgba, FRAGMENT_SHADER, VERTEX_SHADER};
use crate::input::{KeyAction, KeyBindings};
use crate::mesh::MeshBuffers;
use crate::scene::SceneObject;
use crate::schedule::{FrameHandle, FrameScheduler};
use crate::state::{Animation, Steps, TransformState};

/// Owns the graphics binding, the frame scheduler and all mutable scene
/// state. Input and frame callbacks are delivered on one thread, so every
/// entry point takes `&mut self` and nothing is locked.
pub struct SceneLoop<G: GraphicsContext, S: FrameScheduler> {
    gfx: G,
    scheduler: S,
    program: G::Program,
    meshes: MeshBuffers<G::Buffer>,
    objects: Vec<SceneObject>,
    state: TransformState,
    animation: Animation,
    pending: Option<FrameHandle>,
    keys: KeyBindings,
    steps: Steps,
    clear_color: Rgba,
    fill_color: Rgba,
}

impl<G: GraphicsContext, S: FrameScheduler> SceneLoop<G, S> {
    /// Compiles the shader program and uploads the mesh tables. Any failure
    /// here aborts construction; nothing has been drawn yet.
    pub fn new(mut gfx: G, scheduler: S, config: SceneConfig) -> Result<Self> {
        let program = gfx
            .create_program(VERTEX_SHADER, FRAGMENT_SHADER)
            .inspect_err(|e| error!("unable to initialize the shader program: {e}"))?;
        let meshes = MeshBuffers::upload(&mut gfx)
            .inspect_err(|e| error!("unable to upload mesh buffers: {e}"))?;

        let steps = config.steps();
        info!(
            "scene ready: {} objects, animation {}",
            config.objects.len(),
            if config.animate { "on" } else { "off" }
        );

        Ok(Self {
            gfx,
            scheduler,
            program,
            meshes,
            objects: config.objects,
            state: TransformState::new(config.camera, config.rotation_speed),
            animation: Animation::from_enabled(config.animate),
            pending: None,
            keys: config.keys,
            steps,
            clear_color: config.clear_color,
            fill_color: config.fill_color,
        })
    }

    /// Arms the first frame, or draws one still frame when paused.
    pub fn start(&mut self) -> Result<()> {
        match self.animation {
            Animation::Running => self.schedule(),
            Animation::Paused => {
                self.render_frame();
                Ok(())
            }
        }
    }

    /// Maps a key identifier to its action and applies it. Unbound keys are
    /// ignored.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.keys.resolve(key)?;
        debug!("key {key:?} -> {action:?}");

        if action == KeyAction::ToggleAnimation {
            self.toggle_animation();
        } else if self.state.apply(action, self.steps) && !self.animation.is_running() {
            self.render_frame();
        }
        Some(action)
    }

    fn toggle_animation(&mut self) {
        self.animation = self.animation.toggled();
        match self.animation {
            Animation::Running => {
                if let Err(e) = self.schedule() {
                    error!("unable to resume animation: {e}");
                    self.animation = Animation::Paused;
                }
            }
            Animation::Paused => self.cancel(),
        }
    }

    /// Host callback entry point. Only the currently armed handle advances
    /// the scene; anything else was cancelled or superseded.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.pending != Some(handle) {
            debug!("ignoring stale frame {handle:?}");
            return;
        }
        self.pending = None;

        self.advance_frame();

        if let Err(e) = self.schedule() {
            error!("unable to schedule next frame, pausing: {e}");
            self.animation = Animation::Paused;
        }
    }

    pub fn advance_frame(&mut self) {
        self.state.advance();
        self.render_frame();
    }

    /// Redraws once while paused. Running loops redraw on the next frame.
    pub fn refresh(&mut self) {
        if !self.animation.is_running() {
            self.render_frame();
        }
    }

    pub fn render_frame(&mut self) {
        self.gfx.clear(self.clear_color);

        let projection = gfx::projection(gfx::aspect_ratio(self.gfx.surface_size()));
        let view = self.state.model_view();

        for (index, object) in self.objects.iter().enumerate() {
            let Some(kind) = object.mesh_kind() else {
                warn!("unknown object type at index {index}, skipping");
                continue;
            };
            let mesh = self.meshes.get(kind);
            let model_view = view * object.placement();

            self.gfx.bind_positions(&self.program, &mesh.buffer);
            self.gfx.use_program(&self.program, self.fill_color);
            self.gfx.set_matrices(&self.program, &projection, &model_view);
            self.gfx.draw_triangles(mesh.vertex_count);
        }
    }

    fn schedule(&mut self) -> Result<()> {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame()?);
        }
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn graphics(&self) -> &G {
        &self.gfx
    }

    pub fn graphics_mut(&mut self) -> &mut G {
        &mut self.gfx
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<G: GraphicsContext, S: FrameScheduler> Drop for SceneLoop<G, S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
