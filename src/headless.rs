//! Host-side stand-ins for the browser: a graphics context that records
//! what it was asked to draw, and a scheduler whose frames fire only when
//! told to.
//!
//! Useful for logging, tooling and tests; the WebGL backend lives in
//! `wasm::gl`.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use crate::error::{Result, SceneError, ShaderStage};
use crate::gfx::{GraphicsContext, Rgba};
use crate::mesh::MeshKind;
use crate::schedule::{FrameHandle, FrameScheduler};

/// One call made against a [`HeadlessContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    UseProgram { fill: Rgba },
    BindPositions { mesh: MeshKind },
    SetMatrices { projection: Mat4, model_view: Mat4 },
    Draw { vertex_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessProgram(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessBuffer {
    pub mesh: MeshKind,
    pub vertex_count: usize,
}

#[derive(Debug)]
pub struct HeadlessContext {
    width: u32,
    height: u32,
    programs: u32,
    buffers: Vec<HeadlessBuffer>,
    commands: Vec<DrawCommand>,
    program_error: Option<String>,
    buffer_error: Option<MeshKind>,
}

impl HeadlessContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            programs: 0,
            buffers: Vec::new(),
            commands: Vec::new(),
            program_error: None,
            buffer_error: None,
        }
    }

    /// Makes the next program creation fail with the given info log.
    pub fn fail_program(&mut self, log: impl Into<String>) {
        self.program_error = Some(log.into());
    }

    pub fn fail_buffer(&mut self, kind: MeshKind) {
        self.buffer_error = Some(kind);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn buffers(&self) -> &[HeadlessBuffer] {
        &self.buffers
    }

    /// Vertex counts of every draw call, in issue order.
    pub fn draws(&self) -> Vec<usize> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Draw { vertex_count } => Some(*vertex_count),
                _ => None,
            })
            .collect()
    }

    /// Meshes bound before each draw, in issue order.
    pub fn bound_meshes(&self) -> Vec<MeshKind> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BindPositions { mesh } => Some(*mesh),
                _ => None,
            })
            .collect()
    }

    pub fn model_views(&self) -> Vec<Mat4> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetMatrices { model_view, .. } => Some(*model_view),
                _ => None,
            })
            .collect()
    }
}

impl GraphicsContext for HeadlessContext {
    type Program = HeadlessProgram;
    type Buffer = HeadlessBuffer;

    fn create_program(&mut self, _vertex_src: &str, _fragment_src: &str) -> Result<Self::Program> {
        if let Some(log) = self.program_error.take() {
            return Err(SceneError::ShaderCompile {
                stage: ShaderStage::Fragment,
                log,
            });
        }
        self.programs += 1;
        Ok(HeadlessProgram(self.programs))
    }

    fn create_buffer(&mut self, kind: MeshKind, positions: &[f32]) -> Result<Self::Buffer> {
        if self.buffer_error == Some(kind) {
            return Err(SceneError::BufferAlloc(kind));
        }
        let buffer = HeadlessBuffer {
            mesh: kind,
            vertex_count: positions.len() / 3,
        };
        self.buffers.push(buffer);
        Ok(buffer)
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn use_program(&mut self, _program: &Self::Program, fill: Rgba) {
        self.commands.push(DrawCommand::UseProgram { fill });
    }

    fn bind_positions(&mut self, _program: &Self::Program, buffer: &Self::Buffer) {
        self.commands
            .push(DrawCommand::BindPositions { mesh: buffer.mesh });
    }

    fn set_matrices(&mut self, _program: &Self::Program, projection: &Mat4, model_view: &Mat4) {
        self.commands.push(DrawCommand::SetMatrices {
            projection: *projection,
            model_view: *model_view,
        });
    }

    fn draw_triangles(&mut self, vertex_count: usize) {
        self.commands.push(DrawCommand::Draw { vertex_count });
    }
}

/// A frame scheduler driven by hand: at most one frame is armed, and it
/// fires only through [`ManualScheduler::fire`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    armed: Option<FrameHandle>,
    requested: Vec<FrameHandle>,
    cancelled: Rc<RefCell<Vec<FrameHandle>>>,
    fail_next: bool,
}

impl ManualScheduler {
    /// Disarms and returns the armed frame, as a display refresh would.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.armed.take()
    }

    pub fn armed(&self) -> Option<FrameHandle> {
        self.armed
    }

    pub fn requested(&self) -> &[FrameHandle] {
        &self.requested
    }

    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.cancelled.borrow().clone()
    }

    /// Shared view of the cancel log that outlives the scheduler.
    pub fn cancel_log(&self) -> Rc<RefCell<Vec<FrameHandle>>> {
        Rc::clone(&self.cancelled)
    }

    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        if std::mem::take(&mut self.fail_next) {
            return Err(SceneError::Schedule("scheduler unavailable".into()));
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.armed = Some(handle);
        self.requested.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
        let mut cancelled = self.cancelled.borrow_mut();
        if !cancelled.contains(&handle) {
            cancelled.push(handle);
        }
    }
}
