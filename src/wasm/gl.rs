use glam::Mat4;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

use crate::error::{Result, SceneError, ShaderStage};
use crate::gfx::{
    GraphicsContext, Rgba, COLOR_UNIFORM, MODEL_VIEW_UNIFORM, POSITION_ATTRIBUTE,
    PROJECTION_UNIFORM,
};
use crate::mesh::MeshKind;

/// Linked program plus the locations the draw routine binds every frame.
pub struct GlProgram {
    program: WebGlProgram,
    position: u32,
    projection: WebGlUniformLocation,
    model_view: WebGlUniformLocation,
    color: WebGlUniformLocation,
}

/// [`GraphicsContext`] over a canvas' WebGL2 context.
pub struct WebGlContext {
    gl: GL,
    canvas: HtmlCanvasElement,
}

impl WebGlContext {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let gl = canvas
            .get_context("webgl2")
            .map_err(|_| host_error("unable to query WebGL2 context"))?
            .ok_or_else(|| host_error("unable to initialize WebGL, your browser may not support it"))?;
        let gl = gl
            .dyn_into::<GL>()
            .map_err(|_| host_error("context is not WebGL2"))?;
        Ok(Self { gl, canvas })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn compile(&self, stage: ShaderStage, source: &str) -> Result<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(kind)
            .ok_or_else(|| host_error("unable to create shader object"))?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if compiled {
            Ok(shader)
        } else {
            let log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
            self.gl.delete_shader(Some(&shader));
            Err(SceneError::ShaderCompile { stage, log })
        }
    }

    fn uniform(&self, program: &WebGlProgram, name: &'static str) -> Result<WebGlUniformLocation> {
        self.gl
            .get_uniform_location(program, name)
            .ok_or(SceneError::MissingUniform(name))
    }
}

impl GraphicsContext for WebGlContext {
    type Program = GlProgram;
    type Buffer = WebGlBuffer;

    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<GlProgram> {
        let vertex = self.compile(ShaderStage::Vertex, vertex_src)?;
        let fragment = self.compile(ShaderStage::Fragment, fragment_src)?;

        let program = self
            .gl
            .create_program()
            .ok_or_else(|| host_error("unable to create program object"))?;
        self.gl.attach_shader(&program, &vertex);
        self.gl.attach_shader(&program, &fragment);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = self.gl.get_program_info_log(&program).unwrap_or_default();
            self.gl.delete_program(Some(&program));
            return Err(SceneError::ProgramLink(log));
        }

        let position = self.gl.get_attrib_location(&program, POSITION_ATTRIBUTE);
        let position =
            u32::try_from(position).map_err(|_| SceneError::MissingAttribute(POSITION_ATTRIBUTE))?;

        Ok(GlProgram {
            position,
            projection: self.uniform(&program, PROJECTION_UNIFORM)?,
            model_view: self.uniform(&program, MODEL_VIEW_UNIFORM)?,
            color: self.uniform(&program, COLOR_UNIFORM)?,
            program,
        })
    }

    fn create_buffer(&mut self, kind: MeshKind, positions: &[f32]) -> Result<WebGlBuffer> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or(SceneError::BufferAlloc(kind))?;
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = js_sys::Float32Array::from(positions);
        self.gl
            .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
        Ok(buffer)
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, [r, g, b, a]: Rgba) {
        let (width, height) = self.surface_size();
        self.gl.viewport(0, 0, width as i32, height as i32);
        self.gl.clear_color(r, g, b, a);
        self.gl.clear_depth(1.0);
        self.gl.enable(GL::DEPTH_TEST);
        self.gl.depth_func(GL::LEQUAL);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    fn use_program(&mut self, program: &GlProgram, fill: Rgba) {
        self.gl.use_program(Some(&program.program));
        self.gl.uniform4fv_with_f32_array(Some(&program.color), &fill);
    }

    fn bind_positions(&mut self, program: &GlProgram, buffer: &WebGlBuffer) {
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        self.gl
            .vertex_attrib_pointer_with_i32(program.position, 3, GL::FLOAT, false, 0, 0);
        self.gl.enable_vertex_attrib_array(program.position);
    }

    fn set_matrices(&mut self, program: &GlProgram, projection: &Mat4, model_view: &Mat4) {
        self.gl.uniform_matrix4fv_with_f32_array(
            Some(&program.projection),
            false,
            &projection.to_cols_array(),
        );
        self.gl.uniform_matrix4fv_with_f32_array(
            Some(&program.model_view),
            false,
            &model_view.to_cols_array(),
        );
    }

    fn draw_triangles(&mut self, vertex_count: usize) {
        self.gl.draw_arrays(GL::TRIANGLES, 0, vertex_count as i32);
    }
}

fn host_error(msg: &str) -> SceneError {
    SceneError::Host(msg.to_owned())
}
