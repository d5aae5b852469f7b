/// WebGL2 back end for the shared [`Viewer`](fc3d_core::Viewer).
use fc3d_core::{Camera, Error, Renderer, Result, Scene};
use js_sys::Float32Array;
use log::{debug, info};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::batches::{LightUniforms, SceneBatches};

const AMBIENT: f32 = 0.2;

const LIT_VERTEX: &str = r#"#version 300 es
in vec3 a_position;
in vec3 a_normal;
uniform mat4 u_view_projection;
out vec3 v_position;
out vec3 v_normal;
void main() {
    v_position = a_position;
    v_normal = a_normal;
    gl_Position = u_view_projection * vec4(a_position, 1.0);
}
"#;

const LIT_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
const int MAX_LIGHTS = 4;
in vec3 v_position;
in vec3 v_normal;
uniform vec4 u_color;
uniform vec3 u_eye;
uniform float u_ambient;
uniform int u_light_count;
uniform vec3 u_light_positions[MAX_LIGHTS];
uniform vec3 u_light_colors[MAX_LIGHTS];
out vec4 out_color;
void main() {
    vec3 n = normalize(v_normal);
    if (dot(n, u_eye - v_position) < 0.0) {
        n = -n;
    }
    vec3 diffuse = vec3(0.0);
    for (int i = 0; i < MAX_LIGHTS; i++) {
        if (i >= u_light_count) {
            break;
        }
        vec3 to_light = normalize(u_light_positions[i] - v_position);
        diffuse += u_light_colors[i] * max(dot(n, to_light), 0.0);
    }
    vec3 light = vec3(u_ambient) + (1.0 - u_ambient) * diffuse;
    out_color = vec4(u_color.rgb * clamp(light, 0.0, 1.0), u_color.a);
}
"#;

const FLAT_VERTEX: &str = r#"#version 300 es
in vec3 a_position;
uniform mat4 u_view_projection;
void main() {
    gl_Position = u_view_projection * vec4(a_position, 1.0);
}
"#;

const FLAT_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
out vec4 out_color;
void main() {
    out_color = u_color;
}
"#;

const POSITION_ATTRIB: u32 = 0;
const NORMAL_ATTRIB: u32 = 1;

/// One uploaded draw call
struct GpuBatch {
    vao: WebGlVertexArrayObject,
    buffers: Vec<WebGlBuffer>,
    mode: u32,
    count: i32,
    color: [f32; 4],
}

/// Uploaded geometry for one scene
struct GpuScene {
    grid: Option<GpuBatch>,
    solids: Vec<GpuBatch>,
    outlines: Vec<GpuBatch>,
    /// Shape and triangle counts of the scene this was built from
    key: (usize, usize),
}

struct Program {
    program: WebGlProgram,
    view_projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
}

impl Program {
    fn uniform(&self, gl: &Gl, name: &str) -> Option<WebGlUniformLocation> {
        gl.get_uniform_location(&self.program, name)
    }
}

/// Draws a scene into a canvas through WebGL2.
///
/// Scene geometry never changes after composition, so it is uploaded once
/// and only the camera and light uniforms are refreshed per frame.
pub struct WebGlRenderer {
    canvas: HtmlCanvasElement,
    gl: Gl,
    lit: Program,
    flat: Program,
    uploaded: Option<GpuScene>,
}

impl WebGlRenderer {
    pub fn new(canvas: HtmlCanvasElement, gl: Gl) -> Result<Self> {
        let lit = link_program(&gl, LIT_VERTEX, LIT_FRAGMENT, true)?;
        let flat = link_program(&gl, FLAT_VERTEX, FLAT_FRAGMENT, false)?;

        gl.enable(Gl::DEPTH_TEST);
        gl.enable(Gl::BLEND);
        gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            canvas,
            gl,
            lit,
            flat,
            uploaded: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn upload(&mut self, scene: &Scene) -> Result<()> {
        let key = (scene.shapes.len(), scene.triangle_count());
        if self.uploaded.as_ref().is_some_and(|gpu| gpu.key == key) {
            return Ok(());
        }
        if let Some(old) = self.uploaded.take() {
            self.release(old);
        }

        let batches = SceneBatches::from_scene(scene);
        let gl = &self.gl;
        let grid = batches
            .grid
            .as_ref()
            .map(|grid| upload_batch(gl, Gl::LINES, &grid.positions, None, grid.color))
            .transpose()?;
        let solids = batches
            .solids
            .iter()
            .map(|solid| {
                upload_batch(
                    gl,
                    Gl::TRIANGLES,
                    &solid.positions,
                    Some(solid.normals.as_slice()),
                    solid.color,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let outlines = batches
            .outlines
            .iter()
            .map(|line| upload_batch(gl, Gl::LINES, &line.positions, None, line.color))
            .collect::<Result<Vec<_>>>()?;

        info!("uploaded {} vertices", batches.vertex_count());
        self.uploaded = Some(GpuScene {
            grid,
            solids,
            outlines,
            key,
        });
        Ok(())
    }

    fn release(&self, gpu: GpuScene) {
        let batches = gpu.grid.into_iter().chain(gpu.solids).chain(gpu.outlines);
        for batch in batches {
            for buffer in &batch.buffers {
                self.gl.delete_buffer(Some(buffer));
            }
            self.gl.delete_vertex_array(Some(&batch.vao));
        }
    }
}

impl Renderer for WebGlRenderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        debug!("canvas {}x{}", width, height);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        self.upload(scene)?;
        let Some(gpu) = &self.uploaded else {
            return Err(Error::render("scene geometry missing"));
        };
        let gl = &self.gl;

        let bg = scene.background;
        gl.clear_color(bg.r, bg.g, bg.b, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);

        let view_projection = camera.view_projection();
        let matrix = view_projection.as_slice();

        // Grid and outlines
        gl.use_program(Some(&self.flat.program));
        gl.uniform_matrix4fv_with_f32_array(self.flat.view_projection.as_ref(), false, matrix);
        let lines = gpu.grid.iter().chain(&gpu.outlines);
        for batch in lines {
            draw_batch(gl, &self.flat, batch);
        }

        // Translucent solids last, without writing depth
        let lights = LightUniforms::from_rig(&scene.lights);
        gl.use_program(Some(&self.lit.program));
        gl.uniform_matrix4fv_with_f32_array(self.lit.view_projection.as_ref(), false, matrix);
        gl.uniform3fv_with_f32_array(
            self.lit.uniform(gl, "u_eye").as_ref(),
            camera.position.coords.as_slice(),
        );
        gl.uniform1f(self.lit.uniform(gl, "u_ambient").as_ref(), AMBIENT);
        gl.uniform1i(self.lit.uniform(gl, "u_light_count").as_ref(), lights.count);
        gl.uniform3fv_with_f32_array(
            self.lit.uniform(gl, "u_light_positions").as_ref(),
            &lights.positions,
        );
        gl.uniform3fv_with_f32_array(
            self.lit.uniform(gl, "u_light_colors").as_ref(),
            &lights.colors,
        );

        gl.depth_mask(false);
        for batch in &gpu.solids {
            draw_batch(gl, &self.lit, batch);
        }
        gl.depth_mask(true);

        Ok(())
    }
}

fn draw_batch(gl: &Gl, program: &Program, batch: &GpuBatch) {
    gl.uniform4fv_with_f32_array(program.color.as_ref(), &batch.color);
    gl.bind_vertex_array(Some(&batch.vao));
    gl.draw_arrays(batch.mode, 0, batch.count);
    gl.bind_vertex_array(None);
}

fn upload_batch(
    gl: &Gl,
    mode: u32,
    positions: &[f32],
    normals: Option<&[f32]>,
    color: [f32; 4],
) -> Result<GpuBatch> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| Error::render("cannot create vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let mut buffers = vec![upload_attribute(gl, POSITION_ATTRIB, positions)?];
    if let Some(normals) = normals {
        buffers.push(upload_attribute(gl, NORMAL_ATTRIB, normals)?);
    }
    gl.bind_vertex_array(None);

    Ok(GpuBatch {
        vao,
        buffers,
        mode,
        count: (positions.len() / 3) as i32,
        color,
    })
}

fn upload_attribute(gl: &Gl, location: u32, data: &[f32]) -> Result<WebGlBuffer> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| Error::render("cannot create buffer"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(
        Gl::ARRAY_BUFFER,
        &Float32Array::from(data),
        Gl::STATIC_DRAW,
    );
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, 3, Gl::FLOAT, false, 0, 0);
    Ok(buffer)
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| Error::render("cannot create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(Error::render(format!("shader compile failed: {}", log)))
    }
}

fn link_program(gl: &Gl, vertex: &str, fragment: &str, lit: bool) -> Result<Program> {
    let vertex = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
    let fragment = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment)?;
    let program = gl
        .create_program()
        .ok_or_else(|| Error::render("cannot create program"))?;

    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.bind_attrib_location(&program, POSITION_ATTRIB, "a_position");
    if lit {
        gl.bind_attrib_location(&program, NORMAL_ATTRIB, "a_normal");
    }
    gl.link_program(&program);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));

    if !gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        return Err(Error::render(format!("program link failed: {}", log)));
    }

    Ok(Program {
        view_projection: gl.get_uniform_location(&program, "u_view_projection"),
        color: gl.get_uniform_location(&program, "u_color"),
        program,
    })
}
