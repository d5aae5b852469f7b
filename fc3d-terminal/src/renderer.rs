/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fc3d_core::{Camera, Color, LightRig, LineSegment, Renderer, Result, Scene, Triangle};
use std::io::{Stdout, Write};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: u32 = 2;

/// Light every face receives regardless of orientation
const AMBIENT: f32 = 0.2;

/// Lets lines drawn on a face win the depth test against that face
const LINE_DEPTH_BIAS: f32 = 1e-4;

const GRID_CHAR: char = '·';
const OUTLINE_CHAR: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::WHITE,
};

/// ASCII renderer that rasterizes a scene into terminal cells.
///
/// Sizes given to [`Renderer::resize`] are in "pixels" where one cell is one
/// pixel wide and [`CELL_ASPECT`] pixels tall, so the camera aspect ratio
/// matches what ends up on screen.
pub struct AsciiRenderer<W: Write = Stdout> {
    out: W,
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
    status: String,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W, columns: usize, rows: usize) -> Self {
        let size = columns * rows;
        Self {
            out,
            width: columns,
            height: rows,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
            status: String::new(),
        }
    }

    /// Text drawn over the top row of every frame
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn columns(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    /// Character at a cell, for inspection
    pub fn char_at(&self, column: usize, row: usize) -> Option<char> {
        (column < self.width && row < self.height).then(|| self.cells[row * self.width + column].ch)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    pub fn rasterize(&mut self, scene: &Scene, camera: &Camera) {
        self.clear();

        if let Some(base) = &scene.base {
            for line in &base.lines {
                self.render_line(line, camera, GRID_CHAR, base.color);
            }
        }

        for shape in &scene.shapes {
            for triangle in &shape.solid.triangles {
                self.render_triangle(triangle, camera, &scene.lights, shape.color);
            }
            for segment in shape.outline.segments() {
                self.render_line(&segment, camera, OUTLINE_CHAR, scene.outline_color);
            }
        }
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, (self.height as u32) * CELL_ASPECT)
    }

    /// Project to cell coordinates: `(column, row, depth)`
    fn project(&self, point: &nalgebra::Point3<f32>, camera: &Camera) -> Option<(f32, f32, f32)> {
        let (w, h) = self.pixel_size();
        camera
            .project_to_screen(point, w, h)
            .map(|(x, y, z)| (x, y / CELL_ASPECT as f32, z))
    }

    fn render_triangle(&mut self, triangle: &Triangle, camera: &Camera, lights: &LightRig, color: Color) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match self.project(&vertex.position, camera) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        let brightness = shade(triangle, camera, lights);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let cell = Cell {
            ch: LUMINOSITY_RAMP[char_index],
            color: color.scaled(0.4 + 0.6 * brightness),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                self.plot(x as usize, y as usize, depth, cell);
            }
        }
    }

    fn render_line(&mut self, line: &LineSegment, camera: &Camera, ch: char, color: Color) {
        let (Some(a), Some(b)) = (self.project(&line.start, camera), self.project(&line.end, camera))
        else {
            return;
        };

        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil();
        // Lines reaching far beyond the screen are not worth walking
        if !steps.is_finite() || steps > 4.0 * (self.width + self.height) as f32 {
            return;
        }
        let steps = steps as usize;
        let cell = Cell { ch, color };

        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }
            let depth = a.2 + (b.2 - a.2) * t - LINE_DEPTH_BIAS;
            self.plot(x as usize, y as usize, depth, cell);
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, cell: Cell) {
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.cells[idx] = cell;
        }
    }

    pub fn draw(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        for y in 0..self.height {
            self.out.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let (r, g, b) = cell.color.to_rgb8();
                self.out.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                self.out.queue(Print(cell.ch))?;
            }
        }

        if !self.status.is_empty() {
            self.out.queue(cursor::MoveTo(0, 0))?;
            self.out.queue(SetForegroundColor(TermColor::DarkYellow))?;
            self.out.queue(Print(&self.status))?;
        }

        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let columns = width.max(1) as usize;
        let rows = (height / CELL_ASPECT).max(1) as usize;
        if columns != self.width || rows != self.height {
            self.width = columns;
            self.height = rows;
            self.depth_buffer = vec![f32::INFINITY; columns * rows];
            self.cells = vec![BLANK; columns * rows];
        }
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        self.rasterize(scene, camera);
        self.draw()?;
        Ok(())
    }
}

/// Lambert shading from the light rig, normalized to [0, 1]. Faces are lit
/// from whichever side faces the camera.
fn shade(triangle: &Triangle, camera: &Camera, lights: &LightRig) -> f32 {
    let centre = triangle.centroid();
    let mut normal = triangle.vertices[0].normal;
    if normal.dot(&(camera.position - centre)) < 0.0 {
        normal = -normal;
    }

    let lambert = |from: nalgebra::Point3<f32>| {
        (from - centre)
            .try_normalize(f32::EPSILON)
            .map_or(0.0, |dir| normal.dot(&dir).max(0.0))
    };

    let mut lit = lights.directional.intensity * lambert(lights.directional.position);
    for light in &lights.points {
        lit += light.intensity * lambert(light.position);
    }

    let total = lights.total_intensity();
    let diffuse = if total > 0.0 { lit / total } else { 0.0 };
    (AMBIENT + (1.0 - AMBIENT) * diffuse).clamp(0.0, 1.0)
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
