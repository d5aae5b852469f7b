/// Flattens a composed [`Scene`] into the plain vertex arrays the WebGL
/// renderer uploads. Nothing here touches the browser, so it runs in host
/// tests.
use fc3d_core::{Color, LightRig, LineSegment, Scene};

/// Lights the fragment shader accepts: the overhead light plus up to three
/// point lights.
pub const MAX_LIGHTS: usize = 4;

/// Triangles sharing one material colour.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleBatch {
    /// `[x, y, z, x, y, z, ...]`
    pub positions: Vec<f32>,
    /// One normal per vertex, same layout as `positions`
    pub normals: Vec<f32>,
    pub color: [f32; 4],
}

impl TriangleBatch {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Line segments drawn with `LINES`, two vertices per segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    pub positions: Vec<f32>,
    pub color: [f32; 4],
}

impl LineBatch {
    fn from_segments(segments: impl Iterator<Item = LineSegment>, color: Color) -> Self {
        let mut positions = Vec::new();
        for segment in segments {
            positions.extend_from_slice(&[segment.start.x, segment.start.y, segment.start.z]);
            positions.extend_from_slice(&[segment.end.x, segment.end.y, segment.end.z]);
        }
        Self {
            positions,
            color: color.rgba(1.0),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Everything static in a scene, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBatches {
    pub grid: Option<LineBatch>,
    pub solids: Vec<TriangleBatch>,
    pub outlines: Vec<LineBatch>,
}

impl SceneBatches {
    pub fn from_scene(scene: &Scene) -> Self {
        let grid = scene
            .base
            .as_ref()
            .map(|base| LineBatch::from_segments(base.lines.iter().copied(), base.color));

        let solids = scene
            .shapes
            .iter()
            .map(|shape| {
                let count = shape.solid.triangle_count() * 9;
                let mut positions = Vec::with_capacity(count);
                let mut normals = Vec::with_capacity(count);
                for vertex in shape.solid.triangles.iter().flat_map(|t| &t.vertices) {
                    positions.extend_from_slice(vertex.position.coords.as_slice());
                    normals.extend_from_slice(vertex.normal.as_slice());
                }
                TriangleBatch {
                    positions,
                    normals,
                    color: shape.color.rgba(shape.opacity),
                }
            })
            .collect();

        let outlines = scene
            .shapes
            .iter()
            .map(|shape| LineBatch::from_segments(shape.outline.segments(), scene.outline_color))
            .collect();

        Self {
            grid,
            solids,
            outlines,
        }
    }

    /// Vertex count across every batch
    pub fn vertex_count(&self) -> usize {
        self.grid.as_ref().map_or(0, LineBatch::vertex_count)
            + self.solids.iter().map(TriangleBatch::vertex_count).sum::<usize>()
            + self.outlines.iter().map(LineBatch::vertex_count).sum::<usize>()
    }
}

/// Light uniforms, padded to [`MAX_LIGHTS`].
///
/// Colours are pre-multiplied by each light's share of the rig's total
/// intensity, so the summed diffuse term stays within [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct LightUniforms {
    pub positions: [f32; MAX_LIGHTS * 3],
    pub colors: [f32; MAX_LIGHTS * 3],
    pub count: i32,
}

impl LightUniforms {
    pub fn from_rig(lights: &LightRig) -> Self {
        let total = lights.total_intensity();
        let share = |intensity: f32| if total > 0.0 { intensity / total } else { 0.0 };

        let sources = std::iter::once((
            lights.directional.position,
            lights.directional.color,
            lights.directional.intensity,
        ))
        .chain(
            lights
                .points
                .iter()
                .map(|light| (light.position, light.color, light.intensity)),
        )
        .take(MAX_LIGHTS);

        let mut uniforms = Self {
            positions: [0.0; MAX_LIGHTS * 3],
            colors: [0.0; MAX_LIGHTS * 3],
            count: 0,
        };
        for (i, (position, color, intensity)) in sources.enumerate() {
            let tint = color.scaled(share(intensity));
            uniforms.positions[i * 3..i * 3 + 3].copy_from_slice(position.coords.as_slice());
            uniforms.colors[i * 3..i * 3 + 3].copy_from_slice(&[tint.r, tint.g, tint.b]);
            uniforms.count += 1;
        }
        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc3d_core::{ControlMode, ViewConfig};
    use std::f32::consts::PI;

    fn default_scene() -> Scene {
        Scene::compose(&ViewConfig::default()).unwrap()
    }

    #[test]
    fn test_batches_match_scene() {
        let scene = default_scene();
        let batches = SceneBatches::from_scene(&scene);

        let grid = batches.grid.as_ref().unwrap();
        assert_eq!(grid.vertex_count(), 2 * 2 * 31);

        assert_eq!(batches.solids.len(), 3);
        for (batch, shape) in batches.solids.iter().zip(&scene.shapes) {
            assert_eq!(batch.vertex_count(), shape.solid.triangle_count() * 3);
            assert_eq!(batch.normals.len(), batch.positions.len());
            assert!((batch.color[3] - 0.8).abs() < 1e-6);
        }

        for (batch, shape) in batches.outlines.iter().zip(&scene.shapes) {
            assert_eq!(batch.vertex_count(), 2 * (shape.outline.len() - 1));
            assert_eq!(batch.color, scene.outline_color.rgba(1.0));
        }
    }

    #[test]
    fn test_light_shares_sum_to_one() {
        let scene = Scene::compose(&ViewConfig::for_mode(ControlMode::Orbit)).unwrap();
        let uniforms = LightUniforms::from_rig(&scene.lights);
        assert_eq!(uniforms.count, 4);

        // White lights: the red channels carry the shares
        let red: f32 = uniforms.colors.chunks(3).map(|c| c[0]).sum();
        assert!((red - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_light_positions_follow_rig() {
        let mut scene = default_scene();
        scene.lights.place(PI / 2.0);
        let uniforms = LightUniforms::from_rig(&scene.lights);
        assert_eq!(uniforms.count, 3);
        assert_eq!(&uniforms.positions[0..3], &[0.0, 0.0, 600.0]);
        let first = scene.lights.points[0].position;
        assert_eq!(&uniforms.positions[3..6], first.coords.as_slice());
        // Unused slot stays dark
        assert_eq!(&uniforms.colors[9..12], &[0.0, 0.0, 0.0]);
    }
}
