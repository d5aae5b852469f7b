/// Wireframe base plane drawn beneath the extruded shapes
use nalgebra::Point3;

use crate::color::Color;
use crate::geometry::LineSegment;

/// A square of side `2 * size` in the `z = 0` plane, centred on the origin and
/// split into `divisions x divisions` cells.
#[derive(Debug, Clone)]
pub struct BaseGrid {
    pub size: f32,
    pub divisions: u32,
    pub color: Color,
    pub lines: Vec<LineSegment>,
}

impl BaseGrid {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Build the base grid. `divisions` below one is treated as one.
pub fn draw_base(size: f32, divisions: u32, color: Color) -> BaseGrid {
    let divisions = divisions.max(1);
    let cell = 2.0 * size / divisions as f32;

    let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));
    for i in 0..=divisions {
        let t = -size + cell * i as f32;
        lines.push(LineSegment::new(
            Point3::new(t, -size, 0.0),
            Point3::new(t, size, 0.0),
        ));
        lines.push(LineSegment::new(
            Point3::new(-size, t, 0.0),
            Point3::new(size, t, 0.0),
        ));
    }

    BaseGrid {
        size,
        divisions,
        color,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        let grid = draw_base(225.0, 30, Color::from_hex(0xaaaaaa));
        assert_eq!(grid.line_count(), 62);
    }

    #[test]
    fn test_lines_stay_in_plane_and_bounds() {
        let grid = draw_base(10.0, 4, Color::WHITE);
        for line in &grid.lines {
            for p in [line.start, line.end] {
                assert_eq!(p.z, 0.0);
                assert!(p.x.abs() <= 10.0 + 1e-5 && p.y.abs() <= 10.0 + 1e-5);
            }
            assert!((line.length() - 20.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_outer_lines_hit_edges() {
        let grid = draw_base(10.0, 4, Color::WHITE);
        let xs: Vec<f32> = grid.lines.iter().step_by(2).map(|l| l.start.x).collect();
        assert_eq!(xs.len(), 5);
        assert!((xs[0] + 10.0).abs() < 1e-5);
        assert!((xs[4] - 10.0).abs() < 1e-5);
        assert!((xs[2]).abs() < 1e-5);
    }

    #[test]
    fn test_zero_divisions_clamped() {
        let grid = draw_base(1.0, 0, Color::WHITE);
        assert_eq!(grid.divisions, 1);
        assert_eq!(grid.line_count(), 4);
    }
}
