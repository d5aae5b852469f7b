/// Polygon footprints: the state outline tables and procedural demo shapes
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::tables;

/// Segments used to approximate a circle footprint
pub const CYLINDER_SEGMENTS: usize = 32;

/// Inner radius of a star footprint relative to its outer radius
pub const STAR_INNER_RATIO: f32 = 0.375;

/// A named, ordered 2D boundary. The first and last point may coincide.
///
/// Simplicity (no self-intersections) is assumed, never checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub name: String,
    pub points: Vec<Point2<f32>>,
}

impl Polygon {
    pub fn new(name: impl Into<String>, points: Vec<Point2<f32>>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn from_table(name: impl Into<String>, table: &[[f32; 2]]) -> Self {
        Self::new(
            name,
            table.iter().map(|&[x, y]| Point2::new(x, y)).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive for counter-clockwise boundaries
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f32 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }

    /// Axis-aligned bounds as `(min, max)`
    pub fn bounds(&self) -> Option<(Point2<f32>, Point2<f32>)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

/// Circle footprint: `CYLINDER_SEGMENTS + 1` points, the last one closing
/// the loop onto the first.
pub fn cylinder(cx: f32, cy: f32, radius: f32) -> Polygon {
    let step = 2.0 * PI / CYLINDER_SEGMENTS as f32;
    let mut points: Vec<Point2<f32>> = (0..CYLINDER_SEGMENTS)
        .map(|i| {
            let angle = step * i as f32;
            Point2::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();
    points.push(points[0]);
    Polygon::new("cylinder", points)
}

/// Five-pointed star footprint starting and ending at the top point, 11 points.
pub fn star(cx: f32, cy: f32, radius: f32) -> Polygon {
    let mut angle = PI / 2.0;
    let mut points = vec![Point2::new(
        cx + radius * angle.cos(),
        cy + radius * angle.sin(),
    )];
    for _ in 0..5 {
        angle += 0.2 * PI;
        let inner = radius * STAR_INNER_RATIO;
        points.push(Point2::new(cx + inner * angle.cos(), cy + inner * angle.sin()));
        angle += 0.2 * PI;
        points.push(Point2::new(
            cx + radius * angle.cos(),
            cy + radius * angle.sin(),
        ));
    }
    // The tenth step lands back on the top point; make the closure exact
    let last = points.len() - 1;
    points[last] = points[0];
    Polygon::new("star", points)
}

/// Where a shape's footprint comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Footprint {
    Utah,
    Arizona,
    NewMexico,
    Cylinder { x: f32, y: f32, radius: f32 },
    Star { x: f32, y: f32, radius: f32 },
}

impl Footprint {
    pub fn name(&self) -> &'static str {
        match self {
            Footprint::Utah => "Utah",
            Footprint::Arizona => "Arizona",
            Footprint::NewMexico => "New Mexico",
            Footprint::Cylinder { .. } => "cylinder",
            Footprint::Star { .. } => "star",
        }
    }

    pub fn polygon(&self) -> Polygon {
        match *self {
            Footprint::Utah => Polygon::from_table(self.name(), tables::UTAH),
            Footprint::Arizona => Polygon::from_table(self.name(), tables::ARIZONA),
            Footprint::NewMexico => Polygon::from_table(self.name(), tables::NEW_MEXICO),
            Footprint::Cylinder { x, y, radius } => cylinder(x, y, radius),
            Footprint::Star { x, y, radius } => star(x, y, radius),
        }
    }
}
