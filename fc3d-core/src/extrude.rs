/// Polygon extrusion: a 2D footprint swept up the z axis into a solid,
/// plus the outline traced at the top of the sweep.
use log::debug;
use nalgebra::{Point2, Point3, Vector3};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Polyline, Triangle};
use crate::shapes::Polygon;

/// Opacity given to every extruded solid
pub const SOLID_OPACITY: f32 = 0.8;

/// An extruded footprint. Built once at scene setup and never mutated.
#[derive(Debug, Clone)]
pub struct ExtrudedShape {
    pub name: String,
    pub height: f32,
    /// Footprint lifted to `z = height`, one point per polygon vertex
    pub outline: Polyline,
    /// Side walls plus bottom and top caps, spanning `z` in `[0, height]`
    pub solid: Mesh,
    pub color: Color,
    pub opacity: f32,
}

/// Extrude `polygon` from the ground plane up to `height`.
///
/// The boundary is not checked for self-intersections; such input produces a
/// mesh with overlapping faces.
pub fn extrude(polygon: &Polygon, height: f32, color: Color) -> Result<ExtrudedShape> {
    if polygon.len() < 3 {
        return Err(Error::TooFewPoints {
            name: polygon.name.clone(),
            count: polygon.len(),
        });
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidHeight {
            name: polygon.name.clone(),
            height,
        });
    }

    let outline = Polyline::new(
        polygon
            .points
            .iter()
            .map(|p| Point3::new(p.x, p.y, height))
            .collect(),
    );

    let ring = boundary_ring(polygon);
    let caps = triangulate(&polygon.name, &ring)?;

    let mut solid = Mesh::with_capacity(2 * ring.len() + 2 * caps.len());
    add_walls(&mut solid, &ring, height);
    add_caps(&mut solid, &ring, &caps, height);

    debug!(
        "extruded '{}' to {}: {} outline points, {} triangles",
        polygon.name,
        height,
        outline.len(),
        solid.triangle_count()
    );

    Ok(ExtrudedShape {
        name: polygon.name.clone(),
        height,
        outline,
        solid,
        color,
        opacity: SOLID_OPACITY,
    })
}

/// Counter-clockwise copy of the boundary without a repeated closing point
fn boundary_ring(polygon: &Polygon) -> Vec<Point2<f32>> {
    let mut ring = polygon.points.clone();
    if ring.len() > 3 && ring.first() == ring.last() {
        ring.pop();
    }
    if polygon.signed_area() < 0.0 {
        ring.reverse();
    }
    ring
}

/// Ear-clip the ring into triangles given as index triples
fn triangulate(name: &str, ring: &[Point2<f32>]) -> Result<Vec<[usize; 3]>> {
    let flat: Vec<f64> = ring
        .iter()
        .flat_map(|p| [f64::from(p.x), f64::from(p.y)])
        .collect();

    let indices = earcutr::earcut(&flat, &[], 2).map_err(|e| Error::Triangulation {
        name: name.to_string(),
        message: format!("{:?}", e),
    })?;

    Ok(indices
        .chunks_exact(3)
        .map(|tri| {
            let (a, b, c) = (ring[tri[0]], ring[tri[1]], ring[tri[2]]);
            // Force counter-clockwise winding so the top cap faces +z
            if (b - a).perp(&(c - a)) < 0.0 {
                [tri[0], tri[2], tri[1]]
            } else {
                [tri[0], tri[1], tri[2]]
            }
        })
        .collect())
}

fn add_walls(mesh: &mut Mesh, ring: &[Point2<f32>], height: f32) {
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let edge = b - a;
        // Outward normal of a counter-clockwise edge
        let normal = Vector3::new(edge.y, -edge.x, 0.0)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);

        let a0 = Point3::new(a.x, a.y, 0.0);
        let b0 = Point3::new(b.x, b.y, 0.0);
        let a1 = Point3::new(a.x, a.y, height);
        let b1 = Point3::new(b.x, b.y, height);

        mesh.add_triangle(Triangle::flat(a0, b0, b1, normal));
        mesh.add_triangle(Triangle::flat(a0, b1, a1, normal));
    }
}

fn add_caps(mesh: &mut Mesh, ring: &[Point2<f32>], caps: &[[usize; 3]], height: f32) {
    let lift = |i: usize, z: f32| Point3::new(ring[i].x, ring[i].y, z);
    for &[a, b, c] in caps {
        mesh.add_triangle(Triangle::flat(
            lift(a, 0.0),
            lift(c, 0.0),
            lift(b, 0.0),
            -Vector3::z(),
        ));
        mesh.add_triangle(Triangle::flat(
            lift(a, height),
            lift(b, height),
            lift(c, height),
            Vector3::z(),
        ));
    }
}
