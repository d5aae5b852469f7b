/// Pointer-driven orbit controls: drag to orbit the origin, wheel to zoom
use log::debug;
use nalgebra::Point3;
use std::f32::consts::PI;

use crate::projection::Camera;

/// Keeps the polar angle away from the poles where +Z up degenerates
const POLAR_EPSILON: f32 = 1.0e-4;

/// Distance multiplier for one zoom notch
const ZOOM_SCALE: f32 = 0.95;

/// Spherical camera state around `target`, with +Z as the pole.
///
/// The azimuth follows the same convention as [`crate::rig::orbit_point`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub enable_zoom: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    azimuth: f32,
    polar: f32,
    distance: f32,
}

impl OrbitControls {
    /// Start from a camera position, orbiting the origin
    pub fn from_position(position: Point3<f32>) -> Self {
        let offset = position.coords;
        let distance = offset.norm();
        let polar = if distance > 0.0 {
            (offset.z / distance).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        Self {
            target: Point3::origin(),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_zoom: true,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            azimuth: offset.x.atan2(offset.y),
            polar: polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            distance,
        }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.max(min).min(max);
        self
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn position(&self) -> Point3<f32> {
        let ring = self.distance * self.polar.sin();
        self.target
            + nalgebra::Vector3::new(
                ring * self.azimuth.sin(),
                ring * self.azimuth.cos(),
                self.distance * self.polar.cos(),
            )
    }

    /// Apply a pointer drag of `(dx, dy)` pixels in a viewport `viewport_height`
    /// pixels tall. A drag across the full height turns a full circle.
    ///
    /// Returns `true` when the camera moved.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: u32) -> bool {
        let scale = 2.0 * PI * self.rotate_speed / viewport_height.max(1) as f32;
        let azimuth = self.azimuth - dx * scale;
        let polar = (self.polar - dy * scale).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let changed = azimuth != self.azimuth || polar != self.polar;
        self.azimuth = azimuth;
        self.polar = polar;
        if changed {
            debug!("orbit azimuth {:.3} polar {:.3}", self.azimuth, self.polar);
        }
        changed
    }

    /// Zoom by wheel notches; positive notches move the camera closer.
    ///
    /// Returns `true` when the camera moved.
    pub fn zoom(&mut self, notches: f32) -> bool {
        if !self.enable_zoom {
            return false;
        }
        let factor = ZOOM_SCALE.powf(notches * self.zoom_speed);
        let distance = (self.distance * factor)
            .max(self.min_distance)
            .min(self.max_distance);
        let changed = distance != self.distance;
        self.distance = distance;
        changed
    }

    /// Move `camera` to the controlled position, looking at the target
    pub fn update(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        OrbitControls::from_position(Point3::new(100.0, -300.0, 300.0))
    }

    #[test]
    fn test_round_trips_start_position() {
        let orbit = controls();
        let p = orbit.position();
        assert!((p - Point3::new(100.0, -300.0, 300.0)).norm() < 1e-2);
    }

    #[test]
    fn test_drag_preserves_distance() {
        let mut orbit = controls();
        let before = orbit.distance();
        assert!(orbit.drag(40.0, -25.0, 350));
        assert!((orbit.position().coords.norm() - before).abs() < 1e-2);
    }

    #[test]
    fn test_full_height_drag_is_full_turn() {
        let mut orbit = controls();
        let start = orbit.azimuth();
        orbit.drag(350.0, 0.0, 350);
        assert!((orbit.azimuth() - (start - 2.0 * PI)).abs() < 1e-4);
    }

    #[test]
    fn test_inverted_limits_do_not_panic() {
        let mut orbit = OrbitControls::from_position(Point3::new(0.0, -300.0, 300.0))
            .with_distance_limits(900.0, 100.0);
        orbit.zoom(3.0);
        assert!(orbit.distance().is_finite());
    }

    #[test]
    fn test_polar_clamped() {
        let mut orbit = controls();
        orbit.drag(0.0, 10_000.0, 350);
        assert!(orbit.polar() >= POLAR_EPSILON);
        orbit.drag(0.0, -10_000.0, 350);
        assert!(orbit.polar() <= PI - POLAR_EPSILON);
        // Pinned at the limit: further pushes report no change
        assert!(!orbit.drag(0.0, -10.0, 350));
    }

    #[test]
    fn test_zoom_limits() {
        let mut orbit = controls().with_distance_limits(100.0, 500.0);
        assert!(orbit.zoom(1.0));
        assert!(orbit.distance() < 436.0);
        for _ in 0..200 {
            orbit.zoom(1.0);
        }
        assert!((orbit.distance() - 100.0).abs() < 1e-4);
        assert!(!orbit.zoom(1.0));
    }

    #[test]
    fn test_zoom_disabled() {
        let mut orbit = controls();
        orbit.enable_zoom = false;
        assert!(!orbit.zoom(3.0));
    }

    #[test]
    fn test_update_aims_at_origin() {
        let mut orbit = controls();
        let mut camera = Camera::default();
        orbit.drag(12.0, 7.0, 350);
        orbit.update(&mut camera);
        assert_eq!(camera.target, Point3::origin());
        assert!((camera.position - orbit.position()).norm() < 1e-6);
    }
}
