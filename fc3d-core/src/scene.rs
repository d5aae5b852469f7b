/// Scene composition and the per-view context mutated by input
use log::{debug, info};
use nalgebra::Point3;

use crate::color::Color;
use crate::config::{ControlMode, ViewConfig};
use crate::error::Result;
use crate::extrude::{extrude, ExtrudedShape};
use crate::grid::{draw_base, BaseGrid};
use crate::orbit::OrbitControls;
use crate::projection::Camera;
use crate::rig::{CameraRig, LightRig, RotateDirection};
use crate::shapes::Polygon;

/// Everything a renderer draws. Geometry is fixed after composition; only the
/// light positions change afterwards.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    /// Stroke colour shared by every shape outline
    pub outline_color: Color,
    pub base: Option<BaseGrid>,
    pub shapes: Vec<ExtrudedShape>,
    pub lights: LightRig,
}

impl Scene {
    pub fn new(lights: LightRig, outline_color: Color, background: Color) -> Self {
        Self {
            background,
            outline_color,
            base: None,
            shapes: Vec::new(),
            lights,
        }
    }

    /// Build the configured scene: base grid first, then every shape in order
    pub fn compose(config: &ViewConfig) -> Result<Self> {
        let lights = match config.mode {
            ControlMode::Keys => LightRig::flanking(
                config.initial_azimuth,
                config.light_radius,
                config.light_height(),
            ),
            ControlMode::Orbit => LightRig::surround(
                config.initial_azimuth,
                config.light_radius,
                config.light_height(),
            ),
        };

        let mut scene = Self::new(lights, config.outline_color, config.background);
        scene.draw_base(config.base_size, config.base_divisions, config.base_color);
        for shape in &config.shapes {
            scene.add_extruded(&shape.footprint.polygon(), shape.height, shape.color)?;
        }

        info!(
            "composed scene: {} shapes, {} triangles, {} grid lines",
            scene.shapes.len(),
            scene.triangle_count(),
            scene.base.as_ref().map_or(0, |b| b.line_count())
        );
        Ok(scene)
    }

    pub fn draw_base(&mut self, size: f32, divisions: u32, color: Color) {
        self.base = Some(draw_base(size, divisions, color));
    }

    /// Extrude `polygon` and insert it; the scene owns the result
    pub fn add_extruded(&mut self, polygon: &Polygon, height: f32, color: Color) -> Result<()> {
        let shape = extrude(polygon, height, color)?;
        info!(
            "added '{}': height {}, {} triangles",
            shape.name,
            shape.height,
            shape.solid.triangle_count()
        );
        self.shapes.push(shape);
        Ok(())
    }

    pub fn triangle_count(&self) -> usize {
        self.shapes.iter().map(|s| s.solid.triangle_count()).sum()
    }
}

/// How the camera is currently steered
#[derive(Debug, Clone)]
pub enum CameraControls {
    Keys(CameraRig),
    Orbit(OrbitControls),
}

/// A scene plus the camera state steering it. One per view.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: CameraControls,
    viewport: (u32, u32),
}

impl SceneContext {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        config.validate()?;
        let scene = Scene::compose(config)?;

        let mut camera = Camera::new(config.width, config.height);
        camera.fov = config.fov_degrees.to_radians();
        camera.near = config.near;
        camera.far = config.far;

        let controls = match config.mode {
            ControlMode::Keys => CameraControls::Keys(
                CameraRig::new(
                    config.initial_azimuth,
                    config.camera_radius,
                    config.camera_height,
                )
                .with_step(config.rotation_step),
            ),
            ControlMode::Orbit => {
                let [x, y, z] = config.orbit_start;
                CameraControls::Orbit(
                    OrbitControls::from_position(Point3::new(x, y, z))
                        .with_distance_limits(config.min_distance, config.max_distance),
                )
            }
        };

        let mut context = Self {
            scene,
            camera,
            controls,
            viewport: (config.width, config.height),
        };
        context.sync_camera();
        Ok(context)
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Current camera azimuth around the z axis
    pub fn azimuth(&self) -> f32 {
        match &self.controls {
            CameraControls::Keys(rig) => rig.azimuth,
            CameraControls::Orbit(orbit) => orbit.azimuth(),
        }
    }

    /// Step the camera rig. Returns `true` if state changed; orbit views
    /// ignore keyboard steps.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let CameraControls::Keys(rig) = &mut self.controls else {
            debug!("ignoring {:?} step in orbit mode", direction);
            return false;
        };
        rig.rotate(direction);
        let azimuth = rig.azimuth;
        self.scene.lights.place(azimuth);
        self.sync_camera();
        debug!("rotated {:?} to azimuth {:.3}", direction, azimuth);
        true
    }

    /// Orbit by a pointer drag. Returns `true` if the camera moved.
    pub fn drag(&mut self, dx: f32, dy: f32) -> bool {
        let viewport_height = self.viewport.1;
        let CameraControls::Orbit(orbit) = &mut self.controls else {
            return false;
        };
        let moved = orbit.drag(dx, dy, viewport_height);
        if moved {
            self.sync_camera();
        }
        moved
    }

    /// Zoom by wheel notches. Returns `true` if the camera moved.
    pub fn zoom(&mut self, notches: f32) -> bool {
        let CameraControls::Orbit(orbit) = &mut self.controls else {
            return false;
        };
        let moved = orbit.zoom(notches);
        if moved {
            self.sync_camera();
        }
        moved
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
        debug!("viewport {}x{}, aspect {:.3}", width, height, self.camera.aspect);
    }

    fn sync_camera(&mut self) {
        match &self.controls {
            CameraControls::Keys(rig) => self.camera.look_at_origin(rig.position()),
            CameraControls::Orbit(orbit) => orbit.update(&mut self.camera),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShapeConfig;
    use crate::shapes::Footprint;

    #[test]
    fn test_compose_default_scene() {
        let scene = Scene::compose(&ViewConfig::default()).unwrap();
        let names: Vec<&str> = scene.shapes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Utah", "Arizona", "New Mexico"]);
        assert_eq!(scene.base.as_ref().unwrap().line_count(), 62);
        assert_eq!(scene.lights.points.len(), 2);
        assert_eq!(scene.outline_color.to_hex(), 0x333333);
    }

    #[test]
    fn test_orbit_scene_has_three_point_lights() {
        let scene = Scene::compose(&ViewConfig::for_mode(ControlMode::Orbit)).unwrap();
        assert_eq!(scene.lights.points.len(), 3);
    }

    #[test]
    fn test_bad_shape_aborts_compose() {
        let mut config = ViewConfig::default();
        config.shapes.push(ShapeConfig::new(Footprint::Utah, -5.0, 0));
        assert!(Scene::compose(&config).is_err());
    }

    #[test]
    fn test_keys_context_camera_on_circle() {
        let context = SceneContext::new(&ViewConfig::default()).unwrap();
        let p = context.camera.position;
        assert!(((p.x * p.x + p.y * p.y).sqrt() - 500.0).abs() < 1e-2);
        assert_eq!(p.z, 650.0);
        assert_eq!(context.camera.target, Point3::origin());
    }

    #[test]
    fn test_orbit_ignores_steps_keys_ignore_drag() {
        let mut orbit = SceneContext::new(&ViewConfig::for_mode(ControlMode::Orbit)).unwrap();
        assert!(!orbit.rotate(RotateDirection::Left));
        assert!(orbit.drag(10.0, 0.0));

        let mut keys = SceneContext::new(&ViewConfig::default()).unwrap();
        assert!(!keys.drag(10.0, 0.0));
        assert!(!keys.zoom(1.0));
        assert!(keys.rotate(RotateDirection::Left));
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut context = SceneContext::new(&ViewConfig::default()).unwrap();
        context.resize(800, 600);
        assert_eq!(context.viewport(), (800, 600));
        assert!((context.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_refused_before_compose() {
        let mut config = ViewConfig::for_mode(ControlMode::Orbit);
        config.min_distance = 900.0;
        config.max_distance = 100.0;
        assert!(matches!(
            SceneContext::new(&config),
            Err(crate::Error::InvalidConfig(_))
        ));

        let mut config = ViewConfig::default();
        config.near = 10.0;
        config.far = 10.0;
        assert!(SceneContext::new(&config).is_err());
    }
}
