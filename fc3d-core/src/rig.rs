/// Camera and light rig driven by a single azimuth angle
use nalgebra::Point3;
use std::f32::consts::PI;

use crate::color::Color;

/// Azimuth change applied by one keyboard step, in radians
pub const ROTATION_STEP: f32 = 0.025;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

/// Position on a circle of `radius` around the z axis at `height`.
///
/// Azimuth 0 points along +Y and grows towards +X.
pub fn orbit_point(azimuth: f32, radius: f32, height: f32) -> Point3<f32> {
    Point3::new(radius * azimuth.sin(), radius * azimuth.cos(), height)
}

/// Camera on a fixed circle, parameterized by azimuth
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    /// Unbounded; never wrapped into [0, 2π)
    pub azimuth: f32,
    pub radius: f32,
    pub height: f32,
    pub step: f32,
}

impl CameraRig {
    pub fn new(azimuth: f32, radius: f32, height: f32) -> Self {
        Self {
            azimuth,
            radius,
            height,
            step: ROTATION_STEP,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn rotate(&mut self, direction: RotateDirection) {
        match direction {
            RotateDirection::Left => self.azimuth -= self.step,
            RotateDirection::Right => self.azimuth += self.step,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        orbit_point(self.azimuth, self.radius, self.height)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(PI, 500.0, 650.0)
    }
}

/// A point light placed at a fixed angular offset from the camera azimuth
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub offset: f32,
    pub radius: f32,
    pub height: f32,
    pub intensity: f32,
    pub color: Color,
    pub position: Point3<f32>,
}

impl PointLight {
    pub fn new(offset: f32, radius: f32, height: f32, intensity: f32, color: Color) -> Self {
        Self {
            offset,
            radius,
            height,
            intensity,
            color,
            position: orbit_point(offset, radius, height),
        }
    }

    pub fn place(&mut self, azimuth: f32) {
        self.position = orbit_point(azimuth + self.offset, self.radius, self.height);
    }
}

/// Fixed light shining from `position` towards the origin
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: Point3<f32>,
    pub intensity: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl LightRig {
    /// Two grey lights flanking the camera at ±30°, under a weak overhead light
    pub fn flanking(azimuth: f32, radius: f32, height: f32) -> Self {
        let grey = Color::from_hex(0xaaaaaa);
        let mut rig = Self {
            directional: DirectionalLight {
                position: Point3::new(0.0, 0.0, 600.0),
                intensity: 0.5,
                color: Color::WHITE,
            },
            points: vec![
                PointLight::new(PI / 6.0, radius, height, 3.0, grey),
                PointLight::new(-PI / 6.0, radius, height, 1.0, grey),
            ],
        };
        rig.place(azimuth);
        rig
    }

    /// Three white lights spread 120° apart under a strong overhead light
    pub fn surround(azimuth: f32, radius: f32, height: f32) -> Self {
        let mut rig = Self {
            directional: DirectionalLight {
                position: Point3::new(0.0, 0.0, 1000.0),
                intensity: 5.0,
                color: Color::WHITE,
            },
            points: vec![
                PointLight::new(0.0, radius, height, 3.0, Color::WHITE),
                PointLight::new(2.0 * PI / 3.0, radius, height, 2.0, Color::WHITE),
                PointLight::new(-2.0 * PI / 3.0, radius, height, 1.0, Color::WHITE),
            ],
        };
        rig.place(azimuth);
        rig
    }

    /// Recompute every point light for a new azimuth
    pub fn place(&mut self, azimuth: f32) {
        for light in &mut self.points {
            light.place(azimuth);
        }
    }

    pub fn total_intensity(&self) -> f32 {
        self.directional.intensity + self.points.iter().map(|l| l.intensity).sum::<f32>()
    }
}
