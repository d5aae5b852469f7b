/// View configuration with the stock Four Corners defaults
use log::info;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use std::time::Duration;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::scheduler::RedrawPolicy;
use crate::shapes::Footprint;

/// Which input drives the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlMode {
    /// Arrow keys step the camera around a fixed circle
    #[default]
    Keys,
    /// Pointer drag orbits, wheel zooms
    Orbit,
}

impl ControlMode {
    pub fn default_policy(&self) -> RedrawPolicy {
        match self {
            ControlMode::Keys => RedrawPolicy::Poll,
            ControlMode::Orbit => RedrawPolicy::OnChange,
        }
    }

    pub fn default_container(&self) -> &'static str {
        match self {
            ControlMode::Keys => "3d",
            ControlMode::Orbit => "container",
        }
    }
}

/// One extruded shape in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub footprint: Footprint,
    pub height: f32,
    pub color: Color,
}

impl ShapeConfig {
    pub fn new(footprint: Footprint, height: f32, color: u32) -> Self {
        Self {
            footprint,
            height,
            color: Color::from_hex(color),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub mode: ControlMode,
    /// Overrides the mode's default redraw policy
    pub policy: Option<RedrawPolicy>,
    /// Overrides the mode's default host element id
    pub container_id: Option<String>,

    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    pub camera_radius: f32,
    pub camera_height: f32,
    pub initial_azimuth: f32,
    pub rotation_step: f32,
    pub light_radius: f32,
    /// Point lights sit this far above the camera
    pub light_lift: f32,

    pub orbit_start: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,

    pub poll_interval_ms: u64,

    pub base_size: f32,
    pub base_divisions: u32,
    pub base_color: Color,
    pub outline_color: Color,
    pub background: Color,

    pub shapes: Vec<ShapeConfig>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: ControlMode::Keys,
            policy: None,
            container_id: None,
            width: 400,
            height: 350,
            fov_degrees: 45.0,
            near: 1.0,
            far: 1000.0,
            camera_radius: 500.0,
            camera_height: 650.0,
            initial_azimuth: PI,
            rotation_step: 0.025,
            light_radius: 600.0,
            light_lift: 200.0,
            orbit_start: [100.0, -300.0, 300.0],
            min_distance: 50.0,
            max_distance: 950.0,
            poll_interval_ms: 50,
            base_size: 225.0,
            base_divisions: 30,
            base_color: Color::from_hex(0xaaaaaa),
            outline_color: Color::from_hex(0x333333),
            background: Color::WHITE,
            shapes: vec![
                ShapeConfig::new(Footprint::Utah, 160.0, 0x00ff00),
                ShapeConfig::new(Footprint::Arizona, 110.0, 0xcccc00),
                ShapeConfig::new(Footprint::NewMexico, 55.0, 0xff0000),
            ],
        }
    }
}

impl ViewConfig {
    /// Defaults for a control mode
    pub fn for_mode(mode: ControlMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the camera, orbit controls or timer cannot work with
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfig(message));

        if self.width == 0 || self.height == 0 {
            return invalid(format!("view size {}x{} is empty", self.width, self.height));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid(format!("field of view {} is outside (0, 180)", self.fov_degrees));
        }
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            return invalid(format!(
                "clip planes near {} / far {} need 0 < near < far",
                self.near, self.far
            ));
        }
        if !(self.min_distance >= 0.0 && self.min_distance <= self.max_distance) {
            return invalid(format!(
                "orbit distance limits {}..{} are not an ordered range",
                self.min_distance, self.max_distance
            ));
        }
        if !self.rotation_step.is_finite() {
            return invalid(format!("rotation step {} is not finite", self.rotation_step));
        }
        if self.poll_interval_ms == 0 {
            return invalid("poll interval must be at least 1 ms".to_string());
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!("loaded view configuration from {}", path.display());
        Ok(config)
    }

    pub fn redraw_policy(&self) -> RedrawPolicy {
        self.policy.unwrap_or_else(|| self.mode.default_policy())
    }

    pub fn container(&self) -> &str {
        self.container_id
            .as_deref()
            .unwrap_or_else(|| self.mode.default_container())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn light_height(&self) -> f32 {
        self.camera_height + self.light_lift
    }
}
