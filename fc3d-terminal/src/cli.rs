// cli.rs - Command-line interface configuration
use clap::{Parser, ValueEnum};
use fc3d_core::{ControlMode, Footprint, RedrawPolicy, Result, ShapeConfig, ViewConfig};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "fc3d-terminal")]
#[command(about = "Four Corners states extruded over a base grid, drawn in the terminal", long_about = None)]
pub struct Cli {
    /// Camera control scheme (defaults to keys, or the config file's mode)
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// When frames are drawn (defaults to poll for keys, on-change for orbit)
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    /// JSON view configuration; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extra demo shapes to place next to the states
    #[arg(long, value_enum, value_delimiter = ',')]
    pub shapes: Vec<Extra>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Keys,
    Orbit,
}

impl From<Mode> for ControlMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Keys => ControlMode::Keys,
            Mode::Orbit => ControlMode::Orbit,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Poll,
    OnChange,
    Continuous,
}

impl From<Policy> for RedrawPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Poll => RedrawPolicy::Poll,
            Policy::OnChange => RedrawPolicy::OnChange,
            Policy::Continuous => RedrawPolicy::Continuous,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    Cylinder,
    Star,
}

impl Extra {
    /// Placed on empty ground east of New Mexico and north of the corner
    pub fn shape(self) -> ShapeConfig {
        match self {
            Extra::Cylinder => ShapeConfig::new(
                Footprint::Cylinder {
                    x: 60.0,
                    y: 60.0,
                    radius: 20.0,
                },
                100.0,
                0x0088ff,
            ),
            Extra::Star => ShapeConfig::new(
                Footprint::Star {
                    x: 170.0,
                    y: -100.0,
                    radius: 40.0,
                },
                80.0,
                0xff00ff,
            ),
        }
    }
}

impl Cli {
    /// Resolve the view configuration: file (or defaults), then flags
    pub fn into_config(self) -> Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) => ViewConfig::load(path)?,
            None => ViewConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(policy) = self.policy {
            config.policy = Some(policy.into());
        }
        config
            .shapes
            .extend(self.shapes.iter().map(|extra| extra.shape()));
        Ok(config)
    }
}
