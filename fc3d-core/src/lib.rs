/// FC3D Core Library - Shared geometry, camera rig and render-loop logic
///
/// This library holds everything the terminal and web front ends share: the
/// state outline tables, polygon extrusion, the base grid, the camera and
/// light rig, orbit controls, scene composition and frame scheduling.

pub mod color;
pub mod config;
pub mod error;
pub mod extrude;
pub mod geometry;
pub mod grid;
pub mod orbit;
pub mod projection;
pub mod rig;
pub mod scene;
pub mod scheduler;
pub mod shapes;
pub mod tables;
pub mod viewer;

// Re-export commonly used types
pub use color::Color;
pub use config::{ControlMode, ShapeConfig, ViewConfig};
pub use error::{Error, Result};
pub use extrude::{extrude, ExtrudedShape};
pub use geometry::{LineSegment, Mesh, Polyline, Triangle, Vertex};
pub use grid::{draw_base, BaseGrid};
pub use orbit::OrbitControls;
pub use projection::Camera;
pub use rig::{CameraRig, LightRig, RotateDirection};
pub use scene::{CameraControls, Scene, SceneContext};
pub use scheduler::{FrameScheduler, Interval, RedrawPolicy};
pub use shapes::{Footprint, Polygon};
pub use viewer::{Renderer, ViewEvent, Viewer};
