/// Error types shared by the core and the front ends
use thiserror::Error;

/// Errors raised while setting up or driving a view.
#[derive(Debug, Error)]
pub enum Error {
    /// The host cannot render at all (no WebGL, no terminal).
    #[error("{0} not available")]
    CapabilityUnavailable(String),

    #[error("polygon '{name}' has {count} points, at least 3 are required")]
    TooFewPoints { name: String, count: usize },

    #[error("invalid extrusion height {height} for '{name}'")]
    InvalidHeight { name: String, height: f32 },

    #[error("failed to triangulate '{name}': {message}")]
    Triangulation { name: String, message: String },

    /// A renderer failed to draw a frame.
    #[error("render failed: {0}")]
    Render(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but its values cannot drive a view.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn capability(what: impl Into<String>) -> Self {
        Self::CapabilityUnavailable(what.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    pub fn is_capability(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
