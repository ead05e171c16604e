//! Errors reported by the render entry point.

use thiserror::Error;

/// Errors that can occur while setting up or running a render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("aspect ratio must be positive and finite, got {0}")]
    AspectRatio(f64),

    #[error("image width must be at least 1 pixel")]
    ImageWidth,

    #[error("samples per pixel must be at least 1")]
    SamplesPerPixel,

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    FieldOfView(f64),

    #[error("focus distance must be positive and finite, got {0}")]
    FocusDistance(f64),

    #[error("defocus angle must be finite and below 180 degrees, got {0}")]
    DefocusAngle(f64),

    #[error("camera {0} must have finite coordinates")]
    NonFiniteVector(&'static str),

    #[error("camera basis is degenerate: look_from equals look_at or view_up is parallel to the view direction")]
    DegenerateView,

    #[error("raster buffer holds {actual} bytes, expected {expected} (width * height * 4)")]
    BufferSize { expected: usize, actual: usize },

    #[error("render cancelled after {completed} of {requested} samples per pixel")]
    Cancelled { completed: u32, requested: u32 },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
