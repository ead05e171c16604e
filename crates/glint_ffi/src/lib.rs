//! Glint FFI - C-callable boundary and image output for the renderer.
//!
//! This crate provides:
//!
//! - **C ABI**: opaque scene/material handles, `glint_render_scene` with a
//!   progress callback, and status codes (see [`capi`])
//! - **PNG export**: [`save_png`] for the RGBA8 rasters the renderer produces

pub mod capi;
pub mod png;

pub use capi::{FfiError, GlintCameraConfig, GlintTriplet, MaterialHandle, SceneHandle};
pub use png::{save_png, PngError};
