//! Progressive preview: the converging image written to disk at each progress report.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glint_ffi::save_png;

/// Rewrites one PNG with the latest resolved buffer.
///
/// Each update lands in a sibling temporary file first and is then renamed
/// over the preview, so an image viewer watching the path never reads a
/// half-written file.
pub struct PreviewWriter {
    path: PathBuf,
    staging: PathBuf,
    width: u32,
    height: u32,
    updates: u32,
}

impl PreviewWriter {
    pub fn new(path: PathBuf, width: u32, height: u32) -> Self {
        let mut staging = path.clone().into_os_string();
        staging.push(".partial");
        Self {
            path,
            staging: staging.into(),
            width,
            height,
            updates: 0,
        }
    }

    /// Number of previews written so far.
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Write the buffer as it stands after `samples` samples per pixel.
    pub fn update(&mut self, samples: u32, buffer: &[u8]) -> Result<()> {
        save_png(self.width, self.height, buffer, &self.staging)
            .with_context(|| format!("failed to write preview {}", self.staging.display()))?;
        fs::rename(&self.staging, &self.path)
            .with_context(|| format!("failed to replace preview {}", self.path.display()))?;
        self.updates += 1;
        log::debug!("preview at {} spp written to {}", samples, self.path.display());
        Ok(())
    }
}
