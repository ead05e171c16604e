//! PNG export for rendered rasters.

use std::path::Path;

use image::{ColorType, ImageFormat};
use thiserror::Error;

/// Errors that can occur while writing a PNG.
#[derive(Error, Debug)]
pub enum PngError {
    #[error("raster holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Write an RGBA8, row-major, top-to-bottom raster to `path` as PNG.
pub fn save_png(
    width: u32,
    height: u32,
    buffer: &[u8],
    path: impl AsRef<Path>,
) -> Result<(), PngError> {
    let expected = width as usize * height as usize * 4;
    if buffer.len() != expected {
        return Err(PngError::BufferSize {
            width,
            height,
            expected,
            actual: buffer.len(),
        });
    }

    let path = path.as_ref();
    image::save_buffer_with_format(path, buffer, width, height, ColorType::Rgba8, ImageFormat::Png)?;
    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_png_preserves_pixels() {
        let (width, height) = (3u32, 2u32);
        let buffer: Vec<u8> = (0..width * height)
            .flat_map(|i| [i as u8 * 40, 255 - i as u8 * 40, 7, 255])
            .collect();

        let path = std::env::temp_dir().join(format!("glint_png_{}.png", std::process::id()));
        save_png(width, height, &buffer, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (width, height));
        assert_eq!(decoded.into_raw(), buffer);
    }

    #[test]
    fn test_save_png_rejects_short_buffer() {
        let path = std::env::temp_dir().join(format!("glint_png_short_{}.png", std::process::id()));
        std::fs::remove_file(&path).ok();
        let err = save_png(4, 4, &[0u8; 10], &path).unwrap_err();
        assert!(matches!(
            err,
            PngError::BufferSize {
                expected: 64,
                actual: 10,
                ..
            }
        ));
        assert!(!path.exists());
    }
}
