//! C ABI over the renderer.
//!
//! Materials and scenes cross the boundary as opaque, heap-allocated handles.
//! A material handle owns one reference to a shared material, so destroying it
//! while spheres still use the material is safe. Every fallible function
//! returns a status code (`GLINT_OK` or a negative `GLINT_ERR_*`).

use std::ffi::{c_char, c_int, CStr};
use std::{ptr, slice};
use std::sync::Arc;

use glint_renderer::{
    image_height, render, CameraConfig, Color, Material, Point3, RenderError, RenderOptions,
    Scene, Vec3,
};
use thiserror::Error;

use crate::png::{save_png, PngError};

// ============================================================================
// Status codes
// ============================================================================

pub const GLINT_OK: c_int = 0;
pub const GLINT_ERR_NULL_POINTER: c_int = -1;
pub const GLINT_ERR_INVALID_ARGUMENT: c_int = -2;
pub const GLINT_ERR_INVALID_CONFIG: c_int = -3;
pub const GLINT_ERR_BUFFER_SIZE: c_int = -4;
pub const GLINT_ERR_CANCELLED: c_int = -5;
pub const GLINT_ERR_IO: c_int = -6;

/// Errors raised at the C boundary.
#[derive(Error, Debug)]
pub enum FfiError {
    #[error("null {0} pointer")]
    NullPointer(&'static str),

    #[error("invalid {name}: {value}")]
    InvalidArgument { name: &'static str, value: f64 },

    #[error("path is not valid UTF-8")]
    InvalidPath,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Png(#[from] PngError),
}

impl FfiError {
    /// Status code reported to C callers for this error.
    pub fn status(&self) -> c_int {
        match self {
            FfiError::NullPointer(_) => GLINT_ERR_NULL_POINTER,
            FfiError::InvalidArgument { .. } | FfiError::InvalidPath => GLINT_ERR_INVALID_ARGUMENT,
            FfiError::Render(RenderError::BufferSize { .. }) => GLINT_ERR_BUFFER_SIZE,
            FfiError::Render(RenderError::Cancelled { .. }) => GLINT_ERR_CANCELLED,
            FfiError::Render(_) => GLINT_ERR_INVALID_CONFIG,
            FfiError::Png(PngError::BufferSize { .. }) => GLINT_ERR_BUFFER_SIZE,
            FfiError::Png(PngError::Image(_)) => GLINT_ERR_IO,
        }
    }
}

fn status_of(result: Result<(), FfiError>) -> c_int {
    match result {
        Ok(()) => GLINT_OK,
        Err(err) => {
            log::error!("{}", err);
            err.status()
        }
    }
}

// ============================================================================
// Boundary types
// ============================================================================

/// Three doubles, used for points, directions and colors.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlintTriplet {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<GlintTriplet> for Vec3 {
    fn from(t: GlintTriplet) -> Self {
        Vec3::new(t.x, t.y, t.z)
    }
}

/// Camera settings as laid out by C callers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlintCameraConfig {
    pub aspect_ratio: f64,
    pub image_width: c_int,
    pub samples_per_pixel: c_int,
    pub max_depth: c_int,
    pub vfov: f64,
    pub lookfrom: GlintTriplet,
    pub lookat: GlintTriplet,
    pub vup: GlintTriplet,
    pub defocus_angle: f64,
    pub focus_dist: f64,
}

impl Default for GlintCameraConfig {
    fn default() -> Self {
        let defaults = CameraConfig::default();
        let triplet = |v: Vec3| GlintTriplet {
            x: v.x,
            y: v.y,
            z: v.z,
        };
        Self {
            aspect_ratio: defaults.aspect_ratio,
            image_width: defaults.image_width as c_int,
            samples_per_pixel: defaults.samples_per_pixel as c_int,
            max_depth: defaults.max_depth as c_int,
            vfov: defaults.vfov,
            lookfrom: triplet(defaults.look_from),
            lookat: triplet(defaults.look_at),
            vup: triplet(defaults.view_up),
            defocus_angle: defaults.defocus_angle,
            focus_dist: defaults.focus_dist,
        }
    }
}

fn non_negative(name: &'static str, value: c_int) -> Result<u32, FfiError> {
    u32::try_from(value).map_err(|_| FfiError::InvalidArgument {
        name,
        value: value as f64,
    })
}

impl TryFrom<GlintCameraConfig> for CameraConfig {
    type Error = FfiError;

    fn try_from(c: GlintCameraConfig) -> Result<Self, Self::Error> {
        Ok(CameraConfig {
            aspect_ratio: c.aspect_ratio,
            image_width: non_negative("image_width", c.image_width)?,
            samples_per_pixel: non_negative("samples_per_pixel", c.samples_per_pixel)?,
            max_depth: non_negative("max_depth", c.max_depth)?,
            vfov: c.vfov,
            look_from: c.lookfrom.into(),
            look_at: c.lookat.into(),
            view_up: c.vup.into(),
            defocus_angle: c.defocus_angle,
            focus_dist: c.focus_dist,
        })
    }
}

/// Opaque material handle.
pub struct MaterialHandle {
    material: Arc<Material>,
}

/// Opaque scene handle.
pub struct SceneHandle {
    scene: Scene,
}

/// Progress callback: samples per pixel so far and the RGBA buffer.
pub type RenderCallback = unsafe extern "C" fn(samples: c_int, buffer: *const u8);

// ============================================================================
// Exported functions
// ============================================================================

/// Route `log` output to stderr, filtered by `RUST_LOG`. Safe to call twice.
#[no_mangle]
pub extern "C" fn glint_init_logging() {
    let _ = env_logger::Builder::from_default_env().try_init();
}

fn new_material(material: Result<Material, FfiError>) -> *mut MaterialHandle {
    match material {
        Ok(material) => Box::into_raw(Box::new(MaterialHandle {
            material: Arc::new(material),
        })),
        Err(err) => {
            log::error!("{}", err);
            ptr::null_mut()
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, FfiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FfiError::InvalidArgument { name, value })
    }
}

fn albedo(r: f64, g: f64, b: f64) -> Result<Color, FfiError> {
    Ok(Color::new(finite("red", r)?, finite("green", g)?, finite("blue", b)?))
}

/// Diffuse material. Returns null if a channel is NaN or infinite.
#[no_mangle]
pub extern "C" fn glint_create_lambertian(r: f64, g: f64, b: f64) -> *mut MaterialHandle {
    new_material(albedo(r, g, b).map(Material::diffuse))
}

/// Metal material; `fuzz` is clamped into [0, 1]. Returns null if a channel
/// or `fuzz` is NaN or infinite.
#[no_mangle]
pub extern "C" fn glint_create_metal(r: f64, g: f64, b: f64, fuzz: f64) -> *mut MaterialHandle {
    new_material((|| -> Result<Material, FfiError> {
        Ok(Material::reflective(albedo(r, g, b)?, finite("fuzz", fuzz)?))
    })())
}

/// Glass material. Returns null unless `refraction_index` is finite and positive.
#[no_mangle]
pub extern "C" fn glint_create_dielectric(refraction_index: f64) -> *mut MaterialHandle {
    let material = finite("refraction_index", refraction_index).and_then(|index| {
        if index > 0.0 {
            Ok(Material::refractive(index))
        } else {
            Err(FfiError::InvalidArgument {
                name: "refraction_index",
                value: index,
            })
        }
    });
    new_material(material)
}

/// # Safety
///
/// `material` must be null or a pointer returned by one of the
/// `glint_create_*` material functions that has not been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn glint_destroy_material(material: *mut MaterialHandle) {
    if !material.is_null() {
        drop(unsafe { Box::from_raw(material) });
    }
}

#[no_mangle]
pub extern "C" fn glint_create_scene() -> *mut SceneHandle {
    Box::into_raw(Box::new(SceneHandle {
        scene: Scene::new(),
    }))
}

/// # Safety
///
/// `scene` must be null or a live pointer from `glint_create_scene`, and no
/// render may be running on it.
#[no_mangle]
pub unsafe extern "C" fn glint_destroy_scene(scene: *mut SceneHandle) {
    if !scene.is_null() {
        drop(unsafe { Box::from_raw(scene) });
    }
}

/// Add a sphere to a scene. The scene keeps the material alive.
///
/// # Safety
///
/// `scene` and `material` must each be null or live handles from this library.
#[no_mangle]
pub unsafe extern "C" fn glint_scene_add_sphere(
    scene: *mut SceneHandle,
    center: GlintTriplet,
    radius: f64,
    material: *const MaterialHandle,
) -> c_int {
    status_of((|| -> Result<(), FfiError> {
        let scene = unsafe { scene.as_mut() }.ok_or(FfiError::NullPointer("scene"))?;
        let material = unsafe { material.as_ref() }.ok_or(FfiError::NullPointer("material"))?;
        if !(radius >= 0.0) {
            return Err(FfiError::InvalidArgument {
                name: "radius",
                value: radius,
            });
        }

        scene
            .scene
            .add_sphere(Point3::from(center), radius, material.material.clone());
        Ok(())
    })())
}

/// Image height the renderer derives for `image_width` and `aspect_ratio`,
/// or a negative status code if either is invalid.
#[no_mangle]
pub extern "C" fn glint_image_height(aspect_ratio: f64, image_width: c_int) -> c_int {
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return GLINT_ERR_INVALID_CONFIG;
    }
    match u32::try_from(image_width) {
        Ok(width) if width > 0 => c_int::try_from(image_height(width, aspect_ratio))
            .unwrap_or(GLINT_ERR_INVALID_CONFIG),
        _ => GLINT_ERR_INVALID_CONFIG,
    }
}

/// Render `scene` into `buffer`, calling `callback` after every sampling pass.
///
/// # Safety
///
/// `scene` must be null or a live scene handle not modified during the call.
/// `buffer` must be null or valid for writes of `buffer_len` bytes and not
/// aliased for the duration of the call. `callback`, if given, must not
/// retain the buffer pointer past its return.
#[no_mangle]
pub unsafe extern "C" fn glint_render_scene(
    config: GlintCameraConfig,
    scene: *const SceneHandle,
    buffer: *mut u8,
    buffer_len: usize,
    seed: u64,
    callback: Option<RenderCallback>,
) -> c_int {
    status_of((|| -> Result<(), FfiError> {
        let scene = unsafe { scene.as_ref() }.ok_or(FfiError::NullPointer("scene"))?;
        if buffer.is_null() {
            return Err(FfiError::NullPointer("buffer"));
        }
        let config = CameraConfig::try_from(config)?;
        let buffer = unsafe { slice::from_raw_parts_mut(buffer, buffer_len) };

        let options = RenderOptions {
            seed,
            ..RenderOptions::default()
        };
        render(&config, &scene.scene, buffer, &options, |samples, view| {
            if let Some(callback) = callback {
                unsafe { callback(samples as c_int, view.as_ptr()) };
            }
        })?;
        Ok(())
    })())
}

/// Write an RGBA8 raster of `width * height * 4` bytes to `path` as PNG.
///
/// # Safety
///
/// `buffer` must be null or valid for reads of `width * height * 4` bytes;
/// `path` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn glint_save_png(
    width: c_int,
    height: c_int,
    buffer: *const u8,
    path: *const c_char,
) -> c_int {
    status_of((|| -> Result<(), FfiError> {
        let width = non_negative("width", width)?;
        let height = non_negative("height", height)?;
        if buffer.is_null() {
            return Err(FfiError::NullPointer("buffer"));
        }
        if path.is_null() {
            return Err(FfiError::NullPointer("path"));
        }

        let path = unsafe { CStr::from_ptr(path) }
            .to_str()
            .map_err(|_| FfiError::InvalidPath)?;
        let len = width as usize * height as usize * 4;
        let buffer = unsafe { slice::from_raw_parts(buffer, len) };
        save_png(width, height, buffer, path)?;
        Ok(())
    })())
}

/// Static, NUL-terminated description of a status code.
#[no_mangle]
pub extern "C" fn glint_status_message(status: c_int) -> *const c_char {
    let message: &'static [u8] = match status {
        GLINT_OK => b"ok\0",
        GLINT_ERR_NULL_POINTER => b"null pointer\0",
        GLINT_ERR_INVALID_ARGUMENT => b"invalid argument\0",
        GLINT_ERR_INVALID_CONFIG => b"invalid camera configuration\0",
        GLINT_ERR_BUFFER_SIZE => b"buffer size mismatch\0",
        GLINT_ERR_CANCELLED => b"render cancelled\0",
        GLINT_ERR_IO => b"i/o error\0",
        _ => b"unknown status\0",
    };
    message.as_ptr().cast()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);
    static LAST_SAMPLES: AtomicI32 = AtomicI32::new(0);

    unsafe extern "C" fn record_progress(samples: c_int, buffer: *const u8) {
        assert!(!buffer.is_null());
        CALLS.fetch_add(1, Ordering::SeqCst);
        LAST_SAMPLES.store(samples, Ordering::SeqCst);
    }

    fn small_config() -> GlintCameraConfig {
        GlintCameraConfig {
            image_width: 8,
            samples_per_pixel: 3,
            max_depth: 5,
            focus_dist: 1.0,
            ..GlintCameraConfig::default()
        }
    }

    #[test]
    fn test_render_through_handles() {
        let ground = glint_create_lambertian(0.5, 0.5, 0.5);
        let metal = glint_create_metal(0.7, 0.6, 0.5, 0.0);
        let glass = glint_create_dielectric(1.5);
        let scene = glint_create_scene();

        let center = GlintTriplet {
            x: 0.0,
            y: 0.0,
            z: -1.0,
        };
        unsafe {
            assert_eq!(glint_scene_add_sphere(scene, center, 0.5, glass), GLINT_OK);
            assert_eq!(glint_scene_add_sphere(scene, center, 0.4, metal), GLINT_OK);
            let below = GlintTriplet {
                x: 0.0,
                y: -100.5,
                z: -1.0,
            };
            assert_eq!(glint_scene_add_sphere(scene, below, 100.0, ground), GLINT_OK);

            // Scene keeps its own references
            glint_destroy_material(ground);
            glint_destroy_material(metal);
            glint_destroy_material(glass);
        }

        let config = small_config();
        let height = glint_image_height(config.aspect_ratio, config.image_width);
        assert_eq!(height, 8);
        let mut buffer = vec![0u8; (config.image_width * height * 4) as usize];

        let status = unsafe {
            glint_render_scene(
                config,
                scene,
                buffer.as_mut_ptr(),
                buffer.len(),
                42,
                Some(record_progress),
            )
        };

        assert_eq!(status, GLINT_OK);
        assert_eq!(CALLS.load(Ordering::SeqCst), 3);
        assert_eq!(LAST_SAMPLES.load(Ordering::SeqCst), 3);
        assert!(buffer.chunks_exact(4).all(|px| px[3] == 255));

        unsafe { glint_destroy_scene(scene) };
    }

    #[test]
    fn test_null_handles_are_reported() {
        let mut buffer = vec![0u8; 8 * 8 * 4];
        let status = unsafe {
            glint_render_scene(
                small_config(),
                ptr::null(),
                buffer.as_mut_ptr(),
                buffer.len(),
                0,
                None,
            )
        };
        assert_eq!(status, GLINT_ERR_NULL_POINTER);

        let material = glint_create_lambertian(1.0, 1.0, 1.0);
        let origin = GlintTriplet {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let status = unsafe { glint_scene_add_sphere(ptr::null_mut(), origin, 1.0, material) };
        assert_eq!(status, GLINT_ERR_NULL_POINTER);

        unsafe {
            glint_destroy_material(material);
            glint_destroy_material(ptr::null_mut());
            glint_destroy_scene(ptr::null_mut());
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        let material = glint_create_dielectric(1.5);
        let scene = glint_create_scene();
        let origin = GlintTriplet {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };

        let status = unsafe { glint_scene_add_sphere(scene, origin, -0.4, material) };
        assert_eq!(status, GLINT_ERR_INVALID_ARGUMENT);
        assert!(unsafe { &*scene }.scene.is_empty());

        unsafe {
            glint_destroy_scene(scene);
            glint_destroy_material(material);
        }
    }

    #[test]
    fn test_non_finite_material_arguments_rejected() {
        assert!(glint_create_lambertian(f64::NAN, 0.5, 0.5).is_null());
        assert!(glint_create_metal(0.5, f64::INFINITY, 0.5, 0.0).is_null());
        assert!(glint_create_metal(0.5, 0.5, 0.5, f64::NAN).is_null());
        assert!(glint_create_dielectric(f64::NAN).is_null());
        assert!(glint_create_dielectric(0.0).is_null());

        // Out-of-range fuzz is clamped, not rejected
        let rough = glint_create_metal(0.5, 0.5, 0.5, 4.0);
        assert!(!rough.is_null());
        assert_eq!(
            *unsafe { &*rough }.material,
            Material::reflective(Color::new(0.5, 0.5, 0.5), 1.0)
        );
        unsafe { glint_destroy_material(rough) };
    }

    #[test]
    fn test_non_finite_camera_rejected() {
        let scene = glint_create_scene();
        let config = GlintCameraConfig {
            lookfrom: GlintTriplet {
                x: f64::NAN,
                y: 0.0,
                z: 0.0,
            },
            ..small_config()
        };
        let mut buffer = vec![9u8; 8 * 8 * 4];

        let status = unsafe {
            glint_render_scene(config, scene, buffer.as_mut_ptr(), buffer.len(), 0, None)
        };
        assert_eq!(status, GLINT_ERR_INVALID_CONFIG);
        assert!(buffer.iter().all(|&b| b == 9));

        unsafe { glint_destroy_scene(scene) };
    }

    #[test]
    fn test_config_conversion() {
        let negative = GlintCameraConfig {
            samples_per_pixel: -1,
            ..GlintCameraConfig::default()
        };
        assert!(matches!(
            CameraConfig::try_from(negative),
            Err(FfiError::InvalidArgument {
                name: "samples_per_pixel",
                ..
            })
        ));

        let converted = CameraConfig::try_from(GlintCameraConfig::default()).unwrap();
        assert_eq!(converted, CameraConfig::default());
    }

    #[test]
    fn test_render_rejects_wrong_buffer_and_config() {
        let scene = glint_create_scene();
        let mut buffer = vec![0u8; 10];

        let status = unsafe {
            glint_render_scene(small_config(), scene, buffer.as_mut_ptr(), buffer.len(), 0, None)
        };
        assert_eq!(status, GLINT_ERR_BUFFER_SIZE);

        let zero_width = GlintCameraConfig {
            image_width: 0,
            ..small_config()
        };
        let status = unsafe {
            glint_render_scene(zero_width, scene, buffer.as_mut_ptr(), buffer.len(), 0, None)
        };
        assert_eq!(status, GLINT_ERR_INVALID_CONFIG);

        unsafe { glint_destroy_scene(scene) };
    }

    #[test]
    fn test_image_height_matches_renderer() {
        assert_eq!(glint_image_height(16.0 / 9.0, 400), 225);
        assert_eq!(glint_image_height(4.0, 2), 1);
        assert_eq!(glint_image_height(0.0, 100), GLINT_ERR_INVALID_CONFIG);
        assert_eq!(glint_image_height(1.0, -5), GLINT_ERR_INVALID_CONFIG);
    }

    #[test]
    fn test_save_png_through_c_abi() {
        let buffer = vec![200u8; 2 * 2 * 4];
        let path = std::env::temp_dir().join(format!("glint_capi_{}.png", std::process::id()));
        let c_path = CString::new(path.to_str().unwrap()).unwrap();

        let status = unsafe { glint_save_png(2, 2, buffer.as_ptr(), c_path.as_ptr()) };
        assert_eq!(status, GLINT_OK);
        assert!(path.exists());
        std::fs::remove_file(&path).ok();

        let status = unsafe { glint_save_png(2, 2, buffer.as_ptr(), ptr::null()) };
        assert_eq!(status, GLINT_ERR_NULL_POINTER);
    }

    #[test]
    fn test_status_messages() {
        let message = unsafe { CStr::from_ptr(glint_status_message(GLINT_ERR_BUFFER_SIZE)) };
        assert_eq!(message.to_str().unwrap(), "buffer size mismatch");
        let unknown = unsafe { CStr::from_ptr(glint_status_message(-99)) };
        assert_eq!(unknown.to_str().unwrap(), "unknown status");
    }
}
