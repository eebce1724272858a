//! Camera for ray generation.

use crate::sampling::{gen_f32, random_in_unit_disk};
use crate::Color;
use lux_math::{degrees_to_radians, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// User-facing camera and image settings.
///
/// Missing fields fall back to [`CameraConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    /// Ratio of image width over height
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f32,

    /// Radiance returned by rays that escape the scene
    pub background: Color,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            vfov: 90.0,
            look_from: Vec3::new(0.0, 0.0, -1.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Color::ZERO,
        }
    }
}

/// Camera for generating rays into the scene.
///
/// Call [`Camera::initialize`] after changing settings and before
/// generating rays.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,

    // Cached computed values (set by initialize())
    image_height: u32,
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Create a camera with default settings, already initialized.
    pub fn new() -> Self {
        Self::from_config(CameraConfig::default())
    }

    /// Create an initialized camera from settings.
    pub fn from_config(config: CameraConfig) -> Self {
        let mut camera = Self {
            config,
            image_height: 1,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
            samples_scale: 1.0,
        };
        camera.initialize();
        camera
    }

    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.config.image_width = image_width;
        self.config.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.config.samples_per_pixel = samples_per_pixel;
        self.config.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.config.look_from = look_from;
        self.config.look_at = look_at;
        self.config.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.config.vfov = vfov;
        self.config.defocus_angle = defocus_angle;
        self.config.focus_dist = focus_dist;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    /// Recompute the viewport and lens from the current settings.
    pub fn initialize(&mut self) {
        let cfg = &self.config;

        self.image_height = ((cfg.image_width as f32 / cfg.aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / cfg.samples_per_pixel.max(1) as f32;
        self.center = cfg.look_from;

        // Calculate viewport dimensions from the true pixel aspect
        let h = (degrees_to_radians(cfg.vfov) / 2.0).tan();
        let viewport_height = 2.0 * h * cfg.focus_dist;
        let viewport_width =
            viewport_height * (cfg.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (cfg.look_from - cfg.look_at).normalize();
        self.u = cfg.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / cfg.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - cfg.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = cfg.focus_dist * degrees_to_radians(cfg.defocus_angle / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::trace!(
            "Camera initialized: {}x{}, {} spp, depth {}",
            cfg.image_width,
            self.image_height,
            cfg.samples_per_pixel,
            cfg.max_depth
        );
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f32(rng);

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    pub fn background(&self) -> Color {
        self.config.background
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}
