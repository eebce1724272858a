//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Light and cosine importance sampling mixed 50/50
//! - Gamma correction and 8-bit quantization

use crate::pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
use crate::{Camera, Color, HitRecord, Hittable, Scene};
use lux_math::{Interval, Ray};
use rand::RngCore;

/// Closest distance a bounce may travel; avoids self-intersection acne.
const T_MIN: f32 = 0.001;

/// Compute the radiance carried back along `ray`.
///
/// `lights` is the list of objects to importance sample. With no lights the
/// material's own sampling is used.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    lights: &Scene,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(ray, Interval::new(T_MIN, f32::INFINITY), &mut rec, rng) {
        return background;
    }

    let emitted = rec.material.emitted(ray, &rec, rec.u, rec.v, rec.p);

    let Some(scatter) = rec.material.scatter(ray, &rec, rng) else {
        return emitted;
    };

    // Mirror and glass have no density to mix with.
    if scatter.is_specular() {
        return emitted
            + scatter.attenuation
                * ray_color(&scatter.scattered, world, lights, depth - 1, background, rng);
    }

    let (bounce, pdf) = if lights.is_empty() {
        (scatter.scattered, scatter.pdf)
    } else {
        let light_pdf = HittablePdf::new(lights, rec.p);
        let surface_pdf = CosinePdf::new(rec.normal);
        let mixture = MixturePdf::new(&light_pdf, &surface_pdf);

        let bounce = Ray::new(rec.p, mixture.generate(rng), ray.time());
        let pdf = mixture.value(bounce.direction());
        (bounce, pdf)
    };

    if pdf <= 0.0 {
        return emitted;
    }

    let scattering_pdf = rec.material.scattering_pdf(ray, &rec, &bounce);
    let incoming = ray_color(&bounce, world, lights, depth - 1, background, rng);

    emitted + scatter.attenuation * scattering_pdf * incoming / pdf
}

/// Estimate pixel `(x, y)` by averaging the camera's samples.
///
/// Samples with NaN or infinite components count as black.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    lights: &Scene,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        let sample = ray_color(&ray, world, lights, camera.max_depth(), camera.background(), rng);
        if sample.is_finite() {
            pixel_color += sample;
        }
    }

    pixel_color * camera.samples_scale()
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-encoded 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let encode = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Row-major image of linear colors, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-encoded RGB bytes, three per pixel.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }

    /// Convert to an `image` buffer for saving in other formats.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb())
    }
}
