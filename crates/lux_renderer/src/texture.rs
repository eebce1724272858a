//! Textures: spatially varying colors looked up at a hit.
//!
//! The renderer depends only on [`Texture::value`]. Image textures decode
//! their file once at construction and degrade to a cyan debug color when
//! the file cannot be read.

use crate::error::{RenderError, RenderResult};
use crate::sampling::{gen_f32, gen_index, random_unit_vector};
use crate::Color;
use lux_math::{Interval, Vec3};
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;

/// Color returned by image textures whose file failed to load.
pub const MISSING_IMAGE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// A color lookup at surface coordinates `(u, v)` and world point `p`.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// Uniform color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// 3D checkerboard: alternates two textures by the parity of the
/// integer cell containing the hit point.
#[derive(Clone)]
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(scale, Arc::new(SolidColor::new(even)), Arc::new(SolidColor::new(odd)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let cell = (p * self.inv_scale).floor();
        let sum = cell.x as i64 + cell.y as i64 + cell.z as i64;

        if sum.rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Decoded 8-bit RGB image, row-major, three bytes per pixel.
///
/// A zero-size image stands for "nothing could be loaded".
#[derive(Debug, Clone, Default)]
pub struct ImageData {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl ImageData {
    /// Decode an image file into RGB8.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| RenderError::ImageDecode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let (width, height) = decoded.dimensions();
        Ok(Self {
            width,
            height,
            bytes: decoded.into_raw(),
        })
    }

    /// Wrap raw RGB8 bytes. Returns an empty image when the length does not
    /// match `width * height * 3`.
    pub fn from_rgb8(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        if bytes.len() != (width as usize) * (height as usize) * 3 {
            log::warn!(
                "Discarding {}x{} image with {} bytes of pixel data",
                width,
                height,
                bytes.len()
            );
            return Self::default();
        }
        Self { width, height, bytes }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGB bytes at pixel `(x, y)`, clamped to the image. `None` when empty.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if self.is_empty() {
            return None;
        }
        let x = x.min(self.width.saturating_sub(1)) as usize;
        let y = y.min(self.height.saturating_sub(1)) as usize;
        let i = (y * self.width as usize + x) * 3;
        Some([self.bytes[i], self.bytes[i + 1], self.bytes[i + 2]])
    }
}

/// Texture backed by a decoded image, addressed by `(u, v)`.
#[derive(Debug, Clone)]
pub struct ImageTexture {
    image: ImageData,
}

impl ImageTexture {
    /// Load `path`. On failure the texture renders as [`MISSING_IMAGE_COLOR`].
    pub fn open(path: impl AsRef<Path>) -> Self {
        let image = ImageData::load(path.as_ref()).unwrap_or_else(|e| {
            log::warn!("{}; using debug color instead", e);
            ImageData::default()
        });
        Self { image }
    }

    pub fn from_image(image: ImageData) -> Self {
        Self { image }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom, v runs bottom to top.
        let v = 1.0 - unit.clamp(v);

        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;
        let Some([r, g, b]) = self.image.pixel(i, j) else {
            return MISSING_IMAGE_COLOR;
        };

        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}

const PERLIN_POINT_COUNT: usize = 256;

/// Gradient noise with random unit vectors on the lattice.
#[derive(Debug, Clone)]
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..PERLIN_POINT_COUNT)
            .map(|_| random_unit_vector(rng))
            .collect();
        Self {
            gradients,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
        }
    }

    fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut p: Vec<usize> = (0..PERLIN_POINT_COUNT).collect();
        for i in (1..PERLIN_POINT_COUNT).rev() {
            let target = gen_index(rng, i + 1);
            p.swap(i, target);
        }
        p
    }

    /// Smooth noise in roughly `[-1, 1]`.
    pub fn noise(&self, p: Vec3) -> f32 {
        let f = p - p.floor();
        let base = p.floor();
        let (i, j, k) = (base.x as i64, base.y as i64, base.z as i64);

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let index = self.perm_x[Self::wrap(i + di as i64)]
                        ^ self.perm_y[Self::wrap(j + dj as i64)]
                        ^ self.perm_z[Self::wrap(k + dk as i64)];
                    *corner = self.gradients[index];
                }
            }
        }

        Self::trilinear(&c, f)
    }

    /// Sum of `depth` octaves of absolute noise.
    pub fn turbulence(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp);
            weight *= 0.5;
            temp *= 2.0;
        }

        accum.abs()
    }

    fn wrap(n: i64) -> usize {
        n.rem_euclid(PERLIN_POINT_COUNT as i64) as usize
    }

    fn trilinear(c: &[[[Vec3; 2]; 2]; 2], f: Vec3) -> f32 {
        // Hermite smoothing removes grid artifacts.
        let smooth = f * f * (Vec3::splat(3.0) - 2.0 * f);
        let mut accum = 0.0;

        for (i, plane) in c.iter().enumerate() {
            for (j, row) in plane.iter().enumerate() {
                for (k, gradient) in row.iter().enumerate() {
                    let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                    let weight = Vec3::new(f.x - fi, f.y - fj, f.z - fk);
                    accum += (fi * smooth.x + (1.0 - fi) * (1.0 - smooth.x))
                        * (fj * smooth.y + (1.0 - fj) * (1.0 - smooth.y))
                        * (fk * smooth.z + (1.0 - fk) * (1.0 - smooth.z))
                        * gradient.dot(weight);
                }
            }
        }

        accum
    }
}

/// Marble-like procedural texture driven by Perlin turbulence.
#[derive(Debug, Clone)]
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let s = self.scale * p;
        Color::ONE * 0.5 * (1.0 + (s.z + 10.0 * self.noise.turbulence(s, 7)).sin())
    }
}

/// Random color with each channel uniform in `[min, max)`.
pub fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    let mut channel = || min + (max - min) * gen_f32(rng);
    Color::new(channel(), channel(), channel())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solid_color() {
        let tex = SolidColor::rgb(0.1, 0.2, 0.3);
        assert_eq!(tex.value(0.7, 0.2, Vec3::splat(9.0)), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_checker_alternates_by_cell_parity() {
        let even = Color::ONE;
        let odd = Color::ZERO;
        let tex = CheckerTexture::from_colors(1.0, even, odd);

        assert_eq!(tex.value(0.0, 0.0, Vec3::new(0.5, 0.5, 0.5)), even);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(1.5, 0.5, 0.5)), odd);
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(1.5, 1.5, 0.5)), even);
        // Negative cells keep alternating across zero.
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(-0.5, 0.5, 0.5)), odd);
    }

    #[test]
    fn test_missing_image_is_cyan() {
        let tex = ImageTexture::open("definitely/not/here.png");
        assert_eq!(tex.value(0.5, 0.5, Vec3::ZERO), MISSING_IMAGE_COLOR);
    }

    #[test]
    fn test_mismatched_bytes_give_empty_image() {
        let image = ImageData::from_rgb8(2, 2, vec![0; 5]);
        assert!(image.is_empty());
        assert_eq!(ImageTexture::from_image(image).value(0.0, 0.0, Vec3::ZERO), MISSING_IMAGE_COLOR);
    }

    #[test]
    fn test_pixel_lookup_on_empty_image() {
        assert_eq!(ImageData::default().pixel(0, 0), None);
        assert_eq!(ImageData::from_rgb8(0, 3, vec![]).pixel(1, 1), None);

        let image = ImageData::from_rgb8(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(image.pixel(1, 0), Some([4, 5, 6]));
        assert_eq!(image.pixel(9, 9), Some([4, 5, 6]));
    }

    #[test]
    fn test_image_lookup_flips_v() {
        // 1x2 image: top row red, bottom row blue.
        let image = ImageData::from_rgb8(1, 2, vec![255, 0, 0, 0, 0, 255]);
        let tex = ImageTexture::from_image(image);

        assert_eq!(tex.value(0.5, 0.9, Vec3::ZERO), Color::new(1.0, 0.0, 0.0));
        assert_eq!(tex.value(0.5, 0.1, Vec3::ZERO), Color::new(0.0, 0.0, 1.0));
        // Out of range coordinates clamp onto the image.
        assert_eq!(tex.value(-3.0, 7.0, Vec3::ZERO), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_noise_texture_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let tex = NoiseTexture::new(4.0, &mut rng);
        for i in 0..200 {
            let p = Vec3::new(i as f32 * 0.37, i as f32 * -0.11, i as f32 * 0.05);
            let c = tex.value(0.0, 0.0, p);
            assert!(c.x >= 0.0 && c.x <= 1.0, "{c:?}");
            assert_eq!(c.x, c.y);
        }
    }

    #[test]
    fn test_perlin_is_deterministic_per_seed() {
        let a = Perlin::new(&mut StdRng::seed_from_u64(10));
        let b = Perlin::new(&mut StdRng::seed_from_u64(10));
        let p = Vec3::new(1.3, -2.7, 0.4);
        assert_eq!(a.noise(p), b.noise(p));
    }
}
