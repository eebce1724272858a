//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket draws from its
//! own generator seeded from the render seed and the bucket origin, so an
//! image depends only on its inputs, not on thread scheduling.

use crate::renderer::{render_pixel, ImageBuffer};
use crate::{Camera, Color, Hittable, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Render-wide settings that are not part of the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Seed for every bucket's random stream
    pub seed: u64,
    /// Edge length of a bucket in pixels
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Seed for this bucket's generator. Depends on position, not on order.
    pub fn seed(&self, render_seed: u64) -> u64 {
        let position = ((self.x as u64) << 32) | self.y as u64;
        render_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ position
    }
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets closer to the center come first, so the most important part of
/// the frame finishes early.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order among equidistant buckets.
    buckets.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    lights: &Scene,
    seed: u64,
) -> BucketResult {
    let mut rng = StdRng::seed_from_u64(bucket.seed(seed));
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                world,
                lights,
                bucket.x + local_x,
                bucket.y + local_y,
                &mut rng,
            );
            pixels.push(color);
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}

/// Render the whole frame seen by `camera`.
///
/// The parallel and sequential paths produce identical images for the
/// same seed.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    lights: &Scene,
    config: &RenderConfig,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, config.bucket_size);
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} at {} spp in {} buckets ({})",
        width,
        height,
        camera.samples_per_pixel(),
        total,
        if config.parallel { "parallel" } else { "sequential" }
    );
    let start = Instant::now();
    let done = AtomicUsize::new(0);

    let render_one = |bucket: &Bucket| {
        let result = render_bucket(bucket, camera, world, lights, config.seed);
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("Bucket {}/{} done", finished, total);
        result
    };

    let results: Vec<BucketResult> = if config.parallel {
        buckets.par_iter().map(render_one).collect()
    } else {
        buckets.iter().map(render_one).collect()
    };

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
