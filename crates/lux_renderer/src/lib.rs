//! Lux - CPU Monte Carlo path tracer.
//!
//! Spheres, quads and constant-density media over a BVH, lit through
//! mixed light and cosine importance sampling, rendered in buckets and
//! written out as PPM.

mod bucket;
mod bvh;
mod camera;
mod config;
mod constant_medium;
mod error;
mod hittable;
mod material;
mod pdf;
mod ppm;
mod quad;
mod renderer;
mod sphere;
mod texture;

pub mod sampling;

pub use bucket::{
    generate_buckets, render, render_bucket, Bucket, BucketResult, RenderConfig,
    DEFAULT_BUCKET_SIZE,
};
pub use bvh::{BvhNode, BvhStats};
pub use camera::{Camera, CameraConfig};
pub use config::{load_config, CameraOverrides, SceneConfig};
pub use constant_medium::ConstantMedium;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, Scene};
pub use material::{
    reflect, refract, Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal,
    ScatterResult,
};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf, SpherePdf};
pub use ppm::write_ppm;
pub use quad::{make_box, Quad};
pub use renderer::{color_to_rgb, linear_to_gamma, ray_color, render_pixel, ImageBuffer};
pub use sphere::Sphere;
pub use texture::{
    random_color, CheckerTexture, ImageData, ImageTexture, NoiseTexture, Perlin, SolidColor,
    Texture, MISSING_IMAGE_COLOR,
};

/// Re-export the math types used throughout the public API
pub use lux_math::{Aabb, Axis, Interval, Onb, Ray, Vec3};
