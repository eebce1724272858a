// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod aabb;
mod axis;
mod interval;
mod onb;
mod ray;

pub use aabb::{Aabb, PAD_DELTA};
pub use axis::Axis;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;

/// Convert degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
