//! Homogeneous participating medium (smoke, fog) inside a closed boundary.

use crate::sampling::gen_f32;
use crate::texture::Texture;
use crate::{Color, HitRecord, Hittable, Isotropic};
use lux_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Volume of constant density bounded by a convex hittable.
///
/// A ray entering the boundary travels an exponentially distributed free
/// path before scattering isotropically. Rays that exit first pass through.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Isotropic,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::with_phase(boundary, density, Isotropic::new(albedo))
    }

    pub fn from_texture(boundary: Arc<dyn Hittable>, density: f32, texture: Arc<dyn Texture>) -> Self {
        Self::with_phase(boundary, density, Isotropic::from_texture(texture))
    }

    fn with_phase(boundary: Arc<dyn Hittable>, density: f32, phase_function: Isotropic) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        // Find where the ray enters and leaves the boundary along the whole line.
        let mut entry = HitRecord::default();
        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut entry, rng) {
            return false;
        }
        let mut exit = HitRecord::default();
        if !self
            .boundary
            .hit(ray, Interval::new(entry.t + 0.0001, f32::INFINITY), &mut exit, rng)
        {
            return false;
        }

        let t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return false;
        }
        let t_enter = t_enter.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        // 1 - U lies in (0, 1], keeping the log finite.
        let hit_distance = self.neg_inv_density * (1.0 - gen_f32(rng)).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        // Arbitrary; the phase function ignores it.
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.material = &self.phase_function;

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
