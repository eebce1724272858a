//! Sphere primitive, optionally moving over the shutter interval.

use crate::sampling::random_to_sphere;
use crate::{HitRecord, Hittable, Material};
use lux_math::{Aabb, Axis, Interval, Onb, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// A sphere primitive.
///
/// The center follows `center.at(time)`, so a stationary sphere is simply
/// one whose motion vector is zero. A negative radius is kept as given,
/// which flips the outward normal (used for hollow glass).
pub struct Sphere<M: Material> {
    center: Ray,
    radius: f32,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Sphere<M> {
    /// Create a stationary sphere.
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        Self::build(Ray::new(center, Vec3::ZERO, 0.0), radius, material)
    }

    /// Create a sphere that moves linearly from `center1` at time 0 to
    /// `center2` at time 1.
    pub fn moving(center1: Vec3, center2: Vec3, radius: f32, material: M) -> Self {
        Self::build(Ray::new(center1, center2 - center1, 0.0), radius, material)
    }

    fn build(center: Ray, radius: f32, material: M) -> Self {
        let mut sphere = Self {
            center,
            radius,
            material,
            bbox: Aabb::EMPTY,
        };
        sphere.update_bbox();
        sphere
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Center at the given ray time.
    pub fn center_at(&self, time: f32) -> Vec3 {
        self.center.at(time)
    }

    pub fn is_moving(&self) -> bool {
        self.center.direction() != Vec3::ZERO
    }

    fn update_bbox(&mut self) {
        let rvec = Vec3::splat(self.radius.abs());
        let c1 = self.center.at(0.0);
        let c2 = self.center.at(1.0);
        self.bbox = Aabb::surrounding(
            &Aabb::from_points(c1 - rvec, c1 + rvec),
            &Aabb::from_points(c2 - rvec, c2 + rvec),
        );
    }

    /// Nearest root of the ray/sphere quadratic strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let current_center = self.center.at(ray.time());
        let oc = current_center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        [(h - sqrtd) / a, (h + sqrtd) / a]
            .into_iter()
            .find(|&root| ray_t.surrounds(root))
    }

    /// Map a point on the unit sphere to `(u, v)` in `[0, 1]`.
    ///
    /// `u` is the angle around Y measured from -X, `v` the angle from -Y
    /// up to +Y.
    fn sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl<M: Material + 'static> Hittable for Sphere<M> {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let Some(root) = self.intersect(ray, ray_t) else {
            return false;
        };

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center.at(ray.time())) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::sphere_uv(outward_normal);
        rec.material = &self.material;

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    // Light sampling works on the sphere's position at time 0.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let toward = Ray::new(origin, direction, 0.0);
        if self.intersect(&toward, Interval::new(0.001, f32::INFINITY)).is_none() {
            return 0.0;
        }

        let distance_squared = (self.center.at(0.0) - origin).length_squared();
        let cos_theta_max = (1.0 - self.radius * self.radius / distance_squared)
            .max(0.0)
            .sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);

        1.0 / solid_angle
    }

    fn random_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let direction = self.center.at(0.0) - origin;
        let distance_squared = direction.length_squared();
        let uvw = Onb::from_w(direction);
        uvw.local(random_to_sphere(rng, self.radius, distance_squared))
    }

    fn rotate(&mut self, degrees: f32, axis: Axis) {
        let rotation = axis.rotation(degrees);
        self.center = Ray::new(
            rotation * self.center.origin(),
            rotation * self.center.direction(),
            0.0,
        );
        self.update_bbox();
    }

    fn translate(&mut self, offset: Vec3) {
        self.center = Ray::new(self.center.origin() + offset, self.center.direction(), 0.0);
        self.update_bbox();
    }
}
