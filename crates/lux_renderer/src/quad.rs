//! Planar parallelogram primitive and the box built from six of them.

use crate::sampling::gen_f32;
use crate::{HitRecord, Hittable, Material, Scene};
use lux_math::{Aabb, Axis, Interval, Ray, Vec3};
use rand::RngCore;

/// Parallelogram `q + a*u + b*v` for `a, b` in `[0, 1]`.
///
/// Quads double as area lights: [`Hittable::pdf_value`] and
/// [`Hittable::random_direction`] sample the surface uniformly.
pub struct Quad<M: Material> {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    material: M,
    // Derived from q, u, v
    w: Vec3,
    normal: Vec3,
    d: f32,
    area: f32,
    bbox: Aabb,
}

/// Plane hit: distance along the ray and planar coordinates of the point.
struct PlaneHit {
    t: f32,
    alpha: f32,
    beta: f32,
}

impl<M: Material> Quad<M> {
    /// Create a quad with corner `q` and edge vectors `u` and `v`.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: M) -> Self {
        let mut quad = Self {
            q,
            u,
            v,
            material,
            w: Vec3::ZERO,
            normal: Vec3::ZERO,
            d: 0.0,
            area: 0.0,
            bbox: Aabb::EMPTY,
        };
        quad.update_derived();
        quad
    }

    pub fn corner(&self) -> Vec3 {
        self.q
    }

    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.u, self.v)
    }

    pub fn area(&self) -> f32 {
        self.area
    }

    fn update_derived(&mut self) {
        let n = self.u.cross(self.v);
        self.normal = n.normalize_or_zero();
        self.d = self.normal.dot(self.q);
        self.w = n / n.dot(n);
        self.area = n.length();
        // Both diagonals: after a rotation u and v can point opposite ways on an axis.
        let diagonal0 = Aabb::from_points(self.q, self.q + self.u + self.v);
        let diagonal1 = Aabb::from_points(self.q + self.u, self.q + self.v);
        self.bbox = Aabb::surrounding(&diagonal0, &diagonal1);
    }

    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<PlaneHit> {
        let denom = self.normal.dot(ray.direction());

        // Parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let planar_hitpt = ray.at(t) - self.q;
        let alpha = self.w.dot(planar_hitpt.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt));

        let unit = Interval::new(0.0, 1.0);
        if !unit.contains(alpha) || !unit.contains(beta) {
            return None;
        }

        Some(PlaneHit { t, alpha, beta })
    }
}

impl<M: Material + 'static> Hittable for Quad<M> {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let Some(PlaneHit { t, alpha, beta }) = self.intersect(ray, ray_t) else {
            return false;
        };

        rec.t = t;
        rec.p = ray.at(t);
        rec.u = alpha;
        rec.v = beta;
        rec.material = &self.material;
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let toward = Ray::new(origin, direction, 0.0);
        let Some(hit) = self.intersect(&toward, Interval::new(0.001, f32::INFINITY)) else {
            return 0.0;
        };

        let length_squared = direction.length_squared();
        let distance_squared = hit.t * hit.t * length_squared;
        let cosine = (direction.dot(self.normal) / length_squared.sqrt()).abs();

        distance_squared / (cosine * self.area)
    }

    fn random_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let p = self.q + gen_f32(rng) * self.u + gen_f32(rng) * self.v;
        p - origin
    }

    fn rotate(&mut self, degrees: f32, axis: Axis) {
        let rotation = axis.rotation(degrees);
        self.q = rotation * self.q;
        self.u = rotation * self.u;
        self.v = rotation * self.v;
        self.update_derived();
    }

    fn translate(&mut self, offset: Vec3) {
        self.q += offset;
        self.update_derived();
    }
}

/// Six quads enclosing the axis-aligned box with opposite corners `a` and `b`.
///
/// Faces point outward. The returned scene owns its quads, so it can still be
/// rotated or translated as a unit before it is shared.
pub fn make_box<M>(a: Vec3, b: Vec3, material: M) -> Scene
where
    M: Material + Clone + 'static,
{
    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    let mut sides = Scene::new();
    for (q, u, v) in faces {
        sides.push(Quad::new(q, u, v, material.clone()));
    }
    sides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Lambertian {
        Lambertian::new(Vec3::splat(0.5))
    }

    fn ceiling_light() -> Quad<Lambertian> {
        Quad::new(
            Vec3::new(-1.0, 5.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            grey(),
        )
    }

    fn first_hit(object: &dyn Hittable, ray: &Ray) -> Option<(f32, f32, f32, bool)> {
        let mut rng = StdRng::seed_from_u64(0);
        let mut rec = HitRecord::default();
        object
            .hit(ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng)
            .then(|| (rec.t, rec.u, rec.v, rec.front_face))
    }

    #[test]
    fn test_quad_hit_reports_planar_coordinates() {
        let quad = ceiling_light();
        let ray = Ray::new(Vec3::new(0.5, 0.0, -0.5), Vec3::Y, 0.0);

        let (t, u, v, _) = first_hit(&quad, &ray).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        assert!((u - 0.75).abs() < 1e-5);
        assert!((v - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_quad_misses_outside_and_parallel() {
        let quad = ceiling_light();
        assert!(first_hit(&quad, &Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Y, 0.0)).is_none());
        assert!(first_hit(&quad, &Ray::new(Vec3::new(0.0, 5.0, -3.0), Vec3::Z, 0.0)).is_none());
        assert!(first_hit(&quad, &Ray::new(Vec3::ZERO, -Vec3::Y, 0.0)).is_none());
    }

    #[test]
    fn test_quad_bbox_is_padded() {
        let bbox = ceiling_light().bounding_box();
        assert_eq!(bbox.x, Interval::new(-1.0, 1.0));
        assert!(bbox.y.size() > 0.0);
        assert!(bbox.y.contains(5.0));
    }

    #[test]
    fn test_quad_pdf_value() {
        let quad = ceiling_light();
        // distance 5, cosine 1, area 4
        assert!((quad.pdf_value(Vec3::ZERO, Vec3::Y) - 25.0 / 4.0).abs() < 1e-4);
        // Scale of the direction does not matter.
        assert!((quad.pdf_value(Vec3::ZERO, Vec3::Y * 3.0) - 25.0 / 4.0).abs() < 1e-4);
        assert_eq!(quad.pdf_value(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_quad_random_direction_hits_quad() {
        let mut rng = StdRng::seed_from_u64(4);
        let quad = ceiling_light();
        let origin = Vec3::new(0.3, 1.0, 0.2);
        for _ in 0..100 {
            let d = quad.random_direction(origin, &mut rng);
            let p = origin + d;
            assert!((p.y - 5.0).abs() < 1e-5);
            assert!((-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.z));
        }
    }

    #[test]
    fn test_quad_rotate_and_translate() {
        let mut quad = Quad::new(Vec3::ZERO, Vec3::X, Vec3::Y, grey());
        quad.rotate(90.0, Axis::Y);
        let (u, v) = quad.edges();
        assert!((u - (-Vec3::Z)).length() < 1e-5);
        assert!((v - Vec3::Y).length() < 1e-5);

        quad.translate(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(quad.corner(), Vec3::new(2.0, 0.0, 0.0));
        assert!((quad.area() - 1.0).abs() < 1e-5);
        assert!(quad.bounding_box().x.contains(2.0));
    }

    #[test]
    fn test_rotated_quad_bbox_contains_corners() {
        for axis in Axis::ALL {
            for degrees in [15.0, 45.0, 90.0, 135.0, 200.0, 330.0] {
                let mut quad = Quad::new(
                    Vec3::new(1.0, 2.0, 3.0),
                    Vec3::new(2.0, 0.0, 0.0),
                    Vec3::new(0.0, 0.0, -3.0),
                    grey(),
                );
                quad.rotate(degrees, axis);

                let q = quad.corner();
                let (u, v) = quad.edges();
                let bbox = quad.bounding_box();
                for p in [q, q + u, q + v, q + u + v] {
                    for a in Axis::ALL {
                        let i = bbox.axis_interval(a);
                        let c = p[a.index()];
                        assert!(
                            i.min <= c + 1e-5 && c - 1e-5 <= i.max,
                            "{axis:?} {degrees} corner {p:?} outside {bbox:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_make_box() {
        let sides = make_box(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, grey());
        assert_eq!(sides.len(), 6);

        // Faces are padded, so the union overshoots by at most half the pad.
        let bbox = sides.bounding_box();
        for axis in Axis::ALL {
            let i = bbox.axis_interval(axis);
            assert!(i.min <= 0.0 && i.min > -1e-3, "{axis:?} {i:?}");
            assert!(i.max >= 1.0 && i.max < 1.0 + 1e-3, "{axis:?} {i:?}");
        }

        // Entering through the front face (z = max) from outside.
        let ray = Ray::new(Vec3::new(0.5, 0.5, 5.0), -Vec3::Z, 0.0);
        let (t, _, _, front_face) = first_hit(&sides, &ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!(front_face);
    }
}
