//! Hittable trait, HitRecord, and the Scene aggregate.

use crate::sampling::gen_index;
use crate::{Material, ScatterResult};
use lux_math::{Aabb, Axis, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// A dummy material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
///
/// Written only when a hit inside the probed interval is found, so during a
/// traversal it always describes the closest hit seen so far.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material governing the surface at the intersection point
    pub material: &'a dyn Material,
    /// Surface coordinates
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// `outward_normal` must be unit length. The stored normal always points
    /// against the ray; `front_face` remembers which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Beyond the intersection test, an object may act as a light for importance
/// sampling (`pdf_value`/`random_direction`) and may be moved rigidly before
/// any acceleration structure is built over it.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Solid-angle density of sampling `direction` from `origin` toward this object.
    fn pdf_value(&self, _origin: Vec3, _direction: Vec3) -> f32 {
        0.0
    }

    /// Direction from `origin` toward a random point on this object.
    fn random_direction(&self, _origin: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::X
    }

    /// Rotate by `degrees` about a world axis through the origin.
    fn rotate(&mut self, _degrees: f32, _axis: Axis) {}

    /// Move by `offset`.
    fn translate(&mut self, _offset: Vec3) {}
}

/// Ordered collection of hittables; itself hittable.
///
/// Members are reference counted so a [`crate::BvhNode`] built over the scene
/// shares them instead of copying. When used as a light list, the scene is
/// a uniform mixture of its members.
#[derive(Clone, Default)]
pub struct Scene {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a shared object. The bounding box grows incrementally.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Add an object the scene will own.
    pub fn push<H: Hittable + 'static>(&mut self, object: H) {
        self.add(Arc::new(object));
    }

    /// Clear all objects from the scene.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn recompute_bbox(&mut self) {
        self.bbox = self
            .objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));
    }

    /// Apply `f` to every member this scene still owns exclusively.
    fn for_each_owned(&mut self, what: &str, mut f: impl FnMut(&mut dyn Hittable)) {
        let mut skipped = 0;
        for object in &mut self.objects {
            match Arc::get_mut(object) {
                Some(object) => f(object),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!(
                "Skipped {} of {} while applying {}: objects are already shared",
                skipped,
                self.objects.len(),
                what
            );
        }
        self.recompute_bbox();
    }
}

impl FromIterator<Arc<dyn Hittable>> for Scene {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Hittable>>>(iter: I) -> Self {
        let mut scene = Scene::new();
        for object in iter {
            scene.add(object);
        }
        scene
    }
}

impl Hittable for Scene {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, rec, rng) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }
        let weight = 1.0 / self.objects.len() as f32;
        self.objects
            .iter()
            .map(|o| weight * o.pdf_value(origin, direction))
            .sum()
    }

    fn random_direction(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }
        let index = gen_index(rng, self.objects.len());
        self.objects[index].random_direction(origin, rng)
    }

    fn rotate(&mut self, degrees: f32, axis: Axis) {
        self.for_each_owned("rotation", |o| o.rotate(degrees, axis));
    }

    fn translate(&mut self, offset: Vec3) {
        self.for_each_owned("translation", |o| o.translate(offset));
    }
}
