//! Material trait for surface scattering.

use crate::sampling::{gen_f32, random_cosine_direction, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use crate::HitRecord;
use lux_math::{Onb, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;
use std::sync::Arc;

/// Color type alias (linear RGB, unbounded above for emitters)
pub type Color = Vec3;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Continuation ray
    pub scattered: Ray,
    /// Fraction of incoming light carried by the continuation (albedo)
    pub attenuation: Color,
    /// Density of `scattered` under the material's own sampling.
    /// Zero marks a specular (delta) lobe.
    pub pdf: f32,
}

impl ScatterResult {
    /// True for delta distributions (mirror, glass) that carry no density.
    #[inline]
    pub fn is_specular(&self) -> bool {
        self.pdf <= 0.0
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Light emitted at the hit. Black for everything but emitters.
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }

    /// The material's own density for scattering `ray_in` into `scattered`.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        0.0
    }
}

impl<M: Material + ?Sized> Material for Arc<M> {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        (**self).scatter(ray_in, rec, rng)
    }

    fn emitted(&self, ray_in: &Ray, rec: &HitRecord, u: f32, v: f32, p: Vec3) -> Color {
        (**self).emitted(ray_in, rec, u, v, p)
    }

    fn scattering_pdf(&self, ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f32 {
        (**self).scattering_pdf(ray_in, rec, scattered)
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with a uniform albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    /// Create a Lambertian material whose albedo is looked up in a texture.
    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let uvw = Onb::from_w(rec.normal);
        let direction = uvw.local(random_cosine_direction(rng));

        Some(ScatterResult {
            scattered: Ray::new(rec.p, direction, ray_in.time()),
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            pdf: uvw.w().dot(direction) / PI,
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f32 {
        let cos_theta = rec.normal.dot(scattered.direction().normalize());
        if cos_theta < 0.0 {
            0.0
        } else {
            cos_theta / PI
        }
    }
}

/// Metal (specular) material.
#[derive(Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz can push the reflection below the surface; absorb it.
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            scattered: Ray::new(rec.p, direction, ray_in.time()),
            attenuation: self.albedo,
            pdf: 0.0,
        })
    }
}

/// Dielectric (glass) material.
#[derive(Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterResult {
            scattered: Ray::new(rec.p, direction, ray_in.time()),
            attenuation: Color::ONE,
            pdf: 0.0,
        })
    }
}

/// Diffuse light emitter.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, _ray_in: &Ray, rec: &HitRecord, u: f32, v: f32, p: Vec3) -> Color {
        // One-sided: the back of a light is dark.
        if !rec.front_face {
            return Color::ZERO;
        }
        self.emit.value(u, v, p)
    }
}

/// Phase function of a participating medium: scatters uniformly over the sphere.
#[derive(Clone)]
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        Some(ScatterResult {
            scattered: Ray::new(rec.p, random_unit_vector(rng), ray_in.time()),
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            pdf: 1.0 / (4.0 * PI),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        1.0 / (4.0 * PI)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `etai_over_etat`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_facing_up<'a>(front_face: bool) -> HitRecord<'a> {
        HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            front_face,
            ..HitRecord::default()
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let out = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5);
        assert!((out - (-Vec3::Y)).length() < 1e-5);
    }

    #[test]
    fn test_lambertian_pdf_matches_scattering_pdf() {
        let mut rng = StdRng::seed_from_u64(42);
        let mat = Lambertian::new(Color::new(0.5, 0.4, 0.3));
        let rec = record_facing_up(true);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 0.3);

        for _ in 0..100 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("diffuse always scatters");
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(result.scattered.time(), 0.3);
            assert_eq!(result.attenuation, Color::new(0.5, 0.4, 0.3));
            let own = mat.scattering_pdf(&ray_in, &rec, &result.scattered);
            assert!((result.pdf - own).abs() < 1e-4);
            assert!(!result.is_specular());
        }
    }

    #[test]
    fn test_lambertian_scattering_pdf_zero_below_surface() {
        let mat = Lambertian::new(Color::ONE);
        let rec = record_facing_up(true);
        let ray_in = Ray::new(Vec3::Y, -Vec3::Y, 0.0);
        let below = Ray::new(Vec3::ZERO, -Vec3::Y, 0.0);

        assert_eq!(mat.scattering_pdf(&ray_in, &rec, &below), 0.0);
        let straight_up = Ray::new(Vec3::ZERO, Vec3::Y, 0.0);
        assert!((mat.scattering_pdf(&ray_in, &rec, &straight_up) - 1.0 / PI).abs() < 1e-6);
    }

    #[test]
    fn test_metal_mirror_reflection_is_specular() {
        let mut rng = StdRng::seed_from_u64(1);
        let mat = Metal::new(Color::new(0.8, 0.8, 0.8), 0.0);
        let rec = record_facing_up(true);
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);

        let result = mat.scatter(&ray_in, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert!(result.is_specular());
    }

    #[test]
    fn test_metal_absorbs_grazing_fuzz() {
        let mut rng = StdRng::seed_from_u64(3);
        let mat = Metal::new(Color::ONE, 1.0);
        let rec = record_facing_up(true);
        // Nearly grazing: with full fuzz many reflections dip below the surface.
        let ray_in = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0), 0.0);

        let absorbed = (0..200)
            .filter(|_| mat.scatter(&ray_in, &rec, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mut rng = StdRng::seed_from_u64(5);
        let mat = Dielectric::new(1.5);
        // Inside the glass (back face) at a steep grazing angle.
        let rec = record_facing_up(false);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.1, 0.0), 0.0);

        for _ in 0..50 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("glass always scatters");
            // Reflected back to the normal's side every time.
            assert!(result.scattered.direction().dot(rec.normal) > 0.0);
            assert_eq!(result.attenuation, Color::ONE);
            assert!(result.is_specular());
        }
    }

    #[test]
    fn test_diffuse_light_is_one_sided() {
        let mut rng = StdRng::seed_from_u64(0);
        let light = DiffuseLight::new(Color::splat(4.0));
        let ray_in = Ray::new(Vec3::Y, -Vec3::Y, 0.0);

        let front = record_facing_up(true);
        let back = record_facing_up(false);
        assert_eq!(light.emitted(&ray_in, &front, 0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
        assert_eq!(light.emitted(&ray_in, &back, 0.0, 0.0, Vec3::ZERO), Color::ZERO);
        assert!(light.scatter(&ray_in, &front, &mut rng).is_none());
    }

    #[test]
    fn test_isotropic_density() {
        let mut rng = StdRng::seed_from_u64(8);
        let mat = Isotropic::new(Color::splat(0.9));
        let rec = record_facing_up(true);
        let ray_in = Ray::new(Vec3::Y, -Vec3::Y, 0.0);

        let result = mat.scatter(&ray_in, &rec, &mut rng).expect("phase function scatters");
        assert!((result.pdf - 1.0 / (4.0 * PI)).abs() < 1e-7);
        assert_eq!(mat.scattering_pdf(&ray_in, &rec, &result.scattered), result.pdf);
        assert!((result.scattered.direction().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_shared_material_delegates() {
        let mut rng = StdRng::seed_from_u64(2);
        let shared: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::ONE));
        let rec = record_facing_up(true);
        let ray_in = Ray::new(Vec3::Y, -Vec3::Y, 0.0);

        assert_eq!(shared.emitted(&ray_in, &rec, 0.0, 0.0, Vec3::ZERO), Color::ONE);
        assert!(shared.scatter(&ray_in, &rec, &mut rng).is_none());
    }
}
