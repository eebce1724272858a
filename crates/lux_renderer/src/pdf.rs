//! Direction sampling strategies used for importance sampling.
//!
//! A [`Pdf`] both evaluates the solid-angle density of a direction and draws
//! directions from that same density. The integrator combines a light
//! sampler and a cosine sampler through [`MixturePdf`].

use crate::sampling::{gen_f32, random_cosine_direction, random_unit_vector};
use crate::Hittable;
use lux_math::{Onb, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// A probability density over directions, paired with its sampler.
pub trait Pdf {
    /// Density of `direction`. Never negative.
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction distributed according to [`Pdf::value`].
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Uniform density over the whole sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpherePdf;

impl Pdf for SpherePdf {
    fn value(&self, _direction: Vec3) -> f32 {
        1.0 / (4.0 * PI)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        random_unit_vector(rng)
    }
}

/// Cosine-weighted hemisphere about a normal; matches [`crate::Lambertian`].
#[derive(Debug, Clone, Copy)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(normal: Vec3) -> Self {
        Self {
            uvw: Onb::from_w(normal),
        }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cos_theta = self.uvw.w().dot(direction.normalize());
        (cos_theta / PI).max(0.0)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local(random_cosine_direction(rng))
    }
}

/// Samples directions from `origin` toward a hittable (usually a light list).
pub struct HittablePdf<'a> {
    objects: &'a dyn Hittable,
    origin: Vec3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(objects: &'a dyn Hittable, origin: Vec3) -> Self {
        Self { objects, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.objects.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.objects.random_direction(self.origin, rng)
    }
}

/// Equal-weight mixture of two densities.
///
/// The mixture density doubles as the balance-heuristic weight for the two
/// strategies, so no separate MIS weights are needed.
pub struct MixturePdf<'a> {
    p: [&'a dyn Pdf; 2],
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p: [p0, p1] }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        0.5 * self.p[0].value(direction) + 0.5 * self.p[1].value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if gen_f32(rng) < 0.5 {
            self.p[0].generate(rng)
        } else {
            self.p[1].generate(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Quad, Scene};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fraction_with_positive_density(pdf: &dyn Pdf, rng: &mut StdRng, n: usize) -> f32 {
        let hits = (0..n)
            .map(|_| {
                let d = pdf.generate(rng);
                if pdf.value(d) > 0.0 {
                    1.0
                } else {
                    0.0
                }
            })
            .sum::<f32>();
        hits / n as f32
    }

    #[test]
    fn test_cosine_pdf_integrates_to_one() {
        // Monte Carlo estimate of the integral of p over the sphere using
        // uniform sphere samples: mean of p(d) / (1 / 4pi).
        let mut rng = StdRng::seed_from_u64(17);
        for normal in [Vec3::Y, Vec3::new(1.0, -2.0, 0.5), -Vec3::Z] {
            let pdf = CosinePdf::new(normal);
            let n = 200_000;
            let integral = (0..n)
                .map(|_| pdf.value(random_unit_vector(&mut rng)) * 4.0 * PI)
                .sum::<f32>()
                / n as f32;
            assert!((integral - 1.0).abs() < 0.02, "integral {integral} for {normal:?}");
        }
    }

    #[test]
    fn test_cosine_pdf_samples_have_positive_density() {
        let mut rng = StdRng::seed_from_u64(3);
        let pdf = CosinePdf::new(Vec3::new(0.3, 0.9, -0.1));
        assert_eq!(fraction_with_positive_density(&pdf, &mut rng, 2_000), 1.0);
    }

    #[test]
    fn test_cosine_pdf_mean_of_own_value() {
        // For X ~ p the mean of p(X) is the integral of p^2: 2/(3pi) for cos/pi.
        let mut rng = StdRng::seed_from_u64(99);
        let pdf = CosinePdf::new(Vec3::Z);
        let n = 100_000;
        let mean = (0..n).map(|_| pdf.value(pdf.generate(&mut rng))).sum::<f32>() / n as f32;
        assert!((mean - 2.0 / (3.0 * PI)).abs() < 0.01, "mean {mean}");
    }

    #[test]
    fn test_sphere_pdf_constant() {
        let pdf = SpherePdf;
        assert!((pdf.value(Vec3::X) - 1.0 / (4.0 * PI)).abs() < 1e-7);
        assert_eq!(pdf.value(Vec3::X), pdf.value(-Vec3::Y));
    }

    #[test]
    fn test_hittable_pdf_delegates_to_lights() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut lights = Scene::new();
        lights.push(Quad::new(
            Vec3::new(-1.0, 3.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Lambertian::new(Vec3::ONE),
        ));
        let pdf = HittablePdf::new(&lights, Vec3::ZERO);

        for _ in 0..100 {
            let d = pdf.generate(&mut rng);
            assert!(d.y > 0.0);
            assert!(pdf.value(d) > 0.0);
        }
        assert_eq!(pdf.value(-Vec3::Y), 0.0);
    }

    #[test]
    fn test_mixture_uses_both_components() {
        let mut rng = StdRng::seed_from_u64(8);
        let up = CosinePdf::new(Vec3::Y);
        let down = CosinePdf::new(-Vec3::Y);
        let mixture = MixturePdf::new(&up, &down);

        let n = 4_000;
        let upward = (0..n).filter(|_| mixture.generate(&mut rng).y > 0.0).count();
        let fraction = upward as f32 / n as f32;
        assert!((fraction - 0.5).abs() < 0.05, "fraction {fraction}");
    }

    proptest! {
        #[test]
        fn mixture_value_is_mean_of_components(
            nx in -1.0f32..1.0, ny in -1.0f32..1.0, nz in 0.1f32..1.0,
            dx in -1.0f32..1.0, dy in -1.0f32..1.0, dz in -1.0f32..1.0,
        ) {
            prop_assume!(Vec3::new(dx, dy, dz).length() > 1e-3);
            let d = Vec3::new(dx, dy, dz);
            let p0 = CosinePdf::new(Vec3::new(nx, ny, nz));
            let p1 = SpherePdf;
            let mixture = MixturePdf::new(&p0, &p1);

            prop_assert_eq!(mixture.value(d), 0.5 * p0.value(d) + 0.5 * p1.value(d));
        }
    }
}
