use crate::Vec3;

/// Orthonormal basis `(u, v, w)` built around a single direction `w`.
///
/// Used to map samples drawn in a local frame (z up) into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    axis: [Vec3; 3],
}

impl Onb {
    /// Build a basis whose `w` axis is `n` normalized.
    ///
    /// Branchless construction of Duff et al., "Building an Orthonormal
    /// Basis, Revisited" (2017). Stable for every `n`, including `-Z`.
    pub fn from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let sign = 1.0_f32.copysign(w.z);
        let a = -1.0 / (sign + w.z);
        let b = w.x * w.y * a;
        let u = Vec3::new(1.0 + sign * w.x * w.x * a, sign * b, -sign * w.x);
        let v = Vec3::new(b, sign + w.y * w.y * a, -w.y);
        Self { axis: [u, v, w] }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.axis[0]
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.axis[1]
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.axis[2]
    }

    /// Map local coordinates `(a.x, a.y, a.z)` onto the basis.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u() + a.y * self.v() + a.z * self.w()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(onb: &Onb) {
        for axis in [onb.u(), onb.v(), onb.w()] {
            assert!((axis.length() - 1.0).abs() < 1e-5, "{axis:?} is not unit");
        }
        assert!(onb.u().dot(onb.v()).abs() < 1e-5);
        assert!(onb.u().dot(onb.w()).abs() < 1e-5);
        assert!(onb.v().dot(onb.w()).abs() < 1e-5);
    }

    #[test]
    fn test_onb_orthonormal_for_many_normals() {
        let normals = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::Z,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-0.3, 0.2, -5.0),
            Vec3::new(0.0, -2.0, 0.0001),
        ];
        for n in normals {
            let onb = Onb::from_w(n);
            assert_orthonormal(&onb);
            assert!((onb.w() - n.normalize()).length() < 1e-6);
        }
    }

    #[test]
    fn test_onb_local_maps_z_to_w() {
        let onb = Onb::from_w(Vec3::new(0.0, 3.0, 4.0));
        let mapped = onb.local(Vec3::Z);

        assert!((mapped - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }
}
