use crate::{Axis, Interval, Ray, Vec3};

/// Minimum thickness of a padded box along any axis.
pub const PAD_DELTA: f32 = 0.0001;

/// Axis-Aligned Bounding Box used by the BVH and by every intersectable.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Boxes built with [`Aabb::new`] or [`Aabb::from_points`] are padded so that
/// planar primitives never produce a zero-thickness slab.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Box that contains nothing; the identity of [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Box that contains everything.
    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };

    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }.pad()
    }

    /// Create an AABB from two opposite corners given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::ordered(a.x, b.x),
            Interval::ordered(a.y, b.y),
            Interval::ordered(a.z, b.z),
        )
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Copy of this box with every axis at least [`PAD_DELTA`] thick.
    ///
    /// Empty axes are left alone.
    pub fn pad(&self) -> Aabb {
        let pad_axis = |i: Interval| {
            if i.is_empty() || i.size() >= PAD_DELTA {
                i
            } else {
                i.expand(PAD_DELTA - i.size())
            }
        };
        Aabb {
            x: pad_axis(self.x),
            y: pad_axis(self.y),
            z: pad_axis(self.z),
        }
    }

    pub fn axis_interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Slab test. Returns the parametric range of the ray inside the box,
    /// narrowed from `ray_t`, or `None` on a miss.
    ///
    /// A zero direction component yields an infinite reciprocal; the
    /// resulting infinities (and NaNs from `0 * inf`, which `f32::max` and
    /// `f32::min` discard) leave that axis unconstrained or rejected as
    /// appropriate for axis-aligned rays.
    pub fn hit_interval(&self, r: &Ray, mut ray_t: Interval) -> Option<Interval> {
        for axis in Axis::ALL {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis.index()];
            let orig = r.origin[axis.index()];

            let mut t0 = (slab.min - orig) * adinv;
            let mut t1 = (slab.max - orig) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return None;
            }
        }
        Some(ray_t)
    }

    /// Test if a ray intersects this AABB within the given interval.
    #[inline]
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.hit_interval(r, ray_t).is_some()
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.add_scalar(offset.x),
            self.y.add_scalar(offset.y),
            self.z.add_scalar(offset.z),
        )
    }

    /// Returns the axis with the longest extent.
    pub fn longest_axis(&self) -> Axis {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            Axis::X
        } else if y_size > z_size {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
