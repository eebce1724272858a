//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over shared hittables. Each level sorts its objects by the
//! minimum of their boxes on a randomly chosen axis and splits at the median.
//! The tree is built once and is read-only while rendering.

use crate::sampling::gen_index;
use crate::{HitRecord, Hittable, Scene};
use lux_math::{Aabb, Axis, Interval, Ray};
use rand::RngCore;
use std::cmp::Ordering;
use std::sync::Arc;

/// BVH node - either a branch with two children or a leaf with one object.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node holding a single object.
    Leaf {
        object: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    /// Tree over nothing. Never hit.
    Empty,
}

/// Shape of a built tree, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BvhStats {
    pub branches: usize,
    pub leaves: usize,
    pub depth: usize,
}

impl BvhNode {
    /// Build a BVH over the given objects.
    pub fn new(objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        let count = objects.len();
        let node = if objects.is_empty() {
            BvhNode::Empty
        } else {
            Self::build(objects, rng)
        };

        let stats = node.stats();
        log::debug!(
            "Built BVH over {} objects: {} branches, {} leaves, depth {}",
            count,
            stats.branches,
            stats.leaves,
            stats.depth
        );
        node
    }

    /// Build a BVH sharing the members of `scene`.
    pub fn from_scene(scene: &Scene, rng: &mut dyn RngCore) -> Self {
        Self::new(scene.objects().to_vec(), rng)
    }

    fn leaf(object: Arc<dyn Hittable>) -> Self {
        let bbox = object.bounding_box();
        BvhNode::Leaf { object, bbox }
    }

    fn branch(left: BvhNode, right: BvhNode) -> Self {
        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    /// Recursive construction. `objects` is never empty.
    fn build(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        let axis = Axis::from_index(gen_index(rng, 3));
        let box_compare = |a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>| {
            let a_min = a.bounding_box().axis_interval(axis).min;
            let b_min = b.bounding_box().axis_interval(axis).min;
            a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
        };

        match objects.len() {
            1 => Self::leaf(objects.remove(0)),
            2 => {
                objects.sort_by(box_compare);
                let second = objects.remove(1);
                let first = objects.remove(0);
                Self::branch(Self::leaf(first), Self::leaf(second))
            }
            n => {
                objects.sort_by(box_compare);

                let right_objects = objects.split_off(n / 2);
                let left = Self::build(objects, rng);
                let right = Self::build(right_objects, rng);

                Self::branch(left, right)
            }
        }
    }

    /// Count nodes and measure depth.
    pub fn stats(&self) -> BvhStats {
        match self {
            BvhNode::Empty => BvhStats::default(),
            BvhNode::Leaf { .. } => BvhStats {
                branches: 0,
                leaves: 1,
                depth: 1,
            },
            BvhNode::Branch { left, right, .. } => {
                let l = left.stats();
                let r = right.stats();
                BvhStats {
                    branches: l.branches + r.branches + 1,
                    leaves: l.leaves + r.leaves,
                    depth: l.depth.max(r.depth) + 1,
                }
            }
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { object, bbox } => {
                bbox.hit(ray, ray_t) && object.hit(ray, ray_t, rec, rng)
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec, rng);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec, rng);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
