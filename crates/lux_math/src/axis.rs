use crate::{degrees_to_radians, Mat3};
use serde::{Deserialize, Serialize};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Axis for index 0, 1 or 2. Anything past 2 maps to Z.
    pub fn from_index(n: usize) -> Self {
        match n {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Right-handed rotation about this axis through the origin.
    pub fn rotation(self, degrees: f32) -> Mat3 {
        let radians = degrees_to_radians(degrees);
        match self {
            Axis::X => Mat3::from_rotation_x(radians),
            Axis::Y => Mat3::from_rotation_y(radians),
            Axis::Z => Mat3::from_rotation_z(radians),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_axis_index_round_trip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_index(axis.index()), axis);
        }
        assert_eq!(Axis::from_index(7), Axis::Z);
    }

    #[test]
    fn test_rotation_about_y() {
        let rotated = Axis::Y.rotation(90.0) * Vec3::X;
        // +x turns toward -z under a right-handed rotation about +y.
        assert!((rotated - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);

        let unchanged = Axis::Y.rotation(37.0) * Vec3::Y;
        assert!((unchanged - Vec3::Y).length() < 1e-6);
    }
}
