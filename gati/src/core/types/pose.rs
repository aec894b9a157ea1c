//! Planar pose type.

use serde::{Deserialize, Serialize};

use crate::core::math::{Transform3, normalize_angle, planar_transform, yaw_of};

/// Robot pose projected onto the ground plane.
///
/// Represents position (x, y) in meters and heading (theta) in radians.
/// Theta is normalized to [-π, π].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Heading in radians, normalized to [-π, π]
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose with theta normalized to [-π, π].
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Identity pose at origin with zero heading.
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Project a 3D transform onto the plane.
    ///
    /// Keeps the x/y translation and the rotation about the vertical axis;
    /// z, roll and pitch are dropped.
    #[inline]
    pub fn from_transform(transform: &Transform3) -> Self {
        Self {
            x: transform.translation.x,
            y: transform.translation.y,
            theta: yaw_of(&transform.rotation),
        }
    }

    /// Lift this pose into a 3D transform with z = 0 and a yaw-only rotation.
    #[inline]
    pub fn to_transform(&self) -> Transform3 {
        planar_transform(self.x, self.y, self.theta)
    }
}

impl Default for Pose2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&Transform3> for Pose2D {
    fn from(transform: &Transform3) -> Self {
        Self::from_transform(transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform_from_xyz_rpy;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_theta_normalized() {
        let p = Pose2D::new(0.0, 0.0, 3.0 * PI);
        assert_relative_eq!(p.theta, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_of_planar_transform() {
        let t = planar_transform(3.0, 4.0, FRAC_PI_2);
        let p = Pose2D::from_transform(&t);
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 4.0);
        assert_relative_eq!(p.theta, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_drops_z_roll_pitch() {
        let t = transform_from_xyz_rpy(1.0, 2.0, 5.0, 0.2, 0.1, -1.0);
        let p = Pose2D::from(&t);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.theta, -1.0, epsilon = 1e-9);
    }
}
