//! Mathematical primitives for odometry bookkeeping.
//!
//! Angle normalization plus the handful of rigid-transform helpers the
//! integration engine needs on top of [`nalgebra::Isometry3`].

use std::f64::consts::PI;

use nalgebra::{Isometry3, Translation3, UnitQuaternion};

/// Rigid transform (rotation + translation) in 3D.
pub type Transform3 = Isometry3<f64>;

/// Normalize angle to [-π, π].
///
/// # Example
/// ```
/// use gati::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-9);
/// assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-9);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Build a planar transform: translation (x, y, 0) and rotation about +Z.
#[inline]
pub fn planar_transform(x: f64, y: f64, yaw: f64) -> Transform3 {
    Isometry3::from_parts(
        Translation3::new(x, y, 0.0),
        UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
    )
}

/// Build a transform from a translation and roll/pitch/yaw (radians).
#[inline]
pub fn transform_from_xyz_rpy(
    x: f64,
    y: f64,
    z: f64,
    roll: f64,
    pitch: f64,
    yaw: f64,
) -> Transform3 {
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

/// Heading of a rotation about the vertical axis, in [-π, π].
///
/// Uses the ZYX (yaw-pitch-roll) decomposition, so a rotation that also
/// carries roll or pitch still reports the yaw of its forward axis.
#[inline]
pub fn yaw_of(rotation: &UnitQuaternion<f64>) -> f64 {
    let (_, _, yaw) = rotation.euler_angles();
    normalize_angle(yaw)
}

/// Check whether two transforms agree within `epsilon` on every
/// translation component and on rotation angle.
pub fn transforms_close(a: &Transform3, b: &Transform3, epsilon: f64) -> bool {
    let dt = (a.translation.vector - b.translation.vector).amax();
    let dr = a.rotation.angle_to(&b.rotation);
    dt <= epsilon && dr <= epsilon
}
