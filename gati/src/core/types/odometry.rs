//! Odometry output types.

use nalgebra::{Matrix6, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::core::math::Transform3;

use super::Pose2D;

/// 6x6 covariance matrix for a 3D pose (x, y, z, roll, pitch, yaw).
///
/// Stored row by row; [`to_array`](Covariance6::to_array) gives the flat
/// row-major form of 36 values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Covariance6 {
    rows: [[f64; 6]; 6],
}

impl Covariance6 {
    /// Create a zero covariance matrix.
    #[inline]
    pub fn zero() -> Self {
        Self { rows: [[0.0; 6]; 6] }
    }

    /// Create a diagonal covariance matrix.
    ///
    /// Values are variances in (x, y, z, roll, pitch, yaw) order.
    /// Off-diagonal terms are exactly zero.
    pub fn diagonal(diag: &[f64; 6]) -> Self {
        let mut rows = [[0.0; 6]; 6];
        for (i, &v) in diag.iter().enumerate() {
            rows[i][i] = v;
        }
        Self { rows }
    }

    /// Entry at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// The six diagonal variances.
    pub fn diagonal_values(&self) -> [f64; 6] {
        std::array::from_fn(|i| self.rows[i][i])
    }

    /// Flat row-major copy.
    pub fn to_array(&self) -> [f64; 36] {
        std::array::from_fn(|i| self.rows[i / 6][i % 6])
    }

    /// Convert to a nalgebra matrix.
    pub fn to_matrix(&self) -> Matrix6<f64> {
        Matrix6::from_fn(|r, c| self.rows[r][c])
    }
}

impl Default for Covariance6 {
    fn default() -> Self {
        Self::zero()
    }
}

/// Integrated odometry estimate, ready for consumers.
///
/// `frame_id` names the odometry-output frame the pose is expressed in and
/// `child_frame_id` names the body frame it locates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odometry {
    /// Timestamp of the scan that produced this estimate (microseconds)
    pub timestamp_us: u64,
    /// Frame the pose is expressed in
    pub frame_id: String,
    /// Frame whose pose is reported
    pub child_frame_id: String,
    /// Position in meters
    pub position: Vector3<f64>,
    /// Orientation
    pub orientation: UnitQuaternion<f64>,
    /// Pose uncertainty
    pub covariance: Covariance6,
}

impl Odometry {
    /// Full 3D pose: z and the complete rotation are preserved.
    pub fn from_transform(
        timestamp_us: u64,
        frame_id: impl Into<String>,
        child_frame_id: impl Into<String>,
        pose: &Transform3,
    ) -> Self {
        Self {
            timestamp_us,
            frame_id: frame_id.into(),
            child_frame_id: child_frame_id.into(),
            position: pose.translation.vector,
            orientation: pose.rotation,
            covariance: Covariance6::zero(),
        }
    }

    /// Planar pose: z = 0 and a rotation about +Z only.
    pub fn from_pose2d(
        timestamp_us: u64,
        frame_id: impl Into<String>,
        child_frame_id: impl Into<String>,
        pose: &Pose2D,
    ) -> Self {
        Self {
            timestamp_us,
            frame_id: frame_id.into(),
            child_frame_id: child_frame_id.into(),
            position: Vector3::new(pose.x, pose.y, 0.0),
            orientation: UnitQuaternion::from_euler_angles(0.0, 0.0, pose.theta),
            covariance: Covariance6::zero(),
        }
    }

    /// Attach a covariance block.
    pub fn with_covariance(mut self, covariance: Covariance6) -> Self {
        self.covariance = covariance;
        self
    }

    /// Reassemble the reported pose as a transform.
    pub fn pose(&self) -> Transform3 {
        Transform3::from_parts(self.position.into(), self.orientation)
    }
}
