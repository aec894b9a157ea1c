//! Odometry engine layer.
//!
//! - [`LaserOdometry`]: pose integration around a [`ScanMatcher`](crate::matching::ScanMatcher)
//! - [`OdometryUpdate`]: per-scan output (success flag, pose, covariance)

mod laser_odometry;

pub use laser_odometry::{ConfigState, LaserOdometry, OdometryUpdate, ResetMode};
