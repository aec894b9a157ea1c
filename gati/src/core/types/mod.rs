//! Core data types for odometry.
//!
//! - [`LaserScan`]: Raw LiDAR scan in polar coordinates
//! - [`Timestamped<T>`]: Generic timestamp wrapper
//! - [`Pose2D`]: Planar pose (x, y, theta)
//! - [`Covariance6`]: 6x6 pose covariance
//! - [`Odometry`]: Stamped pose + covariance emitted per scan

mod odometry;
mod pose;
mod scan;
mod timestamped;

pub use odometry::{Covariance6, Odometry};
pub use pose::Pose2D;
pub use scan::{LaserScan, StampedScan};
pub use timestamped::Timestamped;
