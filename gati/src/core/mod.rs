//! Core foundation layer.
//!
//! Bottom layer of the odometry stack. Depends only on the crate error type.
//!
//! # Contents
//!
//! - [`types`]: Core data types (scans, poses, odometry output)
//! - [`math`]: Angle normalization and rigid-transform helpers

pub mod math;
pub mod types;
