//! Gati - Laser odometry core for robotic vacuum cleaners
//!
//! Turns a stream of laser scans into an integrated 6-DOF pose in the world
//! frame plus a covariance estimate. Scan registration itself is pluggable:
//! any type implementing [`ScanMatcher`] can drive the engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    engine/                          │  ← Pose integration
//! │        (configure, process, result output)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   matching/                         │  ← Matcher contract
//! │           (ScanMatcher, ScriptedMatcher)            │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    frames/                          │  ← Frame registry
//! │        (frame names, laser extrinsic)               │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                (types, math)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use gati::{LaserOdometry, LaserScan, OdometryConfig, Pose2D, ScriptedMatcher};
//!
//! let matcher = ScriptedMatcher::new([Pose2D::new(0.1, 0.0, 0.0)]);
//! let mut odom = LaserOdometry::new(matcher);
//! assert!(odom.configure(&OdometryConfig::default()));
//!
//! let scan = LaserScan::new(0.0, 0.1, 0.1, 0.15, 12.0, vec![1.0, 1.0]).stamped(1_000);
//! let update = odom.process(&scan);
//! assert!(update.processed);
//! assert!((update.odometry.position.x - 0.1).abs() < 1e-12);
//! ```

// Layer 1: Core foundation
pub mod core;

// Layer 2: Frame and calibration registry (depends on core)
pub mod frames;

// Layer 3: Scan matcher contract (depends on core, frames)
pub mod matching;

// Layer 4: Pose integration engine (depends on all layers)
pub mod engine;

pub mod config;
pub mod error;

// Core types
pub use crate::core::math::{self, Transform3};
pub use crate::core::types::{Covariance6, LaserScan, Odometry, Pose2D, StampedScan, Timestamped};

pub use config::{LaserMountConfig, OdometryConfig};
pub use engine::{ConfigState, LaserOdometry, OdometryUpdate, ResetMode};
pub use error::{Error, Result};
pub use frames::{FrameNames, FrameRegistry};
pub use matching::{MotionFrame, ScanMatchResult, ScanMatcher, ScriptedMatcher, ScriptedStep};
