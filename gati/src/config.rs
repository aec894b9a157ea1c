//! Configuration for the odometry engine
//!
//! Loaded from a TOML file or built in code and handed to
//! [`LaserOdometry::configure`](crate::engine::LaserOdometry::configure).
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! laser_frame = "base_laser_link"
//! base_frame = "base_link"
//! world_frame = "world"
//! laser_odom_frame = "odom"
//! covariance_diag = [1e-3, 1e-3, 1e-6, 1e-6, 1e-6, 1e-3]
//!
//! [laser_mount]
//! x = -0.0936
//! yaw = 0.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::math::{Transform3, transform_from_xyz_rpy};
use crate::error::Result;
use crate::frames::FrameNames;

/// Variance used on every axis when `covariance_diag` is missing or malformed.
pub const DEFAULT_COVARIANCE: f64 = 1e-9;

/// Number of covariance coefficients: x, y, z, roll, pitch, yaw.
pub const COVARIANCE_DIAG_LEN: usize = 6;

/// Odometry engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OdometryConfig {
    /// Frame of the laser sensor
    pub laser_frame: String,
    /// Body frame the estimated pose is anchored to
    pub base_frame: String,
    /// World frame
    pub world_frame: String,
    /// Frame the integrated pose is reported in
    pub laser_odom_frame: String,
    /// Per-axis variances (x, y, z, roll, pitch, yaw). Must hold exactly 6 values.
    pub covariance_diag: Vec<f64>,
    /// Optional laser mounting pose in the body frame
    pub laser_mount: Option<LaserMountConfig>,
}

impl Default for OdometryConfig {
    fn default() -> Self {
        let frames = FrameNames::default();
        Self {
            laser_frame: frames.laser,
            base_frame: frames.body,
            world_frame: frames.world,
            laser_odom_frame: frames.odometry,
            covariance_diag: Vec::new(),
            laser_mount: None,
        }
    }
}

impl From<&OdometryConfig> for FrameNames {
    fn from(config: &OdometryConfig) -> Self {
        Self {
            laser: config.laser_frame.clone(),
            body: config.base_frame.clone(),
            world: config.world_frame.clone(),
            odometry: config.laser_odom_frame.clone(),
        }
    }
}

/// Laser mounting pose relative to the body frame.
///
/// Translation in meters, rotation as roll/pitch/yaw in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LaserMountConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl LaserMountConfig {
    /// Sensor-to-body transform described by this mount.
    pub fn to_transform(&self) -> Transform3 {
        transform_from_xyz_rpy(self.x, self.y, self.z, self.roll, self.pitch, self.yaw)
    }
}

impl OdometryConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: OdometryConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the covariance diagonal.
    ///
    /// Exactly six coefficients are used as given. Any other length (including
    /// none at all) is a recoverable misconfiguration: a warning is logged and
    /// [`DEFAULT_COVARIANCE`] is used on every axis.
    pub fn covariance_diagonal(&self) -> [f64; COVARIANCE_DIAG_LEN] {
        match <[f64; COVARIANCE_DIAG_LEN]>::try_from(self.covariance_diag.as_slice()) {
            Ok(diag) => diag,
            Err(_) => {
                log::warn!(
                    "Retrieved {} covariance coefficients, expected {}. Using default {:e}.",
                    self.covariance_diag.len(),
                    COVARIANCE_DIAG_LEN,
                    DEFAULT_COVARIANCE
                );
                [DEFAULT_COVARIANCE; COVARIANCE_DIAG_LEN]
            }
        }
    }
}
