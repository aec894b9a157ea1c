//! Frame and calibration registry.
//!
//! Holds the four logical frame names (laser, body, world, odometry output)
//! and the fixed laser-to-body extrinsic. The inverse extrinsic is recomputed
//! on every write so the pair can never disagree.
//!
//! Frame names are plain identifiers. The registry does not check them for
//! uniqueness or emptiness; colliding names are the caller's business.

use serde::{Deserialize, Serialize};

use crate::core::math::Transform3;

/// The four logical frame identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNames {
    /// Laser sensor frame
    pub laser: String,
    /// Body (robot base) frame
    pub body: String,
    /// World frame
    pub world: String,
    /// Odometry output frame
    pub odometry: String,
}

impl Default for FrameNames {
    fn default() -> Self {
        Self {
            laser: "base_laser_link".to_string(),
            body: "base_link".to_string(),
            world: "world".to_string(),
            odometry: "odom".to_string(),
        }
    }
}

/// Frame names plus the laser extrinsic calibration.
#[derive(Debug, Clone)]
pub struct FrameRegistry {
    frames: FrameNames,
    /// Laser frame → body frame (pose of the laser in the body frame)
    sensor_to_body: Transform3,
    /// Body frame → laser frame, always `sensor_to_body.inverse()`
    body_to_sensor: Transform3,
}

impl FrameRegistry {
    /// Registry with placeholder frame names and an identity extrinsic.
    pub fn new() -> Self {
        Self {
            frames: FrameNames::default(),
            sensor_to_body: Transform3::identity(),
            body_to_sensor: Transform3::identity(),
        }
    }

    /// Store the extrinsic and recompute its inverse.
    ///
    /// Any rigid transform is accepted.
    pub fn set_sensor_to_body(&mut self, sensor_to_body: Transform3) {
        self.sensor_to_body = sensor_to_body;
        self.body_to_sensor = sensor_to_body.inverse();
    }

    pub fn sensor_to_body(&self) -> Transform3 {
        self.sensor_to_body
    }

    pub fn body_to_sensor(&self) -> Transform3 {
        self.body_to_sensor
    }

    /// Re-express a motion of the laser frame as a motion of the body frame.
    ///
    /// ```text
    /// Δbody = sensor_to_body ∘ Δlaser ∘ body_to_sensor
    /// ```
    pub fn laser_motion_to_body(&self, laser_motion: &Transform3) -> Transform3 {
        self.sensor_to_body * laser_motion * self.body_to_sensor
    }

    /// All four frame names.
    pub fn frames(&self) -> &FrameNames {
        &self.frames
    }

    /// Replace all four frame names at once.
    pub fn set_frames(&mut self, frames: FrameNames) {
        self.frames = frames;
    }

    pub fn frame_laser(&self) -> &str {
        &self.frames.laser
    }

    pub fn frame_body(&self) -> &str {
        &self.frames.body
    }

    pub fn frame_world(&self) -> &str {
        &self.frames.world
    }

    pub fn frame_odometry(&self) -> &str {
        &self.frames.odometry
    }

    pub fn set_frame_laser(&mut self, frame: impl Into<String>) {
        self.frames.laser = frame.into();
    }

    pub fn set_frame_body(&mut self, frame: impl Into<String>) {
        self.frames.body = frame.into();
    }

    pub fn set_frame_world(&mut self, frame: impl Into<String>) {
        self.frames.world = frame.into();
    }

    pub fn set_frame_odometry(&mut self, frame: impl Into<String>) {
        self.frames.odometry = frame.into();
    }
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
