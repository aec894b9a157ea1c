//! Pose integration engine.
//!
//! Drives the configure → (predict → process)* cycle around a pluggable
//! [`ScanMatcher`] and turns the accumulated body pose into odometry output.
//!
//! # Integration
//!
//! Each successful match yields a body-frame relative motion `Δ`, which is
//! composed onto the running pose as a single rigid transform:
//!
//! ```text
//! world_to_body' = world_to_body ∘ Δ
//! ```
//!
//! Rotation and translation are never updated independently, so heading
//! error propagates into position exactly as it does on the robot.
//!
//! A failed match leaves `world_to_body` and `last_relative` untouched.

use crate::config::{COVARIANCE_DIAG_LEN, OdometryConfig};
use crate::core::math::Transform3;
use crate::core::types::{Covariance6, Odometry, Pose2D, StampedScan};
use crate::frames::{FrameNames, FrameRegistry};
use crate::matching::{MotionFrame, ScanMatcher};

/// Configuration lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    /// `configure` has not run yet.
    Unconfigured,
    /// `configure` ran and the matcher setup succeeded.
    Configured,
    /// The matcher setup failed. Terminal.
    Failed,
}

/// How much state [`LaserOdometry::reset`] clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Only the matcher's internal state; the integrated pose is kept.
    KeepPose,
    /// Matcher state plus the integrated pose and last relative motion.
    ClearPose,
}

/// Output of one scan update.
#[derive(Debug, Clone)]
pub struct OdometryUpdate {
    /// Whether the matcher succeeded and the pose advanced.
    pub processed: bool,
    /// Pose and covariance after this update.
    ///
    /// On failure this is the last committed pose, restamped with the
    /// failed scan's time.
    pub odometry: Odometry,
    /// Body-frame motion integrated by this update.
    pub relative: Option<Transform3>,
}

impl OdometryUpdate {
    /// True if `odometry` was not advanced by this scan.
    pub fn is_stale(&self) -> bool {
        !self.processed
    }
}

/// Laser odometry estimator.
///
/// Owns the frame registry, the integrated pose and the matcher. One
/// caller drives one engine.
#[derive(Debug)]
pub struct LaserOdometry<M: ScanMatcher> {
    matcher: M,
    registry: FrameRegistry,

    /// Anchor of the world frame; caller-controlled.
    world_origin: Transform3,
    /// Integrated body pose in the world frame.
    world_to_body: Transform3,
    /// Hint handed to the matcher with each scan.
    relative_guess: Transform3,
    /// Most recent body-frame motion from the matcher.
    last_relative: Transform3,

    covariance_diag: [f64; COVARIANCE_DIAG_LEN],
    state: ConfigState,
    /// Timestamp of the last scan seen (microseconds).
    current_time_us: u64,
}

impl<M: ScanMatcher> LaserOdometry<M> {
    /// Create an unconfigured engine around `matcher`.
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            registry: FrameRegistry::new(),
            world_origin: Transform3::identity(),
            world_to_body: Transform3::identity(),
            relative_guess: Transform3::identity(),
            last_relative: Transform3::identity(),
            covariance_diag: [crate::config::DEFAULT_COVARIANCE; COVARIANCE_DIAG_LEN],
            state: ConfigState::Unconfigured,
            current_time_us: 0,
        }
    }

    /// One-shot setup.
    ///
    /// 1. Takes frame names and the covariance diagonal from `config`
    ///    (a malformed diagonal falls back to the default with a warning).
    /// 2. Resets every transform to identity, then applies the laser mount
    ///    if the configuration has one.
    /// 3. Runs the matcher setup; the engine is configured only if it succeeds.
    ///
    /// Only the first call has any effect.
    pub fn configure(&mut self, config: &OdometryConfig) -> bool {
        if self.state != ConfigState::Unconfigured {
            log::warn!(
                "configure() called again (state {:?}); ignoring",
                self.state
            );
            return self.configured();
        }

        self.registry.set_frames(FrameNames::from(config));
        self.covariance_diag = config.covariance_diagonal();

        self.registry.set_sensor_to_body(Transform3::identity());
        self.relative_guess = Transform3::identity();
        self.last_relative = Transform3::identity();
        self.world_origin = Transform3::identity();
        self.world_to_body = Transform3::identity();

        if let Some(mount) = config.laser_mount {
            self.registry.set_sensor_to_body(mount.to_transform());
        }

        let frames = self.registry.frames();
        log::info!(
            "Laser odometry frames: laser={} body={} world={} odom={}",
            frames.laser,
            frames.body,
            frames.world,
            frames.odometry
        );

        if self.matcher.setup(&self.registry) {
            self.state = ConfigState::Configured;
        } else {
            log::error!("Scan matcher setup failed; odometry disabled");
            self.state = ConfigState::Failed;
        }

        self.configured()
    }

    /// Whether `configure` completed successfully.
    pub fn configured(&self) -> bool {
        self.state == ConfigState::Configured
    }

    pub fn config_state(&self) -> ConfigState {
        self.state
    }

    /// Reset the matcher, and with [`ResetMode::ClearPose`] the integrated pose too.
    pub fn reset(&mut self, mode: ResetMode) {
        self.matcher.reset();
        if mode == ResetMode::ClearPose {
            self.world_to_body = Transform3::identity();
            self.last_relative = Transform3::identity();
        }
        log::debug!("Laser odometry reset ({:?})", mode);
    }

    /// Motion-model prediction from the matcher. Does not touch engine state.
    pub fn predict(&mut self, hint: &Transform3) -> Transform3 {
        self.matcher.predict(hint)
    }

    /// Lower-level update: run the matcher and return the planar pose.
    ///
    /// Returns `(processed, pose)`. The pose is the current estimate whether
    /// or not the match succeeded; check `processed` before trusting it.
    ///
    /// # Panics
    ///
    /// Panics if the engine is not configured.
    pub fn process_planar(&mut self, scan: &StampedScan) -> (bool, Pose2D) {
        let processed = self.integrate(scan).is_some();
        (processed, self.fill_pose2d())
    }

    /// Full update: run the matcher and materialize odometry with covariance.
    ///
    /// # Panics
    ///
    /// Panics if the engine is not configured.
    pub fn process(&mut self, scan: &StampedScan) -> OdometryUpdate {
        let relative = self.integrate(scan);
        let odometry = self
            .fill_odometry(scan)
            .with_covariance(self.fill_covariance());

        OdometryUpdate {
            processed: relative.is_some(),
            odometry,
            relative,
        }
    }

    /// Run the matcher on `scan` and commit its motion if it succeeded.
    fn integrate(&mut self, scan: &StampedScan) -> Option<Transform3> {
        assert!(
            self.configured(),
            "LaserOdometry::process called before a successful configure() (state {:?})",
            self.state
        );

        self.current_time_us = scan.timestamp_us;

        if let Err(e) = scan.data.validate() {
            log::warn!("Rejecting scan at {}us: {}", scan.timestamp_us, e);
            return None;
        }

        let result = self.matcher.process(scan, &self.relative_guess);
        if !result.converged {
            log::warn!(
                "Scan match failed at {}us after {} iterations (score {:.3})",
                scan.timestamp_us,
                result.iterations,
                result.score
            );
            return None;
        }

        let relative = match result.frame {
            MotionFrame::Body => result.transform,
            MotionFrame::Laser => self.registry.laser_motion_to_body(&result.transform),
        };

        self.last_relative = relative;
        self.world_to_body *= relative;

        let pose = Pose2D::from_transform(&self.world_to_body);
        log::debug!(
            "Scan {}us: pose ({:.3}, {:.3}, {:.3})",
            scan.timestamp_us,
            pose.x,
            pose.y,
            pose.theta
        );

        Some(relative)
    }

    /// Integrated body pose anchored at the world origin.
    ///
    /// Equals the raw integrated pose while the origin is the identity.
    pub fn estimated_pose(&self) -> Transform3 {
        self.world_origin * self.world_to_body
    }

    /// Stamped full 3D pose (z and full rotation preserved), no covariance.
    pub fn fill_odometry(&self, scan: &StampedScan) -> Odometry {
        Odometry::from_transform(
            scan.timestamp_us,
            self.registry.frame_odometry(),
            self.registry.frame_body(),
            &self.estimated_pose(),
        )
    }

    /// Stamped planar pose: z = 0 and a yaw-only orientation, with covariance.
    pub fn planar_odometry(&self, scan: &StampedScan, pose: &Pose2D) -> Odometry {
        Odometry::from_pose2d(
            scan.timestamp_us,
            self.registry.frame_odometry(),
            self.registry.frame_body(),
            pose,
        )
        .with_covariance(self.fill_covariance())
    }

    /// Planar projection (x, y, yaw) of the estimated pose.
    pub fn fill_pose2d(&self) -> Pose2D {
        Pose2D::from_transform(&self.estimated_pose())
    }

    /// Static diagonal covariance from the configured coefficients.
    pub fn fill_covariance(&self) -> Covariance6 {
        Covariance6::diagonal(&self.covariance_diag)
    }

    /// Resolved covariance coefficients (x, y, z, roll, pitch, yaw).
    pub fn covariance_diag(&self) -> [f64; COVARIANCE_DIAG_LEN] {
        self.covariance_diag
    }

    pub fn origin(&self) -> Transform3 {
        self.world_origin
    }

    pub fn set_origin(&mut self, origin: Transform3) {
        self.world_origin = origin;
    }

    pub fn initial_guess(&self) -> Transform3 {
        self.relative_guess
    }

    pub fn set_initial_guess(&mut self, guess: Transform3) {
        self.relative_guess = guess;
    }

    /// Laser pose in the body frame (sensor-to-body extrinsic).
    pub fn laser_pose(&self) -> Transform3 {
        self.registry.sensor_to_body()
    }

    /// Set the laser pose in the body frame; its inverse is updated too.
    pub fn set_laser_pose(&mut self, laser_pose: Transform3) {
        self.registry.set_sensor_to_body(laser_pose);
    }

    /// Most recent body-frame motion returned by the matcher.
    pub fn last_relative(&self) -> Transform3 {
        self.last_relative
    }

    /// Timestamp of the last scan handed to `process` (0 before any scan).
    pub fn current_time(&self) -> u64 {
        self.current_time_us
    }

    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    pub fn frame_laser(&self) -> &str {
        self.registry.frame_laser()
    }

    pub fn frame_body(&self) -> &str {
        self.registry.frame_body()
    }

    pub fn frame_world(&self) -> &str {
        self.registry.frame_world()
    }

    pub fn frame_odometry(&self) -> &str {
        self.registry.frame_odometry()
    }

    pub fn set_frame_laser(&mut self, frame: impl Into<String>) {
        self.registry.set_frame_laser(frame);
    }

    pub fn set_frame_body(&mut self, frame: impl Into<String>) {
        self.registry.set_frame_body(frame);
    }

    pub fn set_frame_world(&mut self, frame: impl Into<String>) {
        self.registry.set_frame_world(frame);
    }

    pub fn set_frame_odometry(&mut self, frame: impl Into<String>) {
        self.registry.set_frame_odometry(frame);
    }

    /// The wrapped matcher.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    pub fn matcher_mut(&mut self) -> &mut M {
        &mut self.matcher
    }
}
