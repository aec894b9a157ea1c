//! Scan matching contract.
//!
//! The odometry engine never registers scans itself. It hands each scan and
//! the current relative guess to a [`ScanMatcher`] and integrates whatever
//! relative transform comes back.
//!
//! # Example
//!
//! ```
//! use gati::matching::{ScanMatchResult, ScanMatcher};
//! use gati::{FrameRegistry, Pose2D, StampedScan, Transform3};
//!
//! /// Pretends the robot always drove 10cm forward.
//! struct Forward;
//!
//! impl ScanMatcher for Forward {
//!     fn setup(&mut self, _frames: &FrameRegistry) -> bool {
//!         true
//!     }
//!
//!     fn process(&mut self, _scan: &StampedScan, _guess: &Transform3) -> ScanMatchResult {
//!         ScanMatchResult::from_pose2d(Pose2D::new(0.1, 0.0, 0.0))
//!     }
//! }
//! ```

mod scripted;

pub use scripted::{ScriptedMatcher, ScriptedStep};

use crate::core::math::Transform3;
use crate::core::types::{Pose2D, StampedScan};
use crate::frames::FrameRegistry;

/// Frame in which a matcher expresses its relative transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionFrame {
    /// Motion of the body frame between consecutive scans.
    #[default]
    Body,
    /// Motion of the laser frame between consecutive scans.
    ///
    /// The engine re-expresses it in the body frame using the extrinsic.
    Laser,
}

/// Result of a scan matching operation.
#[derive(Debug, Clone)]
pub struct ScanMatchResult {
    /// Estimated motion since the previous scan.
    pub transform: Transform3,

    /// Frame `transform` is expressed in.
    pub frame: MotionFrame,

    /// Match quality score (0.0 = bad, 1.0 = perfect).
    pub score: f64,

    /// Whether the algorithm converged successfully.
    pub converged: bool,

    /// Number of iterations performed.
    pub iterations: u32,
}

impl Default for ScanMatchResult {
    fn default() -> Self {
        Self {
            transform: Transform3::identity(),
            frame: MotionFrame::Body,
            score: 0.0,
            converged: false,
            iterations: 0,
        }
    }
}

impl ScanMatchResult {
    /// Create a failed result with identity transform.
    pub fn failed() -> Self {
        Self::default()
    }

    /// Create a successful result with a body-frame transform.
    pub fn success(transform: Transform3) -> Self {
        Self {
            transform,
            score: 1.0,
            converged: true,
            ..Self::default()
        }
    }

    /// Create a successful result from a planar motion estimate.
    pub fn from_pose2d(delta: Pose2D) -> Self {
        Self::success(delta.to_transform())
    }

    /// Mark the transform as expressed in the laser frame.
    pub fn in_laser_frame(mut self) -> Self {
        self.frame = MotionFrame::Laser;
        self
    }

    /// Attach quality metrics.
    pub fn with_quality(mut self, score: f64, iterations: u32) -> Self {
        self.score = score;
        self.iterations = iterations;
        self
    }
}

/// Trait for scan matching algorithms driven by the odometry engine.
///
/// Only [`setup`](ScanMatcher::setup) and [`process`](ScanMatcher::process)
/// are required. The engine calls them from a single thread, one scan at a
/// time.
pub trait ScanMatcher {
    /// Algorithm-specific setup, run at the end of engine configuration.
    ///
    /// The engine reports itself configured only if this returns `true`.
    fn setup(&mut self, frames: &FrameRegistry) -> bool;

    /// Estimate the motion since the previous scan.
    ///
    /// # Arguments
    ///
    /// * `scan` - The newest scan
    /// * `guess` - A priori relative motion hint; may be inaccurate
    fn process(&mut self, scan: &StampedScan, guess: &Transform3) -> ScanMatchResult;

    /// Motion-model prediction used to seed the next match.
    ///
    /// Default ignores the hint and predicts no motion.
    fn predict(&mut self, _hint: &Transform3) -> Transform3 {
        Transform3::identity()
    }

    /// Clear algorithm-internal state (reference scans, keyframes, ...).
    fn reset(&mut self) {}
}

impl<M: ScanMatcher + ?Sized> ScanMatcher for Box<M> {
    fn setup(&mut self, frames: &FrameRegistry) -> bool {
        (**self).setup(frames)
    }

    fn process(&mut self, scan: &StampedScan, guess: &Transform3) -> ScanMatchResult {
        (**self).process(scan, guess)
    }

    fn predict(&mut self, hint: &Transform3) -> Transform3 {
        (**self).predict(hint)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::planar_transform;

    struct Minimal;

    impl ScanMatcher for Minimal {
        fn setup(&mut self, _frames: &FrameRegistry) -> bool {
            true
        }

        fn process(&mut self, _scan: &StampedScan, _guess: &Transform3) -> ScanMatchResult {
            ScanMatchResult::failed()
        }
    }

    #[test]
    fn test_default_predict_is_identity() {
        let mut matcher = Minimal;
        let hint = planar_transform(1.0, 2.0, 0.3);
        assert_eq!(matcher.predict(&hint), Transform3::identity());
    }

    #[test]
    fn test_boxed_matcher_delegates() {
        let mut matcher: Box<dyn ScanMatcher> = Box::new(Minimal);
        assert!(matcher.setup(&FrameRegistry::new()));
        matcher.reset();
        assert_eq!(
            matcher.predict(&planar_transform(1.0, 0.0, 0.0)),
            Transform3::identity()
        );
    }

    #[test]
    fn test_result_builders() {
        let failed = ScanMatchResult::failed();
        assert!(!failed.converged);
        assert_eq!(failed.transform, Transform3::identity());

        let ok = ScanMatchResult::from_pose2d(Pose2D::new(1.0, 0.0, 0.0))
            .in_laser_frame()
            .with_quality(0.8, 12);
        assert!(ok.converged);
        assert_eq!(ok.frame, MotionFrame::Laser);
        assert_eq!(ok.iterations, 12);
        assert_eq!(ok.score, 0.8);
        assert_eq!(ok.transform.translation.x, 1.0);
    }
}
