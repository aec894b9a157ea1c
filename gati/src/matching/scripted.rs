//! Scripted scan matcher for replays and tests.
//!
//! Returns a pre-recorded sequence of relative motions instead of registering
//! scans. Useful for replaying a trajectory produced offline and for
//! exercising the engine without a real registration algorithm.

use std::collections::VecDeque;

use crate::core::math::Transform3;
use crate::core::types::{Pose2D, StampedScan};
use crate::frames::FrameRegistry;

use super::{MotionFrame, ScanMatchResult, ScanMatcher};

/// Most recent guesses and scan times kept for inspection.
const HISTORY_LEN: usize = 256;

/// One scripted matcher response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedStep {
    /// Report a successful match with this body-frame motion.
    Motion(Transform3),
    /// Report a successful match with this laser-frame motion.
    LaserMotion(Transform3),
    /// Report a failed match.
    Fail,
}

impl From<Pose2D> for ScriptedStep {
    fn from(delta: Pose2D) -> Self {
        ScriptedStep::Motion(delta.to_transform())
    }
}

impl From<Transform3> for ScriptedStep {
    fn from(delta: Transform3) -> Self {
        ScriptedStep::Motion(delta)
    }
}

/// Matcher that replays a queue of [`ScriptedStep`]s.
///
/// Once the queue runs dry every further scan fails. The guesses and scan
/// times it receives are kept for inspection, bounded to the last
/// 256 scans.
#[derive(Debug, Clone)]
pub struct ScriptedMatcher {
    steps: VecDeque<ScriptedStep>,
    setup_succeeds: bool,
    /// Guesses handed to `process`, oldest first.
    guesses: Vec<Transform3>,
    /// Timestamps of the scans seen, oldest first.
    scan_times: Vec<u64>,
    setup_calls: usize,
    reset_calls: usize,
    /// Motion returned by `predict`, if any.
    prediction: Option<Transform3>,
}

impl ScriptedMatcher {
    /// Create a matcher that will replay `steps` in order.
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ScriptedStep>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
            setup_succeeds: true,
            guesses: Vec::new(),
            scan_times: Vec::new(),
            setup_calls: 0,
            reset_calls: 0,
            prediction: None,
        }
    }

    /// Make `setup` report failure.
    pub fn with_failing_setup(mut self) -> Self {
        self.setup_succeeds = false;
        self
    }

    /// Make `predict` return a fixed motion instead of identity.
    pub fn with_prediction(mut self, prediction: Transform3) -> Self {
        self.prediction = Some(prediction);
        self
    }

    /// Queue another step.
    pub fn push(&mut self, step: impl Into<ScriptedStep>) {
        self.steps.push_back(step.into());
    }

    /// Steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Guesses received, oldest first.
    pub fn guesses(&self) -> &[Transform3] {
        &self.guesses
    }

    /// Timestamps of the scans received, oldest first.
    pub fn scan_times(&self) -> &[u64] {
        &self.scan_times
    }

    pub fn setup_calls(&self) -> usize {
        self.setup_calls
    }

    pub fn reset_calls(&self) -> usize {
        self.reset_calls
    }
}

impl ScanMatcher for ScriptedMatcher {
    fn setup(&mut self, _frames: &FrameRegistry) -> bool {
        self.setup_calls += 1;
        self.setup_succeeds
    }

    fn process(&mut self, scan: &StampedScan, guess: &Transform3) -> ScanMatchResult {
        if self.guesses.len() == HISTORY_LEN {
            self.guesses.remove(0);
            self.scan_times.remove(0);
        }
        self.guesses.push(*guess);
        self.scan_times.push(scan.timestamp_us);

        match self.steps.pop_front() {
            Some(ScriptedStep::Motion(delta)) => ScanMatchResult::success(delta),
            Some(ScriptedStep::LaserMotion(delta)) => ScanMatchResult {
                frame: MotionFrame::Laser,
                ..ScanMatchResult::success(delta)
            },
            Some(ScriptedStep::Fail) | None => ScanMatchResult::failed(),
        }
    }

    fn predict(&mut self, _hint: &Transform3) -> Transform3 {
        self.prediction.unwrap_or_else(Transform3::identity)
    }

    fn reset(&mut self) {
        self.reset_calls += 1;
        self.guesses.clear();
        self.scan_times.clear();
    }
}
