//! LiDAR scan type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Timestamped;

/// A laser scan stamped with the time it was captured.
pub type StampedScan = Timestamped<LaserScan>;

/// Raw LiDAR scan in polar coordinates, expressed in the laser frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    /// Start angle in radians
    pub angle_min: f32,
    /// End angle in radians
    pub angle_max: f32,
    /// Angular resolution (radians between consecutive readings)
    pub angle_increment: f32,
    /// Minimum valid range in meters
    pub range_min: f32,
    /// Maximum valid range in meters
    pub range_max: f32,
    /// Range measurements in meters (0 or NaN = invalid)
    pub ranges: Vec<f32>,
    /// Optional intensity values (0-255)
    pub intensities: Option<Vec<u8>>,
}

impl LaserScan {
    /// Create a new laser scan with the given parameters.
    pub fn new(
        angle_min: f32,
        angle_max: f32,
        angle_increment: f32,
        range_min: f32,
        range_max: f32,
        ranges: Vec<f32>,
    ) -> Self {
        Self {
            angle_min,
            angle_max,
            angle_increment,
            range_min,
            range_max,
            ranges,
            intensities: None,
        }
    }

    /// Create a laser scan with intensities.
    pub fn with_intensities(mut self, intensities: Vec<u8>) -> Self {
        self.intensities = Some(intensities);
        self
    }

    /// Attach a capture timestamp (microseconds).
    pub fn stamped(self, timestamp_us: u64) -> StampedScan {
        Timestamped::new(self, timestamp_us)
    }

    /// Number of range measurements.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if scan is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Angle of the reading at `index`.
    #[inline]
    pub fn angle_at(&self, index: usize) -> f32 {
        self.angle_min + index as f32 * self.angle_increment
    }

    /// Check if a range value is valid.
    #[inline]
    pub fn is_valid_range(&self, range: f32) -> bool {
        range.is_finite() && range > 0.0 && range >= self.range_min && range <= self.range_max
    }

    /// Count valid points.
    pub fn valid_count(&self) -> usize {
        self.ranges
            .iter()
            .filter(|&&r| self.is_valid_range(r))
            .count()
    }

    /// Iterate over (angle, range) pairs of valid readings.
    pub fn iter_valid(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .filter(|(_, r)| self.is_valid_range(**r))
            .map(|(i, &r)| (self.angle_at(i), r))
    }

    /// Validate internal consistency of the scan data.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref intensities) = self.intensities
            && intensities.len() != self.ranges.len()
        {
            return Err(Error::InvalidScan("intensities and ranges length mismatch"));
        }
        if self.range_min < 0.0 {
            return Err(Error::InvalidScan("range_min must be non-negative"));
        }
        if self.range_max <= self.range_min {
            return Err(Error::InvalidScan("range_max must be greater than range_min"));
        }
        Ok(())
    }
}

impl Default for LaserScan {
    fn default() -> Self {
        Self {
            angle_min: 0.0,
            angle_max: std::f32::consts::TAU,
            angle_increment: std::f32::consts::TAU / 360.0,
            range_min: 0.15,
            range_max: 12.0,
            ranges: Vec::new(),
            intensities: None,
        }
    }
}
