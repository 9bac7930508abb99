//! Validation of the requested index interval.

use motion_common::error::MotionError;

use crate::item::ItemName;

/// Lowest index in the series.
pub const MIN_INDEX: u32 = 1;

/// Highest index in the series.
pub const MAX_INDEX: u32 = 128;

/// A violated range rule. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeViolation {
    #[error("--start {start} was larger than --end {end}")]
    StartAfterEnd { start: i64, end: i64 },

    #[error("--start {start} must be larger than or equal to 1")]
    StartTooSmall { start: i64 },

    #[error("--end {end} must be larger than or equal to 1")]
    EndTooSmall { end: i64 },

    #[error("--start {start} must be less than or equal to 128")]
    StartTooLarge { start: i64 },

    #[error("--end {end} must be less than or equal to 128")]
    EndTooLarge { end: i64 },
}

impl From<RangeViolation> for MotionError {
    fn from(violation: RangeViolation) -> Self {
        MotionError::invalid_range(violation.to_string())
    }
}

/// Inclusive index range, `MIN_INDEX <= start <= end <= MAX_INDEX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    start: u32,
    end: u32,
}

impl BatchRange {
    /// Validate raw CLI bounds.
    pub fn new(start: i64, end: i64) -> Result<Self, RangeViolation> {
        let min = i64::from(MIN_INDEX);
        let max = i64::from(MAX_INDEX);

        if start > end {
            return Err(RangeViolation::StartAfterEnd { start, end });
        }
        if start < min {
            return Err(RangeViolation::StartTooSmall { start });
        }
        if end < min {
            return Err(RangeViolation::EndTooSmall { end });
        }
        if start > max {
            return Err(RangeViolation::StartTooLarge { start });
        }
        if end > max {
            return Err(RangeViolation::EndTooLarge { end });
        }

        // Both bounds are inside [MIN_INDEX, MAX_INDEX] here.
        Ok(Self {
            start: start as u32,
            end: end as u32,
        })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of items in the range.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Item names in ascending index order.
    pub fn items(&self) -> impl Iterator<Item = ItemName> {
        (self.start..=self.end).map(ItemName::new)
    }
}

impl Default for BatchRange {
    fn default() -> Self {
        Self {
            start: MIN_INDEX,
            end: MAX_INDEX,
        }
    }
}
