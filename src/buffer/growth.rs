//! Capacity growth policy.
//!
//! A buffer grows only when a write would run past its capacity. Each step
//! takes the capacity to `size * 3 / 2 + 1`; steps repeat until the required
//! size fits. An optional cap bounds the result.

use crate::error::{BufferError, Result};

/// Computes new capacities for a growing [`ByteBuffer`](crate::ByteBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrowthPolicy {
    max_capacity: Option<usize>,
}

impl GrowthPolicy {
    /// Growth without an upper bound.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_capacity: None }
    }

    /// Growth that never exceeds `max_capacity` bytes.
    #[must_use]
    pub const fn capped(max_capacity: usize) -> Self {
        Self {
            max_capacity: Some(max_capacity),
        }
    }

    /// Builds a policy from an optional cap.
    #[must_use]
    pub const fn with_max(max_capacity: Option<usize>) -> Self {
        Self { max_capacity }
    }

    /// Returns the cap, if any.
    #[inline]
    #[must_use]
    pub const fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// One growth step from `current`: `current * 3 / 2 + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytebuf::GrowthPolicy;
    ///
    /// assert_eq!(GrowthPolicy::next_capacity(0).unwrap(), 1);
    /// assert_eq!(GrowthPolicy::next_capacity(1).unwrap(), 2);
    /// assert_eq!(GrowthPolicy::next_capacity(10).unwrap(), 16);
    /// ```
    pub fn next_capacity(current: usize) -> Result<usize> {
        // floor(3c / 2) == c + floor(c / 2), which avoids overflowing on 3c.
        match current.checked_add(current / 2) {
            Some(scaled) => match scaled.checked_add(1) {
                Some(next) => Ok(next),
                None => Err(BufferError::CapacityOverflow { current }),
            },
            None => Err(BufferError::CapacityOverflow { current }),
        }
    }

    /// Checks that a buffer may hold `capacity` bytes under this policy.
    pub fn check(&self, capacity: usize) -> Result<()> {
        match self.max_capacity {
            Some(limit) if capacity > limit => Err(BufferError::CapacityExceeded {
                required: capacity,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Capacity to grow to so that at least `required` bytes fit.
    ///
    /// Returns `current` unchanged if it already suffices.
    pub fn target_capacity(&self, current: usize, required: usize) -> Result<usize> {
        if required <= current {
            return Ok(current);
        }
        self.check(required)?;

        let mut next = current;
        while next < required {
            next = match Self::next_capacity(next) {
                Ok(next) => next,
                // The cap is at least `required`, so it is a valid landing spot.
                Err(err) => self.max_capacity.ok_or(err)?,
            };
        }

        Ok(match self.max_capacity {
            Some(limit) => next.min(limit),
            None => next,
        })
    }
}
