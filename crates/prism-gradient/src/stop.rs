// SPDX-License-Identifier: MIT

use crate::error::GradientError;

/// A color pinned to a location along a gradient.
///
/// Locations run from 0.0 (start) to 1.0 (end).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop<C> {
    location: f64,
    color: C,
}

impl<C> GradientStop<C> {
    /// A stop at `location`.
    ///
    /// # Errors
    ///
    /// [`GradientError::StopOutOfRange`] unless `location` is within
    /// `0.0..=1.0`. NaN is out of range.
    pub fn new(location: f64, color: C) -> Result<Self, GradientError> {
        if !(0.0..=1.0).contains(&location) {
            return Err(GradientError::StopOutOfRange(location));
        }
        Ok(Self { location, color })
    }

    /// A stop at location 0.0.
    #[must_use]
    pub const fn start(color: C) -> Self {
        Self {
            location: 0.0,
            color,
        }
    }

    /// A stop at location 1.0.
    #[must_use]
    pub const fn end(color: C) -> Self {
        Self {
            location: 1.0,
            color,
        }
    }

    #[inline]
    #[must_use]
    pub const fn location(&self) -> f64 {
        self.location
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> &C {
        &self.color
    }

    #[must_use]
    pub fn into_color(self) -> C {
        self.color
    }

    /// The same location with `f` applied to the color.
    #[must_use]
    pub fn map<D>(&self, f: impl FnOnce(&C) -> D) -> GradientStop<D> {
        GradientStop {
            location: self.location,
            color: f(&self.color),
        }
    }
}
