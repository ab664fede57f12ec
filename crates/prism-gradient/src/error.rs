// SPDX-License-Identifier: MIT
//
// Gradient construction errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    #[error("gradient stop location {0} must be within 0.0..=1.0")]
    StopOutOfRange(f64),

    #[error("a gradient needs at least two stops, got {0}")]
    NotEnoughStops(usize),

    #[error("a text gradient needs at least two colors, got {0}")]
    NotEnoughColors(usize),

    #[error("gradient phase {0} must be within -1.0..=1.0")]
    PhaseOutOfRange(f64),

    #[error("unable to parse a color from `{0}`; use a color name or #RRGGBB")]
    UnknownColor(String),
}
