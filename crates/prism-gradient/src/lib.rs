// SPDX-License-Identifier: MIT
//
// prism-gradient: color gradients for prism.
//
// A `Gradient<C>` is a sorted list of stops over any color type. A
// `Generator` pairs it with an `Interpolator` (RGB, HSV, OKLCH, or a closure)
// and samples colors at a location or in fixed steps. `TextGradient` spreads
// a gradient over the graphemes of a `prism_text::TextNode` tree.

pub mod error;
pub mod gradient;
pub mod interpolate;
pub mod stop;
pub mod text;

pub use error::GradientError;
pub use gradient::{Generator, Gradient, Steps};
pub use interpolate::{HsvLerp, Interpolator, OklchLerp, RgbLerp};
pub use stop::GradientStop;
pub use text::{GradientSpace, TextGradient};
