// SPDX-License-Identifier: MIT
//
// prism-term: the terminal side of prism.
//
// Color math (8-bit sRGB, HSV, OKLCH) and palette matching, the 16 named
// text colors, SGR escape encoding, the target terminal's profile, and a
// stateful writer that emits the fewest escape sequences needed to move
// from one style to the next.
//
// Nothing here knows about styled text trees. `prism-text` resolves a tree
// into runs of `SgrStyle` + text and hands them to `StyleWriter`.

pub mod ansi;
pub mod attr;
pub mod color;
pub mod named;
pub mod output;
pub mod profile;

pub use attr::{Attr, SgrStyle, UnderlineStyle};
pub use color::{Color, Hsv, Rgb, TermColor};
pub use named::NamedColor;
pub use output::StyleWriter;
pub use profile::{ColorLevel, Features, Fallback, Profile};
