// SPDX-License-Identifier: MIT
//
// prism-text: styled text trees and their ANSI rendering.
//
// A `TextNode` carries content, an explicit `Style`, and children that
// inherit it. Rendering flattens the tree depth-first into (text, effective
// style) segments, resolves each style against a terminal `Profile`, and
// writes the text with the fewest SGR transitions that reproduce it.

pub mod error;
pub mod flatten;
pub mod node;
pub mod render;
pub mod style;

#[cfg(test)]
mod testing;

pub use error::{MalformedKind, MalformedTree, RenderError, StyleAttribute};
pub use node::{StyledNode, TextNode};
pub use render::{Renderer, render, render_at};
pub use style::{Decorations, Style, TextColor};
