// SPDX-License-Identifier: MIT
//
// Render errors.

use std::fmt;

use prism_term::{ColorLevel, UnderlineStyle};
use thiserror::Error;

use crate::style::{Decorations, TextColor};

/// A style attribute the target terminal cannot display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleAttribute {
    Decoration(Decorations),
    Underline(UnderlineStyle),
    Foreground(TextColor),
    Background(TextColor),
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoration(d) => write!(f, "decoration `{}`", d.name()),
            Self::Underline(u) => write!(f, "underline style {u:?}"),
            Self::Foreground(c) => write!(f, "foreground color {c}"),
            Self::Background(c) => write!(f, "background color {c}"),
        }
    }
}

/// Why a tree could not be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// A node is among its own ancestors.
    Cycle,
    /// Nesting went past the profile's depth limit.
    TooDeep { max_depth: usize },
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle => f.write_str("cycle"),
            Self::TooDeep { max_depth } => write!(f, "nesting deeper than {max_depth}"),
        }
    }
}

/// The tree is not a finite tree of bounded depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed text tree: {kind} at depth {depth}")]
pub struct MalformedTree {
    pub kind: MalformedKind,
    /// Depth of the offending node; the root is depth 0.
    pub depth: usize,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{attribute} has no ANSI equivalent on a terminal with color level {level}")]
    UnsupportedStyle {
        attribute: StyleAttribute,
        level: ColorLevel,
    },

    #[error(transparent)]
    MalformedTree(#[from] MalformedTree),

    #[error("writing render output failed")]
    Fmt(#[from] fmt::Error),
}
