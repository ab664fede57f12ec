// SPDX-License-Identifier: MIT
//
// Stateful styled-text output.
//
// `StyleWriter` remembers the style the terminal is currently showing and
// emits only what it takes to get from there to the next run's style. Two
// runs in the same style produce one escape sequence, not two. A run in the
// style already active produces none.
//
// Every transition is a single CSI sequence:
//
//   - attributes only added, colors or underline changed: just the delta,
//     e.g. `ESC[1;39m` for "add bold, foreground back to default"
//   - any attribute removed: `0` followed by the whole target style, since
//     SGR has no portable "bold off" that leaves dim alone
//
// Nothing is emitted for empty text. The style stays pending until there is
// something visible to apply it to.

use std::fmt::{self, Write};

use crate::ansi::{self, Sgr};
use crate::attr::SgrStyle;

// ─── StyleWriter ─────────────────────────────────────────────────────────────

/// Tracks the active terminal style and writes minimal transitions.
#[derive(Debug, Clone, Default)]
pub struct StyleWriter {
    active: SgrStyle,
    transitions: usize,
}

impl StyleWriter {
    /// A writer whose terminal is in the reset state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: SgrStyle::RESET,
            transitions: 0,
        }
    }

    /// The style the terminal is showing right now.
    #[inline]
    #[must_use]
    pub const fn active(&self) -> SgrStyle {
        self.active
    }

    /// How many escape sequences this writer has emitted, final reset included.
    #[inline]
    #[must_use]
    pub const fn transitions(&self) -> usize {
        self.transitions
    }

    /// Build the parameters that move the terminal from the active style to
    /// `target`. Empty when they are equal.
    #[must_use]
    pub fn transition_params(&self, target: &SgrStyle) -> Sgr {
        let mut sgr = Sgr::new();
        let from = self.active;
        if from == *target {
            return sgr;
        }

        if !from.attrs.difference(target.attrs).is_empty() {
            sgr.reset();
            sgr.style(target);
            return sgr;
        }

        sgr.attrs(target.attrs.difference(from.attrs));
        if from.underline != target.underline {
            sgr.underline(target.underline);
        }
        if from.fg != target.fg {
            sgr.fg(target.fg);
        }
        if from.bg != target.bg {
            sgr.bg(target.bg);
        }
        sgr
    }

    /// Move the terminal to `target`, writing at most one escape sequence.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn transition(&mut self, out: &mut impl Write, target: &SgrStyle) -> fmt::Result {
        let sgr = self.transition_params(target);
        if !sgr.is_empty() {
            log::trace!("sgr transition {:?} -> {:?}: {}", self.active, target, sgr.params());
            sgr.write_to(out)?;
            self.transitions += 1;
        }
        self.active = *target;
        Ok(())
    }

    /// Write `text` in `style`. Empty text writes nothing and leaves the
    /// active style untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_styled(&mut self, out: &mut impl Write, style: &SgrStyle, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        self.transition(out, style)?;
        out.write_str(text)
    }

    /// Return the terminal to the reset state if anything is still active.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn finish(&mut self, out: &mut impl Write) -> fmt::Result {
        if !self.active.is_reset() {
            ansi::reset(out)?;
            self.transitions += 1;
            self.active = SgrStyle::RESET;
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
