// SPDX-License-Identifier: MIT
//
// SGR escape sequence encoding.
//
// Pure encoding, no state and no decisions about when to emit; that is the
// `StyleWriter`'s job. Parameters accumulate in an `Sgr` and go out as one
// CSI sequence, so `bold + red` is `ESC[1;31m`, never `ESC[1mESC[31m`.
//
// Everything writes to `impl fmt::Write` because the renderer produces a
// `String`. Writing into a `String` cannot fail, but the `fmt::Result` is
// still propagated so other sinks work too.

use std::fmt::{self, Write};

use crate::attr::{Attr, SgrStyle, UnderlineStyle};
use crate::color::TermColor;

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// The full reset sequence (SGR 0).
pub const RESET: &str = "\x1b[0m";

// ─── Sgr ─────────────────────────────────────────────────────────────────────

/// Accumulates SGR parameters for a single `CSI … m` sequence.
///
/// ```
/// use prism_term::ansi::Sgr;
/// use prism_term::attr::Attr;
/// use prism_term::color::TermColor;
///
/// let mut sgr = Sgr::new();
/// sgr.attrs(Attr::BOLD);
/// sgr.fg(TermColor::Ansi256(1));
///
/// let mut out = String::new();
/// sgr.write_to(&mut out).unwrap();
/// assert_eq!(out, "\x1b[1;31m");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sgr {
    params: String,
}

impl Sgr {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            params: String::new(),
        }
    }

    /// Whether no parameters have been added.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The `;`-joined parameter list, without the CSI or final `m`.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &str {
        &self.params
    }

    fn sep(&mut self) {
        if !self.params.is_empty() {
            self.params.push(';');
        }
    }

    /// Append one raw parameter.
    pub fn push(&mut self, param: impl fmt::Display) {
        self.sep();
        // Writing to a String cannot fail.
        let _ = write!(self.params, "{param}");
    }

    /// SGR 0.
    pub fn reset(&mut self) {
        self.push(0);
    }

    /// Attribute flags, in ascending SGR order.
    pub fn attrs(&mut self, attr: Attr) {
        const CODES: [(Attr, u8); 7] = [
            (Attr::BOLD, 1),
            (Attr::DIM, 2),
            (Attr::ITALIC, 3),
            (Attr::BLINK, 5),
            (Attr::INVERSE, 7),
            (Attr::HIDDEN, 8),
            (Attr::STRIKETHROUGH, 9),
        ];
        for (flag, code) in CODES {
            if attr.contains(flag) {
                self.push(code);
            }
        }
    }

    /// Underline style. `None` emits SGR 24 (underline off).
    pub fn underline(&mut self, style: UnderlineStyle) {
        match style {
            UnderlineStyle::None => self.push(24),
            UnderlineStyle::Straight => self.push(4),
            UnderlineStyle::Double => self.push("4:2"),
            UnderlineStyle::Curly => self.push("4:3"),
            UnderlineStyle::Dotted => self.push("4:4"),
            UnderlineStyle::Dashed => self.push("4:5"),
        }
    }

    /// Foreground color: 30–37, 90–97, 38;5;N, 38;2;R;G;B, or 39.
    pub fn fg(&mut self, color: TermColor) {
        self.color(color, 30, 90, 38, 39);
    }

    /// Background color: 40–47, 100–107, 48;5;N, 48;2;R;G;B, or 49.
    pub fn bg(&mut self, color: TermColor) {
        self.color(color, 40, 100, 48, 49);
    }

    fn color(&mut self, color: TermColor, base: u16, bright: u16, extended: u16, default: u16) {
        match color {
            TermColor::Default => self.push(default),
            TermColor::Ansi256(idx) if idx < 8 => self.push(base + u16::from(idx)),
            TermColor::Ansi256(idx) if idx < 16 => self.push(bright + u16::from(idx - 8)),
            TermColor::Ansi256(idx) => self.push(format_args!("{extended};5;{idx}")),
            TermColor::Rgb(r, g, b) => self.push(format_args!("{extended};2;{r};{g};{b}")),
        }
    }

    /// Every parameter needed to reach `style` from the reset state.
    pub fn style(&mut self, style: &SgrStyle) {
        self.attrs(style.attrs);
        if style.underline.is_underlined() {
            self.underline(style.underline);
        }
        if !style.fg.is_default() {
            self.fg(style.fg);
        }
        if !style.bg.is_default() {
            self.bg(style.bg);
        }
    }

    /// Write `CSI params m`. Writes nothing if no parameters were added.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_to(&self, w: &mut impl Write) -> fmt::Result {
        if self.params.is_empty() {
            return Ok(());
        }
        w.write_str(CSI)?;
        w.write_str(&self.params)?;
        w.write_char('m')
    }
}

// ─── One-shot Sequences ──────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
#[inline]
pub fn reset(w: &mut impl Write) -> fmt::Result {
    w.write_str(RESET)
}

// ─── Stripping ───────────────────────────────────────────────────────────────

/// Remove escape sequences, leaving only the visible text.
///
/// Handles CSI sequences (`ESC [` … final byte `@`–`~`), OSC sequences
/// (`ESC ]` … `BEL` or `ESC \`), and two-byte escapes. An unterminated
/// sequence at the end of input is dropped.
#[must_use]
pub fn strip(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            // Two-byte escape (or a lone ESC at end of input).
            _ => {}
        }
    }

    out
}

/// Count the CSI sequences in `s`.
#[must_use]
pub fn count_sequences(s: &str) -> usize {
    s.matches(CSI).count()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
