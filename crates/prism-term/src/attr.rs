// SPDX-License-Identifier: MIT
//
// Terminal-level text attributes and the fully resolved SGR style.
//
// `SgrStyle` is what the terminal is showing at a given moment: one
// foreground, one background, a set of attribute flags, and an underline
// style. Everything higher up (style inheritance, named colors, fallback
// policy) is resolved before a value of this type exists.

use crate::color::TermColor;

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// SGR attribute flags. Underline lives separately in [`UnderlineStyle`].
    ///
    /// ```
    /// use prism_term::attr::Attr;
    ///
    /// let style = Attr::BOLD | Attr::ITALIC;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1: increased intensity.
        const BOLD          = 1 << 0;
        /// SGR 2: decreased intensity (faint).
        const DIM           = 1 << 1;
        /// SGR 3: italic.
        const ITALIC        = 1 << 2;
        /// SGR 5: blink.
        const BLINK         = 1 << 3;
        /// SGR 7: swap foreground and background.
        const INVERSE       = 1 << 4;
        /// SGR 8: invisible text.
        const HIDDEN        = 1 << 5;
        /// SGR 9: crossed-out text.
        const STRIKETHROUGH = 1 << 6;
    }
}

// ─── Underline Style ─────────────────────────────────────────────────────────

/// Underline style.
///
/// `Straight` encodes as plain SGR 4 so every terminal understands it; the
/// other variants use the colon sub-parameter syntax (SGR 4:N) that only
/// modern terminals draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum UnderlineStyle {
    #[default]
    None,
    /// SGR 4.
    Straight,
    /// SGR 4:2.
    Double,
    /// SGR 4:3.
    Curly,
    /// SGR 4:4.
    Dotted,
    /// SGR 4:5.
    Dashed,
}

impl UnderlineStyle {
    #[inline]
    #[must_use]
    pub const fn is_underlined(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether this style needs colon-syntax support.
    #[inline]
    #[must_use]
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Double | Self::Curly | Self::Dotted | Self::Dashed)
    }
}

// ─── SgrStyle ────────────────────────────────────────────────────────────────

/// A fully resolved terminal style.
///
/// The default value is the terminal's reset state: default colors, no
/// attributes, no underline. That is what `ESC[0m` puts the terminal in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SgrStyle {
    pub fg: TermColor,
    pub bg: TermColor,
    pub attrs: Attr,
    pub underline: UnderlineStyle,
}

impl SgrStyle {
    /// The reset state.
    pub const RESET: Self = Self {
        fg: TermColor::Default,
        bg: TermColor::Default,
        attrs: Attr::empty(),
        underline: UnderlineStyle::None,
    };

    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: TermColor) -> Self {
        Self { fg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: TermColor) -> Self {
        Self { bg, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn with_underline(self, underline: UnderlineStyle) -> Self {
        Self { underline, ..self }
    }

    /// Whether this is the terminal's reset state.
    #[inline]
    #[must_use]
    pub fn is_reset(&self) -> bool {
        *self == Self::RESET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reset() {
        assert!(SgrStyle::default().is_reset());
        assert_eq!(SgrStyle::default(), SgrStyle::RESET);
    }

    #[test]
    fn builders_leave_other_fields() {
        let style = SgrStyle::RESET
            .with_fg(TermColor::Ansi256(1))
            .with_attrs(Attr::BOLD);
        assert_eq!(style.fg, TermColor::Ansi256(1));
        assert_eq!(style.bg, TermColor::Default);
        assert_eq!(style.attrs, Attr::BOLD);
        assert!(!style.is_reset());
    }

    #[test]
    fn underline_queries() {
        assert!(!UnderlineStyle::None.is_underlined());
        assert!(UnderlineStyle::Straight.is_underlined());
        assert!(!UnderlineStyle::Straight.is_extended());
        assert!(UnderlineStyle::Curly.is_extended());
        assert!(UnderlineStyle::Dashed.is_extended());
    }
}
