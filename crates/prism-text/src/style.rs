// SPDX-License-Identifier: MIT
//
// Style intent for one text node.
//
// A `Style` only records what a node says explicitly. Colors are `Option`
// (unset means inherit), decorations are tri-state (on, off, or unset),
// and `merge_over` folds a node's style over its parent's effective style.
// After merging from the root, whatever is still unset means "terminal
// default".

use std::fmt;

use prism_term::{NamedColor, Rgb, UnderlineStyle};

// ─── TextColor ───────────────────────────────────────────────────────────────

/// A text color: one of the 16 named colors or an arbitrary RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    Named(NamedColor),
    Rgb(Rgb),
}

impl TextColor {
    /// Parse a color name (`"gold"`, `"grey"`) or hex value (`"#ffaa00"`,
    /// `"#fa0"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Rgb::hex(s).map(Self::Rgb);
        }
        NamedColor::from_name(s).map(Self::Named)
    }

    /// The 8-bit sRGB value, resolving names to their fixed RGB.
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Named(named) => named.rgb(),
            Self::Rgb(rgb) => rgb,
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => write!(f, "{named}"),
            Self::Rgb(rgb) => write!(f, "{rgb}"),
        }
    }
}

impl From<NamedColor> for TextColor {
    fn from(named: NamedColor) -> Self {
        Self::Named(named)
    }
}

impl From<Rgb> for TextColor {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

// ─── Decorations ─────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text decorations.
    ///
    /// `OBFUSCATED` (scrambled glyphs) is part of the text model but no
    /// terminal draws it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Decorations: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINED    = 1 << 3;
        const STRIKETHROUGH = 1 << 4;
        const BLINK         = 1 << 5;
        const INVERSE       = 1 << 6;
        const HIDDEN        = 1 << 7;
        const OBFUSCATED    = 1 << 8;
    }
}

impl Decorations {
    /// Lowercase name of a single flag, for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        const NAMES: [(Decorations, &str); 9] = [
            (Decorations::BOLD, "bold"),
            (Decorations::DIM, "dim"),
            (Decorations::ITALIC, "italic"),
            (Decorations::UNDERLINED, "underlined"),
            (Decorations::STRIKETHROUGH, "strikethrough"),
            (Decorations::BLINK, "blink"),
            (Decorations::INVERSE, "inverse"),
            (Decorations::HIDDEN, "hidden"),
            (Decorations::OBFUSCATED, "obfuscated"),
        ];
        NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map_or("decorations", |(_, name)| name)
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Explicit style attributes of a node.
///
/// ```
/// use prism_text::style::{Decorations, Style, TextColor};
/// use prism_term::NamedColor;
///
/// let parent = Style::new().bold().color(NamedColor::Red);
/// let child = Style::new().without(Decorations::BOLD);
///
/// let effective = child.merge_over(&parent);
/// assert_eq!(effective.decoration(Decorations::BOLD), Some(false));
/// assert_eq!(effective.color, Some(TextColor::Named(NamedColor::Red)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground. `None` inherits.
    pub color: Option<TextColor>,
    /// Background. `None` inherits.
    pub background: Option<TextColor>,
    /// Shape of the underline when `UNDERLINED` is on. `None` inherits,
    /// and a fully unset underline style draws straight.
    pub underline_style: Option<UnderlineStyle>,
    on: Decorations,
    off: Decorations,
}

impl Style {
    /// A style that sets nothing and inherits everything.
    pub const EMPTY: Self = Self::new();

    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: None,
            background: None,
            underline_style: None,
            on: Decorations::empty(),
            off: Decorations::empty(),
        }
    }

    // ─── Builders ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn color(self, color: impl Into<TextColor>) -> Self {
        Self {
            color: Some(color.into()),
            ..self
        }
    }

    #[must_use]
    pub fn background(self, color: impl Into<TextColor>) -> Self {
        Self {
            background: Some(color.into()),
            ..self
        }
    }

    #[must_use]
    pub const fn underline_style(self, style: UnderlineStyle) -> Self {
        Self {
            underline_style: Some(style),
            ..self
        }
    }

    /// Explicitly turn decorations on.
    #[must_use]
    pub const fn with(self, decorations: Decorations) -> Self {
        Self {
            on: self.on.union(decorations),
            off: self.off.difference(decorations),
            ..self
        }
    }

    /// Explicitly turn decorations off, overriding what a parent set.
    #[must_use]
    pub const fn without(self, decorations: Decorations) -> Self {
        Self {
            on: self.on.difference(decorations),
            off: self.off.union(decorations),
            ..self
        }
    }

    /// Forget any explicit setting for these decorations, so they inherit.
    #[must_use]
    pub const fn inherit(self, decorations: Decorations) -> Self {
        Self {
            on: self.on.difference(decorations),
            off: self.off.difference(decorations),
            ..self
        }
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        self.with(Decorations::BOLD)
    }

    #[must_use]
    pub const fn italic(self) -> Self {
        self.with(Decorations::ITALIC)
    }

    #[must_use]
    pub const fn underlined(self) -> Self {
        self.with(Decorations::UNDERLINED)
    }

    #[must_use]
    pub const fn strikethrough(self) -> Self {
        self.with(Decorations::STRIKETHROUGH)
    }

    // ─── Queries ──────────────────────────────────────────────────────────

    /// Tri-state lookup of a single decoration.
    #[must_use]
    pub const fn decoration(&self, decoration: Decorations) -> Option<bool> {
        if self.on.contains(decoration) {
            Some(true)
        } else if self.off.contains(decoration) {
            Some(false)
        } else {
            None
        }
    }

    /// Decorations explicitly on.
    #[inline]
    #[must_use]
    pub const fn decorations(&self) -> Decorations {
        self.on
    }

    /// Decorations explicitly off.
    #[inline]
    #[must_use]
    pub const fn removed_decorations(&self) -> Decorations {
        self.off
    }

    /// Whether the style sets nothing at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.background.is_none()
            && self.underline_style.is_none()
            && self.on.is_empty()
            && self.off.is_empty()
    }

    // ─── Inheritance ──────────────────────────────────────────────────────

    /// This style's explicit attributes laid over `parent`.
    ///
    /// Per attribute, the nearest explicit value wins: a child's color
    /// replaces the parent's, a child's "off" cancels the parent's "on".
    #[must_use]
    pub const fn merge_over(&self, parent: &Self) -> Self {
        let color = match self.color {
            Some(c) => Some(c),
            None => parent.color,
        };
        let background = match self.background {
            Some(c) => Some(c),
            None => parent.background,
        };
        let underline_style = match self.underline_style {
            Some(u) => Some(u),
            None => parent.underline_style,
        };
        Self {
            color,
            background,
            underline_style,
            on: parent.on.difference(self.off).union(self.on),
            off: parent.off.difference(self.on).union(self.off),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_style_merges_to_parent() {
        let parent = Style::new().italic().color(NamedColor::Gold);
        assert_eq!(Style::EMPTY.merge_over(&parent), parent);
        assert!(Style::new().is_empty());
        assert!(!parent.is_empty());
    }

    #[test]
    fn child_color_wins() {
        let parent = Style::new().color(NamedColor::Red).background(NamedColor::Black);
        let child = Style::new().color(Rgb::new(1, 2, 3));
        let merged = child.merge_over(&parent);
        assert_eq!(merged.color, Some(TextColor::Rgb(Rgb::new(1, 2, 3))));
        assert_eq!(merged.background, Some(TextColor::Named(NamedColor::Black)));
    }

    #[test]
    fn decorations_are_tri_state() {
        let style = Style::new().bold().without(Decorations::ITALIC);
        assert_eq!(style.decoration(Decorations::BOLD), Some(true));
        assert_eq!(style.decoration(Decorations::ITALIC), Some(false));
        assert_eq!(style.decoration(Decorations::DIM), None);

        let cleared = style.inherit(Decorations::BOLD | Decorations::ITALIC);
        assert!(cleared.is_empty());
    }

    #[test]
    fn child_off_cancels_parent_on() {
        let parent = Style::new().bold().italic();
        let child = Style::new().without(Decorations::BOLD);
        let merged = child.merge_over(&parent);
        assert_eq!(merged.decorations(), Decorations::ITALIC);
        assert_eq!(merged.decoration(Decorations::BOLD), Some(false));
    }

    #[test]
    fn child_on_cancels_parent_off() {
        let parent = Style::new().without(Decorations::UNDERLINED);
        let merged = Style::new().underlined().merge_over(&parent);
        assert_eq!(merged.decoration(Decorations::UNDERLINED), Some(true));
        assert!(merged.removed_decorations().is_empty());
    }

    #[test]
    fn merge_is_nearest_wins_across_levels() {
        let root = Style::new().color(NamedColor::Red).bold();
        let mid = Style::new().color(NamedColor::Blue).merge_over(&root);
        let leaf = Style::new().merge_over(&mid);
        assert_eq!(leaf.color, Some(TextColor::Named(NamedColor::Blue)));
        assert_eq!(leaf.decoration(Decorations::BOLD), Some(true));
    }

    #[test]
    fn underline_style_inherits() {
        let parent = Style::new().underlined().underline_style(UnderlineStyle::Curly);
        let merged = Style::new().merge_over(&parent);
        assert_eq!(merged.underline_style, Some(UnderlineStyle::Curly));
    }

    #[test]
    fn parse_names_and_hex() {
        assert_eq!(TextColor::parse("gold"), Some(TextColor::Named(NamedColor::Gold)));
        assert_eq!(TextColor::parse("grey"), Some(TextColor::Named(NamedColor::Gray)));
        assert_eq!(
            TextColor::parse("#25f9d2"),
            Some(TextColor::Rgb(Rgb::new(0x25, 0xf9, 0xd2)))
        );
        assert_eq!(TextColor::parse("#zzz"), None);
        assert_eq!(TextColor::parse("chartreuse"), None);
    }

    #[test]
    fn named_rgb_resolves() {
        assert_eq!(TextColor::Named(NamedColor::Aqua).rgb(), Rgb::new(0x55, 0xff, 0xff));
    }

    #[test]
    fn decoration_names() {
        assert_eq!(Decorations::OBFUSCATED.name(), "obfuscated");
        assert_eq!(Decorations::BOLD.name(), "bold");
    }
}
