// SPDX-License-Identifier: MIT
//
// Styled tree → ANSI string.
//
// The renderer is three small pieces in a row. `Segments` produces each
// node's content with its effective `Style`; `resolve` turns that style into
// the `SgrStyle` the target terminal can actually show, applying the
// profile's fallback policy; `StyleWriter` emits the one escape sequence
// needed to get there before the text. Empty content is skipped before
// resolving, so containers never cost an escape (or an error).

use log::{debug, trace};
use prism_term::{
    Attr, ColorLevel, Features, Profile, SgrStyle, StyleWriter, TermColor, UnderlineStyle,
};

use crate::error::{RenderError, StyleAttribute};
use crate::flatten::segments;
use crate::node::{StyledNode, TextNode};
use crate::style::{Decorations, Style, TextColor};

/// Decorations that map one-to-one onto an SGR attribute.
const SIMPLE_DECORATIONS: [(Decorations, Features, Attr); 7] = [
    (Decorations::BOLD, Features::BOLD, Attr::BOLD),
    (Decorations::DIM, Features::DIM, Attr::DIM),
    (Decorations::ITALIC, Features::ITALIC, Attr::ITALIC),
    (Decorations::BLINK, Features::BLINK, Attr::BLINK),
    (Decorations::INVERSE, Features::INVERSE, Attr::INVERSE),
    (Decorations::HIDDEN, Features::HIDDEN, Attr::HIDDEN),
    (Decorations::STRIKETHROUGH, Features::STRIKETHROUGH, Attr::STRIKETHROUGH),
];

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Renders styled trees for one terminal profile.
///
/// A `Renderer` holds no per-render state, so one instance can serve any
/// number of threads at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    profile: Profile,
}

impl Renderer {
    #[must_use]
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }

    #[inline]
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Render `root` to a string of text and SGR sequences.
    ///
    /// The output ends with `ESC[0m` unless it is plain text.
    ///
    /// # Errors
    ///
    /// - [`RenderError::MalformedTree`] on a cycle or nesting beyond the
    ///   profile's `max_depth`.
    /// - [`RenderError::UnsupportedStyle`] under a strict profile when some
    ///   non-empty content asks for something the terminal can't display.
    pub fn render<N: StyledNode>(&self, root: &N) -> Result<String, RenderError> {
        debug!(
            "render: color level {}, fallback {:?}",
            self.profile.color_level(),
            self.profile.fallback()
        );

        let mut out = String::new();
        let mut writer = StyleWriter::new();
        let mut cached: Option<(Style, SgrStyle)> = None;

        for segment in segments(root, self.profile.max_depth()) {
            let segment = segment?;
            if segment.text.is_empty() {
                continue;
            }
            let sgr = match cached {
                Some((style, sgr)) if style == segment.style => sgr,
                _ => {
                    let sgr = self.resolve(&segment.style)?;
                    cached = Some((segment.style, sgr));
                    sgr
                }
            };
            writer.write_styled(&mut out, &sgr, segment.text)?;
        }
        writer.finish(&mut out)?;

        debug!(
            "render: {} bytes, {} escape sequences",
            out.len(),
            writer.transitions()
        );
        Ok(out)
    }

    /// Map an effective style onto what the profile's terminal can show.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnsupportedStyle`] under a strict profile. A
    /// downgrading profile approximates or drops instead.
    pub fn resolve(&self, style: &Style) -> Result<SgrStyle, RenderError> {
        let decorations = style.decorations();
        let mut attrs = Attr::empty();

        for (decoration, feature, attr) in SIMPLE_DECORATIONS {
            if !decorations.contains(decoration) {
                continue;
            }
            if self.profile.supports(feature) {
                attrs |= attr;
            } else {
                self.unsupported(StyleAttribute::Decoration(decoration))?;
            }
        }

        if decorations.contains(Decorations::OBFUSCATED) {
            self.unsupported(StyleAttribute::Decoration(Decorations::OBFUSCATED))?;
        }

        let underline = if decorations.contains(Decorations::UNDERLINED) {
            self.resolve_underline(style.underline_style.unwrap_or(UnderlineStyle::Straight))?
        } else {
            UnderlineStyle::None
        };

        let fg = match style.color {
            Some(color) => self.resolve_color(color, StyleAttribute::Foreground(color))?,
            None => TermColor::Default,
        };
        let bg = match style.background {
            Some(color) => self.resolve_color(color, StyleAttribute::Background(color))?,
            None => TermColor::Default,
        };

        Ok(SgrStyle {
            fg,
            bg,
            attrs,
            underline,
        })
    }

    fn resolve_underline(&self, requested: UnderlineStyle) -> Result<UnderlineStyle, RenderError> {
        if !requested.is_underlined() {
            return Ok(UnderlineStyle::None);
        }
        if !self.profile.supports(Features::UNDERLINE) {
            self.unsupported(StyleAttribute::Decoration(Decorations::UNDERLINED))?;
            return Ok(UnderlineStyle::None);
        }
        if requested.is_extended() && !self.profile.supports(Features::EXTENDED_UNDERLINE) {
            self.unsupported(StyleAttribute::Underline(requested))?;
            return Ok(UnderlineStyle::Straight);
        }
        Ok(requested)
    }

    fn resolve_color(
        &self,
        color: TextColor,
        attribute: StyleAttribute,
    ) -> Result<TermColor, RenderError> {
        let level = self.profile.color_level();
        let resolved = match color {
            TextColor::Named(named) => named.to_term(level),
            TextColor::Rgb(rgb) => TermColor::from(rgb).downgrade(level),
        };
        match resolved {
            Some(term) => Ok(term),
            None => {
                self.unsupported(attribute)?;
                Ok(TermColor::Default)
            }
        }
    }

    /// Fail under a strict profile; otherwise note the drop and carry on.
    fn unsupported(&self, attribute: StyleAttribute) -> Result<(), RenderError> {
        let level = self.profile.color_level();
        if self.profile.is_strict() {
            return Err(RenderError::UnsupportedStyle { attribute, level });
        }
        trace!("dropping {attribute} (color level {level})");
        Ok(())
    }
}

/// Render with the default profile: `TrueColor`, standard decorations,
/// downgrade fallback.
///
/// ```
/// use prism_text::{render, Style, TextNode};
///
/// let tree = TextNode::styled("A", Style::new().bold()).child("b");
/// assert_eq!(render(&tree).unwrap(), "\x1b[1mAb\x1b[0m");
/// ```
///
/// # Errors
///
/// See [`Renderer::render`].
pub fn render(root: &TextNode) -> Result<String, RenderError> {
    Renderer::default().render(root)
}

/// Render for an explicit color level with otherwise default settings.
///
/// # Errors
///
/// See [`Renderer::render`].
pub fn render_at(root: &TextNode, level: ColorLevel) -> Result<String, RenderError> {
    Renderer::new(Profile::new().with_color_level(level)).render(root)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
