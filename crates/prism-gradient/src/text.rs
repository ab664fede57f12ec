// SPDX-License-Identifier: MIT
//
// Text gradients: color every grapheme of a styled tree across a gradient.
//
// The gradient is laid over the whole tree's visible text at once. With N
// colors and G graphemes, grapheme `i` sits at color position
// `i * (N - 1) / (G - 1)` plus the phase offset, so the first grapheme gets
// the first color and the last grapheme the last. Positions that run past
// the last color reflect back toward the first, which keeps a phase shift
// smooth instead of piling the tail onto one color.
//
// A node that already has a color keeps it, along with its whole subtree.
// Its graphemes still count, so the gradient resumes after it where it
// would have been anyway.

use std::sync::Arc;

use log::debug;
use prism_term::{Color, Hsv, Rgb};
use prism_text::{Style, TextColor, TextNode};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::GradientError;
use crate::gradient::Gradient;
use crate::interpolate::{HsvLerp, OklchLerp, RgbLerp};

/// Color space the text gradient blends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GradientSpace {
    /// Per-channel sRGB.
    Rgb,
    /// Hue, saturation, value.
    #[default]
    Hsv,
    /// Perceptual OKLCH.
    Oklch,
}

impl GradientSpace {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Some(Self::Rgb),
            "hsv" => Some(Self::Hsv),
            "oklch" => Some(Self::Oklch),
            _ => None,
        }
    }
}

// ─── TextGradient ────────────────────────────────────────────────────────────

/// A gradient to spread across styled text.
///
/// ```
/// use prism_gradient::{GradientSpace, TextGradient};
/// use prism_text::{TextColor, TextNode, flatten::plain_text};
/// use prism_term::NamedColor;
///
/// let colors = vec![TextColor::Named(NamedColor::Red), TextColor::Named(NamedColor::Aqua)];
/// let gradient = TextGradient::new(colors, 0.0, GradientSpace::Rgb).unwrap();
///
/// let colored = gradient.apply(&TextNode::text("hello"));
/// assert_eq!(plain_text(&colored).unwrap(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextGradient {
    colors: Vec<TextColor>,
    /// `colors` resolved to sRGB, evenly spaced.
    stops: Gradient<Rgb>,
    phase: f64,
    space: GradientSpace,
}

impl TextGradient {
    /// A text gradient over `colors`.
    ///
    /// No colors means white to black. A negative phase runs the colors in
    /// reverse, shifted by `1 + phase`.
    ///
    /// # Errors
    ///
    /// - [`GradientError::NotEnoughColors`] for exactly one color.
    /// - [`GradientError::PhaseOutOfRange`] unless `phase` is within
    ///   `-1.0..=1.0`.
    pub fn new(colors: Vec<TextColor>, phase: f64, space: GradientSpace) -> Result<Self, GradientError> {
        if !(-1.0..=1.0).contains(&phase) {
            return Err(GradientError::PhaseOutOfRange(phase));
        }
        let mut colors = match colors.len() {
            0 => vec![
                TextColor::Rgb(Rgb::new(0xff, 0xff, 0xff)),
                TextColor::Rgb(Rgb::new(0x00, 0x00, 0x00)),
            ],
            1 => return Err(GradientError::NotEnoughColors(1)),
            _ => colors,
        };
        let phase = if phase < 0.0 {
            colors.reverse();
            1.0 + phase
        } else {
            phase
        };
        let stops = Gradient::evenly_spaced(colors.iter().map(|c| c.rgb()))?;
        Ok(Self {
            colors,
            stops,
            phase,
            space,
        })
    }

    /// Parse gradient arguments: color names or hex values, optionally
    /// followed by a numeric phase, e.g. `["red", "#00ff00", "0.5"]`.
    ///
    /// Only the last argument may be a phase. Blends in HSV; use
    /// [`with_space`](Self::with_space) for another space.
    ///
    /// # Errors
    ///
    /// [`GradientError::UnknownColor`] for an argument that is neither a
    /// color nor a trailing phase, and any error from [`new`](Self::new).
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, GradientError> {
        let trailing_phase = args
            .split_last()
            .and_then(|(last, rest)| Some((rest, last.as_ref().trim().parse::<f64>().ok()?)));
        let (color_args, phase) = trailing_phase.unwrap_or((args, 0.0));

        let colors = color_args
            .iter()
            .map(|arg| {
                let arg = arg.as_ref();
                TextColor::parse(arg).ok_or_else(|| GradientError::UnknownColor(arg.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(colors, phase, GradientSpace::default())
    }

    #[must_use]
    pub fn with_space(mut self, space: GradientSpace) -> Self {
        self.space = space;
        self
    }

    /// The colors in gradient order, after any reversal by a negative phase.
    #[must_use]
    pub fn colors(&self) -> &[TextColor] {
        &self.colors
    }

    /// The normalized phase, within `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    #[must_use]
    pub const fn space(&self) -> GradientSpace {
        self.space
    }

    /// The color of grapheme `index` out of `total`.
    #[must_use]
    pub fn color_for(&self, index: usize, total: usize) -> Rgb {
        Painter::new(self, total).color_at(index)
    }

    /// A copy of `root` where every grapheme of un-colored text carries its
    /// own gradient color.
    ///
    /// Nesting depth does not grow below the root. A node's leading graphemes
    /// become colored siblings placed just before it, and the node keeps its
    /// last grapheme and its children. The root keeps its first grapheme and
    /// takes the rest as its first children.
    #[must_use]
    pub fn apply(&self, root: &TextNode) -> TextNode {
        let total = grapheme_count(root);
        debug!(
            "text gradient: {} colors in {:?} over {total} graphemes, phase {}",
            self.colors.len(),
            self.space,
            self.phase
        );

        if root.style().color.is_some() {
            return root.clone();
        }

        let mut painter = Painter::new(self, total);
        let mut top = Frame {
            source: root,
            built: painter.paint_root(root),
            next_child: 0,
        };
        let mut stack: Vec<Frame<'_>> = Vec::new();

        loop {
            let frame = stack.last_mut().unwrap_or(&mut top);
            let source = frame.source;
            let Some(child) = source.children().get(frame.next_child) else {
                let Some(done) = stack.pop() else {
                    return top.built;
                };
                let parent = stack.last_mut().unwrap_or(&mut top);
                parent.built.push_child(Arc::new(done.built));
                continue;
            };
            frame.next_child += 1;

            if child.style().color.is_some() {
                painter.skip(grapheme_count(child));
                frame.built.push_child(Arc::clone(child));
            } else {
                let built = painter.paint(child, &mut frame.built);
                stack.push(Frame {
                    source: child,
                    built,
                    next_child: 0,
                });
            }
        }
    }
}

// ─── Painting ────────────────────────────────────────────────────────────────

/// A source node being rebuilt, and how many of its children are done.
struct Frame<'a> {
    source: &'a TextNode,
    built: TextNode,
    next_child: usize,
}

/// The gradient resolved into one color space.
enum Ramp {
    Rgb(Gradient<Rgb>),
    Hsv(Gradient<Hsv>),
    Oklch(Gradient<Color>),
}

impl Ramp {
    fn new(stops: &Gradient<Rgb>, space: GradientSpace) -> Self {
        match space {
            GradientSpace::Rgb => Self::Rgb(stops.clone()),
            GradientSpace::Hsv => Self::Hsv(stops.map(|rgb| Hsv::from_rgb(*rgb))),
            GradientSpace::Oklch => Self::Oklch(stops.map(|rgb| Color::from_rgb(*rgb))),
        }
    }

    fn sample(&self, location: f64) -> Rgb {
        match self {
            Self::Rgb(g) => g.generator(0, RgbLerp).color_at(location),
            Self::Hsv(g) => g.generator(0, HsvLerp).color_at(location).to_rgb(),
            Self::Oklch(g) => g.generator(0, OklchLerp).color_at(location).to_gamut().to_rgb(),
        }
    }
}

/// Walks the gradient one grapheme at a time.
struct Painter {
    ramp: Ramp,
    /// Color-index units per grapheme.
    multiplier: f64,
    /// Phase in color-index units.
    offset: f64,
    /// Highest color index, `colors - 1`.
    span: f64,
    index: usize,
}

impl Painter {
    #[allow(clippy::cast_precision_loss)] // grapheme and color counts fit in f64
    fn new(gradient: &TextGradient, total: usize) -> Self {
        let span = (gradient.colors.len() - 1) as f64;
        let multiplier = if total <= 1 { 0.0 } else { span / (total - 1) as f64 };
        Self {
            ramp: Ramp::new(&gradient.stops, gradient.space),
            multiplier,
            offset: gradient.phase * span,
            span,
            index: 0,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn color_at(&self, index: usize) -> Rgb {
        let position = (index as f64).mul_add(self.multiplier, self.offset);
        let period = 2.0 * self.span;
        let mut reflected = position.rem_euclid(period);
        if reflected > self.span {
            reflected = period - reflected;
        }
        self.ramp.sample(reflected / self.span)
    }

    fn next_color(&mut self) -> Rgb {
        let color = self.color_at(self.index);
        self.index += 1;
        color
    }

    fn skip(&mut self, graphemes: usize) {
        self.index += graphemes;
    }

    /// The root without its children: its first grapheme colored in place,
    /// the rest as colored children.
    fn paint_root(&mut self, root: &TextNode) -> TextNode {
        let mut graphemes = root.content().graphemes(true);
        let Some(first) = graphemes.next() else {
            return TextNode::container(*root.style());
        };
        let mut painted = TextNode::styled(first, root.style().color(self.next_color()));
        for grapheme in graphemes {
            let color = self.next_color();
            painted.push_child(Arc::new(TextNode::styled(grapheme, Style::new().color(color))));
        }
        painted
    }

    /// `node` without its children, holding only its last grapheme. The
    /// graphemes before it go to `parent` as siblings with the same style.
    fn paint(&mut self, node: &TextNode, parent: &mut TextNode) -> TextNode {
        let style = *node.style();
        let mut graphemes = node.content().graphemes(true).peekable();
        while let Some(grapheme) = graphemes.next() {
            let color = self.next_color();
            if graphemes.peek().is_none() {
                return TextNode::styled(grapheme, style.color(color));
            }
            parent.push_child(Arc::new(TextNode::styled(grapheme, style.color(color))));
        }
        TextNode::container(style)
    }
}

/// Graphemes in a subtree's visible text.
fn grapheme_count(root: &TextNode) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        count += node.content().graphemes(true).count();
        stack.extend(node.children().iter().map(AsRef::as_ref));
    }
    count
}
