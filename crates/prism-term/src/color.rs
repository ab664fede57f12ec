// SPDX-License-Identifier: MIT
//
// prism-term color system: three color models and the terminal bridge.
//
// Single-character variable names (r, g, b, l, c, h, s, v) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Text styling speaks 8-bit sRGB (`Rgb`), gradients want to interpolate in
// whichever space looks right for the job (`Rgb`, `Hsv`, or perceptual
// `Color` in OKLCH), and the terminal only understands what its color level
// allows (`TermColor`). This module owns the conversions between all four.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB (Rgb) ↔ HSV
//                                   │
//                                   ▼
//                   TermColor (TrueColor / ANSI-256 / ANSI-16)

use std::fmt;

use crate::profile::ColorLevel;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color. The storage format for text colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// `#rrggbb`, lowercase.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear interpolation in gamma-encoded sRGB.
    ///
    /// `t` is clamped to 0.0–1.0; channels round to the nearest integer.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let a = f64::from(a);
            let b = f64::from(b);
            unit_to_u8((b - a).mul_add(t, a) / 255.0)
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// The nearest ANSI-256 palette index (perceptual distance).
    #[must_use]
    pub fn nearest_ansi256(self) -> u8 {
        palette::nearest_ansi256(self)
    }

    /// The nearest ANSI-16 palette index (perceptual distance).
    #[must_use]
    pub fn nearest_ansi16(self) -> u8 {
        palette::nearest_ansi16(self)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({})", self.to_hex())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv.to_rgb()
    }
}

// ─── Hsv ─────────────────────────────────────────────────────────────────────

/// Hue / saturation / value.
///
/// - `h`: hue angle in degrees, 0.0 to 360.0
/// - `s`: saturation, 0.0 to 1.0
/// - `v`: value (brightness), 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = f64::from(rgb.r) / 255.0;
        let g = f64::from(rgb.g) / 255.0;
        let b = f64::from(rgb.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta <= f64::EPSILON {
            0.0
        } else if (max - r).abs() <= f64::EPSILON {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() <= f64::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max <= f64::EPSILON { 0.0 } else { delta / max };

        Self { h, s, v: max }
    }

    /// Convert to 8-bit sRGB. Saturation and value are clamped first.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new(unit_to_u8(r + m), unit_to_u8(g + m), unit_to_u8(b + m))
    }
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

// ─── Color (OKLCH) ───────────────────────────────────────────────────────────

/// Slack allowed on each sRGB channel by [`Color::in_srgb_gamut`].
pub const GAMUT_EPSILON: f32 = 1e-4;

/// A perceptual color stored in OKLCH space.
///
/// OKLCH is the cylindrical form of Björn Ottosson's Oklab: equal numeric
/// steps in lightness, chroma, and hue produce equal visual steps. That
/// makes it the space of choice for smooth gradients.
///
/// ```
/// use prism_term::color::{Color, Rgb};
///
/// let red = Color::from_rgb(Rgb::new(255, 0, 0));
/// let blue = Color::from_rgb(Rgb::new(0, 0, 255));
/// let halfway = red.mix(&blue, 0.5);
/// assert!(halfway.to_rgb().b > 0);
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f32,
    /// Chroma: 0.0 (gray) to ~0.37 (most vivid in sRGB).
    pub c: f32,
    /// Hue angle in degrees: 0.0 to 360.0.
    pub h: f32,
}

impl Color {
    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// Create from sRGB components in 0.0–1.0.
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h }
    }

    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::srgb(
            f32::from(rgb.r) / 255.0,
            f32::from(rgb.g) / 255.0,
            f32::from(rgb.b) / 255.0,
        )
    }

    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Whether this color has no visible chroma.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    /// Mix with another color in OKLCH space.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`. Hue takes the
    /// shortest path around the wheel; an achromatic endpoint adopts the
    /// other endpoint's hue so grays don't drag the hue through red.
    #[must_use]
    pub fn mix(self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        let h = if self.is_achromatic() {
            other.h
        } else if other.is_achromatic() {
            self.h
        } else {
            interpolate_hue(self.h, other.h, t)
        };

        Self {
            l: self.l.mul_add(inv_t, other.l * t),
            c: self.c.mul_add(inv_t, other.c * t),
            h,
        }
    }

    /// Whether the color lies inside the sRGB gamut.
    ///
    /// Channels within [`GAMUT_EPSILON`] of the unit range count as inside,
    /// so sRGB colors survive the f32 round trip through OKLCH.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        let range = -GAMUT_EPSILON..=1.0 + GAMUT_EPSILON;
        range.contains(&r) && range.contains(&g) && range.contains(&b)
    }

    /// Reduce chroma (binary search) until the color fits in sRGB.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_srgb_gamut() {
            return self;
        }

        let mut lo: f32 = 0.0;
        let mut hi: f32 = self.c;
        for _ in 0..16 {
            let mid = (lo + hi) * 0.5;
            let candidate = Self { c: mid, ..self };
            if candidate.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..self }
    }

    /// Quantize to 8-bit sRGB, clamping out-of-gamut channels.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        Rgb::new(
            unit_to_u8(f64::from(r)),
            unit_to_u8(f64::from(g)),
            unit_to_u8(f64::from(b)),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-5;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic() || other.is_achromatic() || hue_diff(self.h, other.h) < EPS)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

// ─── TermColor ───────────────────────────────────────────────────────────────

/// A color in a form the terminal can display directly.
///
/// This is what the SGR encoder consumes. `Rgb` needs a `TrueColor`
/// terminal; `Ansi256` indices 0–15 are the classic 16 colors and encode
/// with the compact 30–37 / 90–97 codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TermColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),
    /// ANSI-256 palette index.
    Ansi256(u8),
    /// The terminal's own default color.
    #[default]
    Default,
}

impl TermColor {
    /// Approximate this color for a terminal with the given color level.
    ///
    /// Returns `None` when the level cannot display color at all. The
    /// terminal default is representable everywhere.
    #[must_use]
    pub fn downgrade(self, level: ColorLevel) -> Option<Self> {
        match (self, level) {
            (Self::Default, _) => Some(Self::Default),
            (_, ColorLevel::None) => None,
            (color, ColorLevel::TrueColor) => Some(color),
            (Self::Rgb(r, g, b), ColorLevel::Ansi256) => {
                Some(Self::Ansi256(Rgb::new(r, g, b).nearest_ansi256()))
            }
            (Self::Ansi256(idx), ColorLevel::Ansi256) => Some(Self::Ansi256(idx)),
            (Self::Rgb(r, g, b), ColorLevel::Ansi16) => {
                Some(Self::Ansi256(Rgb::new(r, g, b).nearest_ansi16()))
            }
            (Self::Ansi256(idx), ColorLevel::Ansi16) if idx < 16 => Some(Self::Ansi256(idx)),
            (Self::Ansi256(idx), ColorLevel::Ansi16) => {
                Some(Self::Ansi256(palette::ansi256_to_rgb(idx).nearest_ansi16()))
            }
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for TermColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl From<Rgb> for TermColor {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

// ─── Color Space Math ────────────────────────────────────────────────────────
//
// Oklab math by Björn Ottosson: https://bottosson.github.io/posts/oklab/

/// Normalize a hue angle to [0, 360).
#[inline]
fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Shortest arc between two hues.
#[inline]
fn hue_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

#[inline]
fn interpolate_hue(h1: f32, h2: f32, t: f32) -> f32 {
    let mut diff = h2 - h1;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    normalize_hue(diff.mul_add(t, h1))
}

#[inline]
fn oklch_to_oklab(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let h_rad = h.to_radians();
    (l, c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_to_oklch(l: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0 // achromatic, hue undefined
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    (l, c, h)
}

#[inline]
fn oklab_distance_sq(x: (f32, f32, f32), y: (f32, f32, f32)) -> f32 {
    let dl = x.0 - y.0;
    let da = x.1 - y.1;
    let db = x.2 - y.2;
    db.mul_add(db, dl.mul_add(dl, da * da))
}

#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

/// sRGB transfer function (linear → gamma-encoded).
#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Inverse sRGB transfer function (gamma-encoded → linear).
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    oklab_to_oklch(l, a, b_ok)
}

/// OKLCH → sRGB, possibly out of gamut.
fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (l, a, b) = oklch_to_oklab(l, c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => {
            let r = parse_hex_byte(bytes[0], bytes[1])?;
            let g = parse_hex_byte(bytes[2], bytes[3])?;
            let b = parse_hex_byte(bytes[4], bytes[5])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
const fn parse_hex_byte(hi: u8, lo: u8) -> Option<u8> {
    match (parse_hex_digit(hi), parse_hex_digit(lo)) {
        (Some(hi), Some(lo)) => Some(hi << 4 | lo),
        _ => None,
    }
}

/// 0.0–1.0 → 0–255 with rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_u8(v: f64) -> u8 {
    // Clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── ANSI Palette ────────────────────────────────────────────────────────────

pub mod palette {
    //! The xterm 256-color palette and perceptual nearest-match.
    //!
    //! - 0–7: standard colors
    //! - 8–15: bright variants
    //! - 16–231: 6×6×6 RGB cube
    //! - 232–255: 24-step grayscale ramp

    use super::{Rgb, linear_srgb_to_oklab, oklab_distance_sq, srgb_to_linear};

    /// xterm defaults for the 16 classic colors.
    pub const ANSI16_RGB: [Rgb; 16] = [
        Rgb::new(0, 0, 0),       // 0: Black
        Rgb::new(128, 0, 0),     // 1: Red
        Rgb::new(0, 128, 0),     // 2: Green
        Rgb::new(128, 128, 0),   // 3: Yellow
        Rgb::new(0, 0, 128),     // 4: Blue
        Rgb::new(128, 0, 128),   // 5: Magenta
        Rgb::new(0, 128, 128),   // 6: Cyan
        Rgb::new(192, 192, 192), // 7: White
        Rgb::new(128, 128, 128), // 8: Bright Black
        Rgb::new(255, 0, 0),     // 9: Bright Red
        Rgb::new(0, 255, 0),     // 10: Bright Green
        Rgb::new(255, 255, 0),   // 11: Bright Yellow
        Rgb::new(0, 0, 255),     // 12: Bright Blue
        Rgb::new(255, 0, 255),   // 13: Bright Magenta
        Rgb::new(0, 255, 255),   // 14: Bright Cyan
        Rgb::new(255, 255, 255), // 15: Bright White
    ];

    #[must_use]
    pub const fn ansi256_to_rgb(idx: u8) -> Rgb {
        match idx {
            0..=15 => ANSI16_RGB[idx as usize],
            16..=231 => {
                let idx = idx - 16;
                Rgb::new(cube_level(idx / 36), cube_level((idx % 36) / 6), cube_level(idx % 6))
            }
            232..=255 => {
                let v = 8 + 10 * (idx - 232);
                Rgb::new(v, v, v)
            }
        }
    }

    /// Cube steps: 0, 95, 135, 175, 215, 255.
    const fn cube_level(i: u8) -> u8 {
        if i == 0 { 0 } else { 55 + 40 * i }
    }

    fn oklab(rgb: Rgb) -> (f32, f32, f32) {
        linear_srgb_to_oklab(
            srgb_to_linear(f32::from(rgb.r) / 255.0),
            srgb_to_linear(f32::from(rgb.g) / 255.0),
            srgb_to_linear(f32::from(rgb.b) / 255.0),
        )
    }

    fn nearest(rgb: Rgb, candidates: impl Iterator<Item = u8>) -> u8 {
        let target = oklab(rgb);
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;
        for idx in candidates {
            let dist = oklab_distance_sq(target, oklab(ansi256_to_rgb(idx)));
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        best_idx
    }

    /// Nearest ANSI-256 index by Oklab Delta E.
    #[must_use]
    pub fn nearest_ansi256(rgb: Rgb) -> u8 {
        nearest(rgb, 0..=255)
    }

    /// Nearest ANSI-16 index by Oklab Delta E.
    #[must_use]
    pub fn nearest_ansi16(rgb: Rgb) -> u8 {
        nearest(rgb, 0..16)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn assert_rgb_close(actual: Rgb, expected: Rgb) {
        let close = |a: u8, b: u8| a.abs_diff(b) <= 1;
        assert!(
            close(actual.r, expected.r) && close(actual.g, expected.g) && close(actual.b, expected.b),
            "RGB mismatch: got {actual}, expected {expected}"
        );
    }

    // ── Rgb ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_long_and_short() {
        assert_eq!(Rgb::hex("#25f9d2"), Some(Rgb::new(0x25, 0xf9, 0xd2)));
        assert_eq!(Rgb::hex("f80"), Some(Rgb::new(0xff, 0x88, 0x00)));
        assert_eq!(Rgb::hex("#ABCDEF"), Some(Rgb::new(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn hex_parsing_invalid() {
        assert!(Rgb::hex("xyz").is_none());
        assert!(Rgb::hex("#12345").is_none());
        assert!(Rgb::hex("#ff000080").is_none());
        assert!(Rgb::hex("").is_none());
        assert!(Rgb::hex("#ééé").is_none());
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(Rgb::hex("#c86432").unwrap().to_hex(), "#c86432");
    }

    #[test]
    fn rgb_lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 100, 10);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 50, 5));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    // ── Hsv ──────────────────────────────────────────────────────────────

    #[test]
    fn hsv_primaries() {
        let red = Hsv::from_rgb(Rgb::new(255, 0, 0));
        assert!(approx_eq(red.h, 0.0, 1e-9));
        assert!(approx_eq(red.s, 1.0, 1e-9));
        assert!(approx_eq(red.v, 1.0, 1e-9));

        let green = Hsv::from_rgb(Rgb::new(0, 255, 0));
        assert!(approx_eq(green.h, 120.0, 1e-9));

        let blue = Hsv::from_rgb(Rgb::new(0, 0, 255));
        assert!(approx_eq(blue.h, 240.0, 1e-9));
    }

    #[test]
    fn hsv_gray_has_no_saturation() {
        let gray = Hsv::from_rgb(Rgb::new(128, 128, 128));
        assert!(approx_eq(gray.s, 0.0, 1e-9));
        assert!(approx_eq(gray.h, 0.0, 1e-9));
    }

    #[test]
    fn hsv_roundtrip() {
        for rgb in [
            Rgb::new(0x06, 0x30, 0x2a),
            Rgb::new(0xed, 0x58, 0x2a),
            Rgb::new(0x25, 0xf9, 0xd2),
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
            Rgb::new(200, 10, 180),
        ] {
            assert_rgb_close(Hsv::from_rgb(rgb).to_rgb(), rgb);
        }
    }

    #[test]
    fn hsv_to_rgb_wraps_hue_and_clamps() {
        assert_rgb_close(Hsv::new(360.0, 1.0, 1.0).to_rgb(), Rgb::new(255, 0, 0));
        assert_rgb_close(Hsv::new(-120.0, 1.0, 1.0).to_rgb(), Rgb::new(0, 0, 255));
        assert_rgb_close(Hsv::new(0.0, 2.0, 5.0).to_rgb(), Rgb::new(255, 0, 0));
    }

    // ── Color (OKLCH) ────────────────────────────────────────────────────

    #[test]
    fn oklch_roundtrip_through_rgb() {
        for rgb in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
        ] {
            assert_rgb_close(Color::from_rgb(rgb).to_rgb(), rgb);
        }
    }

    #[test]
    fn red_has_hue_near_30() {
        let red = Color::from_rgb(Rgb::new(255, 0, 0));
        assert!(red.h > 20.0 && red.h < 35.0, "Red hue was {}", red.h);
    }

    #[test]
    fn mix_endpoints() {
        let a = Color::oklch(0.3, 0.1, 30.0);
        let b = Color::oklch(0.7, 0.2, 270.0);
        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
    }

    #[test]
    fn mix_hue_takes_shortest_path() {
        let a = Color::oklch(0.5, 0.1, 10.0);
        let b = Color::oklch(0.5, 0.1, 350.0);
        let mixed = a.mix(&b, 0.5);
        assert!(mixed.h < 5.0 || mixed.h > 355.0, "got {}", mixed.h);
    }

    #[test]
    fn mix_with_gray_keeps_chromatic_hue() {
        let red = Color::oklch(0.6, 0.2, 29.0);
        let mixed = red.mix(&Color::WHITE, 0.5);
        assert!((mixed.h - 29.0).abs() < 1e-4);
    }

    #[test]
    fn srgb_corners_stay_in_gamut() {
        let corners = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(255, 255, 0),
        ];
        for rgb in corners {
            let color = Color::from_rgb(rgb);
            assert!(color.in_srgb_gamut(), "{rgb}");
            assert_eq!(color.to_gamut().to_rgb(), rgb);
        }
    }

    #[test]
    fn out_of_gamut_reduced_to_fit() {
        let color = Color::oklch(0.5, 0.4, 180.0);
        assert!(!color.in_srgb_gamut());
        let mapped = color.to_gamut();
        assert!(mapped.in_srgb_gamut());
        assert!(mapped.c < color.c);
    }

    // ── TermColor ────────────────────────────────────────────────────────

    #[test]
    fn downgrade_true_color_is_identity() {
        let c = TermColor::Rgb(1, 2, 3);
        assert_eq!(c.downgrade(ColorLevel::TrueColor), Some(c));
    }

    #[test]
    fn downgrade_to_256_uses_cube() {
        assert_eq!(
            TermColor::Rgb(255, 0, 0).downgrade(ColorLevel::Ansi256),
            Some(TermColor::Ansi256(9))
        );
        assert_eq!(
            TermColor::Rgb(95, 135, 175).downgrade(ColorLevel::Ansi256),
            Some(TermColor::Ansi256(67))
        );
    }

    #[test]
    fn downgrade_to_16() {
        assert_eq!(
            TermColor::Rgb(250, 5, 5).downgrade(ColorLevel::Ansi16),
            Some(TermColor::Ansi256(9))
        );
        assert_eq!(
            TermColor::Ansi256(196).downgrade(ColorLevel::Ansi16),
            Some(TermColor::Ansi256(9))
        );
        assert_eq!(
            TermColor::Ansi256(4).downgrade(ColorLevel::Ansi16),
            Some(TermColor::Ansi256(4))
        );
    }

    #[test]
    fn downgrade_to_none() {
        assert_eq!(TermColor::Rgb(1, 2, 3).downgrade(ColorLevel::None), None);
        assert_eq!(
            TermColor::Default.downgrade(ColorLevel::None),
            Some(TermColor::Default)
        );
    }

    #[test]
    fn term_color_debug_format() {
        assert_eq!(format!("{:?}", TermColor::Rgb(255, 128, 0)), "#ff8000");
        assert_eq!(format!("{:?}", TermColor::Ansi256(42)), "ansi(42)");
        assert_eq!(format!("{:?}", TermColor::Default), "default");
    }

    // ── Palette ──────────────────────────────────────────────────────────

    #[test]
    fn palette_regions() {
        assert_eq!(palette::ansi256_to_rgb(0), Rgb::new(0, 0, 0));
        assert_eq!(palette::ansi256_to_rgb(15), Rgb::new(255, 255, 255));
        assert_eq!(palette::ansi256_to_rgb(16), Rgb::new(0, 0, 0));
        assert_eq!(palette::ansi256_to_rgb(196), Rgb::new(255, 0, 0));
        assert_eq!(palette::ansi256_to_rgb(231), Rgb::new(255, 255, 255));
        assert_eq!(palette::ansi256_to_rgb(232), Rgb::new(8, 8, 8));
        assert_eq!(palette::ansi256_to_rgb(255), Rgb::new(238, 238, 238));
    }

    #[test]
    fn nearest_ansi16_extremes() {
        assert_eq!(Rgb::new(0, 0, 0).nearest_ansi16(), 0);
        assert_eq!(Rgb::new(255, 255, 255).nearest_ansi16(), 15);
        assert_eq!(Rgb::new(255, 0, 0).nearest_ansi16(), 9);
    }
}
