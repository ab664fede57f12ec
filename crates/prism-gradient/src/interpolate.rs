// SPDX-License-Identifier: MIT
//
// Color space interpolators.
//
// A gradient is generic over its color type; how two colors blend is a
// separate choice. `RgbLerp` is the cheap per-channel blend, `HsvLerp` walks
// the hue wheel (linearly, not by the shortest arc), and `OklchLerp` is the
// perceptual blend from `prism_term::color::Color::mix`. Any closure
// `Fn(f64, &C, &C) -> C` works as well.

use prism_term::{Color, Hsv, Rgb};

/// Blends two colors of type `C`.
pub trait Interpolator<C> {
    /// The color `t` of the way from `start` to `end`, with `t` in 0.0–1.0.
    fn lerp(&self, t: f64, start: &C, end: &C) -> C;
}

impl<C, F> Interpolator<C> for F
where
    F: Fn(f64, &C, &C) -> C,
{
    #[inline]
    fn lerp(&self, t: f64, start: &C, end: &C) -> C {
        self(t, start, end)
    }
}

fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a.mul_add(1.0 - t, b * t)
}

// ─── RGB ─────────────────────────────────────────────────────────────────────

/// Per-channel linear blend in gamma-encoded sRGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbLerp;

impl Interpolator<Rgb> for RgbLerp {
    fn lerp(&self, t: f64, start: &Rgb, end: &Rgb) -> Rgb {
        start.lerp(*end, t)
    }
}

// ─── HSV ─────────────────────────────────────────────────────────────────────

/// Hue, saturation, and value blended independently.
///
/// Hue moves linearly between the two angles and wraps at 360°, so red
/// (0°) to blue (240°) passes through green. Identical endpoints return the
/// start untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HsvLerp;

impl Interpolator<Hsv> for HsvLerp {
    fn lerp(&self, t: f64, start: &Hsv, end: &Hsv) -> Hsv {
        if start == end {
            return *start;
        }
        Hsv::new(
            lerp_f64(start.h, end.h, t).rem_euclid(360.0),
            lerp_f64(start.s, end.s, t).clamp(0.0, 1.0),
            lerp_f64(start.v, end.v, t).clamp(0.0, 1.0),
        )
    }
}

impl Interpolator<Rgb> for HsvLerp {
    fn lerp(&self, t: f64, start: &Rgb, end: &Rgb) -> Rgb {
        let hsv = Interpolator::<Hsv>::lerp(self, t, &Hsv::from_rgb(*start), &Hsv::from_rgb(*end));
        hsv.to_rgb()
    }
}

// ─── OKLCH ───────────────────────────────────────────────────────────────────

/// Perceptual blend in OKLCH along the shorter hue arc.
#[derive(Debug, Clone, Copy, Default)]
pub struct OklchLerp;

impl Interpolator<Color> for OklchLerp {
    #[allow(clippy::cast_possible_truncation)] // t is 0.0–1.0
    fn lerp(&self, t: f64, start: &Color, end: &Color) -> Color {
        start.mix(end, t as f32)
    }
}

impl Interpolator<Rgb> for OklchLerp {
    fn lerp(&self, t: f64, start: &Rgb, end: &Rgb) -> Rgb {
        let mixed = Interpolator::<Color>::lerp(
            self,
            t,
            &Color::from_rgb(*start),
            &Color::from_rgb(*end),
        );
        mixed.to_gamut().to_rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close(a: Rgb, b: Rgb) -> bool {
        a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1
    }

    // ── RGB ─────────────────────────────────────────────────────────────

    #[test]
    fn rgb_endpoints_and_midpoint() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(RgbLerp.lerp(0.0, &black, &white), black);
        assert_eq!(RgbLerp.lerp(1.0, &black, &white), white);
        assert_eq!(RgbLerp.lerp(0.5, &black, &white), Rgb::new(128, 128, 128));
    }

    // ── HSV ─────────────────────────────────────────────────────────────

    #[test]
    fn hsv_hue_is_linear() {
        let red = Hsv::new(0.0, 1.0, 1.0);
        let blue = Hsv::new(240.0, 1.0, 1.0);
        let mid = HsvLerp.lerp(0.5, &red, &blue);
        assert!(approx(mid.h, 120.0));
    }

    #[test]
    fn hsv_hue_wraps_at_360() {
        let a = Hsv::new(300.0, 1.0, 1.0);
        let b = Hsv::new(420.0, 1.0, 1.0);
        let end = HsvLerp.lerp(1.0, &a, &b);
        assert!(approx(end.h, 60.0));
        let past = HsvLerp.lerp(0.5, &a, &b);
        assert!(approx(past.h, 0.0));
    }

    #[test]
    fn hsv_clamps_saturation_and_value() {
        let a = Hsv::new(0.0, 0.5, 0.5);
        let b = Hsv::new(0.0, 1.5, -0.5);
        let end = HsvLerp.lerp(1.0, &a, &b);
        assert!(approx(end.s, 1.0));
        assert!(approx(end.v, 0.0));
    }

    #[test]
    fn hsv_identical_endpoints_short_circuit() {
        let c = Hsv::new(400.0, 2.0, 0.3);
        assert_eq!(HsvLerp.lerp(0.7, &c, &c), c);
    }

    #[test]
    fn hsv_over_rgb_hits_endpoints() {
        let start = Rgb::hex("#06302a").unwrap();
        let end = Rgb::hex("#ed582a").unwrap();
        assert!(close(HsvLerp.lerp(0.0, &start, &end), start));
        assert!(close(HsvLerp.lerp(1.0, &start, &end), end));
    }

    // ── OKLCH ───────────────────────────────────────────────────────────

    #[test]
    fn oklch_over_rgb_hits_endpoints() {
        let start = Rgb::new(255, 0, 0);
        let end = Rgb::new(0, 0, 255);
        assert!(close(OklchLerp.lerp(0.0, &start, &end), start));
        assert!(close(OklchLerp.lerp(1.0, &start, &end), end));
    }

    #[test]
    fn oklch_keeps_srgb_corners() {
        let corners = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(255, 255, 0),
        ];
        for start in corners {
            for end in corners {
                assert!(close(OklchLerp.lerp(0.0, &start, &end), start), "{start} to {end}");
                assert!(close(OklchLerp.lerp(1.0, &start, &end), end), "{start} to {end}");
            }
        }
    }

    // ── Closures ────────────────────────────────────────────────────────

    #[test]
    fn closures_are_interpolators() {
        let step = |t: f64, a: &u8, b: &u8| if t < 0.5 { *a } else { *b };
        assert_eq!(step.lerp(0.2, &1, &9), 1);
        assert_eq!(step.lerp(0.8, &1, &9), 9);
    }
}
