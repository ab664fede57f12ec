// SPDX-License-Identifier: MIT
//
// Multi-stop gradients and fixed-step sampling.
//
// A `Gradient<C>` is just its stops, sorted by location. Sampling needs an
// interpolator, so it lives on `Generator`, which borrows the gradient and
// yields `steps` evenly spaced colors from the first stop to the last.

use std::iter::FusedIterator;

use crate::error::GradientError;
use crate::interpolate::Interpolator;
use crate::stop::GradientStop;

// ─── Gradient ────────────────────────────────────────────────────────────────

/// An ordered list of at least two stops.
///
/// ```
/// use prism_gradient::{Gradient, RgbLerp};
/// use prism_term::Rgb;
///
/// let gradient = Gradient::new(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255));
/// let colors: Vec<Rgb> = gradient.generator(3, RgbLerp).iter().collect();
/// assert_eq!(colors[1], Rgb::new(128, 128, 128));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient<C> {
    stops: Vec<GradientStop<C>>,
}

impl<C> Gradient<C> {
    /// Two stops: `start` at 0.0, `end` at 1.0.
    #[must_use]
    pub fn new(start: C, end: C) -> Self {
        Self {
            stops: vec![GradientStop::start(start), GradientStop::end(end)],
        }
    }

    /// `start` at 0.0, `end` at 1.0, and `middle` stops in between.
    #[must_use]
    pub fn with_stops(start: C, middle: impl IntoIterator<Item = GradientStop<C>>, end: C) -> Self {
        let mut stops = vec![GradientStop::start(start)];
        stops.extend(middle);
        stops.push(GradientStop::end(end));
        Self::sorted(stops)
    }

    /// A gradient from explicit stops, stably sorted by location.
    ///
    /// # Errors
    ///
    /// [`GradientError::NotEnoughStops`] with fewer than two stops.
    pub fn from_stops(stops: impl IntoIterator<Item = GradientStop<C>>) -> Result<Self, GradientError> {
        let stops: Vec<_> = stops.into_iter().collect();
        if stops.len() < 2 {
            return Err(GradientError::NotEnoughStops(stops.len()));
        }
        Ok(Self::sorted(stops))
    }

    /// Stops evenly spaced from 0.0 to 1.0, one per color.
    ///
    /// # Errors
    ///
    /// [`GradientError::NotEnoughStops`] with fewer than two colors.
    #[allow(clippy::cast_precision_loss)] // color counts are small
    pub fn evenly_spaced(colors: impl IntoIterator<Item = C>) -> Result<Self, GradientError> {
        let colors: Vec<C> = colors.into_iter().collect();
        if colors.len() < 2 {
            return Err(GradientError::NotEnoughStops(colors.len()));
        }
        let last = (colors.len() - 1) as f64;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| GradientStop::new(i as f64 / last, color))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops })
    }

    /// The same stops with every color converted by `f`.
    #[must_use]
    pub fn map<D>(&self, mut f: impl FnMut(&C) -> D) -> Gradient<D> {
        Gradient {
            stops: self.stops.iter().map(|stop| stop.map(&mut f)).collect(),
        }
    }

    fn sorted(mut stops: Vec<GradientStop<C>>) -> Self {
        stops.sort_by(|a, b| a.location().total_cmp(&b.location()));
        Self { stops }
    }

    // ─── Accessors ────────────────────────────────────────────────────────

    /// The first stop.
    #[must_use]
    pub fn start(&self) -> &GradientStop<C> {
        &self.stops[0]
    }

    /// The last stop.
    #[must_use]
    pub fn end(&self) -> &GradientStop<C> {
        &self.stops[self.stops.len() - 1]
    }

    #[inline]
    #[must_use]
    pub fn stops(&self) -> &[GradientStop<C>] {
        &self.stops
    }

    /// A sampler yielding `steps` colors blended by `interpolator`.
    #[must_use]
    pub fn generator<I: Interpolator<C>>(&self, steps: usize, interpolator: I) -> Generator<'_, C, I> {
        Generator {
            stops: &self.stops,
            steps,
            interpolator,
        }
    }
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Samples a gradient with a fixed interpolator.
pub struct Generator<'g, C, I> {
    stops: &'g [GradientStop<C>],
    steps: usize,
    interpolator: I,
}

impl<C: Clone, I: Interpolator<C>> Generator<'_, C, I> {
    #[inline]
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// The color at `location`, clamped to 0.0–1.0.
    ///
    /// Blends between the last stop at or below the location and the first
    /// stop above it. Past the outermost stops the nearest one wins.
    #[must_use]
    pub fn color_at(&self, location: f64) -> C {
        let location = if location.is_nan() { 0.0 } else { location.clamp(0.0, 1.0) };

        let first = &self.stops[0];
        let last = &self.stops[self.stops.len() - 1];
        let lower = self
            .stops
            .iter()
            .rev()
            .find(|s| s.location() <= location)
            .unwrap_or(first);
        let upper = self
            .stops
            .iter()
            .find(|s| s.location() > location)
            .unwrap_or(last);

        let span = upper.location() - lower.location();
        if span <= 0.0 {
            return lower.color().clone();
        }
        let t = (location - lower.location()) / span;
        self.interpolator.lerp(t, lower.color(), upper.color())
    }

    /// The `steps` evenly spaced colors, first stop to last.
    #[must_use]
    pub const fn iter(&self) -> Steps<'_, C, I> {
        Steps {
            generator: self,
            next: 0,
        }
    }
}

impl<'a, C: Clone, I: Interpolator<C>> IntoIterator for &'a Generator<'_, C, I> {
    type Item = C;
    type IntoIter = Steps<'a, C, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Generator`]'s steps.
pub struct Steps<'a, C, I> {
    generator: &'a Generator<'a, C, I>,
    next: usize,
}

impl<C: Clone, I: Interpolator<C>> Iterator for Steps<'_, C, I> {
    type Item = C;

    #[allow(clippy::cast_precision_loss)] // step counts fit in f64's mantissa
    fn next(&mut self) -> Option<C> {
        let steps = self.generator.steps;
        if self.next >= steps {
            return None;
        }
        let i = self.next;
        self.next += 1;
        if steps == 1 {
            return Some(self.generator.stops[0].color().clone());
        }
        Some(self.generator.color_at(i as f64 / (steps - 1) as f64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.generator.steps.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<C: Clone, I: Interpolator<C>> ExactSizeIterator for Steps<'_, C, I> {}

impl<C: Clone, I: Interpolator<C>> FusedIterator for Steps<'_, C, I> {}
