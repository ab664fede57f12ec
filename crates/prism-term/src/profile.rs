// SPDX-License-Identifier: MIT
//
// Terminal capability profile: what the target terminal can display.
//
// The renderer never guesses. Everything it may emit is decided here: the
// color level (how many colors), which SGR decorations are honored, and
// what to do when a style asks for something the terminal can't show.
//
// Detection reads the environment the way most CLI tools do:
//
//   PRISM_COLOR   explicit override (truecolor | 24bit | 256 | 16 | none)
//   NO_COLOR      any non-empty value disables color (https://no-color.org)
//   COLORTERM     truecolor | 24bit → TrueColor
//   TERM          dumb → None, *256color* → Ansi256, anything else → Ansi16
//
// Without an override, output that isn't going to a terminal gets no color.
// The only unsafe code is the isatty call in `stdout_is_tty`.
#![allow(unsafe_code)]

use std::fmt;

use log::debug;

// ─── Color Level ─────────────────────────────────────────────────────────────

/// How many colors the terminal can display.
///
/// Ordered from least to most capable, so `level >= ColorLevel::Ansi256`
/// reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ColorLevel {
    /// No color at all (dumb terminals, pipes, `NO_COLOR`).
    None,
    /// The 16 classic colors (SGR 30–37, 90–97).
    Ansi16,
    /// The xterm 256-color palette (SGR 38;5;N).
    Ansi256,
    /// 24-bit RGB (SGR 38;2;R;G;B).
    #[default]
    TrueColor,
}

impl ColorLevel {
    /// Parse a level name as accepted by `PRISM_COLOR` and `--color`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Some(Self::TrueColor),
            "256" | "ansi256" => Some(Self::Ansi256),
            "16" | "ansi16" | "ansi" => Some(Self::Ansi16),
            "none" | "off" | "0" => Some(Self::None),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ansi16 => "16",
            Self::Ansi256 => "256",
            Self::TrueColor => "truecolor",
        }
    }
}

impl fmt::Display for ColorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Features ────────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// SGR decorations the terminal honors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        /// SGR 1.
        const BOLD               = 1 << 0;
        /// SGR 2.
        const DIM                = 1 << 1;
        /// SGR 3.
        const ITALIC             = 1 << 2;
        /// SGR 4: plain straight underline.
        const UNDERLINE          = 1 << 3;
        /// SGR 4:N: double, curly, dotted, dashed underlines.
        const EXTENDED_UNDERLINE = 1 << 4;
        /// SGR 5.
        const BLINK              = 1 << 5;
        /// SGR 7.
        const INVERSE            = 1 << 6;
        /// SGR 8.
        const HIDDEN             = 1 << 7;
        /// SGR 9.
        const STRIKETHROUGH      = 1 << 8;
    }
}

impl Features {
    /// What an ordinary xterm-compatible terminal supports: everything but
    /// the colon-syntax underline variants.
    pub const STANDARD: Self = Self::all().difference(Self::EXTENDED_UNDERLINE);
}

impl Default for Features {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ─── Fallback ────────────────────────────────────────────────────────────────

/// What to do with a style the terminal can't fully display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fallback {
    /// Approximate where possible, drop what can't be approximated.
    #[default]
    Downgrade,
    /// Refuse: the renderer reports an unsupported style.
    Strict,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Default bound on styled-tree nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The target terminal, as far as rendering is concerned.
///
/// ```
/// use prism_term::profile::{ColorLevel, Profile};
///
/// let profile = Profile::new().with_color_level(ColorLevel::Ansi256).strict();
/// assert_eq!(profile.color_level(), ColorLevel::Ansi256);
/// assert!(profile.is_strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Profile {
    color_level: ColorLevel,
    features: Features,
    fallback: Fallback,
    max_depth: usize,
}

impl Profile {
    /// `TrueColor`, standard features, downgrade fallback.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color_level: ColorLevel::TrueColor,
            features: Features::STANDARD,
            fallback: Fallback::Downgrade,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A profile for modern terminals (Kitty, `WezTerm`, Ghostty, iTerm2)
    /// that also draw the extended underline styles.
    #[must_use]
    pub const fn modern() -> Self {
        Self {
            features: Features::all(),
            ..Self::new()
        }
    }

    /// Plain text: no color, no decorations.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            color_level: ColorLevel::None,
            features: Features::empty(),
            ..Self::new()
        }
    }

    // ─── Builders ─────────────────────────────────────────────────────────

    #[must_use]
    pub const fn with_color_level(self, color_level: ColorLevel) -> Self {
        Self { color_level, ..self }
    }

    #[must_use]
    pub const fn with_features(self, features: Features) -> Self {
        Self { features, ..self }
    }

    #[must_use]
    pub const fn with_fallback(self, fallback: Fallback) -> Self {
        Self { fallback, ..self }
    }

    /// Shorthand for `with_fallback(Fallback::Strict)`.
    #[must_use]
    pub const fn strict(self) -> Self {
        self.with_fallback(Fallback::Strict)
    }

    #[must_use]
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    // ─── Queries ──────────────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn color_level(&self) -> ColorLevel {
        self.color_level
    }

    #[inline]
    #[must_use]
    pub const fn features(&self) -> Features {
        self.features
    }

    #[inline]
    #[must_use]
    pub const fn fallback(&self) -> Fallback {
        self.fallback
    }

    #[inline]
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self.fallback, Fallback::Strict)
    }

    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    #[must_use]
    pub const fn supports(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }

    // ─── Detection ────────────────────────────────────────────────────────

    /// Detect the profile for the current process's stdout.
    #[must_use]
    pub fn detect() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        let overridden = lookup("PRISM_COLOR").is_some();
        let profile = Self::from_env_with(lookup);

        if !overridden && !stdout_is_tty() {
            debug!("stdout is not a terminal, disabling color");
            return profile.with_color_level(ColorLevel::None);
        }
        profile
    }

    /// Build a profile from environment variables supplied by `lookup`.
    ///
    /// This is the pure half of [`detect`](Self::detect): it never touches
    /// the real environment or the file descriptors.
    #[must_use]
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let level = detect_level(&lookup);
        debug!("detected color level: {level}");
        Self::new().with_color_level(level)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

fn detect_level(lookup: &impl Fn(&str) -> Option<String>) -> ColorLevel {
    if let Some(value) = lookup("PRISM_COLOR") {
        if let Some(level) = ColorLevel::parse(&value) {
            return level;
        }
        debug!("ignoring unrecognized PRISM_COLOR={value:?}");
    }

    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return ColorLevel::None;
    }

    if let Some(colorterm) = lookup("COLORTERM") {
        let colorterm = colorterm.to_ascii_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" {
            return ColorLevel::TrueColor;
        }
    }

    match lookup("TERM") {
        Some(term) if term == "dumb" => ColorLevel::None,
        Some(term) if term.contains("256color") => ColorLevel::Ansi256,
        _ => ColorLevel::Ansi16,
    }
}

/// Whether stdout is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn stdout_is_tty() -> bool {
    // Safety: isatty only inspects the descriptor and is sound for any fd.
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn stdout_is_tty() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
