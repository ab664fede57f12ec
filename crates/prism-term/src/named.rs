// SPDX-License-Identifier: MIT
//
// The 16 named text colors.
//
// Each name has a fixed RGB value and a fixed slot in the classic ANSI-16
// palette. The slots do not follow declaration order: `dark_blue` is the
// second name but ANSI color 4.

use std::fmt;

use crate::color::{Rgb, TermColor};
use crate::profile::ColorLevel;

/// One of the 16 named text colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    /// Canonical lowercase name, e.g. `"dark_aqua"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
        }
    }

    /// Look up a color by name, ignoring ASCII case.
    ///
    /// `grey` and `dark_grey` are accepted as spellings of `gray` and
    /// `dark_gray`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "grey" => return Some(Self::Gray),
            "dark_grey" => return Some(Self::DarkGray),
            _ => {}
        }
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::DarkBlue => Rgb::new(0x00, 0x00, 0xaa),
            Self::DarkGreen => Rgb::new(0x00, 0xaa, 0x00),
            Self::DarkAqua => Rgb::new(0x00, 0xaa, 0xaa),
            Self::DarkRed => Rgb::new(0xaa, 0x00, 0x00),
            Self::DarkPurple => Rgb::new(0xaa, 0x00, 0xaa),
            Self::Gold => Rgb::new(0xff, 0xaa, 0x00),
            Self::Gray => Rgb::new(0xaa, 0xaa, 0xaa),
            Self::DarkGray => Rgb::new(0x55, 0x55, 0x55),
            Self::Blue => Rgb::new(0x55, 0x55, 0xff),
            Self::Green => Rgb::new(0x55, 0xff, 0x55),
            Self::Aqua => Rgb::new(0x55, 0xff, 0xff),
            Self::Red => Rgb::new(0xff, 0x55, 0x55),
            Self::LightPurple => Rgb::new(0xff, 0x55, 0xff),
            Self::Yellow => Rgb::new(0xff, 0xff, 0x55),
            Self::White => Rgb::new(0xff, 0xff, 0xff),
        }
    }

    /// Slot in the ANSI-16 palette (0–7 normal, 8–15 bright).
    #[must_use]
    pub const fn ansi16(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::DarkRed => 1,
            Self::DarkGreen => 2,
            Self::Gold => 3,
            Self::DarkBlue => 4,
            Self::DarkPurple => 5,
            Self::DarkAqua => 6,
            Self::Gray => 7,
            Self::DarkGray => 8,
            Self::Red => 9,
            Self::Green => 10,
            Self::Yellow => 11,
            Self::Blue => 12,
            Self::LightPurple => 13,
            Self::Aqua => 14,
            Self::White => 15,
        }
    }

    /// The terminal color for this name: exact RGB on `TrueColor`, the
    /// palette slot everywhere else. `None` when the level has no color.
    #[must_use]
    pub const fn to_term(self, level: ColorLevel) -> Option<TermColor> {
        match level {
            ColorLevel::TrueColor => {
                let rgb = self.rgb();
                Some(TermColor::Rgb(rgb.r, rgb.g, rgb.b))
            }
            ColorLevel::Ansi256 | ColorLevel::Ansi16 => Some(TermColor::Ansi256(self.ansi16())),
            ColorLevel::None => None,
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<NamedColor> for Rgb {
    fn from(color: NamedColor) -> Self {
        color.rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for color in NamedColor::ALL {
            assert_eq!(NamedColor::from_name(color.name()), Some(color));
        }
    }

    #[test]
    fn lookup_ignores_case_and_accepts_aliases() {
        assert_eq!(NamedColor::from_name("Dark_Aqua"), Some(NamedColor::DarkAqua));
        assert_eq!(NamedColor::from_name("grey"), Some(NamedColor::Gray));
        assert_eq!(NamedColor::from_name("DARK_GREY"), Some(NamedColor::DarkGray));
        assert_eq!(NamedColor::from_name("mauve"), None);
    }

    #[test]
    fn ansi_slots_are_a_permutation() {
        let mut seen = [false; 16];
        for color in NamedColor::ALL {
            seen[usize::from(color.ansi16())] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn known_values() {
        assert_eq!(NamedColor::Aqua.rgb(), Rgb::new(0x55, 0xff, 0xff));
        assert_eq!(NamedColor::Gold.rgb().to_hex(), "#ffaa00");
        assert_eq!(NamedColor::Red.ansi16(), 9);
        assert_eq!(NamedColor::DarkBlue.ansi16(), 4);
    }

    #[test]
    fn terminal_mapping_by_level() {
        let red = NamedColor::Red;
        assert_eq!(red.to_term(ColorLevel::TrueColor), Some(TermColor::Rgb(0xff, 0x55, 0x55)));
        assert_eq!(red.to_term(ColorLevel::Ansi256), Some(TermColor::Ansi256(9)));
        assert_eq!(red.to_term(ColorLevel::Ansi16), Some(TermColor::Ansi256(9)));
        assert_eq!(red.to_term(ColorLevel::None), None);
    }
}
