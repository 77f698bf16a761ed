//! Color representation and lookup tables
//!
//! Two static tables are available before any decoding starts:
//! - Legacy SGR codes (30-37, 90-97, 40-47, 100-107) to named ANSI colors
//! - The xterm 256-color palette, computed at compile time
//!
//! Both are plain `static`/`const` data and can be read from any thread.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A color id that is neither a named ANSI color nor six hex digits
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color id: {0:?}")]
pub struct ParseColorError(String);

/// The 16 named ANSI colors
///
/// Names follow the pager's canonical color ids (`ansidarkred`, `ansired`, ...)
/// rather than the SGR "normal/bright" wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AnsiColor {
    Black,
    DarkRed,
    DarkGreen,
    Brown,
    DarkBlue,
    Purple,
    Teal,
    LightGray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Fuchsia,
    Turquoise,
    White,
}

impl AnsiColor {
    /// All named colors, low intensity first
    pub const ALL: [AnsiColor; 16] = [
        AnsiColor::Black,
        AnsiColor::DarkRed,
        AnsiColor::DarkGreen,
        AnsiColor::Brown,
        AnsiColor::DarkBlue,
        AnsiColor::Purple,
        AnsiColor::Teal,
        AnsiColor::LightGray,
        AnsiColor::DarkGray,
        AnsiColor::Red,
        AnsiColor::Green,
        AnsiColor::Yellow,
        AnsiColor::Blue,
        AnsiColor::Fuchsia,
        AnsiColor::Turquoise,
        AnsiColor::White,
    ];

    /// Canonical color id
    pub fn name(self) -> &'static str {
        match self {
            AnsiColor::Black => "ansiblack",
            AnsiColor::DarkRed => "ansidarkred",
            AnsiColor::DarkGreen => "ansidarkgreen",
            AnsiColor::Brown => "ansibrown",
            AnsiColor::DarkBlue => "ansidarkblue",
            AnsiColor::Purple => "ansipurple",
            AnsiColor::Teal => "ansiteal",
            AnsiColor::LightGray => "ansilightgray",
            AnsiColor::DarkGray => "ansidarkgray",
            AnsiColor::Red => "ansired",
            AnsiColor::Green => "ansigreen",
            AnsiColor::Yellow => "ansiyellow",
            AnsiColor::Blue => "ansiblue",
            AnsiColor::Fuchsia => "ansifuchsia",
            AnsiColor::Turquoise => "ansiturquoise",
            AnsiColor::White => "ansiwhite",
        }
    }

    /// Look up a legacy foreground code (30-37, 90-97)
    pub fn from_fg_code(code: u16) -> Option<AnsiColor> {
        match code {
            30..=37 => Some(Self::ALL[usize::from(code - 30)]),
            90..=97 => Some(Self::ALL[usize::from(code - 90) + 8]),
            _ => None,
        }
    }

    /// Look up a legacy background code (40-47, 100-107)
    pub fn from_bg_code(code: u16) -> Option<AnsiColor> {
        match code {
            40..=47 => Some(Self::ALL[usize::from(code - 40)]),
            100..=107 => Some(Self::ALL[usize::from(code - 100) + 8]),
            _ => None,
        }
    }
}

impl fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnsiColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Six lowercase hex digits, e.g. `0a141e`
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let component = |at: usize| u8::from_str_radix(&s[at..at + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(component(0)?, component(2)?, component(4)?))
    }
}

/// A resolved color
///
/// 256-palette and truecolor selections both end up as [`Color::Rgb`], so two
/// escape sequences naming the same RGB value compare equal. Serialized as its
/// canonical id (`ansidarkred`, `0a141e`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Color {
    /// Named ANSI color
    Ansi(AnsiColor),
    /// 24-bit color
    Rgb(Rgb),
}

impl Color {
    /// Look up an entry of the 256-color palette
    pub fn indexed(index: u8) -> Self {
        Color::Rgb(PALETTE_256[usize::from(index)])
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(Rgb::new(r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi(named) => f.write_str(named.name()),
            Color::Rgb(rgb) => fmt::Display::fmt(rgb, f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("ansi") {
            s.parse().map(Color::Ansi)
        } else {
            s.parse().map(Color::Rgb)
        }
    }
}

macro_rules! string_serde {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for String {
                fn from(value: $ty) -> String {
                    value.to_string()
                }
            }

            impl TryFrom<String> for $ty {
                type Error = ParseColorError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )*
    };
}

string_serde!(AnsiColor, Rgb, Color);

/// The xterm 256-color palette
pub static PALETTE_256: [Rgb; 256] = build_palette();

/// Levels used by the 6x6x6 color cube
const CUBE_LEVELS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

const fn build_palette() -> [Rgb; 256] {
    let mut palette = [Rgb::new(0, 0, 0); 256];

    // System colors (0-15)
    palette[0] = Rgb::new(0x00, 0x00, 0x00);
    palette[1] = Rgb::new(0xcd, 0x00, 0x00);
    palette[2] = Rgb::new(0x00, 0xcd, 0x00);
    palette[3] = Rgb::new(0xcd, 0xcd, 0x00);
    palette[4] = Rgb::new(0x00, 0x00, 0xee);
    palette[5] = Rgb::new(0xcd, 0x00, 0xcd);
    palette[6] = Rgb::new(0x00, 0xcd, 0xcd);
    palette[7] = Rgb::new(0xe5, 0xe5, 0xe5);
    palette[8] = Rgb::new(0x7f, 0x7f, 0x7f);
    palette[9] = Rgb::new(0xff, 0x00, 0x00);
    palette[10] = Rgb::new(0x00, 0xff, 0x00);
    palette[11] = Rgb::new(0xff, 0xff, 0x00);
    palette[12] = Rgb::new(0x5c, 0x5c, 0xff);
    palette[13] = Rgb::new(0xff, 0x00, 0xff);
    palette[14] = Rgb::new(0x00, 0xff, 0xff);
    palette[15] = Rgb::new(0xff, 0xff, 0xff);

    // 6x6x6 color cube (16-231)
    let mut i = 0;
    while i < 216 {
        palette[16 + i] = Rgb::new(
            CUBE_LEVELS[i / 36],
            CUBE_LEVELS[(i / 6) % 6],
            CUBE_LEVELS[i % 6],
        );
        i += 1;
    }

    // Grayscale ramp (232-255)
    let mut i = 0;
    while i < 24 {
        let gray = 8 + (i as u8) * 10;
        palette[232 + i] = Rgb::new(gray, gray, gray);
        i += 1;
    }

    palette
}
