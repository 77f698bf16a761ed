//! Core value types
//!
//! Colors, the static color tables, style attributes and decoded tokens.
//! Everything here is immutable data shared freely between decoders.

mod color;
mod style;

pub use color::{AnsiColor, Color, ParseColorError, Rgb, PALETTE_256};
pub use style::{Emphasis, StyleAttributes, Token, TokenStyle};
