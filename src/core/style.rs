//! Style state and decoded tokens
//!
//! [`StyleAttributes`] is a `Copy` value. Nothing mutates a style in place: every
//! change goes through a `with_*` method that returns a new value, so a snapshot
//! handed out with a token never changes afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Persistent text attributes set by SGR sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StyleAttributes {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    italic: bool,
    underline: bool,
    blink: bool,
    reverse: bool,
}

impl StyleAttributes {
    /// The default style: no colors, no attributes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(&self) -> Option<Color> {
        self.fg
    }

    pub fn bg(&self) -> Option<Color> {
        self.bg
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn blink(&self) -> bool {
        self.blink
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// True if no color or attribute is set
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn with_fg(self, fg: Option<Color>) -> Self {
        Self { fg, ..self }
    }

    #[must_use]
    pub fn with_bg(self, bg: Option<Color>) -> Self {
        Self { bg, ..self }
    }

    #[must_use]
    pub fn with_bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }

    #[must_use]
    pub fn with_italic(self, italic: bool) -> Self {
        Self { italic, ..self }
    }

    #[must_use]
    pub fn with_underline(self, underline: bool) -> Self {
        Self { underline, ..self }
    }

    #[must_use]
    pub fn with_blink(self, blink: bool) -> Self {
        Self { blink, ..self }
    }

    #[must_use]
    pub fn with_reverse(self, reverse: bool) -> Self {
        Self { reverse, ..self }
    }
}

impl fmt::Display for StyleAttributes {
    /// Space separated summary, e.g. `fg=ansired bold`; `default` when unset
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            return f.write_str("default");
        }
        let mut parts = Vec::new();
        if let Some(fg) = self.fg {
            parts.push(format!("fg={fg}"));
        }
        if let Some(bg) = self.bg {
            parts.push(format!("bg={bg}"));
        }
        let flags = [
            (self.bold, "bold"),
            (self.italic, "italic"),
            (self.underline, "underline"),
            (self.blink, "blink"),
            (self.reverse, "reverse"),
        ];
        parts.extend(
            flags
                .iter()
                .filter(|(set, _)| *set)
                .map(|(_, name)| (*name).to_string()),
        );
        f.write_str(&parts.join(" "))
    }
}

/// One-shot emphasis produced by backspace overstrike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emphasis {
    /// `X BS X`: bold-like
    Standout,
    /// `_ BS X`: underline-like
    Standout2,
}

/// Style carried by a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStyle {
    /// Snapshot of the persistent SGR style
    Attrs(StyleAttributes),
    /// Overstrike emphasis, which replaces the persistent style for one character
    Emphasis(Emphasis),
}

impl fmt::Display for TokenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStyle::Attrs(attrs) => fmt::Display::fmt(attrs, f),
            TokenStyle::Emphasis(Emphasis::Standout) => f.write_str("standout"),
            TokenStyle::Emphasis(Emphasis::Standout2) => f.write_str("standout2"),
        }
    }
}

impl Default for TokenStyle {
    fn default() -> Self {
        TokenStyle::Attrs(StyleAttributes::default())
    }
}

impl From<StyleAttributes> for TokenStyle {
    fn from(attrs: StyleAttributes) -> Self {
        TokenStyle::Attrs(attrs)
    }
}

impl From<Emphasis> for TokenStyle {
    fn from(emphasis: Emphasis) -> Self {
        TokenStyle::Emphasis(emphasis)
    }
}

/// A decoded character together with the style it is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub style: TokenStyle,
    pub ch: char,
}

impl Token {
    pub fn new(style: impl Into<TokenStyle>, ch: char) -> Self {
        Self {
            style: style.into(),
            ch,
        }
    }

    /// The SGR attributes, if this token is not an overstrike emphasis
    pub fn attrs(&self) -> Option<&StyleAttributes> {
        match &self.style {
            TokenStyle::Attrs(attrs) => Some(attrs),
            TokenStyle::Emphasis(_) => None,
        }
    }

    /// The overstrike emphasis, if any
    pub fn emphasis(&self) -> Option<Emphasis> {
        match self.style {
            TokenStyle::Emphasis(emphasis) => Some(emphasis),
            TokenStyle::Attrs(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::AnsiColor;

    #[test]
    fn test_style_default() {
        let style = StyleAttributes::default();
        assert!(style.is_default());
        assert_eq!(style.fg(), None);
        assert_eq!(style.bg(), None);
        assert!(!style.bold());
        assert!(!style.reverse());
    }

    #[test]
    fn test_with_leaves_base_untouched() {
        let base = StyleAttributes::new().with_bold(true);
        let derived = base
            .with_fg(Some(Color::Ansi(AnsiColor::Red)))
            .with_underline(true);

        assert!(base.bold());
        assert_eq!(base.fg(), None);
        assert!(!base.underline());

        assert!(derived.bold());
        assert!(derived.underline());
        assert_eq!(derived.fg(), Some(Color::Ansi(AnsiColor::Red)));
    }

    #[test]
    fn test_style_display() {
        assert_eq!(StyleAttributes::default().to_string(), "default");
        let style = StyleAttributes::new()
            .with_fg(Some(Color::Ansi(AnsiColor::Red)))
            .with_bg(Some(Color::rgb(10, 20, 30)))
            .with_bold(true)
            .with_reverse(true);
        assert_eq!(style.to_string(), "fg=ansired bg=0a141e bold reverse");
        assert_eq!(TokenStyle::from(Emphasis::Standout2).to_string(), "standout2");
    }

    #[test]
    fn test_token_accessors() {
        let plain = Token::new(StyleAttributes::default(), 'a');
        assert!(plain.attrs().is_some());
        assert_eq!(plain.emphasis(), None);

        let bold = Token::new(Emphasis::Standout, 'b');
        assert!(bold.attrs().is_none());
        assert_eq!(bold.emphasis(), Some(Emphasis::Standout));
    }

    #[test]
    fn test_token_serialization() {
        let token = Token::new(
            StyleAttributes::new().with_bg(Some(Color::rgb(1, 2, 3))),
            'x',
        );
        let json = serde_json::to_string(&token).unwrap();
        let restored: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, restored);
    }

    #[test]
    fn test_token_json_uses_color_ids() {
        let token = Token::new(
            StyleAttributes::new()
                .with_fg(Some(Color::Ansi(AnsiColor::DarkRed)))
                .with_bg(Some(Color::rgb(10, 20, 30))),
            'x',
        );
        let json: serde_json::Value = serde_json::to_value(token).unwrap();
        assert_eq!(json["style"]["Attrs"]["fg"], "ansidarkred");
        assert_eq!(json["style"]["Attrs"]["bg"], "0a141e");
        assert_eq!(json["ch"], "x");
    }
}
