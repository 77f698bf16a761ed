//! SGR (Select Graphic Rendition) resolution
//!
//! Applies the numeric parameters of a `CSI ... m` sequence to a style.
//! Parameters are consumed left to right; `38`/`48` take their color
//! arguments from the parameters that follow them.

use crate::core::{AnsiColor, Color, StyleAttributes};

/// Extended color mode selectors following 38/48
const EXT_TRUECOLOR: u16 = 2;
const EXT_INDEXED: u16 = 5;

/// Which color slot an extended color applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Foreground,
    Background,
}

/// Apply SGR parameters to `current` and return the resulting style
///
/// An empty parameter list is a full reset. Unknown codes are ignored, and an
/// extended color with missing arguments leaves the color unchanged.
pub fn apply(params: &[u16], current: StyleAttributes) -> StyleAttributes {
    if params.is_empty() {
        return StyleAttributes::default();
    }

    let mut style = current;
    let mut rest = params.iter().copied();

    while let Some(param) = rest.next() {
        style = match param {
            0 => StyleAttributes::default(),
            1 => style.with_bold(true),
            3 => style.with_italic(true),
            4 => style.with_underline(true),
            5 | 6 => style.with_blink(true),
            7 => style.with_reverse(true),
            22 => style.with_bold(false),
            23 => style.with_italic(false),
            24 => style.with_underline(false),
            25 => style.with_blink(false),
            27 => style.with_reverse(false),
            30..=37 | 90..=97 => style.with_fg(AnsiColor::from_fg_code(param).map(Color::Ansi)),
            40..=47 | 100..=107 => style.with_bg(AnsiColor::from_bg_code(param).map(Color::Ansi)),
            39 => style.with_fg(None),
            49 => style.with_bg(None),
            38 => apply_extended(style, Layer::Foreground, &mut rest),
            48 => apply_extended(style, Layer::Background, &mut rest),
            _ => {
                tracing::trace!("ignoring SGR parameter {}", param);
                style
            }
        };
    }

    style
}

/// Resolve `38;...`/`48;...` from the remaining parameters
fn apply_extended(
    style: StyleAttributes,
    layer: Layer,
    rest: &mut impl Iterator<Item = u16>,
) -> StyleAttributes {
    // Outer `None` keeps the current color, inner `None` clears it
    let change = match rest.next() {
        Some(EXT_INDEXED) => match rest.next().map(u8::try_from) {
            Some(Ok(index)) => Some(Some(Color::indexed(index))),
            Some(Err(_)) => {
                tracing::debug!("256-color index out of range, clearing {:?} color", layer);
                Some(None)
            }
            None => {
                tracing::debug!("256-color sequence without index, keeping {:?} color", layer);
                None
            }
        },
        Some(EXT_TRUECOLOR) => {
            // Components are consumed even when the triple turns out incomplete.
            match (rest.next(), rest.next(), rest.next()) {
                (Some(r), Some(g), Some(b)) => {
                    Some(Some(Color::rgb(saturate(r), saturate(g), saturate(b))))
                }
                _ => {
                    tracing::debug!("truncated truecolor sequence, keeping {:?} color", layer);
                    None
                }
            }
        }
        Some(mode) => {
            tracing::trace!("unsupported extended color mode {}", mode);
            None
        }
        None => {
            tracing::debug!("extended color without mode, keeping {:?} color", layer);
            None
        }
    };

    match (change, layer) {
        (Some(color), Layer::Foreground) => style.with_fg(color),
        (Some(color), Layer::Background) => style.with_bg(color),
        (None, _) => style,
    }
}

fn saturate(component: u16) -> u8 {
    u8::try_from(component).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgb;

    fn red() -> StyleAttributes {
        StyleAttributes::new().with_fg(Some(Color::Ansi(AnsiColor::DarkRed)))
    }

    #[test]
    fn test_empty_params_reset() {
        let style = apply(&[], red().with_bold(true));
        assert!(style.is_default());
    }

    #[test]
    fn test_zero_resets() {
        let style = apply(&[1, 4, 31, 0], StyleAttributes::default());
        assert!(style.is_default());
    }

    #[test]
    fn test_reset_then_set_in_same_sequence() {
        let style = apply(&[0, 1], red());
        assert!(style.bold());
        assert_eq!(style.fg(), None);
    }

    #[test]
    fn test_attributes_on() {
        let style = apply(&[1, 3, 4, 5, 7], StyleAttributes::default());
        assert!(style.bold());
        assert!(style.italic());
        assert!(style.underline());
        assert!(style.blink());
        assert!(style.reverse());

        assert!(apply(&[6], StyleAttributes::default()).blink());
    }

    #[test]
    fn test_attributes_off() {
        let on = apply(&[1, 3, 4, 5, 7], red());
        let off = apply(&[22, 23, 24, 25, 27], on);
        assert!(!off.bold());
        assert!(!off.italic());
        assert!(!off.underline());
        assert!(!off.blink());
        assert!(!off.reverse());
        // Colors are untouched by attribute-off codes
        assert_eq!(off.fg(), red().fg());
    }

    #[test]
    fn test_only_explicit_codes_clear_attributes() {
        let style = apply(&[32, 44, 99], StyleAttributes::new().with_bold(true));
        assert!(style.bold());
    }

    #[test]
    fn test_legacy_colors() {
        let style = apply(&[31, 42], StyleAttributes::default());
        assert_eq!(style.fg(), Some(Color::Ansi(AnsiColor::DarkRed)));
        assert_eq!(style.bg(), Some(Color::Ansi(AnsiColor::DarkGreen)));

        let bright = apply(&[91, 104], StyleAttributes::default());
        assert_eq!(bright.fg(), Some(Color::Ansi(AnsiColor::Red)));
        assert_eq!(bright.bg(), Some(Color::Ansi(AnsiColor::Blue)));
    }

    #[test]
    fn test_default_color_codes() {
        let style = apply(&[31, 41], StyleAttributes::default());
        let style = apply(&[39], style);
        assert_eq!(style.fg(), None);
        assert_eq!(style.bg(), Some(Color::Ansi(AnsiColor::DarkRed)));
        let style = apply(&[49], style);
        assert!(style.is_default());
    }

    #[test]
    fn test_256_colors() {
        let style = apply(&[38, 5, 196, 48, 5, 21], StyleAttributes::default());
        assert_eq!(style.fg(), Some(Color::Rgb(Rgb::new(255, 0, 0))));
        assert_eq!(style.bg(), Some(Color::Rgb(Rgb::new(0, 0, 255))));
    }

    #[test]
    fn test_256_color_out_of_range() {
        let style = apply(&[38, 5, 300], red().with_bold(true));
        assert_eq!(style.fg(), None);
        assert!(style.bold());

        let bg = StyleAttributes::new().with_bg(Some(Color::indexed(21)));
        assert_eq!(apply(&[48, 5, 256, 1], bg).bg(), None);
        assert!(apply(&[48, 5, 256, 1], bg).bold());
    }

    #[test]
    fn test_256_color_missing_index() {
        let style = apply(&[48, 5], red());
        assert_eq!(style, red());
    }

    #[test]
    fn test_truecolor() {
        let style = apply(&[38, 2, 10, 20, 30], StyleAttributes::default());
        assert_eq!(style.fg().map(|c| c.to_string()).as_deref(), Some("0a141e"));

        let style = apply(&[48, 2, 255, 128, 0], style);
        assert_eq!(style.bg(), Some(Color::rgb(255, 128, 0)));
    }

    #[test]
    fn test_truecolor_saturates() {
        let style = apply(&[38, 2, 9999, 0, 256], StyleAttributes::default());
        assert_eq!(style.fg(), Some(Color::rgb(255, 0, 255)));
    }

    #[test]
    fn test_truncated_truecolor_keeps_style() {
        let before = red().with_italic(true);
        assert_eq!(apply(&[38, 2, 10], before), before);
        assert_eq!(apply(&[48, 2, 10, 20], before), before);
        assert_eq!(apply(&[38, 2], before), before);
    }

    #[test]
    fn test_extended_without_mode() {
        assert_eq!(apply(&[38], red()), red());
    }

    #[test]
    fn test_unknown_extended_mode_consumes_one() {
        // 38;3 is skipped, then 1 still applies
        let style = apply(&[38, 3, 1], StyleAttributes::default());
        assert!(style.bold());
        assert_eq!(style.fg(), None);
    }

    #[test]
    fn test_extended_consumes_arguments() {
        // The 1 inside 38;5;1 is a palette index, not bold
        let style = apply(&[38, 5, 1], StyleAttributes::default());
        assert!(!style.bold());
        assert_eq!(style.fg(), Some(Color::rgb(205, 0, 0)));
    }

    #[test]
    fn test_unknown_code_ignored() {
        let before = red().with_underline(true);
        assert_eq!(apply(&[99], before), before);
        assert_eq!(apply(&[2, 8, 9, 53], before), before);
    }
}
