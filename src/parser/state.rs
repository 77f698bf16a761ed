//! Decoder state machine
//!
//! Converts a character stream into styled tokens. The decoder handles
//! arbitrary chunk boundaries: an escape sequence cut off at the end of one
//! chunk is carried in [`State`] and picks up where it left off on the next
//! call to [`Decoder::feed`].
//!
//! States:
//! - Normal: text, backspace overstrike, sequence introducers
//! - AfterEscape: ESC seen, waiting for `[`
//! - InCsi: collecting `;`-separated numeric parameters until `m`

use crate::app::DecoderConfig;
use crate::core::{Emphasis, StyleAttributes, Token, TokenStyle};

use super::error::DecodeError;
use super::sgr;

const BACKSPACE: char = '\x08';
const ESC: char = '\x1b';
const CSI: char = '\u{9b}';

/// Parser state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Normal,
    AfterEscape,
    InCsi {
        /// Completed parameters
        params: Vec<u16>,
        /// Parameter being built
        current: u32,
    },
}

/// The escape sequence decoder
#[derive(Debug, Clone)]
pub struct Decoder {
    state: State,
    /// Persistent SGR style
    style: StyleAttributes,
    /// One-shot overstrike emphasis for the next character
    pending: Option<Emphasis>,
    /// Tokens not yet drained
    tokens: Vec<Token>,
    max_param_value: u16,
    max_params: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder with default limits
    pub fn new() -> Self {
        Self::with_config(&DecoderConfig::default())
    }

    pub fn with_config(config: &DecoderConfig) -> Self {
        Self {
            state: State::Normal,
            style: StyleAttributes::default(),
            pending: None,
            tokens: Vec::with_capacity(256),
            max_param_value: config.max_param_value,
            max_params: config.max_params,
        }
    }

    /// Current persistent style
    pub fn style(&self) -> &StyleAttributes {
        &self.style
    }

    /// True while an escape sequence is partially consumed
    pub fn is_mid_sequence(&self) -> bool {
        self.state != State::Normal
    }

    /// Return to a freshly constructed state, dropping undrained tokens
    pub fn reset(&mut self) {
        self.state = State::Normal;
        self.style = StyleAttributes::default();
        self.pending = None;
        self.tokens.clear();
    }

    /// Take all tokens produced so far, in display order
    pub fn drain(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }

    /// Feed every character of `input`
    ///
    /// Malformed sequences are logged and skipped.
    pub fn feed_str(&mut self, input: &str) {
        for c in input.chars() {
            if let Err(e) = self.feed(c) {
                tracing::debug!("recovered from decode error: {}", e);
            }
        }
    }

    /// Process a single character
    ///
    /// An error means the current escape sequence was discarded; the decoder
    /// is back in the normal state and can keep going.
    pub fn feed(&mut self, c: char) -> Result<(), DecodeError> {
        match std::mem::take(&mut self.state) {
            State::Normal => {
                self.process_normal(c);
                Ok(())
            }
            State::AfterEscape => {
                if c == '[' {
                    self.state = State::InCsi {
                        params: Vec::new(),
                        current: 0,
                    };
                } else {
                    tracing::trace!("ignoring unsupported escape ESC {:?}", c);
                }
                Ok(())
            }
            State::InCsi {
                mut params,
                mut current,
            } => match c {
                '0'..='9' => {
                    let digit = c.to_digit(10).unwrap_or(0);
                    current = current.saturating_mul(10).saturating_add(digit);
                    self.state = State::InCsi { params, current };
                    Ok(())
                }
                ';' => {
                    self.push_param(&mut params, current);
                    self.state = State::InCsi { params, current: 0 };
                    Ok(())
                }
                'm' => {
                    self.push_param(&mut params, current);
                    self.style = sgr::apply(&params, self.style);
                    Ok(())
                }
                other => Err(DecodeError::MalformedCsiTerminator(other)),
            },
        }
    }

    fn process_normal(&mut self, c: char) {
        match c {
            BACKSPACE => self.overstrike(),
            ESC => self.state = State::AfterEscape,
            CSI => {
                self.state = State::InCsi {
                    params: Vec::new(),
                    current: 0,
                }
            }
            _ => {
                let style = match self.pending.take() {
                    Some(emphasis) => TokenStyle::Emphasis(emphasis),
                    None => TokenStyle::Attrs(self.style),
                };
                self.tokens.push(Token { style, ch: c });
            }
        }
    }

    /// Backspace: drop the struck character and emphasize the next one
    fn overstrike(&mut self) {
        let Some(struck) = self.tokens.pop() else {
            tracing::trace!("backspace with no preceding token");
            return;
        };
        self.pending = Some(if struck.ch == '_' {
            Emphasis::Standout2
        } else {
            Emphasis::Standout
        });
    }

    fn push_param(&self, params: &mut Vec<u16>, value: u32) {
        if params.len() >= self.max_params {
            tracing::trace!("dropping CSI parameter beyond limit of {}", self.max_params);
            return;
        }
        let clamped = value.min(u32::from(self.max_param_value));
        params.push(u16::try_from(clamped).unwrap_or(self.max_param_value));
    }
}
