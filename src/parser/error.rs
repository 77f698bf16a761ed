//! Decoder errors

use thiserror::Error;

/// A recoverable decode error
///
/// By the time one of these is returned the decoder has already dropped the
/// offending sequence and is ready for the next character.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A CSI sequence ended in something other than a digit, `;` or `m`
    #[error("unsupported CSI terminator {0:?}")]
    MalformedCsiTerminator(char),
}
