//! Escape sequence decoder
//!
//! A resumable, per-character state machine that turns pager input into
//! styled tokens. Understands backspace overstrike (manpage bold/underline)
//! and CSI SGR sequences; every other escape is consumed and dropped.

mod error;
pub mod sgr;
mod state;

pub use error::DecodeError;
pub use state::Decoder;
