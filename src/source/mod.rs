//! Input sources for the pager
//!
//! A source hands the pager batches of styled tokens. Two kinds exist:
//! - [`PipeSource`]: raw bytes from another process, run through the escape
//!   decoder. Readiness is reported through the underlying fd.
//! - [`GeneratorSource`]: fragments that are already styled, pulled from an
//!   iterator. These never touch the decoder.

mod generator;
mod pipe;
mod utf8;

use std::os::fd::BorrowedFd;

use thiserror::Error;

use crate::core::Token;

pub use generator::{explode_fragments, GeneratorSource};
pub use pipe::PipeSource;
pub use utf8::Utf8Decoder;

/// Source error type
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to poll: {0}")]
    Poll(#[source] nix::Error),
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Something the pager reads styled text from
pub trait Source {
    /// File descriptor to wait on, or `None` if reads never block
    fn fd(&self) -> Option<BorrowedFd<'_>>;

    /// Wait up to `timeout_ms` for input (-1 waits forever)
    fn poll_ready(&self, timeout_ms: i32) -> SourceResult<bool>;

    /// True once the input is permanently exhausted
    fn eof(&self) -> bool;

    /// Read one batch of input and return the tokens it produced
    ///
    /// An empty batch is normal and just means nothing complete arrived yet.
    fn read_chunk(&mut self) -> SourceResult<Vec<Token>>;
}
