//! Pipe input
//!
//! Reads bytes from another process chained to the pager, decodes UTF-8 and
//! escape sequences, and returns styled tokens per read.

use std::io::{ErrorKind, Read};
use std::os::fd::{AsFd, BorrowedFd};

use nix::poll::{poll, PollFd, PollFlags};

use crate::app::Config;
use crate::core::Token;
use crate::parser::Decoder;

use super::utf8::Utf8Decoder;
use super::{Source, SourceError, SourceResult};

/// Source backed by a readable file descriptor
#[derive(Debug)]
pub struct PipeSource<R> {
    reader: R,
    decoder: Decoder,
    utf8: Utf8Decoder,
    /// Raw read buffer
    buffer: Vec<u8>,
    /// Characters decoded from the last read
    text: String,
    eof: bool,
}

impl<R: Read + AsFd> PipeSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &Config::default())
    }

    pub fn with_config(reader: R, config: &Config) -> Self {
        let chunk = config.source.read_chunk_size.max(1);
        Self {
            reader,
            decoder: Decoder::with_config(&config.decoder),
            utf8: Utf8Decoder::new(),
            buffer: vec![0; chunk],
            text: String::with_capacity(chunk),
            eof: false,
        }
    }

    /// The escape decoder, e.g. to inspect the current style
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn finish(&mut self) -> Vec<Token> {
        self.eof = true;
        if self.utf8.is_pending() {
            tracing::debug!("dropping incomplete UTF-8 character at end of input");
            self.utf8.reset();
        }
        if self.decoder.is_mid_sequence() {
            tracing::debug!("dropping unterminated escape sequence at end of input");
        }
        self.decoder.drain()
    }
}

impl<R: Read + AsFd> Source for PipeSource<R> {
    fn fd(&self) -> Option<BorrowedFd<'_>> {
        Some(self.reader.as_fd())
    }

    fn poll_ready(&self, timeout_ms: i32) -> SourceResult<bool> {
        if self.eof {
            return Ok(false);
        }
        let fd = self.reader.as_fd();
        let mut fds = [PollFd::new(&fd, PollFlags::POLLIN)];
        let n = poll(&mut fds, timeout_ms).map_err(SourceError::Poll)?;
        // A hung-up writer is "ready" too: the next read reports EOF.
        Ok(n > 0
            && fds[0]
                .revents()
                .is_some_and(|r| r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP)))
    }

    fn eof(&self) -> bool {
        self.eof
    }

    fn read_chunk(&mut self) -> SourceResult<Vec<Token>> {
        if self.eof {
            return Ok(Vec::new());
        }

        let n = match self.reader.read(&mut self.buffer) {
            Ok(n) => n,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            return Ok(self.finish());
        }

        self.text.clear();
        self.utf8.decode(&self.buffer[..n], &mut self.text);
        self.decoder.feed_str(&self.text);
        Ok(self.decoder.drain())
    }
}
