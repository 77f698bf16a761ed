//! Pre-tokenized input
//!
//! Each item pulled from the iterator is a list of `(style, text)` fragments.
//! Fragments are split into one token per character so callers see the same
//! shape of output as from a pipe.

use std::os::fd::BorrowedFd;

use crate::core::{Token, TokenStyle};

use super::{Source, SourceResult};

/// Source that pulls already styled fragments from an iterator
#[derive(Debug)]
pub struct GeneratorSource<I> {
    fragments: I,
    eof: bool,
}

impl<I, F> GeneratorSource<I>
where
    I: Iterator<Item = F>,
    F: IntoIterator<Item = (TokenStyle, String)>,
{
    pub fn new(fragments: I) -> Self {
        Self {
            fragments,
            eof: false,
        }
    }
}

/// Split fragments into per-character tokens
pub fn explode_fragments<F>(fragments: F) -> Vec<Token>
where
    F: IntoIterator<Item = (TokenStyle, String)>,
{
    fragments
        .into_iter()
        .flat_map(|(style, text)| {
            text.chars()
                .map(|ch| Token { style, ch })
                .collect::<Vec<_>>()
        })
        .collect()
}

impl<I, F> Source for GeneratorSource<I>
where
    I: Iterator<Item = F>,
    F: IntoIterator<Item = (TokenStyle, String)>,
{
    fn fd(&self) -> Option<BorrowedFd<'_>> {
        None
    }

    fn poll_ready(&self, _timeout_ms: i32) -> SourceResult<bool> {
        Ok(!self.eof)
    }

    fn eof(&self) -> bool {
        self.eof
    }

    fn read_chunk(&mut self) -> SourceResult<Vec<Token>> {
        if self.eof {
            return Ok(Vec::new());
        }
        match self.fragments.next() {
            Some(fragments) => Ok(explode_fragments(fragments)),
            None => {
                self.eof = true;
                Ok(Vec::new())
            }
        }
    }
}
