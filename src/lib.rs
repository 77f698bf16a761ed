//! Pager Input Library
//!
//! Turns the output of a process piped into a pager into styled text.
//! This crate provides:
//!
//! - `core`: Colors, color tables, style attributes, tokens
//! - `parser`: Resumable escape sequence decoder (overstrike and SGR)
//! - `source`: Pipe and pre-tokenized input sources
//! - `app`: Configuration

pub mod app;
pub mod core;
pub mod parser;
pub mod source;
