//! Streaming UTF-8 decoding for pipe input
//!
//! Reads can split a multi-byte character anywhere; the partial character
//! stays in the decoder until the rest arrives.

const REPLACEMENT: char = '\u{FFFD}';

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Need more bytes
    Pending,
    /// Decoded a character
    Char(char),
    /// Invalid sequence
    Invalid,
    /// The pending sequence was cut short; the byte has to be decoded again
    Restart,
}

/// UTF-8 decoder state
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    /// Bytes accumulated for current character
    buffer: [u8; 4],
    /// Number of bytes in buffer
    len: usize,
    /// Expected total bytes for current character
    expected: usize,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any partially received character
    pub fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// Check if decoder is in the middle of a sequence
    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// Decode `bytes`, appending complete characters to `out`
    ///
    /// Invalid input becomes U+FFFD.
    pub fn decode(&mut self, bytes: &[u8], out: &mut String) {
        for &byte in bytes {
            match self.step(byte) {
                Step::Pending => {}
                Step::Char(c) => out.push(c),
                Step::Invalid => out.push(REPLACEMENT),
                Step::Restart => {
                    out.push(REPLACEMENT);
                    // Decoder is empty again, so this cannot restart twice
                    match self.step(byte) {
                        Step::Pending => {}
                        Step::Char(c) => out.push(c),
                        Step::Invalid | Step::Restart => out.push(REPLACEMENT),
                    }
                }
            }
        }
    }

    fn step(&mut self, byte: u8) -> Step {
        if self.len == 0 {
            return self.start(byte);
        }

        if byte & 0b1100_0000 != 0b1000_0000 {
            self.reset();
            return Step::Restart;
        }

        self.buffer[self.len] = byte;
        self.len += 1;
        if self.len < self.expected {
            return Step::Pending;
        }

        let decoded = std::str::from_utf8(&self.buffer[..self.len])
            .ok()
            .and_then(|s| s.chars().next());
        self.reset();
        decoded.map_or(Step::Invalid, Step::Char)
    }

    fn start(&mut self, byte: u8) -> Step {
        let expected = match byte {
            0x00..=0x7F => return Step::Char(char::from(byte)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            // Stray continuation byte, overlong lead or out of range
            _ => return Step::Invalid,
        };
        self.buffer[0] = byte;
        self.len = 1;
        self.expected = expected;
        Step::Pending
    }
}
