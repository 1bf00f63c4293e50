//! Raw byte input and the escape-sequence key decoder.
//!
//! The decoder pulls bytes from any [`ByteSource`] and yields exactly one
//! [`Key`](core_events::Key) per call. Sources return however many bytes are
//! ready, possibly zero after a coarse timeout; the decoder relies on that to
//! tell a lone Escape press apart from the start of an escape sequence.

mod decoder;
mod stdin_source;

pub use decoder::KeyDecoder;
pub use stdin_source::StdinSource;

use std::collections::VecDeque;
use std::io;

/// Unrecoverable input-boundary failures.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input read failed: {0}")]
    Read(#[from] io::Error),
    #[error("input stream closed")]
    Disconnected,
}

/// Byte-oriented input: read up to `buf.len()` bytes, returning how many were
/// ready. `Ok(0)` means nothing arrived before the source's timeout.
pub trait ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError>;
}

/// Scripted source used by tests and replay: drains queued bytes, then
/// reports `Ok(0)` forever.
impl ByteSource for VecDeque<u8> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
        let mut n = 0;
        while n < buf.len() {
            match self.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
        (**self).read(buf)
    }
}
