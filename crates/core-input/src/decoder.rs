use crate::{ByteSource, InputError};
use core_events::{BACKSPACE_BYTE, ESCAPE_BYTE, Key, NamedKey};
use tracing::trace;

/// Progress through one escape sequence. Every path ends in exactly one key;
/// nothing carries over between `read_key` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Idle,
    SawEscape,
    SawIntroducer(u8),
    SawDigit(u8),
}

/// Turns a raw byte stream into logical keys.
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Block until a byte arrives, then decode one key. Only the first byte
    /// waits indefinitely; lookahead bytes that do not arrive in one read
    /// collapse the sequence to a bare Escape.
    pub fn read_key(&mut self) -> Result<Key, InputError> {
        let first = loop {
            if let Some(b) = self.next_byte()? {
                break b;
            }
        };
        let key = self.decode_from(first);
        trace!(target: "input.decode", first, key = %key, "key");
        Ok(key)
    }

    fn next_byte(&mut self) -> Result<Option<u8>, InputError> {
        let mut buf = [0u8; 1];
        match self.source.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    /// Lookahead read: a short read or a failure both end the sequence.
    fn lookahead(&mut self) -> Option<u8> {
        match self.next_byte() {
            Ok(b) => b,
            Err(e) => {
                trace!(target: "input.decode", error = %e, "lookahead_failed");
                None
            }
        }
    }

    fn decode_from(&mut self, first: u8) -> Key {
        let mut state = DecodeState::Idle;
        let mut byte = first;
        loop {
            state = match state {
                DecodeState::Idle => match byte {
                    ESCAPE_BYTE => DecodeState::SawEscape,
                    BACKSPACE_BYTE => return Key::Named(NamedKey::Backspace),
                    b => return Key::Byte(b),
                },
                DecodeState::SawEscape => match byte {
                    b'[' | b'O' => DecodeState::SawIntroducer(byte),
                    _ => return Key::Named(NamedKey::Escape),
                },
                DecodeState::SawIntroducer(b'[') => match byte {
                    b'0'..=b'9' => DecodeState::SawDigit(byte),
                    b'A' => return NamedKey::ArrowUp.into(),
                    b'B' => return NamedKey::ArrowDown.into(),
                    b'C' => return NamedKey::ArrowRight.into(),
                    b'D' => return NamedKey::ArrowLeft.into(),
                    b'H' => return NamedKey::Home.into(),
                    b'F' => return NamedKey::End.into(),
                    _ => return NamedKey::Escape.into(),
                },
                DecodeState::SawIntroducer(_) => match byte {
                    b'H' => return NamedKey::Home.into(),
                    b'F' => return NamedKey::End.into(),
                    _ => return NamedKey::Escape.into(),
                },
                DecodeState::SawDigit(digit) => {
                    if byte != b'~' {
                        return NamedKey::Escape.into();
                    }
                    return match digit {
                        b'1' | b'7' => NamedKey::Home,
                        b'3' => NamedKey::Delete,
                        b'4' | b'8' => NamedKey::End,
                        b'5' => NamedKey::PageUp,
                        b'6' => NamedKey::PageDown,
                        _ => NamedKey::Escape,
                    }
                    .into();
                }
            };
            match self.lookahead() {
                Some(b) => byte = b,
                None => return NamedKey::Escape.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn decode_all(bytes: &[u8], count: usize) -> Vec<Key> {
        let src: VecDeque<u8> = bytes.iter().copied().collect();
        let mut dec = KeyDecoder::new(src);
        (0..count).map(|_| dec.read_key().unwrap()).collect()
    }

    fn one(bytes: &[u8]) -> Key {
        decode_all(bytes, 1)[0]
    }

    #[test]
    fn plain_and_control_bytes_pass_through() {
        assert_eq!(one(b"a"), Key::Byte(b'a'));
        assert_eq!(one(b"\r"), Key::Byte(b'\r'));
        assert_eq!(one(&[0x11]), Key::ctrl(b'q'));
        assert_eq!(one(&[0x7f]), Key::Named(NamedKey::Backspace));
    }

    #[test]
    fn arrows_home_end() {
        assert_eq!(one(b"\x1b[A"), NamedKey::ArrowUp.into());
        assert_eq!(one(b"\x1b[B"), NamedKey::ArrowDown.into());
        assert_eq!(one(b"\x1b[C"), NamedKey::ArrowRight.into());
        assert_eq!(one(b"\x1b[D"), NamedKey::ArrowLeft.into());
        assert_eq!(one(b"\x1b[H"), NamedKey::Home.into());
        assert_eq!(one(b"\x1b[F"), NamedKey::End.into());
        assert_eq!(one(b"\x1bOH"), NamedKey::Home.into());
        assert_eq!(one(b"\x1bOF"), NamedKey::End.into());
    }

    #[test]
    fn tilde_sequences_by_digit() {
        let cases: [(&[u8], NamedKey); 8] = [
            (b"\x1b[1~", NamedKey::Home),
            (b"\x1b[7~", NamedKey::Home),
            (b"\x1b[3~", NamedKey::Delete),
            (b"\x1b[4~", NamedKey::End),
            (b"\x1b[8~", NamedKey::End),
            (b"\x1b[5~", NamedKey::PageUp),
            (b"\x1b[6~", NamedKey::PageDown),
            (b"\x1b[2~", NamedKey::Escape),
        ];
        for (bytes, want) in cases {
            assert_eq!(one(bytes), Key::Named(want), "{bytes:?}");
        }
    }

    #[test]
    fn short_reads_degrade_to_escape() {
        assert_eq!(one(b"\x1b"), NamedKey::Escape.into());
        assert_eq!(one(b"\x1b["), NamedKey::Escape.into());
        assert_eq!(one(b"\x1b[5"), NamedKey::Escape.into());
    }

    #[test]
    fn unrecognized_sequences_collapse_to_escape() {
        assert_eq!(one(b"\x1b[Z"), NamedKey::Escape.into());
        assert_eq!(one(b"\x1bOA"), NamedKey::Escape.into());
        assert_eq!(one(b"\x1bx"), NamedKey::Escape.into());
        assert_eq!(one(b"\x1b[5x"), NamedKey::Escape.into());
    }

    #[test]
    fn no_partial_state_survives_between_calls() {
        // After an unrecognized sequence the next call starts fresh.
        let keys = decode_all(b"\x1b[Zq\x1b[Ab", 4);
        assert_eq!(
            keys,
            vec![
                NamedKey::Escape.into(),
                Key::Byte(b'q'),
                NamedKey::ArrowUp.into(),
                Key::Byte(b'b'),
            ]
        );
    }

    struct FailingSource {
        first: Option<u8>,
    }

    impl ByteSource for FailingSource {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
            match self.first.take() {
                Some(b) => {
                    buf[0] = b;
                    Ok(1)
                }
                None => Err(InputError::Disconnected),
            }
        }
    }

    #[test]
    fn lookahead_failure_is_escape_but_first_read_failure_propagates() {
        let mut dec = KeyDecoder::new(FailingSource {
            first: Some(ESCAPE_BYTE),
        });
        assert_eq!(dec.read_key().unwrap(), NamedKey::Escape.into());
        assert!(matches!(dec.read_key(), Err(InputError::Disconnected)));
    }
}
