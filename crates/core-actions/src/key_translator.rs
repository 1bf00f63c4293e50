//! Stateless key -> `Action` mapping.
//!
//! Control chords: Ctrl-Q quit, Ctrl-S save, Ctrl-F find, Ctrl-H backspace,
//! Ctrl-L refresh. Every other byte, printable or not, is inserted literally.

use crate::{Action, EditKind, MotionKind};
use core_events::{ENTER, Key, NamedKey, ctrl};

const QUIT: u8 = ctrl(b'q');
const SAVE: u8 = ctrl(b's');
const FIND: u8 = ctrl(b'f');
const BACKSPACE_CHORD: u8 = ctrl(b'h');
const REFRESH: u8 = ctrl(b'l');

pub fn translate_key(key: Key) -> Action {
    match key {
        Key::Byte(ENTER) => Action::Edit(EditKind::InsertNewline),
        Key::Byte(QUIT) => Action::Quit,
        Key::Byte(SAVE) => Action::Save,
        Key::Byte(FIND) => Action::Find,
        Key::Byte(BACKSPACE_CHORD) => Action::Edit(EditKind::DeleteBackward),
        Key::Byte(REFRESH) => Action::Refresh,
        Key::Byte(b) => Action::Edit(EditKind::InsertByte(b)),
        Key::Named(named) => match named {
            NamedKey::ArrowUp => Action::Motion(MotionKind::Up),
            NamedKey::ArrowDown => Action::Motion(MotionKind::Down),
            NamedKey::ArrowLeft => Action::Motion(MotionKind::Left),
            NamedKey::ArrowRight => Action::Motion(MotionKind::Right),
            NamedKey::Home => Action::Motion(MotionKind::LineStart),
            NamedKey::End => Action::Motion(MotionKind::LineEnd),
            NamedKey::PageUp => Action::Motion(MotionKind::PageUp),
            NamedKey::PageDown => Action::Motion(MotionKind::PageDown),
            NamedKey::Backspace => Action::Edit(EditKind::DeleteBackward),
            NamedKey::Delete => Action::Edit(EditKind::DeleteForward),
            NamedKey::Escape => Action::Refresh,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_chords() {
        assert_eq!(translate_key(Key::ctrl(b'q')), Action::Quit);
        assert_eq!(translate_key(Key::ctrl(b's')), Action::Save);
        assert_eq!(translate_key(Key::ctrl(b'f')), Action::Find);
        assert_eq!(translate_key(Key::ctrl(b'l')), Action::Refresh);
        assert_eq!(
            translate_key(Key::ctrl(b'h')),
            Action::Edit(EditKind::DeleteBackward)
        );
    }

    #[test]
    fn enter_inserts_newline_and_bytes_insert() {
        assert_eq!(
            translate_key(Key::Byte(b'\r')),
            Action::Edit(EditKind::InsertNewline)
        );
        assert_eq!(
            translate_key(Key::Byte(b'x')),
            Action::Edit(EditKind::InsertByte(b'x'))
        );
        assert_eq!(
            translate_key(Key::Byte(b'\t')),
            Action::Edit(EditKind::InsertByte(b'\t'))
        );
    }

    #[test]
    fn named_keys() {
        assert_eq!(
            translate_key(NamedKey::Home.into()),
            Action::Motion(MotionKind::LineStart)
        );
        assert_eq!(
            translate_key(NamedKey::Delete.into()),
            Action::Edit(EditKind::DeleteForward)
        );
        assert_eq!(translate_key(NamedKey::Escape.into()), Action::Refresh);
    }
}
