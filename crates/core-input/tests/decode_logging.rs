use core_input::KeyDecoder;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

fn capture<F: FnOnce()>(level: Level, f: F) -> String {
    let (writer, buffer) = BufferWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(writer)
        .finish();
    with_default(subscriber, f);
    let out = buffer.lock().unwrap().clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn decoded_keys_are_traced_under_input_decode() {
    let log = capture(Level::TRACE, || {
        let mut dec = KeyDecoder::new(VecDeque::from(b"\x1b[Ax".to_vec()));
        dec.read_key().unwrap();
        dec.read_key().unwrap();
    });
    assert_eq!(log.matches("TRACE input.decode:").count(), 2, "{log}");
}

#[test]
fn nothing_logged_above_trace() {
    let log = capture(Level::DEBUG, || {
        let mut dec = KeyDecoder::new(VecDeque::from(b"a".to_vec()));
        dec.read_key().unwrap();
    });
    assert!(!log.contains("input.decode"), "{log}");
}
