use crate::{ByteSource, InputError};
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use std::collections::VecDeque;
use std::io::{self, Read};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const READ_CHUNK: usize = 64;
const CHANNEL_CAP: usize = 256;

/// Standard input as a [`ByteSource`] with a coarse read timeout.
///
/// A dedicated thread performs the blocking `read` on stdin and forwards raw
/// chunks; it never touches editor state. `read` waits at most `timeout` for
/// the next chunk so the decoder can resolve a lone Escape.
pub struct StdinSource {
    rx: Receiver<io::Result<Vec<u8>>>,
    pending: VecDeque<u8>,
    timeout: Duration,
}

impl StdinSource {
    pub fn spawn(timeout: Duration) -> Result<Self, InputError> {
        let (tx, rx) = bounded(CHANNEL_CAP);
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let mut stdin = io::stdin().lock();
                let mut buf = [0u8; READ_CHUNK];
                loop {
                    match stdin.read(&mut buf) {
                        Ok(0) => {
                            debug!(target: "input.thread", "stdin_eof");
                            break;
                        }
                        Ok(n) => {
                            if tx.send(Ok(buf[..n].to_vec())).is_err() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            warn!(target: "input.thread", error = %e, "stdin_read_failed");
                            let _ = tx.send(Err(e));
                            break;
                        }
                    }
                }
            })?;
        Ok(Self {
            rx,
            pending: VecDeque::new(),
            timeout,
        })
    }
}

impl ByteSource for StdinSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
        if self.pending.is_empty() {
            match self.rx.recv_timeout(self.timeout) {
                Ok(Ok(chunk)) => self.pending.extend(chunk),
                Ok(Err(e)) => return Err(InputError::Read(e)),
                Err(RecvTimeoutError::Timeout) => return Ok(0),
                Err(RecvTimeoutError::Disconnected) => return Err(InputError::Disconnected),
            }
        }
        ByteSource::read(&mut self.pending, buf)
    }
}
