//! rowed entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::io_ops::load_into;
use core_actions::{HELP_MESSAGE, PromptHost, dispatch, translate_key};
use core_config::{ConfigContext, Effective, load_from};
use core_events::Key;
use core_input::{ByteSource, KeyDecoder, StdinSource};
use core_model::{EditorModel, Viewport};
use core_render::RenderEngine;
use core_state::{EditorState, QuitGuard};
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard, WindowSize};
use core_text::Document;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "rowed.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "rowed", version, about = "A small terminal text editor")]
struct Args {
    /// File to open. A path that does not exist yet starts an empty document
    /// that saves to it.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `rowed.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    model: EditorModel,
    effective: Effective,
    _terminal_guard: TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self, args: &Args) -> Result<RuntimeContext<'a>> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let mut config = load_from(args.config.clone())?;
        let effective = config.apply_context(ConfigContext::default());
        let size = self.backend.size()?;

        self.backend.set_title("rowed")?;
        let guard = self.backend.enter_guard()?;

        let model = load_editor_state(args.path.as_deref(), &effective, size);
        let path_str = args.path.as_ref().map(|p| p.display().to_string());
        let config_path = config.path.as_ref().map(|p| p.display().to_string());
        info!(
            target: "runtime.startup",
            path = path_str.as_deref(),
            rows = model.state().document.row_count(),
            config_override = args.config.is_some(),
            config_path = config_path.as_deref(),
            tab_stop = effective.tab_stop,
            "bootstrap_complete"
        );

        Ok(RuntimeContext {
            model,
            effective,
            _terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Build the initial model: the document from `path` (if any) and the help
/// message, or the open error in its place.
fn load_editor_state(path: Option<&Path>, effective: &Effective, size: WindowSize) -> EditorModel {
    let mut state = EditorState::new(Document::new(effective.tab_stop))
        .with_message_ttl(effective.message_timeout)
        .with_quit_guard(QuitGuard::new(effective.quit_times));
    let open_error = path.and_then(|p| load_into(&mut state, p));
    match open_error {
        Some(msg) => state.set_ephemeral(msg),
        None => state.set_ephemeral(HELP_MESSAGE),
    }
    EditorModel::new(state, Viewport::from_terminal(size.rows, size.cols))
}

/// The read-decode-act-render loop. Also the prompt host for save-as and
/// search, so nested prompts share the decoder and the output.
struct Session<S, W> {
    decoder: KeyDecoder<S>,
    engine: RenderEngine,
    out: W,
}

impl<S: ByteSource, W: Write> Session<S, W> {
    fn new(source: S, out: W) -> Self {
        Self {
            decoder: KeyDecoder::new(source),
            engine: RenderEngine::new(),
            out,
        }
    }

    /// Run until a quit is accepted. Input failures end the session with an
    /// error.
    fn run(&mut self, model: &mut EditorModel) -> Result<()> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter = span.enter();
        loop {
            self.refresh(model)?;
            let key = self.read_key()?;
            let action = translate_key(key);
            let result = dispatch(action, model, self)?;
            if result.quit {
                info!(target: "runtime.shutdown", frames = self.engine.frames(), "quit");
                return Ok(());
            }
        }
    }

    fn clear_screen(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()?;
        Ok(())
    }
}

impl<S: ByteSource, W: Write> PromptHost for Session<S, W> {
    fn refresh(&mut self, model: &mut EditorModel) -> Result<()> {
        self.engine.refresh(model, Instant::now(), &mut self.out)
    }

    fn read_key(&mut self) -> Result<Key> {
        Ok(self.decoder.read_key()?)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let mut ctx = startup.run(&args)?;

    let source = StdinSource::spawn(ctx.effective.read_timeout)?;
    let mut session = Session::new(source, stdout());
    let outcome = session.run(&mut ctx.model);
    if let Err(e) = &outcome {
        tracing::error!(target: "runtime", error = %e, "session_failed");
    }
    session.clear_screen()?;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::InputError;
    use std::collections::VecDeque;

    /// Scripted input that reports a closed stream once drained, so a test
    /// can never block waiting for more keys.
    struct Script(VecDeque<u8>);

    impl Script {
        fn new(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().collect())
        }
    }

    impl ByteSource for Script {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, InputError> {
            if self.0.is_empty() {
                return Err(InputError::Disconnected);
            }
            ByteSource::read(&mut self.0, buf)
        }
    }

    const CTRL_Q: u8 = 0x11;
    const CTRL_S: u8 = 0x13;
    const CTRL_F: u8 = 0x06;

    fn size() -> WindowSize {
        WindowSize { rows: 12, cols: 60 }
    }

    fn empty_model() -> EditorModel {
        load_editor_state(None, &Effective::default(), size())
    }

    #[test]
    fn startup_sets_help_message_and_geometry() {
        let m = empty_model();
        assert_eq!(
            m.state().ephemeral_status.as_ref().map(|s| s.text.as_str()),
            Some(HELP_MESSAGE)
        );
        assert_eq!(m.view().viewport.screenrows, 10);
        assert_eq!(m.view().viewport.screencols, 60);
        assert!(m.state().file_name.is_none());
    }

    #[test]
    fn startup_loads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "one\r\ntwo\n").unwrap();
        let m = load_editor_state(Some(&path), &Effective::default(), size());
        assert_eq!(m.state().document.row_count(), 2);
        assert_eq!(m.state().document.row(0).unwrap().content(), b"one");
        assert!(!m.state().is_dirty());
        assert_eq!(m.state().file_name.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn startup_missing_file_binds_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let m = load_editor_state(Some(&path), &Effective::default(), size());
        assert!(m.state().document.is_empty());
        assert_eq!(m.state().file_name.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn startup_applies_tab_stop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        std::fs::write(&path, "\tx\n").unwrap();
        let eff = Effective {
            tab_stop: 4,
            ..Effective::default()
        };
        let m = load_editor_state(Some(&path), &eff, size());
        assert_eq!(m.state().document.row(0).unwrap().render(), b"    x");
    }

    #[test]
    fn typing_then_triple_quit() {
        let mut m = empty_model();
        let mut input = b"hi".to_vec();
        input.extend([CTRL_Q, CTRL_Q, CTRL_Q]);
        let mut session = Session::new(Script::new(&input), Vec::new());
        session.run(&mut m).unwrap();
        assert_eq!(m.state().document.rows_to_text(), b"hi\n");
        assert_eq!(session.engine.frames(), 5);
    }

    #[test]
    fn escape_sequences_move_the_cursor() {
        let mut m = empty_model();
        let mut input = b"ab\x1b[D\x1b[DX\x1b[F!".to_vec();
        input.extend([CTRL_Q, CTRL_Q, CTRL_Q]);
        let mut session = Session::new(Script::new(&input), Vec::new());
        session.run(&mut m).unwrap();
        assert_eq!(m.state().document.rows_to_text(), b"Xab!\n");
    }

    #[test]
    fn save_as_then_quit_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut m = empty_model();
        let mut input = b"x".to_vec();
        input.push(CTRL_S);
        input.extend(path.to_str().unwrap().bytes());
        input.push(b'\r');
        input.push(CTRL_Q);
        let mut session = Session::new(Script::new(&input), Vec::new());
        session.run(&mut m).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"x\n");
    }

    #[test]
    fn search_through_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.txt");
        std::fs::write(&path, "alpha\nbeta\ngamma\n").unwrap();
        let mut m = load_editor_state(Some(&path), &Effective::default(), size());
        let mut input = vec![CTRL_F];
        input.extend(b"mm\r");
        input.push(CTRL_Q);
        let mut session = Session::new(Script::new(&input), Vec::new());
        session.run(&mut m).unwrap();
        assert_eq!(m.view().cursor.cy, 2);
        assert_eq!(m.view().cursor.cx, 2);
    }

    #[test]
    fn first_frame_shows_banner_on_empty_document() {
        let mut m = empty_model();
        let mut session = Session::new(Script::new(&[CTRL_Q]), Vec::new());
        session.run(&mut m).unwrap();
        let out = String::from_utf8_lossy(&session.out).into_owned();
        assert!(out.contains("rowed editor -- version"));
        assert!(out.contains(HELP_MESSAGE));
    }

    #[test]
    fn closed_input_is_fatal() {
        let mut m = empty_model();
        let mut session = Session::new(Script::new(b"a"), Vec::new());
        let err = session.run(&mut m).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::Disconnected)
        ));
        assert_eq!(m.state().document.rows_to_text(), b"a\n");
    }
}
