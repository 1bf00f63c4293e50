//! Configuration loading and parsing.
//!
//! Parses `rowed.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [editor]
//! tab_stop = 8        # clamped to 1..=16
//! quit_times = 3      # consecutive Ctrl-Q presses needed on unsaved changes
//!
//! [status]
//! message_timeout_secs = 5   # clamped to 1..=3600
//!
//! [input]
//! read_timeout_ms = 100
//! ```
//!
//! Every key is optional. A missing file or a parse error yields defaults.
//! Unknown fields are ignored. The raw parsed values are kept in
//! `ConfigFile`; `Config::apply_context` derives the clamped values the
//! editor actually uses and logs every adjustment under the `config` target.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "rowed.toml";

pub const MIN_TAB_STOP: u16 = 1;
pub const MAX_TAB_STOP: u16 = 16;
pub const MAX_MESSAGE_TIMEOUT_SECS: u64 = 3600;

/// Inputs that bound the effective values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigContext {
    pub max_tab_stop: u16,
    /// Upper bound on the decoder read timeout; the loop must stay responsive.
    pub max_read_timeout_ms: u64,
    pub max_message_timeout_secs: u64,
}

impl Default for ConfigContext {
    fn default() -> Self {
        Self {
            max_tab_stop: MAX_TAB_STOP,
            max_read_timeout_ms: 1000,
            max_message_timeout_secs: MAX_MESSAGE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: u16,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> u16 {
        8
    }
    const fn default_quit_times() -> u32 {
        3
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl StatusConfig {
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: Self::default_read_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_read_timeout_ms() -> u64 {
        100
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Values after clamping, ready to hand to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    pub tab_stop: usize,
    pub quit_times: u32,
    pub message_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for Effective {
    fn default() -> Self {
        let file = ConfigFile::default();
        Self {
            tab_stop: file.editor.tab_stop as usize,
            quit_times: file.editor.quit_times,
            message_timeout: Duration::from_secs(file.status.message_timeout_secs),
            read_timeout: Duration::from_millis(file.input.read_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>,
    pub file: ConfigFile,
    pub effective: Effective,
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("rowed").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                file,
                effective: Effective::default(), // computed by apply_context
            })
        }
        Err(e) => {
            tracing::warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Derive clamped effective values from the parsed file.
    pub fn apply_context(&mut self, ctx: ConfigContext) -> Effective {
        let raw_tab = self.file.editor.tab_stop;
        let tab_stop = raw_tab.clamp(MIN_TAB_STOP, ctx.max_tab_stop.max(MIN_TAB_STOP));
        if tab_stop != raw_tab {
            info!(
                target: "config",
                raw = raw_tab,
                clamped = tab_stop,
                max = ctx.max_tab_stop,
                "tab_stop_clamped"
            );
        }

        let raw_quit = self.file.editor.quit_times;
        let quit_times = raw_quit.max(1);
        if quit_times != raw_quit {
            info!(target: "config", raw = raw_quit, clamped = quit_times, "quit_times_clamped");
        }

        let raw_read = self.file.input.read_timeout_ms;
        let read_ms = raw_read.clamp(1, ctx.max_read_timeout_ms.max(1));
        if read_ms != raw_read {
            info!(
                target: "config",
                raw = raw_read,
                clamped = read_ms,
                max = ctx.max_read_timeout_ms,
                "read_timeout_clamped"
            );
        }

        let raw_msg = self.file.status.message_timeout_secs;
        let msg_secs = raw_msg.clamp(1, ctx.max_message_timeout_secs.max(1));
        if msg_secs != raw_msg {
            info!(
                target: "config",
                raw = raw_msg,
                clamped = msg_secs,
                max = ctx.max_message_timeout_secs,
                "message_timeout_clamped"
            );
        }

        self.effective = Effective {
            tab_stop: tab_stop as usize,
            quit_times,
            message_timeout: Duration::from_secs(msg_secs),
            read_timeout: Duration::from_millis(read_ms),
        };
        self.effective
    }
}
