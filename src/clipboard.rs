//! Clipboard copy through platform commands.
//!
//! No clipboard library is linked; the digest is piped into whichever
//! command the platform provides (`pbcopy`, `wl-copy`, `xclip`, ...).
//! Inside a tmux session the tmux buffer is tried first.

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur while copying to the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard command found (tried tmux, pbcopy, clip.exe, wl-copy, xsel, xclip, termux-clipboard-set)")]
    NoClipboardFound,

    #[error("{command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A clipboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Tmux,
    MacOs,
    Windows,
    Wayland,
    Xsel,
    Xclip,
    Termux,
}

impl Provider {
    /// Program and arguments that read the text from stdin.
    pub fn command(self) -> (&'static str, &'static [&'static str]) {
        let args: &'static [&'static str] = match self {
            Provider::Tmux => &["load-buffer", "-w", "-"],
            Provider::Xsel => &["--clipboard", "--input"],
            Provider::Xclip => &["-selection", "clipboard", "-in"],
            Provider::MacOs | Provider::Windows | Provider::Wayland | Provider::Termux => &[],
        };
        let program = match self {
            Provider::Tmux => "tmux",
            Provider::MacOs => "pbcopy",
            Provider::Windows => "clip.exe",
            Provider::Wayland => "wl-copy",
            Provider::Xsel => "xsel",
            Provider::Xclip => "xclip",
            Provider::Termux => "termux-clipboard-set",
        };
        (program, args)
    }

    /// Pipe `text` through this provider's command.
    pub fn copy(self, text: &str) -> Result<(), ClipboardError> {
        let (program, args) = self.command();
        let failed = |reason: String| ClipboardError::CommandFailed {
            command: program.to_string(),
            reason,
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| failed(format!("could not start: {}", e)))?;

        // Dropping stdin closes the pipe so the command sees EOF.
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| failed("stdin unavailable".to_string()))?;
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with {}", status)))
        }
    }
}

/// Candidate providers for this platform, most preferred first.
fn candidates() -> Vec<Provider> {
    let mut providers = Vec::new();

    if env::var_os("TMUX").is_some() {
        providers.push(Provider::Tmux);
    }

    if cfg!(target_os = "macos") {
        providers.push(Provider::MacOs);
    } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
        providers.push(Provider::Windows);
    } else if cfg!(target_os = "android") {
        providers.push(Provider::Termux);
    } else {
        if env::var_os("WAYLAND_DISPLAY").is_some() {
            providers.push(Provider::Wayland);
        }
        providers.extend([Provider::Xsel, Provider::Xclip, Provider::Termux]);
    }

    providers
}

/// Check if `program` is an executable file on `PATH`.
pub fn command_exists(program: &str) -> bool {
    env::var_os("PATH").is_some_and(|paths| {
        env::split_paths(&paths).any(|dir| {
            let candidate = dir.join(program);
            candidate.is_file() || candidate.with_extension("exe").is_file()
        })
    })
}

/// Copy `text` with the first available provider.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let provider = candidates()
        .into_iter()
        .find(|p| command_exists(p.command().0))
        .ok_or(ClipboardError::NoClipboardFound)?;

    debug!(?provider, bytes = text.len(), "copying to clipboard");
    provider.copy(text)
}
