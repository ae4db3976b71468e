//! Clipboard and share integrations.
//!
//! Both actions are fallback chains that never surface an error to the
//! user. Copy tries the system clipboard utilities in order (`xclip`,
//! `xsel`, `wl-copy`); when none works the controller falls back to showing
//! the text for manual selection. Share hands the map link to the platform
//! opener (`xdg-open`); when that is missing it degrades to a clipboard
//! copy of the link.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

/// Clipboard utilities tried in order, with the arguments that make them
/// read text from stdin.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("wl-copy", &[]),
];

/// Platform surface for copy and share actions.
///
/// A trait seam so the controller can be tested with a scripted
/// implementation.
pub trait ShareSurface {
    /// Put text on the system clipboard. Returns whether any clipboard
    /// backend accepted it.
    fn copy_text(&self, text: &str) -> bool;

    /// Open the platform share affordance for a URL. Returns whether the
    /// hand-off succeeded.
    fn open_share(&self, url: &str) -> bool;
}

/// The real platform integration.
#[derive(Debug, Default)]
pub struct SystemShare;

impl SystemShare {
    pub fn new() -> Self {
        Self
    }
}

impl ShareSurface for SystemShare {
    fn copy_text(&self, text: &str) -> bool {
        for (tool, args) in CLIPBOARD_TOOLS {
            if pipe_to_tool(tool, args, text) {
                debug!(tool, "copied text to clipboard");
                return true;
            }
        }
        debug!("no clipboard utility available");
        false
    }

    fn open_share(&self, url: &str) -> bool {
        match Command::new("xdg-open")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "xdg-open unavailable, falling back to clipboard");
                false
            }
        }
    }
}

/// Spawn a clipboard tool and feed it the text on stdin.
fn pipe_to_tool(tool: &str, args: &[&str], text: &str) -> bool {
    let child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(_) => return false,
    };

    // Take stdin so it closes after the write; the tool reads until EOF.
    let fed = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
        None => false,
    };

    if !fed {
        let _ = child.kill();
        let _ = child.wait();
        return false;
    }
    child.wait().map(|status| status.success()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_does_not_panic_without_tools() {
        // On hosts without any clipboard utility this must degrade to
        // false, never panic.
        let _ = SystemShare::new().copy_text("37.000000, -122.000000");
    }

    #[test]
    fn test_missing_tool_is_not_an_error() {
        assert!(!pipe_to_tool("definitely-not-a-clipboard-tool", &[], "x"));
    }
}
