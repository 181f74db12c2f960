use std::io::Write;
use std::sync::Mutex;

use crate::application::view::SessionView;
use crate::ports::outbound::RenderSurfacePort;

use super::render::render_view;

/// Draws every presented view to a writer, followed by a blank line.
///
/// Also the channel for prompts and one-off messages from the console, so
/// everything the user sees goes through one lock.
pub struct TerminalSurface<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Print `text` followed by a newline.
    pub fn message(&self, text: &str) {
        self.write_str(&format!("{}\n", text));
    }

    /// Print `text` without a newline and flush, for input prompts.
    pub fn prompt(&self, text: &str) {
        self.write_str(text);
    }

    fn write_str(&self, text: &str) {
        let Ok(mut out) = self.out.lock() else {
            tracing::warn!("Terminal writer poisoned");
            return;
        };
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send> RenderSurfacePort for TerminalSurface<W> {
    fn present(&self, view: &SessionView) {
        self.write_str(&format!("{}\n", render_view(view)));
    }
}
