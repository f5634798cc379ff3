//! Console sink: the minimal reference forwarder.

use std::io::Write;

use touch_core::event::TouchEvent;

use crate::application::forwarder::{ForwardError, Forwarder};

/// Writes each event's raw wire text verbatim, one line per event.
///
/// No coordinate mapping, no arguments.  Production connections write to
/// stdout; tests inject any `Write` sink.
pub struct ConsoleForwarder {
    out: Box<dyn Write + Send>,
}

impl ConsoleForwarder {
    /// A forwarder writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    /// A forwarder writing to the given sink.
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self { out }
    }
}

impl Default for ConsoleForwarder {
    fn default() -> Self {
        Self::new()
    }
}

impl Forwarder for ConsoleForwarder {
    fn kind(&self) -> &'static str {
        "console"
    }

    fn forward(&mut self, event: &TouchEvent) -> Result<(), ForwardError> {
        writeln!(self.out, "{}", event.raw)?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
