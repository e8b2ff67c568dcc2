//! Output sink capability
//!
//! The pipeline streams its own status lines and all external-tool output
//! to a sink passed by reference through every stage; nothing owns a global
//! output surface.

use std::io::Write;
use std::sync::Mutex;

/// Receives pipeline and tool output as plain text
///
/// Methods take `&self` so the two concurrently drained channels of one
/// process can share a sink; implementations handle their own interior
/// mutability.
pub trait OutputSink {
    /// Append text; may be a partial line
    fn write(&self, text: &str);

    /// Reset the output surface at the start of a run
    fn clear(&self) {}

    /// Append a full line
    fn write_line(&self, line: &str) {
        self.write(line);
        self.write("\r\n");
    }
}

/// Sink that forwards to the process's stdout
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, text: &str) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn clear(&self) {
        // Erase display, then cursor home
        self.write("\x1b[2J\x1b[H");
    }
}

/// Sink that records everything written; used for capture and in tests
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: Mutex<String>,
}

impl BufferSink {
    /// Create an empty buffer sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }
}

impl OutputSink for BufferSink {
    fn write(&self, text: &str) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push_str(text);
        }
    }

    fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}
