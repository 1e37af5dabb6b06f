//! Serialized output sinks shared by watch sessions.
//!
//! All sessions and the orchestrator write through one [`RecordSink`]. A
//! record's two display lines must land adjacently in the output even when
//! sessions deliver concurrently, so every implementation serializes
//! writes behind a single lock.

use std::io::{self, Write};

use parking_lot::Mutex;

/// Ordered, line-buffered text output shared by all writers.
///
/// `write_block` emits a record's two lines as one non-interleaved unit.
pub trait RecordSink: Send + Sync {
    /// Writes one record block (header plus indented description).
    fn write_block(&self, header: &str, body: &str);

    /// Writes one informational line.
    fn write_line(&self, line: &str);
}

/// Sink wrapping any [`Write`] target behind a single writer lock.
pub struct ConsoleSink<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleSink<io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Creates a sink over an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self {
            out: Mutex::new(writer),
        }
    }

    /// Consumes the sink, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> RecordSink for ConsoleSink<W> {
    fn write_block(&self, header: &str, body: &str) {
        let mut out = self.out.lock();
        // Output failure has nowhere useful to go
        let _ = writeln!(out, "{header}");
        let _ = writeln!(out, "{body}");
        let _ = out.flush();
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

/// In-memory sink collecting output lines, for embedding and tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    /// Creates an empty buffer sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Returns the number of lines written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl RecordSink for BufferSink {
    fn write_block(&self, header: &str, body: &str) {
        let mut lines = self.lines.lock();
        lines.push(header.to_string());
        lines.push(body.to_string());
    }

    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn console_sink_writes_block_lines() {
        let sink = ConsoleSink::new(Vec::new());
        sink.write_block("header", "    body");
        sink.write_line("hint");

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "header\n    body\nhint\n");
    }

    #[test]
    fn buffer_sink_collects_lines() {
        let sink = BufferSink::new();
        assert!(sink.is_empty());

        sink.write_block("h", "b");
        assert_eq!(sink.lines(), vec!["h".to_string(), "b".to_string()]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn concurrent_blocks_never_interleave() {
        let sink = Arc::new(BufferSink::new());
        let mut handles = Vec::new();

        for writer in 0..4 {
            let sink = Arc::clone(&sink);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    sink.write_block(&format!("header {writer}:{i}"), &format!("    body {writer}:{i}"));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), 800);
        for pair in lines.chunks(2) {
            let tag = pair[0].trim_start_matches("header ");
            assert_eq!(pair[1], format!("    body {tag}"));
        }
    }
}
