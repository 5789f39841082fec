//! I/O ports used by READ, WRITE, DPRINT and BREAK.
//!
//! The executor only sees the [`InputPort`] and [`OutputPort`] traits. The
//! concrete ports here adapt any `std::io` reader or writer.

use std::io::{BufRead, Write};

/// Sink for formatted values.
///
/// Writes are infallible from the executor's point of view. Implementations
/// that can fail record the failure for the caller to inspect afterwards.
pub trait OutputPort {
    fn write_int(&mut self, value: i64);
    fn write_string(&mut self, value: &str);
    fn write_bool(&mut self, value: bool);
}

/// Source of values for READ. `None` means no value is available.
pub trait InputPort {
    fn read_int(&mut self) -> Option<i64>;
    fn read_string(&mut self) -> Option<String>;
    fn read_bool(&mut self) -> Option<bool>;
}

/// The three ports of one execution.
pub struct Ports<'io> {
    pub input: &'io mut dyn InputPort,
    pub output: &'io mut dyn OutputPort,
    pub diagnostics: &'io mut dyn OutputPort,
}

/// Output port over a [`Write`].
///
/// After the first write error, further writes are skipped and the error
/// is kept.
#[derive(Debug)]
pub struct WriterPort<W: Write> {
    inner: W,
    error: Option<std::io::Error>,
}

impl<W: Write> WriterPort<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// The first write error, if any.
    pub fn error(&self) -> Option<&std::io::Error> {
        self.error.as_ref()
    }

    /// Flush the writer and surface the first error seen.
    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_text(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.inner.write_all(text.as_bytes()) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> OutputPort for WriterPort<W> {
    fn write_int(&mut self, value: i64) {
        self.write_text(&value.to_string());
    }

    fn write_string(&mut self, value: &str) {
        self.write_text(value);
    }

    fn write_bool(&mut self, value: bool) {
        self.write_text(if value { "true" } else { "false" });
    }
}

/// Line-oriented input port over a [`BufRead`]. Each read consumes one line.
#[derive(Debug)]
pub struct LineInput<R: BufRead> {
    inner: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.inner.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let end = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(end);
                Some(line)
            }
        }
    }
}

impl<R: BufRead> InputPort for LineInput<R> {
    fn read_int(&mut self) -> Option<i64> {
        self.next_line()?.trim().parse::<i64>().ok()
    }

    fn read_string(&mut self) -> Option<String> {
        self.next_line()
    }

    fn read_bool(&mut self) -> Option<bool> {
        let line = self.next_line()?;
        Some(line.trim().eq_ignore_ascii_case("true"))
    }
}

/// Input port with nothing to read.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl InputPort for NoInput {
    fn read_int(&mut self) -> Option<i64> {
        None
    }

    fn read_string(&mut self) -> Option<String> {
        None
    }

    fn read_bool(&mut self) -> Option<bool> {
        None
    }
}
