use core::fmt;
use std::io::{self, Write};

/// A destination for rendered log lines.
pub trait Sink: Send + Sync {
    /// Write `prefix` immediately followed by `message` and a line terminator.
    ///
    /// The line is written while holding the destination's lock, so lines
    /// from concurrent callers never interleave within one sink.
    fn write_line(&self, prefix: &str, message: &dyn fmt::Display) -> io::Result<()>;

    /// Flush anything buffered by the destination.
    fn flush(&self) -> io::Result<()>;
}

/// Sink writing to the process' standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, prefix: &str, message: &dyn fmt::Display) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{prefix}{message}")
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Sink writing to the process' standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, prefix: &str, message: &dyn fmt::Display) -> io::Result<()> {
        let mut out = io::stderr().lock();
        writeln!(out, "{prefix}{message}")
    }

    fn flush(&self) -> io::Result<()> {
        io::stderr().flush()
    }
}
