use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::sink::{Sink, StderrSink, StdoutSink};
use crate::{Logger, Severity};


/// The filter of a freshly constructed [`BasicLogger`]: errors and warnings.
pub const DEFAULT_FILTER: u32 = Severity::Error.code() | Severity::Warning.code();

/// A [`Logger`] writing to the standard streams.
///
/// Info, debug and warning messages go to standard output, errors go to
/// standard error. Every line is prefixed with its severity tag, like
/// `[WARNING] disk almost full`.
///
/// The sinks are type parameters so that output can be redirected, but the
/// routing above is fixed.
pub struct BasicLogger<O = StdoutSink, E = StderrSink> {
    filter: AtomicU32,
    out: O,
    err: E,
}

impl BasicLogger {
    /// Construct a logger for the standard streams with the default filter.
    pub const fn new() -> Self {
        Self::with_sinks(StdoutSink, StderrSink)
    }
}

impl Default for BasicLogger {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<O, E> BasicLogger<O, E> {
    /// Construct a logger writing to custom sinks with the default filter.
    pub const fn with_sinks(out: O, err: E) -> Self {
        Self {
            filter: AtomicU32::new(DEFAULT_FILTER),
            out,
            err,
        }
    }

    /// The current filter mask.
    #[inline]
    pub fn filter_mask(&self) -> u32 {
        self.filter.load(Ordering::Acquire)
    }

    /// The sink receiving info, debug and warning lines.
    pub fn out(&self) -> &O {
        &self.out
    }

    /// The sink receiving error lines.
    pub fn err(&self) -> &E {
        &self.err
    }
}

impl<O, E> BasicLogger<O, E>
where
    O: Sink,
    E: Sink,
{
    fn sink(&self, severity: Severity) -> &dyn Sink {
        match severity {
            Severity::Info | Severity::Debug | Severity::Warning => &self.out,
            Severity::Error => &self.err,
        }
    }

    pub(crate) fn flush_sinks(&self) {
        // Flush failures have nowhere to be reported.
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

impl<O, E> Logger for BasicLogger<O, E>
where
    O: Sink,
    E: Sink,
{
    /// Replace the set of logged severities.
    ///
    /// By default, only errors and warnings are logged.
    fn filter(&self, severities: &[Severity]) {
        self.filter.store(Severity::mask(severities), Ordering::Release);
    }

    fn log(&self, severity: Severity, message: &dyn fmt::Display) {
        if !self.is_logable(severity) {
            return;
        }

        // Write failures are left to the stream.
        let _ = self.sink(severity).write_line(severity.prefix(), message);
    }

    #[inline]
    fn is_logable(&self, severity: Severity) -> bool {
        severity.code() & self.filter_mask() != 0
    }
}
