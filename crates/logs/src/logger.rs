use core::fmt;

use crate::{Exception, Severity};

/// Severity-filtered logging operations.
///
/// Implementations decide where messages end up. The trait is object safe, so
/// callers can share a `&dyn Logger` without knowing the destination.
pub trait Logger {
    /// Replace the set of severities that can be logged.
    ///
    /// The previous set is discarded. An empty slice disables logging
    /// entirely.
    fn filter(&self, severities: &[Severity]);

    /// Log `message` with the given severity, if that severity is enabled.
    fn log(&self, severity: Severity, message: &dyn fmt::Display);

    /// Log `message` as [`Severity::Info`].
    fn log_message(&self, message: &dyn fmt::Display) {
        self.log(Severity::Info, message);
    }

    /// Log the rendered `exception` as [`Severity::Error`].
    fn log_exception(&self, exception: &Exception) {
        self.log(Severity::Error, exception);
    }

    /// Test if messages of the given severity are currently logged.
    fn is_logable(&self, severity: Severity) -> bool;
}
