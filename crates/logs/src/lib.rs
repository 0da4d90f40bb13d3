//! A small severity-filtered logger.
//!
//! The [`Logger`] trait describes the logging operations, and [`BasicLogger`]
//! implements them by writing prefixed lines to the standard streams:
//!
//! ```
//! use logs::{BasicLogger, Logger, Severity};
//!
//! let logger = BasicLogger::new();
//! logger.filter(&[Severity::Info, Severity::Error]);
//!
//! // [INFO] starting
//! logger.log_message(&"starting");
//! // Dropped, warnings are not enabled.
//! logger.log(Severity::Warning, &"low on memory");
//! ```
//!
//! A [`BasicLogger`] can also serve as the backend of the [`log`] facade
//! through [`init`].

mod basic;
mod bridge;
mod exception;
mod logger;
mod severity;
mod sink;

pub use self::basic::{BasicLogger, DEFAULT_FILTER};
pub use self::bridge::init;
pub use self::exception::{Exception, Frame, MAX_CAUSES};
pub use self::logger::Logger;
pub use self::severity::{ParseSeverityError, Severity};
pub use self::sink::{Sink, StderrSink, StdoutSink};
