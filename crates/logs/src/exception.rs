use core::fmt;
use core::iter;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// The maximum number of links kept when capturing an error chain.
pub const MAX_CAUSES: usize = 64;

/// A single captured stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    symbol: Box<str>,
    location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Location {
    file: Box<str>,
    line: u32,
    column: Option<u32>,
}

impl Frame {
    /// Construct a frame with no known source location.
    pub fn new(symbol: impl Into<Box<str>>) -> Self {
        Self {
            symbol: symbol.into(),
            location: None,
        }
    }

    /// Attach a source location to the frame.
    pub fn at(mut self, file: impl Into<Box<str>>, line: u32, column: Option<u32>) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line,
            column,
        });
        self
    }

    /// The symbol name of the frame.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Extract the frames of a captured backtrace, innermost first.
    ///
    /// Disabled or unsupported backtraces have no frames.
    pub fn parse_backtrace(backtrace: &Backtrace) -> Vec<Frame> {
        if backtrace.status() != BacktraceStatus::Captured {
            return Vec::new();
        }

        Self::parse_frames(&backtrace.to_string())
    }

    /// Parse the textual form of a backtrace.
    ///
    /// Frames look like `N: symbol`, optionally followed by an `at
    /// file:line:column` line. Anything else is ignored.
    fn parse_frames(text: &str) -> Vec<Frame> {
        let mut frames = Vec::<Frame>::new();

        for line in text.lines() {
            let line = line.trim();

            if let Some(path) = line.strip_prefix("at ") {
                if let Some(frame) = frames.last_mut() {
                    if frame.location.is_none() {
                        frame.location = Location::parse(path);
                    }
                }

                continue;
            }

            let Some((index, symbol)) = line.split_once(": ") else {
                continue;
            };

            if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }

            frames.push(Frame::new(symbol));
        }

        frames
    }
}

impl Location {
    fn parse(path: &str) -> Option<Self> {
        let (rest, last) = path.rsplit_once(':')?;
        let last = last.parse().ok()?;

        if let Some((file, line)) = rest.rsplit_once(':') {
            if let Ok(line) = line.parse() {
                return Some(Self {
                    file: file.into(),
                    line,
                    column: Some(last),
                });
            }
        }

        Some(Self {
            file: rest.into(),
            line: last,
            column: None,
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)?;

        if let Some(Location { file, line, column }) = &self.location {
            match column {
                Some(column) => write!(f, "({file}:{line}:{column})")?,
                None => write!(f, "({file}:{line})")?,
            }
        }

        Ok(())
    }
}

/// An owned snapshot of an error: its description, where it was raised and
/// what caused it.
///
/// The [`fmt::Display`] implementation renders the full block logged by
/// [`Logger::log_exception`]:
///
/// ```text
/// outer failure
/// 	at app::run(src/app.rs:10:5)
/// Caused by : inner failure
/// 	at app::load(src/app.rs:42:9)
/// ```
///
/// [`Logger::log_exception`]: crate::Logger::log_exception
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    description: String,
    frames: Vec<Frame>,
    cause: Option<Box<Exception>>,
}

impl Exception {
    /// Construct an exception from the default string form of `description`.
    pub fn new(description: impl fmt::Display) -> Self {
        Self {
            description: description.to_string(),
            frames: Vec::new(),
            cause: None,
        }
    }

    /// Append a stack frame.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Append stack frames, innermost first.
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = Frame>) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Set the underlying cause.
    pub fn caused_by(mut self, cause: Exception) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Capture an error and its [`Error::source`] chain.
    ///
    /// At most [`MAX_CAUSES`] links are kept, which bounds chains that refer
    /// back to themselves.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        Self::new(error).with_sources(error.source())
    }

    fn with_sources(mut self, source: Option<&(dyn Error + 'static)>) -> Self {
        let mut tail = &mut self;

        for source in iter::successors(source, |&e| e.source()).take(MAX_CAUSES - 1) {
            tail = &mut **tail.cause.insert(Box::new(Self::new(source)));
        }

        self
    }

    /// The default string form of the captured error.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Captured stack frames, innermost first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&Exception> {
        self.cause.as_deref()
    }

    /// Iterate over this exception followed by its causes.
    pub fn chain(&self) -> impl Iterator<Item = &Exception> {
        iter::successors(Some(self), |&e| e.cause())
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, e) in self.chain().enumerate() {
            if n > 0 {
                f.write_str("\nCaused by : ")?;
            }

            f.write_str(&e.description)?;

            for frame in &e.frames {
                write!(f, "\n\tat {frame}")?;
            }
        }

        Ok(())
    }
}

impl From<&anyhow::Error> for Exception {
    fn from(error: &anyhow::Error) -> Self {
        let mut chain = error.chain();

        let outer = match chain.next() {
            Some(outer) => Self::new(outer),
            None => Self::new(error),
        };

        outer
            .with_frames(Frame::parse_backtrace(error.backtrace()))
            .with_sources(chain.next())
    }
}

impl From<anyhow::Error> for Exception {
    #[inline]
    fn from(error: anyhow::Error) -> Self {
        Self::from(&error)
    }
}
