use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Severity of a logged message.
///
/// Every severity carries a distinct single-bit code so that a set of
/// severities can be stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Severity {
    /// Informational messages.
    Info = 1,
    /// Warnings.
    Warning = 1 << 1,
    /// Errors.
    Error = 1 << 2,
    /// Debug messages.
    Debug = 1 << 3,
}

impl Severity {
    /// All severities in declaration order.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Debug,
    ];

    /// The bit code of this severity.
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// The prefix written in front of every line of this severity.
    #[inline]
    pub const fn prefix(self) -> &'static str {
        match self {
            Severity::Info => "[INFO] ",
            Severity::Warning => "[WARNING] ",
            Severity::Error => "[ERROR] ",
            Severity::Debug => "[DEBUG] ",
        }
    }

    /// Combine the codes of the given severities into a mask.
    pub fn mask(severities: &[Severity]) -> u32 {
        severities.iter().fold(0, |mask, s| mask | s.code())
    }

    /// Parse a comma separated list of severities.
    ///
    /// Surrounding whitespace is ignored and an empty string is an empty list.
    pub fn parse_list(s: &str) -> Result<Vec<Severity>, ParseSeverityError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Severity::from_str)
            .collect()
    }

    const fn name(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised when a string does not name a severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity `{0}`")]
pub struct ParseSeverityError(Box<str>);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, Severity); 7] = [
            ("info", Severity::Info),
            ("warning", Severity::Warning),
            ("warn", Severity::Warning),
            ("error", Severity::Error),
            ("err", Severity::Error),
            ("debug", Severity::Debug),
            ("trace", Severity::Debug),
        ];

        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, severity)| severity)
            .ok_or_else(|| ParseSeverityError(s.into()))
    }
}

impl From<log::Level> for Severity {
    #[inline]
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseSeverityError, Severity};

    #[test]
    fn test_codes_are_distinct_bits() {
        let mut seen = 0;

        for s in Severity::ALL {
            assert_eq!(s.code().count_ones(), 1, "{s} is not a single bit");
            assert_eq!(seen & s.code(), 0, "{s} overlaps another severity");
            seen |= s.code();
        }

        assert_eq!(seen, 0b1111);
    }

    #[test]
    fn test_mask() {
        assert_eq!(Severity::mask(&[]), 0);
        assert_eq!(Severity::mask(&[Severity::Info, Severity::Error]), 0b0101);
        assert_eq!(Severity::mask(&[Severity::Debug, Severity::Debug]), 0b1000);
    }

    #[test]
    fn test_parse() {
        for s in Severity::ALL {
            assert_eq!(s.to_string().parse::<Severity>(), Ok(s));
            assert_eq!(s.to_string().to_lowercase().parse::<Severity>(), Ok(s));
        }

        assert_eq!("Warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("trace".parse::<Severity>(), Ok(Severity::Debug));

        let error = "fatal".parse::<Severity>().unwrap_err();
        assert_eq!(error, ParseSeverityError("fatal".into()));
        assert_eq!(error.to_string(), "unknown severity `fatal`");
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(Severity::parse_list(""), Ok(vec![]));
        assert_eq!(
            Severity::parse_list(" info, error ,"),
            Ok(vec![Severity::Info, Severity::Error])
        );
        assert!(Severity::parse_list("info,bogus").is_err());
    }

    #[test]
    fn test_from_log_level() {
        assert_eq!(Severity::from(log::Level::Error), Severity::Error);
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
        assert_eq!(Severity::from(log::Level::Info), Severity::Info);
        assert_eq!(Severity::from(log::Level::Debug), Severity::Debug);
        assert_eq!(Severity::from(log::Level::Trace), Severity::Debug);
    }
}
