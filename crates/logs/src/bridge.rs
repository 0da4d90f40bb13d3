use log::{LevelFilter, Log};

use crate::sink::Sink;
use crate::{BasicLogger, Logger, Severity};

impl<O, E> Log for BasicLogger<O, E>
where
    O: Sink,
    E: Sink,
{
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_logable(Severity::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        Logger::log(self, Severity::from(record.level()), record.args());
    }

    fn flush(&self) {
        self.flush_sinks();
    }
}

/// Install `logger` as the backend of the [`log`] facade.
///
/// The facade's own max level is lifted to [`LevelFilter::Trace`] so that the
/// logger's filter mask is the only filter in effect.
pub fn init<O, E>(logger: &'static BasicLogger<O, E>) -> Result<(), log::SetLoggerError>
where
    O: Sink + 'static,
    E: Sink + 'static,
{
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use core::fmt::{self, Write};
    use std::io;
    use std::sync::Mutex;

    use log::{Level, Log, Metadata, Record};

    use crate::sink::Sink;
    use crate::{BasicLogger, Logger, Severity};

    #[derive(Default)]
    struct Lines(Mutex<String>);

    impl Sink for Lines {
        fn write_line(&self, prefix: &str, message: &dyn fmt::Display) -> io::Result<()> {
            let mut out = self.0.lock().unwrap();
            writeln!(out, "{prefix}{message}").map_err(|_| io::ErrorKind::Other.into())
        }

        fn flush(&self) -> io::Result<()> {
            Ok(())
        }
    }

    fn enabled(logger: &BasicLogger<Lines, Lines>, level: Level) -> bool {
        Log::enabled(logger, &Metadata::builder().level(level).build())
    }

    #[test]
    fn test_enabled_follows_filter() {
        let logger = BasicLogger::with_sinks(Lines::default(), Lines::default());

        assert!(enabled(&logger, Level::Error));
        assert!(enabled(&logger, Level::Warn));
        assert!(!enabled(&logger, Level::Info));
        assert!(!enabled(&logger, Level::Trace));

        logger.filter(&[Severity::Debug]);

        assert!(enabled(&logger, Level::Debug));
        assert!(enabled(&logger, Level::Trace));
        assert!(!enabled(&logger, Level::Error));
    }

    #[test]
    fn test_records_are_routed() {
        let logger = BasicLogger::with_sinks(Lines::default(), Lines::default());
        logger.filter(&Severity::ALL);

        for level in [Level::Trace, Level::Info, Level::Warn, Level::Error] {
            Log::log(
                &logger,
                &Record::builder()
                    .level(level)
                    .args(format_args!("via {level}"))
                    .build(),
            );
        }

        Log::flush(&logger);

        assert_eq!(
            *logger.out().0.lock().unwrap(),
            "[DEBUG] via TRACE\n[INFO] via INFO\n[WARNING] via WARN\n"
        );
        assert_eq!(*logger.err().0.lock().unwrap(), "[ERROR] via ERROR\n");
    }

    #[test]
    fn test_disabled_records_are_dropped() {
        let logger = BasicLogger::with_sinks(Lines::default(), Lines::default());

        Log::log(
            &logger,
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("quiet"))
                .build(),
        );

        assert!(logger.out().0.lock().unwrap().is_empty());
    }
}
