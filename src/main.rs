use std::backtrace::Backtrace;
use std::ffi::OsString;
use std::io::{self, BufRead};

use anyhow::{anyhow, bail, Context, Result};
use logs::{BasicLogger, Exception, Frame, Logger, Severity};

/// Environment variable consulted when `--filter` is not given.
const FILTER_ENV: &str = "LOGS_FILTER";

static LOGGER: BasicLogger = BasicLogger::new();

#[derive(Debug, Default)]
struct Opts {
    filter: Option<Vec<Severity>>,
    severity: Option<Severity>,
    exception: bool,
    messages: Vec<OsString>,
}

impl Opts {
    /// Parse CLI options, not including the program name.
    pub fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut opts = Self::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let Some(arg) = arg.to_str() else {
                opts.messages.push(arg);
                break;
            };

            match arg {
                "--filter" => {
                    if opts.filter.is_some() {
                        bail!("duplicate `--filter` arguments");
                    }

                    let filter = it.next().context("missing argument to `--filter`")?;
                    let filter = filter
                        .to_str()
                        .context("missing string argument to `--filter`")?;
                    opts.filter = Some(
                        Severity::parse_list(filter).context("bad argument to `--filter`")?,
                    );
                }
                "--severity" => {
                    let severity = it.next().context("missing argument to `--severity`")?;
                    let severity = severity
                        .to_str()
                        .context("missing string argument to `--severity`")?;
                    opts.severity = Some(
                        severity
                            .parse()
                            .context("bad argument to `--severity`")?,
                    );
                }
                "--exception" => {
                    opts.exception = true;
                }
                "--" => {
                    break;
                }
                other if other.starts_with("--") => {
                    bail!("unsupported argument: {other}");
                }
                _ => {
                    opts.messages.push(arg.into());
                    break;
                }
            }
        }

        if opts.exception && opts.severity.is_some() {
            bail!("`--exception` always logs as ERROR and cannot be combined with `--severity`");
        }

        opts.messages.extend(it);
        Ok(opts)
    }

    /// The filter to apply, from the command line or else from `env`, the
    /// value of `LOGS_FILTER`.
    fn filter(&self, env: Option<OsString>) -> Result<Option<Vec<Severity>>> {
        if let Some(filter) = &self.filter {
            return Ok(Some(filter.clone()));
        }

        let Some(value) = env else {
            return Ok(None);
        };

        let value = value
            .to_str()
            .with_context(|| anyhow!("{FILTER_ENV} is not utf-8"))?;

        let filter =
            Severity::parse_list(value).with_context(|| anyhow!("bad value in {FILTER_ENV}"))?;

        Ok(Some(filter))
    }

    fn emit(&self, logger: &dyn Logger, message: &str) {
        if self.exception {
            let frames = Frame::parse_backtrace(&Backtrace::capture());
            logger.log_exception(&Exception::new(message).with_frames(frames));
            return;
        }

        match self.severity {
            Some(severity) => logger.log(severity, &message),
            None => logger.log_message(&message),
        }
    }
}

/// Log every message given on the command line, or every line of `input` if
/// there are none.
fn run(opts: &Opts, logger: &dyn Logger, input: impl BufRead) -> Result<()> {
    if !opts.messages.is_empty() {
        for message in &opts.messages {
            opts.emit(logger, &message.to_string_lossy());
        }

        return Ok(());
    }

    for line in input.lines() {
        let line = line.context("reading stdin")?;
        opts.emit(logger, &line);
    }

    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse(std::env::args_os().skip(1))?;

    logs::init(&LOGGER).map_err(|error| anyhow!("failed to set log: {error}"))?;

    if let Some(filter) = opts.filter(std::env::var_os(FILTER_ENV))? {
        LOGGER.filter(&filter);
    }

    run(&opts, &LOGGER, io::stdin().lock())
}
