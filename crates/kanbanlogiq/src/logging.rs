//! Tracing setup for the `kanbanlogiq` binary.
//!
//! The library only emits events. `-q` keeps stderr to errors, each `-v`
//! steps from info to debug to trace, and `RUST_LOG` overrides the flags
//! entirely. Storage and template internals stay at `warn` unless tracing,
//! so `-v` shows our own decisions without SQLite chatter.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

/// How much the binary logs to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Info and up.
    #[default]
    Normal,
    /// Debug (`-v`).
    Verbose,
    /// Everything, dependencies included (`-vv`).
    Trace,
}

impl Verbosity {
    /// Level for a `-v` count, unless `-q` wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// Level applied to this crate's events.
    #[must_use]
    pub fn level(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::INFO,
            Self::Verbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(self) -> String {
        let level = self.level();
        if self == Self::Trace {
            level.to_string().to_lowercase()
        } else {
            format!("warn,kanbanlogiq={}", level.to_string().to_lowercase())
        }
    }

    /// Targets and source locations are only worth printing when debugging.
    fn detailed(self) -> bool {
        self >= Self::Verbose
    }
}

impl From<&Cli> for Verbosity {
    fn from(cli: &Cli) -> Self {
        Self::from_flags(cli.verbose, cli.quiet)
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Rendered fragments go to stdout, so logs never mix with them. A second
/// call is a no-op.
///
/// ```no_run
/// use kanbanlogiq::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let detailed = verbosity.detailed();
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(detailed)
                .with_file(detailed)
                .with_line_number(detailed),
        )
        .try_init();
}

/// Warnings and errors through the test writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
