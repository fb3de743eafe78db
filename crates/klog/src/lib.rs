//! Kernel logging backend.
//!
//! Driver code logs through the `log` facade (`log::info!` and friends).
//! This crate is the backend the host installs once at load time: each
//! record is rendered as
//!
//! ```text
//! [ INFO] simple_driver: registered correctly with major number 240
//! ```
//!
//! and handed to a host-provided [`Sink`] (the console, a ring buffer, ...).
#![cfg_attr(not(test), no_std)]

use core::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

/// Where rendered log lines go. Called once per record, newline included.
pub type Sink = fn(fmt::Arguments<'_>);

/// Fixed-width tag printed in front of every line.
pub fn tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "TRACE",
        log::Level::Debug => "DEBUG",
        log::Level::Info => " INFO",
        log::Level::Warn => " WARN",
        log::Level::Error => "ERROR",
    }
}

/// ANSI color for a level's tag.
pub fn color(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "\x1b[90m", // Gray
        log::Level::Debug => "\x1b[36m", // Cyan
        log::Level::Info => "\x1b[32m",  // Green
        log::Level::Warn => "\x1b[33m",  // Yellow
        log::Level::Error => "\x1b[31m", // Red
    }
}

/// Backend settings, fixed at [`init`].
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Most verbose level that reaches the sink.
    pub level: LevelFilter,
    /// Wrap the level tag in ANSI color codes.
    pub color: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            color: false,
        }
    }
}

struct KernelLogger {
    sink: Once<(Sink, Options)>,
}

static LOGGER: KernelLogger = KernelLogger { sink: Once::new() };

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.sink
            .get()
            .is_some_and(|(_, options)| metadata.level() <= options.level)
    }

    fn log(&self, record: &Record<'_>) {
        let Some((sink, options)) = self.sink.get() else {
            return;
        };
        if record.level() > options.level {
            return;
        }
        let target = record.target().split("::").next().unwrap_or_default();
        if options.color {
            sink(format_args!(
                "{}[{}]\x1b[0m {}: {}\n",
                color(record.level()),
                tag(record.level()),
                target,
                record.args()
            ));
        } else {
            sink(format_args!("[{}] {}: {}\n", tag(record.level()), target, record.args()));
        }
    }

    fn flush(&self) {}
}

/// Install the kernel logger.
///
/// Fails if a logger (this one or any other) is already installed.
pub fn init(sink: Sink, options: Options) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    LOGGER.sink.call_once(|| (sink, options));
    log::set_max_level(options.level);
    Ok(())
}
