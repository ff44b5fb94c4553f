// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tracing for programs that use an [`crate::InputConsole`]. Logging to `stdout` while
//! the user is typing corrupts the prompt line, so the display layer can be pointed at a
//! [`ConsoleWriter`] with [`DisplayPreference::ConsoleWriter`]. Each log line is then
//! printed above the prompt like any other output line.
//!
//! ```no_run
//! use r3bl_input_console::{InputConsole,
//!                          tracing_setup::{self, DisplayPreference, TracingConfig}};
//!
//! # fn run() -> miette::Result<()> {
//! let Some(console) = InputConsole::try_new_stdio() else { return Ok(()) };
//! tracing_setup::init(TracingConfig::new(DisplayPreference::ConsoleWriter(
//!     console.clone_writer(),
//! )))?;
//! # Ok(())
//! # }
//! ```

use std::{io, path::PathBuf, str::FromStr};

use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use crate::ConsoleWriter;

/// Fields:
/// - `writers`: Vec<[`WriterArg`]> - Zero or more writers to use for tracing.
/// - `level`: [`tracing::Level`] - The log level to use for tracing.
/// - `tracing_log_file_path_and_prefix`: [`String`] - The file path and prefix to use for
///   the log file. Eg: `/tmp/console_demo.log` or `console_demo.log`.
/// - `preferred_display`: [`DisplayPreference`] - Where the display layer writes to.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub writers: Vec<WriterArg>,
    pub level: tracing::Level,
    pub tracing_log_file_path_and_prefix: String,
    pub preferred_display: DisplayPreference,
}

impl TracingConfig {
    /// Log at `DEBUG` level to both the given [`DisplayPreference`] and a file.
    #[must_use]
    pub fn new(preferred_display: DisplayPreference) -> Self {
        Self {
            writers: vec![WriterArg::File, WriterArg::Stdout],
            level: tracing::Level::DEBUG,
            tracing_log_file_path_and_prefix: "tracing_log_file_debug.log".to_string(),
            preferred_display,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }
}

/// Parsed from the command line (by the `clap` crate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriterArg {
    Stdout,
    File,
    None,
}

/// The `clap` crate parses this into a string. This converts it into a [`WriterArg`].
impl FromStr for WriterArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(WriterArg::Stdout),
            "file" => Ok(WriterArg::File),
            "none" | "" => Ok(WriterArg::None),
            _ => Err(format!("{s} is not a valid tracing writer")),
        }
    }
}

#[derive(Clone, Debug)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
    /// Print log lines above the prompt line of an [`crate::InputConsole`].
    ConsoleWriter(ConsoleWriter),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriterConfig {
    Display,
    File,
    DisplayAndFile,
}

type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
    };
}

impl WriterConfig {
    /// Returns [`None`] if there are no display or file writers in `writers`.
    #[must_use]
    pub fn try_from_writers(writers: &[WriterArg]) -> Option<WriterConfig> {
        let contains_file_writer = writers.contains(&WriterArg::File);
        let contains_stdout_writer = writers.contains(&WriterArg::Stdout);
        match (contains_file_writer, contains_stdout_writer) {
            (true, true) => Some(WriterConfig::DisplayAndFile),
            (true, false) => Some(WriterConfig::File),
            (false, true) => Some(WriterConfig::Display),
            (false, false) => None,
        }
    }

    fn has_display(self) -> bool {
        matches!(self, WriterConfig::Display | WriterConfig::DisplayAndFile)
    }

    fn has_file(self) -> bool {
        matches!(self, WriterConfig::File | WriterConfig::DisplayAndFile)
    }

    /// This erases the concrete type of the writer, and returns a boxed layer, so that it
    /// can be composed with the other layers. More info
    /// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
    #[must_use]
    pub fn create_display_layer<S>(
        self,
        level_filter: LevelFilter,
        preferred_display: DisplayPreference,
    ) -> Option<Box<DynLayer<S>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        if !self.has_display() {
            return None;
        }

        let fmt_layer = create_fmt!();

        let layer: Box<DynLayer<S>> = match preferred_display {
            DisplayPreference::Stdout => {
                Box::new(fmt_layer.with_writer(io::stdout).with_filter(level_filter))
            }
            DisplayPreference::Stderr => {
                Box::new(fmt_layer.with_writer(io::stderr).with_filter(level_filter))
            }
            DisplayPreference::ConsoleWriter(console_writer) => {
                // The colors would be mixed up with the prompt's, so they are off.
                let make_writer = move || console_writer.clone();
                Box::new(
                    fmt_layer
                        .with_ansi(false)
                        .with_writer(make_writer)
                        .with_filter(level_filter),
                )
            }
        };

        Some(layer)
    }

    /// Same as [`WriterConfig::create_display_layer()`], for the log file.
    ///
    /// # Errors
    ///
    /// Returns an error if `tracing_log_file_path_and_prefix` has no file name.
    pub fn try_create_file_layer<S>(
        self,
        level_filter: LevelFilter,
        tracing_log_file_path_and_prefix: &str,
    ) -> miette::Result<Option<Box<DynLayer<S>>>>
    where
        S: tracing_core::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        if !self.has_file() {
            return Ok(None);
        }

        let file = try_create_file_appender(tracing_log_file_path_and_prefix)?;
        let fmt_layer = create_fmt!().with_ansi(false);
        Ok(Some(Box::new(
            fmt_layer.with_writer(file).with_filter(level_filter),
        )))
    }
}

/// Install the global subscriber. Does nothing if `tracing_config` has no writers.
///
/// # Errors
///
/// Returns an error if the file layer can't be created, or if a global subscriber has
/// already been installed.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    if let Some(layers) = try_create_layers(&tracing_config)? {
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .map_err(|err| miette::miette!("{err}"))?;
    }
    Ok(())
}

/// Returns the layers, or [`None`] if `tracing_config` has no writers. Once you have the
/// layers, you can run: `tracing_subscriber::registry().with(layers).init()`.
///
/// # Errors
///
/// Returns an error if the file layer can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    let Some(writer_config) = WriterConfig::try_from_writers(&tracing_config.writers)
    else {
        return Ok(None);
    };

    let level_filter = tracing_config.get_level_filter();

    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Also applies to layers added later on that don't have their own level filter.
    layers.push(Box::new(level_filter));

    if let Some(layer) = writer_config
        .create_display_layer(level_filter, tracing_config.preferred_display.clone())
    {
        layers.push(layer);
    }

    if let Some(layer) = writer_config.try_create_file_layer(
        level_filter,
        &tracing_config.tracing_log_file_path_and_prefix,
    )? {
        layers.push(layer);
    }

    Ok(Some(layers))
}

/// Note that if you wrap this up in a non blocking writer, eg:
/// `tracing_appender::non_blocking(try_create_file_appender("foo")?)`, the guard has to
/// be kept alive, or nothing gets written.
fn try_create_file_appender(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let parent = match path.parent() {
        Some(it) if !it.as_os_str().is_empty() => it.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(tracing_appender::rolling::never(parent, file_name))
}
