// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `r3bl_input_console` library gives your CLI program a console in which the line
//! the user is typing is kept separate from the output lines that your program prints.
//! Output is printed *above* a fixed prompt line, which is redrawn after every keystroke
//! and after every output line, so the two never interfere with each other.
//!
//! # Why use this crate
//!
//! When a thread is blocked in a `read_line()` style call and another task writes to
//! `stdout` concurrently, the other task assumes the caret is at column 0 of a fresh
//! line. It isn't, so the partially typed input and the output get jumbled together. This
//! crate fixes that by owning the prompt line:
//!
//! - Every output line starts by erasing the current prompt line, prints the message,
//!   and then reprints the prompt along with whatever the user had typed so far.
//! - Every keystroke repaints the prompt line. The first word of the input is colorized:
//!   green when it names a registered command, red when it doesn't.
//! - When the user presses `Enter`, the line is dispatched to the command that its first
//!   word names. When they press `Ctrl+C`, the session ends.
//!
//! # How to use this crate
//!
//! 1. Create an [`InputConsole`], eg with [`InputConsole::try_new_stdio()`].
//! 2. Register commands with [`InputConsole::register_command()`], and optionally a
//!    fallback with [`InputConsole::set_unknown_command_handler()`]. Handlers that need
//!    to print capture a [`ConsoleWriter`] from [`InputConsole::clone_writer()`].
//! 3. Call [`InputConsole::listen()`]. This spawns the read loop as a tokio task and
//!    returns a [`ConsoleSession`] right away.
//! 4. From anywhere (other tasks, threads, or `tracing` via
//!    [`tracing_setup::DisplayPreference::ConsoleWriter`]) print using a
//!    [`ConsoleWriter`]. It is cheap to clone and thread safe.
//! 5. Await [`ConsoleSession::wait()`] to find out when the user pressed `Ctrl+C`.
//!
//! ```no_run
//! use r3bl_input_console::InputConsole;
//!
//! # async fn run() -> miette::Result<()> {
//! let Some(mut console) = InputConsole::try_new_stdio() else {
//!     return Ok(()); // Not a terminal, eg: output is piped.
//! };
//! let writer = console.clone_writer();
//! console.register_command("add", move |args: &[String]| {
//!     let sum: i64 = args.iter().filter_map(|it| it.parse::<i64>().ok()).sum();
//!     writer.println(sum).map_err(|err| miette::miette!("{err}"))
//! });
//! let session = console.listen("> ");
//! session.wait().await.map_err(|err| miette::miette!("{err}"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! Both ends of the terminal are injected. The keys come from a [`KeySource`], which is
//! any `Send` stream of [`KeyResult`] plus a [`RawModeDriver`]. The output goes to any
//! `std::io::Write + Send`. The `r3bl_test_fixtures` crate has a `StdoutMock` and stream
//! generators that plug into these, and [`MockRawMode`] counts raw mode transitions.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod commands;
pub mod console;
pub mod line_editor;
pub mod terminal_io;
pub mod tracing_setup;

// Re-export the public API.
pub use commands::*;
pub use console::*;
pub use line_editor::*;
pub use terminal_io::*;

// Type aliases.
use futures_core::Stream;
use std::{pin::Pin, sync::Arc};

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output device (raw terminal, `StdoutMock`, etc).
pub type SendRawTerminal = dyn std::io::Write + Send;

/// Type alias for a pinned stream that can be moved into a spawned task. `T` is usually
/// [`KeyResult`].
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// The shared output state, guarded by the one output-writer lock.
pub type SafeConsoleOutput = Arc<StdMutex<ConsoleOutput>>;

/// The lifecycle state, shared between the read loop and whoever holds the session.
pub type SafeConsoleState = Arc<StdMutex<ConsoleState>>;

// Constants.
pub const DEFAULT_PROMPT: &str = "> ";
