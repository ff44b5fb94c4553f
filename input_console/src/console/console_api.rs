// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Display,
          io::{self, IsTerminal, Write},
          sync::{Arc, PoisonError}};

use tokio::task::JoinHandle;

use crate::{CommandRegistry, ConsoleError, ConsoleOutput, ConsoleWriter, KeySource,
            SafeConsoleOutput, SafeConsoleState, StdMutex, UnknownCommandHandler,
            console::read_loop, lock_console_output};

/// Lifecycle of a console. It only moves forward: `Idle` → `Listening` → `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ConsoleState {
    /// Commands can be registered. Nothing is being read.
    Idle,
    /// The read loop is running.
    Listening,
    /// The read loop has ended, either because of `Ctrl+C` or a driver error. A session
    /// can't be restarted.
    Terminated,
}

/// A console that is set up but not yet listening. Register commands, then call
/// [`InputConsole::listen()`].
///
/// The commands are only reached through the console's own methods:
///
/// ```compile_fail
/// # use r3bl_input_console::InputConsole;
/// fn names(console: &InputConsole) -> Vec<String> {
///     console.command_registry.command_names()
/// }
/// ```
#[allow(missing_debug_implementations)]
pub struct InputConsole {
    command_registry: CommandRegistry,
    key_source: KeySource,
    safe_console_output: SafeConsoleOutput,
    safe_state: SafeConsoleState,
}

impl InputConsole {
    /// Use any `Write` as the terminal, and any [`KeySource`] for the keys. This is how
    /// tests inject a `StdoutMock` and a generated stream of keys.
    #[must_use]
    pub fn new(raw_terminal: impl Write + Send + 'static, key_source: KeySource) -> Self {
        Self {
            command_registry: CommandRegistry::new(),
            key_source,
            safe_console_output: Arc::new(StdMutex::new(ConsoleOutput::new(raw_terminal))),
            safe_state: Arc::new(StdMutex::new(ConsoleState::Idle)),
        }
    }

    /// A console on `stdout`, reading keys from the terminal.
    ///
    /// Returns [`None`] if `stdin` or `stdout` is not a terminal, eg:
    /// `echo "foo" | cargo run --bin console_demo`, or when running in `cargo test`.
    #[must_use]
    pub fn try_new_stdio() -> Option<Self> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return None;
        }
        Some(Self::new(io::stdout(), KeySource::new_crossterm()))
    }

    /// Registering the same `name` again replaces the previous handler.
    pub fn register_command<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[String]) -> miette::Result<()> + Send + 'static,
    {
        self.command_registry.register_command(name, handler);
    }

    pub fn set_unknown_command_handler<H>(&mut self, handler: H)
    where
        H: UnknownCommandHandler + 'static,
    {
        self.command_registry.set_unknown_command_handler(handler);
    }

    pub fn clear_unknown_command_handler(&mut self) {
        self.command_registry.clear_unknown_command_handler();
    }

    #[must_use]
    pub fn command_names(&self) -> Vec<String> { self.command_registry.command_names() }

    /// The writer keeps working after [`InputConsole::listen()`] has been called, so
    /// clones can be captured by command handlers before listening.
    #[must_use]
    pub fn clone_writer(&self) -> ConsoleWriter {
        ConsoleWriter::new(self.safe_console_output.clone())
    }

    /// Print `content` as one output line. Before listening, the default prompt is
    /// repainted beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn println(&self, content: impl Display) -> io::Result<()> {
        lock_console_output(&self.safe_console_output).write_line(&content.to_string())
    }

    #[must_use]
    pub fn state(&self) -> ConsoleState { get_state(&self.safe_state) }

    /// Start reading keys with `prompt` on the prompt line. The read loop is spawned as a
    /// tokio task, and this returns right away. The commands can't be changed after this
    /// point, since the console is moved into the read loop.
    ///
    /// # Panics
    ///
    /// If it is not called from inside a tokio runtime.
    pub fn listen(self, prompt: impl Into<String>) -> ConsoleSession {
        let prompt = prompt.into();
        tracing::debug!(message = "Listening", prompt = ?prompt);

        lock_console_output(&self.safe_console_output).prompt = prompt;
        set_state(&self.safe_state, ConsoleState::Listening);

        let writer = ConsoleWriter::new(self.safe_console_output.clone());
        let safe_state = self.safe_state.clone();
        let join_handle = tokio::spawn(read_loop::run(
            self.key_source,
            self.command_registry,
            self.safe_console_output,
            self.safe_state,
        ));

        ConsoleSession {
            writer,
            safe_state,
            join_handle,
        }
    }
}

/// Handle to a running console, returned by [`InputConsole::listen()`].
#[derive(Debug)]
pub struct ConsoleSession {
    writer: ConsoleWriter,
    safe_state: SafeConsoleState,
    join_handle: JoinHandle<Result<(), ConsoleError>>,
}

impl ConsoleSession {
    #[must_use]
    pub fn state(&self) -> ConsoleState { get_state(&self.safe_state) }

    #[must_use]
    pub fn clone_writer(&self) -> ConsoleWriter { self.writer.clone() }

    /// Print `content` as one output line, above the prompt line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn println(&self, content: impl Display) -> io::Result<()> {
        self.writer.println(content)
    }

    /// Wait for the read loop to end.
    ///
    /// # Errors
    ///
    /// Returns the [`ConsoleError`] that ended the read loop. `Ctrl+C` is not an error.
    pub async fn wait(self) -> Result<(), ConsoleError> { self.join_handle.await? }
}

fn get_state(safe_state: &SafeConsoleState) -> ConsoleState {
    *safe_state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn set_state(safe_state: &SafeConsoleState, state: ConsoleState) {
    *safe_state.lock().unwrap_or_else(PoisonError::into_inner) = state;
}
