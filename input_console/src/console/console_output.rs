// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, Write},
          sync::{MutexGuard, PoisonError}};

use crate::{CommandNames, DEFAULT_PROMPT, SafeConsoleOutput, SendRawTerminal,
            colorize_input_line, output_line_prefix, prompt_line_prefix};

/// Everything that is written to the terminal goes through here, while holding the
/// lock in [`SafeConsoleOutput`]. This keeps output lines and prompt redraws from
/// interleaving their escape sequences.
///
/// The read loop is the only one that edits the input line. It publishes the colorized
/// form in [`ConsoleOutput::colorized_input`] on every redraw, which is what output lines
/// repaint beneath themselves.
pub struct ConsoleOutput {
    pub raw_terminal: Box<SendRawTerminal>,
    pub prompt: String,
    pub colorized_input: String,
}

impl std::fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleOutput")
            .field("prompt", &self.prompt)
            .field("colorized_input", &self.colorized_input)
            .finish_non_exhaustive()
    }
}

impl ConsoleOutput {
    #[must_use]
    pub fn new(raw_terminal: impl std::io::Write + Send + 'static) -> Self {
        Self {
            raw_terminal: Box::new(raw_terminal),
            prompt: DEFAULT_PROMPT.to_string(),
            colorized_input: String::new(),
        }
    }

    /// Print `message` above the prompt line, then repaint the prompt and the input.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn write_line(&mut self, message: &str) -> io::Result<()> {
        let output = format!(
            "{}{}",
            output_line_prefix(message, &self.prompt),
            self.colorized_input
        );
        self.raw_terminal.write_all(output.as_bytes())?;
        self.raw_terminal.flush()
    }

    /// Write `echo` (cursor bookkeeping for the key just pressed), then repaint the
    /// prompt line for `buffer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn redraw_prompt_line<N>(
        &mut self,
        echo: &str,
        buffer: &str,
        names: &N,
    ) -> io::Result<()>
    where
        N: CommandNames + ?Sized,
    {
        self.colorized_input = colorize_input_line(buffer, names);
        let output = format!(
            "{echo}{}{}",
            prompt_line_prefix(&self.prompt),
            self.colorized_input
        );
        self.raw_terminal.write_all(output.as_bytes())?;
        self.raw_terminal.flush()
    }
}

/// Take the output lock. A writer that panicked while holding it can't leave the
/// terminal in a worse state than a half written line, so a poisoned lock is reused.
pub fn lock_console_output(
    safe_console_output: &SafeConsoleOutput,
) -> MutexGuard<'_, ConsoleOutput> {
    safe_console_output
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
