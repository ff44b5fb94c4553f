// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::PoisonError;

use crate::{CURSOR_FORWARD, CommandRegistry, ConsoleError, ConsoleState, Key,
            KeySource, LineBuffer, RawModeGuard, SafeConsoleOutput, SafeConsoleState,
            lock_console_output, next_key};

/// What the read loop does after a key has been applied to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    /// `Enter`: dispatch the line.
    Commit,
    /// `Ctrl+C`: end the session.
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEffect {
    pub action: KeyAction,
    /// Written before the prompt line is repainted.
    pub echo: &'static str,
}

/// [`crate::BACKSPACE`] followed by [`crate::CLEAR_TO_END_OF_LINE`].
const ECHO_BACKSPACE: &str = "\x08\x1b[K";

/// Apply `key` to `line_buffer`. Every key is followed by a repaint of the prompt line,
/// even the ones that don't change the line.
pub fn apply_key_to_line_buffer(line_buffer: &mut LineBuffer, key: Key) -> KeyEffect {
    let continue_with = |echo| KeyEffect {
        action: KeyAction::Continue,
        echo,
    };

    match key {
        Key::Backspace | Key::Backspace2 => {
            if line_buffer.backspace() {
                continue_with(ECHO_BACKSPACE)
            } else {
                continue_with("")
            }
        }
        // The logical cursor stays at the end of the line.
        Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
            continue_with(CURSOR_FORWARD)
        }
        Key::Space => {
            line_buffer.append_space();
            continue_with("")
        }
        Key::Char(ch) => {
            line_buffer.append(ch);
            continue_with("")
        }
        Key::Enter => KeyEffect {
            action: KeyAction::Commit,
            echo: "",
        },
        Key::CtrlC => KeyEffect {
            action: KeyAction::Terminate,
            echo: "",
        },
        Key::Unmapped => continue_with(""),
    }
}

/// The body of the task spawned by [`crate::InputConsole::listen()`]. It runs until the
/// user presses `Ctrl+C` (returns `Ok`) or the [`KeySource`] fails (returns `Err`). In
/// both cases the state is [`ConsoleState::Terminated`] and raw mode has been released
/// by the time this returns.
///
/// # Errors
///
/// Returns [`ConsoleError::Driver`] if raw mode can't be enabled or a key can't be read,
/// and [`ConsoleError::IO`] if the terminal can't be written to.
pub async fn run(
    key_source: KeySource,
    command_registry: CommandRegistry,
    safe_console_output: SafeConsoleOutput,
    safe_state: SafeConsoleState,
) -> Result<(), ConsoleError> {
    let result =
        run_until_terminated(key_source, command_registry, &safe_console_output).await;

    *safe_state.lock().unwrap_or_else(PoisonError::into_inner) = ConsoleState::Terminated;

    match &result {
        Ok(()) => tracing::debug!(message = "Read loop terminated by user"),
        Err(err) => tracing::error!(message = "Read loop terminated", error = %err),
    }

    result
}

async fn run_until_terminated(
    key_source: KeySource,
    mut command_registry: CommandRegistry,
    safe_console_output: &SafeConsoleOutput,
) -> Result<(), ConsoleError> {
    let KeySource {
        mut resource,
        raw_mode,
    } = key_source;

    let mut line_buffer = LineBuffer::new();

    // Show the prompt before switching to raw mode.
    lock_console_output(safe_console_output).redraw_prompt_line(
        "",
        line_buffer.as_str(),
        &command_registry,
    )?;

    // Dropped on every return path below, which releases raw mode.
    let _raw_mode_guard = RawModeGuard::try_acquire(raw_mode)?;

    loop {
        let key = next_key(&mut resource).await?;
        tracing::debug!(message = "Key", key = ?key);

        let KeyEffect { action, echo } = apply_key_to_line_buffer(&mut line_buffer, key);

        lock_console_output(safe_console_output).redraw_prompt_line(
            echo,
            line_buffer.as_str(),
            &command_registry,
        )?;

        match action {
            KeyAction::Continue => {}
            KeyAction::Terminate => return Ok(()),
            KeyAction::Commit => {
                let line = line_buffer.snapshot();
                line_buffer.clear();

                // Output lines printed while the command runs repaint an empty input.
                lock_console_output(safe_console_output).colorized_input.clear();

                let outcome = command_registry.dispatch(&line);
                if let Some(report_line) = outcome.report_line() {
                    lock_console_output(safe_console_output).write_line(&report_line)?;
                }
            }
        }
    }
}
