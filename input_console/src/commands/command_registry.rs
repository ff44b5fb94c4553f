// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{any::Any,
          collections::HashMap,
          panic::{AssertUnwindSafe, catch_unwind}};

use crate::{CommandNames, DispatchOutcome};

/// A command handler receives the words that follow the command name. It runs on the
/// read loop's task, so input is not processed until it returns.
pub type CommandHandler = Box<dyn FnMut(&[String]) -> miette::Result<()> + Send>;

/// The fallback for lines whose first word isn't a registered command. It gets the whole
/// line and returns `true` if it handled it. Any `FnMut(&str) -> bool + Send` closure is
/// an [`UnknownCommandHandler`].
pub trait UnknownCommandHandler: Send {
    fn attempt(&mut self, raw_line: &str) -> bool;
}

impl<F> UnknownCommandHandler for F
where
    F: FnMut(&str) -> bool + Send,
{
    fn attempt(&mut self, raw_line: &str) -> bool { self(raw_line) }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandHandler>,
    unknown_command_handler: Option<Box<dyn UnknownCommandHandler>>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.commands.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("CommandRegistry")
            .field("commands", &names)
            .field(
                "unknown_command_handler",
                &self.unknown_command_handler.is_some(),
            )
            .finish()
    }
}

impl CommandNames for CommandRegistry {
    fn contains_command(&self, name: &str) -> bool { self.commands.contains_key(name) }
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registering the same `name` again replaces the previous handler. Any string is a
    /// valid name, including the empty string.
    pub fn register_command<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[String]) -> miette::Result<()> + Send + 'static,
    {
        self.commands.insert(name.into(), Box::new(handler));
    }

    /// Replaces the previous unknown command handler, if any.
    pub fn set_unknown_command_handler<H>(&mut self, handler: H)
    where
        H: UnknownCommandHandler + 'static,
    {
        self.unknown_command_handler = Some(Box::new(handler));
    }

    pub fn clear_unknown_command_handler(&mut self) { self.unknown_command_handler = None; }

    /// Sorted, so it can be printed as is.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        let mut names = self.commands.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Run the command named by the first word of `raw_line`.
    ///
    /// The line is split on every single `' '`, and empty words are kept. So `"add  1"`
    /// calls `add` with `["", "1"]`, and a line of only spaces looks up the command named
    /// `""`. This is different from how the line is split for colorizing.
    ///
    /// A handler that returns `Err` or panics yields [`DispatchOutcome::Failed`]. If no
    /// command matches, the unknown command handler (if any) gets a chance to handle the
    /// line before [`DispatchOutcome::Unknown`] is returned.
    ///
    /// A panic is recovered here, but the panic hook has already run by then. Use
    /// [`crate::install_panic_hook()`] so it prints above the prompt line, not over it.
    pub fn dispatch(&mut self, raw_line: &str) -> DispatchOutcome {
        let tokens = raw_line.split(' ').map(str::to_string).collect::<Vec<_>>();
        let (name, args) = match tokens.split_first() {
            Some((name, args)) => (name.as_str(), args),
            None => ("", &[][..]),
        };

        if let Some(handler) = self.commands.get_mut(name) {
            tracing::debug!(message = "Dispatching command", name = %name, args = ?args);
            let result = catch_unwind(AssertUnwindSafe(|| handler(args)));
            return match result {
                Ok(Ok(())) => DispatchOutcome::Ran {
                    name: name.to_string(),
                },
                Ok(Err(report)) => {
                    tracing::warn!(message = "Command failed", name = %name, error = %report);
                    DispatchOutcome::Failed {
                        name: name.to_string(),
                        detail: format!("{report}"),
                    }
                }
                Err(payload) => {
                    let detail = panic_payload_to_string(payload.as_ref());
                    tracing::warn!(message = "Command panicked", name = %name, detail = %detail);
                    DispatchOutcome::Failed {
                        name: name.to_string(),
                        detail,
                    }
                }
            };
        }

        if let Some(unknown_command_handler) = self.unknown_command_handler.as_mut()
            && unknown_command_handler.attempt(raw_line)
        {
            tracing::debug!(message = "Handled by unknown command handler", raw_line = %raw_line);
            return DispatchOutcome::HandledByUnknownCommandHandler;
        }

        tracing::debug!(message = "Unknown command", raw_line = %raw_line);
        DispatchOutcome::Unknown {
            raw_line: raw_line.to_string(),
        }
    }
}

/// The message of a panic, when it was raised with a `&str` or a `String`.
#[must_use]
pub fn panic_payload_to_string(payload: &(dyn Any + Send)) -> String {
    if let Some(it) = payload.downcast_ref::<&str>() {
        (*it).to_string()
    } else if let Some(it) = payload.downcast_ref::<String>() {
        it.clone()
    } else {
        "unknown panic".to_string()
    }
}
