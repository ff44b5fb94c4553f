// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// What happened to a committed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The command's handler returned `Ok`.
    Ran { name: String },
    /// The command's handler returned `Err` or panicked. The session continues.
    Failed { name: String, detail: String },
    HandledByUnknownCommandHandler,
    Unknown { raw_line: String },
}

impl DispatchOutcome {
    /// The output line to print for this outcome, if any.
    #[must_use]
    pub fn report_line(&self) -> Option<String> {
        match self {
            DispatchOutcome::Failed { name, detail } => {
                Some(format!("Failed to run command '{name}': {detail}"))
            }
            DispatchOutcome::Unknown { raw_line } => {
                Some(format!("Unknown command: {raw_line}"))
            }
            DispatchOutcome::Ran { .. }
            | DispatchOutcome::HandledByUnknownCommandHandler => None,
        }
    }
}
