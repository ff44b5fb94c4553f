// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A command handler that panics is recovered by
//! [`crate::CommandRegistry::dispatch()`], but the default panic hook has already written
//! `thread '..' panicked at ..` to `stderr` by then. In raw mode that write has no `'\r'`
//! and skips the output lock, so it lands on top of the prompt line.
//!
//! [`install_panic_hook()`] replaces the hook with one that prints the panic as an
//! output line, through the same lock as everything else.

use std::{panic::{self, PanicHookInfo},
          sync::TryLockError};

use crate::{ConsoleOutput, ConsoleWriter, panic_payload_to_string};

/// Print panics above the prompt line, through `writer`. The previous hook is kept, and
/// it runs instead when the output lock is busy, since the panicking thread may be the
/// one holding it.
pub fn install_panic_hook(writer: &ConsoleWriter) {
    let safe_console_output = writer.safe_console_output.clone();
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let message = panic_hook_message(info);
        match safe_console_output.try_lock() {
            Ok(mut console_output) => print_panic(&mut console_output, &message),
            Err(TryLockError::Poisoned(poisoned)) => {
                print_panic(&mut poisoned.into_inner(), &message);
            }
            Err(TryLockError::WouldBlock) => previous_hook(info),
        }
    }));
}

/// Eg: `Panicked at src/main.rs:10:5: boom`.
#[must_use]
pub fn panic_hook_message(info: &PanicHookInfo<'_>) -> String {
    let payload = panic_payload_to_string(info.payload());
    match info.location() {
        Some(location) => format!("Panicked at {location}: {payload}"),
        None => format!("Panicked: {payload}"),
    }
}

fn print_panic(console_output: &mut ConsoleOutput, message: &str) {
    if let Err(err) = console_output.write_line(message) {
        eprintln!("{message} ({err})");
    }
}
