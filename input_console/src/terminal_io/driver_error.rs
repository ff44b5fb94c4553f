// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use thiserror::Error;

/// Failures of the raw terminal driver (the [`crate::KeySource`] and its
/// [`crate::RawModeDriver`]). None of these are retried: they end the read loop, and the
/// [`crate::ConsoleSession`] reports them from [`crate::ConsoleSession::wait()`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// The terminal could not be put into raw mode.
    #[error("failed to put the terminal into raw mode")]
    Open(#[source] io::Error),

    /// Reading the next key event failed.
    #[error("failed to read the next key event")]
    Read(#[source] io::Error),

    /// The stream of key events ended before the user pressed Ctrl+C.
    #[error("the key source closed before the session ended")]
    InputClosed,
}
