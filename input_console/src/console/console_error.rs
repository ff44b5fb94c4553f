// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use thiserror::Error;

use crate::DriverError;

/// Why a [`crate::ConsoleSession`] ended with an error.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Writing to the terminal failed.
    #[error("failed to write to the terminal")]
    IO(#[from] io::Error),

    /// The read loop task panicked or was cancelled.
    #[error("the read loop task did not run to completion")]
    ReadLoopJoin(#[from] tokio::task::JoinError),
}
