// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::future::ready;

use crossterm::event::EventStream;
use futures_util::{FutureExt, StreamExt};

use crate::{CrosstermRawMode, DriverError, Key, PinnedInputStream, RawModeDriver};

pub type KeyResult = Result<Key, DriverError>;

/// The input end of the console. It pairs a stream of decoded keys with the driver that
/// puts the terminal in and out of raw mode.
///
/// In tests, use `gen_input_stream()` from `r3bl_test_fixtures` for the
/// [`KeySource::resource`] and a [`crate::MockRawMode`] for the
/// [`KeySource::raw_mode`].
#[allow(missing_debug_implementations)]
pub struct KeySource {
    pub resource: PinnedInputStream<KeyResult>,
    pub raw_mode: Box<dyn RawModeDriver>,
}

impl KeySource {
    #[must_use]
    pub fn new(
        resource: PinnedInputStream<KeyResult>,
        raw_mode: impl RawModeDriver + 'static,
    ) -> Self {
        Self {
            resource,
            raw_mode: Box::new(raw_mode),
        }
    }

    /// Keys from the real terminal, via crossterm's [`EventStream`]. Events that aren't
    /// key presses are dropped here, so the stream only yields keys and read errors.
    #[must_use]
    pub fn new_crossterm() -> Self {
        let resource = EventStream::new().filter_map(|result| {
            ready(match result {
                Ok(event) => Key::from_crossterm_event(event).map(Ok),
                Err(err) => Some(Err(DriverError::Read(err))),
            })
        });
        Self::new(Box::pin(resource), CrosstermRawMode)
    }
}

/// Waits for the next key from `resource`.
///
/// # Errors
///
/// Returns [`DriverError::Read`] if the driver failed, and [`DriverError::InputClosed`]
/// if the stream has ended.
pub async fn next_key(resource: &mut PinnedInputStream<KeyResult>) -> KeyResult {
    match resource.next().fuse().await {
        Some(it) => it,
        None => Err(DriverError::InputClosed),
    }
}
