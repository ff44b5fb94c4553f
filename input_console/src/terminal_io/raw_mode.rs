// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io,
          sync::{Arc,
                 atomic::{AtomicUsize, Ordering}}};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::DriverError;

/// Puts the terminal in and out of raw mode. This is the "open" and "close" half of the
/// terminal driver; the key events themselves come from [`crate::KeySource::resource`].
pub trait RawModeDriver: Send {
    /// # Errors
    ///
    /// Returns [`DriverError::Open`] if raw mode can't be enabled.
    fn enable(&mut self) -> Result<(), DriverError>;

    /// # Errors
    ///
    /// Returns an [`io::Error`] if the terminal can't be restored.
    fn disable(&mut self) -> io::Result<()>;
}

/// The real driver, for `stdin` / `stdout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermRawMode;

impl RawModeDriver for CrosstermRawMode {
    fn enable(&mut self) -> Result<(), DriverError> {
        enable_raw_mode().map_err(DriverError::Open)
    }

    fn disable(&mut self) -> io::Result<()> { disable_raw_mode() }
}

/// Counts calls instead of touching the terminal. Clones share the counters, so keep a
/// clone around to inspect them after the driver has been moved into a session.
#[derive(Debug, Default, Clone)]
pub struct MockRawMode {
    pub enable_count: Arc<AtomicUsize>,
    pub disable_count: Arc<AtomicUsize>,
    /// When set, [`RawModeDriver::enable()`] fails (after being counted).
    pub fail_on_enable: bool,
}

impl MockRawMode {
    #[must_use]
    pub fn new_failing() -> Self {
        Self {
            fail_on_enable: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn get_enable_count(&self) -> usize { self.enable_count.load(Ordering::SeqCst) }

    #[must_use]
    pub fn get_disable_count(&self) -> usize { self.disable_count.load(Ordering::SeqCst) }
}

impl RawModeDriver for MockRawMode {
    fn enable(&mut self) -> Result<(), DriverError> {
        self.enable_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_enable {
            return Err(DriverError::Open(io::Error::other("mock raw mode refused")));
        }
        Ok(())
    }

    fn disable(&mut self) -> io::Result<()> {
        self.disable_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Scoped raw mode. Raw mode is released exactly once, when this guard is dropped, on
/// every exit path of the read loop. This includes the case where enabling raw mode
/// failed, in which case the guard is dropped inside [`RawModeGuard::try_acquire()`].
#[allow(missing_debug_implementations)]
pub struct RawModeGuard {
    driver: Box<dyn RawModeDriver>,
}

impl RawModeGuard {
    /// # Errors
    ///
    /// Returns the [`DriverError`] from [`RawModeDriver::enable()`]. The driver has
    /// already been told to disable raw mode by the time this returns.
    pub fn try_acquire(mut driver: Box<dyn RawModeDriver>) -> Result<Self, DriverError> {
        let result = driver.enable();
        let guard = Self { driver };
        match result {
            Ok(()) => Ok(guard),
            Err(err) => {
                drop(guard);
                Err(err)
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = self.driver.disable() {
            tracing::warn!(message = "Failed to release raw mode", error = %err);
        }
    }
}
