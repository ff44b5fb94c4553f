// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{Result, Write},
          sync::{Arc, Mutex}};

use strip_ansi_escapes::strip;

/// In-memory stand-in for `stdout`. You can safely clone this struct, since it only
/// contains an `Arc<Mutex<Vec<u8>>>`; every clone points to the same buffer. Hand one
/// clone to the console as its raw terminal and keep the other to assert on.
#[derive(Clone, Debug, Default)]
pub struct StdoutMock {
    pub buffer: Arc<Mutex<Vec<u8>>>,
}

impl StdoutMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// # Panics
    ///
    /// If the buffer's mutex is poisoned.
    #[must_use]
    pub fn get_copy_of_buffer(&self) -> Vec<u8> { self.buffer.lock().unwrap().clone() }

    /// Everything written so far, escape sequences included.
    ///
    /// # Panics
    ///
    /// If the buffer isn't valid UTF-8, or its mutex is poisoned.
    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        String::from_utf8(self.get_copy_of_buffer()).expect("utf8")
    }

    /// Everything written so far, with all ANSI escape sequences removed.
    ///
    /// # Panics
    ///
    /// If the buffer isn't valid UTF-8, or its mutex is poisoned.
    #[must_use]
    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        String::from_utf8(strip(self.get_copy_of_buffer())).expect("utf8")
    }

    /// How many times `needle` appears in the raw (unstripped) output.
    #[must_use]
    pub fn count_occurrences(&self, needle: &str) -> usize {
        self.get_copy_of_buffer_as_string().matches(needle).count()
    }

    /// # Panics
    ///
    /// If the buffer's mutex is poisoned.
    pub fn clear(&self) { self.buffer.lock().unwrap().clear(); }
}

impl Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_stdout_mock_no_strip_ansi() {
        let mut stdout_mock = StdoutMock::default();
        let stdout_mock_clone = stdout_mock.clone();

        stdout_mock.write_all(b"hello world").unwrap();
        stdout_mock.flush().unwrap();

        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "hello world");
        assert_eq!(stdout_mock_clone.get_copy_of_buffer_as_string(), "hello world");
    }

    #[test]
    fn test_stdout_mock_strip_ansi() {
        let mut stdout_mock = StdoutMock::default();
        let red_text = "\x1b[91mbogus\x1b[0m";

        stdout_mock.write_all(red_text.as_bytes()).unwrap();

        assert_eq!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "bogus");
        assert_eq!(stdout_mock.count_occurrences("\x1b[91m"), 1);
    }

    #[test]
    fn test_stdout_mock_clear() {
        let mut stdout_mock = StdoutMock::default();
        stdout_mock.write_all(b"abc").unwrap();
        stdout_mock.clone().clear();
        assert!(stdout_mock.get_copy_of_buffer().is_empty());
    }
}
