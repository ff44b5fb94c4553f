// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Display,
          io::{self, Write}};

use crate::{SafeConsoleOutput, lock_console_output};

/// Cloneable handle that prints lines above the prompt without disturbing what the user
/// is typing. Get one from [`crate::InputConsole::clone_writer()`] or
/// [`crate::ConsoleSession::clone_writer()`], and move clones into other tasks, threads,
/// command handlers, or the tracing display layer.
///
/// # Nothing is output without terminating with a newline, unless you call [`ConsoleWriter::flush()`]
///
/// Through the [`Write`] trait, bytes are held in this handle's buffer until a `'\n'` is
/// written. Each complete line is then printed as one output line. [`ConsoleWriter::println()`]
/// prints right away.
#[derive(Debug)]
pub struct ConsoleWriter {
    pub safe_console_output: SafeConsoleOutput,
    /// Bytes written since the last `'\n'`.
    pub buffer: Vec<u8>,
}

impl ConsoleWriter {
    #[must_use]
    pub fn new(safe_console_output: SafeConsoleOutput) -> Self {
        Self {
            safe_console_output,
            buffer: Vec::new(),
        }
    }

    /// Print `content` as one output line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn println(&self, content: impl Display) -> io::Result<()> {
        self.write_output_line(&content.to_string())
    }

    fn write_output_line(&self, line: &str) -> io::Result<()> {
        lock_console_output(&self.safe_console_output).write_line(line)
    }
}

/// Each clone gets its own empty buffer, and shares the output state.
impl Clone for ConsoleWriter {
    fn clone(&self) -> Self { Self::new(self.safe_console_output.clone()) }
}

impl Write for ConsoleWriter {
    fn write(&mut self, payload: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(payload);

        while let Some(index) = self.buffer.iter().position(|it| *it == b'\n') {
            let line = self.buffer.drain(..=index).collect::<Vec<_>>();
            self.write_output_line(&String::from_utf8_lossy(&line))?;
        }

        Ok(payload.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = std::mem::take(&mut self.buffer);
        self.write_output_line(&String::from_utf8_lossy(&line))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use r3bl_test_fixtures::StdoutMock;

    use super::*;
    use crate::{ConsoleOutput, StdMutex};

    fn new_writer() -> (ConsoleWriter, StdoutMock) {
        let stdout_mock = StdoutMock::new();
        let safe_console_output =
            Arc::new(StdMutex::new(ConsoleOutput::new(stdout_mock.clone())));
        (ConsoleWriter::new(safe_console_output), stdout_mock)
    }

    #[test]
    fn test_println() {
        let (writer, stdout_mock) = new_writer();
        writer.println(42).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\r\x1b[K42\n\r> ");
    }

    #[test]
    fn test_write_buffers_until_newline() {
        let (mut writer, stdout_mock) = new_writer();

        writer.write_all(b"Hello, ").unwrap();
        assert!(stdout_mock.get_copy_of_buffer().is_empty());
        assert_eq!(writer.buffer, b"Hello, ");

        writer.write_all(b"World!\nnext").unwrap();
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\r\x1b[KHello, World!\n\r> "
        );
        assert_eq!(writer.buffer, b"next");
    }

    #[test]
    fn test_write_splits_multiple_lines() {
        let (mut writer, stdout_mock) = new_writer();
        writer.write_all(b"one\ntwo\n").unwrap();
        assert_eq!(stdout_mock.count_occurrences("\r\x1b["), 2);
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\r\x1b[Kone\n\r> \r\x1b[Ktwo\n\r> "
        );
    }

    #[test]
    fn test_flush_emits_partial_line() {
        let (mut writer, stdout_mock) = new_writer();

        writer.flush().unwrap();
        assert!(stdout_mock.get_copy_of_buffer().is_empty());

        writer.write_all(b"partial").unwrap();
        writer.flush().unwrap();
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\r\x1b[Kpartial\n\r> "
        );
        assert!(writer.buffer.is_empty());
    }

    #[test]
    fn test_clone_gets_empty_buffer() {
        let (mut writer, stdout_mock) = new_writer();
        writer.write_all(b"pending").unwrap();

        let mut cloned_writer = writer.clone();
        assert!(cloned_writer.buffer.is_empty());

        cloned_writer.write_all(b"from clone\n").unwrap();
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "\r\x1b[Kfrom clone\n\r> "
        );
        assert_eq!(writer.buffer, b"pending");
    }
}
