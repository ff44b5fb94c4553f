// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test fixtures for the `r3bl_input_console` crate. This crate is meant to be used as a
//! [`dev-dependency`](https://doc.rust-lang.org/cargo/reference/specifying-dependencies.html#dev-dependencies).
//!
//! It provides two kinds of fixtures, so that a console session can be tested "end to
//! end" without a real terminal:
//! 1. [`gen_input_stream`] and [`gen_input_stream_with_delay`] turn a [`Vec`] of items
//!    (usually key events) into the pinned async stream that the read loop consumes.
//! 2. [`StdoutMock`] stands in for `stdout`, and captures everything that is written to
//!    it, so that the escape sequences (or the text with them stripped) can be asserted
//!    on.
//!
//! ```
//! use std::io::Write;
//! use r3bl_test_fixtures::StdoutMock;
//!
//! let mut stdout_mock = StdoutMock::default();
//! let stdout_mock_clone = stdout_mock.clone(); // Points to the same buffer.
//! stdout_mock.write_all(b"\x1b[92mhello\x1b[0m").unwrap();
//! assert_eq!(stdout_mock_clone.get_copy_of_buffer_as_string_strip_ansi(), "hello");
//! ```

// Attach sources.
pub mod input_stream_fixtures;
pub mod output_device_fixtures;

// Re-export.
pub use input_stream_fixtures::*;
pub use output_device_fixtures::*;
