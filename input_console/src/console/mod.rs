// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod console_api;
pub mod console_error;
pub mod console_output;
pub mod console_writer;
pub mod panic_hook;
pub mod read_loop;

// Re-export.
pub use console_api::*;
pub use console_error::*;
pub use console_output::*;
pub use console_writer::*;
pub use panic_hook::*;
