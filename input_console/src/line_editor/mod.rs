// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod ansi_escape_codes;
pub mod line_buffer;
pub mod render;

// Re-export.
pub use ansi_escape_codes::*;
pub use line_buffer::*;
pub use render::*;
