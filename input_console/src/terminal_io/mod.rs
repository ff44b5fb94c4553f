// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod driver_error;
pub mod key;
pub mod key_source;
pub mod raw_mode;

// Re-export.
pub use driver_error::*;
pub use key::*;
pub use key_source::*;
pub use raw_mode::*;
