// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod command_registry;
pub mod dispatch_outcome;

// Re-export.
pub use command_registry::*;
pub use dispatch_outcome::*;
