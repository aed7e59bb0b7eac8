// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod growth;
pub mod handle_api;
pub mod macros;
pub mod sb_buffer_struct;
pub mod sizes;
mod storage;

// Re-export.
pub use growth::*;
pub use sb_buffer_struct::*;
pub use sizes::*;
