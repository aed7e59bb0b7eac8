// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Be careful when adjusting the inline capacity. The inline array is embedded in every
//! [`crate::SbBuffer`] value, so a large number makes every buffer (and every stack frame
//! holding one) that much bigger, even when it is heap-backed. A small number makes
//! short content spill to the heap sooner.

/// Size of the inline array, including the byte reserved for the terminator. Content
/// up to `DEFAULT_INLINE_CAPACITY - 1` bytes long never touches the heap.
pub const DEFAULT_INLINE_CAPACITY: usize = 256;

/// Written into every buffer at construction. A value that does not carry it was never
/// constructed, or has been corrupted.
pub const SB_BUFFER_MAGIC: u32 = 0xBABE_CAFE;

/// The byte that always follows the content.
pub const TERMINATOR: u8 = b'\0';
