// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # sb_buffer
//!
//! A growable byte-string container that avoids heap allocation for short content by
//! storing it inline, and transparently migrates to heap storage when the content
//! outgrows the inline capacity (small string optimization, or SSO).
//!
//! The content is opaque bytes. After every successful operation:
//! 1. The number of content bytes is tracked ([`SbBuffer::len`]).
//! 2. The byte right after the content is a zero terminator, so the content can be
//!    handed to code that expects a C string ([`SbBuffer::as_c_str`]).
//! 3. There is always room for the terminator (`len < capacity`).
//!
//! # Storage states
//!
//! A buffer is either *inline-backed* (content lives in a fixed array embedded in the
//! value, [`DEFAULT_INLINE_CAPACITY`] bytes by default) or *heap-backed* (content lives
//! in a separately allocated block that the buffer exclusively owns). The only
//! transition is inline to heap, which happens inside [`SbBuffer::append`]. A hard reset
//! ([`SbBuffer::reset`] or [`SbBuffer::finalize`]) releases the heap block and goes back
//! to inline.
//!
//! ```
//! use sb_buffer::{SbBuffer, StorageKind, sb_append_literal};
//!
//! let mut buffer = SbBuffer::<16>::new();
//! buffer.append(b"Hello").unwrap();
//! sb_append_literal!(buffer, " World").unwrap();
//! assert_eq!(buffer.as_bytes(), b"Hello World");
//! assert_eq!(buffer.storage_kind(), StorageKind::Inline);
//!
//! buffer.append_str(", this no longer fits inline").unwrap();
//! assert_eq!(buffer.storage_kind(), StorageKind::Heap);
//!
//! buffer.reset();
//! assert_eq!(buffer.len(), 0);
//! assert_eq!(buffer.capacity(), 16);
//! ```
//!
//! # Thread safety
//!
//! A buffer has exactly one owner and no internal locking. Sharing one across threads
//! requires synchronization supplied by the caller (eg: a [`std::sync::Mutex`]).
//!
//! # Handle API
//!
//! The [`handle_api`] module exposes the same operations as free functions that accept
//! a possibly absent handle and return `bool`, for callers sitting at a trust boundary.
//! Failures there are logged via [`tracing`].

// Enforce strict error handling in production library code only. Tests and binaries are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it). The cfg_attr
// ensures test code within the library can also use .unwrap() freely.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod buffer;
pub mod common;
pub mod decl_macros;
pub mod log;

// Re-export.
pub use buffer::*;
pub use common::*;
pub use log::*;
