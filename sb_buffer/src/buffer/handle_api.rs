// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Boolean-returning operations over handles that may be absent.
//!
//! This is the API to use at a trust boundary, where the caller hands over something
//! that might not be a constructed buffer (an absent handle, or a value that fails
//! [`SbBuffer::is_valid`]). Every operation checks the handle first and never acts on a
//! handle that fails the check.
//!
//! Failures are reported in two ways:
//! 1. The return value (`false`, [`None`], or `0`). Callers must check it.
//! 2. A [`tracing::warn!`] event carrying the [`BufferError`] and the source location of
//!    the call into this module. This is a side effect only, it never replaces the
//!    return value.
//!
//! ```
//! use sb_buffer::{SbBuffer, handle_api};
//!
//! let mut buffer = SbBuffer::<256>::new();
//! assert!(handle_api::append(Some(&mut buffer), Some(b"Hello".as_slice()), 5));
//! assert_eq!(handle_api::length_of(Some(&buffer)), 5);
//!
//! // Absent handle.
//! assert!(!handle_api::clear::<256>(None));
//! ```

use std::{mem::MaybeUninit, panic::Location};

use tracing::warn;

use crate::{BufferError, BufferResult, SbBuffer};

/// Initialize the buffer in `slot`. Any value already in the slot is overwritten
/// without being dropped.
///
/// Returns `false` only when `slot` is absent.
#[track_caller]
pub fn construct<const N: usize>(slot: Option<&mut MaybeUninit<SbBuffer<N>>>) -> bool {
    match slot {
        Some(slot) => {
            slot.write(SbBuffer::new());
            true
        }
        None => report_failure(
            "construct",
            &BufferError::InvalidArgument {
                reason: "construction target is absent",
            },
        ),
    }
}

/// Pure predicate. Does not log.
#[must_use]
pub fn is_valid<const N: usize>(handle: Option<&SbBuffer<N>>) -> bool {
    handle.is_some_and(SbBuffer::is_valid)
}

/// Append the first `length` bytes of `bytes`.
///
/// An absent `bytes` is accepted only together with a `length` of zero.
#[track_caller]
pub fn append<const N: usize>(
    handle: Option<&mut SbBuffer<N>>,
    bytes: Option<&[u8]>,
    length: usize,
) -> bool {
    let result = checked_mut(handle).and_then(|buffer| {
        let source: &[u8] = match bytes {
            Some(bytes) => {
                bytes
                    .get(..length)
                    .ok_or(BufferError::InvalidArgument {
                        reason: "length is longer than the source",
                    })?
            }
            None if length == 0 => &[],
            None => {
                return Err(BufferError::InvalidArgument {
                    reason: "source is absent but length is not zero",
                });
            }
        };
        buffer.append(source)
    });
    report("append", result)
}

/// Append a string, its length is computed at call time.
#[track_caller]
pub fn append_str<const N: usize>(handle: Option<&mut SbBuffer<N>>, s: &str) -> bool {
    let result = checked_mut(handle).and_then(|buffer| buffer.append_str(s));
    report("append_str", result)
}

/// The content without the terminator, or [`None`] if the handle fails the check.
#[track_caller]
#[must_use]
pub fn content<const N: usize>(handle: Option<&SbBuffer<N>>) -> Option<&[u8]> {
    match checked(handle) {
        Ok(buffer) => Some(buffer.as_bytes()),
        Err(err) => {
            report_failure("content", &err);
            None
        }
    }
}

/// The content length, or `0` if the handle fails the check.
#[track_caller]
#[must_use]
pub fn length_of<const N: usize>(handle: Option<&SbBuffer<N>>) -> usize {
    match checked(handle) {
        Ok(buffer) => buffer.len(),
        Err(err) => {
            report_failure("length_of", &err);
            0
        }
    }
}

/// Soft reset, see [`SbBuffer::clear`].
#[track_caller]
pub fn clear<const N: usize>(handle: Option<&mut SbBuffer<N>>) -> bool {
    let result = checked_mut(handle).map(SbBuffer::clear);
    report("clear", result)
}

/// Hard reset, see [`SbBuffer::reset`].
#[track_caller]
pub fn reset<const N: usize>(handle: Option<&mut SbBuffer<N>>) -> bool {
    let result = checked_mut(handle).map(SbBuffer::reset);
    report("reset", result)
}

/// Hard reset under its teardown name, see [`SbBuffer::finalize`].
#[track_caller]
pub fn finalize<const N: usize>(handle: Option<&mut SbBuffer<N>>) -> bool {
    let result = checked_mut(handle).map(SbBuffer::finalize);
    report("finalize", result)
}

/// Make `destination` an independent duplicate of `source`, see
/// [`SbBuffer::copy_from`]. Both handles must pass the check. If the source fails it,
/// the destination is not touched.
#[track_caller]
pub fn copy<const M: usize, const N: usize>(
    source: Option<&SbBuffer<M>>,
    destination: Option<&mut SbBuffer<N>>,
) -> bool {
    let result = checked(source).and_then(|source| {
        checked_mut(destination).and_then(|destination| destination.copy_from(source))
    });
    report("copy", result)
}

fn checked<const N: usize>(handle: Option<&SbBuffer<N>>) -> BufferResult<&SbBuffer<N>> {
    handle
        .filter(|buffer| buffer.is_valid())
        .ok_or(BufferError::InvalidHandle)
}

fn checked_mut<const N: usize>(
    handle: Option<&mut SbBuffer<N>>,
) -> BufferResult<&mut SbBuffer<N>> {
    handle
        .filter(|buffer| buffer.is_valid())
        .ok_or(BufferError::InvalidHandle)
}

#[track_caller]
fn report(operation: &'static str, result: BufferResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => report_failure(operation, &err),
    }
}

/// Always returns `false`, so callers can use it as their return value.
#[track_caller]
fn report_failure(operation: &'static str, err: &BufferError) -> bool {
    let location = Location::caller();
    warn!(
        operation,
        error = %err,
        file = location.file(),
        line = location.line(),
        "sb_buffer operation failed"
    );
    false
}
