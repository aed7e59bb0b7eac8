// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BufferError, BufferResult};

/// Decide whether appending `additional` bytes to `length` bytes of content needs a
/// bigger block, and if so, how big.
///
/// - Returns `Ok(None)` when the room left (`capacity - length`) holds `additional`
///   bytes plus the terminator.
/// - Otherwise returns the current capacity doubled as many times as needed for it to
///   exceed `length + additional + 1`. Doubling (instead of an exact fit) amortizes
///   future appends.
///
/// # Errors
///
/// Returns [`BufferError::CapacityOverflow`] if the required size, or any doubling step
/// on the way to it, does not fit in [`usize`].
///
/// # Panics
///
/// In debug builds, if `capacity` is zero or `length >= capacity`. A buffer never gets
/// into either state.
pub fn grown_capacity(
    capacity: usize,
    length: usize,
    additional: usize,
) -> BufferResult<Option<usize>> {
    debug_assert!(capacity > 0);
    debug_assert!(length < capacity);

    let room = capacity - length;
    if additional < room {
        return Ok(None);
    }

    let overflow = || BufferError::CapacityOverflow { length, additional };

    let required = length
        .checked_add(additional)
        .and_then(|it| it.checked_add(1))
        .ok_or_else(overflow)?;

    let mut new_capacity = capacity;
    while new_capacity <= required {
        new_capacity = new_capacity.checked_mul(2).ok_or_else(overflow)?;
    }

    Ok(Some(new_capacity))
}
