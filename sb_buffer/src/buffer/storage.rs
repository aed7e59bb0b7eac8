// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BufferError, BufferResult, StorageKind, TERMINATOR};

/// The active storage of a [`crate::SbBuffer`]. Exactly one representation is active at
/// a time, and the capacity is derived from it, so the two can't disagree.
///
/// For the [`Storage::Heap`] variant the vector's `len()` is the capacity. Every byte of
/// the block is initialized (zero filled on growth), so content and terminator can be
/// written through plain slice indexing.
#[derive(Clone)]
pub(crate) enum Storage<const N: usize> {
    Inline([u8; N]),
    Heap(Vec<u8>),
}

impl<const N: usize> Storage<N> {
    pub(crate) fn new_inline() -> Self { Storage::Inline([TERMINATOR; N]) }

    pub(crate) fn kind(&self) -> StorageKind {
        match self {
            Storage::Inline(_) => StorageKind::Inline,
            Storage::Heap(_) => StorageKind::Heap,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match self {
            Storage::Inline(_) => N,
            Storage::Heap(block) => block.len(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Inline(array) => array,
            Storage::Heap(block) => block,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Inline(array) => array,
            Storage::Heap(block) => block,
        }
    }

    /// Move to (or resize the heap block to) `new_capacity` bytes, keeping the first
    /// `length` bytes of content.
    ///
    /// The allocation is attempted before anything is touched. If it fails, `self` is
    /// exactly as it was.
    pub(crate) fn grow_to(&mut self, new_capacity: usize, length: usize) -> BufferResult<()> {
        debug_assert!(new_capacity > self.capacity());
        debug_assert!(length < self.capacity());

        let out_of_memory = |_| BufferError::OutOfMemory {
            requested: new_capacity,
        };

        match self {
            Storage::Inline(array) => {
                let mut block = Vec::new();
                block.try_reserve_exact(new_capacity).map_err(out_of_memory)?;
                block.extend_from_slice(&array[..length]);
                block.resize(new_capacity, TERMINATOR);
                *self = Storage::Heap(block);
            }
            Storage::Heap(block) => {
                let additional = new_capacity - block.len();
                block.try_reserve_exact(additional).map_err(out_of_memory)?;
                block.resize(new_capacity, TERMINATOR);
            }
        }

        Ok(())
    }

    /// Go back to inline storage. Returns the size of the heap block that was released,
    /// if there was one. This is the only place a heap block is given up, and the block
    /// is moved out of `self` when that happens, so it can't be released twice.
    pub(crate) fn release(&mut self) -> Option<usize> {
        match std::mem::replace(self, Storage::new_inline()) {
            Storage::Inline(_) => None,
            Storage::Heap(block) => Some(block.len()),
        }
    }
}
