// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{ffi::CStr,
          fmt::{self, Debug, Formatter},
          io};

use tracing::{debug, trace};

use super::storage::Storage;
use crate::{BufferError, BufferResult, DEFAULT_INLINE_CAPACITY, GetMemSize,
            SB_BUFFER_MAGIC, TERMINATOR, grown_capacity};

/// Which storage a [`SbBuffer`] is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Content lives in the fixed array embedded in the buffer value. No heap
    /// allocation is held.
    Inline,
    /// Content lives in a separately allocated block, exclusively owned by the buffer.
    Heap,
}

/// Growable byte-string buffer with small string optimization.
///
/// Content up to `N - 1` bytes is stored inline. The first append that would leave no
/// room for the terminator moves the content to a heap block. After that the block is
/// grown by doubling. A hard reset ([`Self::reset`] / [`Self::finalize`]) releases the
/// block and goes back to inline storage.
///
/// Invariants, after every operation:
/// 1. `len() < capacity()`.
/// 2. The byte at offset `len()` of the active storage is [`TERMINATOR`].
/// 3. `capacity() >= N`.
/// 4. When heap-backed, the block belongs to this buffer alone and its size is
///    `capacity()`.
///
/// A buffer has one owner and no internal locking. It is not safe to mutate it from
/// multiple threads without synchronization supplied by the caller.
///
/// ```
/// use sb_buffer::{SbBuffer, StorageKind};
///
/// let mut buffer = SbBuffer::<256>::new();
/// buffer.append(&[b'x'; 300]).unwrap();
/// assert_eq!(buffer.len(), 300);
/// assert_eq!(buffer.capacity(), 512);
/// assert_eq!(buffer.storage_kind(), StorageKind::Heap);
/// ```
pub struct SbBuffer<const N: usize = DEFAULT_INLINE_CAPACITY> {
    validity_tag: u32,
    storage: Storage<N>,
    length: usize,
}

impl<const N: usize> SbBuffer<N> {
    const INLINE_CAPACITY_IS_NOT_ZERO: () =
        assert!(N > 0, "inline capacity must leave room for the terminator");

    /// Create an empty, inline-backed buffer.
    #[must_use]
    pub fn new() -> Self {
        let () = Self::INLINE_CAPACITY_IS_NOT_ZERO;
        Self {
            validity_tag: SB_BUFFER_MAGIC,
            storage: Storage::new_inline(),
            length: 0,
        }
    }

    /// Create a buffer holding a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::append`].
    pub fn try_from_bytes(bytes: &[u8]) -> BufferResult<Self> {
        let mut it = Self::new();
        it.append(bytes)?;
        Ok(it)
    }

    /// Whether this value carries the validity tag written at construction. Every
    /// value built through [`Self::new`] does. This only matters at trust boundaries,
    /// see [`crate::handle_api`].
    #[must_use]
    pub fn is_valid(&self) -> bool { self.validity_tag == SB_BUFFER_MAGIC }

    /// Append `bytes` after the existing content.
    ///
    /// Appending an empty slice is a no-op that succeeds. When the content plus the
    /// terminator no longer fits, the storage grows first (see [`grown_capacity`]).
    ///
    /// # Errors
    ///
    /// - [`BufferError::CapacityOverflow`] if the new capacity can't be represented.
    /// - [`BufferError::OutOfMemory`] if the allocation fails.
    ///
    /// In both cases the content, length, and capacity are unchanged.
    pub fn append(&mut self, bytes: &[u8]) -> BufferResult<()> {
        let additional = bytes.len();

        // A slice holds at most `isize::MAX` bytes, so from here only the doubling can
        // overflow, and that needs a capacity past `usize::MAX / 2`. The overflow path
        // itself is covered by the `grown_capacity` tests.
        if let Some(new_capacity) =
            grown_capacity(self.capacity(), self.length, additional)?
        {
            let from = self.storage_kind();
            let old_capacity = self.capacity();
            self.storage.grow_to(new_capacity, self.length)?;
            debug!(
                ?from,
                old_capacity,
                new_capacity,
                length = self.length,
                additional,
                "sb_buffer grew"
            );
        }

        let start = self.length;
        let end = start + additional;
        let slice = self.storage.as_mut_slice();
        slice[start..end].copy_from_slice(bytes);
        slice[end] = TERMINATOR;
        self.length = end;

        Ok(())
    }

    /// Append a string, its length is computed at call time. For string literals,
    /// [`crate::sb_append_literal!`] takes the length at compile time.
    ///
    /// # Errors
    ///
    /// Same as [`Self::append`].
    pub fn append_str(&mut self, s: &str) -> BufferResult<()> { self.append(s.as_bytes()) }

    /// Soft reset. The length goes to zero, but any heap block is kept (along with the
    /// capacity) so the buffer can be refilled without allocating again.
    pub fn clear(&mut self) {
        self.length = 0;
        self.storage.as_mut_slice()[0] = TERMINATOR;
    }

    /// Hard reset. Releases the heap block (if any), and returns to the empty,
    /// inline-backed state the buffer had right after [`Self::new`]. The buffer stays
    /// usable afterwards.
    pub fn reset(&mut self) {
        if let Some(released) = self.storage.release() {
            trace!(released, "sb_buffer released heap block");
        }
        self.length = 0;
    }

    /// Same operation as [`Self::reset`]. Use this name at the call site that tears
    /// the buffer down before discarding it. Dropping the buffer also releases the heap
    /// block, so calling this is optional.
    pub fn finalize(&mut self) { self.reset(); }

    /// Make `self` an independent duplicate of `source`. `self` is hard reset first,
    /// then the whole content of `source` is appended. No storage is shared afterwards.
    ///
    /// # Errors
    ///
    /// Same as [`Self::append`]. On error `self` is left empty and inline-backed.
    pub fn copy_from<const M: usize>(&mut self, source: &SbBuffer<M>) -> BufferResult<()> {
        self.reset();
        self.append(source.as_bytes())
    }

    /// Fallible [`Clone`]. The duplicate is sized for the content (not for the
    /// capacity of `self`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::append`].
    pub fn try_clone(&self) -> BufferResult<Self> { Self::try_from_bytes(self.as_bytes()) }

    /// The content, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.storage.as_slice()[..self.length] }

    /// The content, followed by the terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] { &self.storage.as_slice()[..=self.length] }

    /// View the content as a C string.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InteriorNul`] if the content itself holds a zero byte,
    /// since a C string would end there.
    pub fn as_c_str(&self) -> BufferResult<&CStr> {
        match CStr::from_bytes_until_nul(self.as_bytes_with_nul()) {
            Ok(c_str) if c_str.to_bytes().len() == self.length => Ok(c_str),
            Ok(c_str) => Err(BufferError::InteriorNul {
                position: c_str.to_bytes().len(),
            }),
            // The terminator is always present, so a zero byte is always found.
            Err(_) => Err(BufferError::InteriorNul {
                position: self.length,
            }),
        }
    }

    /// Number of content bytes, excluding the terminator.
    #[must_use]
    pub fn len(&self) -> usize { self.length }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.length == 0 }

    /// Total usable bytes in the active storage, including the byte reserved for the
    /// terminator.
    #[must_use]
    pub fn capacity(&self) -> usize { self.storage.capacity() }

    #[must_use]
    pub const fn inline_capacity(&self) -> usize { N }

    #[must_use]
    pub fn storage_kind(&self) -> StorageKind { self.storage.kind() }

    #[must_use]
    pub fn is_heap_backed(&self) -> bool { self.storage_kind() == StorageKind::Heap }

    #[cfg(test)]
    pub(crate) fn corrupt_validity_tag(&mut self) { self.validity_tag = !SB_BUFFER_MAGIC; }
}

impl<const N: usize> Drop for SbBuffer<N> {
    fn drop(&mut self) {
        if self.is_heap_backed() {
            self.reset();
        }
    }
}

impl<const N: usize> Default for SbBuffer<N> {
    fn default() -> Self { Self::new() }
}

/// Deep copy. Same content and same storage shape as `self`, nothing shared.
impl<const N: usize> Clone for SbBuffer<N> {
    fn clone(&self) -> Self {
        Self {
            validity_tag: self.validity_tag,
            storage: self.storage.clone(),
            length: self.length,
        }
    }
}

impl<const N: usize> Debug for SbBuffer<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SbBuffer")
            .field("content", &String::from_utf8_lossy(self.as_bytes()))
            .field("length", &self.length)
            .field("capacity", &self.capacity())
            .field("storage", &self.storage_kind())
            .finish()
    }
}

impl<const N: usize> AsRef<[u8]> for SbBuffer<N> {
    fn as_ref(&self) -> &[u8] { self.as_bytes() }
}

impl<const N: usize, const M: usize> PartialEq<SbBuffer<M>> for SbBuffer<N> {
    fn eq(&self, other: &SbBuffer<M>) -> bool { self.as_bytes() == other.as_bytes() }
}

impl<const N: usize> Eq for SbBuffer<N> {}

impl<const N: usize> PartialEq<[u8]> for SbBuffer<N> {
    fn eq(&self, other: &[u8]) -> bool { self.as_bytes() == other }
}

impl<const N: usize> PartialEq<&str> for SbBuffer<N> {
    fn eq(&self, other: &&str) -> bool { self.as_bytes() == other.as_bytes() }
}

impl<const N: usize> TryFrom<&[u8]> for SbBuffer<N> {
    type Error = BufferError;

    fn try_from(bytes: &[u8]) -> BufferResult<Self> { Self::try_from_bytes(bytes) }
}

impl<const N: usize> TryFrom<&str> for SbBuffer<N> {
    type Error = BufferError;

    fn try_from(s: &str) -> BufferResult<Self> { Self::try_from_bytes(s.as_bytes()) }
}

/// Lets [`write!`] append formatted text to the buffer.
impl<const N: usize> fmt::Write for SbBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s).map_err(|_| fmt::Error)
    }
}

impl<const N: usize> io::Write for SbBuffer<N> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::OutOfMemory, err))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl<const N: usize> GetMemSize for SbBuffer<N> {
    fn get_mem_size(&self) -> usize {
        let heap_size = match self.storage_kind() {
            StorageKind::Inline => 0,
            StorageKind::Heap => self.capacity(),
        };
        std::mem::size_of::<Self>() + heap_size
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;
    use crate::assert_eq2;

    fn assert_terminated<const N: usize>(buffer: &SbBuffer<N>) {
        assert!(buffer.len() < buffer.capacity());
        assert_eq2!(buffer.as_bytes_with_nul()[buffer.len()], TERMINATOR);
    }

    #[test]
    fn test_new() {
        let buffer = SbBuffer::<256>::new();
        assert!(buffer.is_valid());
        assert_eq2!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert_eq2!(buffer.capacity(), 256);
        assert_eq2!(buffer.inline_capacity(), 256);
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);
        assert_eq2!(buffer.as_bytes(), b"");
        assert_eq2!(buffer.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_default_uses_default_inline_capacity() {
        let buffer: SbBuffer = SbBuffer::default();
        assert_eq2!(buffer.capacity(), DEFAULT_INLINE_CAPACITY);
    }

    #[test]
    fn test_append_hello_world_stays_inline() {
        let mut buffer = SbBuffer::<256>::new();
        buffer.append(b"Hello").unwrap();
        buffer.append(b" World").unwrap();

        assert_eq2!(buffer.as_bytes(), b"Hello World");
        assert_eq2!(buffer.len(), 11);
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);
        assert_terminated(&buffer);
    }

    #[test]
    fn test_append_empty_is_a_no_op() {
        let mut buffer = SbBuffer::<4>::new();
        buffer.append(b"abc").unwrap();
        buffer.append(b"").unwrap();
        assert_eq2!(buffer.as_bytes(), b"abc");
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);
        assert_terminated(&buffer);
    }

    #[test]
    fn test_inline_boundary() {
        // N - 1 bytes fit inline, with the terminator in the last slot.
        let mut buffer = SbBuffer::<8>::new();
        buffer.append(b"1234567").unwrap();
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);
        assert_eq2!(buffer.capacity(), 8);
        assert_terminated(&buffer);

        // One more byte spills.
        buffer.append(b"8").unwrap();
        assert_eq2!(buffer.storage_kind(), StorageKind::Heap);
        assert_eq2!(buffer.capacity(), 16);
        assert_eq2!(buffer.as_bytes(), b"12345678");
        assert_terminated(&buffer);
    }

    #[test]
    fn test_append_300_bytes_spills_to_heap() {
        let content: Vec<u8> = (0..300_u16).map(|it| b'a' + (it % 26) as u8).collect();
        let mut buffer = SbBuffer::<256>::new();
        buffer.append(&content).unwrap();

        assert_eq2!(buffer.storage_kind(), StorageKind::Heap);
        assert_eq2!(buffer.len(), 300);
        assert_eq2!(buffer.capacity(), 512);
        assert_eq2!(buffer.as_bytes(), content.as_slice());
        assert_terminated(&buffer);
    }

    #[test]
    fn test_heap_regrowth_preserves_content() {
        let mut buffer = SbBuffer::<4>::new();
        let mut expected = Vec::new();
        for round in 0..100_u8 {
            let piece = [round; 7];
            buffer.append(&piece).unwrap();
            expected.extend_from_slice(&piece);
            assert_terminated(&buffer);
        }
        assert_eq2!(buffer.as_bytes(), expected.as_slice());
        assert_eq2!(buffer.capacity(), 1024);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = SbBuffer::<8>::new();
        buffer.append(&[b'z'; 20]).unwrap();
        let capacity = buffer.capacity();

        buffer.clear();
        assert_eq2!(buffer.len(), 0);
        assert_eq2!(buffer.as_bytes_with_nul(), b"\0");
        assert_eq2!(buffer.capacity(), capacity);
        assert_eq2!(buffer.storage_kind(), StorageKind::Heap);

        buffer.append(&[b'y'; 20]).unwrap();
        assert_eq2!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_reset_returns_to_inline() {
        let mut buffer = SbBuffer::<8>::new();
        buffer.append(&[b'z'; 100]).unwrap();
        assert!(buffer.is_heap_backed());

        buffer.reset();
        assert_eq2!(buffer.len(), 0);
        assert_eq2!(buffer.capacity(), 8);
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);
        assert!(buffer.is_valid());

        buffer.append(b"hi").unwrap();
        assert_eq2!(buffer.as_bytes(), b"hi");
        assert_eq2!(buffer.len(), 2);
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);
    }

    #[test]
    fn test_finalize_matches_reset() {
        let mut buffer = SbBuffer::<8>::new();
        buffer.append(&[b'z'; 100]).unwrap();
        buffer.finalize();
        assert_eq2!(buffer.len(), 0);
        assert_eq2!(buffer.capacity(), 8);
        assert_eq2!(buffer.storage_kind(), StorageKind::Inline);

        // Twice is fine.
        buffer.finalize();
        assert_eq2!(buffer.capacity(), 8);
    }

    #[test]
    fn test_copy_from() {
        let mut source = SbBuffer::<16>::new();
        source.append(b"foo").unwrap();
        let mut destination = SbBuffer::<16>::new();
        destination.append(b"existing").unwrap();

        destination.copy_from(&source).unwrap();
        assert_eq2!(destination.as_bytes(), b"foo");
        assert_eq2!(destination.len(), 3);

        source.append(b"bar").unwrap();
        assert_eq2!(destination.as_bytes(), b"foo");

        destination.append(b"baz").unwrap();
        assert_eq2!(source.as_bytes(), b"foobar");
    }

    #[test]
    fn test_copy_from_heap_backed_destination_is_refitted() {
        let mut destination = SbBuffer::<8>::new();
        destination.append(&[b'q'; 200]).unwrap();
        let source = SbBuffer::<8>::try_from("tiny").unwrap();

        destination.copy_from(&source).unwrap();
        assert_eq2!(destination.as_bytes(), b"tiny");
        assert_eq2!(destination.storage_kind(), StorageKind::Inline);
    }

    #[test]
    fn test_copy_between_inline_sizes() {
        let source = SbBuffer::<64>::try_from("a bit longer than eight").unwrap();
        let mut destination = SbBuffer::<8>::new();
        destination.copy_from(&source).unwrap();
        assert_eq2!(destination, source);
        assert!(destination.is_heap_backed());
        assert!(!source.is_heap_backed());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = SbBuffer::<4>::try_from("heap backed content").unwrap();
        let copy = original.clone();
        original.append(b"!").unwrap();

        assert_eq2!(copy, "heap backed content");
        assert_eq2!(original, "heap backed content!");
        assert_eq2!(copy.capacity(), 32);
    }

    #[test]
    fn test_try_clone_is_sized_for_content() {
        let mut original = SbBuffer::<4>::new();
        original.append(&[b'x'; 100]).unwrap();
        original.clear();
        original.append(b"ab").unwrap();

        let copy = original.try_clone().unwrap();
        assert_eq2!(copy, original);
        assert_eq2!(copy.storage_kind(), StorageKind::Inline);
    }

    #[test]
    fn test_as_c_str() {
        let buffer = SbBuffer::<16>::try_from("Hello").unwrap();
        assert_eq2!(buffer.as_c_str().unwrap(), c"Hello");

        let empty = SbBuffer::<16>::new();
        assert_eq2!(empty.as_c_str().unwrap(), c"");
    }

    #[test]
    fn test_as_c_str_with_interior_nul() {
        let buffer = SbBuffer::<16>::try_from(&b"ab\0cd"[..]).unwrap();
        assert_eq2!(buffer.len(), 5);
        assert!(matches!(
            buffer.as_c_str(),
            Err(BufferError::InteriorNul { position: 2 })
        ));
    }

    #[test]
    fn test_fmt_write() {
        let mut buffer = SbBuffer::<8>::new();
        write!(buffer, "{}-{}", 12, "abc").unwrap();
        assert_eq2!(buffer, "12-abc");
    }

    #[test]
    fn test_io_write() {
        use std::io::Write as _;

        let mut buffer = SbBuffer::<8>::new();
        buffer.write_all(b"written through io::Write").unwrap();
        buffer.flush().unwrap();
        assert_eq2!(buffer, "written through io::Write");
    }

    #[test]
    fn test_debug() {
        let buffer = SbBuffer::<8>::try_from("dbg").unwrap();
        assert_eq2!(
            format!("{buffer:?}"),
            r#"SbBuffer { content: "dbg", length: 3, capacity: 8, storage: Inline }"#
        );
    }

    #[test]
    fn test_get_mem_size() {
        let mut buffer = SbBuffer::<8>::new();
        let inline_size = buffer.get_mem_size();
        assert_eq2!(inline_size, std::mem::size_of::<SbBuffer<8>>());

        buffer.append(&[b'm'; 40]).unwrap();
        assert_eq2!(buffer.get_mem_size(), inline_size + 64);
    }
}
