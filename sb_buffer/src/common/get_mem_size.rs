// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

/// Size in bytes of a value, including anything it owns on the heap.
pub trait GetMemSize {
    fn get_mem_size(&self) -> usize;
}

/// Calculates the total memory size of a slice of items that implement [`GetMemSize`].
/// Eg: a pool of [`crate::SbBuffer`] values that are reused across many fills.
#[must_use]
pub fn slice_size<T: GetMemSize>(slice: &[T]) -> usize {
    slice.iter().map(GetMemSize::get_mem_size).sum::<usize>()
}

/// Memory size wrapper for display.
///
/// Shows the size in kilobytes with commas for readability (or bytes, when under one
/// kilobyte), or "?" if the size is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySize {
    inner: Option<usize>,
}

impl MemorySize {
    #[must_use]
    pub fn new(size: usize) -> Self { Self { inner: Some(size) } }

    #[must_use]
    pub fn unknown() -> Self { Self { inner: None } }

    #[must_use]
    pub fn size(&self) -> Option<usize> { self.inner }
}

impl<T: GetMemSize> From<&T> for MemorySize {
    fn from(value: &T) -> Self { Self::new(value.get_mem_size()) }
}

impl Display for MemorySize {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.inner {
            Some(size) => write!(f, "{}", format_as_kilobytes_with_commas(size)),
            None => write!(f, "?"),
        }
    }
}

#[must_use]
pub fn format_as_kilobytes_with_commas(bytes_size: usize) -> String {
    if bytes_size < 1024 {
        format!("{} B", format_with_commas(bytes_size))
    } else {
        format!("{} KB", format_with_commas(bytes_size / 1024))
    }
}

/// Format a number with commas.
#[must_use]
pub fn format_with_commas(num: usize) -> String {
    let digits = num.to_string();
    let mut acc = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        // Digits left before the end of the number.
        let remaining = digits.len() - index;
        if index > 0 && remaining.is_multiple_of(3) {
            acc.push(',');
        }
        acc.push(ch);
    }
    acc
}
