// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Append a string literal to a [`crate::SbBuffer`]. The literal's bytes are a
/// `const`, so the length is known at compile time. Evaluates to the
/// [`crate::BufferResult`] of [`crate::SbBuffer::append`].
///
/// For strings that aren't literals use [`crate::SbBuffer::append_str`].
///
/// # Example
///
/// ```
/// use sb_buffer::{SbBuffer, sb_append_literal};
///
/// let mut buffer = SbBuffer::<32>::new();
/// sb_append_literal!(buffer, "Hello").unwrap();
/// sb_append_literal!(buffer, " World").unwrap();
/// assert_eq!(buffer.as_bytes(), b"Hello World");
/// ```
#[macro_export]
macro_rules! sb_append_literal {
    ($buffer:expr, $literal:literal $(,)?) => {{
        const LITERAL_BYTES: &[u8] = concat!($literal).as_bytes();
        $buffer.append(LITERAL_BYTES)
    }};
}
