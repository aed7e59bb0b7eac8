// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias to make it easy to work with [`core::result::Result`] and [`BufferError`].
/// Binaries that want pretty reports can convert into [`miette::Report`] with `?`,
/// since [`BufferError`] implements [`miette::Diagnostic`].
pub type BufferResult<T> = Result<T, BufferError>;

/// Everything that can go wrong when working with a [`crate::SbBuffer`].
///
/// | Variant                | Raised by                                   | Buffer afterwards |
/// | :--------------------- | :------------------------------------------ | :---------------- |
/// | [`InvalidHandle`]      | [`crate::handle_api`]                       | Untouched         |
/// | [`InvalidArgument`]    | [`crate::handle_api`]                       | Untouched         |
/// | [`OutOfMemory`]        | [`crate::SbBuffer::append`] and its callers | Unchanged         |
/// | [`CapacityOverflow`]   | [`crate::SbBuffer::append`] and its callers | Unchanged         |
/// | [`InteriorNul`]        | [`crate::SbBuffer::as_c_str`]               | Untouched         |
///
/// [`CapacityOverflow`]: Self::CapacityOverflow
/// [`InteriorNul`]: Self::InteriorNul
/// [`InvalidArgument`]: Self::InvalidArgument
/// [`InvalidHandle`]: Self::InvalidHandle
/// [`OutOfMemory`]: Self::OutOfMemory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum BufferError {
    /// The handle is absent, or the value it points to was never constructed (or has
    /// been corrupted).
    #[error("Invalid or uninitialized buffer")]
    #[diagnostic(
        code(sb_buffer::invalid_handle),
        help("Construct the buffer with `SbBuffer::new()` before using it.")
    )]
    InvalidHandle,

    /// A target or source handed to an operation is unusable.
    #[error("Invalid argument: {reason}")]
    #[diagnostic(code(sb_buffer::invalid_argument))]
    InvalidArgument { reason: &'static str },

    /// Growing the storage could not obtain the required block.
    #[error("Could not allocate {requested} bytes for the buffer")]
    #[diagnostic(
        code(sb_buffer::out_of_memory),
        help("Free other resources and retry, the buffer was left as it was.")
    )]
    OutOfMemory { requested: usize },

    /// The capacity needed to hold the content can't be represented.
    #[error("Capacity overflow appending {additional} bytes to {length} bytes")]
    #[diagnostic(code(sb_buffer::capacity_overflow))]
    CapacityOverflow { length: usize, additional: usize },

    /// The content holds a zero byte, so it can't be viewed as a C string.
    #[error("Content has a zero byte at position {position}")]
    #[diagnostic(
        code(sb_buffer::interior_nul),
        help("Use `as_bytes()` to read content that holds zero bytes.")
    )]
    InteriorNul { position: usize },
}
