/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The byte source trait

use crate::bytestream::reader::{ZByteIoError, ZSeekFrom};

/// A seekable source of bytes.
///
/// Decoders never see this directly, they go through
/// [`ZReader`](crate::bytestream::ZReader) which builds the endian aware
/// reads on top of it.
///
/// Implemented for [`ZCursor`](crate::bytestream::ZCursor), and with the
/// `std` feature for `std::io::Cursor` and `std::io::BufReader`. In memory
/// data should prefer `ZCursor`.
pub trait ZByteReaderTrait {
    /// Read one byte, `0` once the source is exhausted.
    ///
    /// Run length decoders call this per control byte, keep it cheap
    fn read_byte_no_error(&mut self) -> u8;

    /// Fill `buf` completely.
    ///
    /// ## Errors
    /// When fewer than `buf.len()` bytes are left. The position must not
    /// move in that case
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZByteIoError>;

    /// [`read_exact_bytes`](Self::read_exact_bytes) for a buffer whose size
    /// is known at compile time
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ZByteIoError>;

    /// Fill `buf` completely or zero all of it.
    ///
    /// A short read consumes the rest of the source, so
    /// [`is_eof`](Self::is_eof) reports `true` afterwards
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]);

    /// Read up to `buf.len()` bytes, returning how many were read.
    ///
    /// Fewer bytes than asked for is not an error
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError>;

    /// Move the position, returning the new absolute position
    fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError>;

    /// Whether the position is at or past the end.
    ///
    /// For file backed sources this may need to query the file
    fn is_eof(&mut self) -> Result<bool, ZByteIoError>;

    /// Current absolute position
    fn z_position(&mut self) -> Result<u64, ZByteIoError>;
}
