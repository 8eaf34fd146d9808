/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::Formatter;

pub(crate) mod std_readers;
pub(crate) mod zcursor;
use crate::bytestream::ZByteReaderTrait;

/// Where a seek is measured from
///
/// Mirrors `std::io::SeekFrom` so byte sources work without `std`.
/// Seeking past the end is allowed, seeking before the first byte is not.
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum ZSeekFrom {
    /// Absolute offset
    Start(u64),
    /// Offset relative to the length of the source
    End(i64),
    /// Offset relative to the current position
    Current(i64)
}

impl ZSeekFrom {
    #[cfg(feature = "std")]
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            ZSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            ZSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            ZSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors a byte source can report
pub enum ZByteIoError {
    /// The `std::io` reader failed
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// A position did not fit the integer type it was converted to
    TryFromIntError(core::num::TryFromIntError),
    /// requested, available
    NotEnoughBytes(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl core::fmt::Debug for ZByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ZByteIoError::StdIoError(err) => {
                writeln!(f, "I/O error: {err}")
            }
            ZByteIoError::TryFromIntError(err) => {
                writeln!(f, "Position out of range: {err}")
            }
            ZByteIoError::NotEnoughBytes(requested, available) => {
                writeln!(
                    f,
                    "Short read, wanted {requested} bytes but only {available} are left"
                )
            }
            ZByteIoError::Generic(err) => {
                writeln!(f, "{err}")
            }
            ZByteIoError::SeekError(err) => {
                writeln!(f, "Seek failed: {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ZByteIoError {
    fn from(value: std::io::Error) -> Self {
        ZByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ZByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ZByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ZByteIoError {
    fn from(value: &'static str) -> Self {
        ZByteIoError::Generic(value)
    }
}

/// The byte source every decoder reads through.
///
/// Reads come in two flavours, `*_err` variants that fail on a short
/// read and leave the position untouched, and EOF tolerant variants that
/// return `0` (the sentinel legacy formats expect) once the source is exhausted.
pub struct ZReader<T: ZByteReaderTrait> {
    inner: T
}

impl<T: ZByteReaderTrait> ZReader<T> {
    pub fn new(source: T) -> ZReader<T> {
        ZReader { inner: source }
    }

    /// Give back the byte source
    pub fn consume(self) -> T {
        self.inner
    }

    #[inline]
    pub fn skip(&mut self, num: usize) -> Result<u64, ZByteIoError> {
        self.inner.z_seek(ZSeekFrom::Current(i64::try_from(num)?))
    }

    #[inline]
    pub fn rewind(&mut self, num: usize) -> Result<u64, ZByteIoError> {
        self.inner.z_seek(ZSeekFrom::Current(-i64::try_from(num)?))
    }

    #[inline]
    pub fn seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
        self.inner.z_seek(from)
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), ZByteIoError> {
        self.seek(ZSeekFrom::Start(position as u64)).map(|_| ())
    }

    #[inline]
    pub fn position(&mut self) -> Result<u64, ZByteIoError> {
        self.inner.z_position()
    }

    #[inline]
    pub fn eof(&mut self) -> Result<bool, ZByteIoError> {
        self.inner.is_eof()
    }

    /// Total length of the source.
    ///
    /// Found by seeking to the end, the position is restored afterwards
    pub fn stream_len(&mut self) -> Result<u64, ZByteIoError> {
        let current = self.position()?;
        let len = self.seek(ZSeekFrom::End(0))?;

        if current != len {
            self.seek(ZSeekFrom::Start(current))?;
        }
        Ok(len)
    }

    /// Read a single byte returning `0` on EOF
    #[inline(always)]
    pub fn read_u8(&mut self) -> u8 {
        self.inner.read_byte_no_error()
    }

    /// Read a single byte or return an error on EOF
    #[inline(always)]
    pub fn read_u8_err(&mut self) -> Result<u8, ZByteIoError> {
        Ok(self.read_fixed_bytes_or_error::<1>()?[0])
    }

    /// Read `N` bytes, failing without moving if fewer are left
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ZByteIoError> {
        let mut bytes = [0; N];
        self.inner.read_const_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// Read `N` bytes, all zero if fewer are left
    #[inline(always)]
    pub fn read_fixed_bytes_or_zero<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0; N];
        self.inner.read_const_bytes_no_error(&mut bytes);
        bytes
    }

    /// Fill `buf` completely or fail without moving
    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    /// Read up to `buf.len()` bytes, returning how many were read
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        self.inner.read_bytes(buf)
    }
}

/// Endian aware integer reads, a sentinel and an erroring flavour for each
macro_rules! endian_reads {
    ($int:ty, $from:ident, $sentinel:ident, $checked:ident, $order:literal) => {
        impl<T: ZByteReaderTrait> ZReader<T> {
            #[doc = concat!(
                "Read a ", $order, " `", stringify!($int), "`, `0` if the source is too short"
            )]
            #[inline(always)]
            pub fn $sentinel(&mut self) -> $int {
                <$int>::$from(self.read_fixed_bytes_or_zero())
            }

            #[doc = concat!(
                "Read a ", $order, " `", stringify!($int), "` or fail if the source is too short"
            )]
            #[inline]
            pub fn $checked(&mut self) -> Result<$int, ZByteIoError> {
                self.read_fixed_bytes_or_error().map(<$int>::$from)
            }
        }
    };
}

endian_reads!(u16, from_le_bytes, get_u16_le, get_u16_le_err, "little endian");
endian_reads!(u16, from_be_bytes, get_u16_be, get_u16_be_err, "big endian");
endian_reads!(u32, from_le_bytes, get_u32_le, get_u32_le_err, "little endian");
endian_reads!(u32, from_be_bytes, get_u32_be, get_u32_be_err, "big endian");

#[cfg(test)]
mod tests {
    use crate::bytestream::{ZCursor, ZReader, ZSeekFrom};

    #[test]
    fn short_reads_return_sentinel() {
        let mut reader = ZReader::new(ZCursor::new([0x34_u8, 0x12, 0xAB]));

        assert_eq!(reader.get_u16_le(), 0x1234);
        // one byte left, not enough for a u16
        assert_eq!(reader.get_u16_le(), 0);
        assert!(reader.eof().unwrap());
        assert_eq!(reader.read_u8(), 0);
        assert!(reader.read_u8_err().is_err());
    }

    #[test]
    fn failed_exact_reads_keep_position() {
        let mut reader = ZReader::new(ZCursor::new([1_u8, 2, 3]));
        reader.skip(1).unwrap();

        assert!(reader.get_u32_le_err().is_err());
        assert_eq!(reader.position().unwrap(), 1);
        assert_eq!(reader.get_u16_be_err().unwrap(), 0x0203);
    }

    #[test]
    fn stream_len_restores_position() {
        let mut reader = ZReader::new(ZCursor::new([0_u8; 10]));
        reader.seek(ZSeekFrom::Start(4)).unwrap();

        assert_eq!(reader.stream_len().unwrap(), 10);
        assert_eq!(reader.position().unwrap(), 4);

        reader.rewind(4).unwrap();
        assert!(reader.rewind(1).is_err());
    }
}
