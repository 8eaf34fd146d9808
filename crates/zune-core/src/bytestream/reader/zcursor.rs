/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An in memory byte source usable without `std`
use crate::bytestream::reader::{ZByteIoError, ZSeekFrom};
use crate::bytestream::ZByteReaderTrait;

/// A cursor over anything that can be viewed as a byte slice.
///
/// Seeking past the end is allowed, reads from there behave as EOF.
pub struct ZCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ZCursor<T> {
    pub fn new(buffer: T) -> ZCursor<T> {
        ZCursor {
            stream:   buffer,
            position: 0
        }
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.stream.as_ref().len()
    }

    pub fn inner(self) -> T {
        self.stream
    }

    #[inline(always)]
    fn remaining(&self) -> &[u8] {
        let bytes = self.stream.as_ref();
        &bytes[self.position.min(bytes.len())..]
    }
}

impl<T: AsRef<[u8]>> ZByteReaderTrait for ZCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        match self.stream.as_ref().get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZByteIoError> {
        let remaining = self.remaining();

        if remaining.len() < buf.len() {
            return Err(ZByteIoError::NotEnoughBytes(buf.len(), remaining.len()));
        }
        buf.copy_from_slice(&remaining[..buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ZByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        if self.read_exact_bytes(buf).is_err() {
            buf.fill(0);
            self.position = self.position.max(self.stream.as_ref().len());
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        let remaining = self.remaining();
        let count = remaining.len().min(buf.len());

        buf[..count].copy_from_slice(&remaining[..count]);
        self.position += count;
        Ok(count)
    }

    fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
        let (base, offset) = match from {
            ZSeekFrom::Start(pos) => {
                self.position = usize::try_from(pos)?;
                return Ok(pos);
            }
            ZSeekFrom::End(offset) => (self.stream.as_ref().len(), offset),
            ZSeekFrom::Current(offset) => (self.position, offset)
        };
        let new_pos = i64::try_from(base)?
            .checked_add(offset)
            .ok_or(ZByteIoError::SeekError("Seek offset overflows"))?;

        if new_pos < 0 {
            return Err(ZByteIoError::SeekError(
                "Cannot seek to a position before the start of the stream"
            ));
        }
        self.position = usize::try_from(new_pos)?;
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ZByteIoError> {
        Ok(ZCursor::is_eof(self))
    }

    #[inline(always)]
    fn z_position(&mut self) -> Result<u64, ZByteIoError> {
        Ok(self.position as u64)
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::{ZByteReaderTrait, ZCursor, ZSeekFrom};

    #[test]
    fn seek_before_start_fails() {
        let mut cursor = ZCursor::new([1_u8, 2, 3]);
        assert!(cursor.z_seek(ZSeekFrom::Current(-1)).is_err());
        assert_eq!(cursor.z_seek(ZSeekFrom::End(-1)).unwrap(), 2);
        assert_eq!(cursor.read_byte_no_error(), 3);
        assert_eq!(cursor.read_byte_no_error(), 0);
    }

    #[test]
    fn partial_const_read_zeroes_and_consumes() {
        let mut cursor = ZCursor::new([9_u8, 9, 9]);
        let mut buf = [0xAA_u8; 4];
        cursor.read_const_bytes_no_error(&mut buf);

        assert_eq!(buf, [0; 4]);
        assert!(cursor.is_eof());
    }

    #[test]
    fn read_bytes_is_short_at_end() {
        let mut cursor = ZCursor::new([1_u8, 2]);
        let mut buf = [0; 5];
        assert_eq!(cursor.read_bytes(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[1, 2]);
        assert_eq!(cursor.read_bytes(&mut buf).unwrap(), 0);
    }
}
