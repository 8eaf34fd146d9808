#![cfg(feature = "std")]
//! Byte source implementations for `std::io` types
//!
//! Both follow the [`ZCursor`](crate::bytestream::ZCursor) contract,
//! a failed exact read leaves the position where it was.

use std::io;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::bytestream::reader::{ZByteIoError, ZSeekFrom};
use crate::bytestream::ZByteReaderTrait;

/// Read exactly `buf.len()` bytes, restoring the stream position on failure
fn read_exact_or_restore<R: Read + Seek>(
    reader: &mut R, buf: &mut [u8]
) -> Result<(), ZByteIoError> {
    let start = reader.stream_position()?;

    if let Err(e) = reader.read_exact(buf) {
        reader.seek(SeekFrom::Start(start))?;
        return Err(ZByteIoError::from(e));
    }
    Ok(())
}

impl<T> ZByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        match self.read_exact(&mut buf) {
            Ok(()) => buf[0],
            Err(_) => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZByteIoError> {
        read_exact_or_restore(self, buf)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ZByteIoError> {
        read_exact_or_restore(self, buf)
    }

    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        if read_exact_or_restore(self, buf).is_err() {
            buf.fill(0);
            let len = self.get_ref().as_ref().len() as u64;
            self.set_position(self.position().max(len));
        }
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        self.read(buf).map_err(ZByteIoError::from)
    }

    #[inline(always)]
    fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
        self.seek(from.to_std_seek()).map_err(ZByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ZByteIoError> {
        Ok(self.position() as usize >= self.get_ref().as_ref().len())
    }

    fn z_position(&mut self) -> Result<u64, ZByteIoError> {
        Ok(self.position())
    }
}

impl<T: io::Read + io::Seek> ZByteReaderTrait for BufReader<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        match self.read_exact(&mut buf) {
            Ok(()) => buf[0],
            Err(_) => 0
        }
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ZByteIoError> {
        read_exact_or_restore(self, buf)
    }

    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ZByteIoError> {
        read_exact_or_restore(self, buf)
    }

    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        if read_exact_or_restore(self, buf).is_err() {
            buf.fill(0);
            // sources that cannot seek from the end are drained instead,
            // a failing drain leaves reads to report the broken source
            if self.seek(SeekFrom::End(0)).is_err() {
                let _ = io::copy(self, &mut io::sink());
            }
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ZByteIoError> {
        self.read(buf).map_err(ZByteIoError::from)
    }

    fn z_seek(&mut self, from: ZSeekFrom) -> Result<u64, ZByteIoError> {
        self.seek(from.to_std_seek()).map_err(ZByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, ZByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(ZByteIoError::from)
    }

    fn z_position(&mut self) -> Result<u64, ZByteIoError> {
        self.stream_position().map_err(ZByteIoError::from)
    }
}
