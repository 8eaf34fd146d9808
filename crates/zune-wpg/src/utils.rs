/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReaderTrait, ZReader};

/// Read a WordPerfect variable length integer
///
/// - A byte below `0xFF` is the value itself.
/// - Otherwise a little endian u16 follows, values below `0x8000` are final.
/// - Otherwise the low 15 bits are the high half of a 31 bit value whose low
///   half is the next little endian u16.
///
/// Returns the value and how many bytes were consumed, reads past the
/// end of the stream count as zero.
pub fn read_wp_dword<T: ZByteReaderTrait>(reader: &mut ZReader<T>) -> (u32, usize) {
    let first = reader.read_u8();
    if first < 0xFF {
        return (u32::from(first), 1);
    }
    let value = u32::from(reader.get_u16_le());
    if value < 0x8000 {
        return (value, 3);
    }
    let low = u32::from(reader.get_u16_le());

    (((value & 0x7FFF) << 16) + low, 5)
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::{ZCursor, ZReader};

    use super::read_wp_dword;

    fn read(bytes: &[u8]) -> (u32, usize) {
        read_wp_dword(&mut ZReader::new(ZCursor::new(bytes)))
    }

    #[test]
    fn short_form() {
        assert_eq!(read(&[0x00]), (0, 1));
        assert_eq!(read(&[0xFE, 0x99]), (0xFE, 1));
    }

    #[test]
    fn three_byte_form() {
        assert_eq!(read(&[0xFF, 0x34, 0x12]), (0x1234, 3));
        assert_eq!(read(&[0xFF, 0xFF, 0x7F]), (0x7FFF, 3));
    }

    #[test]
    fn five_byte_form() {
        assert_eq!(read(&[0xFF, 0x01, 0x80, 0x78, 0x56]), (0x0001_5678, 5));
        assert_eq!(read(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF]), (0x7FFF_FFFF, 5));
    }

    #[test]
    fn truncated_reads_are_zero() {
        assert_eq!(read(&[0xFF, 0x10]), (0, 3));
    }
}
