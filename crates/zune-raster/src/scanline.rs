/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline assembly
//!
//! Decoded bytes are appended into a row buffer, a full row is handed to a
//! [`ScanlineConsumer`] and the cursor resets. Delta capable formats keep
//! two row buffers in a two slot arena and flip between them after every
//! commit, so the previous row is always the inactive slot.
use alloc::vec::Vec;

use zune_core::log::trace;

use crate::errors::RasterDecodeErrors;

/// Something that accepts complete packed rows
pub trait ScanlineConsumer {
    fn consume_row(&mut self, row: usize, data: &[u8]) -> Result<(), RasterDecodeErrors>;
}

/// Accumulates bytes into rows of `row_bytes` and commits them in order
pub struct ScanlineAssembler {
    slots:         [Vec<u8>; 2],
    active:        usize,
    cursor:        usize,
    row:           usize,
    rows:          usize,
    delta_capable: bool,
    xor:           bool
}

fn alloc_row(row_bytes: usize) -> Result<Vec<u8>, RasterDecodeErrors> {
    let mut row = Vec::new();
    row.try_reserve_exact(row_bytes)
        .map_err(|_| RasterDecodeErrors::AllocationFailure(row_bytes))?;
    row.resize(row_bytes, 0);
    Ok(row)
}

impl ScanlineAssembler {
    /// Create an assembler for `rows` rows of `row_bytes` bytes.
    ///
    /// The second slot is only allocated for delta capable formats,
    /// both start zeroed so the row before the first one reads as zeros.
    pub fn new(
        row_bytes: usize, rows: usize, delta_capable: bool
    ) -> Result<ScanlineAssembler, RasterDecodeErrors> {
        if row_bytes == 0 {
            return Err(RasterDecodeErrors::ZeroDimensions(row_bytes, rows));
        }
        let first = alloc_row(row_bytes)?;
        let second = if delta_capable {
            alloc_row(row_bytes)?
        } else {
            Vec::new()
        };
        trace!("Row buffer size: {row_bytes} bytes, delta rows: {delta_capable}");

        Ok(ScanlineAssembler {
            slots: [first, second],
            active: 0,
            cursor: 0,
            row: 0,
            rows,
            delta_capable,
            xor: false
        })
    }

    /// Index of the row currently being assembled
    pub const fn row_index(&self) -> usize {
        self.row
    }

    /// Byte offset inside the current row
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub fn row_bytes(&self) -> usize {
        self.slots[self.active].len()
    }

    pub const fn is_complete(&self) -> bool {
        self.row >= self.rows
    }

    pub const fn delta_enabled(&self) -> bool {
        self.xor
    }

    /// Flip XOR against the previous row for the bytes that follow.
    ///
    /// The mode resets to off after every commit
    pub fn toggle_delta(&mut self) {
        self.xor = !self.xor;
    }

    /// The last committed row, zeros before the first commit
    pub fn previous_row(&self) -> &[u8] {
        &self.slots[self.previous_slot()]
    }

    const fn previous_slot(&self) -> usize {
        if self.delta_capable {
            self.active ^ 1
        } else {
            self.active
        }
    }

    /// Append one byte at the cursor, committing the row once it is full.
    ///
    /// # Errors
    /// `RowIndexExhausted` once all rows have been committed, callers
    /// stop emitting when they see it
    #[inline]
    pub fn append_byte(
        &mut self, value: u8, out: &mut dyn ScanlineConsumer
    ) -> Result<(), RasterDecodeErrors> {
        if self.row >= self.rows {
            return Err(RasterDecodeErrors::RowIndexExhausted);
        }
        let value = if self.xor {
            value ^ self.slots[self.previous_slot()][self.cursor]
        } else {
            value
        };
        self.slots[self.active][self.cursor] = value;
        self.cursor += 1;

        if self.cursor == self.slots[self.active].len() {
            self.commit(out)?;
        }
        Ok(())
    }

    pub fn append_bytes(
        &mut self, values: &[u8], out: &mut dyn ScanlineConsumer
    ) -> Result<(), RasterDecodeErrors> {
        for value in values {
            self.append_byte(*value, out)?;
        }
        Ok(())
    }

    /// Re-submit the last committed row `count` times.
    ///
    /// Stops quietly once the row limit is hit.
    ///
    /// # Errors
    /// `MidRowRepeatViolation` if the cursor is not at the start of a row
    pub fn repeat_previous_row(
        &mut self, count: usize, out: &mut dyn ScanlineConsumer
    ) -> Result<(), RasterDecodeErrors> {
        if self.cursor != 0 {
            return Err(RasterDecodeErrors::MidRowRepeatViolation(
                self.row,
                self.cursor
            ));
        }
        for _ in 0..count {
            if self.row >= self.rows {
                break;
            }
            if self.delta_capable {
                let (first, second) = self.slots.split_at_mut(1);
                if self.active == 0 {
                    first[0].copy_from_slice(&second[0]);
                } else {
                    second[0].copy_from_slice(&first[0]);
                }
            }
            self.commit(out)?;
        }
        Ok(())
    }

    /// Zero the rest of the current row and every row after it, committing
    /// each one. Returns how many rows were committed.
    pub fn fill_remaining(
        &mut self, out: &mut dyn ScanlineConsumer
    ) -> Result<usize, RasterDecodeErrors> {
        let mut filled = 0;
        while self.row < self.rows {
            let cursor = self.cursor;
            self.slots[self.active][cursor..].fill(0);
            self.commit(out)?;
            filled += 1;
        }
        Ok(filled)
    }

    fn commit(&mut self, out: &mut dyn ScanlineConsumer) -> Result<(), RasterDecodeErrors> {
        out.consume_row(self.row, &self.slots[self.active])?;
        self.row += 1;
        self.cursor = 0;
        if self.delta_capable {
            self.active ^= 1;
            self.xor = false;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::vec::Vec;

    use super::*;

    /// Collects committed rows, used by the tests of every stage
    #[derive(Default)]
    pub(crate) struct RowCollector {
        pub rows: Vec<(usize, Vec<u8>)>
    }

    impl ScanlineConsumer for RowCollector {
        fn consume_row(&mut self, row: usize, data: &[u8]) -> Result<(), RasterDecodeErrors> {
            self.rows.push((row, data.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn commits_when_full() {
        let mut out = RowCollector::default();
        let mut asm = ScanlineAssembler::new(2, 2, false).unwrap();

        asm.append_bytes(&[1, 2, 3], &mut out).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].1, [1, 2]);
        assert_eq!(asm.cursor(), 1);
        assert_eq!(asm.row_index(), 1);
    }

    #[test]
    fn exhausted_rows_stop_emission() {
        let mut out = RowCollector::default();
        let mut asm = ScanlineAssembler::new(1, 2, false).unwrap();

        let err = asm.append_bytes(&[1, 2, 3, 4], &mut out).unwrap_err();
        assert!(matches!(err, RasterDecodeErrors::RowIndexExhausted));
        assert_eq!(out.rows.len(), 2);
        assert!(asm.is_complete());
    }

    #[test]
    fn repeat_copies_previous_row() {
        for delta in [false, true] {
            let mut out = RowCollector::default();
            let mut asm = ScanlineAssembler::new(2, 4, delta).unwrap();

            asm.append_bytes(&[7, 9], &mut out).unwrap();
            asm.repeat_previous_row(10, &mut out).unwrap();

            assert!(asm.is_complete());
            assert_eq!(out.rows.len(), 4);
            assert!(out.rows.iter().all(|(_, r)| r == &[7, 9]));
        }
    }

    #[test]
    fn repeat_mid_row_is_rejected() {
        let mut out = RowCollector::default();
        let mut asm = ScanlineAssembler::new(3, 2, false).unwrap();
        asm.append_byte(1, &mut out).unwrap();

        assert!(matches!(
            asm.repeat_previous_row(1, &mut out),
            Err(RasterDecodeErrors::MidRowRepeatViolation(0, 1))
        ));
    }

    #[test]
    fn xor_against_previous_row_then_reset() {
        let mut out = RowCollector::default();
        let mut asm = ScanlineAssembler::new(2, 3, true).unwrap();

        asm.append_bytes(&[0x0F, 0xF0], &mut out).unwrap();
        asm.toggle_delta();
        asm.append_bytes(&[0xFF, 0x0F], &mut out).unwrap();
        assert!(!asm.delta_enabled());
        // plain bytes after the reset
        asm.append_bytes(&[0x01, 0x02], &mut out).unwrap();

        assert_eq!(out.rows[1].1, [0xF0, 0xFF]);
        assert_eq!(out.rows[2].1, [0x01, 0x02]);
    }

    #[test]
    fn fill_zeroes_partial_and_remaining() {
        let mut out = RowCollector::default();
        let mut asm = ScanlineAssembler::new(3, 3, false).unwrap();

        asm.append_bytes(&[5, 5, 5, 6], &mut out).unwrap();
        assert_eq!(asm.fill_remaining(&mut out).unwrap(), 2);

        assert_eq!(out.rows[1].1, [6, 0, 0]);
        assert_eq!(out.rows[2].1, [0, 0, 0]);
    }
}
