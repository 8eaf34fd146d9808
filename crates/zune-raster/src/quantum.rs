/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Precision rescaling into the internal quantum
//!
//! Every sample, whatever its packed precision, is mapped through a
//! lookup table into `0..=QUANTUM_MAX` so sinks only ever see one range.
use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;

use crate::errors::RasterDecodeErrors;

/// Largest value a rescaled sample can take
pub const QUANTUM_MAX: u16 = BitDepth::Sixteen.max_value();

/// Rescale an eight bit value into the quantum range.
///
/// Same result as an 8 bit [`QuantumLut`] lookup, used to
/// pre-scale palette entries once when they are loaded
#[inline(always)]
pub(crate) const fn scale_u8(value: u8) -> u16 {
    // 65535 / 255 == 257 exactly
    (value as u16) * 257
}

/// Round `raw * QUANTUM_MAX / max_raw` to the nearest integer
#[inline(always)]
const fn rescale(raw: u64, max_raw: u64) -> u16 {
    ((raw * QUANTUM_MAX as u64 * 2 + max_raw) / (max_raw * 2)) as u16
}

/// Deepest sample that gets a materialized table
const MAX_TABLE_DEPTH: u8 = 16;

/// Deepest sample accepted at all
const MAX_DEPTH: u8 = 24;

/// Maps raw samples of `depth` bits to the quantum range
///
/// `lut[i] = round(i * QUANTUM_MAX / (2^depth - 1))`, so the mapping is
/// monotone with `lut[0] == 0` and `lut[max] == QUANTUM_MAX`.
///
/// Depths up to 16 keep a `2^depth` entry table, deeper samples are
/// rescaled on lookup instead of allocating `2^24` entries.
#[derive(Clone, Debug)]
pub struct QuantumLut {
    depth:   u8,
    max_raw: usize,
    table:   Vec<u16>
}

impl QuantumLut {
    /// Build a table for samples of `depth` bits, `depth` must be in `1..=24`
    pub fn build(depth: u8) -> Result<QuantumLut, RasterDecodeErrors> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(RasterDecodeErrors::UnsupportedDepth(u16::from(depth)));
        }
        let max_raw = (1_usize << depth) - 1;
        let mut table = Vec::new();

        if depth <= MAX_TABLE_DEPTH {
            let entries = max_raw + 1;
            table
                .try_reserve_exact(entries)
                .map_err(|_| RasterDecodeErrors::AllocationFailure(entries * 2))?;

            table.extend((0..=max_raw as u64).map(|i| rescale(i, max_raw as u64)));
        }
        Ok(QuantumLut {
            depth,
            max_raw,
            table
        })
    }

    /// Build the table used for one channel of a pixel of `bits_per_pixel` bits
    ///
    /// Direct colour 24 bit pixels carry three 8 bit channels so they
    /// share the 8 bit table.
    pub fn for_pixel_depth(bits_per_pixel: u16) -> Result<QuantumLut, RasterDecodeErrors> {
        match bits_per_pixel {
            1 | 2 | 4 | 8 | 16 => QuantumLut::build(bits_per_pixel as u8),
            24 => QuantumLut::build(8),
            _ => Err(RasterDecodeErrors::UnsupportedDepth(bits_per_pixel))
        }
    }

    /// Rebuild the table in place if `depth` differs from the current one
    pub fn rebuild(&mut self, depth: u8) -> Result<(), RasterDecodeErrors> {
        if depth != self.depth {
            *self = QuantumLut::build(depth)?;
        }
        Ok(())
    }

    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// The largest raw value this table accepts
    pub const fn max_raw(&self) -> usize {
        self.max_raw
    }

    /// The materialized table, `None` for depths rescaled on lookup
    pub fn as_slice(&self) -> Option<&[u16]> {
        if self.table.is_empty() {
            None
        } else {
            Some(&self.table)
        }
    }

    /// Look up a raw sample, values above the table are saturated
    #[inline(always)]
    pub fn get(&self, raw: usize) -> u16 {
        let raw = raw.min(self.max_raw);
        match self.table.get(raw) {
            Some(value) => *value,
            None => rescale(raw as u64, self.max_raw as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_for_every_depth() {
        for depth in [1_u8, 2, 4, 8, 16, 24] {
            let lut = QuantumLut::build(depth).unwrap();
            assert_eq!(lut.max_raw(), (1 << depth) - 1, "depth {depth}");
            assert_eq!(lut.get(0), 0, "depth {depth}");
            assert_eq!(lut.get((1 << depth) - 1), QUANTUM_MAX, "depth {depth}");
        }
    }

    #[test]
    fn deep_samples_are_rescaled_on_lookup() {
        let lut = QuantumLut::build(24).unwrap();
        assert!(lut.as_slice().is_none());

        assert_eq!(lut.get(1), 0);
        assert_eq!(lut.get(1 << 23), 32768);
        assert_eq!(lut.get(0xFF_FFFE), QUANTUM_MAX);
        assert_eq!(lut.get(usize::MAX), QUANTUM_MAX);
        assert!(QuantumLut::build(25).is_err());
    }

    #[test]
    fn endpoints_for_every_pixel_depth() {
        for depth in [1_u16, 2, 4, 8, 16, 24] {
            let lut = QuantumLut::for_pixel_depth(depth).unwrap();
            assert_eq!(lut.get(0), 0, "depth {depth}");
            assert_eq!(lut.get(lut.max_raw()), QUANTUM_MAX, "depth {depth}");
        }
    }

    #[test]
    fn tables_are_monotone() {
        for depth in 1..=16 {
            let lut = QuantumLut::build(depth).unwrap();
            let table = lut.as_slice().unwrap();
            assert_eq!(table.len(), 1 << depth);
            assert!(table.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn eight_bit_table_matches_palette_scaling() {
        let lut = QuantumLut::build(8).unwrap();
        for i in 0..=255_u8 {
            assert_eq!(lut.get(usize::from(i)), scale_u8(i));
        }
    }

    #[test]
    fn two_bit_table_rounds() {
        let lut = QuantumLut::build(2).unwrap();
        assert_eq!(lut.as_slice(), Some(&[0, 21845, 43690, 65535][..]));
    }

    #[test]
    fn rebuild_changes_depth() {
        let mut lut = QuantumLut::build(4).unwrap();
        lut.rebuild(4).unwrap();
        assert_eq!(lut.depth(), 4);
        lut.rebuild(1).unwrap();
        assert_eq!(lut.as_slice(), Some(&[0, QUANTUM_MAX][..]));
        assert!(lut.rebuild(25).is_err());
        assert!(QuantumLut::for_pixel_depth(3).is_err());
    }
}
