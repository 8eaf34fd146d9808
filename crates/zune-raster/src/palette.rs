/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::errors::RasterDecodeErrors;
use crate::quantum::scale_u8;

/// A single palette colour, already rescaled to the quantum range
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PaletteEntry {
    pub red:     u16,
    pub green:   u16,
    pub blue:    u16,
    pub opacity: u16
}

impl PaletteEntry {
    /// Create an entry from 8 bit components
    pub const fn from_u8(red: u8, green: u8, blue: u8, opacity: u8) -> PaletteEntry {
        PaletteEntry {
            red:     scale_u8(red),
            green:   scale_u8(green),
            blue:    scale_u8(blue),
            opacity: scale_u8(opacity)
        }
    }

    /// Opaque black, the value new entries take when a palette grows
    pub const fn black() -> PaletteEntry {
        PaletteEntry::from_u8(0, 0, 0, 255)
    }

    pub const fn is_black(&self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }
}

/// An ordered, bounded list of palette entries
#[derive(Clone, Debug)]
pub struct Palette {
    entries:  Vec<PaletteEntry>,
    capacity: usize
}

impl Palette {
    /// Create an empty palette that can hold up to `capacity` entries
    pub fn with_capacity(capacity: usize) -> Palette {
        Palette {
            entries: Vec::new(),
            capacity
        }
    }

    /// Create a palette from 8 bit RGB triples, all fully opaque
    pub fn from_rgb(colors: &[[u8; 3]]) -> Palette {
        let entries = colors
            .iter()
            .map(|[r, g, b]| PaletteEntry::from_u8(*r, *g, *b, 255))
            .collect::<Vec<_>>();

        Palette {
            capacity: entries.len(),
            entries
        }
    }

    /// Number of entries currently defined
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Set one entry from 8 bit components, growing the palette with black
    /// entries if `index` is past the current end.
    ///
    /// # Errors
    /// `PaletteOverflow` if `index` is not below the capacity
    pub fn set_entry(
        &mut self, index: usize, red: u8, green: u8, blue: u8, opacity: u8
    ) -> Result<(), RasterDecodeErrors> {
        if index >= self.capacity {
            return Err(RasterDecodeErrors::PaletteOverflow(index, 1, self.capacity));
        }
        if index >= self.entries.len() {
            self.resize(index + 1)?;
        }
        self.entries[index] = PaletteEntry::from_u8(red, green, blue, opacity);
        Ok(())
    }

    /// Grow the palette to `len` entries, new entries are black.
    ///
    /// The palette never shrinks here and `len` may not exceed the capacity
    pub fn resize(&mut self, len: usize) -> Result<(), RasterDecodeErrors> {
        if len > self.capacity {
            return Err(RasterDecodeErrors::PaletteOverflow(0, len, self.capacity));
        }
        if len > self.entries.len() {
            self.entries
                .try_reserve(len - self.entries.len())
                .map_err(|_| RasterDecodeErrors::AllocationFailure(len * 8))?;
            self.entries.resize(len, PaletteEntry::black());
        }
        Ok(())
    }

    /// Load `count` entries starting at `start` from `data`, each entry
    /// taking `stride` bytes laid out as red, green, blue and an optional
    /// opacity byte.
    ///
    /// The range is validated before anything is written, so an overflowing
    /// load leaves the palette untouched.
    ///
    /// # Errors
    /// `PaletteOverflow` if `start + count` exceeds the capacity or
    /// `data` holds fewer than `count` entries
    pub fn load(
        &mut self, start: usize, count: usize, data: &[u8], stride: usize
    ) -> Result<(), RasterDecodeErrors> {
        if stride < 3 {
            return Err(RasterDecodeErrors::GenericStatic(
                "Palette entries need at least three bytes"
            ));
        }
        let end = start
            .checked_add(count)
            .ok_or(RasterDecodeErrors::PaletteOverflow(start, count, self.capacity))?;

        if end > self.capacity {
            return Err(RasterDecodeErrors::PaletteOverflow(start, count, self.capacity));
        }
        let available = data.len() / stride;
        if count > available {
            return Err(RasterDecodeErrors::PaletteOverflow(start, count, available));
        }
        self.resize(end)?;

        for (entry, chunk) in self.entries[start..end]
            .iter_mut()
            .zip(data.chunks_exact(stride))
        {
            let opacity = if stride > 3 { chunk[3] } else { 255 };
            *entry = PaletteEntry::from_u8(chunk[0], chunk[1], chunk[2], opacity);
        }
        Ok(())
    }

    /// Look an index up, clamping it to the last entry when out of range.
    ///
    /// Returns the entry and whether clamping happened. The palette must
    /// not be empty
    #[inline(always)]
    pub(crate) fn lookup_clamped(&self, index: usize) -> (&PaletteEntry, bool) {
        match self.entries.get(index) {
            Some(entry) => (entry, false),
            None => (&self.entries[self.entries.len() - 1], true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::QUANTUM_MAX;

    #[test]
    fn overflowing_load_fails_untouched() {
        let mut palette = Palette::with_capacity(256);
        let data = [0_u8; 20 * 3];

        let err = palette.load(250, 20, &data, 3).unwrap_err();
        assert!(matches!(err, RasterDecodeErrors::PaletteOverflow(250, 20, 256)));
        assert!(palette.is_empty());
    }

    #[test]
    fn load_rejects_short_records() {
        let mut palette = Palette::with_capacity(256);
        // room for two entries, three requested
        let data = [0_u8; 8];
        assert!(matches!(
            palette.load(0, 3, &data, 4),
            Err(RasterDecodeErrors::PaletteOverflow(0, 3, 2))
        ));
    }

    #[test]
    fn load_prescales_and_grows() {
        let mut palette = Palette::with_capacity(16);
        palette.load(2, 1, &[255, 0, 128, 7], 4).unwrap();

        assert_eq!(palette.entry_count(), 3);
        assert!(palette.get(0).unwrap().is_black());

        let entry = palette.get(2).unwrap();
        assert_eq!(entry.red, QUANTUM_MAX);
        assert_eq!(entry.green, 0);
        assert_eq!(entry.blue, 128 * 257);
        assert_eq!(entry.opacity, 7 * 257);
    }

    #[test]
    fn set_entry_bounds() {
        let mut palette = Palette::with_capacity(4);
        palette.set_entry(3, 1, 2, 3, 255).unwrap();
        assert_eq!(palette.entry_count(), 4);
        assert!(palette.set_entry(4, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn clamped_lookup_reports() {
        let palette = Palette::from_rgb(&[[0, 0, 0], [255, 255, 255]]);
        assert!(!palette.lookup_clamped(1).1);

        let (entry, clamped) = palette.lookup_clamped(9);
        assert!(clamped);
        assert_eq!(entry.red, QUANTUM_MAX);
    }
}
