/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Row sinks, where unpacked rows end up
use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;

use crate::errors::RasterDecodeErrors;

/// Receives unpacked rows of quantum samples.
///
/// For each row the decoder calls [`begin_row`](RowSink::begin_row), writes
/// exactly `width * components` samples into the returned slice and then
/// calls [`commit_row`](RowSink::commit_row) for the same row. Rows arrive
/// top to bottom, a row is never begun twice.
pub trait RowSink {
    /// Width and height of the sink
    fn dimensions(&self) -> (usize, usize);

    /// Colour layout rows are expected in
    fn colorspace(&self) -> ColorSpace;

    /// Get a writable row, failing if `row` is out of bounds
    fn begin_row(&mut self, row: usize) -> Result<&mut [u16], RasterDecodeErrors>;

    /// Mark a row begun by `begin_row` as complete
    fn commit_row(&mut self, row: usize) -> Result<(), RasterDecodeErrors>;
}

/// An in memory image of `u16` quantum samples, interleaved
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width:          usize,
    height:         usize,
    colorspace:     ColorSpace,
    pixels:         Vec<u16>,
    rows_committed: usize
}

impl PixelBuffer {
    /// Allocate a zeroed buffer for `width x height` pixels in `colorspace`
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<PixelBuffer, RasterDecodeErrors> {
        let size = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(colorspace.num_components()))
            .ok_or(RasterDecodeErrors::TooLargeDimensions(
                "pixel buffer",
                usize::MAX,
                width
            ))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(size)
            .map_err(|_| RasterDecodeErrors::AllocationFailure(size * 2))?;
        pixels.resize(size, 0);

        Ok(PixelBuffer {
            width,
            height,
            colorspace,
            pixels,
            rows_committed: 0
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of rows committed so far
    pub const fn rows_committed(&self) -> usize {
        self.rows_committed
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u16> {
        self.pixels
    }

    /// Get the samples of one row
    pub fn row(&self, row: usize) -> Option<&[u16]> {
        let stride = self.stride();
        self.pixels.get(row * stride..(row + 1) * stride)
    }

    /// Scale every sample down to eight bits
    pub fn to_u8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .map(|x| ((u32::from(*x) * 255 + 32767) / 65535) as u8)
            .collect()
    }

    fn stride(&self) -> usize {
        self.width * self.colorspace.num_components()
    }
}

impl RowSink for PixelBuffer {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    fn begin_row(&mut self, row: usize) -> Result<&mut [u16], RasterDecodeErrors> {
        if row >= self.height {
            return Err(RasterDecodeErrors::RowOutOfBounds(row, self.height));
        }
        let stride = self.stride();
        Ok(&mut self.pixels[row * stride..(row + 1) * stride])
    }

    fn commit_row(&mut self, row: usize) -> Result<(), RasterDecodeErrors> {
        if row >= self.height {
            return Err(RasterDecodeErrors::RowOutOfBounds(row, self.height));
        }
        self.rows_committed = self.rows_committed.max(row + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use zune_core::colorspace::ColorSpace;

    use super::*;

    #[test]
    fn rows_out_of_bounds_fail() {
        let mut buffer = PixelBuffer::new(2, 2, ColorSpace::RGB).unwrap();
        assert_eq!(buffer.begin_row(1).unwrap().len(), 6);
        assert!(matches!(
            buffer.begin_row(2),
            Err(RasterDecodeErrors::RowOutOfBounds(2, 2))
        ));
    }

    #[test]
    fn commit_tracks_rows() {
        let mut buffer = PixelBuffer::new(1, 3, ColorSpace::Luma).unwrap();
        buffer.begin_row(0).unwrap()[0] = u16::MAX;
        buffer.commit_row(0).unwrap();

        assert_eq!(buffer.rows_committed(), 1);
        assert_eq!(buffer.row(0).unwrap(), &[u16::MAX]);
        assert_eq!(buffer.to_u8(), [255, 0, 0]);
    }

    #[test]
    fn to_u8_inverts_palette_scaling() {
        let mut buffer = PixelBuffer::new(256, 1, ColorSpace::Luma).unwrap();
        for (i, sample) in buffer.begin_row(0).unwrap().iter_mut().enumerate() {
            *sample = i as u16 * 257;
        }
        let bytes = buffer.to_u8();
        assert!(bytes.iter().enumerate().all(|(i, v)| usize::from(*v) == i));
    }
}
