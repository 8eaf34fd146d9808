/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! One frame decode session
use alloc::vec::Vec;

use enough::Stop;
use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::colorspace::ColorSpace;
use zune_core::log::{error, trace, warn};

use crate::errors::RasterDecodeErrors;
use crate::init::ensure_initialized;
use crate::palette::Palette;
use crate::rle::{decode_rle, RleGeneration};
use crate::scanline::{ScanlineAssembler, ScanlineConsumer};
use crate::sink::RowSink;
use crate::unpack::{
    components_colorspace, output_colorspace, ColorModel, Component, PixelUnpacker
};

/// How the rows of a frame are stored in the source
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Compression {
    /// Packed rows, one after another
    None,
    /// WordPerfect generation 1 run length encoding
    Wpg1Rle,
    /// WordPerfect generation 2 run length encoding with XOR delta rows
    Wpg2Rle
}

/// Outcome of a frame decode that produced a full image
#[derive(Debug)]
pub enum DecodeResult {
    /// Every row came from the source
    Complete,
    /// Only `rows_decoded` rows came from the source, the rest are zero
    Partial {
        rows_decoded: usize,
        reason:       RasterDecodeErrors
    }
}

impl DecodeResult {
    pub const fn is_complete(&self) -> bool {
        matches!(self, DecodeResult::Complete)
    }
}

/// A decode session for a single frame
///
/// # Example
///
/// ```
/// use zune_core::bytestream::{ZCursor, ZReader};
/// use zune_raster::{ColorModel, Compression, PixelBuffer, RasterStream, Unstoppable};
///
/// // one 8 pixel bilevel row, a literal run of one byte
/// let mut reader = ZReader::new(ZCursor::new([0x01_u8, 0b1000_0001]));
/// let mut stream = RasterStream::new(8, 1, 1, ColorModel::Gray)
///     .set_compression(Compression::Wpg1Rle);
/// let mut pixels = PixelBuffer::new(8, 1, stream.colorspace().unwrap()).unwrap();
///
/// let result = stream.decode_frame(&mut reader, &mut pixels, &Unstoppable).unwrap();
/// assert!(result.is_complete());
/// assert_eq!(pixels.to_u8(), [255, 0, 0, 0, 0, 0, 0, 255]);
/// ```
pub struct RasterStream<'p> {
    columns:       usize,
    rows:          usize,
    depth:         u16,
    signed:        bool,
    model:         ColorModel,
    compression:   Compression,
    delta_capable: bool,
    palette:       Option<&'p Palette>,
    components:    Option<Vec<Component>>,
    clamped:       usize
}

impl<'p> RasterStream<'p> {
    /// Create a session for `columns x rows` pixels of `depth` bits,
    /// uncompressed until [`set_compression`](Self::set_compression) says otherwise
    pub fn new(columns: usize, rows: usize, depth: u16, model: ColorModel) -> RasterStream<'p> {
        RasterStream {
            columns,
            rows,
            depth,
            signed: false,
            model,
            compression: Compression::None,
            delta_capable: false,
            palette: None,
            components: None,
            clamped: 0
        }
    }

    /// Set the compression, generation 2 streams are delta capable
    #[must_use]
    pub fn set_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self.delta_capable = compression == Compression::Wpg2Rle;
        self
    }

    /// Override whether rows keep a second buffer for XOR deltas
    #[must_use]
    pub fn set_delta_capable(mut self, yes: bool) -> Self {
        self.delta_capable = yes;
        self
    }

    #[must_use]
    pub fn set_palette(mut self, palette: &'p Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Rows hold interleaved `components` with their own precision,
    /// replacing the depth and colour model given to [`new`](Self::new)
    #[must_use]
    pub fn set_components(mut self, components: &[Component]) -> Self {
        self.components = Some(components.to_vec());
        self
    }

    /// Treat every gray and direct sample as signed
    #[must_use]
    pub fn set_signed(mut self, yes: bool) -> Self {
        self.signed = yes;
        self
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub const fn depth(&self) -> u16 {
        self.depth
    }

    /// Colour space a sink must have to receive this frame
    pub fn colorspace(&self) -> Result<ColorSpace, RasterDecodeErrors> {
        match &self.components {
            Some(components) => components_colorspace(components),
            None => output_colorspace(self.depth, self.model)
        }
    }

    /// Bits one pixel takes in a packed row
    fn bits_per_pixel(&self) -> usize {
        match &self.components {
            Some(components) => components.iter().map(|c| c.stored_bytes() * 8).sum(),
            None => usize::from(self.depth)
        }
    }

    /// Bytes in one packed row, `ceil(bits per pixel * columns / 8)`
    pub fn row_byte_width(&self) -> Result<usize, RasterDecodeErrors> {
        self.bits_per_pixel()
            .checked_mul(self.columns)
            .and_then(|bits| bits.checked_add(7))
            .map(|bits| bits / 8)
            .ok_or(RasterDecodeErrors::TooLargeDimensions(
                "width",
                usize::MAX / 24,
                self.columns
            ))
    }

    /// Out of range palette indices clamped during the last decode
    pub const fn clamped_indices(&self) -> usize {
        self.clamped
    }

    /// Decode one frame from `reader` into `sink`.
    ///
    /// - A source that ends early is zero filled, the result is
    ///   [`DecodeResult::Partial`].
    /// - Setup errors (depth, palette, geometry, allocation) are returned
    ///   before anything is written.
    /// - Frame aborts (row repeat mid row, invalid sample size) zero fill the
    ///   remaining rows and then return the error.
    /// - A stop request returns `Cancelled`, rows already committed stay valid
    ///   and nothing is filled.
    pub fn decode_frame<T, S>(
        &mut self, reader: &mut ZReader<T>, sink: &mut S, stop: &dyn Stop
    ) -> Result<DecodeResult, RasterDecodeErrors>
    where
        T: ZByteReaderTrait,
        S: RowSink + ?Sized
    {
        ensure_initialized();
        self.clamped = 0;

        if self.columns == 0 || self.rows == 0 {
            return Err(RasterDecodeErrors::ZeroDimensions(self.columns, self.rows));
        }
        let (_, sink_rows) = sink.dimensions();
        if sink_rows != self.rows {
            return Err(RasterDecodeErrors::DimensionMismatch(
                "height", self.rows, sink_rows
            ));
        }
        let row_bytes = self.row_byte_width()?;

        let mut unpacker = match &self.components {
            Some(components) => PixelUnpacker::with_components(self.columns, components, sink)?,
            None => PixelUnpacker::new(self.columns, self.depth, self.model, self.palette, sink)?
        };
        if self.signed {
            unpacker.set_signed(true);
        }

        let mut asm = ScanlineAssembler::new(row_bytes, self.rows, self.delta_capable)?;

        trace!(
            "Decoding {}x{} frame, {} bits per pixel, {:?}",
            self.columns,
            self.rows,
            self.bits_per_pixel(),
            self.compression
        );
        stop.check()?;

        let status = match self.compression {
            Compression::None => decode_packed(reader, &mut asm, &mut unpacker, stop),
            Compression::Wpg1Rle => {
                decode_rle(RleGeneration::First, reader, &mut asm, &mut unpacker, stop)
            }
            Compression::Wpg2Rle => {
                decode_rle(RleGeneration::Second, reader, &mut asm, &mut unpacker, stop)
            }
        };
        let result = recover(status, &mut asm, &mut unpacker);

        self.clamped = unpacker.clamped_indices();
        if self.clamped > 0 {
            warn!("{} palette indices were out of range and clamped", self.clamped);
        }
        result
    }
}

/// Turn the status of the decode loop into the frame outcome,
/// zero filling whatever the source did not provide
fn recover(
    status: Result<(), RasterDecodeErrors>, asm: &mut ScanlineAssembler,
    out: &mut dyn ScanlineConsumer
) -> Result<DecodeResult, RasterDecodeErrors> {
    match status {
        Ok(()) | Err(RasterDecodeErrors::RowIndexExhausted) => Ok(DecodeResult::Complete),
        Err(RasterDecodeErrors::StreamTruncated) => {
            let rows_decoded = asm.row_index();
            warn!(
                "Stream ended after {} of {} rows, filling the rest",
                rows_decoded,
                asm.rows()
            );
            asm.fill_remaining(out)?;
            Ok(DecodeResult::Partial {
                rows_decoded,
                reason: RasterDecodeErrors::StreamTruncated
            })
        }
        Err(err) if err.is_frame_abort() => {
            error!("Frame aborted at row {}: {:?}", asm.row_index(), err);
            asm.fill_remaining(out)?;
            Err(err)
        }
        Err(err) => Err(err)
    }
}

/// Uncompressed rows, read a row at a time
fn decode_packed<T: ZByteReaderTrait>(
    reader: &mut ZReader<T>, asm: &mut ScanlineAssembler, out: &mut dyn ScanlineConsumer,
    stop: &dyn Stop
) -> Result<(), RasterDecodeErrors> {
    let mut row = Vec::new();
    row.try_reserve_exact(asm.row_bytes())
        .map_err(|_| RasterDecodeErrors::AllocationFailure(asm.row_bytes()))?;
    row.resize(asm.row_bytes(), 0);

    while !asm.is_complete() {
        let mut filled = 0;
        while filled < row.len() {
            let read = reader.read_bytes(&mut row[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }
        asm.append_bytes(&row[..filled], out)?;

        if filled < row.len() {
            return Err(RasterDecodeErrors::StreamTruncated);
        }
        stop.check()?;
    }
    Ok(())
}
