/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use enough::StopReason;
use zune_core::bytestream::ZByteIoError;

/// Errors that can occur while decoding a raster frame
#[non_exhaustive]
pub enum RasterDecodeErrors {
    /// The bits per pixel value cannot be unpacked
    /// for the requested colour model
    UnsupportedDepth(u16),
    /// A palette load would write past the palette capacity
    /// or read past the record holding it.
    ///
    /// Holds (start, count, limit)
    PaletteOverflow(usize, usize, usize),
    /// The source ended before the declared row count was reached.
    ///
    /// This is recoverable, the decoder zero fills and reports a partial frame
    StreamTruncated,
    /// A previous row repeat was requested with the row cursor
    /// away from column zero.
    ///
    /// Holds (row, column)
    MidRowRepeatViolation(usize, usize),
    /// The declared row count was reached while a run was still emitting.
    ///
    /// This is a benign stop used inside the decoder, `decode_frame`
    /// never returns it as an error
    RowIndexExhausted,
    /// Row buffers or output could not be allocated, holds the requested size
    AllocationFailure(usize),
    /// Generation 2 sample size was outside `1..=8`
    InvalidSampleSize(u8),
    /// The frame uses palette indices but no palette was provided,
    /// holds the bit depth of the frame
    MissingPalette(u16),
    /// Interleaved pixels need one to four components, holds the count found
    UnsupportedComponents(usize),
    /// Row sink and frame disagree on geometry,
    /// holds (what, expected, found)
    DimensionMismatch(&'static str, usize, usize),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// Width or height was zero
    ZeroDimensions(usize, usize),
    /// The row sink was asked for a row outside the image
    ///
    /// Holds (row, rows)
    RowOutOfBounds(usize, usize),
    /// The caller asked us to stop
    Cancelled(StopReason),
    /// Generic message
    GenericStatic(&'static str),
    IoErrors(ZByteIoError)
}

impl RasterDecodeErrors {
    /// Whether this error aborts a frame after its rows were zero filled,
    /// as opposed to errors raised before anything was written or
    /// errors that leave the output untouched
    pub const fn is_frame_abort(&self) -> bool {
        matches!(
            self,
            Self::MidRowRepeatViolation(..) | Self::InvalidSampleSize(_)
        )
    }
}

impl Debug for RasterDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedDepth(depth) => {
                writeln!(f, "Unsupported bits per pixel {depth}")
            }
            Self::PaletteOverflow(start, count, limit) => {
                writeln!(
                    f,
                    "Palette overflow, start index {start} with {count} entries exceeds {limit}"
                )
            }
            Self::StreamTruncated => {
                writeln!(f, "Stream ended before all rows were decoded")
            }
            Self::MidRowRepeatViolation(row, column) => {
                writeln!(
                    f,
                    "Row repeat requested at row {row} with cursor at byte {column}, expected 0"
                )
            }
            Self::RowIndexExhausted => {
                writeln!(f, "All rows decoded")
            }
            Self::AllocationFailure(size) => {
                writeln!(f, "Could not allocate {size} bytes")
            }
            Self::InvalidSampleSize(size) => {
                writeln!(f, "Invalid sample size {size}, expected a value between 1 and 8")
            }
            Self::MissingPalette(depth) => {
                writeln!(f, "A palette is required for depth {depth} but none was found")
            }
            Self::UnsupportedComponents(count) => {
                writeln!(f, "Unsupported component count {count}, expected 1 to 4")
            }
            Self::DimensionMismatch(what, expected, found) => {
                writeln!(f, "Mismatched {what}, expected {expected} but found {found}")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::ZeroDimensions(width, height) => {
                writeln!(f, "Zero sized dimensions, width {width} height {height}")
            }
            Self::RowOutOfBounds(row, rows) => {
                writeln!(f, "Row {row} is out of bounds for an image with {rows} rows")
            }
            Self::Cancelled(reason) => {
                writeln!(f, "Decoding stopped: {reason:?}")
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<ZByteIoError> for RasterDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        RasterDecodeErrors::IoErrors(value)
    }
}

impl From<StopReason> for RasterDecodeErrors {
    fn from(value: StopReason) -> Self {
        RasterDecodeErrors::Cancelled(value)
    }
}
