/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A streaming raster decoding core
//!
//! This crate holds the parts legacy raster coders share once the container
//! has been parsed, it pulls a packed or run length compressed byte stream,
//! rebuilds scanlines and hands them, rescaled to a uniform `u16` quantum,
//! to a row sink.
//!
//! The flow for one frame is
//!
//! ```text
//! ZReader -> rle token parser -> ScanlineAssembler -> PixelUnpacker -> RowSink
//! ```
//!
//! # Supported compressions
//! - Uncompressed, packed rows
//! - WordPerfect Graphics generation 1 run length encoding
//! - WordPerfect Graphics generation 2 run length encoding with XOR delta rows
//!
//! # Supported depths
//! - 1 bit bilevel (grayscale), any palette is ignored
//! - 2, 4 and 8 bit palette indices
//! - 8 and 16 bit grayscale
//! - 24 bit direct RGB
//! - one to four interleaved components of 1 to 16 bits each, each with
//!   its own precision, two and four component pixels carry alpha
//!
//! # Recovery
//!
//! A stream that ends early is not fatal, the missing rows are zero filled
//! and [`DecodeResult::Partial`] is returned. Frame aborts (a row repeat
//! in the middle of a row, a malformed token) also zero fill before the error
//! is returned so the committed rows stay usable.
//!
//! Decoding can be cancelled between rows through [`enough::Stop`].
#![no_std]
#![macro_use]
extern crate alloc;

pub use enough::{Stop, StopReason, Unstoppable};

pub use crate::errors::RasterDecodeErrors;
pub use crate::palette::{Palette, PaletteEntry};
pub use crate::quantum::{QuantumLut, QUANTUM_MAX};
pub use crate::scanline::{ScanlineAssembler, ScanlineConsumer};
pub use crate::sink::{PixelBuffer, RowSink};
pub use crate::stream::{Compression, DecodeResult, RasterStream};
pub use crate::unpack::{
    components_colorspace, output_colorspace, ColorModel, Component, PixelUnpacker
};

mod errors;
pub mod init;
mod palette;
mod quantum;
mod rle;
mod scanline;
mod sink;
mod stream;
mod unpack;
