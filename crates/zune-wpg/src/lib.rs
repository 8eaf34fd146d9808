/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A WordPerfect Graphics decoder
//!
//! This crate reads the raster content of WPG files, both level 1
//! (WordPerfect 5.x) and level 2 (WordPerfect 6+) containers.
//!
//! # Features
//! - `no_std` by default with `alloc` feature
//! - Every bitmap record becomes a [`WpgFrame`] with `u16` quantum samples
//! - Truncated rasters are zero filled and reported instead of rejected,
//!   unless strict mode is set in [`DecoderOptions`](zune_core::options::DecoderOptions)
//!
//! # Supported rasters
//! - Level 1 bitmap records (types 1 and 2), generation 1 run length encoding
//! - Level 2 bitmap records, uncompressed or generation 2 run length encoding
//! - 1 bit bilevel, 2, 4 and 8 bit paletted and 24 bit RGB rasters
//!
//! # Unsupported
//! - Vector drawing records
//! - Embedded PostScript and other delegate formats, their location is
//!   reported through [`WpgDecoder::embedded_blobs`]
//! - Applying rotation or flips, those are only reported as hints on the frame
#![no_std]
#![macro_use]
extern crate alloc;

pub use zune_raster::{Stop, Unstoppable};

pub use crate::common::{
    EmbeddedBlob, FrameStatus, OrientationHints, PageGeometry, Wpg2Transform, WpgFrame,
    WpgHeader, WpgLevel
};
pub use crate::decoder::{probe_wpg, WpgDecoder};
pub use crate::errors::WpgDecodeErrors;
pub use crate::utils::read_wp_dword;

mod colormap;
mod common;
mod constants;
mod decoder;
mod errors;
mod utils;
