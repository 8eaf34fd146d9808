/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use zune_core::bytestream::ZByteIoError;
use zune_raster::RasterDecodeErrors;

/// WPG errors that can occur during decoding
#[non_exhaustive]
pub enum WpgDecodeErrors {
    /// The file does not start with `\xFFWPC`
    InvalidMagicBytes,
    /// The product type is not a WordPerfect one, holds the value found
    UnsupportedProduct(u16),
    /// The file header says the file is encrypted
    EncryptedImage(u16),
    /// Neither a level 1 nor a level 2 file, holds the file type
    UnsupportedFileType(u16),
    /// A header or record is malformed
    ImproperHeader(&'static str),
    /// Too large dimensions for a given width or
    /// height
    TooLargeDimensions(&'static str, usize, usize),
    /// The file contains no decodable raster
    NoImageData,
    /// Generic message
    GenericStatic(&'static str),
    /// A raster could not be decoded
    RasterErrors(RasterDecodeErrors),
    IoErrors(ZByteIoError)
}

impl Debug for WpgDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => {
                writeln!(f, "Invalid magic bytes, file does not start with \\xFFWPC")
            }
            Self::UnsupportedProduct(product) => {
                writeln!(f, "Unsupported product type {product:#06X}, expected 0x16XX")
            }
            Self::EncryptedImage(key) => {
                writeln!(f, "Encrypted WPG files are not supported, key {key:#06X}")
            }
            Self::UnsupportedFileType(file_type) => {
                writeln!(f, "Unsupported WPG file type {file_type}, expected 1 or 2")
            }
            Self::ImproperHeader(reason) => {
                writeln!(f, "Improper image header: {reason}")
            }
            Self::TooLargeDimensions(dimension, expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions for {dimension} , {found} exceeds {expected}"
                )
            }
            Self::NoImageData => {
                writeln!(f, "No raster data found in file")
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{}", message)
            }
            Self::RasterErrors(err) => {
                writeln!(f, "{:?}", err)
            }
            Self::IoErrors(err) => {
                writeln!(f, "{:?}", err)
            }
        }
    }
}

impl From<ZByteIoError> for WpgDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        WpgDecodeErrors::IoErrors(value)
    }
}

impl From<RasterDecodeErrors> for WpgDecodeErrors {
    fn from(value: RasterDecodeErrors) -> Self {
        WpgDecodeErrors::RasterErrors(value)
    }
}
