/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;
use zune_raster::{Compression, Palette, PixelBuffer, RasterDecodeErrors};

/// Container generation of a WPG file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WpgLevel {
    /// WordPerfect 5.x graphics
    Level1,
    /// WordPerfect 6 and later graphics
    Level2
}

/// The 16 byte file header
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WpgHeader {
    pub file_id:       u32,
    /// Offset of the first record
    pub data_offset:   u32,
    pub product_type:  u16,
    pub file_type:     u16,
    pub major_version: u8,
    pub minor_version: u8,
    /// Non zero for encrypted files
    pub encrypt_key:   u16
}

impl WpgHeader {
    /// The container level, `None` for unknown file types
    pub const fn level(&self) -> Option<WpgLevel> {
        match self.file_type {
            1 => Some(WpgLevel::Level1),
            2 => Some(WpgLevel::Level2),
            _ => None
        }
    }
}

/// Page placement of a level 1 type 2 bitmap, in centimetres
///
/// The x and y offsets are both derived from the lower left x coordinate,
/// which is how WordPerfect readers have always interpreted this record.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PageGeometry {
    pub width:  u32,
    pub height: u32,
    pub x:      i32,
    pub y:      i32
}

/// Orientation changes the file asks for.
///
/// These are never applied to the pixels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct OrientationHints {
    /// Mirror horizontally
    pub flop:     bool,
    /// Mirror vertically
    pub flip:     bool,
    /// Rotation in degrees
    pub rotation: u16
}

/// Level 2 object transform, as read from a bitmap rectangle record
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wpg2Transform {
    pub flags: u16,
    /// Rotation angle in degrees
    pub angle: f32,
    /// Current transform matrix, row major
    pub ctm:   [[f32; 3]; 3]
}

impl Default for Wpg2Transform {
    fn default() -> Self {
        Wpg2Transform {
            flags: 0,
            angle: 0.0,
            ctm:   [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        }
    }
}

impl Wpg2Transform {
    /// Orientation implied by negative scale factors
    pub fn orientation(&self) -> OrientationHints {
        OrientationHints {
            flop:     self.ctm[0][0] < 0.0,
            flip:     self.ctm[1][1] < 0.0,
            rotation: 0
        }
    }
}

/// An embedded sub format (PostScript and friends) that was skipped
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EmbeddedBlob {
    /// Record type that carried the blob
    pub record: u8,
    /// Absolute offset of the payload
    pub offset: u64,
    pub length: u64
}

/// How much of a frame came from the file
#[derive(Debug)]
pub enum FrameStatus {
    Complete,
    /// The raster ended early, rows after `rows_decoded` are zero
    Partial { rows_decoded: usize },
    /// The raster was malformed, rows after the failure are zero
    Aborted(RasterDecodeErrors)
}

/// Everything known about a bitmap record before its raster is read
#[derive(Clone, Debug)]
pub(crate) struct RasterRecord {
    pub record:      u8,
    pub width:       usize,
    pub height:      usize,
    pub depth:       u16,
    pub compression: Compression,
    pub resolution:  Option<(f64, f64)>,
    pub page:        Option<PageGeometry>,
    pub orientation: OrientationHints
}

/// One decoded bitmap
pub struct WpgFrame {
    pub(crate) record:      u8,
    pub(crate) depth:       u16,
    pub(crate) pixels:      PixelBuffer,
    pub(crate) palette:     Option<Palette>,
    pub(crate) resolution:  Option<(f64, f64)>,
    pub(crate) page:        Option<PageGeometry>,
    pub(crate) orientation: OrientationHints,
    pub(crate) status:      FrameStatus
}

impl WpgFrame {
    pub const fn width(&self) -> usize {
        self.pixels.width()
    }

    pub const fn height(&self) -> usize {
        self.pixels.height()
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.pixels.width(), self.pixels.height())
    }

    /// Bits per pixel of the raster in the file
    pub const fn bits_per_pixel(&self) -> u16 {
        self.depth
    }

    /// Record type the frame came from
    pub const fn record_type(&self) -> u8 {
        self.record
    }

    pub fn colorspace(&self) -> ColorSpace {
        zune_raster::RowSink::colorspace(&self.pixels)
    }

    /// Interleaved `u16` quantum samples
    pub fn pixels(&self) -> &[u16] {
        self.pixels.pixels()
    }

    pub fn pixel_buffer(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Samples scaled down to eight bits
    pub fn to_u8(&self) -> Vec<u8> {
        self.pixels.to_u8()
    }

    /// The colormap the frame was decoded with
    ///
    /// Bilevel frames carry one too even though their pixels are gray
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Horizontal and vertical resolution in pixels per centimetre
    pub const fn resolution(&self) -> Option<(f64, f64)> {
        self.resolution
    }

    pub const fn page(&self) -> Option<PageGeometry> {
        self.page
    }

    pub const fn orientation(&self) -> OrientationHints {
        self.orientation
    }

    pub const fn status(&self) -> &FrameStatus {
        &self.status
    }

    pub const fn is_complete(&self) -> bool {
        matches!(self.status, FrameStatus::Complete)
    }
}
