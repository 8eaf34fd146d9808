/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// WordPerfect Graphics (WPG)
//
// A WPG file is a 16 byte header followed by a flat list of records.
//
// LEVEL 1 (WordPerfect 5.x)
// - A record is a type byte and a variable length size (see `read_wp_dword`).
// - Most records are vector drawing commands, we only care about palettes,
//   bitmaps (types 1 and 2) and embedded PostScript.
// - Bitmap rasters use generation 1 run length encoding.
//
// LEVEL 2 (WordPerfect 6+)
// - A record is a class byte, a type byte, then an extension size and a
//   record size, both variable length.
// - Palette entries gained an opacity byte and bitmaps gained an explicit
//   compression byte, 0 for packed rows and 1 for generation 2 run length
//   encoding with XOR delta rows.
// - The transform of the next bitmap comes in a separate bitmap rectangle
//   record, a negative scale there means the bitmap is mirrored.
//
// Both levels may carry several bitmaps, each becomes its own frame.
use alloc::vec;
use alloc::vec::Vec;

use zune_core::bit_depth::BitDepth;
use zune_core::bytestream::{ZByteReaderTrait, ZReader, ZSeekFrom};
use zune_core::colorspace::ColorSpace;
use zune_core::log::{error, trace, warn};
use zune_core::options::DecoderOptions;
use zune_raster::{
    output_colorspace, ColorModel, Compression, DecodeResult, Palette, PixelBuffer,
    RasterDecodeErrors, RasterStream, Stop, Unstoppable
};

use crate::colormap::{frame_palette, LEVEL1_PALETTE_CAPACITY, LEVEL2_PALETTE_CAPACITY};
use crate::common::{
    EmbeddedBlob, FrameStatus, OrientationHints, PageGeometry, RasterRecord, Wpg2Transform,
    WpgFrame, WpgHeader, WpgLevel
};
use crate::constants::*;
use crate::errors::WpgDecodeErrors;
use crate::utils::read_wp_dword;

/// Probe some bytes to see
/// if they consist of a WPG image
pub fn probe_wpg(bytes: &[u8]) -> bool {
    bytes.starts_with(&WPG_MAGIC.to_le_bytes())
}

/// Bits of the level 2 `WPG2Flags` structure that are followed by data
fn flag_set(flags: u16, mask: u16) -> bool {
    flags & mask != 0
}

/// Level 2 depth codes, `None` for codes we cannot decode
const fn level2_depth(code: u8) -> Option<u16> {
    match code {
        1 => Some(1),
        2 => Some(2),
        3 => Some(4),
        4 => Some(8),
        8 => Some(24),
        _ => None
    }
}

const fn color_model(depth: u16) -> ColorModel {
    match depth {
        24 => ColorModel::Direct,
        16 => ColorModel::Gray,
        _ => ColorModel::Indexed
    }
}

/// Record state that carries over to the next bitmap
struct ParseState {
    level:         WpgLevel,
    /// Palette loaded since the last bitmap
    palette:       Palette,
    /// A palette record that could not be loaded fails the next bitmap
    palette_error: Option<RasterDecodeErrors>,
    transform:     Wpg2Transform,
    /// Level 2 position precision, non zero means 32 bit object ids
    precision:     u8
}

impl ParseState {
    fn new(level: WpgLevel) -> ParseState {
        ParseState {
            level,
            palette: Palette::with_capacity(Self::palette_capacity(level)),
            palette_error: None,
            transform: Wpg2Transform::default(),
            precision: 0
        }
    }

    const fn palette_capacity(level: WpgLevel) -> usize {
        match level {
            WpgLevel::Level1 => LEVEL1_PALETTE_CAPACITY,
            WpgLevel::Level2 => LEVEL2_PALETTE_CAPACITY
        }
    }

    /// Hand the loaded palette to a bitmap, leaving an empty one behind
    fn take_palette(&mut self) -> Result<Palette, RasterDecodeErrors> {
        let fresh = Palette::with_capacity(Self::palette_capacity(self.level));
        let palette = core::mem::replace(&mut self.palette, fresh);

        match self.palette_error.take() {
            Some(err) => Err(err),
            None => Ok(palette)
        }
    }
}

/// A WPG decoder
///
/// # Usage
///
/// ## Extracting image metadata
/// ```no_run
/// use zune_core::bytestream::ZCursor;
/// use zune_wpg::WpgDecoder;
///
/// fn main() -> Result<(), zune_wpg::WpgDecodeErrors> {
///     let source = ZCursor::new(b"\xFFWPC");
///     let mut decoder = WpgDecoder::new(source);
///     decoder.decode_headers()?;
///
///     if let Some((w, h)) = decoder.dimensions() {
///         println!("First bitmap: {w}x{h}");
///     }
///     Ok(())
/// }
/// ```
///
/// ## Getting the frames
/// ```no_run
/// use zune_core::bytestream::ZCursor;
/// use zune_wpg::WpgDecoder;
///
/// fn main() -> Result<(), zune_wpg::WpgDecodeErrors> {
///     let source = ZCursor::new(b"\xFFWPC");
///     let mut decoder = WpgDecoder::new(source);
///
///     for frame in decoder.decode()? {
///         println!("{:?} {:?}", frame.dimensions(), frame.colorspace());
///     }
///     Ok(())
/// }
/// ```
pub struct WpgDecoder<T>
where
    T: ZByteReaderTrait
{
    bytes:           ZReader<T>,
    options:         DecoderOptions,
    header:          Option<WpgHeader>,
    file_size:       u64,
    decoded_headers: bool,
    first_frame:     Option<RasterRecord>,
    embedded:        Vec<EmbeddedBlob>
}

impl<T> WpgDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder that reads from `data`
    pub fn new(data: T) -> WpgDecoder<T> {
        WpgDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The buffer from which we will read data from
    /// * `options`:  Specialized options for this decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> WpgDecoder<T> {
        WpgDecoder {
            bytes: ZReader::new(data),
            options,
            header: None,
            file_size: 0,
            decoded_headers: false,
            first_frame: None,
            embedded: vec![]
        }
    }

    /// Decode the file header and find the first bitmap record
    ///
    /// No raster is decoded, afterwards [`dimensions`](Self::dimensions)
    /// and [`colorspace`](Self::colorspace) describe the first bitmap
    pub fn decode_headers(&mut self) -> Result<(), WpgDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        self.bytes.seek(ZSeekFrom::Start(0))?;

        let file_id = self.bytes.get_u32_le_err()?;
        if file_id != WPG_MAGIC {
            return Err(WpgDecodeErrors::InvalidMagicBytes);
        }
        let header = WpgHeader {
            file_id,
            data_offset: self.bytes.get_u32_le_err()?,
            product_type: self.bytes.get_u16_le_err()?,
            file_type: self.bytes.get_u16_le_err()?,
            major_version: self.bytes.read_u8_err()?,
            minor_version: self.bytes.read_u8_err()?,
            encrypt_key: self.bytes.get_u16_le_err()?
        };

        if header.product_type >> 8 != WORDPERFECT_PRODUCT {
            return Err(WpgDecodeErrors::UnsupportedProduct(header.product_type));
        }
        if header.encrypt_key != 0 {
            return Err(WpgDecodeErrors::EncryptedImage(header.encrypt_key));
        }
        if header.level().is_none() {
            return Err(WpgDecodeErrors::UnsupportedFileType(header.file_type));
        }
        // offsets are 32 bit, anything past 4 GiB is unreachable
        self.file_size = self.bytes.stream_len()?.min(MAX_FILE_SIZE);

        trace!("File type: {}", header.file_type);
        trace!("Version: {}.{}", header.major_version, header.minor_version);
        trace!("Data offset: {}", header.data_offset);
        trace!("File size: {}", self.file_size);

        self.header = Some(header);
        self.walk(true, &Unstoppable)?;
        self.decoded_headers = true;

        Ok(())
    }

    /// The file header or `None` if headers weren't decoded
    pub const fn header(&self) -> Option<WpgHeader> {
        self.header
    }

    /// Dimensions of the first bitmap in the file
    ///
    /// # Returns
    /// - `Some((width,height))`: dimensions of the first bitmap
    /// - `None`: headers weren't decoded or the file has no bitmap
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        if !self.decoded_headers {
            return None;
        }
        self.first_frame.as_ref().map(|record| (record.width, record.height))
    }

    /// Colorspace the first bitmap decodes to
    pub fn colorspace(&self) -> Option<ColorSpace> {
        if !self.decoded_headers {
            return None;
        }
        let record = self.first_frame.as_ref()?;
        output_colorspace(record.depth, color_model(record.depth)).ok()
    }

    /// Depth of the decoded samples
    ///
    /// This is always [BitDepth::Sixteen], every raster is rescaled to
    /// the full `u16` range whatever its depth in the file
    pub const fn depth(&self) -> BitDepth {
        BitDepth::Sixteen
    }

    /// Embedded PostScript and friends that were skipped
    ///
    /// Complete after [`decode`](Self::decode), after
    /// [`decode_headers`](Self::decode_headers) only blobs in front of the
    /// first bitmap are known
    pub fn embedded_blobs(&self) -> &[EmbeddedBlob] {
        &self.embedded
    }

    /// Decode every bitmap in the file
    pub fn decode(&mut self) -> Result<Vec<WpgFrame>, WpgDecodeErrors> {
        self.decode_with_stop(&Unstoppable)
    }

    /// Decode every bitmap in the file, checking `stop` between rows
    ///
    /// A stop request fails with the reason wrapped in
    /// [`RasterDecodeErrors::Cancelled`]
    pub fn decode_with_stop(&mut self, stop: &dyn Stop) -> Result<Vec<WpgFrame>, WpgDecodeErrors> {
        self.decode_headers()?;

        let frames = self.walk(false, stop)?;
        if frames.is_empty() {
            return Err(WpgDecodeErrors::NoImageData);
        }
        Ok(frames)
    }

    /// Walk the records, with `ping` set stop at the first bitmap
    /// without decoding it
    fn walk(&mut self, ping: bool, stop: &dyn Stop) -> Result<Vec<WpgFrame>, WpgDecodeErrors> {
        let header = self
            .header
            .ok_or(WpgDecodeErrors::GenericStatic("Headers not decoded"))?;
        let level = header
            .level()
            .ok_or(WpgDecodeErrors::UnsupportedFileType(header.file_type))?;

        self.embedded.clear();
        self.first_frame = None;

        let mut state = ParseState::new(level);
        let mut frames = vec![];

        match level {
            WpgLevel::Level1 => self.walk_level1(&header, &mut state, ping, &mut frames, stop)?,
            WpgLevel::Level2 => self.walk_level2(&header, &mut state, ping, &mut frames, stop)?
        }
        Ok(frames)
    }

    fn walk_level1(
        &mut self, header: &WpgHeader, state: &mut ParseState, ping: bool,
        frames: &mut Vec<WpgFrame>, stop: &dyn Stop
    ) -> Result<(), WpgDecodeErrors> {
        let start = u64::from(header.data_offset);
        let mut file_pos = start;

        while file_pos < self.file_size {
            self.bytes.seek(ZSeekFrom::Start(file_pos))?;

            let Ok(record) = self.bytes.read_u8_err() else {
                break;
            };
            let (length, _) = read_wp_dword(&mut self.bytes);
            let length = u64::from(length);

            if length > self.file_size {
                return Err(WpgDecodeErrors::ImproperHeader("Record length exceeds file size"));
            }
            if self.bytes.eof()? {
                break;
            }
            let body = self.bytes.position()?;
            file_pos = body + length;

            if file_pos > self.file_size || file_pos < start {
                warn!("Invalid record length for record {record:#04X}");
                break;
            }
            trace!("Parsing record {record:#04X} at {body}");

            match record {
                L1_BITMAP_TYPE_1 => {
                    let raster = self.read_l1_bitmap1()?;
                    if !self.handle_raster(raster, state, ping, frames, stop)? {
                        break;
                    }
                }
                L1_BITMAP_TYPE_2 => {
                    let raster = self.read_l1_bitmap2()?;
                    if !self.handle_raster(raster, state, ping, frames, stop)? {
                        break;
                    }
                }
                L1_COLOR_PALETTE => self.read_palette(state, 3, None)?,
                L1_POSTSCRIPT => self.note_embedded(record, body, length, 8),
                L1_POSTSCRIPT_2 => self.note_embedded(record, body, length, 0x3C),
                _ => {}
            }
        }
        Ok(())
    }

    fn walk_level2(
        &mut self, header: &WpgHeader, state: &mut ParseState, ping: bool,
        frames: &mut Vec<WpgFrame>, stop: &dyn Stop
    ) -> Result<(), WpgDecodeErrors> {
        let mut data_offset = u64::from(header.data_offset);

        while data_offset < self.file_size {
            self.bytes.seek(ZSeekFrom::Start(data_offset))?;

            let Ok(class) = self.bytes.read_u8_err() else {
                break;
            };
            let Ok(record) = self.bytes.read_u8_err() else {
                break;
            };
            let _extension = read_wp_dword(&mut self.bytes);
            let (length, _) = read_wp_dword(&mut self.bytes);

            if self.bytes.eof()? {
                break;
            }
            let body = self.bytes.position()?;
            data_offset = body + u64::from(length);

            trace!("Parsing record {record:#04X}, class {class} at {body}");

            match record {
                L2_START => {
                    let horizontal_units = self.bytes.get_u16_le();
                    let vertical_units = self.bytes.get_u16_le();
                    state.precision = self.bytes.read_u8();
                    trace!(
                        "Units: {horizontal_units}x{vertical_units}, precision {}",
                        state.precision
                    );
                }
                L2_COLOR_PALETTE => self.read_palette(state, 4, Some(length))?,
                L2_BITMAP => {
                    if let Some(raster) = self.read_l2_bitmap(state)? {
                        if !self.handle_raster(raster, state, ping, frames, stop)? {
                            break;
                        }
                    }
                }
                L2_POSTSCRIPT => {
                    let skip = u64::from(self.bytes.get_u16_le());
                    self.note_embedded(record, body + 2, length.saturating_sub(2).into(), skip);
                }
                L2_BITMAP_RECTANGLE => {
                    state.transform = self.load_wpg2_flags(state.precision);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn read_l1_bitmap1(&mut self) -> Result<RasterRecord, WpgDecodeErrors> {
        let width = self.bytes.get_u16_le();
        let height = self.bytes.get_u16_le();

        if width == 0 || height == 0 {
            return Err(WpgDecodeErrors::ImproperHeader("Zero bitmap dimensions"));
        }
        let depth = self.bytes.get_u16_le();
        let horizontal_res = self.bytes.get_u16_le();
        let vertical_res = self.bytes.get_u16_le();

        Ok(RasterRecord {
            record: L1_BITMAP_TYPE_1,
            width: usize::from(width),
            height: usize::from(height),
            depth,
            compression: Compression::Wpg1Rle,
            resolution: resolution(horizontal_res, vertical_res),
            page: None,
            orientation: OrientationHints::default()
        })
    }

    fn read_l1_bitmap2(&mut self) -> Result<RasterRecord, WpgDecodeErrors> {
        let rot_angle = self.bytes.get_u16_le();
        let low_left_x = self.bytes.get_u16_le();
        let _low_left_y = self.bytes.get_u16_le();
        let up_right_x = self.bytes.get_u16_le();
        let up_right_y = self.bytes.get_u16_le();
        let width = self.bytes.get_u16_le();
        let height = self.bytes.get_u16_le();

        if width == 0 || height == 0 {
            return Err(WpgDecodeErrors::ImproperHeader("Zero bitmap dimensions"));
        }
        let depth = self.bytes.get_u16_le();
        let horizontal_res = self.bytes.get_u16_le();
        let vertical_res = self.bytes.get_u16_le();

        let llx = f64::from(low_left_x);
        // every placement field is derived from the lower left x
        // coordinate, readers have always done it this way
        let page = PageGeometry {
            width:  ((llx - f64::from(up_right_x)) / WPU_PER_CM) as u32,
            height: ((llx - f64::from(up_right_y)) / WPU_PER_CM) as u32,
            x:      (llx / WPU_PER_CM) as i32,
            y:      (llx / WPU_PER_CM) as i32
        };
        let orientation = OrientationHints {
            flop:     rot_angle & 0x8000 != 0,
            flip:     rot_angle & 0x2000 != 0,
            rotation: rot_angle & 0x0FFF
        };

        Ok(RasterRecord {
            record: L1_BITMAP_TYPE_2,
            width: usize::from(width),
            height: usize::from(height),
            depth,
            compression: Compression::Wpg1Rle,
            resolution: resolution(horizontal_res, vertical_res),
            page: Some(page),
            orientation
        })
    }

    /// Read a level 2 bitmap header, `None` when the bitmap uses a depth
    /// or compression we cannot decode and should be skipped
    fn read_l2_bitmap(
        &mut self, state: &ParseState
    ) -> Result<Option<RasterRecord>, WpgDecodeErrors> {
        let width = self.bytes.get_u16_le();
        let height = self.bytes.get_u16_le();

        if width == 0 || height == 0 {
            return Err(WpgDecodeErrors::ImproperHeader("Zero bitmap dimensions"));
        }
        let depth_code = self.bytes.read_u8();
        let compression_code = self.bytes.read_u8();

        let compression = match compression_code {
            0 => Compression::None,
            1 => Compression::Wpg2Rle,
            _ => {
                warn!("Skipping bitmap with unknown compression {compression_code}");
                return Ok(None);
            }
        };
        let Some(depth) = level2_depth(depth_code) else {
            warn!("Skipping bitmap with unknown depth code {depth_code}");
            return Ok(None);
        };

        Ok(Some(RasterRecord {
            record: L2_BITMAP,
            width: usize::from(width),
            height: usize::from(height),
            depth,
            compression,
            resolution: None,
            page: None,
            orientation: state.transform.orientation()
        }))
    }

    /// Read a palette record with `stride` bytes per entry.
    ///
    /// `record_length` bounds the entries of level 2 records. A palette
    /// that doesn't fit is not an error for the file, it fails the bitmap
    /// that would have used it
    fn read_palette(
        &mut self, state: &mut ParseState, stride: usize, record_length: Option<u32>
    ) -> Result<(), WpgDecodeErrors> {
        let start = usize::from(self.bytes.get_u16_le());
        let count = usize::from(self.bytes.get_u16_le());

        trace!("Palette: start {start}, {count} entries");

        let capacity = ParseState::palette_capacity(state.level);
        let mut palette = Palette::with_capacity(capacity);

        if count == 0 {
            if record_length.is_some() {
                state.palette_error = Some(RasterDecodeErrors::PaletteOverflow(start, 0, capacity));
            }
            state.palette = palette;
            return Ok(());
        }
        if let Some(length) = record_length {
            let available = (length.saturating_sub(4) as usize) / stride;
            if count > available {
                warn!("Palette of {count} entries does not fit a record of {length} bytes");
                state.palette_error =
                    Some(RasterDecodeErrors::PaletteOverflow(start, count, available));
                return Ok(());
            }
        }
        if start.saturating_add(count) > capacity {
            warn!("Palette overflows, start {start} count {count} capacity {capacity}");
            state.palette_error = Some(RasterDecodeErrors::PaletteOverflow(start, count, capacity));
            return Ok(());
        }

        let mut data = vec![0_u8; count * stride];
        let read = self.bytes.read_bytes(&mut data)?;
        if read != data.len() {
            warn!("Palette truncated, missing entries are black");
        }
        palette.load(start, count, &data, stride)?;

        state.palette = palette;
        state.palette_error = None;
        Ok(())
    }

    /// Parse a `WPG2Flags` structure into a transform
    fn load_wpg2_flags(&mut self, precision: u8) -> Wpg2Transform {
        let mut transform = Wpg2Transform::default();
        // 16.16 fixed point
        let fixed = |raw: u32| (raw as i32) as f32 / 65536.0;

        let flags = self.bytes.get_u16_le();
        transform.flags = flags;

        if flag_set(flags, FLAG_EDIT_LOCK) {
            let _lock = self.bytes.get_u32_le();
        }
        if flag_set(flags, FLAG_OBJECT_ID) {
            if precision == 0 {
                let _object_id = self.bytes.get_u16_le();
            } else {
                let _object_id = self.bytes.get_u32_le();
            }
        }
        if flag_set(flags, FLAG_ROTATION) {
            transform.angle = fixed(self.bytes.get_u32_le());
        }
        if flag_set(flags, FLAG_ROTATION | FLAG_SCALE) {
            transform.ctm[0][0] = fixed(self.bytes.get_u32_le());
            transform.ctm[1][1] = fixed(self.bytes.get_u32_le());
        }
        if flag_set(flags, FLAG_ROTATION | FLAG_SKEW) {
            transform.ctm[1][0] = fixed(self.bytes.get_u32_le());
            transform.ctm[0][1] = fixed(self.bytes.get_u32_le());
        }
        if flag_set(flags, FLAG_TRANSLATION) {
            for row in 0..2 {
                let whole = self.bytes.get_u32_le() as i32;
                let fraction = f32::from(self.bytes.get_u16_le()) / 65536.0;
                transform.ctm[row][2] = if whole >= 0 {
                    whole as f32 + fraction
                } else {
                    whole as f32 - fraction
                };
            }
        }
        if flag_set(flags, FLAG_PERSPECTIVE) {
            for column in 0..2 {
                let whole = self.bytes.get_u16_le() as i16;
                let fraction = f32::from(self.bytes.get_u16_le()) / 65536.0;
                transform.ctm[2][column] = f32::from(whole) + fraction;
            }
        }
        trace!("Bitmap transform: {:?}", transform);
        transform
    }

    fn note_embedded(&mut self, record: u8, body: u64, length: u64, skip: u64) {
        if length <= skip {
            return;
        }
        let blob = EmbeddedBlob {
            record,
            offset: body + skip,
            length: length - skip
        };
        warn!(
            "Skipping embedded PostScript at {}, {} bytes",
            blob.offset, blob.length
        );
        self.embedded.push(blob);
    }

    /// Decode or note a bitmap record.
    ///
    /// Returns whether the walk should go on to the next record
    fn handle_raster(
        &mut self, raster: RasterRecord, state: &mut ParseState, ping: bool,
        frames: &mut Vec<WpgFrame>, stop: &dyn Stop
    ) -> Result<bool, WpgDecodeErrors> {
        trace!(
            "Bitmap record {:#04X}: {}x{}, depth {}, {:?}",
            raster.record,
            raster.width,
            raster.height,
            raster.depth,
            raster.compression
        );
        if raster.depth > 24 {
            return Err(RasterDecodeErrors::UnsupportedDepth(raster.depth).into());
        }
        if raster.width > self.options.max_width() {
            return Err(WpgDecodeErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                raster.width
            ));
        }
        if raster.height > self.options.max_height() {
            return Err(WpgDecodeErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                raster.height
            ));
        }
        if ping {
            self.first_frame = Some(raster);
            return Ok(false);
        }

        let level = state.level;
        let decoded = state
            .take_palette()
            .and_then(|palette| self.decode_raster(level, &raster, &palette, stop));

        match decoded {
            Ok(frame) => frames.push(frame),
            Err(err) => self.reject_frame(err)?
        }
        Ok(self.options.wpg_get_decode_all_frames())
    }

    /// Decide whether a failed bitmap fails the file
    fn reject_frame(&self, err: RasterDecodeErrors) -> Result<(), WpgDecodeErrors> {
        match err {
            RasterDecodeErrors::Cancelled(_)
            | RasterDecodeErrors::IoErrors(_)
            | RasterDecodeErrors::AllocationFailure(_) => Err(err.into()),
            err if self.options.strict_mode() => Err(err.into()),
            err => {
                error!("Skipping bitmap: {:?}", err);
                Ok(())
            }
        }
    }

    fn decode_raster(
        &mut self, level: WpgLevel, raster: &RasterRecord, loaded: &Palette, stop: &dyn Stop
    ) -> Result<WpgFrame, RasterDecodeErrors> {
        let palette = frame_palette(level, Some(loaded), raster.depth)?;

        let mut stream = RasterStream::new(
            raster.width,
            raster.height,
            raster.depth,
            color_model(raster.depth)
        )
        .set_compression(raster.compression);

        if let Some(palette) = &palette {
            stream = stream.set_palette(palette);
        }
        let mut pixels = PixelBuffer::new(raster.width, raster.height, stream.colorspace()?)?;

        let status = match stream.decode_frame(&mut self.bytes, &mut pixels, stop) {
            Ok(DecodeResult::Complete) => FrameStatus::Complete,
            Ok(DecodeResult::Partial {
                rows_decoded,
                reason
            }) => {
                if self.options.error_on_truncation() {
                    return Err(reason);
                }
                warn!(
                    "Bitmap truncated after {rows_decoded} of {} rows",
                    raster.height
                );
                FrameStatus::Partial { rows_decoded }
            }
            Err(err) if err.is_frame_abort() && !self.options.error_on_frame_abort() => {
                FrameStatus::Aborted(err)
            }
            Err(err) => return Err(err)
        };

        Ok(WpgFrame {
            record: raster.record,
            depth: raster.depth,
            pixels,
            palette,
            resolution: raster.resolution,
            page: raster.page,
            orientation: raster.orientation,
            status
        })
    }
}

/// Pixels per centimetre, only when both directions are given
fn resolution(horizontal: u16, vertical: u16) -> Option<(f64, f64)> {
    if horizontal == 0 || vertical == 0 {
        return None;
    }
    Some((
        f64::from(horizontal) / WPU_PER_CM,
        f64::from(vertical) / WPU_PER_CM
    ))
}
