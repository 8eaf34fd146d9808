/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel unpacking
//!
//! Expands a packed row into quantum samples, either straight through
//! the quantum table (gray and direct colour) or through a palette.
use alloc::vec::Vec;

use zune_core::colorspace::ColorSpace;
use zune_core::log::trace;

use crate::errors::RasterDecodeErrors;
use crate::palette::Palette;
use crate::quantum::QuantumLut;
use crate::scanline::ScanlineConsumer;
use crate::sink::RowSink;

/// How packed samples are interpreted
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorModel {
    /// Samples are gray levels
    Gray,
    /// Samples are palette indices
    Indexed,
    /// Samples are interleaved red, green and blue values
    Direct
}

/// One channel of an interleaved pixel
///
/// Components of up to 8 bits take one byte in the row, deeper ones two
/// big endian bytes. Every component has its own precision, a 12 bit
/// gray plane can carry an 8 bit alpha plane.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Component {
    depth:  u8,
    signed: bool
}

impl Component {
    /// An unsigned component of `depth` bits
    pub const fn new(depth: u8) -> Component {
        Component {
            depth,
            signed: false
        }
    }

    /// A two's complement component of `depth` bits
    pub const fn signed(depth: u8) -> Component {
        Component {
            depth,
            signed: true
        }
    }

    pub const fn depth(&self) -> u8 {
        self.depth
    }

    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Bytes the component takes in a row
    pub const fn stored_bytes(&self) -> usize {
        if self.depth <= 8 {
            1
        } else {
            2
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Layout {
    /// 1, 2, 4 or 8 bit gray packed MSB first
    Gray(u8),
    /// 1, 2, 4 or 8 bit palette indices
    Indexed(u8),
    /// Whole byte components, one to four of them
    Interleaved(u8)
}

impl Layout {
    fn resolve(depth: u16, model: ColorModel) -> Result<Layout, RasterDecodeErrors> {
        let layout = match (depth, model) {
            // bilevel rows are gray even when a palette is present
            (1, _) => Layout::Gray(1),
            (2 | 4 | 8, ColorModel::Gray) => Layout::Gray(depth as u8),
            (2 | 4 | 8, ColorModel::Indexed) => Layout::Indexed(depth as u8),
            (16, ColorModel::Gray) => Layout::Interleaved(1),
            (24, ColorModel::Direct) => Layout::Interleaved(3),
            _ => return Err(RasterDecodeErrors::UnsupportedDepth(depth))
        };
        Ok(layout)
    }

    /// Per component precision of a layout resolved from a pixel depth
    fn components(self, depth: u16) -> Vec<Component> {
        match self {
            Layout::Gray(bits) | Layout::Indexed(bits) => alloc::vec![Component::new(bits)],
            Layout::Interleaved(3) => alloc::vec![Component::new(8); 3],
            Layout::Interleaved(_) => alloc::vec![Component::new(depth as u8)]
        }
    }

    const fn colorspace(self) -> ColorSpace {
        match self {
            Layout::Gray(_) | Layout::Interleaved(1) => ColorSpace::Luma,
            Layout::Interleaved(2) => ColorSpace::LumaA,
            Layout::Indexed(_) | Layout::Interleaved(3) => ColorSpace::RGB,
            Layout::Interleaved(4) => ColorSpace::RGBA,
            Layout::Interleaved(_) => ColorSpace::Unknown
        }
    }
}

/// Colour space rows of `depth` bits in `model` unpack to
pub fn output_colorspace(depth: u16, model: ColorModel) -> Result<ColorSpace, RasterDecodeErrors> {
    Layout::resolve(depth, model).map(Layout::colorspace)
}

/// Colour space interleaved `components` unpack to, the last of two
/// or four components is alpha
///
/// # Errors
/// - `UnsupportedComponents`: not between one and four components
/// - `UnsupportedDepth`: a component outside `1..=16` bits
pub fn components_colorspace(components: &[Component]) -> Result<ColorSpace, RasterDecodeErrors> {
    if !(1..=4).contains(&components.len()) {
        return Err(RasterDecodeErrors::UnsupportedComponents(components.len()));
    }
    if let Some(c) = components.iter().find(|c| c.depth == 0 || c.depth > 16) {
        return Err(RasterDecodeErrors::UnsupportedDepth(u16::from(c.depth)));
    }
    Ok(Layout::Interleaved(components.len() as u8).colorspace())
}

/// Extract the `x`'th `bits` wide sample of a packed row, MSB first
#[inline(always)]
fn packed_sample(data: &[u8], x: usize, bits: u8) -> usize {
    let bit = x * usize::from(bits);
    let shift = 8 - u32::from(bits) - (bit & 7) as u32;
    let mask = (1_u16 << bits) - 1;

    usize::from((u16::from(data[bit >> 3]) >> shift) & mask)
}

/// Rescaling state of one component
struct ComponentLut {
    lut:  QuantumLut,
    wide: bool,
    /// Xored into raw samples, moves two's complement zero to mid range
    flip: usize
}

impl ComponentLut {
    fn build(component: Component) -> Result<ComponentLut, RasterDecodeErrors> {
        let mut lut = ComponentLut {
            lut:  QuantumLut::build(component.depth)?,
            wide: component.stored_bytes() == 2,
            flip: 0
        };
        lut.set_signed(component.signed);
        Ok(lut)
    }

    fn set_signed(&mut self, yes: bool) {
        self.flip = if yes { 1 << (self.lut.depth() - 1) } else { 0 };
    }
}

/// Row expansion state that does not depend on the sink
struct RowExpander<'a> {
    layout:     Layout,
    columns:    usize,
    components: Vec<ComponentLut>,
    palette:    Option<&'a Palette>
}

impl<'a> RowExpander<'a> {
    /// Expand one packed row into `out`, returning how many
    /// palette indices had to be clamped
    fn expand(&self, data: &[u8], out: &mut [u16]) -> usize {
        let mut clamped = 0;
        let columns = self.columns;

        match self.layout {
            Layout::Gray(bits) => {
                let gray = &self.components[0];
                for (x, sample) in out[..columns].iter_mut().enumerate() {
                    *sample = gray.lut.get(packed_sample(data, x, bits) ^ gray.flip);
                }
            }
            Layout::Indexed(bits) => {
                if let Some(palette) = self.palette {
                    for (x, pixel) in out[..columns * 3].chunks_exact_mut(3).enumerate() {
                        let (entry, was_clamped) =
                            palette.lookup_clamped(packed_sample(data, x, bits));

                        clamped += usize::from(was_clamped);
                        pixel[0] = entry.red;
                        pixel[1] = entry.green;
                        pixel[2] = entry.blue;
                    }
                }
            }
            Layout::Interleaved(count) => {
                let count = usize::from(count);
                let mut raw = data.iter();

                for pixel in out[..columns * count].chunks_exact_mut(count) {
                    for (sample, component) in pixel.iter_mut().zip(&self.components) {
                        let high = raw.next().copied().unwrap_or(0);
                        let value = if component.wide {
                            let low = raw.next().copied().unwrap_or(0);
                            usize::from(u16::from_be_bytes([high, low]))
                        } else {
                            usize::from(high)
                        };
                        *sample = component.lut.get(value ^ component.flip);
                    }
                }
            }
        }
        clamped
    }
}

/// Expands packed rows and writes them into a [`RowSink`]
pub struct PixelUnpacker<'a, S: RowSink + ?Sized> {
    expander: RowExpander<'a>,
    sink:     &'a mut S,
    clamped:  usize
}

impl<'a, S: RowSink + ?Sized> PixelUnpacker<'a, S> {
    /// Set up an unpacker for rows of `columns` pixels of `depth` bits.
    ///
    /// # Errors
    /// - `UnsupportedDepth`: the depth cannot be used with `model`
    /// - `MissingPalette`: indexed rows without a non empty palette
    /// - `DimensionMismatch`: the sink disagrees on width or colour layout
    pub fn new(
        columns: usize, depth: u16, model: ColorModel, palette: Option<&'a Palette>,
        sink: &'a mut S
    ) -> Result<PixelUnpacker<'a, S>, RasterDecodeErrors> {
        let layout = Layout::resolve(depth, model)?;

        if depth == 1 && model == ColorModel::Indexed {
            trace!("Bilevel rows are unpacked as gray, the palette is ignored");
        }
        let palette = match layout {
            Layout::Indexed(_) => match palette {
                Some(p) if !p.is_empty() => Some(p),
                _ => return Err(RasterDecodeErrors::MissingPalette(depth))
            },
            _ => None
        };
        PixelUnpacker::build(columns, layout, &layout.components(depth), palette, sink)
    }

    /// Set up an unpacker for interleaved components with their own precision.
    ///
    /// One component unpacks to [`ColorSpace::Luma`], two to
    /// [`ColorSpace::LumaA`], three to [`ColorSpace::RGB`] and four to
    /// [`ColorSpace::RGBA`].
    ///
    /// # Errors
    /// - `UnsupportedComponents`, `UnsupportedDepth`: see [`components_colorspace`]
    /// - `DimensionMismatch`: the sink disagrees on width or colour layout
    pub fn with_components(
        columns: usize, components: &[Component], sink: &'a mut S
    ) -> Result<PixelUnpacker<'a, S>, RasterDecodeErrors> {
        components_colorspace(components)?;
        let layout = Layout::Interleaved(components.len() as u8);

        PixelUnpacker::build(columns, layout, components, None, sink)
    }

    fn build(
        columns: usize, layout: Layout, components: &[Component], palette: Option<&'a Palette>,
        sink: &'a mut S
    ) -> Result<PixelUnpacker<'a, S>, RasterDecodeErrors> {
        let (width, _) = sink.dimensions();
        if width != columns {
            return Err(RasterDecodeErrors::DimensionMismatch(
                "width", columns, width
            ));
        }
        let expected = layout.colorspace();
        if sink.colorspace() != expected {
            return Err(RasterDecodeErrors::DimensionMismatch(
                "components",
                expected.num_components(),
                sink.colorspace().num_components()
            ));
        }
        let components = components
            .iter()
            .map(|c| ComponentLut::build(*c))
            .collect::<Result<Vec<_>, _>>()?;

        trace!("Unpacking rows as {:?} with {} components", layout, components.len());

        Ok(PixelUnpacker {
            expander: RowExpander {
                layout,
                columns,
                components,
                palette
            },
            sink,
            clamped: 0
        })
    }

    /// Treat every gray and direct component as two's complement, shifting
    /// them so the most negative value maps to zero
    pub fn set_signed(&mut self, yes: bool) {
        for component in &mut self.expander.components {
            component.set_signed(yes);
        }
    }

    /// How many out of range palette indices were clamped so far
    pub const fn clamped_indices(&self) -> usize {
        self.clamped
    }
}

impl<'a, S: RowSink + ?Sized> ScanlineConsumer for PixelUnpacker<'a, S> {
    fn consume_row(&mut self, row: usize, data: &[u8]) -> Result<(), RasterDecodeErrors> {
        let layout = self.expander.layout;
        let expected = self.expander.columns * layout.colorspace().num_components();

        let out = self.sink.begin_row(row)?;
        if out.len() < expected {
            return Err(RasterDecodeErrors::DimensionMismatch(
                "row length",
                expected,
                out.len()
            ));
        }
        self.clamped += self.expander.expand(data, out);
        self.sink.commit_row(row)
    }
}

#[cfg(test)]
mod tests {
    use zune_core::colorspace::ColorSpace;

    use super::*;
    use crate::quantum::QUANTUM_MAX;
    use crate::sink::PixelBuffer;

    const M: u16 = QUANTUM_MAX;

    fn unpack_one(
        columns: usize, depth: u16, model: ColorModel, palette: Option<&Palette>, row: &[u8]
    ) -> (PixelBuffer, usize) {
        let colorspace = output_colorspace(depth, model).unwrap();
        let mut buffer = PixelBuffer::new(columns, 1, colorspace).unwrap();
        let clamped = {
            let mut unpacker =
                PixelUnpacker::new(columns, depth, model, palette, &mut buffer).unwrap();
            unpacker.consume_row(0, row).unwrap();
            unpacker.clamped_indices()
        };
        (buffer, clamped)
    }

    #[test]
    fn bilevel_ignores_palette() {
        let palette = Palette::from_rgb(&[[255, 0, 0], [0, 255, 0]]);
        let row = [0b1010_0000, 0b0100_0000];
        let (buffer, _) = unpack_one(10, 1, ColorModel::Indexed, Some(&palette), &row);

        assert_eq!(buffer.colorspace(), ColorSpace::Luma);
        assert_eq!(buffer.pixels(), &[M, 0, M, 0, 0, 0, 0, 0, 0, M]);
    }

    #[test]
    fn two_bit_partial_last_byte() {
        let palette = Palette::from_rgb(&[[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]]);
        // five pixels: 3 2 1 0 | 1, the rest of the second byte is junk
        let (buffer, clamped) =
            unpack_one(5, 2, ColorModel::Indexed, Some(&palette), &[0b1110_0100, 0b0111_1111]);

        let reds = buffer
            .pixels()
            .chunks_exact(3)
            .map(|p| p[0] / 257)
            .collect::<Vec<_>>();
        assert_eq!(reds, [3, 2, 1, 0, 1]);
        assert_eq!(clamped, 0);
    }

    #[test]
    fn indices_past_palette_are_clamped() {
        let palette = Palette::from_rgb(&[[10, 20, 30], [40, 50, 60]]);
        let (buffer, clamped) = unpack_one(3, 8, ColorModel::Indexed, Some(&palette), &[0, 1, 200]);

        assert_eq!(clamped, 1);
        assert_eq!(&buffer.pixels()[6..], &[40 * 257, 50 * 257, 60 * 257]);
    }

    #[test]
    fn four_bit_indices() {
        let palette = Palette::from_rgb(&[[0; 3]; 16]);
        let (buffer, clamped) =
            unpack_one(3, 4, ColorModel::Indexed, Some(&palette), &[0x0F, 0xA0]);
        assert_eq!(clamped, 0);
        assert_eq!(buffer.pixels().len(), 9);
    }

    #[test]
    fn direct_colour_and_gray16() {
        let (rgb, _) = unpack_one(1, 24, ColorModel::Direct, None, &[255, 0, 1]);
        assert_eq!(rgb.pixels(), &[M, 0, 257]);

        let (gray, _) = unpack_one(2, 16, ColorModel::Gray, None, &[0x12, 0x34, 0xFF, 0xFF]);
        assert_eq!(gray.pixels(), &[0x1234, M]);
    }

    #[test]
    fn signed_gray_is_offset() {
        let mut buffer = PixelBuffer::new(2, 1, ColorSpace::Luma).unwrap();
        let mut unpacker = PixelUnpacker::new(2, 8, ColorModel::Gray, None, &mut buffer).unwrap();
        unpacker.set_signed(true);
        // -128 and 127
        unpacker.consume_row(0, &[0x80, 0x7F]).unwrap();
        assert_eq!(buffer.pixels(), &[0, M]);
    }

    #[test]
    fn setup_errors() {
        let mut buffer = PixelBuffer::new(4, 1, ColorSpace::RGB).unwrap();
        assert!(matches!(
            PixelUnpacker::new(4, 8, ColorModel::Indexed, None, &mut buffer),
            Err(RasterDecodeErrors::MissingPalette(8))
        ));
        assert!(matches!(
            PixelUnpacker::new(4, 3, ColorModel::Indexed, None, &mut buffer),
            Err(RasterDecodeErrors::UnsupportedDepth(3))
        ));
        assert!(matches!(
            PixelUnpacker::new(4, 8, ColorModel::Gray, None, &mut buffer),
            Err(RasterDecodeErrors::DimensionMismatch("components", 1, 3))
        ));
        assert!(matches!(
            PixelUnpacker::new(5, 24, ColorModel::Direct, None, &mut buffer),
            Err(RasterDecodeErrors::DimensionMismatch("width", 5, 4))
        ));
    }

    fn unpack_components(
        columns: usize, components: &[Component], row: &[u8]
    ) -> PixelBuffer {
        let colorspace = components_colorspace(components).unwrap();
        let mut buffer = PixelBuffer::new(columns, 1, colorspace).unwrap();
        {
            let mut unpacker =
                PixelUnpacker::with_components(columns, components, &mut buffer).unwrap();
            unpacker.consume_row(0, row).unwrap();
        }
        buffer
    }

    #[test]
    fn components_keep_their_own_precision() {
        // 12 bit gray in two bytes, 8 bit alpha in one
        let components = [Component::new(12), Component::new(8)];
        let row = [0x0F, 0xFF, 0xFF, 0x08, 0x00, 0x00];
        let buffer = unpack_components(2, &components, &row);

        assert_eq!(buffer.colorspace(), ColorSpace::LumaA);
        assert_eq!(buffer.pixels(), &[M, M, 32776, 0]);
    }

    #[test]
    fn four_components_carry_alpha() {
        let buffer = unpack_components(1, &[Component::new(8); 4], &[1, 2, 3, 255]);

        assert_eq!(buffer.colorspace(), ColorSpace::RGBA);
        assert_eq!(buffer.pixels(), &[257, 514, 771, M]);
    }

    #[test]
    fn signedness_is_per_component() {
        let components = [Component::signed(8), Component::new(8)];
        let buffer = unpack_components(1, &components, &[0x80, 0x80]);

        assert_eq!(buffer.pixels(), &[0, 128 * 257]);
    }

    #[test]
    fn component_setup_errors() {
        let mut buffer = PixelBuffer::new(2, 1, ColorSpace::RGB).unwrap();
        assert!(matches!(
            PixelUnpacker::with_components(2, &[], &mut buffer),
            Err(RasterDecodeErrors::UnsupportedComponents(0))
        ));
        assert!(matches!(
            PixelUnpacker::with_components(2, &[Component::new(8); 5], &mut buffer),
            Err(RasterDecodeErrors::UnsupportedComponents(5))
        ));
        assert!(matches!(
            PixelUnpacker::with_components(2, &[Component::new(17)], &mut buffer),
            Err(RasterDecodeErrors::UnsupportedDepth(17))
        ));
        assert!(matches!(
            PixelUnpacker::with_components(2, &[Component::new(8); 2], &mut buffer),
            Err(RasterDecodeErrors::DimensionMismatch("components", 2, 3))
        ));
    }
}
