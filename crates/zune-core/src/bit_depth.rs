/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Depth of decoded samples

/// How wide one decoded sample is.
///
/// Source rasters come in many precisions (1, 2, 4 bit indices, 8 or
/// 16 bit gray, 24 bit RGB), decoders rescale all of them to one of these.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum BitDepth {
    /// `u8` samples, 0..=255
    Eight,
    /// `u16` samples, 0..=65535, native endian in memory
    Sixteen,
    #[default]
    Unknown
}

impl BitDepth {
    /// Largest sample value, what full intensity maps to
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => u8::MAX as u16,
            Self::Sixteen => u16::MAX,
            Self::Unknown => 0
        }
    }

    /// Bits in one sample, `0` when unknown
    pub const fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::Unknown => 0
        }
    }

    /// Bytes needed to store one sample
    ///
    /// ```
    /// use zune_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::Sixteen.size_of(), 2);
    /// ```
    ///
    /// # Panics
    /// On [`BitDepth::Unknown`]
    pub const fn size_of(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
            Self::Unknown => panic!("Unknown bit depth has no size")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BitDepth;

    #[test]
    fn max_value_fills_the_bits() {
        for depth in [BitDepth::Eight, BitDepth::Sixteen] {
            assert_eq!(u32::from(depth.max_value()), (1_u32 << depth.bits()) - 1);
        }
        assert_eq!(BitDepth::default(), BitDepth::Unknown);
    }
}
