#![cfg(feature = "serde")]
//! Serialization of the image descriptions, as plain names

use serde::ser::*;

use crate::bit_depth::BitDepth;
use crate::colorspace::ColorSpace;

impl Serialize for ColorSpace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let name = match self {
            ColorSpace::RGB => "RGB",
            ColorSpace::RGBA => "RGBA",
            ColorSpace::Luma => "Luma",
            ColorSpace::LumaA => "LumaA",
            ColorSpace::Unknown => "Unknown"
        };
        serializer.serialize_str(name)
    }
}

impl Serialize for BitDepth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        match self.bits() {
            0 => serializer.serialize_str("Unknown"),
            bits => serializer.serialize_u8(bits)
        }
    }
}
