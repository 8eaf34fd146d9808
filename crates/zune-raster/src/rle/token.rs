/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReaderTrait, ZReader};

use crate::errors::RasterDecodeErrors;

/// One decoded control sequence
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Token {
    /// Copy the next `n` source bytes
    Literal(usize),
    /// Emit `value` `count` times
    RepeatByte { value: u8, count: usize },
    /// Emit the current sample buffer `count` times
    RepeatSample { count: usize },
    /// Re-submit the previous row `n` times
    RepeatPreviousRow(usize),
    /// Emit a fixed fill value `count` times
    Fill { value: u8, count: usize },
    /// Change the generation 2 sample width
    SetSampleWidth(u8),
    /// Flip XOR against the previous row
    ToggleDeltaMode
}

/// Mutable decoder state shared between tokens of one frame
pub(crate) struct RleState {
    pub sample:      [u8; 8],
    pub sample_size: u8
}

impl RleState {
    pub const fn new() -> RleState {
        RleState {
            sample:      [0; 8],
            sample_size: 1
        }
    }
}

/// Where token parsers pull their bytes from
pub(crate) trait ByteFeed {
    /// Next source byte, `StreamTruncated` at the end of the source
    fn next_byte(&mut self) -> Result<u8, RasterDecodeErrors>;
}

impl<T: ZByteReaderTrait> ByteFeed for ZReader<T> {
    #[inline(always)]
    fn next_byte(&mut self) -> Result<u8, RasterDecodeErrors> {
        match self.read_u8_err() {
            Ok(byte) => Ok(byte),
            Err(err) => {
                if self.eof().unwrap_or(true) {
                    Err(RasterDecodeErrors::StreamTruncated)
                } else {
                    Err(RasterDecodeErrors::IoErrors(err))
                }
            }
        }
    }
}

/// A token parser, given the control byte that selected it
pub(crate) type TokenParser =
    fn(&mut RleState, u8, &mut dyn ByteFeed) -> Result<Token, RasterDecodeErrors>;

#[cfg(test)]
pub(crate) mod tests {
    use alloc::vec::Vec;

    use super::ByteFeed;
    use crate::errors::RasterDecodeErrors;

    /// A feed over a byte slice
    pub(crate) struct SliceFeed {
        pub bytes:    Vec<u8>,
        pub position: usize
    }

    impl SliceFeed {
        pub fn new(bytes: &[u8]) -> SliceFeed {
            SliceFeed {
                bytes:    bytes.to_vec(),
                position: 0
            }
        }
    }

    impl ByteFeed for SliceFeed {
        fn next_byte(&mut self) -> Result<u8, RasterDecodeErrors> {
            let byte = *self
                .bytes
                .get(self.position)
                .ok_or(RasterDecodeErrors::StreamTruncated)?;
            self.position += 1;
            Ok(byte)
        }
    }
}
