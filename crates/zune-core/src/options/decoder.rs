/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Decoder options that are flags
///
/// NOTE: When you extend this, add true or false to
/// all options constructors below that build a `DecoderFlags`
#[derive(Copy, Debug, Clone)]
struct DecoderFlags {
    /// Whether a frame abort should fail the whole decode instead of
    /// keeping the zero filled frame
    error_on_frame_abort: bool,
    /// Whether truncated rasters are reported as errors instead of
    /// being zero filled and marked partial
    error_on_truncation:  bool,
    /// Decode all frames of a multi-frame container, or stop after the first
    wpg_decode_all_frames: bool
}

fn safe_flags() -> DecoderFlags {
    DecoderFlags {
        error_on_frame_abort:  false,
        error_on_truncation:   false,
        wpg_decode_all_frames: true
    }
}

fn strict_flags() -> DecoderFlags {
    DecoderFlags {
        error_on_frame_abort:  true,
        error_on_truncation:   true,
        wpg_decode_all_frames: true
    }
}

/// Decoder options
///
/// Not all options are respected by decoders all decoders
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:  usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height: usize,
    /// Boolean flags that influence decoding
    flags:      DecoderFlags
}

/// Initializers
impl DecoderOptions {
    /// Create the decoder with options that tolerate recoverable
    /// corruption, this is the same as `default`
    ///
    /// Truncated rasters are zero filled and aborted frames are kept
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create the decoder with options that reject any recoverable
    /// corruption
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default().set_decoder_flags(strict_flags())
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn strict_mode(&self) -> bool {
        self.flags.error_on_frame_abort | self.flags.error_on_truncation
    }

    /// Return true if a frame that aborted mid decode should fail
    /// the whole decode instead of being kept zero filled
    pub const fn error_on_frame_abort(&self) -> bool {
        self.flags.error_on_frame_abort
    }

    /// Return true if a truncated raster should be an error
    /// instead of a zero filled partial frame
    pub const fn error_on_truncation(&self) -> bool {
        self.flags.error_on_truncation
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoders, a truncated
    /// raster or an aborted frame becomes an error for the whole decode
    ///
    /// # Arguments
    ///
    /// * `yes`:
    ///
    /// returns: DecoderOptions
    ///
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.flags.error_on_frame_abort = yes;
        self.flags.error_on_truncation = yes;
        self
    }
}

/// WPG specific options
impl DecoderOptions {
    /// Return whether the WPG decoder should decode every raster
    /// record in the file or stop after the first one
    pub const fn wpg_get_decode_all_frames(&self) -> bool {
        self.flags.wpg_decode_all_frames
    }

    /// Set whether the WPG decoder should decode every raster
    /// record in the file
    ///
    /// - Default value: true
    #[must_use]
    pub fn wpg_set_decode_all_frames(mut self, yes: bool) -> Self {
        self.flags.wpg_decode_all_frames = yes;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:  1 << 14,
            max_height: 1 << 14,
            flags:      safe_flags()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::DecoderOptions;

    #[test]
    fn strict_mode_toggles_both_flags() {
        let options = DecoderOptions::default();
        assert!(!options.strict_mode());

        let options = options.set_strict_mode(true);
        assert!(options.strict_mode());
        assert!(options.error_on_truncation());

        assert!(DecoderOptions::new_strict().strict_mode());
        assert!(!DecoderOptions::new_safe().strict_mode());
    }

    #[test]
    fn dimension_limits() {
        let options = DecoderOptions::default()
            .set_max_width(10)
            .set_max_height(20);
        assert_eq!(options.max_width(), 10);
        assert_eq!(options.max_height(), 20);
        assert!(options.wpg_get_decode_all_frames());
        assert!(!options.wpg_set_decode_all_frames(false).wpg_get_decode_all_frames());
    }
}
