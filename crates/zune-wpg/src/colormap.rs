/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Which colormap a bitmap record is decoded with
use zune_core::log::trace;
use zune_raster::{Palette, RasterDecodeErrors};

use crate::common::WpgLevel;
use crate::constants::WPG1_DEFAULT_PALETTE;

/// Largest palette a level 2 file can describe
pub(crate) const LEVEL2_PALETTE_CAPACITY: usize = 65536;

/// Largest palette a level 1 file can describe
pub(crate) const LEVEL1_PALETTE_CAPACITY: usize = 256;

fn default_palette(level: WpgLevel, colors: usize) -> Result<Palette, RasterDecodeErrors> {
    match level {
        WpgLevel::Level1 => {
            trace!("Using the default level 1 palette");
            Ok(Palette::from_rgb(
                &WPG1_DEFAULT_PALETTE[..colors.min(WPG1_DEFAULT_PALETTE.len())]
            ))
        }
        WpgLevel::Level2 => {
            // linear gray ramp
            let mut palette = Palette::with_capacity(colors);
            let max = colors.saturating_sub(1).max(1);
            for i in 0..colors {
                let level = ((i * 255) / max) as u8;
                palette.set_entry(i, level, level, level, 255)?;
            }
            Ok(palette)
        }
    }
}

/// Build the colormap for a raster of `depth` bits.
///
/// - Direct colour rasters get none.
/// - Without a loaded palette level 1 uses the WordPerfect default
///   palette and level 2 a gray ramp.
/// - Palettes shorter than `1 << depth` grow with black entries.
/// - A bilevel palette with fewer than two entries, or with both entries
///   black, gets a white second entry.
pub(crate) fn frame_palette(
    level: WpgLevel, loaded: Option<&Palette>, depth: u16
) -> Result<Option<Palette>, RasterDecodeErrors> {
    if depth >= 16 || depth == 0 {
        return Ok(None);
    }
    let colors = 1_usize << depth;

    let mut palette = match loaded {
        Some(palette) if !palette.is_empty() => palette.clone(),
        _ => default_palette(level, colors)?
    };
    if palette.entry_count() < colors {
        palette.resize(colors)?;
    }
    if depth == 1 {
        let crippled = match (palette.get(0), palette.get(1)) {
            (Some(first), Some(second)) => first.is_black() && second.is_black(),
            _ => true
        };
        if crippled {
            trace!("Repairing monochrome palette");
            palette.resize(2)?;
            palette.set_entry(1, 255, 255, 255, 255)?;
        }
    }
    Ok(Some(palette))
}

#[cfg(test)]
mod tests {
    use zune_raster::QUANTUM_MAX;

    use super::*;

    #[test]
    fn direct_colour_has_no_palette() {
        assert!(frame_palette(WpgLevel::Level1, None, 24).unwrap().is_none());
    }

    #[test]
    fn level1_default_palette() {
        let palette = frame_palette(WpgLevel::Level1, None, 4).unwrap().unwrap();
        assert_eq!(palette.entry_count(), 16);

        let white = palette.get(15).unwrap();
        assert_eq!((white.red, white.green, white.blue), (252 * 257, 252 * 257, 252 * 257));
    }

    #[test]
    fn level2_gray_ramp() {
        let palette = frame_palette(WpgLevel::Level2, None, 2).unwrap().unwrap();
        let reds = palette.entries().iter().map(|e| e.red / 257).collect::<alloc::vec::Vec<_>>();
        assert_eq!(reds, [0, 85, 170, 255]);
    }

    #[test]
    fn short_palettes_grow_black() {
        let mut loaded = Palette::with_capacity(LEVEL1_PALETTE_CAPACITY);
        loaded.set_entry(0, 10, 20, 30, 255).unwrap();

        let palette = frame_palette(WpgLevel::Level1, Some(&loaded), 8).unwrap().unwrap();
        assert_eq!(palette.entry_count(), 256);
        assert!(palette.get(255).unwrap().is_black());
    }

    #[test]
    fn crippled_monochrome_palette_is_repaired() {
        let loaded = Palette::from_rgb(&[[0, 0, 0], [0, 0, 0]]);
        let palette = frame_palette(WpgLevel::Level1, Some(&loaded), 1).unwrap().unwrap();
        assert_eq!(palette.get(1).unwrap().green, QUANTUM_MAX);

        // a real two colour palette is kept
        let loaded = Palette::from_rgb(&[[0, 0, 0], [255, 0, 0]]);
        let palette = frame_palette(WpgLevel::Level1, Some(&loaded), 1).unwrap().unwrap();
        assert_eq!(palette.get(1).unwrap().green, 0);
    }
}
