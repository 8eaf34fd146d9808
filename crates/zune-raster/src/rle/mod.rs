/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Run length and XOR delta decoding
//!
//! Both generations parse control bytes through a dispatch table into
//! [`Token`]s, which are then applied to a [`ScanlineAssembler`].
use enough::Stop;
use zune_core::log::warn;

use crate::errors::RasterDecodeErrors;
pub(crate) use crate::rle::token::ByteFeed;
use crate::rle::token::{RleState, Token};
use crate::scanline::{ScanlineAssembler, ScanlineConsumer};

mod gen1;
mod gen2;
mod token;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum RleGeneration {
    First,
    Second
}

fn apply_token(
    token: Token, state: &mut RleState, feed: &mut dyn ByteFeed, asm: &mut ScanlineAssembler,
    out: &mut dyn ScanlineConsumer
) -> Result<(), RasterDecodeErrors> {
    match token {
        Token::Literal(count) => {
            for _ in 0..count {
                let byte = feed.next_byte()?;
                asm.append_byte(byte, out)?;
            }
        }
        Token::RepeatByte { value, count } | Token::Fill { value, count } => {
            for _ in 0..count {
                asm.append_byte(value, out)?;
            }
        }
        Token::RepeatSample { count } => {
            let sample = state.sample;
            let size = usize::from(state.sample_size);
            for _ in 0..count {
                asm.append_bytes(&sample[..size], out)?;
            }
        }
        Token::RepeatPreviousRow(count) => {
            asm.repeat_previous_row(count, out)?;
        }
        Token::SetSampleWidth(size) => {
            state.sample_size = size;
        }
        Token::ToggleDeltaMode => {
            if asm.row_index() == 0 {
                warn!("XOR token on the first row, previous row is all zeros");
            }
            asm.toggle_delta();
        }
    }
    Ok(())
}

/// Decode tokens until every row of `asm` is committed.
///
/// `stop` is checked whenever a token finished one or more rows.
///
/// # Errors
/// Whatever a token or the consumer raised, `RowIndexExhausted` included
/// when a run overshoots the last row
pub(crate) fn decode_rle(
    generation: RleGeneration, feed: &mut dyn ByteFeed, asm: &mut ScanlineAssembler,
    out: &mut dyn ScanlineConsumer, stop: &dyn Stop
) -> Result<(), RasterDecodeErrors> {
    let mut state = RleState::new();

    while !asm.is_complete() {
        let row = asm.row_index();
        let token = match generation {
            RleGeneration::First => gen1::next_token(&mut state, feed)?,
            RleGeneration::Second => gen2::next_token(&mut state, feed)?
        };
        apply_token(token, &mut state, feed, asm, out)?;

        if asm.row_index() != row {
            stop.check()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use enough::Unstoppable;

    use super::*;
    use crate::rle::token::tests::SliceFeed;
    use crate::scanline::tests::RowCollector;

    fn run(
        generation: RleGeneration, bytes: &[u8], row_bytes: usize, rows: usize
    ) -> (Result<(), RasterDecodeErrors>, RowCollector) {
        let mut out = RowCollector::default();
        let mut asm =
            ScanlineAssembler::new(row_bytes, rows, generation == RleGeneration::Second).unwrap();
        let mut feed = SliceFeed::new(bytes);
        let result = decode_rle(generation, &mut feed, &mut asm, &mut out, &Unstoppable);
        (result, out)
    }

    /// Minimal generation 1 literal encoder, runs of at most 127 bytes
    fn encode_literals(data: &[u8]) -> Vec<u8> {
        let mut encoded = Vec::new();
        for chunk in data.chunks(127) {
            encoded.push(chunk.len() as u8);
            encoded.extend_from_slice(chunk);
        }
        encoded
    }

    #[test]
    fn literal_runs_decode_unchanged() {
        let data = (0..=255_u8).cycle().take(300 * 4).collect::<Vec<_>>();
        let (result, out) = run(RleGeneration::First, &encode_literals(&data), 300, 4);

        result.unwrap();
        let decoded = out.rows.into_iter().flat_map(|(_, r)| r).collect::<Vec<_>>();
        assert_eq!(decoded, data);
    }

    #[test]
    fn gen1_row_repeat_fills_rows() {
        // literal row [1 2 3] then repeat three times
        let (result, out) = run(RleGeneration::First, &[0x03, 1, 2, 3, 0x00, 0x03], 3, 4);

        result.unwrap();
        assert_eq!(out.rows.len(), 4);
        assert!(out.rows.iter().all(|(_, r)| r == &[1, 2, 3]));
    }

    #[test]
    fn gen1_repeat_mid_row_aborts() {
        let (result, out) = run(RleGeneration::First, &[0x01, 9, 0x00, 0x02], 3, 2);

        assert!(matches!(
            result,
            Err(RasterDecodeErrors::MidRowRepeatViolation(0, 1))
        ));
        assert!(out.rows.is_empty());
    }

    #[test]
    fn gen1_overshoot_stops_at_last_row() {
        // 10 bytes of 0x55 into 2 rows of 3
        let (result, out) = run(RleGeneration::First, &[0x8A, 0x55], 3, 2);

        assert!(matches!(result, Err(RasterDecodeErrors::RowIndexExhausted)));
        assert_eq!(out.rows.len(), 2);
    }

    #[test]
    fn gen1_truncation_reported() {
        let (result, out) = run(RleGeneration::First, &[0x04, 1, 2], 4, 1);

        assert!(matches!(result, Err(RasterDecodeErrors::StreamTruncated)));
        assert!(out.rows.is_empty());
    }

    #[test]
    fn gen2_xor_row() {
        // row 0: NRP 2 bytes, row 1: XOR then NRP, row 2: plain NRP
        let bytes = [0x01, 0x0F, 0xF0, 0x7E, 0x01, 0xFF, 0x0F, 0x01, 0xFF, 0x0F];
        let (result, out) = run(RleGeneration::Second, &bytes, 2, 3);

        result.unwrap();
        assert_eq!(out.rows[1].1, [0xF0, 0xFF]);
        assert_eq!(out.rows[2].1, [0xFF, 0x0F]);
    }

    #[test]
    fn gen2_samples_and_row_repeat() {
        // two byte samples, REP x2, then RST x1
        let bytes = [0x7D, 0x02, 0x81, 0xAA, 0xBB, 0xFE, 0x00];
        let (result, out) = run(RleGeneration::Second, &bytes, 4, 2);

        result.unwrap();
        assert_eq!(out.rows[0].1, [0xAA, 0xBB, 0xAA, 0xBB]);
        assert_eq!(out.rows[1].1, [0xAA, 0xBB, 0xAA, 0xBB]);
    }

    #[test]
    fn gen2_fills() {
        let bytes = [0x7F, 0x01, 0xFF, 0x01];
        let (result, out) = run(RleGeneration::Second, &bytes, 2, 2);

        result.unwrap();
        assert_eq!(out.rows[0].1, [0, 0]);
        assert_eq!(out.rows[1].1, [0xFF, 0xFF]);
    }

    #[test]
    fn gen1_extended_white_run() {
        // 0x80 reads its count from the next byte, then a one byte literal
        let (result, out) = run(RleGeneration::First, &[0x80, 0x05, 0x01, 0x07], 3, 2);

        result.unwrap();
        assert_eq!(out.rows[0].1, [0xFF, 0xFF, 0xFF]);
        assert_eq!(out.rows[1].1, [0xFF, 0xFF, 0x07]);
    }

    #[test]
    fn gen2_extend_repeats_last_sample() {
        // two byte samples, REP once, then EXT twice more
        let bytes = [0x7D, 0x02, 0x80, 0xAA, 0xBB, 0xFD, 0x01];
        let (result, out) = run(RleGeneration::Second, &bytes, 6, 1);

        result.unwrap();
        assert_eq!(out.rows[0].1, [0xAA, 0xBB, 0xAA, 0xBB, 0xAA, 0xBB]);
    }

    #[test]
    fn gen2_row_repeat_mid_row_aborts() {
        // one byte of a two byte row, then RST
        let (result, out) = run(RleGeneration::Second, &[0x00, 0x11, 0xFE, 0x00], 2, 2);

        assert!(matches!(
            result,
            Err(RasterDecodeErrors::MidRowRepeatViolation(0, 1))
        ));
        assert!(out.rows.is_empty());
    }
}
