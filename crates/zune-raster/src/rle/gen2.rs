/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Generation 2 WordPerfect run length tokens
//!
//! Codes work on samples of `1..=8` bytes (one byte by default)
//!
//! - `0x7D` DSZ: read the new sample size
//! - `0x7E` XOR: toggle XOR against the previous row
//! - `0x7F` BLK: read `c`, emit `size * (c + 1)` zero bytes
//! - `0xFD` EXT: read `c`, emit the sample buffer `c + 1` times
//! - `0xFE` RST: read `c`, repeat the previous row `c + 1` times
//! - `0xFF` WHT: read `c`, emit `size * (c + 1)` `0xFF` bytes
//! - other codes with the high bit set, REP: read one sample, emit it `n + 1` times
//! - anything else, NRP: copy `size * (n + 1)` bytes
use crate::errors::RasterDecodeErrors;
use crate::rle::token::{ByteFeed, RleState, Token, TokenParser};

fn sample_bytes(state: &RleState, runs: u8) -> usize {
    usize::from(state.sample_size) * (usize::from(runs) + 1)
}

fn no_repeat(
    state: &mut RleState, code: u8, _: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::Literal(sample_bytes(state, code & 0x7F)))
}

fn repeat(
    state: &mut RleState, code: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    for i in 0..usize::from(state.sample_size) {
        state.sample[i] = feed.next_byte()?;
    }
    Ok(Token::RepeatSample {
        count: usize::from(code & 0x7F) + 1
    })
}

fn sample_size(
    _: &mut RleState, _: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    match feed.next_byte()? {
        size @ 1..=8 => Ok(Token::SetSampleWidth(size)),
        size => Err(RasterDecodeErrors::InvalidSampleSize(size))
    }
}

fn toggle_xor(_: &mut RleState, _: u8, _: &mut dyn ByteFeed) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::ToggleDeltaMode)
}

fn black(
    state: &mut RleState, _: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    let runs = feed.next_byte()?;
    Ok(Token::Fill {
        value: 0x00,
        count: sample_bytes(state, runs)
    })
}

fn white(
    state: &mut RleState, _: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    let runs = feed.next_byte()?;
    Ok(Token::Fill {
        value: 0xFF,
        count: sample_bytes(state, runs)
    })
}

fn extend(_: &mut RleState, _: u8, feed: &mut dyn ByteFeed) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::RepeatSample {
        count: usize::from(feed.next_byte()?) + 1
    })
}

fn repeat_row(
    _: &mut RleState, _: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::RepeatPreviousRow(usize::from(feed.next_byte()?) + 1))
}

const fn build_dispatch() -> [TokenParser; 256] {
    let mut table = [no_repeat as TokenParser; 256];

    let mut code = 0x80;
    while code < 256 {
        table[code] = repeat;
        code += 1;
    }
    table[0x7D] = sample_size;
    table[0x7E] = toggle_xor;
    table[0x7F] = black;
    table[0xFD] = extend;
    table[0xFE] = repeat_row;
    table[0xFF] = white;
    table
}

static DISPATCH: [TokenParser; 256] = build_dispatch();

/// Read one control byte and the operands it needs
pub(crate) fn next_token(
    state: &mut RleState, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    let code = feed.next_byte()?;
    DISPATCH[usize::from(code)](state, code, feed)
}
