/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Generation 1 WordPerfect run length tokens
//!
//! Each control byte `b` splits into the high bit and `n = b & 0x7F`
//!
//! | high bit | n      | meaning                                      |
//! |----------|--------|----------------------------------------------|
//! | set      | != 0   | read a byte, emit it `n` times               |
//! | set      | 0      | read `m`, emit `0xFF` `m` times              |
//! | clear    | != 0   | copy the next `n` bytes                      |
//! | clear    | 0      | read `m`, repeat the previous row `m` times  |
use crate::errors::RasterDecodeErrors;
use crate::rle::token::{ByteFeed, RleState, Token, TokenParser};

fn literal(_: &mut RleState, code: u8, _: &mut dyn ByteFeed) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::Literal(usize::from(code & 0x7F)))
}

fn repeat_row(
    _: &mut RleState, _: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::RepeatPreviousRow(usize::from(feed.next_byte()?)))
}

fn repeat_byte(
    _: &mut RleState, code: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::RepeatByte {
        value: feed.next_byte()?,
        count: usize::from(code & 0x7F)
    })
}

fn white_run(
    _: &mut RleState, _: u8, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    Ok(Token::Fill {
        value: 0xFF,
        count: usize::from(feed.next_byte()?)
    })
}

/// Indexed by `(high bit << 1) | (n == 0)`
static DISPATCH: [TokenParser; 4] = [literal, repeat_row, repeat_byte, white_run];

/// Read one control byte and the operands it needs
pub(crate) fn next_token(
    state: &mut RleState, feed: &mut dyn ByteFeed
) -> Result<Token, RasterDecodeErrors> {
    let code = feed.next_byte()?;
    let index = (usize::from(code >> 7) << 1) | usize::from(code & 0x7F == 0);

    DISPATCH[index](state, code, feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rle::token::tests::SliceFeed;

    fn tokens(bytes: &[u8]) -> alloc::vec::Vec<Token> {
        let mut feed = SliceFeed::new(bytes);
        let mut state = RleState::new();
        let mut out = alloc::vec::Vec::new();
        while feed.position < feed.bytes.len() {
            out.push(next_token(&mut state, &mut feed).unwrap());
        }
        out
    }

    #[test]
    fn control_bytes_select_tokens() {
        assert_eq!(
            tokens(&[0x83, 0x42, 0x80, 0x05, 0x02, 0x00, 0x03]),
            [
                Token::RepeatByte { value: 0x42, count: 3 },
                Token::Fill { value: 0xFF, count: 5 },
                Token::Literal(2),
                Token::RepeatPreviousRow(3)
            ]
        );
    }

    #[test]
    fn missing_operand_is_truncation() {
        let mut feed = SliceFeed::new(&[0x81]);
        assert!(matches!(
            next_token(&mut RleState::new(), &mut feed),
            Err(RasterDecodeErrors::StreamTruncated)
        ));
    }
}
