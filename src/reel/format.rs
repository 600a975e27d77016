//! Reel file format and frame decoding
//!
//! A reel is a plain-text file organized as consecutive fixed-height blocks
//! of lines:
//!
//! 1. **Line 1 of each block** is `<decimal-integer><rest-of-line>`: a
//!    greedy run of leading decimal digits is the timing token (display
//!    duration in ticks); there is no delimiter between the digits and the
//!    visible content.
//! 2. **Lines 2..H** are raw displayable content, carried through
//!    unmodified.
//!
//! Decoding blanks the timing token to a single space, so the first line
//! keeps its visible content but loses the digits. A block whose first line
//! carries no parseable token is a malformed frame, never a silent
//! zero-duration frame.

use crate::types::Frame;
use crate::{PlaybackError, Result};

/// Block height used when the deployment does not configure one.
///
/// Matches the fixed screen height the stock reels were authored for.
pub const DEFAULT_FRAME_HEIGHT: usize = 14;

// Cap on quoted first-line content in decode error messages
const ERROR_PREVIEW_LEN: usize = 32;

/// One undecoded frame: exactly H consecutive lines read from a reel, plus
/// the block's ordinal within the reel (for error context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub lines: Vec<String>,
    pub index: usize,
}

/// Decode one raw block into a displayable [`Frame`].
///
/// Extracts the maximal leading run of decimal digits on the first line as
/// the timing token, parses it as a tick count, and replaces the run with a
/// single space in the emitted content. Decoding is pure: the same block
/// always yields the same frame.
///
/// # Errors
///
/// [`PlaybackError::MalformedFrame`] when the first line has no leading
/// digits, or when the digit run does not fit a `u32`.
pub fn decode_block(block: &RawBlock) -> Result<Frame> {
    let first = block.lines.first().ok_or_else(|| {
        PlaybackError::malformed_frame(block.index, "block contains no lines")
    })?;

    let digits = first.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(PlaybackError::malformed_frame(
            block.index,
            format!("no leading timing token in {:?}", preview(first)),
        ));
    }

    let duration_ticks: u32 = first[..digits].parse().map_err(|_| {
        PlaybackError::malformed_frame(
            block.index,
            format!("timing token {:?} does not fit u32", &first[..digits]),
        )
    })?;

    let mut lines = block.lines.clone();
    lines[0] = format!(" {}", &first[digits..]);

    Ok(Frame::new(lines, duration_ticks))
}

fn preview(line: &str) -> &str {
    match line.char_indices().nth(ERROR_PREVIEW_LEN) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
