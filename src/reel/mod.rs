//! Reel content: the on-disk format and its reader.
//!
//! A reel is the unit of content selection: one plain-text file holding a
//! flat sequence of fixed-height frame blocks. [`ReelReader`] reads one block
//! at a time with no look-ahead; [`decode_block`] turns a block into a
//! displayable [`Frame`](crate::Frame) by parsing and blanking the embedded
//! timing token.

mod format;
mod reader;

pub use format::{DEFAULT_FRAME_HEIGHT, RawBlock, decode_block};
pub use reader::ReelReader;
