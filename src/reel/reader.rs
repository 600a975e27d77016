//! Reel file reader
//!
//! Sequential, block-at-a-time access to a reel on disk. The reader is the
//! frame source for one session: it is opened per session, never shared, and
//! buffers nothing beyond the block currently being read. There is no seek
//! and no rewind; reopening the file is the only way to restart.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use telecine::reel::{ReelReader, decode_block};
//!
//! fn play_through() -> telecine::Result<()> {
//!     let mut reader = ReelReader::open("data/intro.txt", 14)?;
//!
//!     while let Some(block) = reader.next_block()? {
//!         let frame = decode_block(&block)?;
//!         println!("frame {} holds for {} ticks", block.index, frame.duration_ticks);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::format::RawBlock;
use crate::{PlaybackError, Result};

/// Line-oriented reel reader producing raw frame blocks.
#[derive(Debug)]
pub struct ReelReader {
    lines: Lines<BufReader<File>>,
    path: PathBuf,
    frame_height: usize,
    blocks_read: usize,
}

impl ReelReader {
    /// Open a reel file for sequential block reading.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::ContentUnavailable`] when the file cannot be opened,
    /// [`PlaybackError::InvalidConfig`] when `frame_height` is zero.
    pub fn open<P: AsRef<Path>>(path: P, frame_height: usize) -> Result<Self> {
        if frame_height == 0 {
            return Err(PlaybackError::invalid_config("frame_height must be at least 1"));
        }

        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PlaybackError::content_unavailable(path.to_path_buf(), e))?;

        debug!("Opened reel {} ({} lines per block)", path.display(), frame_height);

        Ok(Self {
            lines: BufReader::new(file).lines(),
            path: path.to_path_buf(),
            frame_height,
            blocks_read: 0,
        })
    }

    /// Read the next raw frame block.
    ///
    /// Reads exactly `frame_height` lines. Returns `Ok(None)` at end of
    /// stream; a trailing fragment shorter than one block is discarded rather
    /// than returned as a partial frame.
    pub fn next_block(&mut self) -> Result<Option<RawBlock>> {
        let mut lines = Vec::with_capacity(self.frame_height);

        for _ in 0..self.frame_height {
            match self.lines.next() {
                Some(Ok(line)) => lines.push(line),
                Some(Err(e)) => return Err(PlaybackError::read_error(self.path.clone(), e)),
                None => {
                    if !lines.is_empty() {
                        debug!(
                            "Reel {} ends with a {}-line fragment; discarding",
                            self.path.display(),
                            lines.len()
                        );
                    }
                    return Ok(None);
                }
            }
        }

        let index = self.blocks_read;
        self.blocks_read += 1;
        trace!("Read block {} from {}", index, self.path.display());

        Ok(Some(RawBlock { lines, index }))
    }

    /// The reel path this reader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of complete blocks read so far.
    pub fn blocks_read(&self) -> usize {
        self.blocks_read
    }
}
