//! Reel-backed frame source

use std::path::Path;
use tracing::{debug, info};

use crate::Result;
use crate::provider::FrameSource;
use crate::reel::{ReelReader, decode_block};
use crate::types::Frame;

/// Frame source reading and decoding frames from a reel file.
///
/// Owns the underlying [`ReelReader`] exclusively; two sessions playing the
/// same reel each open their own source and advance independently.
pub struct ReelSource {
    reader: ReelReader,
    frame_height: usize,
}

impl ReelSource {
    /// Open a reel file as a frame source.
    pub fn open<P: AsRef<Path>>(path: P, frame_height: usize) -> Result<Self> {
        let reader = ReelReader::open(path, frame_height)?;
        info!("Opened reel source {}", reader.path().display());
        Ok(Self { reader, frame_height })
    }

    /// Read and decode the next frame without suspending.
    ///
    /// The synchronous core of [`FrameSource::next_frame`]; session opening
    /// uses it directly to decode the first frame before any task is spawned.
    pub fn read_next(&mut self) -> Result<Option<Frame>> {
        match self.reader.next_block()? {
            Some(block) => decode_block(&block).map(Some),
            None => {
                debug!(
                    "Reel {} ended after {} frames",
                    self.reader.path().display(),
                    self.reader.blocks_read()
                );
                Ok(None)
            }
        }
    }

    /// Number of frames decoded so far.
    pub fn frames_read(&self) -> usize {
        self.reader.blocks_read()
    }

    /// The reel path backing this source.
    pub fn path(&self) -> &Path {
        self.reader.path()
    }
}

#[async_trait::async_trait]
impl FrameSource for ReelSource {
    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        self.read_next()
    }

    fn frame_height(&self) -> usize {
        self.frame_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaybackError;
    use anyhow::{Context, Result, ensure};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn reel_file(contents: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new().context("creating temp reel")?;
        file.write_all(contents.as_bytes()).context("writing temp reel")?;
        Ok(file)
    }

    #[tokio::test]
    async fn plays_the_two_block_scenario_in_order() -> Result<()> {
        let file = reel_file("3 hello\nworld\n1 bye\nnow\n")?;
        let mut source = ReelSource::open(file.path(), 2)?;
        ensure!(source.frame_height() == 2);

        let first = source.next_frame().await?.expect("first frame");
        ensure!(first.lines.as_ref() == &[" hello".to_string(), "world".to_string()][..]);
        ensure!(first.duration_ticks == 3);

        let second = source.next_frame().await?.expect("second frame");
        ensure!(second.lines.as_ref() == &[" bye".to_string(), "now".to_string()][..]);
        ensure!(second.duration_ticks == 1);

        ensure!(source.next_frame().await?.is_none(), "expected end of stream");
        ensure!(source.frames_read() == 2);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_block_surfaces_as_decode_error() -> Result<()> {
        let file = reel_file("3 fine\nart\nbroken\nframe\n")?;
        let mut source = ReelSource::open(file.path(), 2)?;

        ensure!(source.next_frame().await?.is_some());
        let err = source.next_frame().await.unwrap_err();
        ensure!(matches!(err, PlaybackError::MalformedFrame { frame: 1, .. }), "got {err}");
        Ok(())
    }

    #[test]
    fn first_frame_is_available_synchronously() -> Result<()> {
        let file = reel_file("5 title\ncard\n")?;
        let mut source = ReelSource::open(file.path(), 2)?;

        let frame = source.read_next()?.expect("first frame");
        ensure!(frame.duration_ticks == 5);
        Ok(())
    }
}
