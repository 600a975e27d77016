//! Frame source trait for playback sessions

use crate::Result;
use crate::types::Frame;

/// Trait for session frame sources
///
/// Sources abstract over where decoded frames come from (reel files today,
/// scripted sources in tests) so the session controller can be driven
/// against any of them. One source instance belongs to exactly one session;
/// sources are not shared.
#[async_trait::async_trait]
pub trait FrameSource: Send + 'static {
    /// Decode and return the next frame
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - next frame in content order
    /// - `Ok(None)` - end of stream (normal termination)
    /// - `Err(e)` - fatal read/decode error for this session
    ///
    /// Sources do not pace playback; the session's
    /// [`FrameClock`](crate::clock::FrameClock) owns timing, so this method
    /// is expected to complete promptly.
    async fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Fixed block height of this source's frames
    fn frame_height(&self) -> usize;
}
