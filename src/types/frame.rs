//! Decoded frame type for the per-session playback pipeline

use std::sync::Arc;

/// One fully decoded, displayable unit of output.
///
/// This is the fundamental data unit that flows through the system: exactly
/// `frame_height` lines of text plus the number of ticks the frame stays on
/// screen. Frames are immutable once produced by the codec and are shared
/// with renderers via `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Displayable lines, exactly one reel block high (zero-copy via Arc)
    pub lines: Arc<[String]>,

    /// Display duration in source ticks (tick length is a session constant)
    pub duration_ticks: u32,
}

impl Frame {
    /// Create a new frame from decoded lines.
    pub fn new(lines: Vec<String>, duration_ticks: u32) -> Self {
        Self { lines: lines.into(), duration_ticks }
    }

    /// Number of lines in this frame.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// The frame as a single string, lines joined by `\n` with no trailing
    /// newline.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}
