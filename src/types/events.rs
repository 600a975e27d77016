//! Session event types
//!
//! The boundary vocabulary between the core and its collaborators: control
//! events flow in from the terminal adapter, session events flow out to the
//! renderer.

use std::fmt;
use std::sync::Arc;

use super::Frame;
use crate::PlaybackError;

/// Inbound events a session accepts from the terminal I/O adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// The client terminal changed size. Updates the session viewport only;
    /// displayed content is unaffected.
    Resize { width: u16, height: u16 },

    /// The client asked to stop playback.
    Quit,
}

/// Outbound effects a session produces for the renderer.
#[derive(Debug)]
pub enum SessionEvent {
    /// The displayed frame advanced. Emitted exactly once per frame, in reel
    /// order.
    FrameChanged(Arc<Frame>),

    /// The session reached its terminal state. Always the last event; emitted
    /// exactly once.
    Ended(EndReason),
}

/// Why a session ended.
#[derive(Debug)]
pub enum EndReason {
    /// The reel played through to end-of-stream.
    Completed,

    /// The client requested quit.
    Quit,

    /// The connection was lost or the session handle was dropped.
    Disconnected,

    /// Playback hit a fatal error (malformed frame, read failure).
    Failed(PlaybackError),
}

impl EndReason {
    /// Returns `true` for error terminations, `false` for the normal and
    /// client-initiated ones.
    pub fn is_failure(&self) -> bool {
        matches!(self, EndReason::Failed(_))
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Completed => write!(f, "completed"),
            EndReason::Quit => write!(f, "quit"),
            EndReason::Disconnected => write!(f, "disconnected"),
            EndReason::Failed(err) => write!(f, "failed: {err}"),
        }
    }
}
