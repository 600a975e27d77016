//! Session lifecycle state machine.
//!
//! Models the full lifecycle of one playback session with explicit,
//! validated transitions instead of scattered flags.

use std::fmt;

/// The current phase of a playback session.
///
/// ```text
///  Opening ──► Playing ──► Terminated
///     │                        ▲
///     └────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SessionPhase {
    /// Reel selection, open, and first-frame decode in progress. Failure
    /// here is terminal; the session never reaches `Playing`.
    #[default]
    Opening,

    /// Frames are streaming and the clock re-arms per frame.
    Playing,

    /// Terminal state; resources released exactly once. Initial / terminal
    /// events arriving afterwards are ignored.
    Terminated,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening"),
            Self::Playing => write!(f, "Playing"),
            Self::Terminated => write!(f, "Terminated"),
        }
    }
}

impl SessionPhase {
    /// Returns `true` once the session has fully shut down.
    pub(crate) fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Transition to `Playing`.
    ///
    /// Valid from: `Opening`. Returns `false` (and leaves the phase alone)
    /// from anywhere else.
    pub(crate) fn begin_playing(&mut self) -> bool {
        match self {
            Self::Opening => {
                *self = Self::Playing;
                true
            }
            _other => false,
        }
    }

    /// Transition to `Terminated`.
    ///
    /// Valid from any phase. Returns `false` when already terminated;
    /// duplicate termination is a no-op, not an error.
    pub(crate) fn terminate(&mut self) -> bool {
        if self.is_terminated() {
            return false;
        }
        *self = Self::Terminated;
        true
    }
}
