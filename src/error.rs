//! Error types for reel playback.
//!
//! All errors are fatal for the session they occur in and are never retried:
//! reels are static, immutable files, so a failed open, read, or decode cannot
//! succeed on a second attempt. One session's failure never affects any other
//! session.
//!
//! End-of-reel is *not* an error (sources signal it as `Ok(None)`), and an
//! early disconnect is an external event, reported through
//! [`EndReason::Disconnected`](crate::EndReason::Disconnected) rather than
//! through this type.
//!
//! ## Helper Constructors
//!
//! ```rust
//! use telecine::PlaybackError;
//! use std::path::PathBuf;
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such reel");
//! let open_error = PlaybackError::content_unavailable(PathBuf::from("data/intro.txt"), io_err);
//! let decode_error = PlaybackError::malformed_frame(3, "first line starts with 'x'");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for playback operations.
pub type Result<T, E = PlaybackError> = std::result::Result<T, E>;

/// Main error type for playback operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlaybackError {
    /// The selected reel could not be opened. Fatal at session opening; the
    /// session never starts.
    #[error("reel unavailable: {path}")]
    ContentUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A raw frame block carried no parseable leading timing token (or one
    /// too large to represent). Fatal wherever it occurs, including the very
    /// first frame.
    #[error("malformed frame {frame}: {details}")]
    MalformedFrame { frame: usize, details: String },

    /// Reading the reel failed mid-stream.
    #[error("reel read error: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {details}")]
    InvalidConfig { details: String },
}

impl PlaybackError {
    /// Helper constructor for open failures with path context.
    pub fn content_unavailable(path: PathBuf, source: std::io::Error) -> Self {
        PlaybackError::ContentUnavailable { path, source }
    }

    /// Helper constructor for decode failures, keyed by frame ordinal.
    pub fn malformed_frame(frame: usize, details: impl Into<String>) -> Self {
        PlaybackError::MalformedFrame { frame, details: details.into() }
    }

    /// Helper constructor for mid-stream read failures with path context.
    pub fn read_error(path: PathBuf, source: std::io::Error) -> Self {
        PlaybackError::Read { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn invalid_config(details: impl Into<String>) -> Self {
        PlaybackError::InvalidConfig { details: details.into() }
    }

    /// Returns whether this error occurred while decoding frame content, as
    /// opposed to reaching it.
    pub fn is_malformed(&self) -> bool {
        matches!(self, PlaybackError::MalformedFrame { .. })
    }
}

impl From<std::io::Error> for PlaybackError {
    fn from(err: std::io::Error) -> Self {
        PlaybackError::Read { path: PathBuf::from("<unknown>"), source: err }
    }
}
