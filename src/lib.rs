//! Per-session playback engine for pre-recorded terminal frame reels.
//!
//! Telecine turns a reel (a plain-text file of fixed-height frame blocks,
//! each led by an embedded timing token) into a paced stream of full-screen
//! frames for one terminal connection. Transport, terminal negotiation, and
//! escape-sequence rendering stay outside; the crate owns everything between
//! "connection accepted" and "session ended".
//!
//! # Features
//!
//! - **Independent Sessions**: one task, one reel handle, and one clock per
//!   connection; sessions never share state
//! - **Variable Frame Rate**: every frame carries its own duration, paced by
//!   a one-shot re-armed deadline
//! - **Fail-fast Opening**: reel selection, open, and first-frame decode
//!   complete before a session task exists
//! - **Clean Teardown**: quit, disconnect, end-of-reel, and decode failure
//!   all release resources exactly once
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use telecine::{PlaybackConfig, SessionEvent, SessionRequest, Telecine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Telecine::new(PlaybackConfig::default());
//!
//!     // One session per accepted connection
//!     let request = SessionRequest::for_identity("starwars").with_viewport(80, 24);
//!     let mut session = engine.open_session(request)?;
//!
//!     while let Some(event) = session.next_event().await {
//!         match event {
//!             SessionEvent::FrameChanged(frame) => println!("{}", frame.content()),
//!             SessionEvent::Ended(reason) => {
//!                 println!("-- playback {reason}");
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod config;
mod error;
pub mod types;

// Stream-based playback architecture
pub mod clock;
pub mod provider;
pub mod providers;
pub mod session;

// Content source modules
pub mod reel;

// Core exports
pub use config::PlaybackConfig;
pub use error::*;
pub use types::*;

// Content exports
pub use reel::ReelReader;

// Session exports
pub use clock::FrameClock;
pub use provider::FrameSource;
pub use providers::ReelSource;
pub use session::{PlaybackSession, SessionRequest};

/// Unified entry point for opening playback sessions.
///
/// Holds the deployment configuration and opens one [`PlaybackSession`] per
/// accepted connection. Configuration is explicit: construct the engine
/// with whatever [`PlaybackConfig`] the deployment needs; nothing is read
/// from process-global state.
///
/// # Examples
///
/// ```rust,no_run
/// use telecine::{PlaybackConfig, SessionRequest, Telecine};
///
/// #[tokio::main]
/// async fn main() -> telecine::Result<()> {
///     let engine = Telecine::new(PlaybackConfig::from_yaml_file("telecine.yaml")?);
///     let session = engine.open_session(SessionRequest::new())?;
///     // Hand the session to the connection's renderer...
///     # drop(session);
///     Ok(())
/// }
/// ```
pub struct Telecine {
    config: PlaybackConfig,
}

impl Telecine {
    /// Create an engine from explicit configuration.
    pub fn new(config: PlaybackConfig) -> Self {
        Self { config }
    }

    /// Create an engine with the stock configuration.
    pub fn with_defaults() -> Self {
        Self::new(PlaybackConfig::default())
    }

    /// The configuration sessions are opened with.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Open a playback session for one accepted connection.
    ///
    /// Runs the full opening sequence (reel selection, open, first-frame
    /// decode) before spawning the session task, so failures are returned
    /// here and never leak a half-started session. Must be called from
    /// within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// See [`PlaybackError`]: `ContentUnavailable` when the selected reel
    /// cannot be opened, `MalformedFrame` when its first frame does not
    /// decode, `InvalidConfig` for an invalid configuration.
    pub fn open_session(&self, request: SessionRequest) -> Result<PlaybackSession> {
        PlaybackSession::open(&self.config, request)
    }
}
