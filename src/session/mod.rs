//! Playback sessions
//!
//! One [`PlaybackSession`] binds one frame source, one clock, and the
//! current-frame state to one client connection. Sessions are fully
//! independent: each opens its own reel handle and runs on its own task, so
//! two sessions playing the same reel each observe the full frame sequence
//! from the start.
//!
//! Opening is synchronous and fails fast: reel selection, the open, and the
//! first-frame decode all happen before a task is spawned, so a session that
//! cannot start never holds resources. Once running, the handle delivers
//! [`SessionEvent`]s in order, ending with exactly one
//! [`SessionEvent::Ended`].
//!
//! Dropping the handle (the transport's connection-loss path) cancels the
//! session; so does [`PlaybackSession::disconnect`]. Both are idempotent.

mod controller;
mod state;

use futures::Stream;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::Result;
use crate::clock::FrameClock;
use crate::config::PlaybackConfig;
use crate::provider::FrameSource;
use crate::providers::ReelSource;
use crate::types::{ControlEvent, Frame, SessionEvent, Viewport};
use controller::SessionController;

// Bounded per-session queues. Control events are small and rare; the event
// queue gives a slow renderer some slack before it backpressures playback.
const CONTROL_QUEUE: usize = 16;
const EVENT_QUEUE: usize = 32;

/// A request to start playback for one accepted connection.
#[derive(Debug, Clone, Default)]
pub struct SessionRequest {
    /// Requester identity, consulted once by the reel selection policy.
    pub identity: Option<String>,

    /// Terminal geometry at accept time.
    pub viewport: Viewport,
}

impl SessionRequest {
    /// Request with no identity and default geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request on behalf of a named requester.
    pub fn for_identity(identity: impl Into<String>) -> Self {
        Self { identity: Some(identity.into()), ..Self::default() }
    }

    /// Set the initial terminal geometry.
    pub fn with_viewport(mut self, width: u16, height: u16) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }
}

/// Handle to one live playback session.
///
/// The handle is the session's connection-side face: the transport adapter
/// forwards resizes and quits through it and the renderer consumes events
/// from it. Dropping it cancels the session.
#[derive(Debug)]
pub struct PlaybackSession {
    control: mpsc::Sender<ControlEvent>,
    events: mpsc::Receiver<SessionEvent>,
    viewport: watch::Receiver<Viewport>,
    cancel: CancellationToken,
}

impl PlaybackSession {
    /// Open a session: select the reel, open it, decode the first frame,
    /// and hand playback off to its own task.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::ContentUnavailable`](crate::PlaybackError::ContentUnavailable)
    /// when the selected reel cannot be opened,
    /// [`PlaybackError::MalformedFrame`](crate::PlaybackError::MalformedFrame)
    /// when its first frame does not decode, and
    /// [`PlaybackError::InvalidConfig`](crate::PlaybackError::InvalidConfig)
    /// for a configuration that fails validation. All are terminal: the
    /// session never starts and no resources remain held.
    pub(crate) fn open(config: &PlaybackConfig, request: SessionRequest) -> Result<Self> {
        config.validate()?;

        let path = config.select_reel(request.identity.as_deref());
        info!(
            "Opening session for {} with reel {}",
            request.identity.as_deref().unwrap_or("<anonymous>"),
            path.display()
        );

        let mut source = ReelSource::open(path, config.frame_height)?;
        // An empty reel decodes to no first frame: a valid session that
        // completes immediately rather than an error.
        let first = source.read_next()?;

        Ok(Self::spawn(
            Box::new(source),
            first,
            FrameClock::new(config.tick_rate),
            request.viewport,
        ))
    }

    /// Bind an opened source and its first frame to a new session task.
    pub(crate) fn spawn(
        source: Box<dyn FrameSource>,
        first: Option<Frame>,
        clock: FrameClock,
        viewport: Viewport,
    ) -> Self {
        let (control_tx, control_rx) = mpsc::channel(CONTROL_QUEUE);
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE);
        let (viewport_tx, viewport_rx) = watch::channel(viewport);
        let cancel = CancellationToken::new();

        let controller = SessionController::new(
            source,
            first,
            clock,
            event_tx,
            control_rx,
            viewport_tx,
            cancel.clone(),
        );
        tokio::spawn(controller.run());

        Self { control: control_tx, events: event_rx, viewport: viewport_rx, cancel }
    }

    /// Receive the next outbound event.
    ///
    /// Events arrive in playback order; the final one is always
    /// [`SessionEvent::Ended`], after which this returns `None`.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Notify the session of a terminal resize. Updates the viewport only;
    /// displayed content is never affected.
    pub async fn resize(&self, width: u16, height: u16) {
        let _ = self.control.send(ControlEvent::Resize { width, height }).await;
    }

    /// Ask the session to stop playback gracefully. Duplicate quits are
    /// no-ops.
    pub async fn quit(&self) {
        let _ = self.control.send(ControlEvent::Quit).await;
    }

    /// Force immediate termination, as on connection loss. Idempotent and
    /// safe at any point in the session lifecycle.
    pub fn disconnect(&self) {
        self.cancel.cancel();
    }

    /// Current viewport dimensions.
    pub fn viewport(&self) -> Viewport {
        *self.viewport.borrow()
    }

    /// Viewport updates as a latest-wins stream, for renderers that redraw
    /// on resize.
    pub fn viewport_stream(&self) -> impl Stream<Item = Viewport> + use<> {
        WatchStream::new(self.viewport.clone())
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        debug!("Dropping playback session handle");
        self.cancel.cancel();
    }
}
