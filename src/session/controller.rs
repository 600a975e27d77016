//! Session controller task
//!
//! One spawned task per session owns the frame source, the clock, and the
//! current phase. Every external input (cancellation, control events, the
//! clock firing) arrives through one `select!` loop, so session state is
//! never observed or mutated from two places at once and no locking is
//! needed inside a session.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::state::SessionPhase;
use crate::clock::FrameClock;
use crate::provider::FrameSource;
use crate::types::{ControlEvent, EndReason, Frame, SessionEvent, Viewport};

/// What woke the controller loop.
enum Wake {
    Cancelled,
    Control(Option<ControlEvent>),
    TimerFired,
}

pub(crate) struct SessionController {
    source: Box<dyn FrameSource>,
    first: Option<Frame>,
    clock: FrameClock,
    phase: SessionPhase,
    events: mpsc::Sender<SessionEvent>,
    control: mpsc::Receiver<ControlEvent>,
    viewport: watch::Sender<Viewport>,
    cancel: CancellationToken,
    frames_emitted: u64,
}

impl SessionController {
    pub(crate) fn new(
        source: Box<dyn FrameSource>,
        first: Option<Frame>,
        clock: FrameClock,
        events: mpsc::Sender<SessionEvent>,
        control: mpsc::Receiver<ControlEvent>,
        viewport: watch::Sender<Viewport>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            first,
            clock,
            phase: SessionPhase::Opening,
            events,
            control,
            viewport,
            cancel,
            frames_emitted: 0,
        }
    }

    pub(crate) async fn run(mut self) {
        debug!("Session controller started");

        // The first frame was decoded during opening; an empty reel is a
        // completed session with no frames.
        match self.first.take() {
            Some(frame) => {
                self.phase.begin_playing();
                self.clock.arm(frame.duration_ticks);
                if !self.emit_frame(frame).await {
                    return self.finish(EndReason::Disconnected).await;
                }
            }
            None => return self.finish(EndReason::Completed).await,
        }

        loop {
            let wake = tokio::select! {
                _ = self.cancel.cancelled() => Wake::Cancelled,
                ctl = self.control.recv() => Wake::Control(ctl),
                _ = self.clock.expired() => Wake::TimerFired,
            };

            match wake {
                Wake::Cancelled => return self.finish(EndReason::Disconnected).await,

                // A closed control channel means every handle is gone
                Wake::Control(None) => return self.finish(EndReason::Disconnected).await,

                Wake::Control(Some(ControlEvent::Quit)) => {
                    return self.finish(EndReason::Quit).await;
                }

                Wake::Control(Some(ControlEvent::Resize { width, height })) => {
                    trace!("Viewport resized to {}x{}", width, height);
                    self.viewport.send_replace(Viewport { width, height });
                }

                Wake::TimerFired => match self.source.next_frame().await {
                    Ok(Some(frame)) => {
                        self.clock.arm(frame.duration_ticks);
                        if !self.emit_frame(frame).await {
                            return self.finish(EndReason::Disconnected).await;
                        }
                    }
                    Ok(None) => return self.finish(EndReason::Completed).await,
                    Err(e) => {
                        warn!("Session playback failed: {e}");
                        return self.finish(EndReason::Failed(e)).await;
                    }
                },
            }
        }
    }

    /// Send one frame to the renderer. Returns `false` when the event
    /// receiver is gone, which the caller treats as a disconnect.
    async fn emit_frame(&mut self, frame: Frame) -> bool {
        self.frames_emitted += 1;
        trace!("Frame {} on screen for {} ticks", self.frames_emitted, frame.duration_ticks);
        self.events.send(SessionEvent::FrameChanged(Arc::new(frame))).await.is_ok()
    }

    /// Tear the session down: disarm the clock, release the source, then
    /// emit the terminal event. The phase machine makes re-entry a no-op.
    async fn finish(mut self, reason: EndReason) {
        if !self.phase.terminate() {
            return;
        }

        self.clock.disarm();
        drop(self.source);

        info!("Session ended ({reason}) after {} frames", self.frames_emitted);
        let _ = self.events.send(SessionEvent::Ended(reason)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlaybackError, Result};
    use std::collections::VecDeque;

    /// Scripted frame source for driving the controller without files.
    struct ScriptedSource {
        script: VecDeque<Result<Option<Frame>>>,
    }

    impl ScriptedSource {
        fn of(script: Vec<Result<Option<Frame>>>) -> Box<Self> {
            Box::new(Self { script: script.into() })
        }
    }

    #[async_trait::async_trait]
    impl FrameSource for ScriptedSource {
        async fn next_frame(&mut self) -> Result<Option<Frame>> {
            self.script.pop_front().unwrap_or(Ok(None))
        }

        fn frame_height(&self) -> usize {
            2
        }
    }

    fn frame(text: &str, ticks: u32) -> Frame {
        Frame::new(vec![text.to_string(), String::new()], ticks)
    }

    struct Harness {
        events: mpsc::Receiver<SessionEvent>,
        control: mpsc::Sender<ControlEvent>,
        cancel: CancellationToken,
    }

    fn spawn_controller(first: Option<Frame>, script: Vec<Result<Option<Frame>>>) -> Harness {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (control_tx, control_rx) = mpsc::channel(16);
        let (viewport_tx, _viewport_rx) = watch::channel(Viewport::default());
        let cancel = CancellationToken::new();

        let controller = SessionController::new(
            ScriptedSource::of(script),
            first,
            FrameClock::new(15.0),
            event_tx,
            control_rx,
            viewport_tx,
            cancel.clone(),
        );
        tokio::spawn(controller.run());

        Harness { events: event_rx, control: control_tx, cancel }
    }

    #[tokio::test(start_paused = true)]
    async fn plays_all_frames_then_completes() {
        let mut h = spawn_controller(
            Some(frame("one", 1)),
            vec![Ok(Some(frame("two", 2))), Ok(Some(frame("three", 1))), Ok(None)],
        );

        let mut seen = Vec::new();
        while let Some(event) = h.events.recv().await {
            match event {
                SessionEvent::FrameChanged(f) => seen.push(f.lines[0].clone()),
                SessionEvent::Ended(reason) => {
                    assert!(matches!(reason, EndReason::Completed), "got {reason}");
                    break;
                }
            }
        }
        assert_eq!(seen, vec!["one", "two", "three"]);
        assert!(h.events.recv().await.is_none(), "Ended is the final event");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_source_completes_with_no_frames() {
        let mut h = spawn_controller(None, vec![]);

        match h.events.recv().await {
            Some(SessionEvent::Ended(EndReason::Completed)) => {}
            other => panic!("expected immediate completion, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn quit_ends_the_session_without_more_frames() {
        let mut h = spawn_controller(
            // A frame long enough that quit always lands before the timer
            Some(frame("held", 100_000)),
            vec![Ok(Some(frame("never shown", 1)))],
        );

        match h.events.recv().await {
            Some(SessionEvent::FrameChanged(f)) => assert_eq!(f.lines[0], "held"),
            other => panic!("expected the first frame, got {other:?}"),
        }

        h.control.send(ControlEvent::Quit).await.unwrap();
        match h.events.recv().await {
            Some(SessionEvent::Ended(EndReason::Quit)) => {}
            other => panic!("expected quit termination, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_reports_a_disconnect() {
        let mut h = spawn_controller(Some(frame("held", 100_000)), vec![]);

        match h.events.recv().await {
            Some(SessionEvent::FrameChanged(_)) => {}
            other => panic!("expected the first frame, got {other:?}"),
        }

        h.cancel.cancel();
        match h.events.recv().await {
            Some(SessionEvent::Ended(EndReason::Disconnected)) => {}
            other => panic!("expected disconnect termination, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn source_error_fails_the_session() {
        let mut h = spawn_controller(
            Some(frame("one", 1)),
            vec![Err(PlaybackError::malformed_frame(1, "no digits"))],
        );

        match h.events.recv().await {
            Some(SessionEvent::FrameChanged(_)) => {}
            other => panic!("expected the first frame, got {other:?}"),
        }

        match h.events.recv().await {
            Some(SessionEvent::Ended(EndReason::Failed(err))) => assert!(err.is_malformed()),
            other => panic!("expected failure termination, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resize_never_changes_displayed_content() {
        let mut h = spawn_controller(Some(frame("held", 100_000)), vec![]);

        match h.events.recv().await {
            Some(SessionEvent::FrameChanged(f)) => assert_eq!(f.lines[0], "held"),
            other => panic!("expected the first frame, got {other:?}"),
        }

        for i in 1..=5u16 {
            h.control.send(ControlEvent::Resize { width: 80 + i, height: 24 }).await.unwrap();
        }

        // Quit to flush the loop; no FrameChanged may have been emitted by
        // the resizes.
        h.control.send(ControlEvent::Quit).await.unwrap();
        match h.events.recv().await {
            Some(SessionEvent::Ended(EndReason::Quit)) => {}
            other => panic!("resize produced an unexpected event: {other:?}"),
        }
    }
}
