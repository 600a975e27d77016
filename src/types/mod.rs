//! Core types for reel playback.
//!
//! The foundational data structures of the playback engine:
//! - [`Frame`] is one decoded, displayable unit with its embedded duration
//! - [`Viewport`] tracks a session's terminal geometry
//! - [`ControlEvent`] / [`SessionEvent`] / [`EndReason`] form the event
//!   vocabulary at the adapter and renderer boundaries
//!
//! Frames are immutable after decoding and shared via `Arc`, so fan-out to a
//! renderer never copies frame content.

mod events;
mod frame;
mod viewport;

pub use events::{ControlEvent, EndReason, SessionEvent};
pub use frame::Frame;
pub use viewport::Viewport;
