//! Terminal viewport dimensions

/// Terminal viewport dimensions for one session.
///
/// Updated by resize events from the terminal adapter; never consulted by the
/// codec (frame parsing is viewport-independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Conventional terminal geometry when the adapter reports nothing
        Self { width: 80, height: 24 }
    }
}
