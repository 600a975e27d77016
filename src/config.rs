//! Playback configuration and reel selection

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::reel::DEFAULT_FRAME_HEIGHT;
use crate::{PlaybackError, Result};

/// Deployment configuration for the playback engine.
///
/// Passed explicitly into [`Telecine`](crate::Telecine) and from there into
/// every session; there is no process-wide mutable configuration. The
/// values are fixed for the lifetime of a session once it opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Reel played when no override applies.
    pub default_reel: PathBuf,

    /// Requester identity → alternate reel. Consulted once, at session
    /// opening.
    pub overrides: HashMap<String, PathBuf>,

    /// Lines per frame block (H).
    pub frame_height: usize,

    /// Source ticks per second, used to convert frame durations to wall
    /// time.
    pub tick_rate: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_reel: PathBuf::from("data/intro.txt"),
            overrides: HashMap::new(),
            frame_height: DEFAULT_FRAME_HEIGHT,
            tick_rate: 15.0,
        }
    }
}

impl PlaybackConfig {
    /// Load configuration from a YAML file and validate it.
    ///
    /// Absent keys fall back to their defaults, so a deployment only states
    /// what it changes.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PlaybackError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml_ng::from_str(&text).map_err(|e| {
            PlaybackError::invalid_config(format!("cannot parse {}: {e}", path.display()))
        })?;

        config.validate()?;
        debug!("Loaded playback config from {}", path.display());
        Ok(config)
    }

    /// Check invariants the rest of the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.frame_height == 0 {
            return Err(PlaybackError::invalid_config("frame_height must be at least 1"));
        }
        if !(self.tick_rate > 0.0) {
            return Err(PlaybackError::invalid_config("tick_rate must be positive"));
        }
        Ok(())
    }

    /// Select the reel for one session.
    ///
    /// A pure selection policy evaluated once at session opening: a
    /// requester identity with a configured override plays that reel,
    /// everyone else plays the default.
    pub fn select_reel(&self, identity: Option<&str>) -> &Path {
        identity
            .and_then(|id| self.overrides.get(id))
            .map(PathBuf::as_path)
            .unwrap_or(&self.default_reel)
    }
}
