//! Timed input timelines for headless sessions.
//!
//! A script is a YAML list of `{ frame, event }` entries:
//!
//! ```yaml
//! - frame: 0
//!   event: { key_down: up }
//! - frame: 40
//!   event: { key_up: up }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::event::InputEvent;

/// Errors from loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One event scheduled for a specific frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub frame: u64,
    pub event: InputEvent,
}

/// Input timeline ordered by frame. Events sharing a frame keep file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    entries: Vec<ScriptedInput>,
}

impl InputScript {
    pub fn new(mut entries: Vec<ScriptedInput>) -> Self {
        // Stable sort keeps same-frame events in authored order.
        entries.sort_by_key(|e| e.frame);
        Self { entries }
    }

    pub fn from_yaml(text: &str) -> Result<Self, ScriptError> {
        let entries: Vec<ScriptedInput> = serde_yaml::from_str(text)?;
        tracing::debug!(events = entries.len(), "parsed input script");
        Ok(Self::new(entries))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Events scheduled for `frame`, in authored order.
    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = InputEvent> + '_ {
        let start = self.entries.partition_point(|e| e.frame < frame);
        self.entries[start..]
            .iter()
            .take_while(move |e| e.frame == frame)
            .map(|e| e.event)
    }

    /// Frame of the last scheduled event, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.entries.last().map(|e| e.frame)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
