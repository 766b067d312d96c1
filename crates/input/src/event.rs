use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The four steering keys. Browser key names are accepted as aliases so
/// recorded sessions can be replayed verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[serde(alias = "ArrowUp")]
    Up,
    #[serde(alias = "ArrowDown")]
    Down,
    #[serde(alias = "ArrowLeft")]
    Left,
    #[serde(alias = "ArrowRight")]
    Right,
}

impl Direction {
    /// True for the keys that drive linear velocity.
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// A raw input event as delivered by the embodiment (window, browser, script).
///
/// The kernel never sees platform events; everything funnels through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// A steering key went down (auto-repeat delivers this again).
    KeyDown(Direction),
    /// A steering key was released.
    KeyUp(Direction),
    /// Pointer pressed at the given screen coordinate.
    PointerDown(Vec2),
    /// Pointer moved to the given screen coordinate.
    PointerMove(Vec2),
    /// Pointer released.
    PointerUp,
}
