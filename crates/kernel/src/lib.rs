//! Game kernel: authoritative session state and the per-frame update.
//!
//! # Invariants
//! - All state lives in one [`GameState`]; nothing is global.
//! - The caller owns the clock and calls [`GameState::update`] once per frame.
//! - After every update the player lies inside the clamped play area.
//! - Collectibles are consumed strictly in sequence-number order.
//! - Given the same seed and input timeline, two sessions hash identically.

pub mod camera;
pub mod collectibles;
pub mod collision;
pub mod motion;
pub mod player;
pub mod world;

pub use camera::FollowCamera;
pub use collectibles::{Collectible, CollectibleSet, Pickup, SpawnError};
pub use player::Player;
pub use world::{GameEvent, GameState};

pub fn crate_info() -> &'static str {
    "gemdrive-kernel v0.1.0"
}
