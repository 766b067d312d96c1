//! Shared types and configuration consumed by every gemdrive crate.
//!
//! # Invariants
//! - Defaults are the shipped tuning; YAML overrides only what it names.
//! - `GameConfig::validate` rejects spawn layouts that cannot physically fit.

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, CollectibleSpec, ConfigError, GameConfig, PlayConfig, SpawnConfig,
};
pub use types::{Color, FrameContext, planar_distance};

pub fn crate_info() -> &'static str {
    "gemdrive-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
