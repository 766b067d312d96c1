//! Input: directional keys mapped onto player velocity, pointer drags mapped
//! onto camera deltas, and scripted input timelines for headless runs.
//!
//! # Invariants
//! - Key handling never reads or writes position, only velocity.
//! - The two velocity axes are independent; releasing one never touches the other.
//! - Pointer moves outside an active drag produce nothing.

pub mod drag;
pub mod event;
pub mod script;
pub mod state;

pub use drag::DragTracker;
pub use event::{Direction, InputEvent};
pub use script::{InputScript, ScriptError, ScriptedInput};
pub use state::{KeyBindings, Velocity};

pub fn crate_info() -> &'static str {
    "gemdrive-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
