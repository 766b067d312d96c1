//! Rendering adapter and frame driver.
//!
//! # Invariants
//! - Renderers and presenters read game state; they never mutate it.
//! - The driver runs the core update before anything is presented.
//! - The caller owns the clock; the driver never schedules itself.
//!
//! # Workaround
//! Ships a debug text renderer and an in-memory HUD in place of a GPU
//! backend and a DOM overlay. Both sit behind traits, so a real backend
//! plugs in without touching the core.

mod driver;
mod hud;
mod renderer;

pub use driver::FrameDriver;
pub use hud::{Hud, Notification, Presenter};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "gemdrive-render v0.1.0"
}
