use std::fmt;

use glam::{Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

/// Packed 0xRRGGBB color used for cosmetic collectible tinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Per-tick data supplied by whoever owns the clock.
///
/// The core never reads a wall clock itself; cosmetic animation and
/// notification expiry derive from `now_ms` so headless runs stay reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
    /// Index of the frame being produced, starting at 0.
    pub frame: u64,
    /// Milliseconds since the session started.
    pub now_ms: f64,
}

impl FrameContext {
    /// Context for frame `frame` on a fixed-rate clock of `frame_ms` per frame.
    pub fn fixed(frame: u64, frame_ms: f64) -> Self {
        Self {
            frame,
            now_ms: frame as f64 * frame_ms,
        }
    }
}

/// Distance between two points projected onto the ground (XZ) plane.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.xz().distance(b.xz())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 100.0, 4.0);
        assert_eq!(planar_distance(a, b), 5.0);
    }

    #[test]
    fn color_displays_as_hex() {
        assert_eq!(Color(0xFF0080).to_string(), "#ff0080");
        assert_eq!(Color(0x00_00ff).to_string(), "#0000ff");
    }

    #[test]
    fn fixed_clock_advances_linearly() {
        let ctx = FrameContext::fixed(60, 1000.0 / 60.0);
        assert_eq!(ctx.frame, 60);
        assert!((ctx.now_ms - 1000.0).abs() < 1e-9);
    }
}
