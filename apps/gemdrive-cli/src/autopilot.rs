use std::f32::consts::{PI, TAU};

use gemdrive_input::{Direction, InputEvent};
use gemdrive_kernel::GameState;
use glam::Vec3;

/// Heading error under which the car stops turning.
const AIM_TOLERANCE: f32 = 0.05;
/// Heading error above which the car turns in place instead of driving.
const DRIVE_CONE: f32 = 0.6;

/// Drives the car toward the next expected collectible by emitting the same
/// key events a player would.
#[derive(Debug, Default)]
pub struct Autopilot {
    forward: bool,
    turn: Option<Direction>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events for this frame. Held keys are pressed again every frame so the
    /// car pulls away after an obstacle stopped it.
    pub fn steer(&mut self, state: &GameState) -> Vec<InputEvent> {
        let target = state
            .collectibles()
            .get(state.next_expected())
            .map(|c| c.position);
        let (forward, turn) = match (state.player(), target) {
            (Some(p), Some(t)) => plan(p.position, p.yaw, t),
            _ => (false, None),
        };

        let mut events = Vec::new();
        if self.forward && !forward {
            events.push(InputEvent::KeyUp(Direction::Up));
        }
        if let Some(old) = self.turn {
            if turn != Some(old) {
                events.push(InputEvent::KeyUp(old));
            }
        }
        if forward {
            events.push(InputEvent::KeyDown(Direction::Up));
        }
        if let Some(dir) = turn {
            events.push(InputEvent::KeyDown(dir));
        }

        self.forward = forward;
        self.turn = turn;
        events
    }
}

/// Yaw that points the car's nose along `delta` on the ground plane.
pub fn heading_to(delta: Vec3) -> f32 {
    (-delta.x).atan2(-delta.z).rem_euclid(TAU)
}

/// Signed shortest rotation from `from` to `to`, in `(-PI, PI]`.
fn angle_between(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}

fn plan(position: Vec3, yaw: f32, target: Vec3) -> (bool, Option<Direction>) {
    let error = angle_between(yaw, heading_to(target - position));
    let turn = if error > AIM_TOLERANCE {
        Some(Direction::Left)
    } else if error < -AIM_TOLERANCE {
        Some(Direction::Right)
    } else {
        None
    };
    (error.abs() < DRIVE_CONE, turn)
}
