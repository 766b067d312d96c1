use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::event::Direction;

/// The player's velocity, shared between key handling and collision.
///
/// Only `linear.z` is ever driven by keys; collision may zero the whole vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Units per frame in the player's local frame.
    pub linear: Vec3,
    /// Radians per frame about +Y.
    pub angular: f32,
}

impl Velocity {
    pub fn stop(&mut self) {
        self.linear = Vec3::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.linear != Vec3::ZERO
    }
}

/// Maps steering keys onto velocity.
///
/// No debouncing and no arbitration: the last key-down on an axis wins, and
/// releasing either key of an axis zeroes that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBindings {
    pub move_speed: f32,
    pub rotation_speed: f32,
}

impl KeyBindings {
    pub fn new(move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            move_speed,
            rotation_speed,
        }
    }

    pub fn key_down(&self, key: Direction, velocity: &mut Velocity) {
        match key {
            // Forward is -z in the player's local frame.
            Direction::Up => velocity.linear.z = -self.move_speed,
            Direction::Down => velocity.linear.z = self.move_speed,
            Direction::Left => velocity.angular = self.rotation_speed,
            Direction::Right => velocity.angular = -self.rotation_speed,
        }
    }

    pub fn key_up(&self, key: Direction, velocity: &mut Velocity) {
        if key.is_linear() {
            velocity.linear.z = 0.0;
        } else {
            velocity.angular = 0.0;
        }
    }
}
