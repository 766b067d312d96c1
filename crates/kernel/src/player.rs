use gemdrive_common::PlayConfig;
use gemdrive_input::Velocity;
use glam::{Quat, Vec3};

/// The car-like avatar. Created once when the model is available and never
/// destroyed during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec3,
    /// Rotation about +Y, kept in `[0, TAU)`.
    pub yaw: f32,
    pub velocity: Velocity,
    pub scale: f32,
}

impl Player {
    /// Spawn at the origin at the configured height and heading.
    pub fn spawn(config: &PlayConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.spawn_height, 0.0),
            yaw: config.initial_yaw,
            velocity: Velocity::default(),
            scale: config.car_scale,
        }
    }

    /// Orientation as a quaternion, for renderers.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}
