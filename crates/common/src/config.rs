//! Game tuning. Every field has a default, so a YAML file only needs to
//! mention the values it overrides.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

use crate::types::Color;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for one play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub play: PlayConfig,
    pub camera: CameraConfig,
    pub spawn: SpawnConfig,
    /// Cosmetic presets, cycled over the spawned collectibles in order.
    pub collectibles: Vec<CollectibleSpec>,
}

/// Player motion, world bounds and obstacle layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Units per frame while forward/back is held.
    pub move_speed: f32,
    /// Radians per frame while left/right is held.
    pub rotation_speed: f32,
    pub car_scale: f32,
    /// Edge length of the square play area, centered on the origin.
    pub plane_size: f32,
    /// Distance kept between the player and the plane edge.
    pub boundary_margin: f32,
    pub spawn_height: f32,
    pub initial_yaw: f32,
    /// Planar distance under which an obstacle stops the player.
    pub collision_distance: f32,
    pub obstacles: Vec<Vec3>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.2,
            rotation_speed: 0.05,
            car_scale: 1.0,
            plane_size: 40.0,
            boundary_margin: 1.0,
            spawn_height: 0.5,
            initial_yaw: PI,
            collision_distance: 1.5,
            obstacles: vec![
                Vec3::new(5.0, 0.5, 5.0),
                Vec3::new(-5.0, 0.5, -5.0),
                Vec3::new(10.0, 0.5, -10.0),
                Vec3::new(-10.0, 0.5, 10.0),
            ],
        }
    }
}

impl PlayConfig {
    /// Largest absolute x or z the player may reach.
    pub fn boundary_limit(&self) -> f32 {
        self.plane_size / 2.0 - self.boundary_margin
    }
}

/// Follow camera tuning and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub follow_height: f32,
    pub follow_distance: f32,
    /// Fraction of the remaining gap closed each follow-mode frame.
    pub smoothing: f32,
    /// Rotation about the local X axis applied to the follow offset (radians).
    pub tilt: f32,
    /// Added to the player yaw when orbiting the follow offset (radians).
    pub angle_offset: f32,
    /// Look-at point sits this far above the player.
    pub look_height: f32,
    /// World units per pointer pixel while dragging.
    pub drag_speed: f32,
    pub min_drag_height: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub initial_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_height: 4.0,
            follow_distance: 10.0,
            smoothing: 0.1,
            tilt: -0.2,
            angle_offset: 0.0,
            look_height: 1.0,
            drag_speed: 0.01,
            min_drag_height: 2.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            initial_position: Vec3::new(0.0, 5.0, 10.0),
        }
    }
}

/// Collectible placement and pickup rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub count: u32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub height: f32,
    /// Minimum planar distance between two collectibles of one batch.
    pub min_separation: f32,
    /// Rejection-sampling attempts allowed per collectible.
    pub max_attempts: u32,
    pub pickup_radius: f32,
    /// How long a "collected" notification stays on screen.
    pub notification_ms: u64,
    /// Resting height the bob animation oscillates around.
    pub bob_base_height: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 5,
            min_radius: 5.0,
            max_radius: 15.0,
            height: 0.5,
            min_separation: 3.0,
            max_attempts: 1000,
            pickup_radius: 1.0,
            notification_ms: 3000,
            bob_base_height: 0.75,
        }
    }
}

/// Cosmetic preset for one collectible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectibleSpec {
    pub id: String,
    pub color: Color,
    pub scale: f32,
    pub rotation_speed: f32,
    pub bounce_height: f32,
    pub bounce_speed: f32,
}

impl CollectibleSpec {
    fn preset(
        id: &str,
        scale: f32,
        rotation_speed: f32,
        bounce_height: f32,
        bounce_speed: f32,
    ) -> Self {
        Self {
            id: id.into(),
            color: Color(0xFF6B6B),
            scale,
            rotation_speed,
            bounce_height,
            bounce_speed,
        }
    }

    /// The five gem/crystal presets shipped with the demo.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::preset("gem_red", 0.5, 0.02, 0.2, 0.003),
            Self::preset("gem_blue", 0.6, 0.03, 0.3, 0.004),
            Self::preset("gem_green", 0.4, 0.01, 0.15, 0.002),
            Self::preset("crystal_purple", 0.7, 0.015, 0.25, 0.0035),
            Self::preset("crystal_gold", 0.45, 0.025, 0.22, 0.0025),
        ]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play: PlayConfig::default(),
            camera: CameraConfig::default(),
            spawn: SpawnConfig::default(),
            collectibles: CollectibleSpec::defaults(),
        }
    }
}

impl GameConfig {
    /// Default tuning with the stock collectible presets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document. Missing sections fall back to defaults; an
    /// absent `collectibles` list gets the stock presets.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(text)?;
        if config.collectibles.is_empty() {
            config.collectibles = CollectibleSpec::defaults();
        }
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Reject tunings the simulation cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        let (play, camera, spawn) = (&self.play, &self.camera, &self.spawn);
        let scalars = [
            ("play.move_speed", play.move_speed),
            ("play.rotation_speed", play.rotation_speed),
            ("play.car_scale", play.car_scale),
            ("play.plane_size", play.plane_size),
            ("play.boundary_margin", play.boundary_margin),
            ("play.spawn_height", play.spawn_height),
            ("play.initial_yaw", play.initial_yaw),
            ("play.collision_distance", play.collision_distance),
            ("camera.follow_height", camera.follow_height),
            ("camera.follow_distance", camera.follow_distance),
            ("camera.smoothing", camera.smoothing),
            ("camera.tilt", camera.tilt),
            ("camera.angle_offset", camera.angle_offset),
            ("camera.look_height", camera.look_height),
            ("camera.drag_speed", camera.drag_speed),
            ("camera.min_drag_height", camera.min_drag_height),
            ("camera.fov_degrees", camera.fov_degrees),
            ("camera.near", camera.near),
            ("camera.far", camera.far),
            ("spawn.min_radius", spawn.min_radius),
            ("spawn.max_radius", spawn.max_radius),
            ("spawn.height", spawn.height),
            ("spawn.min_separation", spawn.min_separation),
            ("spawn.pickup_radius", spawn.pickup_radius),
            ("spawn.bob_base_height", spawn.bob_base_height),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }
        let mut positions = play
            .obstacles
            .iter()
            .chain(std::iter::once(&camera.initial_position));
        if positions.any(|v| !v.is_finite()) {
            return invalid("obstacle and camera positions must be finite".into());
        }
        let preset_ok = |c: &CollectibleSpec| {
            [c.scale, c.rotation_speed, c.bounce_height, c.bounce_speed]
                .iter()
                .all(|v| v.is_finite())
        };
        if let Some(c) = self.collectibles.iter().find(|c| !preset_ok(c)) {
            return invalid(format!("collectible preset {} has a non-finite value", c.id));
        }

        if self.play.boundary_limit() <= 0.0 {
            return invalid(format!(
                "plane_size {} leaves no room inside a margin of {}",
                self.play.plane_size, self.play.boundary_margin
            ));
        }
        if self.play.move_speed < 0.0 || self.play.rotation_speed < 0.0 {
            return invalid("move_speed and rotation_speed must be non-negative".into());
        }
        if !(self.camera.smoothing > 0.0 && self.camera.smoothing <= 1.0) {
            return invalid(format!(
                "camera smoothing {} must lie in (0, 1]",
                self.camera.smoothing
            ));
        }
        if spawn.min_radius < 0.0 || spawn.min_radius >= spawn.max_radius {
            return invalid(format!(
                "spawn annulus [{}, {}) is empty",
                spawn.min_radius, spawn.max_radius
            ));
        }
        if spawn.max_attempts == 0 {
            return invalid("spawn max_attempts must be at least 1".into());
        }
        if spawn.count > 0 && self.collectibles.is_empty() {
            return invalid("at least one collectible preset is required".into());
        }

        // Disks of radius sep/2 around each point cannot overlap, and each one
        // lies inside the annulus grown by sep/2 on both sides.
        let half = spawn.min_separation / 2.0;
        let outer = spawn.max_radius + half;
        let inner = (spawn.min_radius - half).max(0.0);
        let room = PI * (outer * outer - inner * inner);
        let needed = spawn.count as f32 * PI * half * half;
        if needed > room {
            return invalid(format!(
                "{} collectibles {} apart cannot fit in the spawn annulus",
                spawn.count, spawn.min_separation
            ));
        }
        Ok(())
    }
}
