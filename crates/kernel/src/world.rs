use gemdrive_common::{FrameContext, GameConfig};
use gemdrive_input::{InputEvent, KeyBindings};
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::camera::FollowCamera;
use crate::collectibles::{CollectibleSet, Pickup, SpawnError};
use crate::collision;
use crate::motion;
use crate::player::Player;

/// An event record produced by the update loop.
///
/// Presentation layers drain these to update the score display and show
/// transient notifications; tests use them to observe what happened in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The next expected collectible was picked up.
    Collected { number: u32, id: String, score: u32 },
    /// The player is in contact with an obstacle and was stopped.
    Blocked { obstacle: usize },
    /// The last collectible of a batch was picked up.
    BatchComplete { score: u32 },
}

/// The authoritative game state for one session.
///
/// Everything the frame loop mutates lives here and is passed explicitly;
/// renderers and presenters only read it. Collectible placement draws from a
/// seeded RNG, so a session is reproducible from its seed and input timeline.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    bindings: KeyBindings,
    player: Option<Player>,
    obstacles: Vec<Vec3>,
    collectibles: CollectibleSet,
    camera: FollowCamera,
    tick: u64,
    seed: u64,
    rng: ChaCha8Rng,
    /// Append-only log of what happened since the last drain.
    event_log: Vec<GameEvent>,
}

impl GameState {
    /// Build the static world: obstacles and camera, no player, no collectibles.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let bindings = KeyBindings::new(config.play.move_speed, config.play.rotation_speed);
        let obstacles = config.play.obstacles.clone();
        let camera = FollowCamera::new(config.camera.clone());
        Self {
            config,
            bindings,
            player: None,
            obstacles,
            collectibles: CollectibleSet::new(),
            camera,
            tick: 0,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            event_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seed the session RNG was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The player, if its model loaded.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn obstacles(&self) -> &[Vec3] {
        &self.obstacles
    }

    pub fn collectibles(&self) -> &CollectibleSet {
        &self.collectibles
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn score(&self) -> u32 {
        self.collectibles.score()
    }

    pub fn next_expected(&self) -> u32 {
        self.collectibles.next_expected()
    }

    /// Place the player at its spawn pose. Called once the model is available.
    pub fn spawn_player(&mut self) -> &mut Player {
        let player = Player::spawn(&self.config.play);
        tracing::info!(position = ?player.position, "player spawned");
        self.player.insert(player)
    }

    /// Clear the live collectibles and spawn a fresh numbered batch.
    pub fn respawn_collectibles(&mut self) -> Result<(), SpawnError> {
        let spawned = self.collectibles.respawn(
            &mut self.rng,
            &self.config.spawn,
            &self.config.collectibles,
        )?;
        tracing::info!(count = spawned.len(), "collectibles respawned");
        Ok(())
    }

    /// Route one input event to the player velocity or the camera drag.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => match self.player.as_mut() {
                Some(p) => self.bindings.key_down(key, &mut p.velocity),
                None => tracing::trace!(?key, "key ignored, no player"),
            },
            InputEvent::KeyUp(key) => {
                if let Some(p) = self.player.as_mut() {
                    self.bindings.key_up(key, &mut p.velocity);
                }
            }
            InputEvent::PointerDown(at) => self.camera.pointer_down(at),
            InputEvent::PointerMove(at) => self.camera.pointer_move(at),
            InputEvent::PointerUp => self.camera.pointer_up(),
        }
    }

    /// Advance the session by one frame.
    ///
    /// Order: rotate and move the player, clamp, stop on obstacle contact,
    /// move the camera, check the next pickup, animate collectibles. With no
    /// player only the camera drag and the collectible animation run.
    pub fn update(&mut self, ctx: FrameContext) -> Option<Pickup> {
        let _span = tracing::trace_span!("game_update", tick = self.tick).entered();

        if let Some(player) = self.player.as_mut() {
            motion::integrate(player, &self.config.play);
            let contacts = collision::resolve(player, &self.obstacles, self.config.play.collision_distance);
            for obstacle in contacts {
                tracing::debug!(obstacle, "blocked by obstacle");
                self.event_log.push(GameEvent::Blocked { obstacle });
            }
        }

        self.camera.update(self.player.as_ref());

        let pickup = self.player.as_ref().and_then(|p| {
            self.collectibles
                .try_collect(p.position, self.config.spawn.pickup_radius)
        });
        if let Some(p) = &pickup {
            tracing::debug!(number = p.number, score = p.score, "collected");
            self.event_log.push(GameEvent::Collected {
                number: p.number,
                id: p.id.clone(),
                score: p.score,
            });
            if self.collectibles.is_complete() {
                tracing::info!(score = p.score, "all collectibles gathered");
                self.event_log.push(GameEvent::BatchComplete { score: p.score });
            }
        }

        self.collectibles
            .animate(ctx.now_ms, self.config.spawn.bob_base_height);

        self.tick += 1;
        pickup
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GameEvent] {
        &self.event_log
    }

    /// Deterministic hash of the simulation state for comparing runs.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_vec = |h: &mut u64, v: Vec3| {
            for c in v.to_array() {
                mix(h, &c.to_le_bytes());
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.seed.to_le_bytes());
        if let Some(p) = &self.player {
            mix_vec(&mut h, p.position);
            mix(&mut h, &p.yaw.to_le_bytes());
            mix_vec(&mut h, p.velocity.linear);
            mix(&mut h, &p.velocity.angular.to_le_bytes());
        }
        mix(&mut h, &self.collectibles.score().to_le_bytes());
        mix(&mut h, &self.collectibles.next_expected().to_le_bytes());
        for c in self.collectibles.live() {
            mix(&mut h, &c.number.to_le_bytes());
            mix_vec(&mut h, c.position);
        }
        mix_vec(&mut h, self.camera.position);
        h
    }
}
