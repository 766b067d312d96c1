//! Ordered collectibles: spawning by rejection sampling and the pickup
//! sequencer that only ever consumes the next expected number.

use gemdrive_common::{Color, CollectibleSpec, SpawnConfig, planar_distance};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Errors from spawning a batch of collectibles.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("could not place collectible #{number} after {attempts} attempts")]
    PlacementExhausted { number: u32, attempts: u32 },
    #[error("no collectible presets configured")]
    NoPresets,
}

/// A live pickup. Destroyed exactly once, when collected in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: String,
    pub color: Color,
    pub scale: f32,
    pub rotation_speed: f32,
    pub bounce_height: f32,
    pub bounce_speed: f32,
    /// Pickup order, 1-based, assigned in spawn order.
    pub number: u32,
    pub position: Vec3,
    /// Accumulated cosmetic spin about +Y.
    pub spin: f32,
}

impl Collectible {
    fn from_spec(spec: &CollectibleSpec, number: u32, position: Vec3) -> Self {
        Self {
            id: spec.id.clone(),
            color: spec.color,
            scale: spec.scale,
            rotation_speed: spec.rotation_speed,
            bounce_height: spec.bounce_height,
            bounce_speed: spec.bounce_speed,
            number,
            position,
            spin: 0.0,
        }
    }
}

/// Result of a successful in-order pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub number: u32,
    pub id: String,
    /// Score after this pickup.
    pub score: u32,
}

/// Draw `config.count` positions in the spawn annulus, each at least
/// `min_separation` (planar) from every earlier one.
///
/// Each position gets `max_attempts` draws; running out is reported instead
/// of looping forever on an overcrowded layout.
pub fn sample_positions<R: Rng>(rng: &mut R, config: &SpawnConfig) -> Result<Vec<Vec3>, SpawnError> {
    let mut accepted: Vec<Vec3> = Vec::with_capacity(config.count as usize);
    for i in 0..config.count {
        let mut placed = None;
        for _ in 0..config.max_attempts {
            let angle = rng.random::<f32>() * TAU;
            let radius = config.min_radius + rng.random::<f32>() * (config.max_radius - config.min_radius);
            let candidate = Vec3::new(angle.cos() * radius, config.height, angle.sin() * radius);
            if accepted
                .iter()
                .all(|p| planar_distance(*p, candidate) >= config.min_separation)
            {
                placed = Some(candidate);
                break;
            }
        }
        match placed {
            Some(p) => accepted.push(p),
            None => {
                return Err(SpawnError::PlacementExhausted {
                    number: i + 1,
                    attempts: config.max_attempts,
                });
            }
        }
    }
    Ok(accepted)
}

/// The live collectibles plus the collection cursor and score.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectibleSet {
    live: Vec<Collectible>,
    next_expected: u32,
    score: u32,
    batch_size: u32,
}

impl Default for CollectibleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectibleSet {
    pub fn new() -> Self {
        Self {
            live: Vec::new(),
            next_expected: 1,
            score: 0,
            batch_size: 0,
        }
    }

    pub fn live(&self) -> &[Collectible] {
        &self.live
    }

    pub fn get(&self, number: u32) -> Option<&Collectible> {
        self.live.iter().find(|c| c.number == number)
    }

    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Size of the most recent spawn batch.
    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// True once every collectible of a non-empty batch has been picked up.
    pub fn is_complete(&self) -> bool {
        self.batch_size > 0 && self.live.is_empty()
    }

    /// Replace the live set with a fresh batch numbered 1..=N and reset the
    /// cursor. Score carries over. On error the current set is untouched.
    pub fn respawn<R: Rng>(
        &mut self,
        rng: &mut R,
        config: &SpawnConfig,
        presets: &[CollectibleSpec],
    ) -> Result<&[Collectible], SpawnError> {
        if config.count > 0 && presets.is_empty() {
            return Err(SpawnError::NoPresets);
        }
        let positions = sample_positions(rng, config)?;
        self.live = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Collectible::from_spec(&presets[i % presets.len()], i as u32 + 1, pos))
            .collect();
        self.next_expected = 1;
        self.batch_size = config.count;
        tracing::debug!(count = self.live.len(), "collectibles spawned");
        Ok(&self.live)
    }

    /// Consume the next expected collectible if `player` is within `radius` of it.
    ///
    /// Proximity to any other collectible changes nothing; it stays live
    /// until its turn comes.
    pub fn try_collect(&mut self, player: Vec3, radius: f32) -> Option<Pickup> {
        for c in &self.live {
            if c.number != self.next_expected && player.distance(c.position) < radius {
                tracing::trace!(number = c.number, expected = self.next_expected, "out of order");
            }
        }

        let index = self.live.iter().position(|c| c.number == self.next_expected)?;
        if player.distance(self.live[index].position) >= radius {
            return None;
        }

        let collected = self.live.remove(index);
        self.score += 1;
        self.next_expected += 1;
        Some(Pickup {
            number: collected.number,
            id: collected.id,
            score: self.score,
        })
    }

    /// Cosmetic spin and bob, driven by the frame clock.
    pub fn animate(&mut self, now_ms: f64, base_height: f32) {
        for c in &mut self.live {
            c.spin = (c.spin + c.rotation_speed).rem_euclid(TAU);
            let phase = (now_ms * c.bounce_speed as f64).sin() as f32;
            c.position.y = base_height + phase * c.bounce_height;
        }
    }
}
