use gemdrive_common::PlayConfig;
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use crate::player::Player;

/// World-space displacement for one frame: the local velocity rotated by yaw.
pub fn heading_step(yaw: f32, linear: Vec3) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::new(0.0, 0.0, linear.z)
}

/// Advance the player by one frame: rotate, translate on the ground plane,
/// then clamp to the play area.
///
/// The clamp is a hard wall that leaves velocity untouched, so a player
/// holding forward against an edge stays pinned to it.
pub fn integrate(player: &mut Player, config: &PlayConfig) {
    player.yaw = (player.yaw + player.velocity.angular).rem_euclid(TAU);

    let step = heading_step(player.yaw, player.velocity.linear);
    player.position.x += step.x;
    player.position.z += step.z;

    let limit = config.boundary_limit();
    player.position.x = player.position.x.clamp(-limit, limit);
    player.position.z = player.position.z.clamp(-limit, limit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn player_facing(yaw: f32) -> Player {
        let mut p = Player::spawn(&PlayConfig::default());
        p.yaw = yaw;
        p
    }

    #[test]
    fn forward_at_spawn_heading_moves_positive_z() {
        let config = PlayConfig::default();
        let mut p = player_facing(PI);
        p.velocity.linear.z = -0.2;
        integrate(&mut p, &config);
        assert!(p.position.x.abs() < 1e-6);
        assert!((p.position.z - 0.2).abs() < 1e-6);
    }

    #[test]
    fn height_is_never_touched() {
        let config = PlayConfig::default();
        let mut p = player_facing(0.3);
        p.velocity.linear = Vec3::new(0.0, 5.0, -0.2);
        for _ in 0..50 {
            integrate(&mut p, &config);
        }
        assert_eq!(p.position.y, 0.5);
    }

    #[test]
    fn rotation_applies_before_translation() {
        let config = PlayConfig::default();
        let mut p = player_facing(0.0);
        p.velocity.angular = PI / 2.0;
        p.velocity.linear.z = -1.0;
        integrate(&mut p, &config);
        // Quarter turn first, then forward along the new heading: -x.
        assert!((p.position.x + 1.0).abs() < 1e-5);
        assert!(p.position.z.abs() < 1e-5);
    }

    #[test]
    fn yaw_wraps_into_full_turn() {
        let config = PlayConfig::default();
        let mut p = player_facing(TAU - 0.01);
        p.velocity.angular = 0.05;
        integrate(&mut p, &config);
        assert!(p.yaw >= 0.0 && p.yaw < TAU);
        assert!((p.yaw - 0.04).abs() < 1e-4);

        p.velocity.angular = -0.05;
        integrate(&mut p, &config);
        integrate(&mut p, &config);
        assert!(p.yaw >= 0.0 && p.yaw < TAU);
        assert!((p.yaw - (TAU - 0.06)).abs() < 1e-4);
    }

    #[test]
    fn clamp_pins_player_to_wall_without_stopping() {
        let config = PlayConfig::default();
        let limit = config.boundary_limit();
        let mut p = player_facing(PI);
        p.velocity.linear.z = -0.2;
        for _ in 0..500 {
            integrate(&mut p, &config);
            assert!(p.position.x.abs() <= limit);
            assert!(p.position.z.abs() <= limit);
        }
        assert_eq!(p.position.z, limit);
        assert_eq!(p.velocity.linear.z, -0.2);
    }

    #[test]
    fn clamp_holds_while_circling() {
        let config = PlayConfig::default();
        let limit = config.boundary_limit();
        let mut p = player_facing(0.0);
        p.velocity.linear.z = -0.9;
        p.velocity.angular = 0.003;
        for _ in 0..5000 {
            integrate(&mut p, &config);
            assert!(p.position.x.abs() <= limit);
            assert!(p.position.z.abs() <= limit);
        }
    }
}
