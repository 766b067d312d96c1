use gemdrive_common::planar_distance;
use glam::Vec3;

use crate::player::Player;

/// Stop the player if it is within `threshold` (planar) of any obstacle.
///
/// This is a velocity gate only: position is never corrected and rotation
/// is left alone, so a blocked player can still turn. Returns the indices of
/// every obstacle in contact.
pub fn resolve(player: &mut Player, obstacles: &[Vec3], threshold: f32) -> Vec<usize> {
    let contacts: Vec<usize> = obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| planar_distance(player.position, **o) < threshold)
        .map(|(i, _)| i)
        .collect();

    if !contacts.is_empty() {
        player.velocity.stop();
    }
    contacts
}
