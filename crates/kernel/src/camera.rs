use gemdrive_common::CameraConfig;
use gemdrive_input::DragTracker;
use glam::{Mat4, Quat, Vec2, Vec3};

use crate::player::Player;

/// Chase camera that trails the player with exponential smoothing, or snaps
/// to a pointer-dragged position while a drag is active.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub position: Vec3,
    /// Point the camera is aimed at.
    pub target: Vec3,
    pub aspect: f32,
    config: CameraConfig,
    drag: DragTracker,
    drag_target: Vec3,
}

impl FollowCamera {
    /// Camera at its configured starting pose, looking at the origin.
    pub fn new(config: CameraConfig) -> Self {
        let position = config.initial_position;
        Self {
            position,
            target: Vec3::ZERO,
            aspect: 16.0 / 9.0,
            config,
            drag: DragTracker::new(),
            drag_target: position,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag_target(&self) -> Vec3 {
        self.drag_target
    }

    /// Where follow mode wants the camera for this player pose.
    pub fn follow_target(&self, player: &Player) -> Vec3 {
        let c = &self.config;
        let offset = Vec3::new(0.0, c.follow_height, c.follow_distance);
        let tilted = Quat::from_rotation_x(c.tilt) * offset;
        let orbited = Quat::from_rotation_y(player.yaw + c.angle_offset) * tilted;
        player.position + orbited
    }

    /// Begin a drag gesture. The drag target starts at the current pose so a
    /// press without movement leaves the camera where it is.
    pub fn pointer_down(&mut self, at: Vec2) {
        self.drag.press(at);
        self.drag_target = self.position;
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        let Some(delta) = self.drag.move_to(at) else {
            return;
        };
        let speed = self.config.drag_speed;
        self.drag_target.x += delta.x * speed;
        self.drag_target.y = (self.drag_target.y - delta.y * speed).max(self.config.min_drag_height);
    }

    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    /// Advance one frame. With no player the camera holds its pose, except
    /// that an active drag still moves it.
    pub fn update(&mut self, player: Option<&Player>) {
        let (goal, blend) = if self.drag.is_active() {
            (self.drag_target, 1.0)
        } else if let Some(p) = player {
            (self.follow_target(p), self.config.smoothing)
        } else {
            return;
        };

        self.position = self.position.lerp(goal, blend);

        if let Some(p) = player {
            self.target = p.position + Vec3::Y * self.config.look_height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemdrive_common::PlayConfig;

    fn player() -> Player {
        Player::spawn(&PlayConfig::default())
    }

    #[test]
    fn starts_at_initial_pose() {
        let cam = FollowCamera::new(CameraConfig::default());
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(cam.target, Vec3::ZERO);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn follow_target_sits_behind_and_above() {
        let cam = FollowCamera::new(CameraConfig::default());
        let mut p = player();
        p.yaw = 0.0;
        let t = cam.follow_target(&p);
        // Tilt of -0.2 about X applied to (0, 4, 10), no yaw.
        let expected_y = 0.5 + 4.0 * (-0.2f32).cos() - 10.0 * (-0.2f32).sin();
        let expected_z = 4.0 * (-0.2f32).sin() + 10.0 * (-0.2f32).cos();
        assert!(t.x.abs() < 1e-5);
        assert!((t.y - expected_y).abs() < 1e-4);
        assert!((t.z - expected_z).abs() < 1e-4);
    }

    #[test]
    fn follow_target_orbits_with_yaw() {
        let cam = FollowCamera::new(CameraConfig::default());
        let mut p = player();
        p.yaw = 0.0;
        let behind = cam.follow_target(&p);
        p.yaw = std::f32::consts::PI;
        let front = cam.follow_target(&p);
        assert!((behind.z + front.z).abs() < 1e-4);
        assert!((behind.y - front.y).abs() < 1e-4);
    }

    #[test]
    fn smoothing_error_decays_geometrically() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        let p = player();
        let goal = cam.follow_target(&p);
        let initial = cam.position - goal;
        for k in 1..=30 {
            cam.update(Some(&p));
            let expected = initial * 0.9f32.powi(k);
            let err = cam.position - goal;
            assert!((err - expected).length() < 1e-3, "frame {k}: {err} vs {expected}");
        }
    }

    #[test]
    fn always_looks_above_player() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        let mut p = player();
        p.position = Vec3::new(3.0, 0.5, -2.0);
        cam.update(Some(&p));
        assert_eq!(cam.target, Vec3::new(3.0, 1.5, -2.0));
        cam.pointer_down(Vec2::ZERO);
        cam.update(Some(&p));
        assert_eq!(cam.target, Vec3::new(3.0, 1.5, -2.0));
    }

    #[test]
    fn drag_snaps_without_smoothing() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        let p = player();
        cam.pointer_down(Vec2::new(100.0, 100.0));
        cam.pointer_move(Vec2::new(200.0, 150.0));
        cam.update(Some(&p));
        assert!((cam.position.x - 1.0).abs() < 1e-6);
        assert!((cam.position.y - 4.5).abs() < 1e-6);
        assert_eq!(cam.position.z, 10.0);
    }

    #[test]
    fn drag_deltas_accumulate_within_a_frame() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        cam.pointer_down(Vec2::ZERO);
        cam.pointer_move(Vec2::new(50.0, 0.0));
        cam.pointer_move(Vec2::new(100.0, 0.0));
        cam.update(None);
        assert!((cam.position.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn drag_height_is_floored() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        cam.pointer_down(Vec2::ZERO);
        cam.pointer_move(Vec2::new(0.0, 10_000.0));
        assert_eq!(cam.drag_target().y, 2.0);
        cam.update(None);
        assert_eq!(cam.position.y, 2.0);
    }

    #[test]
    fn press_without_move_keeps_pose() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        let before = cam.position;
        cam.pointer_down(Vec2::new(5.0, 5.0));
        cam.update(Some(&player()));
        assert_eq!(cam.position, before);
    }

    #[test]
    fn release_resumes_smoothing_from_current_pose() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        let p = player();
        cam.pointer_down(Vec2::ZERO);
        cam.pointer_move(Vec2::new(300.0, 0.0));
        cam.update(Some(&p));
        let dragged = cam.position;
        cam.pointer_up();
        cam.update(Some(&p));
        let goal = cam.follow_target(&p);
        let expected = dragged + (goal - dragged) * 0.1;
        assert!((cam.position - expected).length() < 1e-5);
    }

    #[test]
    fn moves_outside_drag_are_ignored() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        cam.pointer_move(Vec2::new(500.0, 500.0));
        assert_eq!(cam.drag_target(), cam.position);
        assert!(!cam.is_dragging());
    }

    #[test]
    fn no_player_holds_pose() {
        let mut cam = FollowCamera::new(CameraConfig::default());
        let before = cam.clone();
        cam.update(None);
        assert_eq!(cam, before);
    }
}
