use gemdrive_kernel::{FollowCamera, GameState};
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl RenderView {
    pub fn from_camera(camera: &FollowCamera) -> Self {
        Self {
            eye: camera.position,
            target: camera.target,
            fov_degrees: camera.config().fov_degrees,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads game state and a view, then produces output. It never
/// mutates the game; state is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given state and view.
    fn render(&self, state: &GameState, view: &RenderView) -> Self::Output;
}

/// Debug text renderer, standing in for a GPU backend.
///
/// Produces a human-readable frame: score, camera, player position and the
/// live collectibles. Used by the CLI and for testing the render seam.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, state: &GameState, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (tick={}, seed={}) ===\n",
            state.tick(),
            state.seed()
        ));
        out.push_str(&format!(
            "Score: {}  Next: #{} of {}\n",
            state.score(),
            state.next_expected(),
            state.collectibles().batch_size()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        match state.player() {
            Some(p) => {
                let facing = p.rotation() * Vec3::NEG_Z;
                out.push_str(&format!(
                    "Player Position: ({:.2}, {:.2}, {:.2}) yaw={:.2} facing=({:.2}, {:.2}) scale={:.1}\n",
                    p.position.x, p.position.y, p.position.z, p.yaw, facing.x, facing.z, p.scale
                ));
            }
            None => out.push_str("Player: absent\n"),
        }

        out.push_str(&format!("Obstacles: {}\n", state.obstacles().len()));
        for c in state.collectibles().live() {
            let marker = if c.number == state.next_expected() {
                '>'
            } else {
                ' '
            };
            out.push_str(&format!(
                " {marker}[#{} {}] pos=({:.2}, {:.2}, {:.2}) color={}\n",
                c.number, c.id, c.position.x, c.position.y, c.position.z, c.color
            ));
        }

        out
    }
}
