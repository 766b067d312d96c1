use gemdrive_assets::{ModelHandle, ModelLoader};
use gemdrive_common::{FrameContext, GameConfig};
use gemdrive_input::InputEvent;
use gemdrive_kernel::{GameEvent, GameState, SpawnError};

use crate::hud::{Notification, Presenter};
use crate::renderer::{RenderView, Renderer};

/// Owns a session and pushes it through update, present, render once per
/// frame. The caller supplies frame timing.
pub struct FrameDriver<R: Renderer, P: Presenter> {
    state: GameState,
    model: Option<ModelHandle>,
    renderer: R,
    presenter: P,
}

impl<R: Renderer, P: Presenter> FrameDriver<R, P> {
    /// Load the player model, build the world, spawn the first batch.
    ///
    /// A model load failure is logged and the session continues without a
    /// player. Only a collectible placement failure aborts startup.
    pub fn start(
        config: GameConfig,
        seed: u64,
        loader: &mut dyn ModelLoader,
        renderer: R,
        mut presenter: P,
    ) -> Result<Self, SpawnError> {
        let mut state = GameState::new(config, seed);

        let model = match loader.load_player_model() {
            Ok(handle) => {
                state.spawn_player().scale = handle.scale;
                Some(handle)
            }
            Err(e) => {
                tracing::error!(error = %e, "player model failed to load, continuing without a player");
                None
            }
        };

        state.respawn_collectibles()?;
        presenter.update_score(state.score());

        Ok(Self {
            state,
            model,
            renderer,
            presenter,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.state.handle_input(event);
    }

    /// Spawn a fresh batch. The score carries over.
    pub fn respawn(&mut self) -> Result<(), SpawnError> {
        self.state.respawn_collectibles()?;
        self.presenter.update_score(self.state.score());
        Ok(())
    }

    /// Run one frame and return what the renderer produced.
    pub fn tick(&mut self, ctx: FrameContext) -> R::Output {
        let _span = tracing::info_span!("frame", frame = ctx.frame).entered();

        self.state.update(ctx);

        let notification_ms = self.state.config().spawn.notification_ms;
        for event in self.state.drain_events() {
            match event {
                GameEvent::Collected { number, id, score } => {
                    self.presenter.update_score(score);
                    self.presenter.show_notification(Notification {
                        number,
                        id,
                        shown_at_ms: ctx.now_ms,
                        duration_ms: notification_ms,
                    });
                }
                GameEvent::BatchComplete { score } => self.presenter.show_batch_complete(score),
                GameEvent::Blocked { obstacle } => tracing::trace!(obstacle, "frame blocked"),
            }
        }
        self.presenter.expire(ctx.now_ms);

        let view = RenderView::from_camera(self.state.camera());
        self.renderer.render(&self.state, &view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::Hud;
    use crate::renderer::DebugTextRenderer;
    use gemdrive_assets::{AssetError, PlaceholderModel};
    use gemdrive_input::Direction;

    struct BrokenLoader;

    impl ModelLoader for BrokenLoader {
        fn load_player_model(&mut self) -> Result<ModelHandle, AssetError> {
            Err(AssetError::GltfParse("no such car".into()))
        }
    }

    fn driver(seed: u64) -> FrameDriver<DebugTextRenderer, Hud> {
        FrameDriver::start(
            GameConfig::new(),
            seed,
            &mut PlaceholderModel { scale: 1.0 },
            DebugTextRenderer::new(),
            Hud::new(),
        )
        .unwrap()
    }

    #[test]
    fn start_spawns_player_and_batch() {
        let d = driver(7);
        assert!(d.state().player().is_some());
        assert_eq!(d.state().collectibles().live().len(), 5);
        assert_eq!(d.presenter().score_text(), "Score: 0");
        assert_eq!(d.model().map(|m| m.name.as_str()), Some("placeholder_box"));
    }

    #[test]
    fn failed_model_load_runs_without_player() {
        let mut d = FrameDriver::start(
            GameConfig::new(),
            7,
            &mut BrokenLoader,
            DebugTextRenderer::new(),
            Hud::new(),
        )
        .unwrap();
        assert!(d.state().player().is_none());
        assert!(d.model().is_none());

        d.handle_input(InputEvent::KeyDown(Direction::Up));
        let frame = d.tick(FrameContext::fixed(0, 16.0));
        assert!(frame.contains("Player: absent"));
        assert_eq!(d.state().tick(), 1);
        assert_eq!(d.state().collectibles().live().len(), 5);
    }

    #[test]
    fn pickup_updates_score_and_notifies() {
        let mut d = driver(3);
        let target = d.state().collectibles().get(1).unwrap().position;
        if let Some(p) = d.state_mut().player_mut() {
            p.position.x = target.x;
            p.position.z = target.z;
        }
        let frame = d.tick(FrameContext::fixed(0, 16.0));

        assert_eq!(d.state().score(), 1);
        assert_eq!(d.presenter().score_text(), "Score: 1");
        assert_eq!(d.presenter().visible().len(), 1);
        assert_eq!(d.presenter().visible()[0].number, 1);
        assert!(frame.contains("Score: 1  Next: #2"));
    }

    #[test]
    fn notification_expires_after_three_seconds() {
        let mut d = driver(3);
        let target = d.state().collectibles().get(1).unwrap().position;
        if let Some(p) = d.state_mut().player_mut() {
            p.position.x = target.x;
            p.position.z = target.z;
        }
        d.tick(FrameContext { frame: 0, now_ms: 0.0 });
        assert_eq!(d.presenter().visible().len(), 1);

        if let Some(p) = d.state_mut().player_mut() {
            p.position = glam::Vec3::new(0.0, 0.5, 0.0);
        }
        d.tick(FrameContext { frame: 1, now_ms: 2999.0 });
        assert_eq!(d.presenter().visible().len(), 1);
        d.tick(FrameContext { frame: 2, now_ms: 3000.0 });
        assert!(d.presenter().visible().is_empty());
    }

    #[test]
    fn respawn_keeps_score_and_resets_sequence() {
        let mut d = driver(3);
        let target = d.state().collectibles().get(1).unwrap().position;
        if let Some(p) = d.state_mut().player_mut() {
            p.position.x = target.x;
            p.position.z = target.z;
        }
        d.tick(FrameContext::fixed(0, 16.0));
        d.respawn().unwrap();
        assert_eq!(d.state().score(), 1);
        assert_eq!(d.state().next_expected(), 1);
        assert_eq!(d.state().collectibles().live().len(), 5);
        assert_eq!(d.presenter().score_text(), "Score: 1");
    }

    #[test]
    fn full_batch_raises_banner() {
        let mut d = driver(5);
        for number in 1..=5 {
            let target = d.state().collectibles().get(number).unwrap().position;
            if let Some(p) = d.state_mut().player_mut() {
                p.position.x = target.x;
                p.position.z = target.z;
            }
            d.tick(FrameContext::fixed(u64::from(number), 16.0));
            assert_eq!(d.state().score(), number);
        }
        assert_eq!(d.presenter().banner(), Some("All collected! Score: 5"));
        assert!(d.state().events().is_empty());
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = driver(11);
        let mut b = driver(11);
        for frame in 0..30 {
            if frame == 5 {
                a.handle_input(InputEvent::KeyDown(Direction::Up));
                b.handle_input(InputEvent::KeyDown(Direction::Up));
            }
            let ctx = FrameContext::fixed(frame, 16.0);
            assert_eq!(a.tick(ctx), b.tick(ctx));
        }
        assert_eq!(a.state().state_hash(), b.state().state_hash());
    }
}
