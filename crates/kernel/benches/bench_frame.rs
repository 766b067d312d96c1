use std::hint::black_box;
use std::time::Instant;

use gemdrive_common::{FrameContext, GameConfig};
use gemdrive_input::{Direction, InputEvent};
use gemdrive_kernel::GameState;

fn make_session(seed: u64, collectibles: u32) -> GameState {
    let mut config = GameConfig::new();
    config.spawn.count = collectibles;
    config.spawn.max_radius = 18.0;
    config.spawn.min_separation = 1.0;
    let mut state = GameState::new(config, seed);
    state.spawn_player();
    state
        .respawn_collectibles()
        .expect("bench layout fits the annulus");
    state
}

fn bench_update(collectibles: u32, frames: u64) {
    let mut state = make_session(7, collectibles);
    state.handle_input(InputEvent::KeyDown(Direction::Up));
    state.handle_input(InputEvent::KeyDown(Direction::Left));

    let start = Instant::now();
    for frame in 0..frames {
        let ctx = FrameContext::fixed(frame, 1000.0 / 60.0);
        let _ = black_box(state.update(black_box(ctx)));
        state.drain_events();
    }
    let elapsed = start.elapsed();
    let per_frame = elapsed / frames as u32;
    println!(
        "  update ({collectibles} collectibles, {frames} frames): {per_frame:?}/frame, total {elapsed:?}"
    );
}

fn bench_respawn(collectibles: u32, iterations: usize) {
    let mut state = make_session(11, collectibles);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(state.respawn_collectibles()).expect("bench layout fits the annulus");
        state.drain_events();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  respawn ({collectibles} collectibles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Frame Update Benchmarks ===\n");

    println!("Per-frame update:");
    bench_update(5, 100_000);
    bench_update(50, 100_000);

    println!("\nRejection-sampled respawn:");
    bench_respawn(5, 10_000);
    bench_respawn(50, 1_000);

    println!("\n=== Done ===");
}
