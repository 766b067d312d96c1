mod autopilot;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gemdrive_assets::{GltfModelLoader, ModelLoader, PlaceholderModel};
use gemdrive_common::{FrameContext, GameConfig};
use gemdrive_input::InputScript;
use gemdrive_render::{DebugTextRenderer, FrameDriver, Hud};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser)]
#[command(name = "gemdrive-cli", about = "Headless driver for the gemdrive game core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the frame loop headless and print debug frames
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed for collectible placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// YAML game config (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// YAML input timeline
        #[arg(long)]
        script: Option<PathBuf>,
        /// Player model (.gltf or .glb); a placeholder box is used when omitted
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Steer toward the next collectible automatically
        #[arg(short, long)]
        autopilot: bool,
        /// Print every Nth frame (0 prints only the last)
        #[arg(short, long, default_value = "0")]
        every: u64,
    },
    /// Sample one collectible batch and print the positions
    Spawn {
        /// RNG seed for collectible placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Override the batch size
        #[arg(short = 'n', long)]
        count: Option<u32>,
        /// YAML game config (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    match path {
        Some(p) => {
            GameConfig::load(p).with_context(|| format!("loading config {}", p.display()))
        }
        None => Ok(GameConfig::new()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gemdrive-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", gemdrive_common::crate_info());
            println!("input: {}", gemdrive_input::crate_info());
            println!("kernel: {}", gemdrive_kernel::crate_info());
            println!("render: {}", gemdrive_render::crate_info());
            println!("assets: {}", gemdrive_assets::crate_info());
        }
        Commands::Run {
            ticks,
            seed,
            config,
            script,
            model,
            autopilot,
            every,
        } => {
            let config = load_config(config.as_ref())?;
            let script = match &script {
                Some(p) => InputScript::load(p)
                    .with_context(|| format!("loading input script {}", p.display()))?,
                None => InputScript::default(),
            };
            if !script.is_empty() {
                tracing::info!(
                    events = script.len(),
                    last_frame = ?script.last_frame(),
                    "input script loaded"
                );
            }

            let scale = config.play.car_scale;
            let mut loader: Box<dyn ModelLoader> = match model {
                Some(path) => Box::new(GltfModelLoader::new(path, scale)),
                None => Box::new(PlaceholderModel { scale }),
            };
            let mut driver = FrameDriver::start(
                config,
                seed,
                loader.as_mut(),
                DebugTextRenderer::new(),
                Hud::new(),
            )
            .context("starting session")?;

            let mut pilot = autopilot.then(Autopilot::new);
            let mut last = String::new();
            for frame in 0..ticks {
                for event in script.events_at(frame) {
                    driver.handle_input(event);
                }
                if let Some(p) = pilot.as_mut() {
                    for event in p.steer(driver.state()) {
                        driver.handle_input(event);
                    }
                }

                last = driver.tick(FrameContext::fixed(frame, FRAME_MS));
                if every > 0 && frame % every == 0 {
                    print!("{last}");
                }
                if pilot.is_some() && driver.state().collectibles().is_complete() {
                    tracing::info!(frame, "batch complete, stopping");
                    break;
                }
            }

            if every == 0 {
                print!("{last}");
            }
            if let Some(banner) = driver.presenter().banner() {
                println!("{banner}");
            }
            let state = driver.state();
            println!(
                "Done: tick={}, score={}, remaining={}, hash={:#x}",
                state.tick(),
                state.score(),
                state.collectibles().live().len(),
                state.state_hash()
            );
        }
        Commands::Spawn {
            seed,
            count,
            config,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(n) = count {
                config.spawn.count = n;
                config.validate().context("batch size does not fit the spawn ring")?;
            }

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let positions = gemdrive_kernel::collectibles::sample_positions(&mut rng, &config.spawn)
                .context("sampling collectible positions")?;
            println!("Spawn batch: seed={seed}, count={}", positions.len());
            for (i, pos) in positions.iter().enumerate() {
                let id = config
                    .collectibles
                    .get(i % config.collectibles.len().max(1))
                    .map_or("?", |c| c.id.as_str());
                println!(
                    "  #{} {id}: ({:.2}, {:.2}, {:.2}) r={:.2}",
                    i + 1,
                    pos.x,
                    pos.y,
                    pos.z,
                    glam::Vec2::new(pos.x, pos.z).length()
                );
            }
        }
    }

    Ok(())
}
