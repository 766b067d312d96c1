use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for gemdrive")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt check, clippy with warnings denied, then the test suite
    Check,
    /// Run all tests
    Test,
    /// Time frame updates and collectible respawns
    Bench,
    /// Drive one batch with the autopilot and print the final frame
    Demo {
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt check", &["fmt", "--all", "--", "--check"])?;
            cargo(
                "clippy",
                &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            )?;
            cargo("tests", &["test", "--workspace"])?;
        }
        Commands::Test => cargo("tests", &["test", "--workspace"])?,
        Commands::Bench => cargo("bench", &["bench", "-p", "gemdrive-kernel"])?,
        Commands::Demo { seed } => {
            let seed = seed.to_string();
            cargo(
                "demo",
                &[
                    "run", "-p", "gemdrive-cli", "--", "run", "--autopilot", "--ticks", "20000",
                    "--seed", &seed,
                ],
            )?;
        }
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{step} failed ({status})");
    }
    Ok(())
}
