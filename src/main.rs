use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use easel::engine::core::EngineConfig;
use easel::engine::{run_headless, EngineApp, CANVAS_UNSUPPORTED};
use easel::programs::ProgramKind;
use easel::SceneError;

#[derive(Debug, Parser)]
#[command(name = "easel", version, about = "Canvas drawing exercises and an animated scene graph")]
struct Cli {
    /// Program to run.
    #[arg(value_enum)]
    program: ProgramKind,

    /// RON file with engine settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render into a PNG instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Frames to run headless before saving.
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Where the headless canvas is written.
    #[arg(long, default_value = "easel.png")]
    output: PathBuf,

    /// Start with the animation running.
    #[arg(long)]
    animate: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if cli.animate {
        config.start_running = true;
    }

    let mut program = cli.program.build(&config);
    if !cli.headless {
        return EngineApp::new(config, program).run();
    }

    let canvas = match run_headless(program.as_mut(), &config, cli.frames) {
        Ok(canvas) => canvas,
        Err(err) => {
            if let Some(SceneError::SurfaceUnavailable(_)) = err.downcast_ref::<SceneError>() {
                eprintln!("{CANVAS_UNSUPPORTED}");
            }
            return Err(err);
        }
    };
    canvas
        .save_png(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(target: "engine", output = %cli.output.display(), "canvas saved");
    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn headless_flags_parse() {
        let cli = Cli::parse_from([
            "easel",
            "circle-square",
            "--headless",
            "--frames",
            "12",
            "--output",
            "out.png",
        ]);
        assert_eq!(cli.program, ProgramKind::CircleSquare);
        assert!(cli.headless && !cli.animate);
        assert_eq!(cli.frames, 12);
        assert_eq!(cli.output, PathBuf::from("out.png"));
    }
}
