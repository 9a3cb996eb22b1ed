use anyhow::Result;

use super::animation::{AnimationDriver, FrameOutcome, ManualScheduler};
use super::core::EngineConfig;
use crate::programs::Program;
use crate::surface::RasterSurface;

/// Runs `program` without a window and returns the final canvas.
///
/// The canvas is set up once. When the config starts the animation and the
/// program animates, up to `frames` scheduled frames are then fired in order.
pub fn run_headless(
    program: &mut dyn Program,
    config: &EngineConfig,
    frames: u64,
) -> Result<RasterSurface> {
    let (width, height) = config.canvas_size(program.canvas_size());
    tracing::info!(
        target: "engine",
        program = program.name(),
        width,
        height,
        frames,
        "headless run starting"
    );

    let mut surface = RasterSurface::new(width, height, config.background)?;
    program.setup(&mut surface)?;

    let mut driver = AnimationDriver::new();
    let mut scheduler = ManualScheduler::new();
    if config.start_running && program.animated() {
        driver.set_running(true, &mut scheduler);
    }

    while driver.frame_number() < frames && scheduler.take_request() {
        if driver.on_frame(program, &mut surface, &mut scheduler)? == FrameOutcome::Skipped {
            break;
        }
    }

    tracing::info!(
        target: "engine",
        frame = driver.frame_number(),
        "headless run complete"
    );
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::{FaceProgram, SwingsProgram};
    use crate::SceneError;

    #[test]
    fn static_programs_ignore_the_frame_budget() {
        let config = EngineConfig {
            start_running: true,
            ..EngineConfig::default()
        };
        let surface = run_headless(&mut FaceProgram::new(), &config, 10).unwrap();
        assert_eq!(surface.pixels().dimensions(), (600, 600));
    }

    #[test]
    fn config_size_overrides_the_program() {
        let config = EngineConfig {
            window_width: Some(40),
            window_height: Some(30),
            ..EngineConfig::default()
        };
        let surface = run_headless(&mut SwingsProgram::new(false), &config, 0).unwrap();
        assert_eq!(surface.pixels().dimensions(), (40, 30));
    }

    #[test]
    fn zero_sized_canvas_is_unavailable() {
        let config = EngineConfig {
            window_width: Some(0),
            ..EngineConfig::default()
        };
        let err = run_headless(&mut FaceProgram::new(), &config, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SceneError>(),
            Some(SceneError::SurfaceUnavailable(_))
        ));
    }

    #[test]
    fn oversized_canvas_is_unavailable() {
        let config = EngineConfig {
            window_width: Some(70_000),
            window_height: Some(70_000),
            ..EngineConfig::default()
        };
        let err = run_headless(&mut FaceProgram::new(), &config, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SceneError>(),
            Some(SceneError::SurfaceUnavailable(_))
        ));
    }
}
