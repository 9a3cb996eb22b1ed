use easel::engine::core::EngineConfig;
use easel::engine::input::{InputEvent, Key, PointerButton};
use easel::engine::run_headless;
use easel::programs::{PaintProgram, PolygonProgram, Program, ProgramKind};
use easel::surface::{Color, RasterSurface, Surface};
use glam::DVec2;

fn drag(program: &mut dyn Program, surface: &mut dyn Surface, path: &[(f64, f64)]) {
    let (x, y) = path[0];
    let start = InputEvent::PointerDown {
        position: DVec2::new(x, y),
        button: PointerButton::Primary,
    };
    program.handle_input(&start, surface).unwrap();
    for &(x, y) in &path[1..] {
        let event = InputEvent::PointerMove {
            position: DVec2::new(x, y),
        };
        program.handle_input(&event, surface).unwrap();
    }
    let end = InputEvent::PointerUp {
        position: DVec2::new(x, y),
        button: PointerButton::Primary,
    };
    program.handle_input(&end, surface).unwrap();
}

#[test]
fn test_headless_run_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("swings.png");
    let config = EngineConfig {
        start_running: true,
        ..EngineConfig::default()
    };

    let mut program = ProgramKind::Swings.build(&config);
    let canvas = run_headless(program.as_mut(), &config, 30).unwrap();
    canvas.save_png(&output).unwrap();

    let written = image::open(&output).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (800, 600));
    assert_eq!(written.as_raw(), canvas.pixels().as_raw());
}

#[test]
fn test_every_program_sets_up_headless() {
    let config = EngineConfig::default();
    for kind in [
        ProgramKind::Face,
        ProgramKind::Paint,
        ProgramKind::Polygon,
        ProgramKind::CircleSquare,
        ProgramKind::Swings,
        ProgramKind::Hierarchy,
    ] {
        let mut program = kind.build(&config);
        let canvas = run_headless(program.as_mut(), &config, 3).unwrap();
        assert_eq!(canvas.pixels().dimensions(), program.canvas_size());
    }
}

#[test]
fn test_seeded_paint_sessions_match() {
    let strokes = [(100.0, 100.0), (110.0, 100.0), (150.0, 140.0), (300.0, 300.0)];
    let paint = |seed| {
        let mut program = PaintProgram::new(Some(seed));
        let mut canvas = RasterSurface::new(400, 400, Color::WHITE).unwrap();
        program.setup(&mut canvas).unwrap();
        drag(&mut program, &mut canvas, &strokes);
        canvas
    };

    let a = paint(11);
    let b = paint(11);
    assert_eq!(a.pixels().as_raw(), b.pixels().as_raw());
    assert_ne!(a.get_rgb(300, 300), Some(Color::WHITE.to_array()));
}

#[test]
fn test_paint_keys_pick_color_shape_and_clear() {
    let mut program = PaintProgram::new(Some(3));
    let mut canvas = RasterSurface::new(400, 400, Color::WHITE).unwrap();
    program.setup(&mut canvas).unwrap();

    for c in ['4', 'S'] {
        program
            .handle_input(&InputEvent::Key(Key::from_char(c)), &mut canvas)
            .unwrap();
    }
    drag(&mut program, &mut canvas, &[(0.0, 0.0), (200.0, 200.0)]);
    // a square stamp reaches its corner at (240, 200)
    assert_eq!(canvas.get_rgb(235, 200), Some(Color::PINK.to_array()));
    assert_eq!(canvas.get_rgb(200, 235), Some(Color::PINK.to_array()));
    assert_eq!(canvas.get_rgb(228, 228), Some(Color::WHITE.to_array()));

    let repaint = program
        .handle_input(&InputEvent::Key(Key::Char('c')), &mut canvas)
        .unwrap();
    assert!(repaint);
    assert_eq!(canvas.get_rgb(200, 200), Some(Color::WHITE.to_array()));
}

#[test]
fn test_polygon_flip_keeps_the_centre() {
    let mut program = PolygonProgram::new();
    let mut canvas = RasterSurface::new(600, 600, Color::WHITE).unwrap();
    program.setup(&mut canvas).unwrap();
    assert_eq!(canvas.get_rgb(300, 300), Some(Color::BLUE.to_array()));
    assert_eq!(canvas.get_rgb(5, 5), Some(Color::YELLOW.to_array()));

    program
        .handle_input(&InputEvent::Key(Key::Digit(5)), &mut canvas)
        .unwrap();
    // preset 5 moves the shape far above the canvas before stretching it
    assert_eq!(canvas.get_rgb(300, 300), Some(Color::YELLOW.to_array()));

    program
        .handle_input(&InputEvent::Key(Key::Digit(3)), &mut canvas)
        .unwrap();
    assert_eq!(canvas.get_rgb(300, 300), Some(Color::BLUE.to_array()));

    let centroid = program.points().iter().copied().sum::<DVec2>() / 5.0;
    assert!(centroid.abs_diff_eq(DVec2::new(300.0, 300.0), 1e-9));
}
