//! Integration tests for the warp field loop.
//!
//! These drive a [`Field`] through the public [`Driver`] API with hand-fired
//! frames, checking what ends up on the surface.

use warpfield::{
    run_frames, Color, DrawCommand, Driver, Field, FieldConfig, HueBand, ManualHost,
    PixelSurface, RecordingSurface, Surface,
};

fn recording_driver(width: u32, height: u32, seed: u64) -> Driver<RecordingSurface, ManualHost> {
    Driver::with_field(
        Some(RecordingSurface::new(width, height)),
        ManualHost::new(),
        Field::with_seed(FieldConfig::default(), seed).unwrap(),
    )
}

// ============================================================================
// Frame composite
// ============================================================================

#[test]
fn test_every_frame_starts_with_wash_then_vortex() {
    let mut driver = recording_driver(800, 600, 1);
    assert!(driver.start());
    run_frames(&mut driver, 5);

    let commands = driver.surface().unwrap().commands();
    let washes: Vec<usize> = commands
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, DrawCommand::FillRect { .. }))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(washes.len(), 5);

    for &i in &washes {
        match &commands[i] {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                assert_eq!((*x, *y, *width, *height), (0.0, 0.0, 800.0, 600.0));
                assert!((color.alpha() - 0.15).abs() < 1e-6);
            }
            _ => unreachable!(),
        }
        match &commands[i + 1] {
            DrawCommand::RadialGradient {
                center,
                inner_radius,
                outer_radius,
                outer,
                ..
            } => {
                assert_eq!((center.x, center.y), (400.0, 300.0));
                assert_eq!(*inner_radius, 0.0);
                assert_eq!(*outer_radius, 200.0);
                assert_eq!(outer.alpha(), 0.0);
            }
            other => panic!("expected vortex after wash, got {:?}", other),
        }
    }
}

#[test]
fn test_particle_count_is_stable_across_frames() {
    let mut driver = recording_driver(1024, 768, 2);
    driver.start();
    for _ in 0..50 {
        run_frames(&mut driver, 10);
        assert_eq!(driver.field().len(), 20);
    }
    assert_eq!(driver.field().frames(), 500);
}

#[test]
fn test_visible_particles_stay_within_margin() {
    let mut driver = recording_driver(640, 480, 3);
    driver.start();
    run_frames(&mut driver, 200);

    let commands = driver.surface().unwrap().commands();
    for command in commands {
        if let DrawCommand::FillCircle { center, .. } = command {
            assert!(center.x >= -100.0 && center.x <= 740.0, "x = {}", center.x);
            assert!(center.y >= -100.0 && center.y <= 580.0, "y = {}", center.y);
        }
    }
}

#[test]
fn test_particles_are_drawn_with_band_hues() {
    let mut driver = recording_driver(800, 600, 4);
    driver.start();
    run_frames(&mut driver, 100);

    let warm = HueBand::new(280.0, 340.0);
    let cool = HueBand::new(160.0, 220.0);
    let mut strokes = 0;
    for command in driver.surface().unwrap().commands() {
        if let DrawCommand::StrokeLine {
            color: Color::Hsla(c),
            ..
        } = command
        {
            assert!(warm.contains(c.hue) || cool.contains(c.hue), "hue {}", c.hue);
            strokes += 1;
        }
    }
    assert!(strokes > 0);
}

#[test]
fn test_glow_is_cleared_after_each_particle() {
    let mut driver = recording_driver(800, 600, 5);
    driver.start();
    run_frames(&mut driver, 30);

    let surface = driver.surface().unwrap();
    assert_eq!(surface.glow(), None);

    let sets = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::SetGlow { .. }))
        .count();
    let clears = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::ClearGlow))
        .count();
    assert_eq!(sets, clears);
}

#[test]
fn test_same_seed_draws_same_frames() {
    let mut a = recording_driver(500, 500, 42);
    let mut b = recording_driver(500, 500, 42);
    a.start();
    b.start();
    run_frames(&mut a, 25);
    run_frames(&mut b, 25);

    assert_eq!(
        a.surface().unwrap().commands(),
        b.surface().unwrap().commands()
    );
}

// ============================================================================
// Loop lifecycle
// ============================================================================

#[test]
fn test_missing_surface_never_draws() {
    let mut driver: Driver<RecordingSurface, ManualHost> =
        Driver::mount(None, ManualHost::new(), FieldConfig::default()).unwrap();
    assert!(!driver.start());
    run_frames(&mut driver, 10);

    assert_eq!(driver.host().requested(), 0);
    assert_eq!(driver.field().frames(), 0);
    assert!(!driver.is_running());
}

#[test]
fn test_rejected_config_never_mounts() {
    for config in [
        FieldConfig::default().with_speed_range(5.0..2.0),
        FieldConfig::default().with_speed_range(2.0..f32::INFINITY),
        FieldConfig::default()
            .with_hue_bands(HueBand::new(280.0, f32::INFINITY), HueBand::new(160.0, 220.0)),
    ] {
        let mounted: Result<Driver<RecordingSurface, ManualHost>, _> =
            Driver::mount(Some(RecordingSurface::new(800, 600)), ManualHost::new(), config);
        assert!(mounted.is_err());
    }
}

#[test]
fn test_stop_halts_drawing() {
    let mut driver = recording_driver(800, 600, 6);
    driver.start();
    run_frames(&mut driver, 10);
    let drawn = driver.surface().unwrap().commands().len();

    driver.stop();
    run_frames(&mut driver, 10);
    driver.on_frame();

    assert_eq!(driver.surface().unwrap().commands().len(), drawn);
    assert_eq!(driver.field().frames(), 10);
    assert_eq!(driver.host().released(), 1);
    assert_eq!(driver.host().cancelled().len(), 1);
}

#[test]
fn test_resize_respawns_for_new_size() {
    let mut driver = recording_driver(800, 600, 7);
    driver.start();
    run_frames(&mut driver, 5);

    driver.resize(320, 200);
    assert_eq!(driver.field().size(), (320, 200));
    assert_eq!(driver.surface().unwrap().size(), (320, 200));
    for p in driver.field().particles() {
        assert!(p.depth() >= 0.0 && p.depth() < 320.0);
    }

    run_frames(&mut driver, 1);
    let last_wash = driver
        .surface()
        .unwrap()
        .commands()
        .iter()
        .rev()
        .find_map(|c| match c {
            DrawCommand::FillRect { width, height, .. } => Some((*width, *height)),
            _ => None,
        });
    assert_eq!(last_wash, Some((320.0, 200.0)));
}

#[test]
fn test_zero_sized_surface_is_tolerated() {
    let mut driver = recording_driver(0, 0, 8);
    assert!(driver.start());
    run_frames(&mut driver, 10);

    assert_eq!(driver.surface().unwrap().shape_count(), 0);
    assert!(driver.is_running());
}

// ============================================================================
// Pixel output
// ============================================================================

#[test]
fn test_pixel_frames_light_up_the_center() {
    let mut driver = Driver::with_field(
        Some(PixelSurface::new(200, 200)),
        ManualHost::new(),
        Field::with_seed(FieldConfig::default(), 9).unwrap(),
    );
    driver.start();
    run_frames(&mut driver, 20);

    let surface = driver.surface().unwrap();
    let [r, g, b, a] = surface.pixel(100, 100);
    assert!(a > 0);
    assert!(b >= r && b >= g, "center glow should lean blue: {:?}", [r, g, b]);
}

#[test]
fn test_pixel_trails_fade_without_particles() {
    let config = FieldConfig::default().with_particle_count(1);
    let mut field = Field::with_seed(config, 10).unwrap();
    let mut surface = PixelSurface::new(100, 100);
    surface.fill_rect(0.0, 0.0, 100.0, 100.0, warpfield::Rgba::new(255, 255, 255, 1.0).into());
    field.resize(100, 100);

    let corner_before = surface.pixel(0, 0)[0];
    for _ in 0..30 {
        field.tick(&mut surface);
    }
    let corner_after = surface.pixel(0, 0)[0];
    assert!(corner_after < corner_before / 4);
}
