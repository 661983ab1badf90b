use mechviz_test_fixtures::logs;
use mechviz_viewer_core::{Config, Inputs, RecordingBackend, Viewer, ViewerCommand, ViewerEvent};

fn cart_viewer(backend: &mut RecordingBackend) -> Viewer {
    let mut viewer = Viewer::new(Config::default());
    viewer.init(backend);
    let json = logs::json("cart").expect("cart fixture");
    viewer
        .load_animation_json(&json, backend)
        .expect("cart log should load");
    viewer
}

fn time_events(viewer: &mut Viewer, dt: f32, backend: &mut RecordingBackend) -> Vec<f32> {
    viewer
        .tick(dt, Inputs::default(), backend)
        .events
        .iter()
        .filter_map(|e| match e {
            ViewerEvent::TimeChanged { time } => Some(*time),
            _ => None,
        })
        .collect()
}

#[test]
fn playing_advances_elapsed_by_scaled_wall_time() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);

    viewer.set_speed(2.0);
    viewer.tick(0.25, Inputs::default(), &mut backend);
    assert!((viewer.elapsed_time() - 0.5).abs() < 1e-6);

    viewer.set_play(false);
    viewer.tick(0.25, Inputs::default(), &mut backend);
    assert!((viewer.elapsed_time() - 0.5).abs() < 1e-6, "paused clock moved");
}

#[test]
fn pause_does_not_reset_elapsed() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);

    viewer.set_time(1.2);
    viewer.toggle_play();
    assert!(!viewer.is_playing());
    viewer.tick(1.0, Inputs::default(), &mut backend);
    assert!((viewer.elapsed_time() - 1.2).abs() < 1e-6);
}

#[test]
fn set_time_resolution_is_idempotent() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);
    viewer.set_play(false);

    // Whatever elapsed was before, seeking to t resolves like resolving t
    // directly.
    viewer.set_time(17.3);
    viewer.tick(0.0, Inputs::default(), &mut backend);
    viewer.set_time(1.4);
    viewer.tick(0.0, Inputs::default(), &mut backend);
    assert_eq!(viewer.current_frame(), Some(1));

    let mut fresh_backend = RecordingBackend::new();
    let mut fresh = cart_viewer(&mut fresh_backend);
    fresh.set_play(false);
    fresh.set_time(1.4);
    fresh.tick(0.0, Inputs::default(), &mut fresh_backend);
    assert_eq!(fresh.current_frame(), Some(1));
}

#[test]
fn reverse_playback_wraps_to_the_end() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);
    viewer.set_is_active(true);
    viewer.set_speed(-1.0);

    // One second backward from t=0 goes negative and restarts at stop.
    let times = time_events(&mut viewer, 1.0, &mut backend);
    assert_eq!(times, vec![1.0], "expected the last applied frame's time");
    assert!((viewer.elapsed_time() - 2.0).abs() < 1e-6, "clock wrapped to stop");
}

#[test]
fn notify_reports_quantized_time_only_when_active() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);
    viewer.set_play(false);
    viewer.set_time(1.4);

    // Inactive: resolution happens, no time event.
    assert!(time_events(&mut viewer, 0.0, &mut backend).is_empty());

    viewer.set_is_active(true);
    // Quantized frame*step, not the raw clock.
    assert_eq!(time_events(&mut viewer, 0.0, &mut backend), vec![1.0]);
}

#[test]
fn two_viewers_one_notify_stream() {
    let mut backend_a = RecordingBackend::new();
    let mut backend_b = RecordingBackend::new();
    let mut active = cart_viewer(&mut backend_a);
    let mut passive = cart_viewer(&mut backend_b);
    active.set_is_active(true);
    passive.set_is_active(false);

    for _ in 0..5 {
        let a = time_events(&mut active, 0.1, &mut backend_a);
        let b = time_events(&mut passive, 0.1, &mut backend_b);
        assert_eq!(a.len(), 1, "active viewer reports each resolution");
        assert!(b.is_empty(), "passive viewer stays silent");
    }
}

#[test]
fn transforms_update_every_tick_while_renders_are_throttled() {
    let mut backend = RecordingBackend::new();
    let mut viewer = Viewer::new(Config {
        render_fps: 10.0,
        ..Config::default()
    });
    viewer.init(&mut backend);
    let json = logs::json("cart").expect("cart fixture");
    viewer
        .load_animation_json(&json, &mut backend)
        .expect("cart log should load");

    // 10 ticks at 50 ms against a 100 ms render interval: a draw lands on
    // every other tick.
    for _ in 0..10 {
        viewer.tick(0.05, Inputs::default(), &mut backend);
    }
    assert_eq!(backend.renders, 5);
    // Transform state was still written on every tick.
    assert!(!backend.transforms.is_empty());
}

#[test]
fn init_starts_locked_with_orbit_controls_disabled() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);

    // Locked means follow mode steers the camera and orbit input is off;
    // the two states are never both active.
    assert_eq!(backend.orbit_enabled, Some(false));
    viewer.tick(0.1, Inputs::default(), &mut backend);
    assert!(!backend.look_targets.is_empty(), "follow mode drives look_at");

    viewer.camera_lock(true, &mut backend);
    assert_eq!(backend.orbit_enabled, Some(true));
    let looks = backend.look_targets.len();
    viewer.tick(0.1, Inputs::default(), &mut backend);
    assert_eq!(backend.look_targets.len(), looks, "unlocked hands the camera over");
}

#[test]
fn camera_follows_first_group_until_unlocked() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);
    viewer.set_play(false);
    viewer.set_time(1.0);

    // Default render_fps=60 and dt=0.1 means every tick draws.
    viewer.tick(0.1, Inputs::default(), &mut backend);
    assert_eq!(
        backend.look_targets.last().copied(),
        Some([10.0, 10.0, 0.0]),
        "camera looks at the chassis (first group) at frame 1"
    );

    viewer.camera_lock(true, &mut backend);
    assert_eq!(backend.orbit_enabled, Some(true));
    let looks_before = backend.look_targets.len();
    viewer.tick(0.1, Inputs::default(), &mut backend);
    assert_eq!(
        backend.look_targets.len(),
        looks_before,
        "free-cam renders must not steer the camera"
    );
}

#[test]
fn commands_apply_before_the_time_step() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);
    viewer.set_play(false);

    let inputs = Inputs {
        commands: vec![
            ViewerCommand::SetActive { active: true },
            ViewerCommand::SetTime { time: 0.6 },
        ],
    };
    let events = &viewer.tick(0.0, inputs, &mut backend).events;
    assert!(
        events.contains(&ViewerEvent::TimeChanged { time: 1.0 }),
        "seek command resolved this tick, got {events:?}"
    );
}

#[test]
fn mixer_drive_sets_the_mixer_clock_instead_of_transforms() {
    let mut backend = RecordingBackend::new();
    let mut viewer = Viewer::new(Config::default());
    viewer.init(&mut backend);
    let json = logs::json("cart").expect("cart fixture");
    let log = mechviz_viewer_core::parse_log_json(&json).expect("parse");
    viewer
        .load_for_mixer(log, &mut backend)
        .expect("mixer load");

    viewer.tick(0.5, Inputs::default(), &mut backend);
    assert_eq!(backend.mixer_times, vec![0.5]);
    assert!(
        backend.transforms.is_empty(),
        "mixer path must not apply per-group transforms"
    );
}

#[test]
fn reverse_mixer_playback_loops_from_the_end() {
    let mut backend = RecordingBackend::new();
    let mut viewer = Viewer::new(Config::default());
    viewer.init(&mut backend);
    let json = logs::json("cart").expect("cart fixture");
    let log = mechviz_viewer_core::parse_log_json(&json).expect("parse");
    viewer.load_for_mixer(log, &mut backend).expect("mixer load");
    viewer.set_speed(-1.0);

    for _ in 0..4 {
        viewer.tick(0.5, Inputs::default(), &mut backend);
    }
    // Each excursion below zero restarts the clock at stop and keeps
    // counting down from there.
    assert_eq!(backend.mixer_times, vec![2.0, 1.5, 1.0, 0.5]);
    assert!((viewer.elapsed_time() - 0.5).abs() < 1e-6);
}

#[test]
fn shutdown_stops_ticks_and_releases_the_scene() {
    let mut backend = RecordingBackend::new();
    let mut viewer = cart_viewer(&mut backend);

    viewer.shutdown(&mut backend);
    assert!(!viewer.is_running());
    assert!(viewer.model().is_none());
    assert_eq!(backend.removed.len(), 2);

    let renders = backend.renders;
    let out = viewer.tick(1.0, Inputs::default(), &mut backend);
    assert!(out.is_empty(), "ticks after shutdown are no-ops");
    assert_eq!(backend.renders, renders);

    // init() brings the loop back.
    viewer.init(&mut backend);
    assert!(viewer.is_running());
}

#[test]
fn ticks_without_a_model_apply_no_transforms() {
    let mut backend = RecordingBackend::new();
    let mut viewer = Viewer::new(Config::default());
    viewer.init(&mut backend);

    viewer.tick(0.1, Inputs::default(), &mut backend);
    assert!(backend.transforms.is_empty());
}
