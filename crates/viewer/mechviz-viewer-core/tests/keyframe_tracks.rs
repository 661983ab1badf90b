use mechviz_test_fixtures::logs;
use mechviz_viewer_core::{bake_keyframe_tracks, export_clip_json, parse_log_json};

#[test]
fn one_track_per_group_at_native_times() {
    let json = logs::json("cart").expect("cart fixture");
    let log = parse_log_json(&json).expect("parse");

    let clips = bake_keyframe_tracks(&log);
    assert_eq!(clips.name, "cart");
    assert_eq!(clips.tracks.len(), 2);

    let chassis = &clips.tracks[0];
    assert_eq!(chassis.node, "chassis");
    assert_eq!(chassis.times, vec![0.0, 1.0, 2.0]);
    assert_eq!(chassis.positions.len(), chassis.times.len());
    assert_eq!(chassis.rotations.len(), chassis.times.len());
    assert_eq!(chassis.positions[1], [10.0, 10.0, 0.0]);

    for track in &clips.tracks {
        for pair in track.times.windows(2) {
            assert!(pair[0] < pair[1], "track times must increase");
        }
    }
}

#[test]
fn fractional_steps_keep_one_entry_per_source_frame() {
    let json = logs::json("shape-sampler").expect("fixture");
    let log = parse_log_json(&json).expect("parse");

    let clips = bake_keyframe_tracks(&log);
    let track = &clips.tracks[0];
    assert_eq!(track.times, vec![0.0, 0.5, 1.0]);
}

#[test]
fn exported_clip_json_is_stable() {
    let json = logs::json("cart").expect("cart fixture");
    let log = parse_log_json(&json).expect("parse");

    let exported = export_clip_json(&bake_keyframe_tracks(&log));
    assert_eq!(exported["name"], "cart");
    assert_eq!(exported["tracks"].as_array().map(|t| t.len()), Some(2));
    assert_eq!(exported["tracks"][0]["node"], "chassis");
    assert_eq!(exported["tracks"][0]["times"][2], 2.0);
}
