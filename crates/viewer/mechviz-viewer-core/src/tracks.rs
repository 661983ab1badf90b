#![allow(dead_code)]
//! Keyframe-interchange baking.
//!
//! Alternative to direct frame application: emit one node per group (flat
//! under the scene root, since all shapes in a group share one transform)
//! with translation/rotation tracks sampled at the log's native times. An
//! external mixer consumes these and owns any smoothing between samples;
//! the timeline engine then only sets the mixer clock.

use serde::{Deserialize, Serialize};

use crate::data::SimLog;

/// Per-node keyframe tracks: parallel arrays, one entry per source frame,
/// times strictly increasing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NodeTrack {
    /// Node name (the group name).
    pub node: String,
    pub times: Vec<f32>,
    pub positions: Vec<[f32; 3]>,
    pub rotations: Vec<[f32; 4]>,
}

/// Clip set for a whole log: flat node hierarchy plus per-node tracks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyframeClipSet {
    pub name: String,
    pub start: f32,
    pub stop: f32,
    pub step: f32,
    pub tracks: Vec<NodeTrack>,
}

/// Sample the frame table into per-group keyframe tracks.
pub fn bake_keyframe_tracks(log: &SimLog) -> KeyframeClipSet {
    let frame_count = log.last_frame_index() + 1;

    let mut tracks = Vec::with_capacity(log.groups.len());
    for group in &log.groups {
        let mut times = Vec::with_capacity(frame_count);
        let mut positions = Vec::with_capacity(frame_count);
        let mut rotations = Vec::with_capacity(frame_count);
        for f in 0..frame_count {
            // Presence of every group in every covered frame is validated
            // before a log reaches this point.
            let sample = &log.frames[f][group.name.as_str()];
            times.push(log.start + f as f32 * log.step);
            positions.push(sample.position);
            rotations.push(sample.quaternion);
        }
        tracks.push(NodeTrack {
            node: group.name.clone(),
            times,
            positions,
            rotations,
        });
    }

    KeyframeClipSet {
        name: log.name.clone(),
        start: log.start,
        stop: log.stop,
        step: log.step,
        tracks,
    }
}

/// Export a clip set as serde_json::Value (stable schema for interchange).
pub fn export_clip_json(clips: &KeyframeClipSet) -> serde_json::Value {
    serde_json::to_value(clips).unwrap_or(serde_json::Value::Null)
}
