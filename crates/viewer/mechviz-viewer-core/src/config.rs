#![allow(dead_code)]
//! Core configuration for mechviz-viewer-core.

use serde::{Deserialize, Serialize};

/// Configuration for a single viewer instance.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Target render rate (Hz). Draw calls are throttled to this cadence;
    /// transform updates still run on every tick.
    pub render_fps: f32,

    /// Default camera pose applied on init and reset_camera.
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],

    /// Maximum events to retain per tick before backpressure policy applies.
    pub max_events_per_tick: usize,

    /// Feature flags (placeholder; future: derivative tracks, smoothing).
    pub features: Features,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Features {
    /// Reserved for future toggles.
    pub reserved0: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render_fps: 60.0,
            camera_position: [600.0, 600.0, 1000.0],
            camera_target: [0.0, 0.0, 0.0],
            max_events_per_tick: 1024,
            features: Features::default(),
        }
    }
}
