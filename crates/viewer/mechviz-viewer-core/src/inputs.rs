#![allow(dead_code)]
//! Input contracts for the viewer.
//!
//! UI adapters build these each animation-frame callback and pass them into
//! Viewer::tick(). Every command is also available as a direct method on
//! Viewer for hosts that call straight in.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Commands applied before the time step.
    #[serde(default)]
    pub commands: Vec<ViewerCommand>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ViewerCommand {
    TogglePlay,
    SetPlay { playing: bool },
    /// Seek; takes effect on the next resolution.
    SetTime { time: f32 },
    /// Signed multiplier: negative reverses, zero freezes without pausing.
    SetSpeed { speed: f32 },
    /// Whether this instance drives the shared external time channel.
    SetActive { active: bool },
    /// Free-cam and orbit-control enablement flip together.
    CameraLock { unlocked: bool },
    DisplayFloor { visible: bool },
    ResetCamera,
    Resize { width: u32, height: u32 },
    ChangeColor { group: String, color: u32 },
    ChangeTransparency { group: String, value: f32 },
    ChangeTexture { group: String, url: String },
}
