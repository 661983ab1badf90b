#![allow(dead_code)]
//! Output contracts from the viewer.
//!
//! Each tick produces a batch of semantic events. Adapters drain these and
//! forward them to the host UI (the TimeChanged stream is what keeps an
//! external scrubber in sync with rendered state rather than with the
//! free-running clock).

use serde::{Deserialize, Serialize};

use crate::model::AnimationInfo;

/// Discrete semantic signals emitted during a tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum ViewerEvent {
    /// Quantized resolved time (frame * step), emitted once per resolution
    /// while the instance is active.
    TimeChanged { time: f32 },
    /// A new scene model replaced the previous one.
    SceneReplaced { info: AnimationInfo },
    PlaybackToggled { playing: bool },
    /// Non-fatal: the prior material stays in effect.
    TextureFailed { group: String, message: String },
    Shutdown,
}

/// Events produced by Viewer::tick() and control operations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<ViewerEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: ViewerEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
