#![allow(dead_code)]
//! Animated scene model: the builder's output and the engine's working set.

use serde::{Deserialize, Serialize};

use crate::data::FrameTable;
use crate::ids::NodeId;
use crate::shape::{Geometry, Material};

/// How the timeline engine drives a loaded model each tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drive {
    /// Apply per-group transforms from the frame table directly.
    #[default]
    Frames,
    /// Only advance the external keyframe mixer's local clock; the mixer
    /// owns per-node application.
    Mixer,
}

/// One shape instance under a group, with its static local transform.
#[derive(Clone, Debug)]
pub struct ShapeNode {
    pub node: NodeId,
    pub geometry: Geometry,
    pub local_rotation: Option<[f32; 4]>,
    pub local_scale: Option<[f32; 3]>,
    pub material: Material,
}

/// A named rigid body; all shapes share the group's per-frame transform.
#[derive(Clone, Debug)]
pub struct GroupNode {
    pub node: NodeId,
    pub name: String,
    pub shapes: Vec<ShapeNode>,
}

/// The live scene: node tree plus the originating frame table.
/// Created once per load; a new load fully replaces it.
#[derive(Clone, Debug)]
pub struct SceneModel {
    pub name: String,
    pub start: f32,
    pub stop: f32,
    pub step: f32,
    pub drive: Drive,
    pub groups: Vec<GroupNode>,
    pub frames: FrameTable,
}

/// Denormalized per-group legend entry handed to the UI after load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub name: String,
    pub transparency: f32,
    /// "#rrggbb"
    pub color: String,
}

/// Load result for the UI: time window plus the legend, so the host never
/// has to walk the model a second time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimationInfo {
    pub start: f32,
    pub stop: f32,
    pub step: f32,
    pub name: String,
    pub groups: Vec<GroupSummary>,
}

impl SceneModel {
    /// Index of the final sample implied by the time window.
    #[inline]
    pub fn last_frame_index(&self) -> usize {
        ((self.stop - self.start) / self.step).floor() as usize
    }

    pub fn group(&self, name: &str) -> Option<&GroupNode> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut GroupNode> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Legend entries from each group's first shape, in log order.
    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .map(|g| {
                let material = &g.shapes[0].material;
                GroupSummary {
                    name: g.name.clone(),
                    transparency: material.opacity,
                    color: material.hex_string(),
                }
            })
            .collect()
    }

    pub fn info(&self) -> AnimationInfo {
        AnimationInfo {
            start: self.start,
            stop: self.stop,
            step: self.step,
            name: self.name.clone(),
            groups: self.summaries(),
        }
    }
}
