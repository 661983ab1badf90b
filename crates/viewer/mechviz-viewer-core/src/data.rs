#![allow(dead_code)]
//! Canonical simulation-log data model.
//! The raw wire schema and its conversion live in raw_log.rs.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// One sampled pose for a group: position plus quaternion (x, y, z, w).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub position: [f32; 3],
    pub quaternion: [f32; 4],
}

/// Ordered frame table: one map of group name -> pose per discrete frame.
pub type FrameTable = Vec<HashMap<String, Sample>>;

/// Long-axis selector for cylinders. The default construction points the
/// long axis along y; `Z` bakes a static 90-degree shape-local rotation.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Axis {
    #[default]
    #[serde(rename = "x")]
    X,
    #[serde(rename = "z")]
    Z,
}

/// Closed set of shape constructions a log may request.
/// Each variant carries only its relevant fields; dispatch is exhaustive so
/// a new shape kind is a compile-time-checked addition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ShapeKind {
    /// Rectangular prism with full extents along each axis.
    Box { scale: [f32; 3] },
    /// Top radius, bottom radius, height from `scale`.
    Cylinder { scale: [f32; 3], axis: Axis },
    /// Unit sphere scaled non-uniformly; `scale[0]` sets the base size.
    Ellipsoid { scale: [f32; 3] },
    /// The field is treated literally as the constructor's radius argument
    /// for compatibility with existing logs.
    Sphere { diameter: f32 },
    /// External geometry fetched by URL, with an optional instance scale.
    Mesh { url: String, scale: Option<[f32; 3]> },
}

/// One shape of a group: geometry request plus static appearance.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    /// Packed RGB (0xRRGGBB).
    pub color: u32,
    /// Opacity in [0,1]; absent means fully opaque.
    pub transparency: Option<f32>,
}

/// A rigid body: all its shapes move together under one transform per frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GroupSpec {
    pub name: String,
    pub objs: Vec<ShapeSpec>,
}

/// Canonical validated log (single supported schema).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimLog {
    pub name: String,
    pub start: f32,
    pub stop: f32,
    pub step: f32,
    pub groups: Vec<GroupSpec>,
    pub frames: FrameTable,
}

impl SimLog {
    /// Index of the final sample implied by the time window.
    #[inline]
    pub fn last_frame_index(&self) -> usize {
        ((self.stop - self.start) / self.step).floor() as usize
    }

    /// Validate structural invariants before any scene is built.
    /// Rejections here guarantee no partial scene is ever left behind.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ViewerError::Schema(format!(
                "step must be > 0, got {}",
                self.step
            )));
        }
        if !self.start.is_finite() || !self.stop.is_finite() || self.stop <= self.start {
            return Err(ViewerError::Schema(format!(
                "stop ({}) must be greater than start ({})",
                self.stop, self.start
            )));
        }
        if self.groups.is_empty() {
            return Err(ViewerError::Schema("log has no groups".into()));
        }

        let mut seen = hashbrown::HashSet::with_capacity(self.groups.len());
        for group in &self.groups {
            if group.name.is_empty() {
                return Err(ViewerError::Schema("group with empty name".into()));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(ViewerError::Schema(format!(
                    "duplicate group name '{}'",
                    group.name
                )));
            }
            if group.objs.is_empty() {
                return Err(ViewerError::Schema(format!(
                    "group '{}' has no shapes",
                    group.name
                )));
            }
        }

        // The table must cover every index through the boundary duplicate.
        let expected = self.last_frame_index() + 1;
        if self.frames.len() < expected {
            return Err(ViewerError::FrameTable(format!(
                "expected at least {} samples for window [{}, {}] at step {}, got {}",
                expected,
                self.start,
                self.stop,
                self.step,
                self.frames.len()
            )));
        }
        for (idx, frame) in self.frames.iter().take(expected).enumerate() {
            for group in &self.groups {
                if !frame.contains_key(group.name.as_str()) {
                    return Err(ViewerError::FrameTable(format!(
                        "frame {idx} is missing a sample for group '{}'",
                        group.name
                    )));
                }
            }
        }
        Ok(())
    }
}
