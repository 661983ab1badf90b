#![allow(dead_code)]
//! mechviz viewer core (render-backend agnostic)
//!
//! Converts schema-described mechanical-simulation logs into an animated
//! scene model and plays them back on a frame-rate-independent timeline.
//! Rendering, DOM/UI, and file ingestion live in host adapters behind the
//! RenderBackend trait.

pub mod backend;
pub mod build;
pub mod camera;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod model;
pub mod outputs;
pub mod raw_log;
pub mod shape;
pub mod timeline;
pub mod tracks;

// Re-exports for consumers (adapters)
pub use backend::{MeshHandle, RecordingBackend, RenderBackend, TextureHandle};
pub use build::build_scene;
pub use config::Config;
pub use data::{Axis, FrameTable, GroupSpec, Sample, ShapeKind, ShapeSpec, SimLog};
pub use error::ViewerError;
pub use ids::NodeId;
pub use inputs::{Inputs, ViewerCommand};
pub use model::{AnimationInfo, Drive, GroupNode, GroupSummary, SceneModel, ShapeNode};
pub use outputs::{Outputs, ViewerEvent};
pub use raw_log::parse_log_json;
pub use shape::{Geometry, Material};
pub use timeline::{resolve_frame_index, Viewer};
pub use tracks::{bake_keyframe_tracks, export_clip_json, KeyframeClipSet, NodeTrack};
