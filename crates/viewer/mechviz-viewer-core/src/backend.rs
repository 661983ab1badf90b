#![allow(dead_code)]
//! Render-backend seam.
//!
//! The core never draws. Hosts (a wgpu viewer, a web canvas, a test harness)
//! implement RenderBackend and the engine talks to it in terms of opaque
//! NodeIds and small string asset handles. Asset loads are synchronous from
//! the core's point of view; a host that fetches over the network completes
//! the fetch before returning from load_mesh/load_texture.

use hashbrown::{HashMap, HashSet};

use crate::ids::NodeId;
use crate::model::ShapeNode;
use crate::shape::Material;

/// Opaque backend handle for fetched mesh geometry (small string key).
pub type MeshHandle = String;
/// Opaque backend handle for a fetched texture (small string key).
pub type TextureHandle = String;

/// Host-implemented scene-graph, asset, and camera operations.
pub trait RenderBackend {
    /// Insert an empty composite node for a rigid body.
    fn add_group(&mut self, node: NodeId, name: &str);

    /// Insert a shape node under a previously added group.
    fn add_shape(&mut self, node: NodeId, parent: NodeId, shape: &ShapeNode);

    /// Remove a node and its children from the scene graph.
    fn remove_node(&mut self, node: NodeId);

    /// Position plus quaternion (x, y, z, w).
    fn set_node_transform(&mut self, node: NodeId, position: [f32; 3], quaternion: [f32; 4]);

    /// Replace a shape node's material.
    fn set_material(&mut self, node: NodeId, material: &Material);

    /// Issue one draw of the current scene state.
    fn render(&mut self);

    /// Fetch mesh geometry by URL. Errors reject the enclosing load.
    fn load_mesh(&mut self, url: &str) -> Result<MeshHandle, String>;

    /// Fetch a texture by URL. Errors leave the prior material in effect.
    fn load_texture(&mut self, url: &str) -> Result<TextureHandle, String>;

    fn set_camera(&mut self, position: [f32; 3], target: [f32; 3]);

    /// Point the camera at a target without moving it (follow mode).
    fn look_at(&mut self, target: [f32; 3]);

    /// Enable or disable external orbit controls.
    fn set_orbit_enabled(&mut self, enabled: bool);

    fn set_viewport(&mut self, width: u32, height: u32);

    /// Show or hide the ground/grid helpers.
    fn set_floor_visible(&mut self, visible: bool);

    /// Advance the external keyframe mixer's local clock. Only meaningful
    /// for hosts consuming the keyframe-interchange path; default no-op.
    fn set_mixer_time(&mut self, _time: f32) {}
}

/// In-memory backend that records every call.
/// Used by the crate's tests and as a reference for adapter authors.
#[derive(Default, Debug)]
pub struct RecordingBackend {
    pub groups: Vec<(NodeId, String)>,
    pub shapes: Vec<(NodeId, NodeId)>,
    pub removed: Vec<NodeId>,
    pub transforms: HashMap<NodeId, ([f32; 3], [f32; 4])>,
    pub materials: HashMap<NodeId, Material>,
    pub renders: usize,
    pub mesh_loads: Vec<String>,
    pub texture_loads: Vec<String>,
    pub camera: Option<([f32; 3], [f32; 3])>,
    pub look_targets: Vec<[f32; 3]>,
    pub orbit_enabled: Option<bool>,
    pub viewport: Option<(u32, u32)>,
    pub floor_visible: Option<bool>,
    pub mixer_times: Vec<f32>,

    /// URLs configured to fail, for exercising rejection paths.
    pub failing_meshes: HashSet<String>,
    pub failing_textures: HashSet<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_mesh(&mut self, url: &str) {
        self.failing_meshes.insert(url.to_string());
    }

    pub fn fail_texture(&mut self, url: &str) {
        self.failing_textures.insert(url.to_string());
    }

    pub fn transform_of(&self, node: NodeId) -> Option<([f32; 3], [f32; 4])> {
        self.transforms.get(&node).copied()
    }
}

impl RenderBackend for RecordingBackend {
    fn add_group(&mut self, node: NodeId, name: &str) {
        self.groups.push((node, name.to_string()));
    }

    fn add_shape(&mut self, node: NodeId, parent: NodeId, shape: &ShapeNode) {
        self.shapes.push((node, parent));
        self.materials.insert(node, shape.material.clone());
    }

    fn remove_node(&mut self, node: NodeId) {
        self.removed.push(node);
        self.groups.retain(|(id, _)| *id != node);
        self.shapes.retain(|(id, parent)| *id != node && *parent != node);
    }

    fn set_node_transform(&mut self, node: NodeId, position: [f32; 3], quaternion: [f32; 4]) {
        self.transforms.insert(node, (position, quaternion));
    }

    fn set_material(&mut self, node: NodeId, material: &Material) {
        self.materials.insert(node, material.clone());
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn load_mesh(&mut self, url: &str) -> Result<MeshHandle, String> {
        self.mesh_loads.push(url.to_string());
        if self.failing_meshes.contains(url) {
            return Err("unreachable".into());
        }
        Ok(format!("mesh:{url}"))
    }

    fn load_texture(&mut self, url: &str) -> Result<TextureHandle, String> {
        self.texture_loads.push(url.to_string());
        if self.failing_textures.contains(url) {
            return Err("unreachable".into());
        }
        Ok(format!("tex:{url}"))
    }

    fn set_camera(&mut self, position: [f32; 3], target: [f32; 3]) {
        self.camera = Some((position, target));
    }

    fn look_at(&mut self, target: [f32; 3]) {
        self.look_targets.push(target);
    }

    fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = Some(enabled);
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    fn set_floor_visible(&mut self, visible: bool) {
        self.floor_visible = Some(visible);
    }

    fn set_mixer_time(&mut self, time: f32) {
        self.mixer_times.push(time);
    }
}
