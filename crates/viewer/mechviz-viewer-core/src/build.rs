//! Scene builder: validated log -> live scene model.
//!
//! The build runs in two phases. Phase one resolves every shape, fetching
//! all mesh geometry up front; any failure aborts before a single node has
//! been inserted, so a rejected load leaves no partial scene behind. Phase
//! two commits group and shape nodes to the backend and assembles the model.

use hashbrown::HashMap;

use crate::backend::{MeshHandle, RenderBackend};
use crate::data::{ShapeKind, SimLog};
use crate::error::ViewerError;
use crate::ids::IdAllocator;
use crate::model::{Drive, GroupNode, SceneModel, ShapeNode};
use crate::shape::{resolve_shape, ResolvedShape};

/// Build a scene model from a validated log, inserting nodes into the
/// backend. The caller installs the returned model atomically.
pub fn build_scene(
    log: SimLog,
    drive: Drive,
    backend: &mut dyn RenderBackend,
    ids: &mut IdAllocator,
) -> Result<SceneModel, ViewerError> {
    log.validate()?;

    // Phase one: fetch mesh assets, then resolve every shape.
    let meshes = fetch_meshes(&log, backend)?;
    let mut resolved: Vec<Vec<ResolvedShape>> = Vec::with_capacity(log.groups.len());
    for group in &log.groups {
        let mut shapes = Vec::with_capacity(group.objs.len());
        for obj in &group.objs {
            shapes.push(resolve_shape(obj, &meshes)?);
        }
        resolved.push(shapes);
    }

    // Phase two: commit nodes in log order.
    let mut groups = Vec::with_capacity(log.groups.len());
    for (group, shapes) in log.groups.iter().zip(resolved) {
        let group_node = ids.alloc_node();
        backend.add_group(group_node, &group.name);

        let mut shape_nodes = Vec::with_capacity(shapes.len());
        for shape in shapes {
            let node = ids.alloc_node();
            let shape_node = ShapeNode {
                node,
                geometry: shape.geometry,
                local_rotation: shape.local_rotation,
                local_scale: shape.local_scale,
                material: shape.material,
            };
            backend.add_shape(node, group_node, &shape_node);
            shape_nodes.push(shape_node);
        }

        groups.push(GroupNode {
            node: group_node,
            name: group.name.clone(),
            shapes: shape_nodes,
        });
    }

    Ok(SceneModel {
        name: log.name,
        start: log.start,
        stop: log.stop,
        step: log.step,
        drive,
        groups,
        frames: log.frames,
    })
}

/// Fetch every distinct mesh URL referenced by the log.
/// The first failure rejects the whole build.
fn fetch_meshes(
    log: &SimLog,
    backend: &mut dyn RenderBackend,
) -> Result<HashMap<String, MeshHandle>, ViewerError> {
    let mut meshes: HashMap<String, MeshHandle> = HashMap::new();
    for group in &log.groups {
        for obj in &group.objs {
            if let ShapeKind::Mesh { url, .. } = &obj.kind {
                if meshes.contains_key(url.as_str()) {
                    continue;
                }
                let handle =
                    backend
                        .load_mesh(url)
                        .map_err(|message| ViewerError::Asset {
                            url: url.clone(),
                            message,
                        })?;
                meshes.insert(url.clone(), handle);
            }
        }
    }
    Ok(meshes)
}
