#![allow(dead_code)]
//! Deterministic geometry resolution and shape materials.
//!
//! A ShapeKind from the log resolves to one Geometry plus optional
//! shape-local static rotation/scale baked into the shape node. The static
//! part never changes during playback; per-frame motion lives on the group.

use std::f32::consts::FRAC_1_SQRT_2;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::backend::{MeshHandle, TextureHandle};
use crate::data::{Axis, ShapeKind, ShapeSpec};
use crate::error::ViewerError;

/// Resolved geometry for one shape node.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Geometry {
    /// Full extents along x/y/z.
    Cuboid { extents: [f32; 3] },
    /// Long axis along y unless a shape-local rotation reorients it.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Sphere { radius: f32 },
    /// Backend-owned geometry previously fetched by URL.
    Mesh { handle: MeshHandle },
}

/// Static appearance of one shape. Replaced wholesale on color/texture
/// swaps; opacity is carried over explicitly by the swap helpers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Material {
    /// Packed RGB (0xRRGGBB).
    pub color: u32,
    /// Opacity in [0,1]; shapes always render with transparency enabled.
    pub opacity: f32,
    pub texture: Option<TextureHandle>,
}

impl Material {
    pub fn new(color: u32, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            texture: None,
        }
    }

    /// New material with a different color, keeping the current opacity.
    pub fn recolored(&self, color: u32) -> Self {
        Self {
            color,
            opacity: self.opacity,
            texture: None,
        }
    }

    /// New material with a texture map, keeping the current opacity.
    pub fn with_texture(&self, handle: TextureHandle) -> Self {
        Self {
            color: self.color,
            opacity: self.opacity,
            texture: Some(handle),
        }
    }

    /// Color as "#rrggbb" for the UI legend.
    pub fn hex_string(&self) -> String {
        format!("#{:06x}", self.color & 0x00ff_ffff)
    }
}

/// Geometry plus the static local transform baked into the shape node.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedShape {
    pub geometry: Geometry,
    /// Quaternion (x, y, z, w) reorienting the geometry, if any.
    pub local_rotation: Option<[f32; 4]>,
    pub local_scale: Option<[f32; 3]>,
    pub material: Material,
}

/// 90 degrees about z, reorienting a cylinder's long axis from y to z.
const Z_UP_ROTATION: [f32; 4] = [0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2];

/// Resolve a shape spec against already-fetched mesh handles.
/// Mesh URLs must have been loaded beforehand; the builder guarantees this.
pub fn resolve_shape(
    spec: &ShapeSpec,
    meshes: &HashMap<String, MeshHandle>,
) -> Result<ResolvedShape, ViewerError> {
    let material = Material::new(spec.color, spec.transparency.unwrap_or(1.0));

    let (geometry, local_rotation, local_scale) = match &spec.kind {
        ShapeKind::Box { scale } => (Geometry::Cuboid { extents: *scale }, None, None),
        ShapeKind::Cylinder { scale, axis } => {
            let rotation = match axis {
                Axis::Z => Some(Z_UP_ROTATION),
                Axis::X => None,
            };
            (
                Geometry::Cylinder {
                    radius_top: scale[0],
                    radius_bottom: scale[1],
                    height: scale[2],
                },
                rotation,
                None,
            )
        }
        ShapeKind::Ellipsoid { scale } => (
            Geometry::Sphere {
                radius: scale[0] * 0.5,
            },
            None,
            Some([1.0, scale[1] / scale[0], scale[2] / scale[0]]),
        ),
        ShapeKind::Sphere { diameter } => (Geometry::Sphere { radius: *diameter }, None, None),
        ShapeKind::Mesh { url, scale } => {
            let handle = meshes.get(url.as_str()).cloned().ok_or_else(|| {
                ViewerError::Asset {
                    url: url.clone(),
                    message: "geometry was not fetched before resolution".into(),
                }
            })?;
            (Geometry::Mesh { handle }, None, *scale)
        }
    };

    Ok(ResolvedShape {
        geometry,
        local_rotation,
        local_scale,
        material,
    })
}
