//! Wire-format log parsing.
//!
//! Public API: parse log JSON as produced by the simulation loggers into the
//! canonical SimLog (data.rs). Wire field names are the de facto contract
//! with the log-producing side and are preserved exactly:
//! start/stop/step/groups/objs/type/scale/diameter/color/vertical/url/
//! position/quaternion.
//!
//! Notes:
//! - `color` arrives as a JSON number or a numeric string; both forms are
//!   accepted ("#rrggbb" and "0x" prefixes parse as hex, anything else as
//!   decimal).
//! - Unknown shape `type` values are rejected, never silently skipped.
//! - Validation (step/stop sanity, unique names, frame-table coverage) runs
//!   before the SimLog is returned.

use hashbrown::HashMap;
use serde::Deserialize;

use crate::data::{Axis, FrameTable, GroupSpec, Sample, ShapeKind, ShapeSpec, SimLog};
use crate::error::ViewerError;

/// Parse a raw JSON log into a validated SimLog.
pub fn parse_log_json(s: &str) -> Result<SimLog, ViewerError> {
    let raw: RawLog =
        serde_json::from_str(s).map_err(|e| ViewerError::Schema(format!("parse error: {e}")))?;
    from_raw(raw)
}

/// Convert an already-deserialized raw log. Exposed for hosts that hand the
/// core a parsed value instead of text.
pub fn from_raw(raw: RawLog) -> Result<SimLog, ViewerError> {
    let mut groups = Vec::with_capacity(raw.groups.len());
    for rg in raw.groups {
        let mut objs = Vec::with_capacity(rg.objs.len());
        for obj in rg.objs {
            objs.push(to_shape_spec(&rg.name, obj)?);
        }
        groups.push(GroupSpec {
            name: rg.name,
            objs,
        });
    }

    let mut frames: FrameTable = Vec::with_capacity(raw.frames.len());
    for rf in raw.frames {
        let mut frame = HashMap::with_capacity(rf.len());
        for (name, rs) in rf {
            frame.insert(
                name,
                Sample {
                    position: [
                        rs.position[0] as f32,
                        rs.position[1] as f32,
                        rs.position[2] as f32,
                    ],
                    quaternion: [
                        rs.quaternion[0] as f32,
                        rs.quaternion[1] as f32,
                        rs.quaternion[2] as f32,
                        rs.quaternion[3] as f32,
                    ],
                },
            );
        }
        frames.push(frame);
    }

    let log = SimLog {
        name: raw.name.unwrap_or_default(),
        start: raw.start as f32,
        stop: raw.stop as f32,
        step: raw.step as f32,
        groups,
        frames,
    };
    log.validate()?;
    Ok(log)
}

fn to_shape_spec(group: &str, obj: RawShape) -> Result<ShapeSpec, ViewerError> {
    let color = parse_color(&obj.color)?;
    let scale3 = |field: &Option<[f64; 3]>| -> Result<[f32; 3], ViewerError> {
        field
            .map(|s| [s[0] as f32, s[1] as f32, s[2] as f32])
            .ok_or_else(|| {
                ViewerError::Schema(format!(
                    "shape '{}' in group '{group}' is missing 'scale'",
                    obj.r#type
                ))
            })
    };

    let kind = match obj.r#type.as_str() {
        "box" => ShapeKind::Box {
            scale: scale3(&obj.scale)?,
        },
        "cylinder" => {
            let axis = match obj.vertical.as_deref() {
                Some("z") => Axis::Z,
                _ => Axis::X,
            };
            ShapeKind::Cylinder {
                scale: scale3(&obj.scale)?,
                axis,
            }
        }
        "ellipsoid" => {
            let scale = scale3(&obj.scale)?;
            if scale[0] == 0.0 {
                return Err(ViewerError::Schema(format!(
                    "ellipsoid in group '{group}' has zero base scale"
                )));
            }
            ShapeKind::Ellipsoid { scale }
        }
        "sphere" => ShapeKind::Sphere {
            diameter: obj.diameter.ok_or_else(|| {
                ViewerError::Schema(format!("sphere in group '{group}' is missing 'diameter'"))
            })? as f32,
        },
        "mesh" => ShapeKind::Mesh {
            url: obj.url.ok_or_else(|| {
                ViewerError::Schema(format!("mesh in group '{group}' is missing 'url'"))
            })?,
            scale: obj.scale.map(|s| [s[0] as f32, s[1] as f32, s[2] as f32]),
        },
        other => {
            return Err(ViewerError::Schema(format!(
                "unknown shape type '{other}' in group '{group}'"
            )));
        }
    };

    Ok(ShapeSpec {
        kind,
        color,
        transparency: obj.transparency.map(|t| t as f32),
    })
}

fn parse_color(raw: &RawColor) -> Result<u32, ViewerError> {
    match raw {
        RawColor::Number(n) => Ok(*n),
        RawColor::Text(s) => {
            let s = s.trim();
            let parsed = if let Some(hex) = s.strip_prefix('#') {
                u32::from_str_radix(hex, 16)
            } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                u32::from_str_radix(hex, 16)
            } else {
                s.parse::<u32>()
            };
            parsed.map_err(|_| ViewerError::Schema(format!("unparseable color '{s}'")))
        }
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
pub struct RawLog {
    #[serde(default)]
    pub name: Option<String>,
    pub start: f64,
    pub stop: f64,
    pub step: f64,
    pub groups: Vec<RawGroup>,
    #[serde(default)]
    pub frames: Vec<HashMap<String, RawSample>>,
}

#[derive(Debug, Deserialize)]
pub struct RawGroup {
    pub name: String,
    pub objs: Vec<RawShape>,
}

#[derive(Debug, Deserialize)]
pub struct RawShape {
    pub r#type: String,
    #[serde(default)]
    pub scale: Option<[f64; 3]>,
    #[serde(default)]
    pub diameter: Option<f64>,
    pub color: RawColor,
    #[serde(default)]
    pub vertical: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub transparency: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Number(u32),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct RawSample {
    pub position: [f64; 3],
    pub quaternion: [f64; 4],
}
