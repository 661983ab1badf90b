#![allow(dead_code)]
//! Follow-camera state owned by one viewer instance.

/// Camera bookkeeping the core tracks between renders. Projection and orbit
/// math live in the backend; the core only decides where to look.
#[derive(Clone, Copy, Debug)]
pub struct CameraState {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// When false, each render points the camera at the follow target.
    pub free_cam: bool,
    /// First group's resolved position, updated on every frame application.
    pub follow_target: [f32; 3],
}

impl CameraState {
    pub fn new(position: [f32; 3], target: [f32; 3]) -> Self {
        Self {
            position,
            target,
            free_cam: false,
            follow_target: target,
        }
    }
}
