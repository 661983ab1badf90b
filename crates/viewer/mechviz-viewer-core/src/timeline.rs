//! Viewer: playback state ownership and the per-tick update path.
//!
//! One Viewer instance per active view. Each instance owns its model,
//! clock, camera bookkeeping, and outputs; nothing is shared between
//! instances, so multiple simultaneous viewers cannot interfere. The host
//! drives tick() from its animation-frame callback and drains Outputs.

use log::warn;

use crate::backend::RenderBackend;
use crate::build::build_scene;
use crate::camera::CameraState;
use crate::config::Config;
use crate::data::SimLog;
use crate::error::ViewerError;
use crate::ids::IdAllocator;
use crate::inputs::{Inputs, ViewerCommand};
use crate::model::{AnimationInfo, Drive, SceneModel};
use crate::outputs::{Outputs, ViewerEvent};
use crate::raw_log::parse_log_json;

/// Wrap a free-running clock into the log's time window: a negative
/// excursion restarts from the end; past the end wraps around (looping).
#[inline]
fn wrap_time(stop: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t = stop;
    }
    if t > stop {
        t %= stop;
    }
    t
}

/// Map a clock value to a discrete frame index.
///
/// The wrapped time rounds to the nearest frame; an index that would reach
/// the one-past-end boundary sample is pulled back by one, so the final
/// table row (the boundary duplicate) is repeated rather than indexed past.
pub fn resolve_frame_index(start: f32, stop: f32, step: f32, t: f32) -> usize {
    let last = ((stop - start) / step).floor().max(0.0);
    let t = wrap_time(stop, t);
    let mut frame = (t / step).round().max(0.0);
    if frame >= (stop - start) / step {
        frame -= 1.0;
    }
    frame.clamp(0.0, last) as usize
}

/// Playback engine and scene owner for one view.
#[derive(Debug)]
pub struct Viewer {
    cfg: Config,
    ids: IdAllocator,
    model: Option<SceneModel>,

    // Playback state. elapsed is free-running and only normalized into the
    // window at resolution time, never clamped on storage.
    elapsed: f32,
    playing: bool,
    speed: f32,
    active: bool,
    running: bool,

    camera: CameraState,
    floor_visible: bool,

    /// Wall time accumulated since the last draw, in milliseconds.
    render_accum_ms: f32,

    outputs: Outputs,
}

impl Viewer {
    pub fn new(cfg: Config) -> Self {
        let camera = CameraState::new(cfg.camera_position, cfg.camera_target);
        Self {
            cfg,
            ids: IdAllocator::new(),
            model: None,
            elapsed: 0.0,
            playing: true,
            speed: 1.0,
            active: false,
            running: false,
            camera,
            floor_visible: true,
            render_accum_ms: 0.0,
            outputs: Outputs::default(),
        }
    }

    /// Set up the backend view and start accepting ticks.
    pub fn init(&mut self, backend: &mut dyn RenderBackend) {
        backend.set_camera(self.cfg.camera_position, self.cfg.camera_target);
        backend.set_floor_visible(self.floor_visible);
        backend.set_orbit_enabled(self.camera.free_cam);
        self.render_accum_ms = 0.0;
        self.running = true;
    }

    /// Load from raw log JSON. See [`Viewer::load_animation`].
    pub fn load_animation_json(
        &mut self,
        json: &str,
        backend: &mut dyn RenderBackend,
    ) -> Result<AnimationInfo, ViewerError> {
        let log = parse_log_json(json)?;
        self.load_animation(log, backend)
    }

    /// Build a scene from the log and install it, fully replacing any prior
    /// model. On failure the previous scene (if any) is left untouched and
    /// no new nodes exist in the backend.
    pub fn load_animation(
        &mut self,
        log: SimLog,
        backend: &mut dyn RenderBackend,
    ) -> Result<AnimationInfo, ViewerError> {
        self.load_with_drive(log, Drive::Frames, backend)
    }

    /// Load for the keyframe-mixer path: ticks set the mixer clock instead
    /// of applying per-group transforms.
    pub fn load_for_mixer(
        &mut self,
        log: SimLog,
        backend: &mut dyn RenderBackend,
    ) -> Result<AnimationInfo, ViewerError> {
        self.load_with_drive(log, Drive::Mixer, backend)
    }

    fn load_with_drive(
        &mut self,
        log: SimLog,
        drive: Drive,
        backend: &mut dyn RenderBackend,
    ) -> Result<AnimationInfo, ViewerError> {
        let model = build_scene(log, drive, backend, &mut self.ids)?;
        let info = model.info();

        // Swap only after the build fully completed.
        if let Some(old) = self.model.take() {
            for group in &old.groups {
                backend.remove_node(group.node);
            }
        }
        self.model = Some(model);
        self.outputs.push_event(ViewerEvent::SceneReplaced {
            info: info.clone(),
        });
        Ok(info)
    }

    /// Advance one host animation-frame callback.
    ///
    /// Transform state updates on every tick; draws are throttled to the
    /// configured render rate so simulation cadence stays decoupled from
    /// the display. `dt` is wall-clock seconds since the previous tick.
    pub fn tick(
        &mut self,
        dt: f32,
        inputs: Inputs,
        backend: &mut dyn RenderBackend,
    ) -> &Outputs {
        self.outputs.clear();
        if !self.running {
            return &self.outputs;
        }

        self.apply_inputs(inputs, backend);

        if self.playing {
            self.elapsed += dt * self.speed;
        }

        let window = self
            .model
            .as_ref()
            .map(|m| (m.drive, m.start, m.stop, m.step));
        if let Some((drive, start, stop, step)) = window {
            // A negative clock restarts at the end regardless of drive.
            if self.elapsed < 0.0 {
                self.elapsed = stop;
            }
            match drive {
                Drive::Frames => {
                    let frame = resolve_frame_index(start, stop, step, self.elapsed);
                    self.apply_frame(frame, backend);
                    if self.active {
                        self.outputs.push_event(ViewerEvent::TimeChanged {
                            time: frame as f32 * step,
                        });
                    }
                }
                Drive::Mixer => {
                    let t = wrap_time(stop, self.elapsed);
                    backend.set_mixer_time(t);
                    if self.active {
                        self.outputs.push_event(ViewerEvent::TimeChanged { time: t });
                    }
                }
            }
        }

        self.render_accum_ms += dt * 1000.0;
        if self.render_accum_ms >= 1000.0 / self.cfg.render_fps {
            if !self.camera.free_cam && self.model.is_some() {
                backend.look_at(self.camera.follow_target);
            }
            backend.render();
            self.render_accum_ms = 0.0;
        }

        &self.outputs
    }

    fn apply_inputs(&mut self, inputs: Inputs, backend: &mut dyn RenderBackend) {
        for cmd in inputs.commands {
            match cmd {
                ViewerCommand::TogglePlay => self.toggle_play(),
                ViewerCommand::SetPlay { playing } => self.set_play(playing),
                ViewerCommand::SetTime { time } => self.set_time(time),
                ViewerCommand::SetSpeed { speed } => self.set_speed(speed),
                ViewerCommand::SetActive { active } => self.set_is_active(active),
                ViewerCommand::CameraLock { unlocked } => self.camera_lock(unlocked, backend),
                ViewerCommand::DisplayFloor { visible } => self.display_floor(visible, backend),
                ViewerCommand::ResetCamera => self.reset_camera(backend),
                ViewerCommand::Resize { width, height } => self.resize(width, height, backend),
                ViewerCommand::ChangeColor { group, color } => {
                    if let Err(err) = self.change_color(&group, color, backend) {
                        warn!("change_color({group}): {err}");
                    }
                }
                ViewerCommand::ChangeTransparency { group, value } => {
                    if let Err(err) = self.change_transparency(&group, value, backend) {
                        warn!("change_transparency({group}): {err}");
                    }
                }
                ViewerCommand::ChangeTexture { group, url } => {
                    if let Err(err) = self.change_texture(&group, &url, backend) {
                        self.outputs.push_event(ViewerEvent::TextureFailed {
                            group,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }
    }

    /// Apply one frame's pose to every group and update the follow target.
    fn apply_frame(&mut self, frame: usize, backend: &mut dyn RenderBackend) {
        let Some(model) = &self.model else {
            return;
        };
        for group in &model.groups {
            let sample = &model.frames[frame][group.name.as_str()];
            backend.set_node_transform(group.node, sample.position, sample.quaternion);
        }
        if let Some(first) = model.groups.first() {
            self.camera.follow_target = model.frames[frame][first.name.as_str()].position;
        }
    }

    // ---- control surface ----

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        self.outputs.push_event(ViewerEvent::PlaybackToggled {
            playing: self.playing,
        });
    }

    pub fn set_play(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Seek. Takes effect on the next tick; does not touch play state.
    pub fn set_time(&mut self, time: f32) {
        self.elapsed = time;
    }

    /// Signed multiplier: negative runs the timeline backward, zero
    /// freezes visually without toggling play.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Whether this instance reports resolved times on the outputs channel.
    pub fn set_is_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Unlocking hands the camera to external orbit controls and suspends
    /// follow mode; locking does the reverse. The two flip together.
    pub fn camera_lock(&mut self, unlocked: bool, backend: &mut dyn RenderBackend) {
        self.camera.free_cam = unlocked;
        backend.set_orbit_enabled(unlocked);
    }

    pub fn display_floor(&mut self, visible: bool, backend: &mut dyn RenderBackend) {
        self.floor_visible = visible;
        backend.set_floor_visible(visible);
    }

    pub fn reset_camera(&mut self, backend: &mut dyn RenderBackend) {
        self.camera.position = self.cfg.camera_position;
        self.camera.target = self.cfg.camera_target;
        backend.set_camera(self.cfg.camera_position, self.cfg.camera_target);
    }

    pub fn resize(&mut self, width: u32, height: u32, backend: &mut dyn RenderBackend) {
        backend.set_viewport(width, height);
    }

    /// Recolor the first shape of the named group, keeping its opacity.
    pub fn change_color(
        &mut self,
        group: &str,
        color: u32,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), ViewerError> {
        let model = self.model.as_mut().ok_or(ViewerError::NoScene)?;
        let group = model
            .group_mut(group)
            .ok_or_else(|| ViewerError::UnknownGroup(group.to_string()))?;
        let shape = &mut group.shapes[0];
        shape.material = shape.material.recolored(color);
        backend.set_material(shape.node, &shape.material);
        Ok(())
    }

    /// Set the opacity of the first shape of the named group.
    pub fn change_transparency(
        &mut self,
        group: &str,
        value: f32,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), ViewerError> {
        let model = self.model.as_mut().ok_or(ViewerError::NoScene)?;
        let group = model
            .group_mut(group)
            .ok_or_else(|| ViewerError::UnknownGroup(group.to_string()))?;
        let shape = &mut group.shapes[0];
        shape.material.opacity = value;
        backend.set_material(shape.node, &shape.material);
        Ok(())
    }

    /// Swap the first shape's material for a textured one, keeping its
    /// opacity. A failed fetch leaves the prior material in effect.
    pub fn change_texture(
        &mut self,
        group: &str,
        url: &str,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), ViewerError> {
        let model = self.model.as_mut().ok_or(ViewerError::NoScene)?;
        let group_node = model
            .group_mut(group)
            .ok_or_else(|| ViewerError::UnknownGroup(group.to_string()))?;

        let handle = match backend.load_texture(url) {
            Ok(handle) => handle,
            Err(message) => {
                warn!("texture '{url}' could not be loaded: {message}");
                return Err(ViewerError::Asset {
                    url: url.to_string(),
                    message,
                });
            }
        };

        let shape = &mut group_node.shapes[0];
        shape.material = shape.material.with_texture(handle);
        backend.set_material(shape.node, &shape.material);
        Ok(())
    }

    /// Stop the tick loop and release the scene. Subsequent ticks are
    /// no-ops until init() runs again.
    pub fn shutdown(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(model) = self.model.take() {
            for group in &model.groups {
                backend.remove_node(group.node);
            }
        }
        self.running = false;
        self.outputs.push_event(ViewerEvent::Shutdown);
    }

    // ---- accessors ----

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn model(&self) -> Option<&SceneModel> {
        self.model.as_ref()
    }

    /// Frame the current clock resolves to, if a model is loaded.
    pub fn current_frame(&self) -> Option<usize> {
        self.model
            .as_ref()
            .filter(|m| m.drive == Drive::Frames)
            .map(|m| resolve_frame_index(m.start, m.stop, m.step, self.elapsed))
    }
}
