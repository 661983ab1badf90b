//! Error type shared by the scene builder and the playback engine.

use thiserror::Error;

/// Errors produced while parsing logs, building scenes, or mutating a
/// loaded scene. All failures are reported once to the caller; no retries.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Malformed log data (missing field, bad step/stop, duplicate names).
    #[error("log schema error: {0}")]
    Schema(String),

    /// Frame table inconsistent with the declared start/stop/step window.
    #[error("frame table error: {0}")]
    FrameTable(String),

    /// A mesh or texture asset could not be loaded by the backend.
    #[error("asset load failed for '{url}': {message}")]
    Asset { url: String, message: String },

    /// A material operation named a group that is not in the loaded scene.
    #[error("unknown group '{0}'")]
    UnknownGroup(String),

    /// A scene operation was issued before any animation was loaded.
    #[error("no scene is loaded")]
    NoScene,
}
