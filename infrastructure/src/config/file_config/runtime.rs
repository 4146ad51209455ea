//! Frame loop configuration from TOML (`[runtime]` section)

use serde::{Deserialize, Serialize};

/// Raw frame loop configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRuntimeConfig {
    /// Target frames per second; the fixed-step delta is `1 / fps`
    pub fps: u32,
    /// Stop after this many frames (unbounded when unset)
    pub frames: Option<u64>,
    /// End the run at the first `update`/`draw` error
    pub halt_on_frame_error: bool,
    /// Pace frames against the wall clock instead of stepping as fast as possible
    pub realtime: bool,
}

impl Default for FileRuntimeConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            frames: None,
            halt_on_frame_error: true,
            realtime: true,
        }
    }
}
