//! Settings Record: display and runtime configuration shared by the host
//! and its collaborators.
//!
//! Ownership of the fields is split:
//!
//! - `width`/`height`: seeded at process start, overwritten at most once by
//!   the script loader after the `conf` hook has run
//! - `pitch`/`framebuffer`: written only by the rendering collaborator
//! - `input_cb`: read and written only by the input collaborator
//!
//! Dimensions are not checked on write; the rendering collaborator validates
//! them against [`MAX_DIMENSION`] when it allocates the framebuffer.

use crate::core::error::DomainError;
use crate::input::JoypadButton;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Default horizontal resolution.
pub const DEFAULT_WIDTH: i64 = 320;
/// Default vertical resolution.
pub const DEFAULT_HEIGHT: i64 = 240;
/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: i64 = 4096;

/// Input state callback: `(port, button) -> pressed`.
pub type InputCallback = Arc<dyn Fn(u32, JoypadButton) -> bool + Send + Sync>;

/// Shared handle to the authoritative Settings Record.
///
/// All host operations run on one thread; the mutex only exists so the handle
/// can be captured by runtime callbacks.
pub type SettingsStore = Arc<Mutex<Settings>>;

/// The authoritative Settings Record.
#[derive(Clone)]
pub struct Settings {
    pub width: i64,
    pub height: i64,
    /// Row stride of the framebuffer in bytes.
    pub pitch: i64,
    /// XRGB8888 pixels, `width * height` long once allocated.
    pub framebuffer: Option<Vec<u32>>,
    pub input_cb: Option<InputCallback>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_resolution(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pitch", &self.pitch)
            .field(
                "framebuffer",
                &self.framebuffer.as_ref().map(|fb| fb.len()),
            )
            .field("input_cb", &self.input_cb.is_some())
            .finish()
    }
}

impl Settings {
    /// Settings with the given process-start resolution and nothing allocated.
    pub fn with_resolution(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            pitch: 0,
            framebuffer: None,
            input_cb: None,
        }
    }

    /// Wrap these settings in a shared store.
    pub fn into_store(self) -> SettingsStore {
        Arc::new(Mutex::new(self))
    }

    /// Number of pixels a framebuffer for the current dimensions holds.
    pub fn framebuffer_len(&self) -> Result<usize, DomainError> {
        let width = dimension("width", self.width)?;
        let height = dimension("height", self.height)?;
        width
            .checked_mul(height)
            .ok_or(DomainError::InvalidDimension {
                field: "height",
                value: self.height,
            })
    }

    /// Row stride in bytes for the current width.
    pub fn row_pitch(&self, bytes_per_pixel: i64) -> Result<i64, DomainError> {
        dimension("width", self.width)?;
        self.width
            .checked_mul(bytes_per_pixel)
            .ok_or(DomainError::InvalidDimension {
                field: "width",
                value: self.width,
            })
    }
}

fn dimension(field: &'static str, value: i64) -> Result<usize, DomainError> {
    if !(1..=MAX_DIMENSION).contains(&value) {
        return Err(DomainError::InvalidDimension { field, value });
    }
    usize::try_from(value).map_err(|_| DomainError::InvalidDimension { field, value })
}

/// Dimensions a script declared in its settings table.
///
/// Absent fields leave the prior value in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOverride {
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl DisplayOverride {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
    }
}
