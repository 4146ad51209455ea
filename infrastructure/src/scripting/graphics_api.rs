//! `lutro.graphics` Lua API: software rendering into the settings framebuffer.
//!
//! ```lua
//! lutro.graphics.setBackgroundColor(0, 0, 32)
//! lutro.graphics.clear()
//! lutro.graphics.setColor(255, 255, 255)
//! lutro.graphics.rectangle("fill", x, y, 8, 8)
//! lutro.graphics.point(10, 10)
//! ```
//!
//! Draw calls are offset by `lutro.camera_x`/`lutro.camera_y`. The
//! framebuffer does not exist until [`init_framebuffer`] has run, so drawing
//! from `conf` raises an error.

use lutro_domain::{DomainError, Settings, SettingsStore};
use mlua::prelude::*;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::capability::CapabilityContext;
use super::core_api::{NAMESPACE, ensure_global_table};

/// Bytes per XRGB8888 pixel.
const BYTES_PER_PIXEL: i64 = 4;

/// Current draw state shared by the graphics functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicsState {
    pub color: u32,
    pub background: u32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            color: 0x00ff_ffff,
            background: 0x0000_0000,
        }
    }
}

/// Rendering collaborator initialization: allocate the framebuffer for the
/// finalized dimensions.
pub fn init_framebuffer(settings: &mut Settings) -> Result<(), DomainError> {
    let len = settings.framebuffer_len()?;
    let pitch = settings.row_pitch(BYTES_PER_PIXEL)?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| DomainError::FramebufferAllocation { pixels: len })?;
    pixels.resize(len, 0);

    settings.pitch = pitch;
    settings.framebuffer = Some(pixels);
    debug!(
        "Framebuffer ready: {}x{} (pitch {})",
        settings.width, settings.height, settings.pitch
    );
    Ok(())
}

/// Pack 0-255 channel values into XRGB8888; alpha is accepted and ignored.
fn pack_rgb(r: f64, g: f64, b: f64) -> u32 {
    let channel = |v: f64| v.clamp(0.0, 255.0) as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Mutable view over the framebuffer pixels.
struct Canvas<'a> {
    pixels: &'a mut [u32],
    width: i64,
    height: i64,
}

impl Canvas<'_> {
    /// Fill the rectangle, clipped to the canvas. Script coordinates may be
    /// anywhere in `i64`.
    fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: u32) {
        let x0 = x.clamp(0, self.width);
        let y0 = y.clamp(0, self.height);
        let x1 = x.saturating_add(w).clamp(0, self.width);
        let y1 = y.saturating_add(h).clamp(0, self.height);
        if x0 >= x1 {
            return;
        }
        for row in y0..y1 {
            let start = (row * self.width + x0) as usize;
            let end = (row * self.width + x1) as usize;
            self.pixels[start..end].fill(color);
        }
    }

    fn outline_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: u32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, bottom, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(right, y, 1, h, color);
    }
}

fn with_canvas<R>(settings: &SettingsStore, draw: impl FnOnce(&mut Canvas<'_>) -> R) -> LuaResult<R> {
    let mut guard = settings
        .lock()
        .map_err(|e| LuaError::external(format!("settings lock poisoned: {}", e)))?;
    let (width, height) = (guard.width, guard.height);
    let pixels = guard
        .framebuffer
        .as_mut()
        .ok_or_else(|| LuaError::external("graphics not initialized: no framebuffer yet"))?;
    let mut canvas = Canvas {
        pixels,
        width,
        height,
    };
    Ok(draw(&mut canvas))
}

fn graphics_state(ctx: &Arc<Mutex<GraphicsState>>) -> LuaResult<GraphicsState> {
    ctx.lock()
        .map(|state| *state)
        .map_err(|e| LuaError::external(format!("graphics state lock poisoned: {}", e)))
}

/// Camera offset, read from the script module on every draw call.
fn camera(lua: &Lua) -> LuaResult<(f64, f64)> {
    let lutro: LuaTable = lua.globals().get(NAMESPACE)?;
    let x: Option<f64> = lutro.get("camera_x")?;
    let y: Option<f64> = lutro.get("camera_y")?;
    Ok((x.unwrap_or(0.0), y.unwrap_or(0.0)))
}

/// Builder for the `lutro.graphics` capability.
pub fn build_graphics_module(lua: &Lua, ctx: &CapabilityContext) -> LuaResult<LuaTable> {
    let lutro = ensure_global_table(lua, NAMESPACE)?;
    let graphics = lua.create_table()?;

    // lutro.graphics.getWidth() / getHeight()
    {
        let settings = Arc::clone(&ctx.settings);
        let get_width = lua.create_function(move |_, ()| {
            let guard = settings
                .lock()
                .map_err(|e| LuaError::external(format!("settings lock poisoned: {}", e)))?;
            Ok(guard.width)
        })?;
        graphics.set("getWidth", get_width)?;
    }
    {
        let settings = Arc::clone(&ctx.settings);
        let get_height = lua.create_function(move |_, ()| {
            let guard = settings
                .lock()
                .map_err(|e| LuaError::external(format!("settings lock poisoned: {}", e)))?;
            Ok(guard.height)
        })?;
        graphics.set("getHeight", get_height)?;
    }

    // lutro.graphics.setColor(r, g, b[, a])
    {
        let state = Arc::clone(&ctx.graphics);
        let set_color = lua.create_function(
            move |_, (r, g, b, _a): (f64, f64, f64, Option<f64>)| {
                let mut guard = state.lock().map_err(|e| {
                    LuaError::external(format!("graphics state lock poisoned: {}", e))
                })?;
                guard.color = pack_rgb(r, g, b);
                Ok(())
            },
        )?;
        graphics.set("setColor", set_color)?;
    }

    // lutro.graphics.setBackgroundColor(r, g, b[, a])
    {
        let state = Arc::clone(&ctx.graphics);
        let set_background = lua.create_function(
            move |_, (r, g, b, _a): (f64, f64, f64, Option<f64>)| {
                let mut guard = state.lock().map_err(|e| {
                    LuaError::external(format!("graphics state lock poisoned: {}", e))
                })?;
                guard.background = pack_rgb(r, g, b);
                Ok(())
            },
        )?;
        graphics.set("setBackgroundColor", set_background)?;
    }

    // lutro.graphics.clear()
    {
        let settings = Arc::clone(&ctx.settings);
        let state = Arc::clone(&ctx.graphics);
        let clear = lua.create_function(move |_, ()| {
            let background = graphics_state(&state)?.background;
            with_canvas(&settings, |canvas| canvas.pixels.fill(background))
        })?;
        graphics.set("clear", clear)?;
    }

    // lutro.graphics.rectangle(mode, x, y, w, h)
    {
        let settings = Arc::clone(&ctx.settings);
        let state = Arc::clone(&ctx.graphics);
        let rectangle = lua.create_function(
            move |lua, (mode, x, y, w, h): (String, f64, f64, f64, f64)| {
                let color = graphics_state(&state)?.color;
                let (cam_x, cam_y) = camera(lua)?;
                let (x, y) = ((x - cam_x) as i64, (y - cam_y) as i64);
                let (w, h) = (w as i64, h as i64);
                match mode.as_str() {
                    "fill" => with_canvas(&settings, |c| c.fill_rect(x, y, w, h, color)),
                    "line" => with_canvas(&settings, |c| c.outline_rect(x, y, w, h, color)),
                    other => Err(LuaError::external(format!(
                        "invalid draw mode '{}', expected 'fill' or 'line'",
                        other
                    ))),
                }
            },
        )?;
        graphics.set("rectangle", rectangle)?;
    }

    // lutro.graphics.point(x, y)
    {
        let settings = Arc::clone(&ctx.settings);
        let state = Arc::clone(&ctx.graphics);
        let point = lua.create_function(move |lua, (x, y): (f64, f64)| {
            let color = graphics_state(&state)?.color;
            let (cam_x, cam_y) = camera(lua)?;
            let (x, y) = ((x - cam_x) as i64, (y - cam_y) as i64);
            with_canvas(&settings, |c| c.fill_rect(x, y, 1, 1, color))
        })?;
        graphics.set("point", point)?;
    }

    lutro.set("graphics", &graphics)?;
    Ok(graphics)
}
