//! Lua scripting runtime for game scripts
//!
//! Provides the `LuaRuntimeHost` that implements `GameRuntimePort`
//! from the application layer, backed by mlua (Lua 5.4).
//!
//! # Modules
//!
//! - `capability`: Lazy `package.preload` registration + eager `require` resolution
//! - `core_api`: the `lutro` namespace and the exposed `lutro.settings` table
//! - `graphics_api`: `lutro.graphics` drawing into the settings framebuffer
//! - `input_api`: `lutro.input.joypad(button)`
//! - `hooks`: optional `conf`/`load`/`update`/`draw` lookup
//! - `loader`: script load sequence
//! - `frame`: per-frame `update`/`draw` step
//! - `runtime_host`: Main host struct tying everything together

mod capability;
mod core_api;
mod frame;
mod graphics_api;
mod hooks;
mod input_api;
mod loader;
mod runtime_host;

pub use capability::{CAPABILITIES, Capability, CapabilityContext};
pub use graphics_api::{GraphicsState, init_framebuffer};
pub use runtime_host::LuaRuntimeHost;
