//! Capability registry: host modules scripts reach through `require`.
//!
//! Each capability is registered as a lazy loader in `package.preload` and
//! then resolved eagerly, in table order, through the regular `require`
//! machinery. The order matters: `lutro` must exist before its children
//! attach themselves to it.

use lutro_application::HostError;
use lutro_domain::SettingsStore;
use mlua::prelude::*;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::core_api::build_core_module;
use super::graphics_api::{GraphicsState, build_graphics_module};
use super::input_api::build_input_module;

/// Shared state handed to every capability builder.
#[derive(Clone)]
pub struct CapabilityContext {
    pub settings: SettingsStore,
    pub graphics: Arc<Mutex<GraphicsState>>,
}

impl CapabilityContext {
    pub fn new(settings: SettingsStore) -> Self {
        Self {
            settings,
            graphics: Arc::new(Mutex::new(GraphicsState::default())),
        }
    }
}

/// Constructor for a capability's module table.
pub type CapabilityBuilder = fn(&Lua, &CapabilityContext) -> LuaResult<LuaTable>;

/// A named host module.
#[derive(Clone, Copy)]
pub struct Capability {
    pub name: &'static str,
    pub build: CapabilityBuilder,
}

/// Every capability, in resolution order.
pub const CAPABILITIES: [Capability; 3] = [
    Capability {
        name: "lutro",
        build: build_core_module,
    },
    Capability {
        name: "lutro.graphics",
        build: build_graphics_module,
    },
    Capability {
        name: "lutro.input",
        build: build_input_module,
    },
];

/// Register `capability` as a lazily loaded module.
pub fn register(lua: &Lua, capability: Capability, ctx: &CapabilityContext) -> LuaResult<()> {
    let preload: LuaTable = lua.globals().get::<LuaTable>("package")?.get("preload")?;
    let ctx = ctx.clone();
    let build = capability.build;
    let loader = lua.create_function(move |lua, _: LuaMultiValue| build(lua, &ctx))?;
    preload.set(capability.name, loader)
}

/// Resolve `name` through `require`, discarding the module handle.
pub fn resolve(lua: &Lua, name: &str) -> LuaResult<()> {
    let require: LuaFunction = lua.globals().get("require")?;
    require.call::<LuaValue>(name)?;
    Ok(())
}

/// Register every capability, then resolve each by name.
pub fn install_all(lua: &Lua, ctx: &CapabilityContext) -> Result<(), HostError> {
    for capability in CAPABILITIES {
        register(lua, capability, ctx).map_err(|e| capability_error(capability.name, e))?;
    }
    for capability in CAPABILITIES {
        resolve(lua, capability.name).map_err(|e| capability_error(capability.name, e))?;
        debug!("Resolved capability module '{}'", capability.name);
    }
    Ok(())
}

fn capability_error(name: &str, e: LuaError) -> HostError {
    HostError::Capability {
        name: name.to_string(),
        message: e.to_string(),
    }
}
