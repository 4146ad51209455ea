//! `lutro.input` Lua API: joypad state through the settings input callback.
//!
//! ```lua
//! if lutro.input.joypad("left") then x = x - 1 end
//! if lutro.input.joypad("start", 1) then ... end  -- second port
//! ```

use lutro_domain::JoypadButton;
use mlua::prelude::*;
use std::sync::Arc;

use super::capability::CapabilityContext;
use super::core_api::{NAMESPACE, ensure_global_table};

/// Builder for the `lutro.input` capability.
pub fn build_input_module(lua: &Lua, ctx: &CapabilityContext) -> LuaResult<LuaTable> {
    let lutro = ensure_global_table(lua, NAMESPACE)?;
    let input = lua.create_table()?;

    // lutro.input.joypad(button[, port]) -> boolean
    {
        let settings = Arc::clone(&ctx.settings);
        let joypad = lua.create_function(move |_, (name, port): (String, Option<u32>)| {
            let button: JoypadButton = name.parse().map_err(LuaError::external)?;
            // Clone the callback out so the lock isn't held while it runs.
            let callback = settings
                .lock()
                .map_err(|e| LuaError::external(format!("settings lock poisoned: {}", e)))?
                .input_cb
                .clone();
            Ok(callback.is_some_and(|cb| cb(port.unwrap_or(0), button)))
        })?;
        input.set("joypad", joypad)?;
    }

    lutro.set("input", &input)?;
    Ok(input)
}
