//! `lutro` core namespace: the table game scripts hang their hooks on.
//!
//! ```lua
//! function lutro.conf(t) t.width = 640 end
//! function lutro.update(dt) ... end
//! print(lutro.settings.width, lutro.path)
//! ```

use lutro_domain::Settings;
use mlua::prelude::*;

use super::capability::CapabilityContext;

/// Global name of the core namespace.
pub const NAMESPACE: &str = "lutro";

/// Return the global table `name`, creating it if missing.
pub fn ensure_global_table(lua: &Lua, name: &str) -> LuaResult<LuaTable> {
    let globals = lua.globals();
    match globals.get::<LuaValue>(name)? {
        LuaValue::Table(table) => Ok(table),
        LuaValue::Nil => {
            let table = lua.create_table()?;
            globals.set(name, &table)?;
            Ok(table)
        }
        other => Err(LuaError::external(format!(
            "global '{}' is a {}, expected a table",
            name,
            other.type_name()
        ))),
    }
}

/// Builder for the `lutro` capability.
pub fn build_core_module(lua: &Lua, _ctx: &CapabilityContext) -> LuaResult<LuaTable> {
    ensure_global_table(lua, NAMESPACE)
}

/// Publish a read-out copy of `settings` as `lutro.settings`.
///
/// Scripts receive this table in `conf`; writing to it never touches the
/// authoritative record until the loader merges it back.
pub fn expose_settings(lua: &Lua, settings: &Settings) -> LuaResult<()> {
    let lutro = ensure_global_table(lua, NAMESPACE)?;
    let table = lua.create_table()?;
    table.set("width", settings.width)?;
    table.set("height", settings.height)?;
    lutro.set("settings", table)
}
