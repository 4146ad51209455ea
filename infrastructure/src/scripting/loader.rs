//! Script loader: turns a file path into a configured, running script module.
//!
//! Order of operations:
//! 1. append the script's directory to `package.path`
//! 2. execute the file as the top-level chunk
//! 3. stamp `path`, `camera_x`, `camera_y` on the `lutro` table
//! 4. call `lutro.conf(lutro.settings)` when defined
//! 5. merge `lutro.settings.width/height` into the authoritative settings
//! 6. initialize the framebuffer against the merged dimensions
//! 7. call `lutro.load()` when defined

use lutro_application::HostError;
use lutro_domain::script::fields;
use lutro_domain::{
    DisplayOverride, HookName, SettingsStore, append_search_path, package_path_fragment,
    script_base_dir,
};
use mlua::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use super::core_api::NAMESPACE;
use super::graphics_api::init_framebuffer;
use super::hooks::ScriptHook;

/// Load the script at `path` and return its module table.
///
/// Nothing is returned on failure; the caller must treat the script as absent.
pub fn load_script(lua: &Lua, settings: &SettingsStore, path: &Path) -> Result<LuaTable, HostError> {
    let load_error = |message: String| HostError::ScriptLoad {
        path: path.to_path_buf(),
        message,
    };
    let lua_error = |e: LuaError| load_error(e.to_string());

    let path_str = path.to_string_lossy();
    let base_dir = script_base_dir(&path_str);

    let search_path =
        append_package_path(lua, &package_path_fragment(&base_dir)).map_err(lua_error)?;
    debug!("package.path = {}", search_path);

    let source = std::fs::read(path)
        .map_err(|e| load_error(format!("failed to read {}: {}", path.display(), e)))?;
    lua.load(source.as_slice())
        .set_name(format!("@{}", path_str))
        .exec()
        .map_err(lua_error)?;

    let module: LuaTable = lua.globals().get(NAMESPACE).map_err(lua_error)?;
    module.set(fields::PATH, base_dir.as_str()).map_err(lua_error)?;
    module.set(fields::CAMERA_X, 0.0).map_err(lua_error)?;
    module.set(fields::CAMERA_Y, 0.0).map_err(lua_error)?;

    match ScriptHook::lookup(&module, HookName::Conf)
        .and_then(|hook| hook.required_callable(HookName::Conf))
        .map_err(lua_error)?
    {
        Some(conf) => {
            let exposed: LuaValue = module.get(fields::SETTINGS).map_err(lua_error)?;
            conf.call::<()>(exposed).map_err(lua_error)?;
        }
        None => info!("skipping custom configuration."),
    }

    let declared = read_display_override(&module).map_err(lua_error)?;
    {
        let mut guard = settings
            .lock()
            .map_err(|e| load_error(format!("settings lock poisoned: {}", e)))?;
        declared.apply_to(&mut guard);
        info!("Display configured: {}x{}", guard.width, guard.height);
        init_framebuffer(&mut guard).map_err(|e| load_error(e.to_string()))?;
    }

    match ScriptHook::lookup(&module, HookName::Load)
        .and_then(|hook| hook.required_callable(HookName::Load))
        .map_err(lua_error)?
    {
        Some(load) => load.call::<()>(()).map_err(lua_error)?,
        None => info!("skipping custom initialization."),
    }

    Ok(module)
}

/// Append `fragment` to `package.path`, returning the new value.
pub fn append_package_path(lua: &Lua, fragment: &str) -> LuaResult<String> {
    let package: LuaTable = lua.globals().get("package")?;
    let current: String = package.get("path")?;
    let updated = append_search_path(&current, fragment);
    package.set("path", updated.as_str())?;
    Ok(updated)
}

/// Dimensions the script left in `lutro.settings`.
///
/// A missing table or field means "keep the current value".
pub fn read_display_override(module: &LuaTable) -> LuaResult<DisplayOverride> {
    let table = match module.get::<LuaValue>(fields::SETTINGS)? {
        LuaValue::Table(table) => table,
        _ => return Ok(DisplayOverride::default()),
    };
    Ok(DisplayOverride {
        width: integral_field(&table, "width")?,
        height: integral_field(&table, "height")?,
    })
}

fn integral_field(table: &LuaTable, field: &str) -> LuaResult<Option<i64>> {
    match table.get::<LuaValue>(field)? {
        LuaValue::Nil => Ok(None),
        LuaValue::Integer(n) => Ok(Some(n)),
        LuaValue::Number(n) if is_integral_i64(n) => Ok(Some(n as i64)),
        other => Err(LuaError::runtime(format!(
            "lutro.settings.{} must be an integer, got {}",
            field,
            match other {
                LuaValue::Number(n) => n.to_string(),
                ref v => v.type_name().to_string(),
            }
        ))),
    }
}

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
fn is_integral_i64(n: f64) -> bool {
    n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64
}
