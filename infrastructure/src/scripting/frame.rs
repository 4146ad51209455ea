//! Frame executor: one `update(delta)` / `draw()` step.

use lutro_application::HostError;
use lutro_domain::HookName;
use mlua::prelude::*;

use super::hooks::ScriptHook;

/// Run one frame against `module`.
///
/// `draw` is only attempted once `update` has completed or was skipped.
pub fn run_frame(module: &LuaTable, delta: f64) -> Result<(), HostError> {
    if let Some(update) = frame_hook(module, HookName::Update)? {
        update
            .call::<()>(delta)
            .map_err(|e| hook_error(HookName::Update, e))?;
    }
    if let Some(draw) = frame_hook(module, HookName::Draw)? {
        draw.call::<()>(())
            .map_err(|e| hook_error(HookName::Draw, e))?;
    }
    Ok(())
}

fn frame_hook(module: &LuaTable, hook: HookName) -> Result<Option<LuaFunction>, HostError> {
    ScriptHook::lookup(module, hook)
        .map(ScriptHook::into_callable)
        .map_err(|e| hook_error(hook, e))
}

fn hook_error(hook: HookName, e: LuaError) -> HostError {
    HostError::Hook {
        hook,
        message: e.to_string(),
    }
}
