//! Script hook resolution.
//!
//! A hook field on the script module is either absent, a function, or some
//! other value. Load-time hooks fail on the third case (calling it would
//! fail); frame hooks skip it.

use lutro_domain::HookName;
use mlua::prelude::*;

/// A hook looked up on the script module.
#[derive(Debug, Clone)]
pub enum ScriptHook {
    Absent,
    Callable(LuaFunction),
    NotCallable(&'static str),
}

impl ScriptHook {
    /// Read `hook` from `module`.
    pub fn lookup(module: &LuaTable, hook: HookName) -> LuaResult<Self> {
        Ok(match module.get::<LuaValue>(hook.as_str())? {
            LuaValue::Nil => Self::Absent,
            LuaValue::Function(f) => Self::Callable(f),
            other => Self::NotCallable(other.type_name()),
        })
    }

    /// The function to call for a load-time hook, if any.
    pub fn required_callable(self, hook: HookName) -> LuaResult<Option<LuaFunction>> {
        match self {
            Self::Absent => Ok(None),
            Self::Callable(f) => Ok(Some(f)),
            Self::NotCallable(type_name) => Err(LuaError::runtime(format!(
                "lutro.{} must be a function, got {}",
                hook, type_name
            ))),
        }
    }

    /// The function to call for a frame hook; anything else is skipped.
    pub fn into_callable(self) -> Option<LuaFunction> {
        match self {
            Self::Callable(f) => Some(f),
            Self::Absent | Self::NotCallable(_) => None,
        }
    }
}
