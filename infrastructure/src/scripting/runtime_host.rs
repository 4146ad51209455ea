//! Lua runtime host: owns the scripting environment for one game script.
//!
//! `LuaRuntimeHost` implements `GameRuntimePort` from the application layer,
//! providing the concrete Lua 5.4 runtime backed by mlua.

use lutro_application::{DiagnosticSink, GameRuntimePort, HostError};
use lutro_domain::SettingsStore;
use mlua::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::capability::{CapabilityContext, install_all};
use super::core_api::expose_settings;
use super::frame::run_frame;
use super::loader::load_script;

/// Lua 5.4 runtime host implementing `GameRuntimePort`.
///
/// Every failure is written to the diagnostic sink before the operation
/// returns it. Only one `load` per host is supported; a second call replaces
/// the module but runs against an environment the first script already
/// modified.
pub struct LuaRuntimeHost {
    // Declared before `lua` so it drops first.
    script: Option<LuaTable>,
    lua: Lua,
    settings: SettingsStore,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl LuaRuntimeHost {
    /// Create the scripting environment.
    ///
    /// Sets up the VM with:
    /// - The safe Lua standard library
    /// - `lutro.settings`: read-out copy of `width`/`height`
    /// - `lutro`, `lutro.graphics`, `lutro.input`: registered in
    ///   `package.preload`, then resolved through `require`
    pub fn initialize(
        settings: SettingsStore,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, HostError> {
        let lua = match Self::bootstrap(&settings) {
            Ok(lua) => lua,
            Err(e) => {
                diagnostics.report(&e.to_string());
                return Err(e);
            }
        };
        info!("Lua runtime initialized");

        Ok(Self {
            script: None,
            lua,
            settings,
            diagnostics,
        })
    }

    fn bootstrap(settings: &SettingsStore) -> Result<Lua, HostError> {
        let lua = Lua::new();

        {
            let guard = settings
                .lock()
                .map_err(|e| HostError::Runtime(format!("settings lock poisoned: {}", e)))?;
            expose_settings(&lua, &guard).map_err(|e| HostError::Runtime(e.to_string()))?;
        }

        install_all(&lua, &CapabilityContext::new(Arc::clone(settings)))?;
        Ok(lua)
    }

    /// Release the scripting environment and everything it owns.
    pub fn shutdown(self) {
        let Self { script, lua, .. } = self;
        drop(script);
        drop(lua);
        info!("Lua runtime shut down");
    }

    /// The loaded script module, if loading succeeded.
    pub fn script_module(&self) -> Option<&LuaTable> {
        self.script.as_ref()
    }

    fn report<T>(&self, result: Result<T, HostError>) -> Result<T, HostError> {
        if let Err(e) = &result {
            debug!("Host operation failed: {:?}", e);
            self.diagnostics.report(&e.to_string());
        }
        result
    }
}

impl GameRuntimePort for LuaRuntimeHost {
    fn load(&mut self, path: &Path) -> Result<(), HostError> {
        if self.script.is_some() {
            warn!(
                "Loading {} into an environment that already holds a script; this is unsupported",
                path.display()
            );
        }
        self.script = None;

        let module = self.report(load_script(&self.lua, &self.settings, path))?;
        info!("Script loaded: {}", path.display());
        self.script = Some(module);
        Ok(())
    }

    fn run_frame(&mut self, delta: f64) -> Result<(), HostError> {
        let result = match &self.script {
            Some(module) => run_frame(module, delta),
            None => Err(HostError::NotLoaded),
        };
        self.report(result)
    }

    fn is_loaded(&self) -> bool {
        self.script.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lutro_application::MemoryDiagnostics;
    use lutro_domain::{HookName, Settings};
    use mlua::FromLua;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        host: LuaRuntimeHost,
        diagnostics: Arc<MemoryDiagnostics>,
        settings: SettingsStore,
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let settings = Settings::default().into_store();
            let diagnostics = Arc::new(MemoryDiagnostics::new());
            let sink: Arc<dyn DiagnosticSink> = diagnostics.clone();
            let host = LuaRuntimeHost::initialize(Arc::clone(&settings), sink).unwrap();
            Self {
                host,
                diagnostics,
                settings,
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn write(&self, name: &str, source: impl AsRef<[u8]>) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, source).unwrap();
            path
        }

        fn dimensions(&self) -> (i64, i64) {
            let guard = self.settings.lock().unwrap();
            (guard.width, guard.height)
        }

        fn global<T: FromLua>(&self, name: &str) -> T {
            self.host.lua.globals().get(name).unwrap()
        }
    }

    #[test]
    fn test_initialize_exposes_settings_and_capabilities() {
        let fx = Fixture::new();
        let (w, h, graphics, input): (i64, i64, String, String) = fx
            .host
            .lua
            .load(
                r#"
                return lutro.settings.width, lutro.settings.height,
                       type(package.loaded["lutro.graphics"]),
                       type(package.loaded["lutro.input"])
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!((w, h), (320, 240));
        assert_eq!(graphics, "table");
        assert_eq!(input, "table");
        assert!(!fx.host.is_loaded());
    }

    #[test]
    fn test_script_without_hooks_keeps_defaults() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "local x = 1");

        fx.host.load(&path).unwrap();

        assert!(fx.host.is_loaded());
        assert_eq!(fx.dimensions(), (320, 240));
        assert!(fx.diagnostics.is_empty());
    }

    #[test]
    fn test_conf_partial_override() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            function lutro.conf(t)
                t.width = 640
            end
        "#,
        );

        fx.host.load(&path).unwrap();

        assert_eq!(fx.dimensions(), (640, 240));
        let guard = fx.settings.lock().unwrap();
        assert_eq!(guard.pitch, 640 * 4);
        assert_eq!(guard.framebuffer.as_ref().unwrap().len(), 640 * 240);
    }

    #[test]
    fn test_conf_receives_exposed_settings_table() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            function lutro.conf(t)
                same_table = (t == lutro.settings)
                seen_height = t.height
            end
        "#,
        );

        fx.host.load(&path).unwrap();

        assert!(fx.global::<bool>("same_table"));
        assert_eq!(fx.global::<i64>("seen_height"), 240);
    }

    #[test]
    fn test_load_sets_path_and_camera() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "");

        fx.host.load(&path).unwrap();

        let module = fx.host.script_module().unwrap();
        let script_path: String = module.get("path").unwrap();
        assert_eq!(script_path, format!("{}/", fx.dir.path().display()));
        let (cx, cy): (f64, f64) = (
            module.get("camera_x").unwrap(),
            module.get("camera_y").unwrap(),
        );
        assert_eq!((cx, cy), (0.0, 0.0));
    }

    #[test]
    fn test_load_path_keeps_relative_segment() {
        let mut fx = Fixture::new();
        fx.write("main.lua", "");
        let path = fx.dir.path().join(".").join("main.lua");

        fx.host.load(&path).unwrap();

        let script_path: String = fx.host.script_module().unwrap().get("path").unwrap();
        assert_eq!(script_path, format!("{}/./", fx.dir.path().display()));
    }

    #[test]
    fn test_script_can_require_siblings() {
        let mut fx = Fixture::new();
        fx.write("helper.lua", "return { answer = 42 }");
        let path = fx.write(
            "main.lua",
            r#"
            local helper = require("helper")
            answer = helper.answer
        "#,
        );

        fx.host.load(&path).unwrap();
        assert_eq!(fx.global::<i64>("answer"), 42);
    }

    #[test]
    fn test_load_hook_runs_after_framebuffer_init() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            function lutro.conf(t) t.width = 16; t.height = 8 end
            function lutro.load()
                loaded_width = lutro.graphics.getWidth()
                lutro.graphics.clear()
            end
        "#,
        );

        fx.host.load(&path).unwrap();
        assert_eq!(fx.global::<i64>("loaded_width"), 16);
    }

    #[test]
    fn test_syntax_error_leaves_nothing_callable() {
        let mut fx = Fixture::new();
        let path = fx.write("bad.lua", "function lutro.update(dt) {{{{");

        let err = fx.host.load(&path).unwrap_err();
        assert!(matches!(err, HostError::ScriptLoad { .. }));
        assert!(err.to_string().contains("bad.lua"));
        assert!(!fx.host.is_loaded());

        let err = fx.host.run_frame(1.0 / 60.0).unwrap_err();
        assert_eq!(err, HostError::NotLoaded);

        let messages = fx.diagnostics.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("bad.lua"));
        assert_eq!(messages[1], "no script loaded");
    }

    #[test]
    fn test_conf_failure_aborts_load() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            function lutro.update(dt) updated = true end
            function lutro.conf(t) error("bad config") end
        "#,
        );

        let err = fx.host.load(&path).unwrap_err();
        assert!(err.to_string().contains("bad config"));
        assert!(fx.host.run_frame(0.1).is_err());

        let updated: Option<bool> = fx.global("updated");
        assert_eq!(updated, None);
        assert_eq!(fx.dimensions(), (320, 240));
    }

    #[test]
    fn test_load_hook_failure_aborts_load() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", r#"function lutro.load() error("setup failed") end"#);

        let err = fx.host.load(&path).unwrap_err();
        assert!(err.to_string().contains("setup failed"));
        assert!(!fx.host.is_loaded());
        assert!(fx.diagnostics.messages()[0].contains("setup failed"));
    }

    #[test]
    fn test_non_callable_conf_fails_load() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "lutro.conf = 12");

        let err = fx.host.load(&path).unwrap_err();
        assert!(err.to_string().contains("lutro.conf must be a function"));
    }

    #[test]
    fn test_invalid_dimensions_fail_load() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "function lutro.conf(t) t.height = 0 end");

        let err = fx.host.load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid height"));
    }

    #[test]
    fn test_oversized_dimensions_fail_load() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            function lutro.conf(t)
                t.width = 4294967296
                t.height = 4294967296
            end
            function lutro.load() loaded = true end
        "#,
        );

        let err = fx.host.load(&path).unwrap_err();
        assert!(matches!(err, HostError::ScriptLoad { .. }));
        assert!(err.to_string().contains("invalid width"));
        assert!(!fx.host.is_loaded());

        let loaded: Option<bool> = fx.global("loaded");
        assert_eq!(loaded, None);
        assert!(fx.settings.lock().unwrap().framebuffer.is_none());
    }

    #[test]
    fn test_huge_float_dimension_fails_load() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "function lutro.conf(t) t.width = 1e300 end");

        let err = fx.host.load(&path).unwrap_err();
        assert!(err.to_string().contains("lutro.settings.width must be an integer"));
    }

    #[test]
    fn test_top_level_settings_write_is_merged_without_conf() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "lutro.settings.width = 400");

        fx.host.load(&path).unwrap();

        assert_eq!(fx.dimensions(), (400, 240));
        let guard = fx.settings.lock().unwrap();
        assert_eq!(guard.pitch, 400 * 4);
        assert_eq!(guard.framebuffer.as_ref().unwrap().len(), 400 * 240);
    }

    #[test]
    fn test_non_utf8_source_loads() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", b"title = 'caf\xe9'\n");

        fx.host.load(&path).unwrap();

        let (len, last): (i64, i64) = fx
            .host
            .lua
            .load("return #title, string.byte(title, 4)")
            .eval()
            .unwrap();
        assert_eq!((len, last), (4, 0xe9));
    }

    #[test]
    fn test_missing_file_fails_load() {
        let mut fx = Fixture::new();
        let path = fx.dir.path().join("missing.lua");

        let err = fx.host.load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_update_then_draw_counter() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            counter = 0
            observed = {}
            function lutro.update(dt) counter = counter + 1 end
            function lutro.draw() table.insert(observed, counter) end
        "#,
        );
        fx.host.load(&path).unwrap();

        fx.host.run_frame(1.0 / 60.0).unwrap();
        fx.host.run_frame(1.0 / 60.0).unwrap();

        assert_eq!(fx.global::<i64>("counter"), 2);
        let observed: Vec<i64> = fx
            .global::<LuaTable>("observed")
            .sequence_values::<i64>()
            .collect::<LuaResult<_>>()
            .unwrap();
        assert_eq!(observed, vec![1, 2]);
    }

    #[test]
    fn test_frame_error_keeps_module_intact() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            frames = 0
            drawn = 0
            function lutro.update(dt)
                frames = frames + 1
                if frames == 1 then error("first frame fails") end
            end
            function lutro.draw() drawn = drawn + 1 end
        "#,
        );
        fx.host.load(&path).unwrap();

        let err = fx.host.run_frame(0.1).unwrap_err();
        assert!(err.is_frame_error());
        assert_eq!(fx.global::<i64>("drawn"), 0);

        fx.host.run_frame(0.1).unwrap();
        assert_eq!(fx.global::<i64>("drawn"), 1);
        assert!(fx.diagnostics.messages()[0].contains("first frame fails"));
    }

    #[test]
    fn test_extreme_draw_coordinates_do_not_fault() {
        let mut fx = Fixture::new();
        let path = fx.write(
            "main.lua",
            r#"
            function lutro.draw()
                lutro.graphics.rectangle("fill", 1e300, 0, 1e300, 1)
                lutro.graphics.rectangle("line", -1e300, -1e300, 1e300, 1e300)
                lutro.graphics.rectangle("dotted", 0, 0, 1, 1)
            end
        "#,
        );
        fx.host.load(&path).unwrap();

        let err = fx.host.run_frame(0.1).unwrap_err();
        assert!(matches!(
            err,
            HostError::Hook {
                hook: HookName::Draw,
                ..
            }
        ));
        assert!(err.to_string().contains("invalid draw mode"));
        assert!(fx.host.is_loaded());
    }

    #[test]
    fn test_script_without_frame_hooks_runs_cleanly() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "");
        fx.host.load(&path).unwrap();

        fx.host.run_frame(0.016).unwrap();
        assert!(fx.diagnostics.is_empty());
    }

    #[test]
    fn test_shutdown_releases_runtime() {
        let mut fx = Fixture::new();
        let path = fx.write("main.lua", "");
        fx.host.load(&path).unwrap();

        let Fixture { host, settings, .. } = fx;
        host.shutdown();

        // The settings store outlives the runtime.
        assert_eq!(Arc::strong_count(&settings), 1);
    }
}
