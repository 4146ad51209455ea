//! CLI entrypoint for lutro
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use lutro_application::{
    DiagnosticSink, FrameClock, RunGameError, RunGameInput, RunGameUseCase,
};
use lutro_domain::Settings;
use lutro_infrastructure::{
    ConfigLoader, FixedStepClock, HostFileConfig, LuaRuntimeHost, PacedClock,
};
use lutro_presentation::{Cli, ConsoleFormatter, StderrDiagnostics};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli)?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources() {
            println!("{}", line);
        }
        println!();
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let script = cli
        .script
        .clone()
        .context("a script path is required")?;

    // === Dependency Injection ===
    let settings =
        Settings::with_resolution(config.display.width, config.display.height).into_store();
    let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(StderrDiagnostics);

    let host = match LuaRuntimeHost::initialize(Arc::clone(&settings), diagnostics) {
        Ok(host) => host,
        // Already written to the diagnostic stream
        Err(_) => return Ok(ExitCode::FAILURE),
    };

    let clock: Box<dyn FrameClock> = if config.runtime.realtime {
        Box::new(PacedClock::new(config.runtime.fps))
    } else {
        Box::new(FixedStepClock::new(config.runtime.fps))
    };

    let mut input = RunGameInput::new(&script);
    input.frames = config.runtime.frames;
    if !config.runtime.halt_on_frame_error {
        input = input.keep_going();
    }

    if !cli.quiet {
        println!("{}", ConsoleFormatter::banner(&script.display().to_string()));
    }
    info!("Starting lutro with {} fps", config.runtime.fps);

    let mut use_case = RunGameUseCase::new(host, clock);
    let outcome = use_case.execute(input);
    use_case.into_runtime().shutdown();

    match outcome {
        Ok(summary) => {
            if !cli.quiet {
                let guard = settings
                    .lock()
                    .map_err(|e| anyhow::anyhow!("settings lock poisoned: {}", e))?;
                print!("{}", ConsoleFormatter::summary(&summary, &guard));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(RunGameError::Load(_)) => Ok(ExitCode::FAILURE),
        Err(e @ RunGameError::Frame { .. }) => {
            warn!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Merge config files with command-line overrides.
fn resolve_config(cli: &Cli) -> Result<HostFileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };

    if let Some(width) = cli.width {
        config.display.width = width;
    }
    if let Some(height) = cli.height {
        config.display.height = height;
    }
    if let Some(fps) = cli.fps {
        config.runtime.fps = fps;
    }
    if cli.frames.is_some() {
        config.runtime.frames = cli.frames;
    }
    if cli.fixed_step {
        config.runtime.realtime = false;
    }
    if cli.keep_going {
        config.runtime.halt_on_frame_error = false;
    }

    config.validate()?;
    Ok(config)
}
