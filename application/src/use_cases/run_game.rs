//! Run Game use case.
//!
//! Loads a game script and drives it frame by frame. The runtime reports
//! every failure through its own diagnostic sink; this use case only decides
//! whether the run continues after a frame error.

use crate::ports::frame_clock::FrameClock;
use crate::ports::game_runtime::{GameRuntimePort, HostError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a game run.
#[derive(Error, Debug)]
pub enum RunGameError {
    #[error("failed to load script: {0}")]
    Load(#[source] HostError),

    #[error("frame {frame} failed: {source}")]
    Frame {
        frame: u64,
        #[source]
        source: HostError,
    },
}

/// Input for the [`RunGameUseCase`].
#[derive(Debug, Clone)]
pub struct RunGameInput {
    /// Path to the game's entry script.
    pub script: PathBuf,
    /// Number of frames to run; `None` runs until a halting error.
    pub frames: Option<u64>,
    /// Stop at the first frame error instead of continuing with the next frame.
    pub halt_on_frame_error: bool,
}

impl RunGameInput {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            frames: None,
            halt_on_frame_error: true,
        }
    }

    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn keep_going(mut self) -> Self {
        self.halt_on_frame_error = false;
        self
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames_run: u64,
    pub frame_errors: u64,
    /// Sum of the deltas handed to the script, in seconds.
    pub elapsed: f64,
}

/// Use case for running a game script.
///
/// 1. Load the script (fails the run on error)
/// 2. Call `run_frame(clock.tick())` until the frame budget is spent
/// 3. Count frame errors, halting on the first one if requested
pub struct RunGameUseCase<R, C> {
    runtime: R,
    clock: C,
}

impl<R: GameRuntimePort, C: FrameClock> RunGameUseCase<R, C> {
    pub fn new(runtime: R, clock: C) -> Self {
        Self { runtime, clock }
    }

    /// Hand the runtime back, e.g. to shut it down.
    pub fn into_runtime(self) -> R {
        self.runtime
    }

    pub fn execute(&mut self, input: RunGameInput) -> Result<RunSummary, RunGameError> {
        info!("Loading game script: {}", input.script.display());
        self.runtime
            .load(&input.script)
            .map_err(RunGameError::Load)?;

        let mut summary = RunSummary::default();
        while input.frames.is_none_or(|limit| summary.frames_run < limit) {
            let delta = self.clock.tick();
            let frame = summary.frames_run;
            summary.frames_run += 1;
            summary.elapsed += delta;

            match self.runtime.run_frame(delta) {
                Ok(()) => {}
                Err(source) => {
                    summary.frame_errors += 1;
                    if input.halt_on_frame_error || !source.is_frame_error() {
                        return Err(RunGameError::Frame { frame, source });
                    }
                    warn!("Frame {} failed, continuing: {}", frame, source);
                }
            }
        }

        debug!(
            "Run finished after {} frames ({} errors)",
            summary.frames_run, summary.frame_errors
        );
        Ok(summary)
    }
}
