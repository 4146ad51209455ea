//! Domain error types

use crate::settings::MAX_DIMENSION;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid {field}: {value} (must be between 1 and {max})", max = MAX_DIMENSION)]
    InvalidDimension { field: &'static str, value: i64 },

    #[error("failed to allocate a framebuffer of {pixels} pixels")]
    FramebufferAllocation { pixels: usize },

    #[error("unknown joypad button: '{0}'")]
    UnknownButton(String),
}
