//! Output: diagnostic stream and console formatting

pub mod console;
pub mod diagnostics;
