//! Console output formatter for game runs

use colored::Colorize;
use lutro_application::RunSummary;
use lutro_domain::Settings;

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One-line banner printed before the script loads
    pub fn banner(script: &str) -> String {
        format!("{} {}", "lutro".cyan().bold(), script)
    }

    /// Summary of a finished run
    pub fn summary(summary: &RunSummary, settings: &Settings) -> String {
        let errors = if summary.frame_errors == 0 {
            "0".green().to_string()
        } else {
            summary.frame_errors.to_string().red().bold().to_string()
        };

        format!(
            "{}\n  {} {}\n  {} {}\n  {} {:.3}s\n  {} {}x{}\n",
            "Run complete".green().bold(),
            "Frames:".cyan().bold(),
            summary.frames_run,
            "Frame errors:".cyan().bold(),
            errors,
            "Simulated time:".cyan().bold(),
            summary.elapsed,
            "Resolution:".cyan().bold(),
            settings.width,
            settings.height,
        )
    }
}
