use colored::Colorize;
use rocket::{ProgressSink, Stage};

/// Prints each bootstrap stage to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProgress;

impl ProgressSink for TerminalProgress {
	fn stage(&self, stage: Stage) {
		let marker = match stage {
			Stage::Ready => "✓".green().bold(),
			_ => "==>".cyan().bold(),
		};
		eprintln!("{marker} {stage}");
	}
}
