//! Command execution, progress output, and tracing setup.

use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use skillsync_core::pipeline::{ProgressReporter, UpdateResult, update_skill};
use skillsync_shared::{SyncConfig, workspace_root};

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing; `RUST_LOG` overrides the default filter.
pub(crate) fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skillsync=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Update `SKILL.md` from the upstream README.
pub(crate) async fn run() -> Result<()> {
    let config = SyncConfig::justfile(&workspace_root())?;

    info!(
        url = %config.readme_url,
        skill_file = %config.skill_file.display(),
        "updating skill"
    );

    let reporter = CliProgress::new();
    update_skill(&config, &reporter).await?;

    println!("Done.");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Prints each phase as a line; on a terminal an indicatif spinner also
/// shows the phase in progress.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    /// `ProgressBar::println` is silent when the bar is hidden (no TTY).
    fn line(&self, message: &str) {
        if self.spinner.is_hidden() {
            println!("{message}");
        } else {
            self.spinner.println(message);
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, message: &str) {
        self.line(message);
        self.spinner.set_message(message.to_string());
    }

    fn marker_missing(&self) {
        self.spinner.suspend(|| eprintln!("Marker not found! Appending to end."));
    }

    fn done(&self, _result: &UpdateResult) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Clears the spinner when the pipeline bails out early.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
