//! End-to-end update: README URL → fetch → filter → splice → `SKILL.md`.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument, warn};

use skillsync_markdown::FilterReport;
use skillsync_shared::{Result, SkillSyncError, SyncConfig};

use crate::splice::splice;

/// Progress line printed before the fetch.
pub const PHASE_FETCH: &str = "Fetching README...";
/// Progress line printed before parsing and filtering.
pub const PHASE_PROCESS: &str = "Processing Markdown...";
/// Progress line printed before reading the destination.
pub const PHASE_READ: &str = "Reading SKILL.md...";
/// Progress line printed before the overwrite.
pub const PHASE_WRITE: &str = "Writing to SKILL.md...";

/// Result of the `update_skill` pipeline.
#[derive(Debug)]
pub struct UpdateResult {
    /// File that was rewritten.
    pub skill_file: PathBuf,
    /// Bytes written to `skill_file`.
    pub bytes_written: usize,
    /// `false` when the header fallback was used.
    pub marker_found: bool,
    /// Section filter counts.
    pub report: FilterReport,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, message: &str);
    /// Called when the destination has no marker and the fallback header is used.
    fn marker_missing(&self);
    /// Called when the pipeline completes.
    fn done(&self, result: &UpdateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _message: &str) {}
    fn marker_missing(&self) {}
    fn done(&self, _result: &UpdateResult) {}
}

/// Run the full update.
///
/// 1. Fetch the README
/// 2. Parse, filter sections, render
/// 3. Read the destination
/// 4. Splice after the marker
/// 5. Overwrite the destination
///
/// Any failure before step 5 leaves the destination untouched.
#[instrument(skip_all, fields(url = %config.readme_url, skill_file = %config.skill_file.display()))]
pub async fn update_skill(
    config: &SyncConfig,
    progress: &dyn ProgressReporter,
) -> Result<UpdateResult> {
    let start = Instant::now();

    // --- Phase 1: Fetch ---
    progress.phase(PHASE_FETCH);
    let readme = skillsync_fetcher::fetch_readme(&config.readme_url).await?;

    // --- Phase 2: Filter ---
    progress.phase(PHASE_PROCESS);
    let extracted = skillsync_markdown::extract_sections(&readme, &config.rules)?;
    info!(
        kept = extracted.report.kept,
        out_of_section = extracted.report.out_of_section,
        boilerplate = extracted.report.boilerplate,
        "README filtered"
    );

    // --- Phase 3: Read destination ---
    progress.phase(PHASE_READ);
    let current = std::fs::read_to_string(&config.skill_file)
        .map_err(|e| SkillSyncError::io(&config.skill_file, e))?;

    // --- Phase 4: Splice ---
    let spliced = splice(&current, &extracted.markdown, &config.marker);
    if !spliced.marker_found {
        warn!("marker not found, appending to end of file");
        progress.marker_missing();
    }

    // --- Phase 5: Write ---
    progress.phase(PHASE_WRITE);
    std::fs::write(&config.skill_file, &spliced.text)
        .map_err(|e| SkillSyncError::io(&config.skill_file, e))?;

    let result = UpdateResult {
        skill_file: config.skill_file.clone(),
        bytes_written: spliced.text.len(),
        marker_found: spliced.marker_found,
        report: extracted.report,
        elapsed: start.elapsed(),
    };

    info!(
        bytes = result.bytes_written,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "SKILL.md updated"
    );
    progress.done(&result);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use skillsync_shared::{MARKER, SectionRules};
    use url::Url;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const README: &str = "# just\n\nIntro.\n\n## Installation\n\nInstall steps.\n\n## Quick Start\n\nRun it.\n";

    /// Records every callback for assertions.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingProgress {
        fn phase(&self, message: &str) {
            self.events.lock().unwrap().push(message.to_string());
        }
        fn marker_missing(&self) {
            self.events.lock().unwrap().push("marker missing".to_string());
        }
        fn done(&self, _result: &UpdateResult) {
            self.events.lock().unwrap().push("done".to_string());
        }
    }

    fn temp_skill_file(contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skillsync-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("SKILL.md");
        std::fs::write(&file, contents).unwrap();
        file
    }

    fn test_config(server: &MockServer, skill_file: PathBuf) -> SyncConfig {
        SyncConfig {
            readme_url: Url::parse(&format!("{}/README.md", server.uri())).unwrap(),
            skill_file,
            rules: SectionRules::default(),
            marker: MARKER.to_string(),
        }
    }

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/README.md"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_update_rewrites_after_marker() {
        let server = serve(200, README).await;
        let header = format!("---\nname: justfile\n---\n\n{MARKER}");
        let skill_file = temp_skill_file(&format!("{header}\nstale generated text\n"));
        let config = test_config(&server, skill_file.clone());
        let progress = RecordingProgress::default();

        let result = update_skill(&config, &progress).await.unwrap();

        let written = std::fs::read_to_string(&skill_file).unwrap();
        assert!(written.starts_with(&format!("{header}\n\n")));
        assert!(written.contains("Intro."));
        assert!(written.contains("Run it."));
        assert!(!written.contains("Install steps."));
        assert!(!written.contains("stale generated text"));
        assert!(result.marker_found);
        assert_eq!(result.bytes_written, written.len());
        assert_eq!(
            progress.events(),
            [PHASE_FETCH, PHASE_PROCESS, PHASE_READ, PHASE_WRITE, "done"]
        );

        std::fs::remove_dir_all(skill_file.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn test_update_without_marker_appends() {
        let server = serve(200, README).await;
        let skill_file = temp_skill_file("NO MARKER HERE");
        let config = test_config(&server, skill_file.clone());
        let progress = RecordingProgress::default();

        let result = update_skill(&config, &progress).await.unwrap();

        let written = std::fs::read_to_string(&skill_file).unwrap();
        assert!(written.starts_with("NO MARKER HERE\n\n---\n\n"));
        assert!(written.contains("Run it."));
        assert!(!result.marker_found);
        assert!(progress.events().contains(&"marker missing".to_string()));

        std::fs::remove_dir_all(skill_file.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_file_untouched() {
        let server = serve(404, "").await;
        let original = format!("header\n{MARKER}\nkeep me\n");
        let skill_file = temp_skill_file(&original);
        let config = test_config(&server, skill_file.clone());
        let progress = RecordingProgress::default();

        let err = update_skill(&config, &progress).await.unwrap_err();

        assert!(matches!(err, SkillSyncError::Fetch { .. }));
        assert_eq!(std::fs::read_to_string(&skill_file).unwrap(), original);
        assert_eq!(progress.events(), [PHASE_FETCH]);

        std::fs::remove_dir_all(skill_file.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn test_missing_destination_is_io_error() {
        let server = serve(200, README).await;
        let skill_file = std::env::temp_dir()
            .join(format!("skillsync-missing-{}", Uuid::now_v7()))
            .join("SKILL.md");
        let config = test_config(&server, skill_file.clone());

        let err = update_skill(&config, &SilentProgress).await.unwrap_err();

        assert!(matches!(err, SkillSyncError::Io { .. }));
        assert!(!skill_file.exists());
    }
}
