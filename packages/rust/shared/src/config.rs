//! Built-in configuration for skillsync.
//!
//! The tool has no config file and no flags: every parameter is a constant
//! gathered here into [`SyncConfig`]. Tests build their own instance to point
//! the pipeline at a mock server and a scratch file.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Result, SkillSyncError};

/// Raw README of the upstream `just` project.
pub const README_URL: &str = "https://raw.githubusercontent.com/casey/just/refs/heads/master/README.md";

/// Destination file, relative to the workspace root.
pub const SKILL_FILE: &str = "skills/justfile/SKILL.md";

/// End of the hand-written header in `SKILL.md`.
pub const MARKER: &str = "It fully documents the Justfile syntax and system.\n\n---";

/// Headings that switch the keep flag off.
pub const EXCLUDE_SECTIONS: &[&str] = &[
    "installation",
    "backwards compatibility",
    "editor support",
    "changelog",
    "miscellanea",
    "contributing",
    "frequently asked questions",
    "further ramblings",
    "packages",
];

/// Headings that switch the keep flag back on.
pub const INCLUDE_SECTIONS: &[&str] = &["quick start", "examples", "features", "the default recipe"];

// ---------------------------------------------------------------------------
// Section rules
// ---------------------------------------------------------------------------

/// Ordered exclusion and inclusion keyword lists, all lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRules {
    /// Checked first.
    pub exclude: Vec<String>,
    /// Checked only when no exclusion keyword matched.
    pub include: Vec<String>,
}

impl SectionRules {
    /// Build rules from keyword slices.
    pub fn new(exclude: &[&str], include: &[&str]) -> Self {
        Self {
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            include: include.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// New keep-flag value implied by a heading, if any.
    ///
    /// The heading is trimmed and lowercased first. An exclusion match yields
    /// `Some(false)`, otherwise an inclusion match yields `Some(true)`, and a
    /// heading matching neither list leaves the flag alone (`None`).
    pub fn toggle(&self, heading: &str) -> Option<bool> {
        let text = heading.trim().to_lowercase();

        if matches_any(&text, &self.exclude) {
            Some(false)
        } else if matches_any(&text, &self.include) {
            Some(true)
        } else {
            None
        }
    }
}

impl Default for SectionRules {
    fn default() -> Self {
        Self::new(EXCLUDE_SECTIONS, INCLUDE_SECTIONS)
    }
}

/// `text` equals a keyword, or starts with it followed by a space.
fn matches_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| {
        text == kw
            || text
                .strip_prefix(kw.as_str())
                .is_some_and(|rest| rest.starts_with(' '))
    })
}

// ---------------------------------------------------------------------------
// Sync config
// ---------------------------------------------------------------------------

/// Everything one `update-just-skill` run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Where the upstream README is fetched from.
    pub readme_url: Url,
    /// File rewritten after the marker.
    pub skill_file: PathBuf,
    /// Section keyword lists.
    pub rules: SectionRules,
    /// Header boundary searched for in `skill_file`.
    pub marker: String,
}

impl SyncConfig {
    /// Production constants for the `just` skill, rooted at `workspace_root`.
    pub fn justfile(workspace_root: &Path) -> Result<Self> {
        let readme_url = Url::parse(README_URL)
            .map_err(|e| SkillSyncError::config(format!("invalid README URL '{README_URL}': {e}")))?;

        Ok(Self {
            readme_url,
            skill_file: workspace_root.join(SKILL_FILE),
            rules: SectionRules::default(),
            marker: MARKER.to_string(),
        })
    }
}

/// Root of the workspace this crate was built from.
pub fn workspace_root() -> PathBuf {
    // packages/rust/shared -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../..")
}
