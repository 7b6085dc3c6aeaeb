//! Markdown parse → section filter → render.
//!
//! Parsing and serialization are delegated to `comrak` with the GFM table,
//! strikethrough and task-list extensions; this crate only decides which
//! top-level blocks survive.

pub mod filter;

use comrak::nodes::AstNode;
use comrak::{Arena, Options, format_commonmark, parse_document};
use tracing::{debug, instrument};

use skillsync_shared::{Result, SectionRules, SkillSyncError};

pub use filter::{Block, FilterReport, Verdict, filter_document, select_blocks};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Filtered README ready to be spliced.
#[derive(Debug, Clone)]
pub struct Extracted {
    /// Rendered Markdown of the kept blocks.
    pub markdown: String,
    /// What the filter kept and dropped.
    pub report: FilterReport,
}

// ---------------------------------------------------------------------------
// Parse / render
// ---------------------------------------------------------------------------

/// Grammar used for both parsing and rendering.
pub fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options
}

/// Serialize a document tree back to Markdown.
pub fn render<'a>(root: &'a AstNode<'a>) -> Result<String> {
    let mut output = Vec::new();
    format_commonmark(root, &markdown_options(), &mut output)
        .map_err(|e| SkillSyncError::Render(format!("commonmark formatting failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| SkillSyncError::Render(format!("rendered Markdown is not UTF-8: {e}")))
}

/// Parse `markdown`, keep the sections selected by `rules`, and render the result.
#[instrument(skip_all, fields(input_len = markdown.len()))]
pub fn extract_sections(markdown: &str, rules: &SectionRules) -> Result<Extracted> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &markdown_options());

    let report = filter_document(root, rules);
    let markdown = render(root)?;

    debug!(
        kept = report.kept,
        dropped = report.dropped(),
        output_len = markdown.len(),
        "sections extracted"
    );

    Ok(Extracted { markdown, report })
}
