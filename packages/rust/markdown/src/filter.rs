//! Section filter over the top-level blocks of a parsed document.
//!
//! Headings are flat siblings in the tree, so the filter is a linear scan
//! carrying a single keep flag. Heading levels are never consulted.

use comrak::nodes::{AstNode, NodeValue};
use tracing::debug;

use skillsync_shared::SectionRules;

/// Raw-markup blocks containing this are a table of contents.
const TOC_NEEDLE: &str = "Table of Contents";

/// Centered raw-markup blocks linking this host are badge rows.
const SHIELDS_HOST: &str = "img.shields.io";
const CENTERED: &str = "align=center";

/// What the filter needs to know about one top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with its inline text concatenated.
    Heading(String),
    /// Raw HTML block with its literal source.
    Html(String),
    /// Anything else.
    Other,
}

/// Outcome for a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Block stays in the output.
    Keep,
    /// Block sits in a section that is switched off.
    OutOfSection,
    /// Table-of-contents or badge markup inside a kept section.
    Boilerplate,
}

/// Per-run counts of filtered top-level blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Blocks kept.
    pub kept: usize,
    /// Blocks dropped because their section was excluded.
    pub out_of_section: usize,
    /// Raw-markup blocks dropped as table of contents or badges.
    pub boilerplate: usize,
}

impl FilterReport {
    /// Total blocks dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.out_of_section + self.boilerplate
    }
}

/// Decide the fate of each block, in order.
///
/// Folds `(keeping, verdicts)` over the blocks, starting with `keeping =
/// true` so content before the first heading is kept. Only headings change
/// the flag; a heading matching neither keyword list leaves it as is.
pub fn select_blocks(blocks: &[Block], rules: &SectionRules) -> Vec<Verdict> {
    let (_, verdicts) = blocks.iter().fold(
        (true, Vec::with_capacity(blocks.len())),
        |(keeping, mut verdicts), block| {
            let keeping = match block {
                Block::Heading(text) => match rules.toggle(text) {
                    Some(next) => {
                        debug!(heading = %text.trim(), keeping = next, "section toggle");
                        next
                    }
                    None => keeping,
                },
                _ => keeping,
            };

            let verdict = match block {
                _ if !keeping => Verdict::OutOfSection,
                Block::Html(raw) if is_boilerplate(raw) => Verdict::Boilerplate,
                _ => Verdict::Keep,
            };

            verdicts.push(verdict);
            (keeping, verdicts)
        },
    );

    verdicts
}

/// Detach every top-level child of `root` that [`select_blocks`] drops.
pub fn filter_document<'a>(root: &'a AstNode<'a>, rules: &SectionRules) -> FilterReport {
    let children: Vec<&'a AstNode<'a>> = root.children().collect();
    let blocks: Vec<Block> = children.iter().map(|node| classify(node)).collect();
    let verdicts = select_blocks(&blocks, rules);

    let mut report = FilterReport::default();
    for (node, verdict) in children.into_iter().zip(verdicts) {
        match verdict {
            Verdict::Keep => report.kept += 1,
            Verdict::OutOfSection => {
                report.out_of_section += 1;
                node.detach();
            }
            Verdict::Boilerplate => {
                report.boilerplate += 1;
                node.detach();
            }
        }
    }

    report
}

fn is_boilerplate(raw: &str) -> bool {
    raw.contains(TOC_NEEDLE) || (raw.contains(CENTERED) && raw.contains(SHIELDS_HOST))
}

fn classify<'a>(node: &'a AstNode<'a>) -> Block {
    match &node.data.borrow().value {
        NodeValue::Heading(_) => Block::Heading(heading_text(node)),
        NodeValue::HtmlBlock(html) => Block::Html(html.literal.clone()),
        _ => Block::Other,
    }
}

/// Literal text of a heading's direct inline children.
fn heading_text<'a>(node: &'a AstNode<'a>) -> String {
    node.children()
        .filter_map(|child| match &child.data.borrow().value {
            NodeValue::Text(text) => Some(text.clone()),
            NodeValue::Code(code) => Some(code.literal.clone()),
            NodeValue::HtmlInline(raw) => Some(raw.clone()),
            _ => None,
        })
        .collect()
}
