//! Flatten an assembled report into the paragraph blocks the DOCX writer
//! lays out.
//!
//! Generated text uses a small Markdown subset:
//! - `# `, `## ` or `### ` lines become sub-headings
//! - `- ` or `* ` lines become bullets
//! - blank lines separate paragraphs (runs of them collapse into one)
//! - everything else is body text

use caliper_core::models::report::{AssembledReport, SectionOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    Bullet(String),
    Body(String),
    /// Stands in for a failed or skipped section.
    Marker(String),
    Spacer,
}

pub fn report_blocks(report: &AssembledReport, title: &str) -> Vec<Block> {
    let mut blocks = vec![Block::Title(title.to_string())];

    for section in &report.sections {
        blocks.push(Block::Heading(section.label.clone()));
        match &section.outcome {
            SectionOutcome::Generated(text) => blocks.extend(text_blocks(text)),
            outcome => {
                if let Some(marker) = outcome.marker() {
                    blocks.push(Block::Marker(marker));
                }
            }
        }
        blocks.push(Block::Spacer);
    }

    blocks
}

fn text_blocks(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !matches!(blocks.last(), None | Some(Block::Spacer)) {
                blocks.push(Block::Spacer);
            }
            continue;
        }

        let block = if let Some(heading) = ["### ", "## ", "# "]
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
        {
            Block::Subheading(heading.trim().to_string())
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            Block::Bullet(item.trim().to_string())
        } else {
            Block::Body(trimmed.to_string())
        };
        blocks.push(block);
    }

    if blocks.last() == Some(&Block::Spacer) {
        blocks.pop();
    }
    blocks
}
