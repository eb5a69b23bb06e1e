use std::io::Cursor;
use std::path::Path;

use caliper_core::models::report::AssembledReport;
use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use tracing::info;

use crate::blocks::{Block, report_blocks};
use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from an assembled report.
///
/// Section labels become Heading 1 paragraphs under a Title paragraph;
/// failed or skipped sections get an italic marker in `marker_color`.
pub fn generate_docx(
    report: &AssembledReport,
    title: &str,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Title", "title", styles.title_size))
        .add_style(heading_style("Heading1", "heading 1", styles.heading_size))
        .add_style(heading_style("Heading2", "heading 2", styles.subheading_size));

    for block in report_blocks(report, title) {
        let paragraph = match block {
            Block::Title(text) => heading_paragraph(&text, "Title", styles),
            Block::Heading(text) => heading_paragraph(&text, "Heading1", styles),
            Block::Subheading(text) => heading_paragraph(&text, "Heading2", styles),
            Block::Bullet(text) => bullet_paragraph(&text, styles),
            Block::Body(text) => body_paragraph(&text, styles),
            Block::Marker(text) => marker_paragraph(&text, styles),
            Block::Spacer => Paragraph::new(),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Generate the DOCX and write it to `path`.
pub fn save_docx(
    report: &AssembledReport,
    title: &str,
    styles: &DocumentStyles,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = generate_docx(report, title, styles)?;
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote DOCX export");
    Ok(())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run("\u{2022} ", styles));

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn marker_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run(text, styles).italic().color(&styles.marker_color))
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(body_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        match after_start.find("**") {
            Some(end) => {
                runs.push(body_run(&after_start[..end], styles).bold());
                remaining = &after_start[end + 2..];
            }
            None => {
                // Unclosed marker: keep the rest as plain text.
                runs.push(body_run(remaining, styles));
                return runs;
            }
        }
    }

    if !remaining.is_empty() {
        runs.push(body_run(remaining, styles));
    }
    runs
}
