// ============================================================
// Layer 6 - DOCX Renderer
// ============================================================
// Writes an item stream as a .docx file using the docx-rs crate.
//
// The document is one two-level numbered list:
//
//   Header: heading text
//   1. question text          ← Top item, list level 0
//      [question image]
//      A. answer text         ← Sub item, list level 1
//      B. answer text
//   2. question text
//      ...
//   Footer: footer text
//
// Bullet styles come from the RenderTarget, so the same writer
// prints assignments (1. / A.) and answer keys (A. / 1.).
// Word restarts the sub level after every top item.
//
// Images are read from disk when their item is pulled; a missing
// image file aborts the document with the underlying io error.
//
// Reference: docx-rs crate documentation

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    path::Path,
};
use docx_rs::{
    AbstractNumbering, BreakType, Docx, Footer, Header, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Pic, Run, SpecialIndentType, Start,
};
use thiserror::Error;

use crate::domain::item::{Item, ItemLevel};
use crate::domain::traits::{BulletStyle, DocumentRenderer, RenderTarget};

/// Id shared by the abstract numbering and its instance
const LIST_NUMBERING_ID: usize = 1;

/// Twips of indentation per list level
const LEVEL_INDENT: i32 = 720;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("the first item of a document must be a top level item")]
    LeadingSubItem,
}

/// Stateless .docx writer
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for DocxRenderer {
    fn render(&self, items: &mut dyn Iterator<Item = Item>, target: &RenderTarget) -> Result<()> {
        let mut docx = Docx::new()
            .add_abstract_numbering(list_numbering(target))
            .add_numbering(Numbering::new(LIST_NUMBERING_ID, LIST_NUMBERING_ID));

        if !target.heading.is_empty() {
            docx = docx.header(Header::new().add_paragraph(plain_paragraph(&target.heading)));
        }
        if !target.footer.is_empty() {
            docx = docx.footer(Footer::new().add_paragraph(plain_paragraph(&target.footer)));
        }

        let mut written = 0usize;
        for item in items {
            if written == 0 && item.level == ItemLevel::Sub {
                return Err(RenderError::LeadingSubItem.into());
            }
            docx = docx.add_paragraph(item_paragraph(&item)?);
            written += 1;
        }

        write_docx(docx, &target.path)?;
        tracing::info!("Wrote {} items to '{}'", written, target.path.display());
        Ok(())
    }
}

fn write_docx(docx: Docx, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    docx.build()
        .pack(file)
        .with_context(|| format!("Cannot write docx '{}'", path.display()))?;
    Ok(())
}

fn list_numbering(target: &RenderTarget) -> AbstractNumbering {
    AbstractNumbering::new(LIST_NUMBERING_ID)
        .add_level(list_level(0, target.top_bullet))
        .add_level(list_level(1, target.sub_bullet))
}

fn list_level(level: usize, style: BulletStyle) -> Level {
    let format = match style {
        BulletStyle::Numeric => "decimal",
        BulletStyle::Letter  => "upperLetter",
    };
    Level::new(
        level,
        Start::new(1),
        NumberFormat::new(format),
        LevelText::new(format!("%{}.", level + 1)),
        LevelJc::new("left"),
    )
    .indent(
        Some(LEVEL_INDENT * (level as i32 + 1)),
        Some(SpecialIndentType::Hanging(360)),
        None,
        None,
    )
}

fn plain_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn item_paragraph(item: &Item) -> Result<Paragraph> {
    let level = match item.level {
        ItemLevel::Top => 0,
        ItemLevel::Sub => 1,
    };
    let mut paragraph = plain_paragraph(&item.text)
        .numbering(NumberingId::new(LIST_NUMBERING_ID), IndentLevel::new(level));

    if let Some(image) = item.image() {
        let bytes = fs::read(image)
            .with_context(|| format!("Cannot read image '{}'", image.display()))?;
        paragraph = paragraph.add_run(
            Run::new()
                .add_break(BreakType::TextWrapping)
                .add_image(Pic::new(&bytes)),
        );
    }
    Ok(paragraph)
}
