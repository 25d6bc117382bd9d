// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The exam knows how to produce item streams but not how to turn
// them into a file. That is the renderer's job, behind a trait:
//   - DocxRenderer implements DocumentRenderer (infra layer)
//   - tests use an in-memory renderer that just records items
//
// The domain only sees DocumentRenderer and never touches the
// file system itself.

use std::path::PathBuf;

use anyhow::Result;

use super::item::Item;

// ─── Bullets ──────────────────────────────────────────────────────────────────
/// How a list level is numbered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletStyle {
    /// 1, 2, 3, ...
    Numeric,
    /// A, B, C, ...
    Letter,
}

// ─── RenderTarget ─────────────────────────────────────────────────────────────
/// Where and how one document is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub path:       PathBuf,
    pub heading:    String,
    pub footer:     String,
    pub top_bullet: BulletStyle,
    pub sub_bullet: BulletStyle,
}

// ─── DocumentRenderer ─────────────────────────────────────────────────────────
/// Any component that can write a leveled item stream as a document.
///
/// Items are pulled one at a time. The first item of a non-empty
/// stream must be a top item; a renderer rejects anything else.
pub trait DocumentRenderer {
    fn render(&self, items: &mut dyn Iterator<Item = Item>, target: &RenderTarget) -> Result<()>;
}
