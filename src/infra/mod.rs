// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Turns item streams into files on disk:
//
//   docx_renderer.rs - .docx writer
//                      Implements the DocumentRenderer trait
//                      from Layer 3 with the docx-rs crate:
//                      header, footer, a two-level numbered
//                      list and embedded images.
//
// Keeping document formats here means the domain never depends
// on docx-rs, and another format only needs another renderer.

/// .docx output for exams and answer keys
pub mod docx_renderer;
