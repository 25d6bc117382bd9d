// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (printing an exam or showing what was read).
//
// Rules for this layer:
//   - No exam rules here (that's Layer 3)
//   - No terminal output here (that's Layer 1)
//   - No direct csv or docx handling (that's Layer 4 and 6)
//   - Only workflow coordination

// The print workflow and its configuration
pub mod print_use_case;

// Load-and-display workflow
pub mod show_use_case;
