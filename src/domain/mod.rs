// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// The heart of the application: the exam model and the rules
// that keep it consistent.
//
// Rules for this layer:
//   - NO reading or writing files (the renderer trait is the
//     only way out); path checks like is_dir are allowed
//   - NO csv parsing, NO document formats
//   - Only plain Rust structs, enums, and traits
//
// Entities nest like this:
//
//   Exam ──owns──▶ Question ──owns──▶ Answer
//
// and leave the layer as a flat stream of Items.

// Typed errors of the model and of loading
pub mod error;

// Positional reading of row values
pub mod tokens;

// Answer and true/false answer
pub mod answer;

// Question with correct-answer tracking
pub mod question;

// One input table line
pub mod row;

// The ordered question list
pub mod exam;

// Leveled renderer items
pub mod item;

// Exam → item streams, with per-copy shuffling
pub mod serialize;

// Exam::print and its options
pub mod print;

// Core abstractions (traits) that other layers implement
pub mod traits;
