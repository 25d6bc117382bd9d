// ============================================================
// Layer 4 - Data Loading
// ============================================================
// This layer handles everything from a raw .csv file on disk
// to a loaded Exam.
//
// The pipeline flows in this order:
//
//   .csv file
//       │
//       ▼
//   encoding   → guesses the text encoding, decodes the bytes
//       │
//       ▼
//   loader     → splits the text into rows, hands them to
//                Exam::load, resolves image paths
//
// Each module is responsible for exactly one step.

/// Encoding detection and decoding of text files
pub mod encoding;

/// Reads csv files into rows and exams using the csv crate
pub mod loader;
