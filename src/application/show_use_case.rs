// ============================================================
// Layer 2 - ShowUseCase
// ============================================================
// Loads a csv file and returns the exam as plain text, so the
// user can check how the columns were read before printing.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::data::loader::{load_exam, CsvOptions};

pub struct ShowUseCase {
    input:    PathBuf,
    selector: Vec<String>,
    csv:      CsvOptions,
}

impl ShowUseCase {
    pub fn new(input: PathBuf, selector: Vec<String>, csv: CsvOptions) -> Self {
        Self { input, selector, csv }
    }

    pub fn execute(&self) -> Result<String> {
        let exam = load_exam(&self.input, &self.selector, &self.csv)
            .with_context(|| format!("Cannot load exam from '{}'", self.input.display()))?;
        tracing::info!("{} questions read", exam.questions().len());
        Ok(exam.to_string())
    }
}
