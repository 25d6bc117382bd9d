// ============================================================
// Layer 2 - PrintUseCase
// ============================================================
// Orchestrates a print run in order:
//
//   Step 1: Read the csv file into an Exam      (Layer 4 - data)
//   Step 2: Serialize N shuffled copies         (Layer 3 - domain)
//   Step 3: Write each copy and the answer key  (Layer 6 - infra)
//
// The whole run is described by a PrintConfig, which can come
// from the command line or from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::loader::{load_exam, CsvOptions};
use crate::domain::print::PrintOptions;
use crate::domain::serialize::{QuestionField, DEFAULT_CORRECTION_LABEL};
use crate::domain::traits::DocumentRenderer;
use crate::infra::docx_renderer::DocxRenderer;

// ─── Print Configuration ─────────────────────────────────────────────────────
// Everything a print run needs. Missing keys in a JSON file fall
// back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub input:             PathBuf,
    pub exam_file:         PathBuf,
    pub correction_file:   Option<PathBuf>,
    pub destination:       PathBuf,
    pub copies:            usize,
    pub shuffle_questions: bool,
    pub shuffle_answers:   bool,
    pub heading:           String,
    pub footer:            String,
    pub selector:          Vec<String>,
    pub to_be_shown:       Vec<QuestionField>,
    pub correction_label:  String,
    pub seed:              Option<u64>,
    pub csv:               CsvOptions,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            input:             PathBuf::from("questions.csv"),
            exam_file:         PathBuf::from("Exam.docx"),
            correction_file:   None,
            destination:       PathBuf::from("."),
            copies:            1,
            shuffle_questions: false,
            shuffle_answers:   false,
            heading:           String::new(),
            footer:            String::new(),
            selector:          Vec::new(),
            to_be_shown:       vec![QuestionField::Subject, QuestionField::Text],
            correction_label:  DEFAULT_CORRECTION_LABEL.to_string(),
            seed:              None,
            csv:               CsvOptions::default(),
        }
    }
}

impl PrintConfig {
    /// Load a configuration saved as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;
        tracing::debug!("Loaded print config from '{}'", path.display());
        Ok(config)
    }

    /// Save as pretty JSON, ready to be reloaded with `load`
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved print config to '{}'", path.display());
        Ok(())
    }

    /// The domain side of the configuration
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            exam_file:         self.exam_file.clone(),
            correction_file:   self.correction_file.clone(),
            shuffle_questions: self.shuffle_questions,
            shuffle_answers:   self.shuffle_answers,
            destination:       self.destination.clone(),
            copies:            self.copies,
            heading:           self.heading.clone(),
            footer:            self.footer.clone(),
            to_be_shown:       self.to_be_shown.clone(),
            correction_label:  self.correction_label.clone(),
            seed:              self.seed,
        }
    }
}

// ─── PrintUseCase ─────────────────────────────────────────────────────────────
pub struct PrintUseCase<R: DocumentRenderer = DocxRenderer> {
    config:   PrintConfig,
    renderer: R,
}

impl PrintUseCase<DocxRenderer> {
    /// Print to .docx files
    pub fn new(config: PrintConfig) -> Self {
        Self::with_renderer(config, DocxRenderer::new())
    }
}

impl<R: DocumentRenderer> PrintUseCase<R> {
    pub fn with_renderer(config: PrintConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    /// Run the whole print; returns the files written
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let cfg = &self.config;

        // ── Step 1: Load the exam ────────────────────────────────────────────
        tracing::info!("Loading questions from '{}'", cfg.input.display());
        let exam = load_exam(&cfg.input, &cfg.selector, &cfg.csv)
            .with_context(|| format!("Cannot load exam from '{}'", cfg.input.display()))?;
        if exam.is_empty() {
            tracing::warn!("'{}' holds no questions", cfg.input.display());
        }

        // ── Step 2 + 3: Serialize and render ────────────────────────────────
        tracing::info!(
            "Printing {} copies of {} questions (shuffle questions: {}, answers: {})",
            cfg.copies,
            exam.questions().len(),
            cfg.shuffle_questions,
            cfg.shuffle_answers
        );
        let written = exam.print(&self.renderer, &cfg.print_options())?;
        for path in &written {
            tracing::debug!("Written '{}'", path.display());
        }
        Ok(written)
    }
}
