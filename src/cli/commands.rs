// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `print` and `show`, and all
// their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → usize, char, PathBuf, ...)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::print_use_case::PrintConfig;
use crate::data::loader::CsvOptions;
use crate::domain::serialize::{QuestionField, DEFAULT_CORRECTION_LABEL};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print exam copies (and the answer key) as .docx files
    Print(PrintArgs),

    /// Show the questions read from a csv file
    Show(ShowArgs),
}

/// How the csv file is split into fields
#[derive(Args, Debug, Clone)]
pub struct CsvArgs {
    /// Field separator
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Quote character
    #[arg(long, default_value_t = '"')]
    pub quote: char,

    /// Trim spaces around fields
    #[arg(long)]
    pub trim: bool,
}

impl From<CsvArgs> for CsvOptions {
    fn from(a: CsvArgs) -> Self {
        CsvOptions {
            delimiter: a.delimiter,
            quote:     a.quote,
            trim:      a.trim,
        }
    }
}

/// All arguments for the `print` command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// CSV file with the questions
    #[arg(default_value = "questions.csv")]
    pub input: PathBuf,

    /// Number of copies, each shuffled on its own
    #[arg(default_value_t = 1)]
    pub copies: usize,

    /// Exam file name; copies get a "_K_N" suffix
    #[arg(short, long = "exam", default_value = "Exam.docx")]
    pub exam_file: PathBuf,

    /// Answer key file name
    #[arg(short, long = "correction")]
    pub correction_file: Option<PathBuf>,

    /// Directory the files are written into
    #[arg(short, long, default_value = ".")]
    pub destination: PathBuf,

    /// Shuffle the question order of every copy
    #[arg(long)]
    pub shuffle_questions: bool,

    /// Shuffle the answers of every question
    #[arg(long)]
    pub shuffle_answers: bool,

    /// Page heading (defaults to the exam file name)
    #[arg(long, default_value = "")]
    pub heading: String,

    /// Page footer
    #[arg(long, default_value = "")]
    pub footer: String,

    /// Columns to read, in order; "void" skips an attribute
    #[arg(long, value_delimiter = ',')]
    pub selector: Vec<String>,

    /// Question fields shown on each question line
    #[arg(long, value_delimiter = ',', default_value = "subject,text")]
    pub show: Vec<QuestionField>,

    /// Label of each block in the answer key
    #[arg(long, default_value = DEFAULT_CORRECTION_LABEL)]
    pub label: String,

    /// Seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub csv: CsvArgs,

    /// Read every setting from this JSON file instead
    #[arg(long, conflicts_with = "save_config")]
    pub config: Option<PathBuf>,

    /// Save the settings of this run as JSON
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

/// Convert CLI PrintArgs into the application-layer PrintConfig.
/// The application layer never sees clap types.
impl From<PrintArgs> for PrintConfig {
    fn from(a: PrintArgs) -> Self {
        PrintConfig {
            input:             a.input,
            exam_file:         a.exam_file,
            correction_file:   a.correction_file,
            destination:       a.destination,
            copies:            a.copies,
            shuffle_questions: a.shuffle_questions,
            shuffle_answers:   a.shuffle_answers,
            heading:           a.heading,
            footer:            a.footer,
            selector:          a.selector,
            to_be_shown:       a.show,
            correction_label:  a.label,
            seed:              a.seed,
            csv:               a.csv.into(),
        }
    }
}

/// All arguments for the `show` command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// CSV file with the questions
    #[arg(default_value = "questions.csv")]
    pub input: PathBuf,

    /// Columns to read, in order; "void" skips an attribute
    #[arg(long, value_delimiter = ',')]
    pub selector: Vec<String>,

    #[command(flatten)]
    pub csv: CsvArgs,
}
