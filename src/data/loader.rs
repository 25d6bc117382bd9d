// ============================================================
// Layer 4 - CSV Loader
// ============================================================
// Loads an exam from a .csv file using the csv crate.
//
// What happens to a file:
//
//   questions.csv
//       │
//       ▼
//   read_text        → guesses the encoding, decodes to a String
//       │
//       ▼
//   csv::Reader      → heading line + records (flexible width)
//       │
//       ▼
//   Row              → one per record, keyed by heading names
//       │
//       ▼
//   Exam::load       → one Question per row
//       │
//       ▼
//   add_path_parent  → image paths made relative to the file
//
// Records shorter or longer than the heading line are accepted
// here; deciding whether that is an error is up to Exam::load.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::data::encoding::read_text;
use crate::domain::error::{ExamError, Result};
use crate::domain::exam::Exam;
use crate::domain::row::Row;

/// How the csv text is split into fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub quote:     char,
    /// Trim whitespace around every field
    pub trim:      bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote:     '"',
            trim:      false,
        }
    }
}

impl CsvOptions {
    fn reader_builder(&self) -> Result<ReaderBuilder> {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .delimiter(ascii_byte("delimiter", self.delimiter)?)
            .quote(ascii_byte("quote", self.quote)?)
            .trim(if self.trim { Trim::All } else { Trim::None });
        Ok(builder)
    }
}

fn ascii_byte(what: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(ExamError::WrongType(format!(
            "csv {what} must be a single ASCII character, got '{c}'"
        )))
    }
}

/// Parse csv text into rows
pub fn parse_rows(text: &str, options: &CsvOptions) -> Result<Vec<Row>> {
    let mut reader = options.reader_builder()?.from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let values: Vec<&str> = record.iter().collect();
        rows.push(Row::from_record(&headers, &values));
    }
    Ok(rows)
}

/// Read every row of a csv file
pub fn read_rows(path: &Path, options: &CsvOptions) -> Result<Vec<Row>> {
    let text = read_text(path)?;
    let rows = parse_rows(&text, options)?;
    tracing::debug!("Read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// A fresh exam read from `path`, restricted to `selector` when not empty
pub fn load_exam(path: &Path, selector: &[String], options: &CsvOptions) -> Result<Exam> {
    let mut exam = Exam::new();
    exam.set_attribute_selector(selector.iter().cloned());
    exam.from_csv(path, options)?;
    Ok(exam)
}

impl Exam {
    /// Append the questions of a csv file.
    ///
    /// The exam's attribute selector decides which columns are read.
    /// Image paths in the file are taken relative to the file itself.
    pub fn from_csv(&mut self, path: &Path, options: &CsvOptions) -> Result<()> {
        let rows = read_rows(path, options)?;

        // Questions already held were resolved against their own file
        let mut loaded = Exam::new();
        loaded.set_attribute_selector(self.attribute_selector().iter().cloned());
        loaded.load(rows)?;
        loaded.add_path_parent(path);

        tracing::info!(
            "Loaded {} questions from '{}'",
            loaded.questions().len(),
            path.display()
        );
        self.extend(loaded.into_questions());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::QuestionKind;
    use std::fs;
    use std::path::PathBuf;

    fn write_csv(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_parse_rows_pads_and_overflows() {
        let rows = parse_rows("a,b,c\n1\n1,2,3,4\n", &CsvOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values().collect::<Vec<_>>(), vec!["1", "", ""]);
        assert!(!rows[0].has_overflow());
        assert!(rows[1].has_overflow());
    }

    #[test]
    fn test_parse_rows_with_options() {
        let options = CsvOptions {
            delimiter: ';',
            quote:     '\'',
            trim:      true,
        };
        let rows = parse_rows("text ; A\n'Q; really?' ; a \n", &options).unwrap();
        assert_eq!(rows[0].get("text"), Some("Q; really?"));
        assert_eq!(rows[0].get("A"), Some("a"));
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let options = CsvOptions {
            delimiter: '§',
            ..CsvOptions::default()
        };
        let err = parse_rows("a\n1\n", &options).unwrap_err();
        assert!(matches!(err, ExamError::WrongType(_)));
    }

    #[test]
    fn test_from_csv_resolves_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "questions.csv",
            "text,subject,image,level,A,Ai,B,Bi\n\
             Q1,S,q1.png,1,a,a.png,b,\n\
             Q2,S,,2,c,,d,\n",
        );

        let mut exam = Exam::new();
        exam.from_csv(&path, &CsvOptions::default()).unwrap();

        assert_eq!(exam.questions().len(), 2);
        let q1 = &exam.questions()[0];
        assert_eq!(q1.image(), dir.path().join("q1.png"));
        assert_eq!(q1.answers()[0].image(), dir.path().join("a.png"));
        assert_eq!(q1.answers()[1].image(), Path::new("."));
        let q2 = &exam.questions()[1];
        assert_eq!(q2.image(), Path::new("."));
        assert_eq!(q2.level(), 2);
    }

    #[test]
    fn test_from_csv_twice_keeps_each_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a"), dir.path().join("b"));
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        let first = write_csv(&a, "q.csv", "text,subject,image,level,A,Ai\nQ1,S,x.png,1,a,\n");
        let second = write_csv(&b, "q.csv", "text,subject,image,level,A,Ai\nQ2,S,y.png,1,b,b.png\n");

        let mut exam = Exam::new();
        exam.from_csv(&first, &CsvOptions::default()).unwrap();
        exam.from_csv(&second, &CsvOptions::default()).unwrap();

        let images: Vec<PathBuf> = exam
            .questions()
            .iter()
            .map(|q| q.image().to_path_buf())
            .collect();
        assert_eq!(images, vec![a.join("x.png"), b.join("y.png")]);
        assert_eq!(exam.questions()[1].answers()[0].image(), b.join("b.png"));
    }

    #[test]
    fn test_from_csv_with_selector_and_true_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "truefalse.csv",
            "Question type,question,A,B,void\n\
             TrueFalse,Is the sky blue?,1,,\n\
             MultiChoice,Pick one,x,y,\n",
        );

        let mut exam = Exam::new();
        exam.set_attribute_selector([
            "question", "void", "void", "void", "A", "void", "B", "void",
        ]);
        exam.from_csv(&path, &CsvOptions::default()).unwrap();

        let tf = &exam.questions()[0];
        assert_eq!(tf.kind(), QuestionKind::TrueFalse);
        assert_eq!(tf.correct_option().unwrap().to_string(), "True");
        assert_eq!(tf.answers()[1].text(), "False");
        let mc = &exam.questions()[1];
        assert_eq!(mc.kind(), QuestionKind::MultiChoice);
        assert_eq!(mc.correct_letter().as_deref(), Some("A"));
    }

    #[test]
    fn test_from_csv_heading_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "q.csv", "question,B\nQ,b\n");

        let mut exam = Exam::new();
        exam.set_attribute_selector(["question", "A"]);
        let err = exam.from_csv(&path, &CsvOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected heading fields in csv file are <question> <A>. \
             Heading fields found, instead, are <question> <B>"
        );
    }

    #[test]
    fn test_from_csv_unpaired_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "q.csv", "question,B\nQ,b,oops\n");

        let mut exam = Exam::new();
        exam.set_attribute_selector(["question", "A"]);
        let err = exam.from_csv(&path, &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, ExamError::UnpairedSeparator));
    }

    #[test]
    fn test_from_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Exam::new()
            .from_csv(&dir.path().join("absent.csv"), &CsvOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExamError::FileNotFound(_)));
    }

    #[test]
    fn test_options_from_json_fill_defaults() {
        let options: CsvOptions = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(options.delimiter, ';');
        assert_eq!(options.quote, '"');
        assert!(!options.trim);
    }
}
