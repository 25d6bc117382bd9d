// ============================================================
// Layer 3 - Printing an Exam
// ============================================================
// Printing drives one SerializeExam through a renderer:
//
//   copy 1..N  → assignment stream → "<stem>_K_N.<ext>"
//                (just "<stem>.<ext>" when N = 1)
//   afterwards → correction stream → correction file, if any
//
// Each assignment document gets the heading "<heading> K/N";
// the correction document gets the bare heading. Numbering:
//
//   assignment  → 1, 2, 3 for questions; A, B, C for answers
//   correction  → A, B, C for copies;    1, 2, 3 for questions

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::exam::Exam;
use super::serialize::{QuestionField, SerializeExam, DEFAULT_CORRECTION_LABEL};
use super::traits::{BulletStyle, DocumentRenderer, RenderTarget};

#[derive(Debug, Clone, PartialEq)]
pub struct PrintOptions {
    pub exam_file:         PathBuf,
    pub correction_file:   Option<PathBuf>,
    pub shuffle_questions: bool,
    pub shuffle_answers:   bool,
    /// Directory both files are written into
    pub destination:       PathBuf,
    pub copies:            usize,
    /// Empty means "use the exam file name"
    pub heading:           String,
    pub footer:            String,
    pub to_be_shown:       Vec<QuestionField>,
    pub correction_label:  String,
    pub seed:              Option<u64>,
}

impl PrintOptions {
    pub fn new(exam_file: impl Into<PathBuf>) -> Self {
        Self {
            exam_file:         exam_file.into(),
            correction_file:   None,
            shuffle_questions: false,
            shuffle_answers:   false,
            destination:       PathBuf::from("."),
            copies:            1,
            heading:           String::new(),
            footer:            String::new(),
            to_be_shown:       vec![QuestionField::Subject, QuestionField::Text],
            correction_label:  DEFAULT_CORRECTION_LABEL.to_string(),
            seed:              None,
        }
    }

    fn heading(&self) -> String {
        if !self.heading.is_empty() {
            return self.heading.clone();
        }
        self.exam_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// File name of copy `number` out of `total`
pub fn copy_file_name(exam_file: &Path, number: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return exam_file.to_path_buf();
    }
    let stem = exam_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = exam_file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    exam_file.with_file_name(format!("{stem}_{number}_{total}{extension}"))
}

impl Exam {
    /// Render every copy, then the answer key.
    ///
    /// Returns the paths written, assignment copies first.
    pub fn print(&self, renderer: &dyn DocumentRenderer, options: &PrintOptions) -> Result<Vec<PathBuf>> {
        let mut serializer = SerializeExam::new(self)
            .shuffle_questions(options.shuffle_questions)
            .shuffle_answers(options.shuffle_answers)
            .to_be_shown(options.to_be_shown.clone())
            .correction_label(options.correction_label.clone());
        if let Some(seed) = options.seed {
            serializer = serializer.with_seed(seed);
        }

        let heading = options.heading();
        let total = options.copies;
        let mut written = Vec::with_capacity(total + 1);

        for number in 1..=total {
            let target = RenderTarget {
                path:       options.destination.join(copy_file_name(&options.exam_file, number, total)),
                heading:    format!("{heading} {number}/{total}"),
                footer:     options.footer.clone(),
                top_bullet: BulletStyle::Numeric,
                sub_bullet: BulletStyle::Letter,
            };
            renderer.render(&mut serializer.assignment(), &target)?;
            written.push(target.path);
        }

        if let Some(correction_file) = &options.correction_file {
            let target = RenderTarget {
                path:       options.destination.join(correction_file),
                heading,
                footer:     options.footer.clone(),
                top_bullet: BulletStyle::Letter,
                sub_bullet: BulletStyle::Numeric,
            };
            renderer.render(&mut serializer.correction(), &target)?;
            written.push(target.path);
        }

        Ok(written)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::Answer;
    use crate::domain::item::{Item, ItemLevel};
    use crate::domain::question::Question;
    use std::cell::RefCell;

    /// Keeps every rendered document in memory
    #[derive(Default)]
    struct RecordingRenderer {
        documents: RefCell<Vec<(RenderTarget, Vec<Item>)>>,
    }

    impl DocumentRenderer for RecordingRenderer {
        fn render(&self, items: &mut dyn Iterator<Item = Item>, target: &RenderTarget) -> Result<()> {
            self.documents.borrow_mut().push((target.clone(), items.collect()));
            Ok(())
        }
    }

    fn exam() -> Exam {
        let mut exam = Exam::new();
        for i in 1..=3 {
            let mut q = Question::new(format!("q{i}")).with_subject("Math");
            q.set_answers([Answer::new("a"), Answer::new("b"), Answer::new("c")]).unwrap();
            exam.add_question(q);
        }
        exam
    }

    #[test]
    fn test_copy_file_name() {
        let file = Path::new("out/Exam.docx");
        assert_eq!(copy_file_name(file, 1, 1), PathBuf::from("out/Exam.docx"));
        assert_eq!(copy_file_name(file, 2, 3), PathBuf::from("out/Exam_2_3.docx"));
        assert_eq!(copy_file_name(Path::new("Exam"), 1, 2), PathBuf::from("Exam_1_2"));
    }

    #[test]
    fn test_single_copy_with_correction() {
        let renderer = RecordingRenderer::default();
        let mut options = PrintOptions::new("Exam.docx");
        options.correction_file = Some(PathBuf::from("Key.docx"));
        options.destination = PathBuf::from("out");

        let written = exam().print(&renderer, &options).unwrap();
        assert_eq!(written, vec![PathBuf::from("out/Exam.docx"), PathBuf::from("out/Key.docx")]);

        let docs = renderer.documents.borrow();
        let (target, items) = &docs[0];
        assert_eq!(target.heading, "Exam.docx 1/1");
        assert_eq!(target.top_bullet, BulletStyle::Numeric);
        assert_eq!(target.sub_bullet, BulletStyle::Letter);
        assert_eq!(items.len(), 12);
        assert_eq!(items[0].text, "Math - q1");

        let (target, items) = &docs[1];
        assert_eq!(target.heading, "Exam.docx");
        assert_eq!(target.top_bullet, BulletStyle::Letter);
        assert_eq!(target.sub_bullet, BulletStyle::Numeric);
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["checker 1/1", "A", "A", "A"]);
    }

    #[test]
    fn test_many_copies_are_named_and_headed() {
        let renderer = RecordingRenderer::default();
        let mut options = PrintOptions::new("Exam.docx");
        options.copies = 3;
        options.heading = "Final".into();
        options.footer = "good luck".into();
        options.shuffle_answers = true;
        options.seed = Some(4);

        let written = exam().print(&renderer, &options).unwrap();
        assert_eq!(
            written,
            vec![
                PathBuf::from("./Exam_1_3.docx"),
                PathBuf::from("./Exam_2_3.docx"),
                PathBuf::from("./Exam_3_3.docx"),
            ]
        );
        let docs = renderer.documents.borrow();
        let headings: Vec<&str> = docs.iter().map(|(t, _)| t.heading.as_str()).collect();
        assert_eq!(headings, vec!["Final 1/3", "Final 2/3", "Final 3/3"]);
        assert!(docs.iter().all(|(t, _)| t.footer == "good luck"));
    }

    #[test]
    fn test_correction_covers_every_copy() {
        let renderer = RecordingRenderer::default();
        let mut options = PrintOptions::new("Exam.docx");
        options.copies = 2;
        options.correction_file = Some(PathBuf::from("Key.docx"));
        options.shuffle_questions = true;
        options.shuffle_answers = true;
        options.seed = Some(17);

        exam().print(&renderer, &options).unwrap();
        let docs = renderer.documents.borrow();
        assert_eq!(docs.len(), 3);
        let key = &docs[2].1;
        let tops: Vec<&str> = key
            .iter()
            .filter(|i| i.level == ItemLevel::Top)
            .map(|i| i.text.as_str())
            .collect();
        assert_eq!(tops, vec!["checker 1/2", "checker 2/2"]);
        assert_eq!(key.len(), 2 * 4);
    }

    #[test]
    fn test_print_does_not_touch_the_exam() {
        let exam = exam();
        let before = exam.clone();
        let mut options = PrintOptions::new("Exam.docx");
        options.shuffle_questions = true;
        options.shuffle_answers = true;
        exam.print(&RecordingRenderer::default(), &options).unwrap();
        assert_eq!(exam, before);
    }
}
