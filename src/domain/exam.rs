// ============================================================
// Layer 3 - Exam
// ============================================================
// An exam is an ordered list of questions handled as a whole:
// loaded in bulk from table rows, copied, shuffled and printed.
//
// How a row becomes tokens:
//
//   no selector   → the row values in column order, minus the
//                   "Question type" column
//   selector set  → the values of the named columns, in selector
//                   order; "void" takes up a slot without data
//
// The tokens are then read positionally by the question (see
// tokens.rs for the order).

use std::fmt;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{ExamError, Result};
use super::question::{Question, QuestionKind};
use super::row::Row;
use super::tokens::{Token, TokenCursor, VOID_FIELD};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exam {
    questions:          Vec<Question>,
    attribute_selector: Vec<String>,
}

impl Exam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions<I>(questions: I) -> Self
    where
        I: IntoIterator<Item = Question>,
    {
        Self {
            questions:          questions.into_iter().collect(),
            attribute_selector: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    /// Replace every question
    pub fn set_questions<I>(&mut self, questions: I)
    where
        I: IntoIterator<Item = Question>,
    {
        self.questions = questions.into_iter().collect();
    }

    pub fn attribute_selector(&self) -> &[String] {
        &self.attribute_selector
    }

    /// Column names to read, in order; empty means "all columns"
    pub fn set_attribute_selector<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_selector = names.into_iter().map(Into::into).collect();
    }

    /// Append one question per row.
    ///
    /// Rows carrying no data at all are skipped. On error nothing
    /// is appended.
    pub fn load<I>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut loaded = Vec::new();
        for row in rows {
            let tokens = self.row_tokens(&row)?;
            if tokens.iter().all(Token::is_blank) {
                continue;
            }
            let kind = QuestionKind::from_tag(row.get(QuestionKind::TAG_KEY));
            let mut question = Question::with_kind(kind, "");
            question.load_sequentially(&mut TokenCursor::new(tokens))?;
            loaded.push(question);
        }
        self.questions.extend(loaded);
        Ok(())
    }

    fn row_tokens(&self, row: &Row) -> Result<Vec<Token>> {
        if self.attribute_selector.is_empty() {
            return Ok(row
                .iter()
                .filter(|(key, _)| *key != QuestionKind::TAG_KEY)
                .map(|(_, value)| Token::from(value))
                .collect());
        }

        self.attribute_selector
            .iter()
            .map(|name| {
                if name == VOID_FIELD {
                    return Ok(Token::Void);
                }
                row.get(name)
                    .map(Token::from)
                    .ok_or_else(|| self.missing_field(row))
            })
            .collect()
    }

    fn missing_field(&self, row: &Row) -> ExamError {
        if row.has_overflow() {
            ExamError::UnpairedSeparator
        } else {
            ExamError::HeadingMismatch {
                expected: self.attribute_selector.clone(),
                found:    row.keys().map(str::to_string).collect(),
            }
        }
    }

    /// Resolve relative image paths against `path` (a directory, or
    /// a file whose directory is used)
    pub fn add_path_parent(&mut self, path: &Path) {
        for question in &mut self.questions {
            question.add_parent_path(path);
        }
    }

    /// Independent deep copy
    pub fn copy(&self) -> Exam {
        self.clone()
    }

    /// Shuffle the answers of every question
    pub fn answers_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for question in &mut self.questions {
            question.shuffle(rng);
        }
    }

    pub fn questions_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
    }
}

impl Extend<Question> for Exam {
    fn extend<I: IntoIterator<Item = Question>>(&mut self, questions: I) {
        self.questions.extend(questions);
    }
}

impl fmt::Display for Exam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for question in &self.questions {
            write!(f, "{question}")?;
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::{is_no_image, Answer};
    use crate::domain::question::index_to_letter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn numbered_exam(n: usize) -> Exam {
        Exam::with_questions((1..=n).map(|i| Question::new(format!("q{i} text"))))
    }

    fn texts(exam: &Exam) -> Vec<&str> {
        exam.questions().iter().map(Question::text).collect()
    }

    #[test]
    fn test_new_exam_is_empty() {
        let exam = Exam::new();
        assert!(exam.is_empty());
        assert!(exam.attribute_selector().is_empty());
        assert_eq!(exam.to_string(), "");
    }

    #[test]
    fn test_set_questions_replaces() {
        let mut exam = numbered_exam(3);
        exam.set_questions([Question::new("only")]);
        assert_eq!(texts(&exam), vec!["only"]);
    }

    #[test]
    fn test_load_row_without_selector() {
        let row = Row::new([
            ("text", "Q"), ("subject", "S"), ("image", "I"), ("level", "1"),
            ("A", "a"), ("Ai", "ai"), ("B", "b"), ("Bi", "bi"), ("C", "c"), ("Ci", "ci"),
        ]);
        let mut exam = Exam::new();
        exam.load([row]).unwrap();

        assert_eq!(exam.questions().len(), 1);
        let q = &exam.questions()[0];
        assert_eq!(q.text(), "Q");
        assert_eq!(q.subject(), "S");
        assert_eq!(q.image(), Path::new("I"));
        assert_eq!(q.level(), 1);
        assert_eq!(q.answers().len(), 3);
        assert_eq!(q.answers()[2].text(), "c");
        assert_eq!(q.answers()[2].image(), Path::new("ci"));
    }

    #[test]
    fn test_load_with_selector_and_void() {
        let row = Row::new([
            ("question", "Q"), ("A", "a"), ("B", "b"), ("C", "c"), ("D", "d"),
        ]);
        let mut exam = Exam::new();
        exam.set_attribute_selector([
            "question", "void", "void", "void", "A", "void", "B", "void", "C", "void",
        ]);
        exam.load([row]).unwrap();

        let q = &exam.questions()[0];
        assert_eq!(q.text(), "Q");
        assert_eq!(q.subject(), "");
        assert_eq!(q.image(), Path::new("."));
        assert_eq!(q.level(), 0);
        let answers: Vec<&str> = q.answers().iter().map(Answer::text).collect();
        assert_eq!(answers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_true_false_rows() {
        let rows = [
            Row::new([("Question type", "TrueFalse"), ("question", "Is it?"), ("A", ""), ("B", "1")]),
            Row::new([("Question type", "MultiChoice"), ("question", "Which?"), ("A", "x"), ("B", "y")]),
        ];
        let mut exam = Exam::new();
        exam.set_attribute_selector([
            "question", "void", "void", "void", "A", "void", "B", "void",
        ]);
        exam.load(rows).unwrap();

        let tf = &exam.questions()[0];
        assert_eq!(tf.kind(), QuestionKind::TrueFalse);
        assert_eq!(tf.answers()[0].text(), "False");
        assert_eq!(tf.answers()[1].text(), "True");
        let mc = &exam.questions()[1];
        assert_eq!(mc.kind(), QuestionKind::MultiChoice);
        assert_eq!(mc.answers()[1].text(), "y");
    }

    #[test]
    fn test_load_round_trip() {
        let mut source = Question::new("2+2?")
            .with_subject("Math")
            .with_image("q.png")
            .with_level(3);
        source
            .set_answers([
                Answer::with_image("4", "four.png"),
                Answer::new("5"),
                Answer::with_image("22", "twos.png"),
            ])
            .unwrap();

        let image_cell = |path: &Path| {
            if is_no_image(path) {
                String::new()
            } else {
                path.display().to_string()
            }
        };
        let mut cells = vec![
            ("text".to_string(), source.text().to_string()),
            ("subject".to_string(), source.subject().to_string()),
            ("image".to_string(), image_cell(source.image())),
            ("level".to_string(), source.level().to_string()),
        ];
        for (i, answer) in source.answers().iter().enumerate() {
            let letter = index_to_letter(i);
            cells.push((letter.clone(), answer.text().to_string()));
            cells.push((format!("{letter}i"), image_cell(answer.image())));
        }

        let mut exam = Exam::new();
        exam.load([Row::new(cells)]).unwrap();

        let loaded = &exam.questions()[0];
        assert_eq!(loaded.text(), source.text());
        assert_eq!(loaded.subject(), source.subject());
        assert_eq!(loaded.image(), source.image());
        assert_eq!(loaded.level(), source.level());
        assert_eq!(loaded.answers().len(), source.answers().len());
        for (got, want) in loaded.answers().iter().zip(source.answers()) {
            assert_eq!(got.text(), want.text());
            assert_eq!(got.image(), want.image());
        }
        assert_eq!(loaded.correct_index(), source.correct_index());
    }

    #[test]
    fn test_question_type_column_is_not_data() {
        let row = Row::new([("Question type", "TrueFalse"), ("text", "Q"), ("subject", "S")]);
        let mut exam = Exam::new();
        exam.load([row]).unwrap();
        let q = &exam.questions()[0];
        assert_eq!(q.text(), "Q");
        assert_eq!(q.subject(), "S");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = [
            Row::new([("text", ""), ("subject", " ")]),
            Row::new([("text", "Q"), ("subject", "")]),
            Row::default(),
        ];
        let mut exam = Exam::new();
        exam.load(rows).unwrap();
        assert_eq!(texts(&exam), vec!["Q"]);
    }

    #[test]
    fn test_selector_mismatch() {
        let row = Row::new([("question", "Q"), ("B", "b")]);
        let mut exam = Exam::new();
        exam.set_attribute_selector(["question", "A"]);
        let err = exam.load([row]).unwrap_err();

        match &err {
            ExamError::HeadingMismatch { expected, found } => {
                assert_eq!(expected, &vec!["question".to_string(), "A".to_string()]);
                assert_eq!(found, &vec!["question".to_string(), "B".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("<question> <A>"));
        assert!(exam.is_empty());
    }

    #[test]
    fn test_selector_with_unpaired_separator() {
        let row = Row::from_record(&["question", "B"], &["Q", "b", "extra"]);
        let mut exam = Exam::new();
        exam.set_attribute_selector(["question", "A"]);
        let err = exam.load([row]).unwrap_err();
        assert!(matches!(err, ExamError::UnpairedSeparator));
    }

    #[test]
    fn test_failed_load_appends_nothing() {
        let rows = [
            Row::new([("Question type", "TrueFalse"), ("text", "ok")]),
            Row::new([
                ("Question type", "TrueFalse"), ("text", "bad"), ("subject", ""), ("image", ""),
                ("level", ""), ("A", "1"), ("Ai", ""), ("B", "1"), ("Bi", ""),
            ]),
        ];
        let mut exam = Exam::new();
        let err = exam.load(rows).unwrap_err();
        assert!(matches!(err, ExamError::DuplicateTrueAnswer));
        assert!(exam.is_empty());
    }

    #[test]
    fn test_copy_is_independent() {
        let mut exam = Exam::new();
        let mut q = Question::new("q1");
        q.set_answers([Answer::new("a"), Answer::new("b")]).unwrap();
        exam.add_question(q);

        let before = exam.clone();
        let mut copy = exam.copy();
        assert_eq!(copy, exam);

        copy.add_question(Question::new("q2"));
        copy.answers_shuffle(&mut StdRng::seed_from_u64(3));
        copy.add_path_parent(Path::new("somewhere/file.csv"));
        let mut copied_q = copy.questions()[0].clone();
        copied_q.set_text("changed");
        copy.set_questions([copied_q]);

        assert_eq!(exam, before);
    }

    #[test]
    fn test_questions_shuffle_seeded_order() {
        let mut exam = numbered_exam(5);
        exam.questions_shuffle(&mut StdRng::seed_from_u64(1));
        assert_eq!(
            texts(&exam),
            vec!["q2 text", "q1 text", "q3 text", "q4 text", "q5 text"]
        );

        let mut exam = numbered_exam(5);
        exam.questions_shuffle(&mut StdRng::seed_from_u64(42));
        assert_eq!(
            texts(&exam),
            vec!["q1 text", "q5 text", "q4 text", "q3 text", "q2 text"]
        );
    }

    #[test]
    fn test_answers_shuffle_keeps_correct_answers() {
        let mut exam = Exam::new();
        let mut expected = Vec::new();
        for i in 0..4 {
            let answers: Vec<Answer> = (0..4).map(|j| Answer::new(format!("{i}-{j}"))).collect();
            let mut q = Question::new(format!("q{i}"));
            q.set_answers(answers.clone()).unwrap();
            q.set_correct_index(i).unwrap();
            expected.push(answers[i].clone());
            exam.add_question(q);
        }

        exam.answers_shuffle(&mut StdRng::seed_from_u64(9));
        for (q, answer) in exam.questions().iter().zip(&expected) {
            assert_eq!(q.correct_answer(), Some(answer));
        }
    }

    #[test]
    fn test_add_path_parent() {
        let mut exam = Exam::with_questions([Question::new("q").with_image("q.png")]);
        exam.add_path_parent(Path::new("data/questions.csv"));
        assert_eq!(exam.questions()[0].image(), PathBuf::from("data/q.png"));
    }

    #[test]
    fn test_display_lists_questions() {
        let exam = numbered_exam(2);
        let shown = exam.to_string();
        assert!(shown.contains("text: q1 text"));
        assert!(shown.contains("text: q2 text"));
    }
}
