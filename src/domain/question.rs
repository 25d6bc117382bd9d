// ============================================================
// Layer 3 - Question Domain Type
// ============================================================
// A question owns its answers and remembers which one is
// correct. The correct answer can be read (and set) three ways:
//
//   correct_answer  - the Answer itself
//   correct_index   - its position, 0-based
//   correct_letter  - its label: "A", "B", ... "Z", "AA", ...
//
// Only the index is stored; the other two are derived from it,
// so they can never disagree.
//
// Rules:
//   - the first answer added to an empty question is correct,
//     whatever flag comes with it
//   - a later answer added with is_correct = true takes over
//   - shuffling moves answers around, never the correctness:
//     the same answer stays correct at its new position
//   - a true/false question holds at most one "True" answer
//   - an answer (or a clone of it) is held at most once

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use super::answer::{is_no_image, no_image, Answer, AnswerKind};
use super::error::{ExamError, Result};
use super::tokens::{cast_path, safe_int, LoadOutcome, Next, TokenCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionKind {
    #[default]
    MultiChoice,
    TrueFalse,
}

impl QuestionKind {
    /// Row key holding the question type
    pub const TAG_KEY: &'static str = "Question type";

    /// "TrueFalse" selects true/false; anything else is multiple choice
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("TrueFalse") => QuestionKind::TrueFalse,
            _                 => QuestionKind::MultiChoice,
        }
    }

    /// The kind of answer built while loading
    pub fn answer_kind(self) -> AnswerKind {
        match self {
            QuestionKind::MultiChoice => AnswerKind::Choice,
            QuestionKind::TrueFalse   => AnswerKind::Boolean,
        }
    }
}

/// The label shown in answer keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectOption {
    Letter(String),
    Boolean(bool),
}

impl fmt::Display for CorrectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectOption::Letter(l)      => f.write_str(l),
            CorrectOption::Boolean(true)  => f.write_str("True"),
            CorrectOption::Boolean(false) => f.write_str("False"),
        }
    }
}

/// Attributes a question reads from a token stream, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionAttr {
    Text,
    Subject,
    Image,
    Level,
}

pub const QUESTION_LOAD_ORDER: &[QuestionAttr] = &[
    QuestionAttr::Text,
    QuestionAttr::Subject,
    QuestionAttr::Image,
    QuestionAttr::Level,
];

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    kind:    QuestionKind,
    text:    String,
    subject: String,
    image:   PathBuf,
    level:   i32,
    answers: Vec<Answer>,
    correct: Option<usize>,
}

impl Question {
    /// An empty multiple choice question
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_kind(QuestionKind::MultiChoice, text)
    }

    /// An empty true/false question
    pub fn true_false(text: impl Into<String>) -> Self {
        Self::with_kind(QuestionKind::TrueFalse, text)
    }

    pub fn with_kind(kind: QuestionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text:    text.into(),
            subject: String::new(),
            image:   no_image(),
            level:   0,
            answers: Vec::new(),
            correct: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    // ── Plain attributes ─────────────────────────────────────────────────────

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn set_image(&mut self, image: impl Into<PathBuf>) {
        self.image = image.into();
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    // ── Adding answers ───────────────────────────────────────────────────────

    /// Append an answer.
    ///
    /// The first answer of an empty question becomes correct no matter
    /// what `is_correct` says; later ones only when `is_correct` is true.
    /// On error the question is left as it was.
    pub fn add_answer(&mut self, answer: Answer, is_correct: bool) -> Result<()> {
        self.check_kind(&answer)?;
        if self.answers.iter().any(|a| a.id() == answer.id()) {
            return Err(duplicate_answer(&answer));
        }
        if self.kind == QuestionKind::TrueFalse
            && answer.boolean() == Some(true)
            && self.answers.iter().any(|a| a.boolean() == Some(true))
        {
            return Err(ExamError::DuplicateTrueAnswer);
        }

        self.answers.push(answer);
        if self.answers.len() == 1 || is_correct {
            self.correct = Some(self.answers.len() - 1);
        }
        Ok(())
    }

    /// Replace every answer; the first one of the new set is correct.
    ///
    /// The whole set is checked before anything is installed.
    pub fn set_answers<I>(&mut self, answers: I) -> Result<()>
    where
        I: IntoIterator<Item = Answer>,
    {
        let answers: Vec<Answer> = answers.into_iter().collect();
        let mut seen = HashSet::new();
        for answer in &answers {
            self.check_kind(answer)?;
            if !seen.insert(answer.id()) {
                return Err(duplicate_answer(answer));
            }
        }
        if self.kind == QuestionKind::TrueFalse {
            let trues = answers.iter().filter(|a| a.boolean() == Some(true)).count();
            if trues > 1 {
                return Err(ExamError::DuplicateTrueAnswer);
            }
        }

        self.correct = if answers.is_empty() { None } else { Some(0) };
        self.answers = answers;
        Ok(())
    }

    fn check_kind(&self, answer: &Answer) -> Result<()> {
        if self.kind == QuestionKind::TrueFalse && answer.kind() != AnswerKind::Boolean {
            return Err(ExamError::WrongType(format!(
                "a true/false question only takes true/false answers, got '{}'",
                answer.text()
            )));
        }
        Ok(())
    }

    // ── Correctness views ────────────────────────────────────────────────────

    pub fn correct_index(&self) -> Option<usize> {
        self.correct
    }

    pub fn set_correct_index(&mut self, index: usize) -> Result<()> {
        if index >= self.answers.len() {
            return Err(ExamError::NotFound(format!(
                "answer index {index} (the question has {} answers)",
                self.answers.len()
            )));
        }
        self.correct = Some(index);
        Ok(())
    }

    pub fn correct_answer(&self) -> Option<&Answer> {
        self.correct.and_then(|i| self.answers.get(i))
    }

    /// Designate one of this question's own answers as correct
    pub fn set_correct_answer(&mut self, answer: &Answer) -> Result<()> {
        let index = self
            .answers
            .iter()
            .position(|a| a.id() == answer.id())
            .ok_or_else(|| {
                ExamError::NotFound(format!("answer '{}' in this question", answer.text()))
            })?;
        self.correct = Some(index);
        Ok(())
    }

    pub fn correct_letter(&self) -> Option<String> {
        self.correct.map(index_to_letter)
    }

    pub fn set_correct_letter(&mut self, letter: &str) -> Result<()> {
        let index = letter_to_index(letter)
            .filter(|i| *i < self.answers.len())
            .ok_or_else(|| ExamError::NotFound(format!("answer letter '{letter}'")))?;
        self.correct = Some(index);
        Ok(())
    }

    /// Letter for multiple choice, boolean for true/false
    pub fn correct_option(&self) -> Option<CorrectOption> {
        let answer = self.correct_answer()?;
        match self.kind {
            QuestionKind::MultiChoice => self.correct_letter().map(CorrectOption::Letter),
            QuestionKind::TrueFalse   => answer.boolean().map(CorrectOption::Boolean),
        }
    }

    /// Set by label: a letter ("B") for multiple choice,
    /// "True"/"False" for true/false.
    pub fn set_correct_option(&mut self, option: &str) -> Result<()> {
        match self.kind {
            QuestionKind::MultiChoice => self.set_correct_letter(option),
            QuestionKind::TrueFalse => match option {
                "True"  => self.set_correct_boolean(true),
                "False" => self.set_correct_boolean(false),
                other   => Err(ExamError::NotFound(format!("true/false option '{other}'"))),
            },
        }
    }

    /// Make the first answer with the given boolean value correct
    pub fn set_correct_boolean(&mut self, value: bool) -> Result<()> {
        let index = self
            .answers
            .iter()
            .position(|a| a.boolean() == Some(value))
            .ok_or_else(|| ExamError::NotFound(format!("answer with value {value}")))?;
        self.correct = Some(index);
        Ok(())
    }

    // ── Shuffling ────────────────────────────────────────────────────────────

    /// Reorder the answers at random; the correct answer stays correct
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.answers.is_empty() {
            return;
        }
        let correct_id = self.correct_answer().map(Answer::id);
        self.answers.shuffle(rng);
        self.correct = correct_id.and_then(|id| self.answers.iter().position(|a| a.id() == id));
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Read text, subject, image and level, then as many answers as
    /// the cursor holds.
    ///
    /// Entirely blank answer slots are skipped. The only error is a
    /// second "True" answer in a true/false question.
    pub fn load_sequentially(&mut self, cursor: &mut TokenCursor) -> Result<()> {
        for attr in QUESTION_LOAD_ORDER {
            match cursor.next_token() {
                Next::End          => return Ok(()),
                Next::Void         => continue,
                Next::Value(value) => self.assign(*attr, value),
            }
        }

        loop {
            let mut answer = Answer::empty(self.kind.answer_kind());
            if answer.load_sequentially(cursor) == LoadOutcome::Exhausted {
                break;
            }
            if !answer.is_blank() {
                self.add_answer(answer, false)?;
            }
            if cursor.is_exhausted() {
                break;
            }
        }
        Ok(())
    }

    fn assign(&mut self, attr: QuestionAttr, value: &str) {
        match attr {
            QuestionAttr::Text    => self.text = value.to_string(),
            QuestionAttr::Subject => self.subject = value.to_string(),
            QuestionAttr::Image   => self.image = cast_path(value),
            QuestionAttr::Level   => self.level = safe_int(value),
        }
    }

    // ── Paths ────────────────────────────────────────────────────────────────

    /// Resolve relative images against `base`.
    ///
    /// A directory is used as is; anything else (typically the csv
    /// file) contributes its parent directory.
    pub fn add_parent_path(&mut self, base: &Path) {
        let dir = if base.is_dir() {
            base
        } else {
            base.parent().unwrap_or_else(|| Path::new(""))
        };

        if !is_no_image(&self.image) {
            self.image = dir.join(&self.image);
        }
        for answer in &mut self.answers {
            if answer.has_image() {
                let joined = dir.join(answer.image());
                answer.set_image(joined);
            }
        }
    }
}

impl Default for Question {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "text: {}", self.text)?;
        writeln!(f, "subject: {}", self.subject)?;
        writeln!(f, "image: {}", self.image.display())?;
        writeln!(f, "level: {}", self.level)?;
        for answer in &self.answers {
            write!(f, "{answer}")?;
        }
        Ok(())
    }
}

/// Clones keep their identity, so one answer can only be held once
fn duplicate_answer(answer: &Answer) -> ExamError {
    ExamError::WrongType(format!(
        "answer '{}' is already part of this question",
        answer.text()
    ))
}

/// 0 → "A", 25 → "Z", 26 → "AA", 27 → "AB", ...
pub fn index_to_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Inverse of `index_to_letter`; None for anything but A-Z letters
pub fn letter_to_index(letter: &str) -> Option<usize> {
    if letter.is_empty() {
        return None;
    }
    let mut acc: usize = 0;
    for c in letter.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        let digit = (c as usize) - ('A' as usize) + 1;
        acc = acc.checked_mul(26)?.checked_add(digit)?;
    }
    Some(acc - 1)
}
