// ============================================================
// Layer 3 - Exam Serialization
// ============================================================
// Turns the exam → question → answer tree into the flat list of
// leveled items a renderer prints.
//
// Two streams come out of one SerializeExam:
//
//   assignment()  - one call per printed copy. Each call deep
//                   copies the master exam, shuffles the copy as
//                   configured and keeps it in its history.
//   correction()  - the answer key for every copy made so far,
//                   labelled "checker K/N" in production order.
//
// The master exam is only ever borrowed immutably; all shuffling
// happens on the copies. Both streams are lazy iterators borrowed
// from the serializer.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::answer::no_image;
use super::exam::Exam;
use super::item::{Item, ItemLevel};
use super::question::Question;

/// Default label of the answer key blocks
pub const DEFAULT_CORRECTION_LABEL: &str = "checker";

/// Question attributes that can appear on an assignment item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionField {
    Text,
    Subject,
    Image,
    Level,
}

impl QuestionField {
    fn value_of(self, question: &Question) -> String {
        match self {
            QuestionField::Text    => question.text().to_string(),
            QuestionField::Subject => question.subject().to_string(),
            QuestionField::Image   => question.image().display().to_string(),
            QuestionField::Level   => question.level().to_string(),
        }
    }
}

impl FromStr for QuestionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text"    => Ok(QuestionField::Text),
            "subject" => Ok(QuestionField::Subject),
            "image"   => Ok(QuestionField::Image),
            "level"   => Ok(QuestionField::Level),
            other     => Err(format!("unknown question field '{other}'")),
        }
    }
}

impl fmt::Display for QuestionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionField::Text    => "text",
            QuestionField::Subject => "subject",
            QuestionField::Image   => "image",
            QuestionField::Level   => "level",
        };
        f.write_str(name)
    }
}

pub struct SerializeExam<'a> {
    exam:              &'a Exam,
    shuffle_questions: bool,
    shuffle_answers:   bool,
    to_be_shown:       Vec<QuestionField>,
    correction_label:  String,
    history:           Vec<Exam>,
    rng:               StdRng,
}

impl<'a> SerializeExam<'a> {
    /// No shuffling, question text only, entropy-seeded
    pub fn new(exam: &'a Exam) -> Self {
        Self {
            exam,
            shuffle_questions: false,
            shuffle_answers:   false,
            to_be_shown:       vec![QuestionField::Text],
            correction_label:  DEFAULT_CORRECTION_LABEL.to_string(),
            history:           Vec::new(),
            rng:               StdRng::from_entropy(),
        }
    }

    pub fn shuffle_questions(mut self, yes: bool) -> Self {
        self.shuffle_questions = yes;
        self
    }

    pub fn shuffle_answers(mut self, yes: bool) -> Self {
        self.shuffle_answers = yes;
        self
    }

    pub fn to_be_shown(mut self, fields: Vec<QuestionField>) -> Self {
        self.to_be_shown = fields;
        self
    }

    pub fn correction_label(mut self, label: impl Into<String>) -> Self {
        self.correction_label = label.into();
        self
    }

    /// Reproducible shuffles
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Make a new shuffled copy and stream it.
    ///
    /// Per question: one top item with the configured fields
    /// (non-empty ones joined by " - ") and the question image,
    /// then one sub item per answer.
    pub fn assignment(&mut self) -> impl Iterator<Item = Item> + '_ {
        let mut copy = self.exam.copy();
        if self.shuffle_questions {
            copy.questions_shuffle(&mut self.rng);
        }
        if self.shuffle_answers {
            copy.answers_shuffle(&mut self.rng);
        }
        self.history.push(copy);

        let this: &Self = self;
        let fields = &this.to_be_shown;
        this.history
            .last()
            .into_iter()
            .flat_map(|exam| exam.questions().iter())
            .flat_map(move |question| question_items(question, fields))
    }

    /// Answer key of every copy made so far.
    ///
    /// A copy without questions contributes nothing, not even its label.
    pub fn correction(&self) -> impl Iterator<Item = Item> + '_ {
        let total = self.history.len();
        let label = self.correction_label.as_str();
        self.history
            .iter()
            .enumerate()
            .flat_map(move |(i, exam)| {
                let top = (!exam.is_empty()).then(|| {
                    Item::text_only(ItemLevel::Top, format!("{label} {}/{total}", i + 1))
                });
                top.into_iter().chain(exam.questions().iter().map(|question| {
                    let option = question
                        .correct_option()
                        .map(|o| o.to_string())
                        .unwrap_or_default();
                    Item::new(ItemLevel::Sub, option, no_image())
                }))
            })
    }
}

fn question_items<'q>(
    question: &'q Question,
    fields: &'q [QuestionField],
) -> impl Iterator<Item = Item> + 'q {
    let text = fields
        .iter()
        .map(|field| field.value_of(question))
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");
    let top = Item::top(text, question.image());
    let answers = question
        .answers()
        .iter()
        .map(|answer| Item::sub(answer.text(), answer.image()));
    std::iter::once(top).chain(answers)
}
