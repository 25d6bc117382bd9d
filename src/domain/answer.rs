// ============================================================
// Layer 3 - Answer Domain Type
// ============================================================
// The smallest unit of an exam: a piece of text plus an optional
// image. The true/false flavour replaces the free text with a
// boolean whose text is always "True" or "False".
//
// Every answer gets an identity when it is created. A question
// uses it to tell which of its answers is *the* correct one, so
// two answers with the same text are still distinct. Cloning
// keeps the identity: the clone stands for the same answer
// inside a copied question.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::{ExamError, Result};
use super::tokens::{cast_bool, cast_path, LoadOutcome, Next, TokenCursor};

static NEXT_ANSWER_ID: AtomicU64 = AtomicU64::new(1);

/// The "no image" sentinel: the current directory
pub fn no_image() -> PathBuf {
    PathBuf::from(".")
}

/// True for the sentinel (and for an empty path, which means the same)
pub fn is_no_image(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(".")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerId(u64);

impl AnswerId {
    fn fresh() -> Self {
        Self(NEXT_ANSWER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// Free text, used by multiple choice questions
    Choice,
    /// True or false, used by true/false questions
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Boolean(bool),
}

/// Attributes an answer reads from a token stream, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerAttr {
    Text,
    Boolean,
    Image,
}

const CHOICE_LOAD_ORDER: &[AnswerAttr] = &[AnswerAttr::Text, AnswerAttr::Image];
const BOOLEAN_LOAD_ORDER: &[AnswerAttr] = &[AnswerAttr::Boolean, AnswerAttr::Image];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id:      AnswerId,
    content: Content,
    image:   PathBuf,
}

impl Answer {
    /// A text answer without image
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_image(text, no_image())
    }

    pub fn with_image(text: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        Self {
            id:      AnswerId::fresh(),
            content: Content::Text(text.into()),
            image:   image.into(),
        }
    }

    /// A true/false answer without image
    pub fn true_false(value: bool) -> Self {
        Self::true_false_with_image(value, no_image())
    }

    pub fn true_false_with_image(value: bool, image: impl Into<PathBuf>) -> Self {
        Self {
            id:      AnswerId::fresh(),
            content: Content::Boolean(value),
            image:   image.into(),
        }
    }

    /// An empty answer of the given kind, ready to be loaded
    pub fn empty(kind: AnswerKind) -> Self {
        match kind {
            AnswerKind::Choice  => Self::new(""),
            AnswerKind::Boolean => Self::true_false(false),
        }
    }

    pub fn id(&self) -> AnswerId {
        self.id
    }

    pub fn kind(&self) -> AnswerKind {
        match self.content {
            Content::Text(_)    => AnswerKind::Choice,
            Content::Boolean(_) => AnswerKind::Boolean,
        }
    }

    /// Displayed text; "True"/"False" for true/false answers
    pub fn text(&self) -> &str {
        match &self.content {
            Content::Text(t)        => t.as_str(),
            Content::Boolean(true)  => "True",
            Content::Boolean(false) => "False",
        }
    }

    /// Text of a true/false answer is derived, so it cannot be set
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        match &mut self.content {
            Content::Text(t) => {
                *t = text.into();
                Ok(())
            }
            Content::Boolean(_) => Err(ExamError::WrongType(
                "the text of a true/false answer follows its boolean value".into(),
            )),
        }
    }

    pub fn boolean(&self) -> Option<bool> {
        match self.content {
            Content::Boolean(b) => Some(b),
            Content::Text(_)    => None,
        }
    }

    pub fn set_boolean(&mut self, value: bool) -> Result<()> {
        match &mut self.content {
            Content::Boolean(b) => {
                *b = value;
                Ok(())
            }
            Content::Text(_) => Err(ExamError::WrongType(
                "a text answer has no boolean value".into(),
            )),
        }
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn set_image(&mut self, image: impl Into<PathBuf>) {
        self.image = image.into();
    }

    pub fn has_image(&self) -> bool {
        !is_no_image(&self.image)
    }

    /// Nothing to show: no text and no image
    pub fn is_blank(&self) -> bool {
        self.text().is_empty() && !self.has_image()
    }

    pub fn load_order(&self) -> &'static [AnswerAttr] {
        match self.kind() {
            AnswerKind::Choice  => CHOICE_LOAD_ORDER,
            AnswerKind::Boolean => BOOLEAN_LOAD_ORDER,
        }
    }

    /// Fill the attributes from the cursor in `load_order`.
    ///
    /// Returns `Exhausted` only when the cursor had nothing left
    /// for the very first attribute; running dry later just stops.
    pub fn load_sequentially(&mut self, cursor: &mut TokenCursor) -> LoadOutcome {
        for (position, attr) in self.load_order().iter().enumerate() {
            match cursor.next_token() {
                Next::End if position == 0 => return LoadOutcome::Exhausted,
                Next::End                  => break,
                Next::Void                 => continue,
                Next::Value(value)         => self.assign(*attr, value),
            }
        }
        LoadOutcome::Loaded
    }

    fn assign(&mut self, attr: AnswerAttr, value: &str) {
        match (attr, &mut self.content) {
            (AnswerAttr::Text, Content::Text(t))       => *t = value.to_string(),
            (AnswerAttr::Boolean, Content::Boolean(b)) => *b = cast_bool(value),
            (AnswerAttr::Image, _)                     => self.image = cast_path(value),
            // load_order never pairs an attribute with the other kind
            _ => {}
        }
    }
}

impl Default for Answer {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "text: {}", self.text())?;
        writeln!(f, "image: {}", self.image.display())
    }
}
