pub mod fill_code;
pub mod identify_defect;
pub mod multiple_choice;
mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::Difficulty;

pub use fill_code::{FillCode, KEYWORD_MATCH_PERCENT};
pub use identify_defect::IdentifyDefect;
pub use multiple_choice::{MultipleChoice, OPTION_COUNT, OPTION_LETTERS};

const RULE_WIDTH: usize = 60;
const CODE_RULE_WIDTH: usize = 40;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question explanation cannot be empty")]
    EmptyExplanation,

    #[error("canonical answer cannot be empty")]
    EmptyAnswer,

    #[error("code template cannot be empty")]
    EmptyTemplate,

    #[error("defect snippet cannot be empty")]
    EmptyCode,

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct option must be a letter A-D, got {0:?}")]
    InvalidOptionLetter(String),
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FillCode,
    IdentifyDefect,
}

impl QuestionKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple choice",
            QuestionKind::FillCode => "Fill in the code",
            QuestionKind::IdentifyDefect => "Identify the error",
        }
    }

    /// Whether the learner answers with an option letter.
    #[must_use]
    pub fn is_lettered(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice | QuestionKind::IdentifyDefect)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Kind-specific payload. The set of kinds is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    MultipleChoice(MultipleChoice),
    FillCode(FillCode),
    IdentifyDefect(IdentifyDefect),
}

impl From<MultipleChoice> for QuestionBody {
    fn from(value: MultipleChoice) -> Self {
        Self::MultipleChoice(value)
    }
}

impl From<FillCode> for QuestionBody {
    fn from(value: FillCode) -> Self {
        Self::FillCode(value)
    }
}

impl From<IdentifyDefect> for QuestionBody {
    fn from(value: IdentifyDefect) -> Self {
        Self::IdentifyDefect(value)
    }
}

/// One immutable quiz item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    difficulty: Difficulty,
    explanation: String,
    body: QuestionBody,
}

impl Question {
    /// Assemble a question from a validated payload.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` or `QuestionError::EmptyExplanation`.
    pub fn new(
        prompt: impl Into<String>,
        difficulty: Difficulty,
        explanation: impl Into<String>,
        body: impl Into<QuestionBody>,
    ) -> Result<Self, QuestionError> {
        let prompt = text::non_blank(prompt).ok_or(QuestionError::EmptyPrompt)?;
        let explanation = text::non_blank(explanation).ok_or(QuestionError::EmptyExplanation)?;

        Ok(Self {
            prompt,
            difficulty,
            explanation,
            body: body.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn weight(&self) -> u8 {
        self.difficulty.weight()
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self.body {
            QuestionBody::MultipleChoice(_) => QuestionKind::MultipleChoice,
            QuestionBody::FillCode(_) => QuestionKind::FillCode,
            QuestionBody::IdentifyDefect(_) => QuestionKind::IdentifyDefect,
        }
    }

    /// Check a learner's answer against this question.
    #[must_use]
    pub fn verify(&self, answer: &str) -> bool {
        match &self.body {
            QuestionBody::MultipleChoice(mc) => mc.verify(answer),
            QuestionBody::FillCode(fill) => fill.verify(answer),
            QuestionBody::IdentifyDefect(defect) => defect.verify(answer),
        }
    }

    /// The single reference answer. Never empty.
    #[must_use]
    pub fn canonical_answer(&self) -> &str {
        match &self.body {
            QuestionBody::MultipleChoice(mc) => mc.correct_letter(),
            QuestionBody::FillCode(fill) => fill.answer(),
            QuestionBody::IdentifyDefect(defect) => defect.justification(),
        }
    }

    /// Extra guidance after a wrong answer; only fill-in questions have one.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self.body {
            QuestionBody::FillCode(_) => Some(fill_code::hint_for(self.difficulty)),
            _ => None,
        }
    }

    /// Plain-text rendering for console front ends.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "QUESTION [{} - {}]", self.kind(), self.difficulty)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.prompt)?;
        writeln!(f)?;

        match &self.body {
            QuestionBody::MultipleChoice(mc) => {
                write_options(f, mc.options())?;
            }
            QuestionBody::FillCode(fill) => {
                writeln!(f, "CODE TO COMPLETE:")?;
                write_code(f, fill.template())?;
                writeln!(f, "Type only what goes in place of the ______ blank.")?;
            }
            QuestionBody::IdentifyDefect(defect) => {
                writeln!(f, "CODE WITH AN ERROR:")?;
                write_code(f, defect.code())?;
                writeln!(f)?;
                write_options(f, defect.options())?;
            }
        }

        write!(f, "{}", "-".repeat(RULE_WIDTH))
    }
}

fn write_options(f: &mut fmt::Formatter<'_>, options: &[String]) -> fmt::Result {
    for (letter, option) in OPTION_LETTERS.iter().zip(options) {
        writeln!(f, "{letter}) {option}")?;
    }
    writeln!(f)
}

fn write_code(f: &mut fmt::Formatter<'_>, code: &str) -> fmt::Result {
    let rule = "-".repeat(CODE_RULE_WIDTH);
    writeln!(f, "{rule}")?;
    writeln!(f, "{code}")?;
    writeln!(f, "{rule}")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; OPTION_COUNT] {
        ["one", "two", "three", "four"].map(String::from)
    }

    fn mc(correct: &str) -> Question {
        Question::new(
            "Pick two",
            Difficulty::Easy,
            "Two is two.",
            MultipleChoice::new(options(), correct).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn dispatches_verify_and_canonical_answer() {
        let q = mc("b");
        assert_eq!(q.kind(), QuestionKind::MultipleChoice);
        assert_eq!(q.canonical_answer(), "B");
        assert!(q.verify(" b "));
        assert!(q.hint().is_none());
    }

    #[test]
    fn fill_code_has_difficulty_hint() {
        let q = Question::new(
            "Complete the getter",
            Difficulty::Medium,
            "Getters return the field.",
            FillCode::new("return ______;", "name").unwrap(),
        )
        .unwrap();
        assert_eq!(q.weight(), 2);
        assert_eq!(q.hint(), Some(fill_code::hint_for(Difficulty::Medium)));
    }

    #[test]
    fn rejects_blank_prompt_and_explanation() {
        let body = MultipleChoice::new(options(), "A").unwrap();
        assert_eq!(
            Question::new(" ", Difficulty::Easy, "x", body.clone()).unwrap_err(),
            QuestionError::EmptyPrompt
        );
        assert_eq!(
            Question::new("x", Difficulty::Easy, "", body).unwrap_err(),
            QuestionError::EmptyExplanation
        );
    }

    #[test]
    fn render_lists_lettered_options() {
        let rendered = mc("A").render();
        assert!(rendered.contains("QUESTION [Multiple choice - Easy]"));
        assert!(rendered.contains("A) one"));
        assert!(rendered.contains("D) four"));
    }

    #[test]
    fn render_shows_defect_code() {
        let q = Question::new(
            "Find the bug",
            Difficulty::Hard,
            "Fields should be private.",
            IdentifyDefect::new("public String name;", options(), "A").unwrap(),
        )
        .unwrap();
        let rendered = q.render();
        assert!(rendered.contains("CODE WITH AN ERROR:"));
        assert!(rendered.contains("public String name;"));
        assert!(q.kind().is_lettered());
    }
}
