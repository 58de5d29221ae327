use super::QuestionError;
use super::text::{eq_ignore_case, non_blank};

/// Number of options every lettered question carries.
pub const OPTION_COUNT: usize = 4;

/// Letters used to label options, in display order.
pub const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// Validates a set of lettered options, trimming each one.
pub(crate) fn validate_options(
    options: [String; OPTION_COUNT],
) -> Result<[String; OPTION_COUNT], QuestionError> {
    let mut out: [String; OPTION_COUNT] = Default::default();
    for (index, option) in options.into_iter().enumerate() {
        out[index] = non_blank(option).ok_or(QuestionError::EmptyOption { index })?;
    }
    Ok(out)
}

/// Classic A–D question: the learner answers with the letter of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleChoice {
    options: [String; OPTION_COUNT],
    correct: String,
}

impl MultipleChoice {
    /// Build a multiple-choice payload.
    ///
    /// The correct letter is stored upper-case.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyAnswer` for a blank letter,
    /// `QuestionError::InvalidOptionLetter` when it is not one of A–D, and
    /// `QuestionError::EmptyOption` for a blank option.
    pub fn new(
        options: [String; OPTION_COUNT],
        correct: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let correct = non_blank(correct).ok_or(QuestionError::EmptyAnswer)?;
        let letter = correct.to_uppercase();
        if !OPTION_LETTERS.iter().any(|c| letter == c.to_string()) {
            return Err(QuestionError::InvalidOptionLetter(correct));
        }

        Ok(Self {
            options: validate_options(options)?,
            correct: letter,
        })
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The correct option letter (`"A"`..`"D"`).
    #[must_use]
    pub fn correct_letter(&self) -> &str {
        &self.correct
    }

    /// Text of the option the correct letter points at.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        OPTION_LETTERS
            .iter()
            .position(|c| self.correct == c.to_string())
            .map(|index| self.options[index].as_str())
    }

    #[must_use]
    pub fn verify(&self, input: &str) -> bool {
        eq_ignore_case(input.trim(), &self.correct)
    }
}
