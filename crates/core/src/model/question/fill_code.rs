use super::QuestionError;
use super::text::{eq_ignore_case, non_blank};
use crate::model::Difficulty;

/// Share of canonical-answer tokens (in percent) that must appear in a
/// free-text answer for the keyword fallback to accept it.
pub const KEYWORD_MATCH_PERCENT: usize = 60;

/// Code-completion question: the learner types what goes in the blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillCode {
    template: String,
    answer: String,
    keywords: Vec<String>,
    accepted: Vec<String>,
}

impl FillCode {
    /// Build a fill-in payload whose accepted variants are derived from `answer`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyAnswer` or `QuestionError::EmptyTemplate`.
    pub fn new(
        template: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let answer = non_blank(answer).ok_or(QuestionError::EmptyAnswer)?;
        let accepted = derive_variants(&answer);
        Self::build(template, answer, accepted)
    }

    /// Build a fill-in payload with an explicit list of accepted answers.
    ///
    /// The list replaces the derived variants; blank entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyAnswer` or `QuestionError::EmptyTemplate`.
    pub fn with_alternatives(
        template: impl Into<String>,
        answer: impl Into<String>,
        accepted: impl IntoIterator<Item = String>,
    ) -> Result<Self, QuestionError> {
        let answer = non_blank(answer).ok_or(QuestionError::EmptyAnswer)?;
        let accepted = accepted.into_iter().filter_map(non_blank).collect();
        Self::build(template, answer, accepted)
    }

    fn build(
        template: impl Into<String>,
        answer: String,
        accepted: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let template = non_blank(template).ok_or(QuestionError::EmptyTemplate)?;
        let keywords = answer.split_whitespace().map(str::to_lowercase).collect();

        Ok(Self {
            template,
            answer,
            keywords,
            accepted,
        })
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    /// Exact match, then accepted variants, then the keyword fallback.
    #[must_use]
    pub fn verify(&self, input: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            return false;
        }

        if eq_ignore_case(input, &self.answer) {
            return true;
        }

        if self.accepted.iter().any(|alt| eq_ignore_case(input, alt.trim())) {
            return true;
        }

        self.keywords_match(input)
    }

    fn keywords_match(&self, input: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }

        let haystack = input.to_lowercase();
        let found = self
            .keywords
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .count();

        found * 100 >= self.keywords.len() * KEYWORD_MATCH_PERCENT
    }
}

/// Hint shown after a wrong fill-in answer.
#[must_use]
pub fn hint_for(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Hint: think of the basic keyword behind the concept.",
        Difficulty::Medium => "Hint: check the exact Java syntax.",
        Difficulty::Hard => "Hint: read the whole snippet for context.",
    }
}

fn derive_variants(answer: &str) -> Vec<String> {
    let candidates = [
        answer.to_lowercase(),
        answer.to_uppercase(),
        answer.to_string(),
        answer.replace(' ', ""),
        answer.replace('_', " "),
        answer.replace(' ', "_"),
    ];

    let mut variants = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}
