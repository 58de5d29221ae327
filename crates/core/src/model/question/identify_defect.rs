use super::QuestionError;
use super::multiple_choice::{OPTION_COUNT, validate_options};
use super::text::{eq_ignore_case, non_blank};

/// A flawed snippet plus four candidate justifications for what is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifyDefect {
    code: String,
    options: [String; OPTION_COUNT],
    justification: String,
}

impl IdentifyDefect {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyCode`, `QuestionError::EmptyAnswer` or
    /// `QuestionError::EmptyOption` for blank inputs.
    pub fn new(
        code: impl Into<String>,
        options: [String; OPTION_COUNT],
        justification: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let code = non_blank(code).ok_or(QuestionError::EmptyCode)?;
        let justification = non_blank(justification).ok_or(QuestionError::EmptyAnswer)?;

        Ok(Self {
            code,
            options: validate_options(options)?,
            justification,
        })
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn justification(&self) -> &str {
        &self.justification
    }

    #[must_use]
    pub fn verify(&self, input: &str) -> bool {
        eq_ignore_case(input.trim(), &self.justification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; OPTION_COUNT] {
        [
            "Field 'name' should be private",
            "Missing constructor",
            "Missing main method",
            "Class should be abstract",
        ]
        .map(String::from)
    }

    #[test]
    fn matches_justification_case_insensitively() {
        let q = IdentifyDefect::new("public class P { public String name; }", options(), "A")
            .unwrap();
        assert!(q.verify(" a"));
        assert!(!q.verify("B"));
    }

    #[test]
    fn rejects_blank_code_and_justification() {
        assert_eq!(
            IdentifyDefect::new(" ", options(), "A").unwrap_err(),
            QuestionError::EmptyCode
        );
        assert_eq!(
            IdentifyDefect::new("x", options(), "").unwrap_err(),
            QuestionError::EmptyAnswer
        );
    }
}
