use drill_core::model::{
    Difficulty, FillCode, IdentifyDefect, MultipleChoice, OPTION_COUNT, Question, QuestionBody,
    QuestionError, TopicName,
};
use serde::{Deserialize, Serialize};

/// On-disk shape of one question, tagged by `kind`.
///
/// This mirrors the domain `Question` so catalog files can be read and
/// written without leaking serde concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionRecord {
    MultipleChoice {
        difficulty: Difficulty,
        prompt: String,
        options: [String; OPTION_COUNT],
        answer: String,
        explanation: String,
    },
    FillCode {
        difficulty: Difficulty,
        prompt: String,
        template: String,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accepted: Option<Vec<String>>,
        explanation: String,
    },
    IdentifyDefect {
        difficulty: Difficulty,
        prompt: String,
        code: String,
        options: [String; OPTION_COUNT],
        answer: String,
        explanation: String,
    },
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let difficulty = question.difficulty();
        let prompt = question.prompt().to_owned();
        let explanation = question.explanation().to_owned();

        match question.body() {
            QuestionBody::MultipleChoice(mc) => QuestionRecord::MultipleChoice {
                difficulty,
                prompt,
                options: options_array(mc.options()),
                answer: mc.correct_letter().to_owned(),
                explanation,
            },
            QuestionBody::FillCode(fill) => QuestionRecord::FillCode {
                difficulty,
                prompt,
                template: fill.template().to_owned(),
                answer: fill.answer().to_owned(),
                accepted: Some(fill.accepted().to_vec()),
                explanation,
            },
            QuestionBody::IdentifyDefect(defect) => QuestionRecord::IdentifyDefect {
                difficulty,
                prompt,
                code: defect.code().to_owned(),
                options: options_array(defect.options()),
                answer: defect.justification().to_owned(),
                explanation,
            },
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when any field fails domain validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        match self {
            QuestionRecord::MultipleChoice {
                difficulty,
                prompt,
                options,
                answer,
                explanation,
            } => Question::new(
                prompt,
                difficulty,
                explanation,
                MultipleChoice::new(options, answer)?,
            ),
            QuestionRecord::FillCode {
                difficulty,
                prompt,
                template,
                answer,
                accepted,
                explanation,
            } => {
                let body = match accepted {
                    Some(accepted) => FillCode::with_alternatives(template, answer, accepted)?,
                    None => FillCode::new(template, answer)?,
                };
                Question::new(prompt, difficulty, explanation, body)
            }
            QuestionRecord::IdentifyDefect {
                difficulty,
                prompt,
                code,
                options,
                answer,
                explanation,
            } => Question::new(
                prompt,
                difficulty,
                explanation,
                IdentifyDefect::new(code, options, answer)?,
            ),
        }
    }
}

fn options_array(options: &[String]) -> [String; OPTION_COUNT] {
    let mut out: [String; OPTION_COUNT] = Default::default();
    for (slot, option) in out.iter_mut().zip(options) {
        slot.clone_from(option);
    }
    out
}

/// One catalog file: a topic and its question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicFile {
    pub topic: TopicName,
    pub title: String,
    pub questions: Vec<QuestionRecord>,
}
