//! JSON-backed catalog construction.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::record::TopicFile;
use crate::repository::{InMemoryCatalog, QuestionLoadError};

/// Topic files compiled into the binary, in menu order.
const BUNDLED: [(&str, &str); 5] = [
    (
        "encapsulation.json",
        include_str!("../catalog/encapsulation.json"),
    ),
    ("inheritance.json", include_str!("../catalog/inheritance.json")),
    ("interfaces.json", include_str!("../catalog/interfaces.json")),
    (
        "polymorphism.json",
        include_str!("../catalog/polymorphism.json"),
    ),
    ("abstraction.json", include_str!("../catalog/abstraction.json")),
];

impl InMemoryCatalog {
    /// Build a catalog from decoded topic files, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::InvalidQuestion` for the first record that
    /// fails validation and `QuestionLoadError::DuplicateTopic` for repeated topics.
    pub fn from_topic_files(
        files: impl IntoIterator<Item = TopicFile>,
    ) -> Result<Self, QuestionLoadError> {
        let mut catalog = Self::new();
        for file in files {
            let topic = file.topic;
            let questions = file
                .questions
                .into_iter()
                .enumerate()
                .map(|(index, record)| {
                    record
                        .into_question()
                        .map_err(|source| QuestionLoadError::InvalidQuestion {
                            topic: topic.clone(),
                            index,
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            catalog.insert(topic, file.title, questions)?;
        }
        Ok(catalog)
    }

    /// Parse a single topic file.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::Parse` for malformed JSON, plus any error
    /// from [`InMemoryCatalog::from_topic_files`].
    pub fn from_json_str(origin: &str, json: &str) -> Result<Self, QuestionLoadError> {
        Self::from_topic_files([parse_topic_file(origin, json)?])
    }

    /// Load every `*.json` file in `dir`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns `QuestionLoadError::Io` when the directory or a file cannot be
    /// read, plus any parse or validation error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, QuestionLoadError> {
        let dir = dir.as_ref();
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| QuestionLoadError::Io { path, source }
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err(dir))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(io_err(dir))?;
        paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            let json = fs::read_to_string(path).map_err(io_err(path))?;
            files.push(parse_topic_file(&path.display().to_string(), &json)?);
        }

        info!(dir = %dir.display(), topics = files.len(), "loaded catalog directory");
        Self::from_topic_files(files)
    }

    /// The five object-oriented programming topics shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if a bundled file is malformed, which the tests guard against.
    pub fn bundled() -> Result<Self, QuestionLoadError> {
        let files = BUNDLED
            .iter()
            .map(|(origin, json)| parse_topic_file(origin, json))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_topic_files(files)
    }
}

fn parse_topic_file(origin: &str, json: &str) -> Result<TopicFile, QuestionLoadError> {
    debug!(origin, bytes = json.len(), "parsing topic file");
    serde_json::from_str(json).map_err(|source| QuestionLoadError::Parse {
        origin: origin.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::QuestionCatalog;
    use drill_core::model::{Difficulty, QuestionKind};

    #[test]
    fn bundled_catalog_covers_five_topics() {
        let catalog = InMemoryCatalog::bundled().unwrap();
        let names: Vec<String> = catalog
            .topics()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "encapsulation",
                "inheritance",
                "interfaces",
                "polymorphism",
                "abstraction"
            ]
        );
    }

    #[test]
    fn every_bundled_topic_mixes_kinds_and_difficulties() {
        let catalog = InMemoryCatalog::bundled().unwrap();
        for info in catalog.topics() {
            let questions = catalog.load_questions(&info.name).unwrap();
            assert_eq!(questions.len(), info.question_count);
            for kind in [
                QuestionKind::MultipleChoice,
                QuestionKind::FillCode,
                QuestionKind::IdentifyDefect,
            ] {
                assert!(
                    questions.iter().any(|q| q.kind() == kind),
                    "{} lacks {kind}",
                    info.name
                );
            }
            for difficulty in Difficulty::ALL {
                assert!(questions.iter().any(|q| q.difficulty() == difficulty));
            }
        }
    }

    #[test]
    fn malformed_json_reports_origin() {
        let err = InMemoryCatalog::from_json_str("broken.json", "{ not json").unwrap_err();
        match err {
            QuestionLoadError::Parse { origin, .. } => assert_eq!(origin, "broken.json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_question_reports_index() {
        let json = r#"{"topic": "t", "title": "T", "questions": [
            {"kind": "fill_code", "difficulty": "easy", "prompt": "p",
             "template": "______", "answer": "x", "explanation": "e"},
            {"kind": "fill_code", "difficulty": "easy", "prompt": "p",
             "template": "______", "answer": "  ", "explanation": "e"}
        ]}"#;
        let err = InMemoryCatalog::from_json_str("t.json", json).unwrap_err();
        assert!(matches!(
            err,
            QuestionLoadError::InvalidQuestion { index: 1, .. }
        ));
    }

    #[test]
    fn blank_topic_name_is_a_parse_error() {
        let json = r#"{"topic": "  ", "title": "T", "questions": []}"#;
        assert!(matches!(
            InMemoryCatalog::from_json_str("t.json", json),
            Err(QuestionLoadError::Parse { .. })
        ));
    }
}
