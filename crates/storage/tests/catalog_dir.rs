use std::fs;

use drill_core::model::TopicName;
use storage::repository::{InMemoryCatalog, QuestionCatalog, QuestionLoadError};

const GETTERS: &str = r#"{
    "topic": "Encapsulation",
    "title": "Encapsulation",
    "questions": [
        {"kind": "fill_code", "difficulty": "medium", "prompt": "Complete the getter",
         "template": "return ______;", "answer": "name", "explanation": "Getters return the field."}
    ]
}"#;

const ABSTRACT: &str = r#"{
    "topic": "abstraction",
    "title": "Abstraction",
    "questions": [
        {"kind": "multiple_choice", "difficulty": "easy", "prompt": "Can abstract classes be instantiated?",
         "options": ["Yes", "No", "Sometimes", "Only with new"], "answer": "B",
         "explanation": "They are bases only."}
    ]
}"#;

#[test]
fn loads_json_files_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b_encapsulation.json"), GETTERS).unwrap();
    fs::write(dir.path().join("a_abstraction.json"), ABSTRACT).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let catalog = InMemoryCatalog::from_dir(dir.path()).unwrap();
    let names: Vec<String> = catalog
        .topics()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect();
    assert_eq!(names, vec!["abstraction", "encapsulation"]);

    let questions = catalog
        .load_questions(&TopicName::new("ENCAPSULATION").unwrap())
        .unwrap();
    assert!(questions[0].verify("Name"));
}

#[test]
fn duplicate_topics_across_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.json"), ABSTRACT).unwrap();
    fs::write(dir.path().join("two.json"), ABSTRACT).unwrap();

    assert!(matches!(
        InMemoryCatalog::from_dir(dir.path()),
        Err(QuestionLoadError::DuplicateTopic { .. })
    ));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    match InMemoryCatalog::from_dir(&missing) {
        Err(QuestionLoadError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
}
