use std::sync::Arc;

use drill_core::model::{QuestionKind, TopicName};
use drill_core::{Navigable, OrderingPolicy};
use services::{SessionConfig, SessionStats, TopicSessionService};
use storage::repository::InMemoryCatalog;

fn service() -> TopicSessionService {
    let catalog = InMemoryCatalog::bundled().unwrap();
    TopicSessionService::new(Arc::new(catalog))
        .with_config(SessionConfig::default().with_shuffle_seed(Some(2024)))
}

fn answer_correctly(kind: QuestionKind, canonical: &str) -> String {
    match kind {
        QuestionKind::MultipleChoice | QuestionKind::IdentifyDefect => canonical.to_lowercase(),
        QuestionKind::FillCode => format!("  {canonical}  "),
    }
}

#[test]
fn full_pass_over_bundled_topic_counts_every_answer() {
    let service = service();
    let mut stats = SessionStats::new();
    let topic = TopicName::new("inheritance").unwrap();
    let mut session = service
        .start_topic(&topic, Some(OrderingPolicy::Ascending), &mut stats)
        .unwrap();

    let total = session.len();
    let weights: Vec<u8> = session.questions().iter().map(|q| q.weight()).collect();
    assert!(weights.windows(2).all(|w| w[0] <= w[1]));

    loop {
        let question = session.current().unwrap();
        let reply = answer_correctly(question.kind(), question.canonical_answer());
        assert!(session.submit_answer(&reply));
        if session.advance().is_err() {
            break;
        }
    }

    assert_eq!(session.position(), total - 1);
    assert_eq!(session.progress().render_bar(), format!("[██████████] 100.0% ({total}/{total})"));
    let summary = session.summary();
    drop(session);

    assert_eq!(stats.correct() as usize, total);
    assert_eq!(stats.studied_topics(), &[topic]);
    assert!(summary.to_string().contains("INHERITANCE"));
}

#[test]
fn seeded_shuffles_match_across_services() {
    let topic = TopicName::new("polymorphism").unwrap();
    let mut a = SessionStats::new();
    let mut b = SessionStats::new();

    let first = service().start_topic(&topic, None, &mut a).unwrap();
    let second = service().start_topic(&topic, None, &mut b).unwrap();
    assert_eq!(first.questions(), second.questions());
    assert_eq!(first.ordering(), Some(OrderingPolicy::Randomized));
}

#[test]
fn back_and_menu_commands_follow_history() {
    let service = service();
    let mut stats = SessionStats::new();
    let mut session = service
        .start_topic(
            &TopicName::new("abstraction").unwrap(),
            Some(OrderingPolicy::Descending),
            &mut stats,
        )
        .unwrap();

    session.advance().unwrap();
    session.advance().unwrap();
    session.skip();
    session.retreat().unwrap();
    assert_eq!(session.position(), 1);

    session.return_to_menu().unwrap();
    assert_eq!(session.position(), 0);
    assert!(session.history().is_empty());
    drop(session);

    assert_eq!(stats.skipped(), 1);
    assert_eq!(stats.answered(), 0);
}

#[test]
fn every_bundled_topic_starts() {
    let service = service();
    assert_eq!(service.topic_count(), 5);
    let mut stats = SessionStats::new();
    for info in service.topics() {
        let session = service.start_topic(&info.name, None, &mut stats).unwrap();
        assert_eq!(session.len(), info.question_count);
    }
    assert_eq!(stats.studied_topics().len(), 5);
    assert!((stats.overall_progress(5) - 100.0).abs() < f64::EPSILON);
}
