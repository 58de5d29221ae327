use drill_core::model::{Difficulty, MultipleChoice, Question};
use drill_core::{OrderingPolicy, Sequencer};
use proptest::prelude::*;

fn question(difficulty: Difficulty, id: usize) -> Question {
    let options = ["a", "b", "c", "d"].map(String::from);
    Question::new(
        format!("Question {id}"),
        difficulty,
        "Because.",
        MultipleChoice::new(options, "A").unwrap(),
    )
    .unwrap()
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn prompts(questions: &[Question]) -> Vec<String> {
    let mut out: Vec<String> = questions.iter().map(|q| q.prompt().to_string()).collect();
    out.sort();
    out
}

fn build(levels: &[Difficulty]) -> Vec<Question> {
    levels
        .iter()
        .enumerate()
        .map(|(id, d)| question(*d, id))
        .collect()
}

proptest! {
    #[test]
    fn ascending_is_non_decreasing(levels in prop::collection::vec(difficulty(), 0..40), seed in any::<u64>()) {
        let mut questions = build(&levels);
        let before = prompts(&questions);
        Sequencer::seeded(seed).reorder(&mut questions, OrderingPolicy::Ascending);
        prop_assert!(questions.windows(2).all(|w| w[0].weight() <= w[1].weight()));
        prop_assert_eq!(prompts(&questions), before);
    }

    #[test]
    fn descending_is_non_increasing(levels in prop::collection::vec(difficulty(), 0..40), seed in any::<u64>()) {
        let mut questions = build(&levels);
        let before = prompts(&questions);
        Sequencer::seeded(seed).reorder(&mut questions, OrderingPolicy::Descending);
        prop_assert!(questions.windows(2).all(|w| w[0].weight() >= w[1].weight()));
        prop_assert_eq!(prompts(&questions), before);
    }

    #[test]
    fn seeded_shuffle_is_a_reproducible_permutation(levels in prop::collection::vec(difficulty(), 0..40), seed in any::<u64>()) {
        let mut a = build(&levels);
        let mut b = build(&levels);
        Sequencer::seeded(seed).reorder(&mut a, OrderingPolicy::Randomized);
        Sequencer::seeded(seed).reorder(&mut b, OrderingPolicy::Randomized);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(prompts(&a), prompts(&build(&levels)));
    }

    #[test]
    fn single_element_is_identity(level in difficulty(), name in ".{0,12}") {
        let mut questions = build(&[level]);
        let before = questions.clone();
        let mut sequencer = Sequencer::seeded(7);
        sequencer.reorder(&mut questions, OrderingPolicy::from_name(&name));
        prop_assert_eq!(questions, before);
    }
}
