use std::sync::Arc;

use wahl_navigator::survey::{
    Answer, Dataset, Importance, InMemoryPositionStore, PartyId, Position, PositionStore,
    QuestionId, ScoringEngine, UserAnswer, VoteSheetImporter,
};

const BSW: PartyId = PartyId(7);

#[test]
fn vote_sheet_fills_gaps_in_the_seed_dataset() {
    let mut dataset = Dataset::seed().expect("seed parses");
    let data = include_bytes!("../data/bsw_votes.csv");

    let votes =
        VoteSheetImporter::from_reader(&data[..], &dataset.parties).expect("sheet imports");
    assert_eq!(votes.len(), 6);
    assert!(votes.iter().all(|vote| vote.party_id == BSW || vote.party_id == PartyId(5)));

    let replaced = dataset.apply_votes(votes);
    assert_eq!(replaced, 2);

    let store = InMemoryPositionStore::new(dataset);
    let on_first = store.votes_for_question(QuestionId(1)).expect("votes");
    assert!(on_first
        .iter()
        .any(|vote| vote.party_id == BSW && vote.position == Position::Disagree));
    assert_eq!(
        on_first
            .iter()
            .filter(|vote| vote.party_id == PartyId(5))
            .count(),
        1
    );
}

#[test]
fn imported_votes_change_the_match() {
    let mut dataset = Dataset::seed().expect("seed parses");
    let answers = vec![
        UserAnswer {
            question_id: QuestionId(3),
            answer: Answer::Agree,
            importance: Importance::High,
        },
        UserAnswer {
            question_id: QuestionId(4),
            answer: Answer::Agree,
            importance: Importance::Medium,
        },
    ];

    let before = ScoringEngine::new(Arc::new(InMemoryPositionStore::new(dataset.clone())))
        .try_calculate(&answers)
        .expect("scores");
    let bsw_before = before
        .party_matches
        .iter()
        .find(|entry| entry.party_id == BSW)
        .expect("bsw listed");
    assert!(!bsw_before.has_data);
    assert_eq!(bsw_before.match_percentage, 0);

    let data = include_bytes!("../data/bsw_votes.csv");
    let votes =
        VoteSheetImporter::from_reader(&data[..], &dataset.parties).expect("sheet imports");
    dataset.apply_votes(votes);

    let after = ScoringEngine::new(Arc::new(InMemoryPositionStore::new(dataset)))
        .try_calculate(&answers)
        .expect("scores");
    let bsw_after = after
        .party_matches
        .iter()
        .find(|entry| entry.party_id == BSW)
        .expect("bsw listed");
    assert!(bsw_after.has_data);
    assert_eq!(bsw_after.match_percentage, 100);
    assert_eq!(bsw_after.questions_compared, 2);
}
