use super::common::*;
use std::sync::Arc;

use crate::survey::dataset::Dataset;
use crate::survey::domain::{Answer, Importance, PartyId, Position, UserAnswer};
use crate::survey::scoring::{sample_results, MatchOutcome, MatchResults, ScoringEngine};
use crate::survey::store::{InMemoryPositionStore, StoreError};

fn engine() -> ScoringEngine<InMemoryPositionStore> {
    ScoringEngine::new(fixture_store())
}

fn computed(answers: &[UserAnswer]) -> MatchResults {
    match engine().calculate_results(answers) {
        MatchOutcome::Computed(results) => results,
        other => panic!("expected computed results, got {other:?}"),
    }
}

fn percentages(results: &MatchResults) -> Vec<(PartyId, u8)> {
    results
        .party_matches
        .iter()
        .map(|entry| (entry.party_id, entry.match_percentage))
        .collect()
}

fn percentage_of(results: &MatchResults, party: PartyId) -> u8 {
    results
        .party_matches
        .iter()
        .find(|entry| entry.party_id == party)
        .map(|entry| entry.match_percentage)
        .expect("party listed")
}

#[test]
fn single_agree_answer_scores_full_half_and_zero_credit() {
    let results = computed(&[medium(1, Answer::Agree)]);

    assert_eq!(
        percentages(&results),
        vec![(ALPHA, 100), (CHARLIE, 50), (BRAVO, 0), (DELTA, 0)]
    );
    assert!(results.party_matches[2].has_data);
    assert!(!results.party_matches[3].has_data);

    assert_eq!(results.thematic_results.len(), 1);
    let climate = &results.thematic_results[0];
    assert_eq!(climate.topic, "Climate");
    let names: Vec<_> = climate
        .party_results
        .iter()
        .map(|entry| (entry.party_name.as_str(), entry.match_percentage))
        .collect();
    assert_eq!(names, vec![("Alpha", 100), ("Charlie", 50)]);

    assert_eq!(results.key_matches.len(), 1);
    assert_eq!(results.key_matches[0].title, "Motion 1");
    assert_eq!(
        results.key_matches[0].description,
        "You and Alpha both voted for \"Motion 1\"."
    );
}

#[test]
fn weighted_two_question_example_scores_full_zero_and_half() {
    use Position::*;

    let dataset = Dataset {
        topics: vec![topic(1, "Climate")],
        parliaments: vec![parliament(1, "Bundestag", true)],
        parties: vec![
            party(1, "Alpha", "#111111"),
            party(2, "Bravo", "#222222"),
            party(3, "Charlie", "#333333"),
        ],
        questions: vec![question(1, 1, 1, true, 2024), question(2, 1, 1, true, 2024)],
        votes: vec![
            vote(1, ALPHA, Agree),
            vote(2, ALPHA, Disagree),
            vote(1, BRAVO, Disagree),
            vote(2, BRAVO, Agree),
            vote(1, CHARLIE, Neutral),
            vote(2, CHARLIE, Neutral),
        ],
    };
    let engine = ScoringEngine::new(Arc::new(InMemoryPositionStore::new(dataset)));

    let results = engine
        .try_calculate(&[
            answer(1, Answer::Agree, Importance::High),
            answer(2, Answer::Disagree, Importance::Medium),
        ])
        .expect("scores");

    assert_eq!(
        percentages(&results),
        vec![(ALPHA, 100), (CHARLIE, 50), (BRAVO, 0)]
    );
    assert!(results.party_matches.iter().all(|entry| entry.has_data));
}

#[test]
fn skipped_answers_never_touch_the_maximum() {
    let baseline = computed(&[medium(1, Answer::Agree)]);
    let with_skip = computed(&[
        medium(1, Answer::Agree),
        answer(2, Answer::Skip, Importance::High),
    ]);

    assert_eq!(percentages(&baseline), percentages(&with_skip));
    assert_eq!(with_skip.user_answers_with_details.len(), 1);
    assert_eq!(with_skip.party_matches[0].questions_compared, 1);
}

#[test]
fn empty_and_all_skip_inputs_yield_zero_for_every_party() {
    for answers in [
        Vec::new(),
        vec![medium(1, Answer::Skip), medium(2, Answer::Skip)],
    ] {
        let results = computed(&answers);
        assert_eq!(
            percentages(&results),
            vec![(ALPHA, 0), (BRAVO, 0), (CHARLIE, 0), (DELTA, 0)]
        );
        assert!(results.party_matches.iter().all(|entry| !entry.has_data));
        assert!(results.thematic_results.is_empty());
        assert!(results.key_matches.is_empty());
        assert!(results.user_answers_with_details.is_empty());
    }
}

#[test]
fn neutral_matches_neutral_in_full() {
    let results = computed(&[medium(4, Answer::Neutral)]);

    assert_eq!(
        percentages(&results),
        vec![(ALPHA, 100), (BRAVO, 50), (CHARLIE, 50), (DELTA, 0)]
    );
    assert!(results.key_matches.is_empty());
}

#[test]
fn missing_topic_and_parliament_fall_back_to_placeholders() {
    let results = computed(&[medium(4, Answer::Agree)]);

    let detail = &results.user_answers_with_details[0];
    assert_eq!(detail.topic, "General");
    assert_eq!(detail.parliament, "Unknown");
    assert_eq!(detail.year, 2010);
    assert!(results.thematic_results.is_empty());
}

#[test]
fn higher_importance_pulls_an_agreeing_party_up() {
    let medium_weight = computed(&[
        medium(1, Answer::Agree),
        answer(2, Answer::Agree, Importance::Low),
    ]);
    let high_weight = computed(&[
        answer(1, Answer::Agree, Importance::High),
        answer(2, Answer::Agree, Importance::Low),
    ]);

    assert_eq!(percentage_of(&medium_weight, ALPHA), 67);
    assert_eq!(percentage_of(&high_weight, ALPHA), 80);
    assert_eq!(percentage_of(&high_weight, CHARLIE), 60);
    assert_eq!(percentage_of(&high_weight, BRAVO), 0);
}

#[test]
fn unknown_questions_and_parties_are_skipped() {
    let results = computed(&[medium(999, Answer::Agree), medium(3, Answer::Agree)]);

    assert_eq!(
        percentages(&results),
        vec![(ALPHA, 100), (BRAVO, 100), (CHARLIE, 0), (DELTA, 0)]
    );
    assert!(results
        .party_matches
        .iter()
        .all(|entry| entry.party_id != PartyId(99)));
    assert_eq!(results.user_answers_with_details.len(), 1);
    assert_eq!(results.user_answers_with_details[0].party_votes.len(), 2);
}

#[test]
fn key_matches_stop_at_three_and_ignore_neutral_answers() {
    let results = computed(&[
        medium(1, Answer::Agree),
        medium(2, Answer::Disagree),
        medium(4, Answer::Neutral),
        medium(3, Answer::Agree),
        medium(6, Answer::Agree),
    ]);

    assert_eq!(results.party_matches[0].party_id, ALPHA);
    assert_eq!(results.party_matches[0].match_percentage, 100);

    let titles: Vec<_> = results
        .key_matches
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Motion 1", "Motion 2", "Motion 3"]);
    assert_eq!(
        results.key_matches[1].description,
        "You and Alpha both voted against \"Motion 2\"."
    );
}

#[test]
fn thematic_lists_keep_the_top_three_nonzero_entries() {
    let results = computed(&[medium(6, Answer::Agree)]);

    assert_eq!(
        percentages(&results),
        vec![(ALPHA, 100), (DELTA, 100), (BRAVO, 50), (CHARLIE, 50)]
    );
    let economy = &results.thematic_results[0];
    assert_eq!(economy.topic, "Economy");
    let names: Vec<_> = economy
        .party_results
        .iter()
        .map(|entry| entry.party_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Delta", "Bravo"]);
}

#[test]
fn results_are_bounded_ordered_and_repeatable() {
    let scenarios = [
        vec![medium(1, Answer::Disagree), medium(3, Answer::Neutral)],
        vec![
            answer(2, Answer::Agree, Importance::High),
            answer(4, Answer::Disagree, Importance::Low),
            medium(6, Answer::Neutral),
        ],
        vec![medium(1, Answer::Agree), medium(1, Answer::Agree)],
    ];

    for answers in scenarios {
        let first = computed(&answers);
        let second = computed(&answers);
        assert_eq!(first, second);

        assert!(first
            .party_matches
            .windows(2)
            .all(|pair| pair[0].match_percentage >= pair[1].match_percentage));
        assert!(first
            .party_matches
            .iter()
            .all(|entry| entry.match_percentage <= 100));
        for theme in &first.thematic_results {
            assert!(!theme.party_results.is_empty());
            assert!(theme.party_results.len() <= 3);
            assert!(theme
                .party_results
                .iter()
                .all(|entry| entry.match_percentage > 0));
        }
    }
}

#[test]
fn agreeing_with_every_vote_scores_one_hundred() {
    let results = computed(&[
        medium(1, Answer::Agree),
        medium(2, Answer::Disagree),
        medium(3, Answer::Agree),
        medium(6, Answer::Agree),
    ]);

    assert_eq!(percentage_of(&results, ALPHA), 100);
}

#[test]
fn annotated_answers_carry_party_votes_in_answer_order() {
    let results = computed(&[medium(2, Answer::Agree), medium(1, Answer::Disagree)]);

    let ids: Vec<_> = results
        .user_answers_with_details
        .iter()
        .map(|detail| detail.id.0)
        .collect();
    assert_eq!(ids, vec![2, 1]);

    let first = &results.user_answers_with_details[0];
    assert_eq!(first.topic, "Economy");
    assert_eq!(first.parliament, "Bundestag");
    assert_eq!(first.user_answer, Answer::Agree);
    assert_eq!(first.importance, Importance::Medium);
    assert!(first
        .party_votes
        .iter()
        .any(|view| view.party_name == "Charlie" && view.vote == Position::Agree));
}

#[test]
fn store_failures_degrade_to_the_labelled_sample() {
    let engine = ScoringEngine::new(Arc::new(UnavailableStore));
    let outcome = engine.calculate_results(&[medium(1, Answer::Agree)]);

    assert!(outcome.is_degraded());
    assert_eq!(outcome.results(), &sample_results());
    match &outcome {
        MatchOutcome::Degraded { reason, .. } => assert!(reason.contains("database offline")),
        other => panic!("expected degraded outcome, got {other:?}"),
    }

    let report = serde_json::to_value(outcome.into_report()).expect("serializes");
    assert_eq!(report["degraded"], true);
    assert!(report["partyMatches"].is_array());
    assert!(report["degradedReason"].is_string());
}

#[test]
fn vote_lookup_failures_surface_from_try_calculate() {
    let store = VotesOfflineStore(InMemoryPositionStore::new(fixture_dataset()));
    let engine = ScoringEngine::new(Arc::new(store));

    match engine.try_calculate(&[medium(1, Answer::Agree)]) {
        Err(StoreError::Inconsistent(reason)) => assert_eq!(reason, "vote table missing"),
        other => panic!("expected inconsistent store error, got {other:?}"),
    }
}

#[test]
fn computed_reports_serialize_camel_case() {
    let outcome = engine().calculate_results(&[medium(1, Answer::Agree)]);
    let report = serde_json::to_value(outcome.into_report()).expect("serializes");

    assert_eq!(report["degraded"], false);
    assert!(report.get("degradedReason").is_none());
    assert_eq!(report["partyMatches"][0]["partyName"], "Alpha");
    assert_eq!(report["partyMatches"][0]["matchPercentage"], 100);
    assert_eq!(report["partyMatches"][0]["hasData"], true);
    assert_eq!(report["thematicResults"][0]["partyResults"][0]["partyName"], "Alpha");
    assert_eq!(report["userAnswersWithDetails"][0]["userAnswer"], "agree");
    assert_eq!(report["userAnswersWithDetails"][0]["partyVotes"][0]["vote"], "agree");
}
