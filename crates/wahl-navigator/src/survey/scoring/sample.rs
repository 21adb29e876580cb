use super::super::domain::{Answer, Importance, PartyId, Position, QuestionId};
use super::{
    AnsweredQuestion, KeyMatch, MatchResults, PartyMatch, PartyVoteView, ThematicResult,
    TopicPartyResult,
};

const SAMPLE_PARTIES: &[(u32, &str, &str)] = &[
    (1, "Bündnis 90/Die Grünen", "#46962b"),
    (2, "SPD", "#e3000f"),
    (3, "CDU/CSU", "#000000"),
    (4, "FDP", "#ffed00"),
    (5, "Die Linke", "#be3075"),
    (6, "AfD", "#009ee0"),
];

const SAMPLE_PERCENTAGES: &[u8] = &[78, 63, 58, 45, 42, 23];

/// Fixed illustration served when the store cannot be read. Never derived from user input.
pub(crate) fn sample_results() -> MatchResults {
    let party_matches = SAMPLE_PARTIES
        .iter()
        .zip(SAMPLE_PERCENTAGES)
        .map(|(&(id, name, color), &match_percentage)| PartyMatch {
            party_id: PartyId(id),
            party_name: name.to_string(),
            party_color: color.to_string(),
            match_percentage,
            has_data: true,
            questions_compared: 2,
        })
        .collect();

    MatchResults {
        party_matches,
        thematic_results: vec![
            ThematicResult {
                topic: "Umwelt & Klima".to_string(),
                party_results: topic_results(&[("Grüne", 92), ("SPD", 75), ("CDU/CSU", 42)]),
            },
            ThematicResult {
                topic: "Wirtschaft".to_string(),
                party_results: topic_results(&[("FDP", 83), ("CDU/CSU", 67), ("SPD", 58)]),
            },
        ],
        key_matches: vec![
            KeyMatch {
                title: "CO₂-Preis für fossile Brennstoffe".to_string(),
                description: "You and Bündnis 90/Die Grünen both voted for \"CO₂-Preis für fossile Brennstoffe\".".to_string(),
            },
            KeyMatch {
                title: "Vorratsdatenspeicherung".to_string(),
                description: "You and Bündnis 90/Die Grünen both voted against \"Vorratsdatenspeicherung\".".to_string(),
            },
        ],
        user_answers_with_details: vec![
            sample_answer(
                1,
                "Umwelt & Klima",
                "CO₂-Preis für fossile Brennstoffe",
                2019,
                Answer::Agree,
                Importance::High,
                &[
                    Position::Agree,
                    Position::Agree,
                    Position::Agree,
                    Position::Disagree,
                    Position::Disagree,
                    Position::Disagree,
                ],
            ),
            sample_answer(
                2,
                "Sicherheit",
                "Vorratsdatenspeicherung",
                2021,
                Answer::Disagree,
                Importance::Medium,
                &[
                    Position::Disagree,
                    Position::Agree,
                    Position::Agree,
                    Position::Disagree,
                    Position::Disagree,
                    Position::Neutral,
                ],
            ),
        ],
    }
}

fn topic_results(entries: &[(&str, u8)]) -> Vec<TopicPartyResult> {
    entries
        .iter()
        .map(|&(party_name, match_percentage)| TopicPartyResult {
            party_name: party_name.to_string(),
            match_percentage,
        })
        .collect()
}

fn sample_answer(
    id: u32,
    topic: &str,
    title: &str,
    year: i32,
    user_answer: Answer,
    importance: Importance,
    positions: &[Position],
) -> AnsweredQuestion {
    AnsweredQuestion {
        id: QuestionId(id),
        topic: topic.to_string(),
        title: title.to_string(),
        parliament: "Deutscher Bundestag".to_string(),
        year,
        user_answer,
        importance,
        party_votes: SAMPLE_PARTIES
            .iter()
            .zip(positions)
            .map(|(&(party_id, name, color), &vote)| PartyVoteView {
                party_id: PartyId(party_id),
                party_name: name.to_string(),
                party_color: color.to_string(),
                vote,
            })
            .collect(),
    }
}
