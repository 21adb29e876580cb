//! Weighted agreement scoring between a user's answers and the parties' recorded votes.

mod highlights;
mod sample;
mod tally;
mod thematic;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::domain::{
    Answer, Importance, Parliament, ParliamentId, Party, PartyId, Position, QuestionId, Topic,
    TopicId, UserAnswer,
};
use super::store::{PositionStore, StoreError};
use tally::ScoreLedger;

pub(crate) const FALLBACK_TOPIC: &str = "General";
pub(crate) const FALLBACK_PARLIAMENT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMatch {
    pub party_id: PartyId,
    pub party_name: String,
    pub party_color: String,
    pub match_percentage: u8,
    /// False when none of the answered questions carried a vote by this party.
    pub has_data: bool,
    pub questions_compared: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicPartyResult {
    pub party_name: String,
    pub match_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThematicResult {
    pub topic: String,
    pub party_results: Vec<TopicPartyResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatch {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyVoteView {
    pub party_id: PartyId,
    pub party_name: String,
    pub party_color: String,
    pub vote: Position,
}

/// A scored answer annotated with the question context and every party's vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub id: QuestionId,
    pub topic: String,
    pub title: String,
    pub parliament: String,
    pub year: i32,
    pub user_answer: Answer,
    pub importance: Importance,
    pub party_votes: Vec<PartyVoteView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResults {
    pub party_matches: Vec<PartyMatch>,
    pub thematic_results: Vec<ThematicResult>,
    pub key_matches: Vec<KeyMatch>,
    pub user_answers_with_details: Vec<AnsweredQuestion>,
}

/// Result of a scoring run. `Degraded` carries the fixed sample set instead of real scores.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Computed(MatchResults),
    Degraded { sample: MatchResults, reason: String },
}

impl MatchOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn results(&self) -> &MatchResults {
        match self {
            Self::Computed(results) => results,
            Self::Degraded { sample, .. } => sample,
        }
    }

    pub fn into_report(self) -> MatchReport {
        match self {
            Self::Computed(results) => MatchReport {
                results,
                degraded: false,
                degraded_reason: None,
            },
            Self::Degraded { sample, reason } => MatchReport {
                results: sample,
                degraded: true,
                degraded_reason: Some(reason),
            },
        }
    }
}

/// Wire form of a [`MatchOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    #[serde(flatten)]
    pub results: MatchResults,
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

/// The labelled illustration returned by degraded runs and the sample endpoint.
pub fn sample_results() -> MatchResults {
    sample::sample_results()
}

/// Scores answers against a [`PositionStore`].
pub struct ScoringEngine<S> {
    store: Arc<S>,
}

impl<S> ScoringEngine<S>
where
    S: PositionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Scores the answers, falling back to the sample set when the store fails.
    pub fn calculate_results(&self, answers: &[UserAnswer]) -> MatchOutcome {
        match self.try_calculate(answers) {
            Ok(results) => MatchOutcome::Computed(results),
            Err(err) => {
                error!(error = %err, answers = answers.len(), "match computation failed; serving sample results");
                MatchOutcome::Degraded {
                    sample: sample::sample_results(),
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Scores the answers, surfacing store failures to the caller.
    pub fn try_calculate(&self, answers: &[UserAnswer]) -> Result<MatchResults, StoreError> {
        let parties = self.store.all_parties()?;
        let topics = self.store.all_topics()?;
        let parliaments = self.store.all_parliaments()?;

        let scored: Vec<(&UserAnswer, Position)> = answers
            .iter()
            .filter_map(|answer| answer.answer.stance().map(|stance| (answer, stance)))
            .collect();
        let ids: Vec<QuestionId> = scored.iter().map(|(answer, _)| answer.question_id).collect();

        let questions = self.store.questions_by_ids(&ids)?;
        let votes = self.store.votes_for_questions(&ids)?;

        let lookup = Lookup::new(&parties, &topics, &parliaments);
        let mut ledger = ScoreLedger::new(&parties);
        let mut answered = Vec::with_capacity(scored.len());

        for (answer, stance) in scored {
            let Some(question) = questions.get(&answer.question_id) else {
                debug!(question = %answer.question_id, "skipping answer for unknown question");
                continue;
            };
            let question_votes = votes
                .get(&answer.question_id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            ledger.record(question, stance, answer.importance.weight(), question_votes);

            answered.push(AnsweredQuestion {
                id: question.id,
                topic: lookup.topic_name(question.topic_id).to_string(),
                title: question.title.clone(),
                parliament: lookup.parliament_name(question.parliament_id).to_string(),
                year: question.year,
                user_answer: answer.answer,
                importance: answer.importance,
                party_votes: question_votes
                    .iter()
                    .filter_map(|vote| {
                        lookup.party(vote.party_id).map(|party| PartyVoteView {
                            party_id: party.id,
                            party_name: party.name.clone(),
                            party_color: party.color.clone(),
                            vote: vote.position,
                        })
                    })
                    .collect(),
            });
        }

        let party_matches = ledger.party_matches();
        let thematic_results = thematic::thematic_results(&ledger, &topics);
        let key_matches = highlights::key_matches(party_matches.first(), &answered);

        Ok(MatchResults {
            party_matches,
            thematic_results,
            key_matches,
            user_answers_with_details: answered,
        })
    }
}

struct Lookup<'a> {
    parties: HashMap<PartyId, &'a Party>,
    topics: HashMap<TopicId, &'a str>,
    parliaments: HashMap<ParliamentId, &'a str>,
}

impl<'a> Lookup<'a> {
    fn new(parties: &'a [Party], topics: &'a [Topic], parliaments: &'a [Parliament]) -> Self {
        Self {
            parties: parties.iter().map(|party| (party.id, party)).collect(),
            topics: topics
                .iter()
                .map(|topic| (topic.id, topic.name.as_str()))
                .collect(),
            parliaments: parliaments
                .iter()
                .map(|parliament| (parliament.id, parliament.name.as_str()))
                .collect(),
        }
    }

    fn party(&self, id: PartyId) -> Option<&'a Party> {
        self.parties.get(&id).copied()
    }

    fn topic_name(&self, id: TopicId) -> &'a str {
        self.topics.get(&id).copied().unwrap_or(FALLBACK_TOPIC)
    }

    fn parliament_name(&self, id: ParliamentId) -> &'a str {
        self.parliaments
            .get(&id)
            .copied()
            .unwrap_or(FALLBACK_PARLIAMENT)
    }
}
