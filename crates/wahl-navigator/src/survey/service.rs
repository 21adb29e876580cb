use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{Parliament, Party, Question, QuestionId, Topic, UserAnswer};
use super::filters::{self, QuestionFilters, SelectionOptions};
use super::scoring::{self, MatchOutcome, PartyVoteView, ScoringEngine};
use super::store::{PositionStore, StoreError};

const SAMPLE_REASON: &str = "illustrative sample, not computed from answers";

/// A question as presented to the user, with its context and the recorded party votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    #[serde(flatten)]
    pub question: Question,
    pub topic: String,
    pub parliament: String,
    pub party_votes: Vec<PartyVoteView>,
}

/// Service composing the position store, the scoring engine and the question filters.
pub struct SurveyService<S> {
    store: Arc<S>,
    engine: ScoringEngine<S>,
    default_count: usize,
}

impl<S> SurveyService<S>
where
    S: PositionStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            engine: ScoringEngine::new(Arc::clone(&store)),
            store,
            default_count: 0,
        }
    }

    /// Question count applied when a selection request leaves `count` at zero.
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn topics(&self) -> Result<Vec<Topic>, SurveyServiceError> {
        Ok(self.store.all_topics()?)
    }

    pub fn parties(&self) -> Result<Vec<Party>, SurveyServiceError> {
        Ok(self.store.all_parties()?)
    }

    pub fn parliaments(&self) -> Result<Vec<Parliament>, SurveyServiceError> {
        Ok(self.store.all_parliaments()?)
    }

    /// Every stored question in id order, unfiltered.
    pub fn questions(&self) -> Result<Vec<QuestionView>, SurveyServiceError> {
        let questions = self.store.all_questions()?;
        self.present(questions)
    }

    /// Select questions relative to today's year with a thread-local rng.
    pub fn select_questions(
        &self,
        filters: &QuestionFilters,
        options: SelectionOptions,
    ) -> Result<Vec<QuestionView>, SurveyServiceError> {
        let current_year = Local::now().year();
        self.select_questions_with(filters, options, current_year, &mut rand::thread_rng())
    }

    pub fn select_questions_with<R: Rng + ?Sized>(
        &self,
        filters: &QuestionFilters,
        options: SelectionOptions,
        current_year: i32,
        rng: &mut R,
    ) -> Result<Vec<QuestionView>, SurveyServiceError> {
        let options = SelectionOptions {
            count: if options.count == 0 {
                self.default_count
            } else {
                options.count
            },
            ..options
        };

        let selected = filters::select_questions(
            self.store.all_questions()?,
            filters,
            options,
            current_year,
            rng,
        );
        self.present(selected)
    }

    pub fn calculate_results(&self, answers: &[UserAnswer]) -> MatchOutcome {
        self.engine.calculate_results(answers)
    }

    pub fn sample_results(&self) -> MatchOutcome {
        MatchOutcome::Degraded {
            sample: scoring::sample_results(),
            reason: SAMPLE_REASON.to_string(),
        }
    }

    fn present(&self, questions: Vec<Question>) -> Result<Vec<QuestionView>, SurveyServiceError> {
        let ids: Vec<QuestionId> = questions.iter().map(|question| question.id).collect();
        let mut votes = self.store.votes_for_questions(&ids)?;

        let topics: HashMap<_, _> = self
            .store
            .all_topics()?
            .into_iter()
            .map(|topic| (topic.id, topic.name))
            .collect();
        let parliaments: HashMap<_, _> = self
            .store
            .all_parliaments()?
            .into_iter()
            .map(|parliament| (parliament.id, parliament.name))
            .collect();
        let parties: HashMap<_, _> = self
            .store
            .all_parties()?
            .into_iter()
            .map(|party| (party.id, party))
            .collect();

        Ok(questions
            .into_iter()
            .map(|question| {
                let party_votes = votes
                    .remove(&question.id)
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|vote| {
                        parties.get(&vote.party_id).map(|party| PartyVoteView {
                            party_id: party.id,
                            party_name: party.name.clone(),
                            party_color: party.color.clone(),
                            vote: vote.position,
                        })
                    })
                    .collect();
                QuestionView {
                    topic: topics
                        .get(&question.topic_id)
                        .cloned()
                        .unwrap_or_else(|| scoring::FALLBACK_TOPIC.to_string()),
                    parliament: parliaments
                        .get(&question.parliament_id)
                        .cloned()
                        .unwrap_or_else(|| scoring::FALLBACK_PARLIAMENT.to_string()),
                    question,
                    party_votes,
                }
            })
            .collect())
    }
}

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
