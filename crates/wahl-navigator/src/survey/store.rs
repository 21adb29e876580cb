use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::dataset::Dataset;
use super::domain::{Parliament, Party, Question, QuestionId, Topic, Vote};

/// Read access to topics, parties and recorded votes.
///
/// The batched lookups default to one call per id; stores backed by a database should override
/// them with a single query.
pub trait PositionStore: Send + Sync {
    fn all_topics(&self) -> Result<Vec<Topic>, StoreError>;
    fn all_parliaments(&self) -> Result<Vec<Parliament>, StoreError>;
    fn all_parties(&self) -> Result<Vec<Party>, StoreError>;
    fn all_questions(&self) -> Result<Vec<Question>, StoreError>;
    fn question_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError>;
    fn votes_for_question(&self, id: QuestionId) -> Result<Vec<Vote>, StoreError>;

    fn questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> Result<HashMap<QuestionId, Question>, StoreError> {
        let mut found = HashMap::with_capacity(ids.len());
        for id in ids {
            if found.contains_key(id) {
                continue;
            }
            if let Some(question) = self.question_by_id(*id)? {
                found.insert(*id, question);
            }
        }
        Ok(found)
    }

    fn votes_for_questions(
        &self,
        ids: &[QuestionId],
    ) -> Result<HashMap<QuestionId, Vec<Vote>>, StoreError> {
        let mut found = HashMap::with_capacity(ids.len());
        for id in ids {
            if found.contains_key(id) {
                continue;
            }
            found.insert(*id, self.votes_for_question(*id)?);
        }
        Ok(found)
    }
}

impl<S: PositionStore + ?Sized> PositionStore for Arc<S> {
    fn all_topics(&self) -> Result<Vec<Topic>, StoreError> {
        (**self).all_topics()
    }

    fn all_parliaments(&self) -> Result<Vec<Parliament>, StoreError> {
        (**self).all_parliaments()
    }

    fn all_parties(&self) -> Result<Vec<Party>, StoreError> {
        (**self).all_parties()
    }

    fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        (**self).all_questions()
    }

    fn question_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        (**self).question_by_id(id)
    }

    fn votes_for_question(&self, id: QuestionId) -> Result<Vec<Vote>, StoreError> {
        (**self).votes_for_question(id)
    }

    fn questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> Result<HashMap<QuestionId, Question>, StoreError> {
        (**self).questions_by_ids(ids)
    }

    fn votes_for_questions(
        &self,
        ids: &[QuestionId],
    ) -> Result<HashMap<QuestionId, Vec<Vote>>, StoreError> {
        (**self).votes_for_questions(ids)
    }
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("position store unavailable: {0}")]
    Unavailable(String),
    /// For stores backed by external storage whose rows fail to decode or contradict each other.
    #[error("position store returned inconsistent data: {0}")]
    Inconsistent(String),
}

/// Immutable store built from a [`Dataset`]; every lookup is a map access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPositionStore {
    topics: Vec<Topic>,
    parliaments: Vec<Parliament>,
    parties: Vec<Party>,
    questions: BTreeMap<QuestionId, Question>,
    votes: HashMap<QuestionId, Vec<Vote>>,
}

impl InMemoryPositionStore {
    /// Builds the store, listing topics, parliaments and parties by ascending id.
    pub fn new(dataset: Dataset) -> Self {
        let Dataset {
            mut topics,
            mut parliaments,
            mut parties,
            questions,
            votes,
        } = dataset;

        topics.sort_by_key(|topic| topic.id);
        parliaments.sort_by_key(|parliament| parliament.id);
        parties.sort_by_key(|party| party.id);

        let questions = questions
            .into_iter()
            .map(|question| (question.id, question))
            .collect();

        let mut by_question: HashMap<QuestionId, Vec<Vote>> = HashMap::new();
        for vote in votes {
            by_question.entry(vote.question_id).or_default().push(vote);
        }

        Self {
            topics,
            parliaments,
            parties,
            questions,
            votes: by_question,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl PositionStore for InMemoryPositionStore {
    fn all_topics(&self) -> Result<Vec<Topic>, StoreError> {
        Ok(self.topics.clone())
    }

    fn all_parliaments(&self) -> Result<Vec<Parliament>, StoreError> {
        Ok(self.parliaments.clone())
    }

    fn all_parties(&self) -> Result<Vec<Party>, StoreError> {
        Ok(self.parties.clone())
    }

    fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.questions.values().cloned().collect())
    }

    fn question_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.questions.get(&id).cloned())
    }

    fn votes_for_question(&self, id: QuestionId) -> Result<Vec<Vote>, StoreError> {
        Ok(self.votes.get(&id).cloned().unwrap_or_default())
    }
}
