use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{Parliament, Party, PartyId, Question, QuestionId, Topic, Vote};

const SEED_DATASET: &str = include_str!("../../data/seed.json");

/// Topics, parliaments, parties, questions and votes as a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub parliaments: Vec<Parliament>,
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicateId { kind: &'static str, id: u32 },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read dataset: {err}"),
            DatasetError::Json(err) => write!(f, "invalid dataset JSON: {err}"),
            DatasetError::DuplicateId { kind, id } => {
                write!(f, "dataset lists {kind} id {id} more than once")
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Json(err) => Some(err),
            DatasetError::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl Dataset {
    /// The compiled-in seed data.
    pub fn seed() -> Result<Self, DatasetError> {
        Self::from_reader(SEED_DATASET.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Rejects duplicate ids. Dangling references are only logged since scoring tolerates them.
    pub fn validate(&self) -> Result<(), DatasetError> {
        ensure_unique("topic", self.topics.iter().map(|topic| topic.id.0))?;
        ensure_unique(
            "parliament",
            self.parliaments.iter().map(|parliament| parliament.id.0),
        )?;
        ensure_unique("party", self.parties.iter().map(|party| party.id.0))?;
        ensure_unique(
            "question",
            self.questions.iter().map(|question| question.id.0),
        )?;

        let topic_ids: HashSet<_> = self.topics.iter().map(|topic| topic.id).collect();
        let party_ids: HashSet<_> = self.parties.iter().map(|party| party.id).collect();
        let question_ids: HashSet<_> = self.questions.iter().map(|question| question.id).collect();

        for question in &self.questions {
            if !topic_ids.contains(&question.topic_id) {
                warn!(question = %question.id, topic = %question.topic_id, "question references unknown topic");
            }
        }
        for vote in &self.votes {
            if !party_ids.contains(&vote.party_id) || !question_ids.contains(&vote.question_id) {
                warn!(question = %vote.question_id, party = %vote.party_id, "vote references unknown question or party");
            }
        }

        Ok(())
    }

    /// Replaces recorded votes for matching (question, party) pairs and appends the rest.
    /// Returns how many existing votes were replaced.
    pub fn apply_votes(&mut self, votes: Vec<Vote>) -> usize {
        let incoming: HashSet<(QuestionId, PartyId)> = votes
            .iter()
            .map(|vote| (vote.question_id, vote.party_id))
            .collect();

        let before = self.votes.len();
        self.votes
            .retain(|vote| !incoming.contains(&(vote.question_id, vote.party_id)));
        let replaced = before - self.votes.len();

        self.votes.extend(votes);
        replaced
    }
}

fn ensure_unique(
    kind: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
