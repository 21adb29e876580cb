//! Survey matching: the position store, question filters, scoring and HTTP surface.

pub mod dataset;
pub mod domain;
pub mod filters;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod votesheet;

pub use dataset::{Dataset, DatasetError};
pub use domain::{
    Answer, Importance, Parliament, ParliamentId, Party, PartyId, Position, Question, QuestionId,
    Topic, TopicId, UserAnswer, Vote,
};
pub use filters::{select_questions, LevelFilters, QuestionFilters, SelectionOptions, TimeFilter};
pub use router::{survey_router, QuestionRequest, ResultsRequest};
pub use scoring::{
    AnsweredQuestion, KeyMatch, MatchOutcome, MatchReport, MatchResults, PartyMatch,
    PartyVoteView, ScoringEngine, ThematicResult, TopicPartyResult,
};
pub use service::{QuestionView, SurveyService, SurveyServiceError};
pub use store::{InMemoryPositionStore, PositionStore, StoreError};
pub use votesheet::{VoteSheetImportError, VoteSheetImporter};

#[cfg(test)]
mod tests;
