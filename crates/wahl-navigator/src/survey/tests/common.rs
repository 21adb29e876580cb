use std::sync::Arc;

use axum::response::Response;
use chrono::{Datelike, Local};
use serde_json::Value;

use crate::survey::dataset::Dataset;
use crate::survey::domain::{
    Answer, Importance, Parliament, ParliamentId, Party, PartyId, Position, Question, QuestionId,
    Topic, TopicId, UserAnswer, Vote,
};
use crate::survey::store::{InMemoryPositionStore, PositionStore, StoreError};
use crate::survey::{survey_router, SurveyService};

pub(super) const CURRENT_YEAR: i32 = 2025;

pub(super) const ALPHA: PartyId = PartyId(1);
pub(super) const BRAVO: PartyId = PartyId(2);
pub(super) const CHARLIE: PartyId = PartyId(3);
pub(super) const DELTA: PartyId = PartyId(4);

pub(super) fn party(id: u32, name: &str, color: &str) -> Party {
    Party {
        id: PartyId(id),
        name: name.to_string(),
        short_name: name[..1].to_string(),
        color: color.to_string(),
        logo: None,
    }
}

pub(super) fn topic(id: u32, name: &str) -> Topic {
    Topic {
        id: TopicId(id),
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
    }
}

pub(super) fn parliament(id: u32, name: &str, is_federal: bool) -> Parliament {
    Parliament {
        id: ParliamentId(id),
        name: name.to_string(),
        short_name: name.to_string(),
        is_federal,
        region: None,
    }
}

pub(super) fn question(
    id: u32,
    topic: u32,
    parliament: u32,
    is_federal: bool,
    year: i32,
) -> Question {
    Question {
        id: QuestionId(id),
        title: format!("Motion {id}"),
        description: String::new(),
        topic_id: TopicId(topic),
        parliament_id: ParliamentId(parliament),
        is_federal,
        date: None,
        year,
        agree_text: "Yes".to_string(),
        disagree_text: "No".to_string(),
        detailed_info: String::new(),
        source_url: String::new(),
        source_description: String::new(),
    }
}

pub(super) fn vote(question: u32, party: PartyId, position: Position) -> Vote {
    Vote {
        question_id: QuestionId(question),
        party_id: party,
        position,
        details: None,
    }
}

/// Four parties, two topics, six questions.
///
/// Question 4 points at a topic and parliament missing from the dataset, question 3 carries a
/// vote by an unknown party and question 5 has no votes at all.
pub(super) fn fixture_dataset() -> Dataset {
    use Position::*;

    Dataset {
        topics: vec![topic(1, "Climate"), topic(2, "Economy")],
        parliaments: vec![
            parliament(1, "Bundestag", true),
            parliament(2, "Landtag", false),
        ],
        parties: vec![
            party(3, "Charlie", "#333333"),
            party(1, "Alpha", "#111111"),
            party(4, "Delta", "#444444"),
            party(2, "Bravo", "#222222"),
        ],
        questions: vec![
            question(1, 1, 1, true, 2024),
            question(2, 2, 1, true, 2018),
            question(3, 1, 2, false, 2023),
            question(4, 99, 99, true, 2010),
            question(5, 2, 2, false, 2025),
            question(6, 2, 1, true, 2022),
        ],
        votes: vec![
            vote(1, ALPHA, Agree),
            vote(1, BRAVO, Disagree),
            vote(1, CHARLIE, Neutral),
            vote(2, ALPHA, Disagree),
            vote(2, BRAVO, Disagree),
            vote(2, CHARLIE, Agree),
            vote(3, ALPHA, Agree),
            vote(3, BRAVO, Agree),
            vote(3, PartyId(99), Agree),
            vote(4, ALPHA, Neutral),
            vote(4, BRAVO, Agree),
            vote(4, CHARLIE, Disagree),
            vote(6, ALPHA, Agree),
            vote(6, BRAVO, Neutral),
            vote(6, CHARLIE, Neutral),
            vote(6, DELTA, Agree),
        ],
    }
}

pub(super) fn fixture_store() -> Arc<InMemoryPositionStore> {
    Arc::new(InMemoryPositionStore::new(fixture_dataset()))
}

pub(super) fn fixture_questions() -> Vec<Question> {
    fixture_store().all_questions().expect("questions")
}

pub(super) fn answer(question: u32, answer: Answer, importance: Importance) -> UserAnswer {
    UserAnswer {
        question_id: QuestionId(question),
        answer,
        importance,
    }
}

pub(super) fn medium(question: u32, value: Answer) -> UserAnswer {
    answer(question, value, Importance::Medium)
}

pub(super) struct UnavailableStore;

impl PositionStore for UnavailableStore {
    fn all_topics(&self) -> Result<Vec<Topic>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn all_parliaments(&self) -> Result<Vec<Parliament>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn all_parties(&self) -> Result<Vec<Party>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn question_by_id(&self, _id: QuestionId) -> Result<Option<Question>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn votes_for_question(&self, _id: QuestionId) -> Result<Vec<Vote>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Serves the catalogue but fails once votes are requested.
pub(super) struct VotesOfflineStore(pub(super) InMemoryPositionStore);

impl PositionStore for VotesOfflineStore {
    fn all_topics(&self) -> Result<Vec<Topic>, StoreError> {
        self.0.all_topics()
    }

    fn all_parliaments(&self) -> Result<Vec<Parliament>, StoreError> {
        self.0.all_parliaments()
    }

    fn all_parties(&self) -> Result<Vec<Party>, StoreError> {
        self.0.all_parties()
    }

    fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.0.all_questions()
    }

    fn question_by_id(&self, id: QuestionId) -> Result<Option<Question>, StoreError> {
        self.0.question_by_id(id)
    }

    fn votes_for_question(&self, _id: QuestionId) -> Result<Vec<Vote>, StoreError> {
        Err(StoreError::Inconsistent("vote table missing".to_string()))
    }
}

pub(super) fn fixture_router() -> axum::Router {
    survey_router(Arc::new(SurveyService::new(fixture_store())))
}

/// The fixture dataset with every question dated this year, for routes that read the clock.
pub(super) fn current_year_router() -> axum::Router {
    let mut dataset = fixture_dataset();
    let year = Local::now().year();
    for question in &mut dataset.questions {
        question.year = year;
    }
    let store = Arc::new(InMemoryPositionStore::new(dataset));
    survey_router(Arc::new(SurveyService::new(store)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
