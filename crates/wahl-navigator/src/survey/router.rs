use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::UserAnswer;
use super::filters::{QuestionFilters, SelectionOptions};
use super::service::SurveyService;
use super::store::PositionStore;
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[serde(default)]
    pub filters: QuestionFilters,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub randomize: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRequest {
    pub user_answers: Vec<UserAnswer>,
}

/// Router builder exposing the survey catalogue, question selection and scoring.
pub fn survey_router<S>(service: Arc<SurveyService<S>>) -> Router
where
    S: PositionStore + 'static,
{
    Router::new()
        .route("/api/v1/topics", get(topics_handler::<S>))
        .route("/api/v1/parties", get(parties_handler::<S>))
        .route("/api/v1/parliaments", get(parliaments_handler::<S>))
        .route("/api/v1/questions", post(questions_handler::<S>))
        .route("/api/v1/results", post(results_handler::<S>))
        .route("/api/v1/results/sample", get(sample_handler::<S>))
        .with_state(service)
}

pub(crate) async fn topics_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: PositionStore + 'static,
{
    match service.topics() {
        Ok(topics) => (StatusCode::OK, Json(topics)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn parties_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: PositionStore + 'static,
{
    match service.parties() {
        Ok(parties) => (StatusCode::OK, Json(parties)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn parliaments_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
) -> Response
where
    S: PositionStore + 'static,
{
    match service.parliaments() {
        Ok(parliaments) => (StatusCode::OK, Json(parliaments)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn questions_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Response
where
    S: PositionStore + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return AppError::InvalidRequest(rejection.body_text()).into_response(),
    };

    let options = SelectionOptions {
        count: request.count,
        randomize: request.randomize,
    };
    match service.select_questions(&request.filters, options) {
        Ok(questions) => (StatusCode::OK, Json(questions)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<SurveyService<S>>>,
    payload: Result<Json<ResultsRequest>, JsonRejection>,
) -> Response
where
    S: PositionStore + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return AppError::InvalidRequest(rejection.body_text()).into_response(),
    };

    let report = service.calculate_results(&request.user_answers).into_report();
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn sample_handler<S>(State(service): State<Arc<SurveyService<S>>>) -> Response
where
    S: PositionStore + 'static,
{
    (StatusCode::OK, Json(service.sample_results().into_report())).into_response()
}
