use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use wahl_navigator::config::DatasetConfig;
use wahl_navigator::error::AppError;
use wahl_navigator::survey::{
    Dataset, InMemoryPositionStore, SurveyService, TimeFilter, UserAnswer, VoteSheetImporter,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured dataset (or the built-in seed) and overlays the vote sheet, if any.
pub(crate) fn load_dataset(config: &DatasetConfig) -> Result<Dataset, AppError> {
    let mut dataset = match &config.path {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::seed()?,
    };

    if let Some(path) = &config.votes_csv {
        let votes = VoteSheetImporter::from_path(path, &dataset.parties)?;
        let imported = votes.len();
        let replaced = dataset.apply_votes(votes);
        info!(path = %path.display(), imported, replaced, "applied vote sheet");
    }

    info!(
        parties = dataset.parties.len(),
        questions = dataset.questions.len(),
        votes = dataset.votes.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

pub(crate) fn build_service(
    config: &DatasetConfig,
) -> Result<SurveyService<InMemoryPositionStore>, AppError> {
    let store = InMemoryPositionStore::new(load_dataset(config)?);
    Ok(SurveyService::new(Arc::new(store)).with_default_count(config.question_count))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerFile {
    Bare(Vec<UserAnswer>),
    #[serde(rename_all = "camelCase")]
    Wrapped {
        user_answers: Vec<UserAnswer>,
    },
}

/// Reads answers from either a bare JSON array or a `{"userAnswers": [...]}` document.
pub(crate) fn read_answers(path: &Path) -> Result<Vec<UserAnswer>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: AnswerFile = serde_json::from_str(&raw).map_err(|err| {
        AppError::InvalidRequest(format!("{} is not a list of answers ({err})", path.display()))
    })?;
    Ok(match parsed {
        AnswerFile::Bare(answers) => answers,
        AnswerFile::Wrapped { user_answers } => user_answers,
    })
}

pub(crate) fn parse_time_filter(raw: &str) -> Result<TimeFilter, String> {
    match raw.trim() {
        "all" => Ok(TimeFilter::All),
        "5years" => Ok(TimeFilter::FiveYears),
        "2years" => Ok(TimeFilter::TwoYears),
        other => Err(format!(
            "unknown time window '{other}' (expected all, 5years or 2years)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "wahl-navigator-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn answers_accept_both_file_shapes() {
        let bare = temp_file(
            "bare.json",
            r#"[{"questionId": 1, "answer": "agree", "importance": "high"}]"#,
        );
        let wrapped = temp_file(
            "wrapped.json",
            r#"{"userAnswers": [{"questionId": 2, "answer": "skip"}]}"#,
        );

        assert_eq!(read_answers(&bare).expect("bare").len(), 1);
        assert_eq!(read_answers(&wrapped).expect("wrapped").len(), 1);

        let broken = temp_file("broken.json", r#"{"answers": 3}"#);
        assert!(matches!(
            read_answers(&broken),
            Err(AppError::InvalidRequest(_))
        ));

        for path in [bare, wrapped, broken] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn vote_sheet_overrides_seed_votes() {
        let sheet = temp_file("votes.csv", "question_id,Grüne,AfD\n9,disagree,agree\n");
        let config = DatasetConfig {
            path: None,
            votes_csv: Some(sheet.clone()),
            question_count: 0,
        };

        let dataset = load_dataset(&config).expect("dataset loads");
        let green = dataset
            .votes
            .iter()
            .find(|vote| vote.question_id.0 == 9 && vote.party_id.0 == 1)
            .expect("vote present");
        assert_eq!(green.position.label(), "disagree");
        assert!(dataset
            .votes
            .iter()
            .any(|vote| vote.question_id.0 == 9 && vote.party_id.0 == 6));

        let _ = std::fs::remove_file(sheet);
    }

    #[test]
    fn time_filter_flag_is_strict() {
        assert_eq!(parse_time_filter("5years"), Ok(TimeFilter::FiveYears));
        assert!(parse_time_filter("decade").is_err());
    }
}
