use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{Question, TopicId};

/// How far back questions may reach. Unknown spellings widen to [`TimeFilter::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TimeFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "5years")]
    FiveYears,
    #[serde(rename = "2years")]
    TwoYears,
}

impl TimeFilter {
    pub const fn years_back(self) -> i32 {
        match self {
            Self::All => 10,
            Self::FiveYears => 5,
            Self::TwoYears => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::FiveYears => "5years",
            Self::TwoYears => "2years",
        }
    }

    fn admits(self, year: i32, current_year: i32) -> bool {
        year >= current_year - self.years_back()
    }
}

impl From<String> for TimeFilter {
    fn from(value: String) -> Self {
        match value.trim() {
            "5years" => Self::FiveYears,
            "2years" => Self::TwoYears,
            _ => Self::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFilters {
    pub federal: bool,
    pub state: bool,
}

impl Default for LevelFilters {
    fn default() -> Self {
        Self {
            federal: true,
            state: true,
        }
    }
}

impl LevelFilters {
    fn admits(self, is_federal: bool) -> bool {
        (self.federal && is_federal) || (self.state && !is_federal)
    }
}

/// Request-scoped question filters.
///
/// An empty `topic_filters` map places no restriction on topics; once any topic is listed only
/// the entries marked `true` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionFilters {
    pub time_filter: TimeFilter,
    pub level_filters: LevelFilters,
    pub topic_filters: BTreeMap<TopicId, bool>,
}

impl QuestionFilters {
    pub fn admits(&self, question: &Question, current_year: i32) -> bool {
        self.time_filter.admits(question.year, current_year)
            && self.level_filters.admits(question.is_federal)
            && self.admits_topic(question.topic_id)
    }

    fn admits_topic(&self, topic: TopicId) -> bool {
        self.topic_filters.is_empty() || self.topic_filters.get(&topic).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    /// Upper bound on returned questions; `0` returns every match.
    pub count: usize,
    pub randomize: bool,
}

/// Applies the filters, then shuffles and truncates per `options`.
pub fn select_questions<R: Rng + ?Sized>(
    questions: Vec<Question>,
    filters: &QuestionFilters,
    options: SelectionOptions,
    current_year: i32,
    rng: &mut R,
) -> Vec<Question> {
    let mut selected: Vec<Question> = questions
        .into_iter()
        .filter(|question| filters.admits(question, current_year))
        .collect();

    if options.randomize {
        selected.shuffle(rng);
    }
    if options.count > 0 && options.count < selected.len() {
        selected.truncate(options.count);
    }
    selected
}
