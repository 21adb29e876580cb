use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a policy area.
    TopicId
);
id_type!(
    /// Identifier of a federal or state parliament.
    ParliamentId
);
id_type!(
    /// Identifier of a political party.
    PartyId
);
id_type!(
    /// Identifier of a recorded parliamentary vote used as a survey prompt.
    QuestionId
);

/// Policy area used to group questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parliament {
    pub id: ParliamentId,
    pub name: String,
    pub short_name: String,
    pub is_federal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub short_name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// One parliamentary vote event, phrased as a survey prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub topic_id: TopicId,
    pub parliament_id: ParliamentId,
    pub is_federal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub year: i32,
    pub agree_text: String,
    pub disagree_text: String,
    #[serde(default)]
    pub detailed_info: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub source_description: String,
}

/// A party's recorded stance on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Agree,
    Disagree,
    Neutral,
}

impl Position {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Agree => "agree",
            Self::Disagree => "disagree",
            Self::Neutral => "neutral",
        }
    }

    /// Parses the spellings found in published vote tables.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "agree" | "yes" | "ja" | "for" => Some(Self::Agree),
            "disagree" | "no" | "nein" | "against" => Some(Self::Disagree),
            "neutral" | "abstain" | "enthaltung" => Some(Self::Neutral),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub question_id: QuestionId,
    pub party_id: PartyId,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The user's response to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Agree,
    Neutral,
    Disagree,
    Skip,
}

impl Answer {
    /// The position the answer takes, `None` for skipped questions.
    pub const fn stance(self) -> Option<Position> {
        match self {
            Self::Agree => Some(Position::Agree),
            Self::Neutral => Some(Position::Neutral),
            Self::Disagree => Some(Position::Disagree),
            Self::Skip => None,
        }
    }
}

/// User-assigned weight category. Anything other than `"low"` or `"high"`, including `null` and
/// non-string values, counts as medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    pub const fn weight(self) -> f64 {
        match self {
            Self::Low => 0.5,
            Self::Medium => 1.0,
            Self::High => 2.0,
        }
    }
}

impl From<serde_json::Value> for Importance {
    fn from(value: serde_json::Value) -> Self {
        let label = value.as_str().map(|raw| raw.trim().to_ascii_lowercase());
        match label.as_deref() {
            Some("low") => Self::Low,
            Some("high") => Self::High,
            _ => Self::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: QuestionId,
    pub answer: Answer,
    #[serde(default)]
    pub importance: Importance,
}
