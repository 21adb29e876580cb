//! Import of published vote tables: one row per question, one column per party.

mod normalizer;
mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use super::domain::{Party, PartyId, Position, QuestionId, Vote};
use normalizer::normalize_label;

#[derive(Debug)]
pub enum VoteSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingQuestionColumn,
    InvalidQuestionId { line: u64, value: String },
    InvalidPosition { line: u64, party: String, value: String },
}

impl std::fmt::Display for VoteSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteSheetImportError::Io(err) => write!(f, "failed to read vote sheet: {}", err),
            VoteSheetImportError::Csv(err) => write!(f, "invalid vote sheet CSV: {}", err),
            VoteSheetImportError::MissingQuestionColumn => {
                write!(f, "vote sheet has no question_id column")
            }
            VoteSheetImportError::InvalidQuestionId { line, value } => {
                write!(f, "line {line}: '{value}' is not a question id")
            }
            VoteSheetImportError::InvalidPosition { line, party, value } => write!(
                f,
                "line {line}: '{value}' is not a position for party '{party}'"
            ),
        }
    }
}

impl std::error::Error for VoteSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VoteSheetImportError::Io(err) => Some(err),
            VoteSheetImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VoteSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for VoteSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Turns a vote sheet into [`Vote`] records for the given party roster.
pub struct VoteSheetImporter;

impl VoteSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        parties: &[Party],
    ) -> Result<Vec<Vote>, VoteSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, parties)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        parties: &[Party],
    ) -> Result<Vec<Vote>, VoteSheetImportError> {
        let sheet = parser::parse_sheet(reader)?;
        let roster = party_roster(parties);

        let columns: Vec<(usize, &str, PartyId)> = sheet
            .party_columns
            .iter()
            .filter_map(|(index, label)| match roster.get(label.as_str()) {
                Some(party_id) => Some((*index, label.as_str(), *party_id)),
                None => {
                    debug!(column = %label, "ignoring vote sheet column without matching party");
                    None
                }
            })
            .collect();

        let mut votes = Vec::new();
        for row in &sheet.rows {
            let question_id = row.question.parse::<u32>().map(QuestionId).map_err(|_| {
                VoteSheetImportError::InvalidQuestionId {
                    line: row.line,
                    value: row.question.clone(),
                }
            })?;

            for (index, label, party_id) in &columns {
                let cell = row.cells.get(*index).map(String::as_str).unwrap_or_default();
                if cell.is_empty() {
                    continue;
                }
                let position = Position::from_label(cell).ok_or_else(|| {
                    VoteSheetImportError::InvalidPosition {
                        line: row.line,
                        party: label.to_string(),
                        value: cell.to_string(),
                    }
                })?;
                votes.push(Vote {
                    question_id,
                    party_id: *party_id,
                    position,
                    details: None,
                });
            }
        }

        Ok(votes)
    }
}

/// Short names win over full names when both normalize to the same label.
fn party_roster(parties: &[Party]) -> HashMap<String, PartyId> {
    let mut roster = HashMap::new();
    for party in parties {
        roster
            .entry(normalize_label(&party.name))
            .or_insert(party.id);
    }
    for party in parties {
        roster.insert(normalize_label(&party.short_name), party.id);
    }
    roster
}
