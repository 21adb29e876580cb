use std::io::Read;

use super::normalizer::normalize_label;
use super::VoteSheetImportError;

const QUESTION_COLUMNS: &[&str] = &["question_id", "questionid", "question", "frage", "id"];

/// A raw sheet: the party column labels and one row of cells per question.
#[derive(Debug)]
pub(crate) struct VoteSheet {
    pub(crate) party_columns: Vec<(usize, String)>,
    pub(crate) rows: Vec<SheetRow>,
}

#[derive(Debug)]
pub(crate) struct SheetRow {
    pub(crate) line: u64,
    pub(crate) question: String,
    pub(crate) cells: Vec<String>,
}

pub(crate) fn parse_sheet<R: Read>(reader: R) -> Result<VoteSheet, VoteSheetImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let question_column = headers
        .iter()
        .position(|header| QUESTION_COLUMNS.contains(&normalize_label(header).as_str()))
        .ok_or(VoteSheetImportError::MissingQuestionColumn)?;

    let party_columns = headers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != question_column)
        .map(|(index, header)| (index, normalize_label(header)))
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let question = record.get(question_column).unwrap_or_default().to_string();
        if question.is_empty() {
            continue;
        }
        rows.push(SheetRow {
            line,
            question,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(VoteSheet {
        party_columns,
        rows,
    })
}
