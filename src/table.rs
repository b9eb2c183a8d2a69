//! Rectangular string tables in and scored tables out.

use serde::{Deserialize, Serialize};

use crate::config::Metric;
use crate::error::{MetricsError, Result};
use crate::score::RowScores;
use crate::script;

/// Headers of the single-row table built from manually entered text.
pub const MANUAL_REFERENCE_COLUMN: &str = "original_text";
pub const MANUAL_CANDIDATE_COLUMN: &str = "another_text";

/// A table of string cells; every row has one cell per header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

// Unchecked wire form; deserialised rows go through `push_row`.
#[derive(Deserialize)]
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for Table {
    type Error = MetricsError;

    fn try_from(raw: RawTable) -> Result<Self> {
        Table::from_rows(raw.headers, raw.rows)
    }
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: vec![],
        }
    }

    pub fn from_rows<I, S>(headers: I, rows: Vec<Vec<String>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// The one-row table for an original/translated pair typed in by hand.
    pub fn from_manual(original: &str, translated: &str) -> Self {
        Self {
            headers: vec![
                MANUAL_REFERENCE_COLUMN.to_string(),
                MANUAL_CANDIDATE_COLUMN.to_string(),
            ],
            rows: vec![vec![original.to_string(), translated.to_string()]],
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(MetricsError::RaggedRow {
                row: self.rows.len(),
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MetricsError::MissingColumn(name.to_string()))
    }

    /// Whether any cell of the named columns contains a Han character.
    pub fn has_han(&self, columns: &[&str]) -> Result<bool> {
        let indices = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(script::has_han(
            self.rows
                .iter()
                .flat_map(|row| indices.iter().map(move |&i| row[i].as_str())),
        ))
    }
}

/// The input table with the four metric columns appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTable {
    table: Table,
    scores: Vec<RowScores>,
}

impl ScoredTable {
    pub(crate) fn new(table: Table, scores: Vec<RowScores>) -> Self {
        debug_assert_eq!(table.len(), scores.len());
        Self { table, scores }
    }

    /// Input headers followed by `BLEU`, `CHRF`, `TER`, `SemanticSim`.
    pub fn headers(&self) -> Vec<&str> {
        self.table
            .headers()
            .iter()
            .map(String::as_str)
            .chain(Metric::ALL.iter().map(|m| m.column_name()))
            .collect()
    }

    /// The caller's cells, untouched.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn scores(&self) -> &[RowScores] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn metric_column(&self, metric: Metric) -> Vec<f64> {
        self.scores.iter().map(|s| s.get(metric)).collect()
    }

    /// Every row rendered as strings, metric values last.
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.table
            .rows()
            .iter()
            .zip(&self.scores)
            .map(|(cells, scores)| {
                cells
                    .iter()
                    .cloned()
                    .chain(scores.iter().map(|(_, v)| v.to_string()))
                    .collect()
            })
            .collect()
    }

    /// The augmented table as CSV with a header line.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(self.headers())?;
        for row in self.to_string_rows() {
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| MetricsError::Io(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
