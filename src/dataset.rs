//! Parsed tabular data: typed fields, records and the dataset they form

use std::{collections::HashMap, fmt, io};

use thiserror::Error;

/// Errors that can occur when turning pasted text into a `[Dataset]`
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("No input provided")]
    EmptyInput,
    #[error("Failed to parse line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// A single cell, typed once at parse time so nothing downstream has to guess
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// The row had no value for this column (short row or empty field)
    Absent,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Numbers use their shortest round-trip form, absent values render empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Absent => Ok(()),
        }
    }
}

/// Shared `Absent` returned for lookups of unknown columns
static ABSENT: FieldValue = FieldValue::Absent;

/// One data row, keyed by header column name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: String, value: FieldValue) {
        self.fields.insert(column, value);
    }

    /// Value for `column`, `Absent` if the column does not exist
    pub fn get(&self, column: &str) -> &FieldValue {
        self.fields.get(column).unwrap_or(&ABSENT)
    }

    #[cfg(test)]
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Ordered records produced by one parse. Row order is significant (e.g. quarters).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    header: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Column names in the order they appeared in the header row
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Record before the last one, if there are at least two
    pub fn second_to_last(&self) -> Option<&Record> {
        self.records.len().checked_sub(2).map(|i| &self.records[i])
    }

    /// The first header column labels the category axis
    pub fn category_column(&self) -> Option<&str> {
        self.header.first().map(String::as_str)
    }

    /// Category labels, one per record
    pub fn categories(&self) -> Vec<String> {
        match self.category_column() {
            Some(column) => self
                .records
                .iter()
                .map(|r| r.get(column).to_string())
                .collect(),
            None => vec![String::new(); self.records.len()],
        }
    }

    /// Numeric values of `column`, one per record. Non-numeric cells are `None`.
    pub fn series(&self, column: &str) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|r| r.get(column).as_number())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        let mut record = Record::new();
        for (k, v) in pairs {
            record.insert(k.to_string(), v.clone());
        }
        record
    }

    #[test]
    fn test_record_unknown_column_is_absent() {
        let r = record(&[("BAS", FieldValue::Number(1.0))]);
        assert_eq!(r.get("BAS"), &FieldValue::Number(1.0));
        assert_eq!(r.get("CNS"), &FieldValue::Absent);
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["BAS"]);
    }

    #[test]
    fn test_second_to_last() {
        let mut data = Dataset::new(vec!["Quarter".to_owned()]);
        assert!(data.second_to_last().is_none());
        data.add_record(record(&[("Quarter", FieldValue::Text("Q1".into()))]));
        assert!(data.second_to_last().is_none());
        data.add_record(record(&[("Quarter", FieldValue::Text("Q2".into()))]));
        assert_eq!(
            data.second_to_last().unwrap().get("Quarter"),
            &FieldValue::Text("Q1".into())
        );
    }

    #[test]
    fn test_categories_and_series() {
        let mut data = Dataset::new(vec!["Quarter".to_owned(), "BAS".to_owned()]);
        data.add_record(record(&[
            ("Quarter", FieldValue::Text("Q1".into())),
            ("BAS", FieldValue::Number(16.59)),
        ]));
        data.add_record(record(&[
            ("Quarter", FieldValue::Text("Q2".into())),
            ("BAS", FieldValue::Text("n/a".into())),
        ]));
        assert_eq!(data.categories(), vec!["Q1".to_owned(), "Q2".to_owned()]);
        assert_eq!(data.series("BAS"), vec![Some(16.59), None]);
        assert_eq!(data.series("ATS"), vec![None, None]);
    }

    #[test]
    fn test_field_display() {
        assert_eq!(FieldValue::Number(2024.0).to_string(), "2024");
        assert_eq!(FieldValue::Number(16.5).to_string(), "16.5");
        assert_eq!(FieldValue::Text("Q1".into()).to_string(), "Q1");
        assert_eq!(FieldValue::Absent.to_string(), "");
        // record cells keep their precision, unlike the two-decimal summaries
        assert_eq!(FieldValue::Number(0.004).to_string(), "0.004");
        assert_eq!(FieldValue::Number(1.005).to_string(), "1.005");
    }
}
