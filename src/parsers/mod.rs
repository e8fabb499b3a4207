//! Parsers turning pasted delimited text into a `[Dataset]`

use log::{debug, trace};

use crate::dataset::{DashboardError, Dataset, Record};

pub mod delimited;
pub mod inference;

use delimited::DelimitedParser;
use inference::infer_field;

/// Trait for parsing input strings into table rows
pub trait Parser: Send + Sync {
    /// Parses one line of input into a row (does not distinguish between header or data)
    fn parse(&self, input: &str) -> Result<TableRow, DashboardError>;
    #[cfg(test)]
    /// Returns the delimiter used by the parser
    fn delimiter(&self) -> Option<char>;
}

/// Represents one split line, before any typing of its cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

/// Parses comma separated text. The first line is the header, every later non-blank line a record.
pub fn parse_dataset(raw: &str) -> Result<Dataset, DashboardError> {
    parse_dataset_with(&DelimitedParser::comma(), raw)
}

/// Parses `raw` with the row splitter `parser`
fn parse_dataset_with(parser: &dyn Parser, raw: &str) -> Result<Dataset, DashboardError> {
    if raw.trim().is_empty() {
        return Err(DashboardError::EmptyInput);
    }

    let mut lines = raw.split('\n');
    // `split` always yields at least one item
    let header_line = lines.next().unwrap_or_default();
    if header_line.trim().is_empty() {
        return Err(DashboardError::Parse {
            line: 1,
            reason: "header row is blank".to_string(),
        });
    }
    let header = parser.parse(header_line)?.into_cells();
    debug!("Parsed header: {:?}", header);

    let mut dataset = Dataset::new(header);
    for (idx, line) in lines.enumerate() {
        // blank lines are dropped wherever they appear
        if line.trim().is_empty() {
            trace!("Skipping blank line {}", idx + 2);
            continue;
        }
        let row = parser.parse(line).map_err(|e| match e {
            DashboardError::Parse { reason, .. } => DashboardError::Parse {
                line: idx + 2,
                reason,
            },
            e => e,
        })?;
        let cells = row.cells();
        let mut record = Record::new();
        for (col_idx, column) in dataset.header().iter().enumerate() {
            let value = infer_field(cells.get(col_idx).map(String::as_str));
            record.insert(column.clone(), value);
        }
        dataset.add_record(record);
    }
    debug!(
        "Parsed {} records with {} columns",
        dataset.len(),
        dataset.header().len()
    );
    Ok(dataset)
}

/// Sample data offered by the "Load Sample" action
pub const SAMPLE_DATA: &str = "Quarter,BAS,ATS,RAS,CNS
Q1,16.59,14.95,14.13,13.92
Q2,19.48,14.18,11.55,10.90
Q3,26.16,16.53,13.08,10.48
Q4,35.55,20.07,16.08,12.18";
