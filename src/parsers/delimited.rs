//! Parses an input line where cells are separated by a delimiter
//!
//! There is no quoting or escaping: every delimiter splits, including ones a human would read as
//! part of a value.

use log::trace;

use crate::dataset::DashboardError;

use super::{Parser, TableRow};

/// Parser for character separated input
pub struct DelimitedParser {
    delimiter: char,
}

impl DelimitedParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn comma() -> Self {
        Self::new(',')
    }
}

impl Parser for DelimitedParser {
    fn parse(&self, input: &str) -> Result<TableRow, DashboardError> {
        let table_row = TableRow::new(
            input
                .split(self.delimiter)
                .map(|s| s.trim().to_string())
                .collect(),
        );
        trace!("Parsed row: {:?}", table_row);
        Ok(table_row)
    }

    #[cfg(test)]
    fn delimiter(&self) -> Option<char> {
        Some(self.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_trim() {
        let parser = DelimitedParser::comma();
        assert_eq!(parser.delimiter(), Some(','));
        let row = parser.parse(" Q1 , 16.59,14.95 \r").unwrap();
        assert_eq!(row.cells(), &["Q1", "16.59", "14.95"]);
    }

    #[test]
    fn test_no_quoting() {
        // quotes are plain characters, embedded commas still split
        let row = DelimitedParser::comma().parse("\"a,b\",c").unwrap();
        assert_eq!(row.cells(), &["\"a", "b\"", "c"]);
    }

    #[test]
    fn test_line_without_delimiter_is_one_cell() {
        let row = DelimitedParser::comma().parse("Q1").unwrap();
        assert_eq!(row.cells(), &["Q1"]);
    }

    #[test]
    fn test_other_delimiter() {
        let row = DelimitedParser::new(':').parse("root:x:0").unwrap();
        assert_eq!(row.cells(), &["root", "x", "0"]);
    }
}
