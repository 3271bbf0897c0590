//! Survey input parsing.
//!
//! One delimited record per statement: identifier (or nothing, for
//! row-index identifiers), stance label as free text, raw weight as decimal
//! text. Column positions and the delimiter come from [`InputConfig`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::{IdentifierSource, InputConfig};
use crate::types::{LabelSet, Statement};
use crate::{Result, StancemapError};

/// Read a party's statements from a file.
pub fn read_statements(path: &Path, input: &InputConfig, labels: LabelSet) -> Result<Vec<Statement>> {
    let file = File::open(path)?;
    parse_statements(file, input, labels)
}

/// Parse statements from any reader.
///
/// Fields are trimmed and blank lines skipped. Row-index identifiers count
/// data rows from zero (`statement0`, `statement1`, ...).
pub fn parse_statements<R: Read>(
    reader: R,
    input: &InputConfig,
    labels: LabelSet,
) -> Result<Vec<Statement>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(input.delimiter.as_byte())
        .has_headers(input.has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut statements = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 1, |p| p.line());

        let identifier = match input.identifiers {
            IdentifierSource::Column => {
                let id = field(&record, input.identifier_column, "identifier", line)?;
                if id.is_empty() {
                    return Err(StancemapError::InvalidRecord {
                        line,
                        reason: "empty identifier".to_string(),
                    });
                }
                id.to_owned()
            }
            IdentifierSource::RowIndex => format!("statement{row}"),
        };

        let stance = labels.parse(field(&record, input.stance_column, "stance", line)?)?;

        let raw = field(&record, input.weight_column, "weight", line)?;
        let importance = raw.parse::<f64>().map_err(|e| StancemapError::InvalidRecord {
            line,
            reason: format!("weight {raw:?}: {e}"),
        })?;

        statements.push(Statement {
            identifier,
            stance,
            importance,
        });
    }
    Ok(statements)
}

fn field<'r>(record: &'r StringRecord, column: usize, what: &str, line: u64) -> Result<&'r str> {
    record.get(column).ok_or_else(|| StancemapError::InvalidRecord {
        line,
        reason: format!("missing {what} (column {column})"),
    })
}
