use serde::{Deserialize, Serialize};
use std::io::Read;

use tally_core::{LedgerRecord, Money};

use crate::error::ImportError;

/// Names of the two required columns in the input ledger. Everything else
/// in the file is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub amount_column: String,
    pub description_column: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            amount_column: "Credit".to_string(),
            description_column: "Description".to_string(),
        }
    }
}

/// Read ledger rows from CSV, cleaning amounts as they come in.
///
/// The header row is required and both mapped columns must be present
/// (matched case-insensitively); anything else fails the whole read.
/// Short rows yield absent fields, not errors.
pub fn read_ledger<R: Read>(
    data: R,
    mapping: &ColumnMapping,
) -> Result<Vec<LedgerRecord>, ImportError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let amount_idx = find(&mapping.amount_column)
        .ok_or_else(|| ImportError::MissingColumn(mapping.amount_column.clone()))?;
    let description_idx = find(&mapping.description_column)
        .ok_or_else(|| ImportError::MissingColumn(mapping.description_column.clone()))?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.is_empty() {
            continue;
        }
        records.push(LedgerRecord {
            amount: Money::parse_lenient(record.get(amount_idx).unwrap_or_default()),
            description: record.get(description_idx).map(|s| s.to_string()),
        });
    }

    Ok(records)
}
