use serde::{Deserialize, Serialize};
use std::path::Path;

use tally_core::SummaryTable;

use crate::error::ImportError;

/// Column labels for the generated report. The grand-total row reuses the
/// total label as its serial-cell sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub serial: String,
    pub wallet: String,
    pub bank: String,
    pub cash: String,
    pub total: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        ReportLabels {
            serial: "S.NO".to_string(),
            wallet: "PHONE PAY".to_string(),
            bank: "SWIPE".to_string(),
            cash: "CASH".to_string(),
            total: "TOTAL".to_string(),
        }
    }
}

/// Serialize the report fully in memory: header, data rows, grand total.
/// Column order is fixed: serial, wallet, bank, cash, total.
pub fn render_csv(table: &SummaryTable, labels: &ReportLabels) -> Result<Vec<u8>, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        &labels.serial,
        &labels.wallet,
        &labels.bank,
        &labels.cash,
        &labels.total,
    ])?;
    for row in &table.rows {
        writer.write_record([
            row.serial.to_string(),
            row.wallet.to_string(),
            row.bank.to_string(),
            row.cash.to_string(),
            row.total.to_string(),
        ])?;
    }
    let grand = &table.grand;
    writer.write_record([
        labels.total.clone(),
        grand.wallet.to_string(),
        grand.bank.to_string(),
        grand.cash.to_string(),
        grand.total.to_string(),
    ])?;

    writer.into_inner().map_err(|e| ImportError::Io(e.into_error()))
}

/// Render, then commit to disk in one write so a failed transform never
/// leaves a partial report behind.
pub fn write_report(
    path: impl AsRef<Path>,
    table: &SummaryTable,
    labels: &ReportLabels,
) -> Result<(), ImportError> {
    let rendered = render_csv(table, labels)?;
    std::fs::write(path, rendered)?;
    Ok(())
}
