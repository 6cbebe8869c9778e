pub mod csv;
pub mod error;
pub mod report;

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tally_core::{ChannelKeywords, Classifier, SummaryTable};

pub use csv::{read_ledger, ColumnMapping};
pub use error::ImportError;
pub use report::{render_csv, write_report, ReportLabels};

/// Everything configurable about the transform: column names, channel
/// keywords, report labels. Defaults reproduce the statements this tool
/// was built around.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub columns: ColumnMapping,
    pub keywords: ChannelKeywords,
    pub labels: ReportLabels,
}

impl ProcessConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Row counts from one transform pass. `dropped` and `excluded` rows leave
/// no trace in the report itself, so callers wanting to surface the data
/// loss report them out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// Aligned data rows in the report, grand total not counted.
    pub rows: usize,
    /// Positive rows whose description matched no channel.
    pub dropped: usize,
    /// Rows skipped for a non-positive amount.
    pub excluded: usize,
}

/// Run the whole transform over an in-memory ledger: read, classify,
/// align, assemble.
pub fn summarize<R: Read>(
    data: R,
    config: &ProcessConfig,
) -> Result<(SummaryTable, ProcessOutcome), ImportError> {
    let records = read_ledger(data, &config.columns)?;
    let partition = Classifier::new(&config.keywords).partition(&records);
    let (dropped, excluded) = (partition.dropped, partition.excluded);
    let table = SummaryTable::build(partition);
    let outcome = ProcessOutcome {
        rows: table.rows.len(),
        dropped,
        excluded,
    };
    Ok((table, outcome))
}

/// File-to-file transform. The report is rendered fully in memory before
/// anything touches the output path, so a failure leaves no partial file.
pub fn process(
    input: &Path,
    output: &Path,
    config: &ProcessConfig,
) -> Result<ProcessOutcome, ImportError> {
    let file = std::fs::File::open(input)?;
    let (table, outcome) = summarize(std::io::BufReader::new(file), config)?;
    write_report(output, &table, &config.labels)?;
    tracing::info!(
        rows = outcome.rows,
        dropped = outcome.dropped,
        excluded = outcome.excluded,
        "report written to {}",
        output.display()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_data_round_trip() {
        let data = b"Description,Credit\nPHONEPE xyz,100\nHDFC IMPS,50\nSELF withdrawal,30\n";
        let (table, outcome) = summarize(data.as_ref(), &ProcessConfig::default()).unwrap();
        assert_eq!(outcome, ProcessOutcome { rows: 1, dropped: 0, excluded: 0 });
        let text = String::from_utf8(render_csv(&table, &ReportLabels::default()).unwrap()).unwrap();
        assert_eq!(
            text,
            "S.NO,PHONE PAY,SWIPE,CASH,TOTAL\n1,100,50,30,180\nTOTAL,100,50,30,180\n"
        );
    }

    #[test]
    fn unmatched_and_non_positive_rows_are_dropped() {
        let data = b"Description,Credit\nunknown vendor,20\nphonepe pay,-5\n";
        let (table, outcome) = summarize(data.as_ref(), &ProcessConfig::default()).unwrap();
        assert_eq!(outcome, ProcessOutcome { rows: 0, dropped: 1, excluded: 1 });
        let text = String::from_utf8(render_csv(&table, &ReportLabels::default()).unwrap()).unwrap();
        assert_eq!(text, "S.NO,PHONE PAY,SWIPE,CASH,TOTAL\nTOTAL,0,0,0,0\n");
    }

    #[test]
    fn ragged_channels_pad_to_rectangle() {
        let data = b"Description,Credit\nPHONEPE a,10\nPHONEPE b,20\nPHONEPE c,30\nSELF dep,5\n";
        let (table, _) = summarize(data.as_ref(), &ProcessConfig::default()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows[1].cash.is_zero());
        assert!(table.rows[2].cash.is_zero());
        assert_eq!(table.grand.cash, tally_core::Money::parse_lenient("5"));
    }

    #[test]
    fn missing_column_aborts_with_no_output() {
        let data = b"Date,Amount\n01/04,100\n";
        let err = summarize(data.as_ref(), &ProcessConfig::default()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(_)));
    }

    #[test]
    fn config_from_toml_overrides_defaults() {
        let config = ProcessConfig::from_toml(
            r#"
            [columns]
            amount_column = "Amount"

            [keywords]
            wallet = "gpay"
            bank = ["neft"]

            [labels]
            wallet = "GPAY"
            "#,
        )
        .unwrap();
        assert_eq!(config.columns.amount_column, "Amount");
        assert_eq!(config.columns.description_column, "Description");
        assert_eq!(config.keywords.wallet, "gpay");
        assert_eq!(config.keywords.cash, "self");
        assert_eq!(config.labels.wallet, "GPAY");
        assert_eq!(config.labels.serial, "S.NO");
    }

    #[test]
    fn process_writes_the_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ledger.csv");
        let output = dir.path().join("summary.csv");
        std::fs::write(&input, "Description,Credit\nPHONEPE xyz,100\nSELF dep,30\n").unwrap();

        let outcome = process(&input, &output, &ProcessConfig::default()).unwrap();
        assert_eq!(outcome.rows, 1);
        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            "S.NO,PHONE PAY,SWIPE,CASH,TOTAL\n1,100,0,30,130\nTOTAL,100,0,30,130\n"
        );
    }

    #[test]
    fn process_missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = process(
            &dir.path().join("nope.csv"),
            &dir.path().join("out.csv"),
            &ProcessConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
