use serde::Serialize;

use crate::channel::Partition;
use crate::money::Money;

/// Pad the three sequences with zeros so they all share the longest
/// length. Pure; the inputs are consumed rather than mutated in place.
pub fn align(
    mut wallet: Vec<Money>,
    mut bank: Vec<Money>,
    mut cash: Vec<Money>,
) -> (Vec<Money>, Vec<Money>, Vec<Money>) {
    let len = wallet.len().max(bank.len()).max(cash.len());
    wallet.resize(len, Money::zero());
    bank.resize(len, Money::zero());
    cash.resize(len, Money::zero());
    (wallet, bank, cash)
}

/// One aligned data row: 1-based serial, the three channel values, and
/// their row total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    pub serial: usize,
    pub wallet: Money,
    pub bank: Money,
    pub cash: Money,
    pub total: Money,
}

/// Column-wise sums over every data row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrandTotal {
    pub wallet: Money,
    pub bank: Money,
    pub cash: Money,
    pub total: Money,
}

/// The assembled report: aligned data rows plus exactly one grand-total
/// row, kept apart so renderers decide how to label it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
    pub grand: GrandTotal,
}

impl SummaryTable {
    pub fn build(partition: Partition) -> Self {
        let (wallet, bank, cash) = align(partition.wallet, partition.bank, partition.cash);
        let rows: Vec<SummaryRow> = wallet
            .iter()
            .zip(&bank)
            .zip(&cash)
            .enumerate()
            .map(|(i, ((&w, &b), &c))| SummaryRow {
                serial: i + 1,
                wallet: w,
                bank: b,
                cash: c,
                total: w + b + c,
            })
            .collect();
        let grand = GrandTotal {
            wallet: rows.iter().map(|r| r.wallet).sum(),
            bank: rows.iter().map(|r| r.bank).sum(),
            cash: rows.iter().map(|r| r.cash).sum(),
            total: rows.iter().map(|r| r.total).sum(),
        };
        SummaryTable { rows, grand }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn m(s: &str) -> Money {
        Money::from_decimal(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn align_pads_shorter_sequences_with_zeros() {
        let (w, b, c) = align(vec![m("1"), m("2"), m("3")], vec![m("4")], vec![]);
        assert_eq!(w.len(), 3);
        assert_eq!(b, vec![m("4"), Money::zero(), Money::zero()]);
        assert_eq!(c, vec![Money::zero(); 3]);
    }

    #[test]
    fn align_of_empty_sequences_is_empty() {
        let (w, b, c) = align(vec![], vec![], vec![]);
        assert!(w.is_empty() && b.is_empty() && c.is_empty());
    }

    #[test]
    fn build_totals_each_row() {
        let table = SummaryTable::build(Partition {
            wallet: vec![m("100"), m("200.50")],
            bank: vec![m("50")],
            cash: vec![m("30")],
            ..Partition::default()
        });
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].serial, 1);
        assert_eq!(table.rows[0].total, m("180"));
        assert_eq!(table.rows[1].serial, 2);
        assert_eq!(table.rows[1].wallet, m("200.50"));
        assert_eq!(table.rows[1].bank, Money::zero());
        assert_eq!(table.rows[1].total, m("200.50"));
    }

    #[test]
    fn grand_total_sums_columns_and_row_totals() {
        let table = SummaryTable::build(Partition {
            wallet: vec![m("100"), m("200")],
            bank: vec![m("50"), m("25")],
            cash: vec![m("30")],
            ..Partition::default()
        });
        assert_eq!(table.grand.wallet, m("300"));
        assert_eq!(table.grand.bank, m("75"));
        assert_eq!(table.grand.cash, m("30"));
        assert_eq!(table.grand.total, m("405"));
        let row_totals: Money = table.rows.iter().map(|r| r.total).sum();
        assert_eq!(table.grand.total, row_totals);
    }

    #[test]
    fn empty_partition_builds_zero_grand_total() {
        let table = SummaryTable::build(Partition::default());
        assert!(table.rows.is_empty());
        assert!(table.grand.wallet.is_zero());
        assert!(table.grand.total.is_zero());
    }
}
