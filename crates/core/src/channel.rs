use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Settlement channel a credit is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Digital wallet receipts.
    Wallet,
    /// Card-swipe and bank-transfer receipts.
    Bank,
    /// Cash deposited by the account holder.
    Cash,
}

/// One row read from the input ledger: the cleaned credit amount and the
/// free-text description it came with (absent when the cell was missing).
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    pub amount: Money,
    pub description: Option<String>,
}

/// Lowercase, letters-only projection of a description, used solely for
/// keyword containment checks. Missing text maps to the empty string.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(t) => t.to_lowercase().chars().filter(char::is_ascii_lowercase).collect(),
        None => String::new(),
    }
}

/// Keyword sets identifying each channel, matched against normalized
/// descriptions. Defaults fit the statement exports this tool grew up on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelKeywords {
    pub wallet: String,
    pub bank: Vec<String>,
    pub cash: String,
}

impl Default for ChannelKeywords {
    fn default() -> Self {
        ChannelKeywords {
            wallet: "phonepe".to_string(),
            bank: vec![
                "india transact".to_string(),
                "hdfc".to_string(),
                "imps".to_string(),
            ],
            cash: "self".to_string(),
        }
    }
}

/// Classifier with its keywords normalized once up front.
#[derive(Debug, Clone)]
pub struct Classifier {
    wallet: String,
    bank: Vec<String>,
    cash: String,
}

impl Classifier {
    pub fn new(keywords: &ChannelKeywords) -> Self {
        Classifier {
            wallet: normalize(Some(&keywords.wallet)),
            bank: keywords.bank.iter().map(|k| normalize(Some(k))).collect(),
            cash: normalize(Some(&keywords.cash)),
        }
    }

    /// Assign a record to at most one channel. Non-positive amounts are
    /// excluded outright; otherwise the first keyword match wins, checked
    /// in wallet, bank, cash order; anything else matches no channel.
    pub fn classify(&self, record: &LedgerRecord) -> Option<Channel> {
        if !record.amount.is_positive() {
            return None;
        }
        let desc = normalize(record.description.as_deref());
        if desc.contains(self.wallet.as_str()) {
            Some(Channel::Wallet)
        } else if self.bank.iter().any(|k| desc.contains(k.as_str())) {
            Some(Channel::Bank)
        } else if desc.contains(self.cash.as_str()) {
            Some(Channel::Cash)
        } else {
            None
        }
    }

    /// Single pass over the ledger, splitting credits into per-channel
    /// sequences while preserving input order.
    pub fn partition(&self, records: &[LedgerRecord]) -> Partition {
        let mut partition = Partition::default();
        for record in records {
            match self.classify(record) {
                Some(Channel::Wallet) => partition.wallet.push(record.amount),
                Some(Channel::Bank) => partition.bank.push(record.amount),
                Some(Channel::Cash) => partition.cash.push(record.amount),
                None if !record.amount.is_positive() => partition.excluded += 1,
                None => partition.dropped += 1,
            }
        }
        partition
    }
}

/// Per-channel credit sequences plus counts of the rows that contributed
/// to none of them. The counts never appear in the report; they exist so
/// callers can surface silently dropped data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub wallet: Vec<Money>,
    pub bank: Vec<Money>,
    pub cash: Vec<Money>,
    /// Positive rows whose description matched no keyword set.
    pub dropped: usize,
    /// Rows skipped for a non-positive amount.
    pub excluded: usize,
}
