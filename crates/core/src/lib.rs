pub mod channel;
pub mod money;
pub mod summary;

pub use channel::{normalize, Channel, ChannelKeywords, Classifier, LedgerRecord, Partition};
pub use money::Money;
pub use summary::{align, GrandTotal, SummaryRow, SummaryTable};
