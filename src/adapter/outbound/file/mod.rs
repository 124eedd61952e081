//! File-backed inputs and outputs: the fusion table, shard metadata, bazaar
//! snapshots and profit reports.

pub mod fusion_table;
pub mod metadata;
pub mod report;
pub mod snapshot;

pub use fusion_table::{parse_fusion_table, read_fusion_table};
pub use metadata::{parse_metadata, read_metadata};
pub use report::write_report;
pub use snapshot::SnapshotFile;
