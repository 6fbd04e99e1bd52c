//! Workload loading for the paging simulator.
//!
//! This crate provides:
//! - Trace file parsing with a per-trace page limit
//! - Process id extraction from trace paths
//! - Workload assembly and per-policy simulation runs

mod trace;
mod workload;

pub use trace::{Trace, TraceScan, process_id_from_path, scan_trace};
pub use workload::Workload;
