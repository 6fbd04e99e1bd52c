//! Scheduling and paging engine for the simulator.
//!
//! This crate provides:
//! - Fixed-capacity per-process frame tables with reference bits
//! - LRU (admission-order) and Clock (second-chance) replacement
//! - Round-robin selection order with a fairness rule for preempted processes
//! - A tick-driven scheduler with page-fault blocking and quantum preemption
//! - Sorted per-policy reports

mod engine;
mod frame;
mod order;
mod policy;
mod process;
mod report;

pub use engine::{EngineConfig, Event, Scheduler};
pub use frame::{Frame, FrameTable, SweepOutcome};
pub use order::{SchedKey, select_next};
pub use policy::{Admission, ReplacementPolicy};
pub use process::{Process, ProcessState};
pub use report::{ProcessSummary, REPORT_SEPARATOR, Report, render_comparison};
