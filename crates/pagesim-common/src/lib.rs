//! Common types, errors, and configuration for the paging simulator.
//!
//! This crate provides the value types shared by the scheduling engine,
//! the workload loader, and the command-line front end.

pub mod config;
pub mod error;
pub mod page;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use page::{MAX_PAGES_PER_TRACE, Page, ProcessId, SWAP_LATENCY, Tick};
