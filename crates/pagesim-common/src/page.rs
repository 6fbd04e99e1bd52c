//! Page references and identifiers.

use serde::{Deserialize, Serialize};

/// Simulation time, in ticks.
pub type Tick = u64;

/// Ticks a faulted process waits for its page to be swapped in.
pub const SWAP_LATENCY: Tick = 6;

/// Maximum number of pages retained from a single trace.
pub const MAX_PAGES_PER_TRACE: usize = 50;

/// Identifier of a simulated process.
///
/// Taken from the digits of the trace path. Used as the final
/// tie-break when two processes became ready at the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub u32);

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single instruction reference in a process trace.
///
/// Instruction `0` marks an empty frame slot and is never a valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page(u32);

impl Page {
    /// Creates a page for the given instruction, or `None` for instruction 0.
    #[inline]
    pub fn new(instruction: u32) -> Option<Self> {
        (instruction != 0).then_some(Self(instruction))
    }

    /// Returns the instruction number.
    #[inline]
    pub fn instruction(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
