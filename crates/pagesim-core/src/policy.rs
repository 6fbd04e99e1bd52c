//! Page replacement policies.

use crate::frame::FrameTable;
use pagesim_common::Page;
use serde::{Deserialize, Serialize};

/// Outcome of admitting a page into a process's frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The page was already resident; nothing moved.
    Resident,
    /// The page was installed into a free slot.
    Installed { slot: usize },
    /// The page replaced `victim` in `slot`.
    Evicted { slot: usize, victim: Page },
}

/// Replacement policy used by a scheduler run.
///
/// Each variant only decides how a page enters a process's frame table;
/// scheduling is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    /// Evicts the slot that was filled earliest. Hits do not reorder slots,
    /// so recency is approximated by admission order.
    Lru,
    /// Second-chance sweep over reference bits, starting at slot 0.
    Clock,
}

impl ReplacementPolicy {
    /// All policies, in report order.
    pub const ALL: [ReplacementPolicy; 2] = [ReplacementPolicy::Lru, ReplacementPolicy::Clock];

    /// Report header label.
    pub fn label(&self) -> &'static str {
        match self {
            ReplacementPolicy::Lru => "LRU - Fixed",
            ReplacementPolicy::Clock => "Clock - Fixed",
        }
    }

    /// Admits `page` into `frames` ahead of executing it.
    pub fn admit(&self, frames: &mut FrameTable, page: Page) -> Admission {
        match self {
            ReplacementPolicy::Lru => admit_lru(frames, page),
            ReplacementPolicy::Clock => admit_clock(frames, page),
        }
    }
}

impl std::fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplacementPolicy::Lru => write!(f, "lru"),
            ReplacementPolicy::Clock => write!(f, "clock"),
        }
    }
}

impl std::str::FromStr for ReplacementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(ReplacementPolicy::Lru),
            "clock" => Ok(ReplacementPolicy::Clock),
            other => Err(format!("unknown replacement policy: {other}")),
        }
    }
}

fn admit_lru(frames: &mut FrameTable, page: Page) -> Admission {
    if frames.is_full() {
        if frames.contains(page) {
            return Admission::Resident;
        }
        return match frames.shift_in(page) {
            Some(victim) => Admission::Evicted {
                slot: frames.capacity() - 1,
                victim,
            },
            None => Admission::Resident,
        };
    }
    match frames.fill_first_empty(page, false) {
        Some(slot) => Admission::Installed { slot },
        None => Admission::Resident,
    }
}

fn admit_clock(frames: &mut FrameTable, page: Page) -> Admission {
    if frames.is_full() {
        if frames.touch(page) {
            return Admission::Resident;
        }
        return match frames.sweep_replace(page, 0) {
            Some(outcome) => Admission::Evicted {
                slot: outcome.slot,
                victim: outcome.victim,
            },
            None => Admission::Resident,
        };
    }
    match frames.fill_first_empty(page, true) {
        Some(slot) => Admission::Installed { slot },
        None => Admission::Resident,
    }
}
