//! Round-robin selection order.

use pagesim_common::{ProcessId, Tick};

/// Scheduling fields compared when picking the next process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedKey {
    pub id: ProcessId,
    pub ready_time: Tick,
    pub last_exit_time: Tick,
}

impl SchedKey {
    /// Returns true if `self` should be chosen before `other`.
    ///
    /// A process that has already left the CPU (`last_exit_time != 0`) defers
    /// to any process that was ready by the time it left, so a preempted
    /// process rejoins behind the ones that were already waiting. Otherwise
    /// the earlier `ready_time` wins and ties go to the lower id.
    ///
    /// This is not symmetric: two processes may each decline to precede the
    /// other, in which case the scan in [`select_next`] keeps the earlier one.
    pub fn precedes(&self, other: &SchedKey) -> bool {
        if self.last_exit_time != 0 && other.ready_time <= self.last_exit_time {
            return false;
        }
        (self.ready_time, self.id) < (other.ready_time, other.id)
    }
}

/// Picks the next candidate by a linear scan under [`SchedKey::precedes`].
///
/// The first candidate is kept unless a later one precedes the current pick.
/// Returns the position of the pick within the iteration order.
pub fn select_next<I>(candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = SchedKey>,
{
    let mut best: Option<(usize, SchedKey)> = None;
    for (position, key) in candidates.into_iter().enumerate() {
        match best {
            None => best = Some((position, key)),
            Some((_, current)) if key.precedes(&current) => best = Some((position, key)),
            Some(_) => {}
        }
    }
    best.map(|(position, _)| position)
}
