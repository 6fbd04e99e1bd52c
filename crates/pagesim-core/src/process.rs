//! Simulated process state.

use crate::frame::FrameTable;
use crate::order::SchedKey;
use pagesim_common::{Page, ProcessId, Tick};
use std::collections::VecDeque;

/// Scheduling state of a process.
///
/// A process is in exactly one state at any tick. `New` only exists during
/// the initial dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    New,
    Ready,
    Blocked,
    Running,
    Finished,
}

/// A process executing a fixed trace of page references.
#[derive(Debug, Clone)]
pub struct Process {
    id: ProcessId,
    name: String,
    pub(crate) frames: FrameTable,
    pending: VecDeque<Page>,
    fault_times: Vec<Tick>,
    ready_time: Tick,
    last_exit_time: Tick,
    run_length: u32,
    turnaround_time: Tick,
}

impl Process {
    /// Creates a process with empty frames and the given trace.
    pub fn new(
        id: ProcessId,
        name: impl Into<String>,
        frame_capacity: usize,
        pages: impl IntoIterator<Item = Page>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            frames: FrameTable::new(frame_capacity),
            pending: pages.into_iter().collect(),
            fault_times: Vec::new(),
            ready_time: 0,
            last_exit_time: 0,
            run_length: 0,
            turnaround_time: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Returns the next page to execute.
    #[inline]
    pub fn current_page(&self) -> Option<Page> {
        self.pending.front().copied()
    }

    /// Returns the number of pages not yet executed.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Ticks at which this process faulted, in order.
    #[inline]
    pub fn fault_times(&self) -> &[Tick] {
        &self.fault_times
    }

    /// Tick at which the process becomes ready after its last fault.
    #[inline]
    pub fn ready_time(&self) -> Tick {
        self.ready_time
    }

    /// Tick at which the process last left the CPU (fault or preemption).
    /// Zero until the first exit after tick 0.
    #[inline]
    pub fn last_exit_time(&self) -> Tick {
        self.last_exit_time
    }

    /// Consecutive ticks executed since the last dispatch.
    #[inline]
    pub fn run_length(&self) -> u32 {
        self.run_length
    }

    /// Tick after the last instruction executed. Zero until finished.
    #[inline]
    pub fn turnaround_time(&self) -> Tick {
        self.turnaround_time
    }

    /// Snapshot used by the selection order.
    #[inline]
    pub fn sched_key(&self) -> SchedKey {
        SchedKey {
            id: self.id,
            ready_time: self.ready_time,
            last_exit_time: self.last_exit_time,
        }
    }

    /// Consumes the head page after a hit.
    pub(crate) fn complete_instruction(&mut self) {
        self.run_length += 1;
        self.pending.pop_front();
    }

    pub(crate) fn record_fault(&mut self, tick: Tick, swap_latency: Tick) {
        self.fault_times.push(tick);
        self.last_exit_time = tick;
        self.ready_time = tick + swap_latency;
        self.run_length = 0;
    }

    pub(crate) fn preempt(&mut self, tick: Tick) {
        self.last_exit_time = tick;
        self.run_length = 0;
    }

    pub(crate) fn finish(&mut self, turnaround_time: Tick) {
        self.turnaround_time = turnaround_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(list: &[u32]) -> Vec<Page> {
        list.iter().map(|&n| Page::new(n).unwrap()).collect()
    }

    #[test]
    fn test_new_process() {
        let process = Process::new(ProcessId(3), "process3.txt", 2, pages(&[4, 5]));
        assert_eq!(process.id(), ProcessId(3));
        assert_eq!(process.name(), "process3.txt");
        assert_eq!(process.frames().capacity(), 2);
        assert_eq!(process.frames().resident_count(), 0);
        assert_eq!(process.current_page(), Page::new(4));
        assert_eq!(process.pending_len(), 2);
        assert!(process.fault_times().is_empty());
        assert_eq!(process.ready_time(), 0);
        assert_eq!(process.last_exit_time(), 0);
        assert_eq!(process.turnaround_time(), 0);
    }

    #[test]
    fn test_record_fault() {
        let mut process = Process::new(ProcessId(1), "p1", 1, pages(&[1]));
        process.complete_instruction();
        assert_eq!(process.run_length(), 1);

        process.record_fault(10, 6);
        assert_eq!(process.fault_times(), &[10]);
        assert_eq!(process.last_exit_time(), 10);
        assert_eq!(process.ready_time(), 16);
        assert_eq!(process.run_length(), 0);
    }

    #[test]
    fn test_complete_instruction_consumes_head() {
        let mut process = Process::new(ProcessId(1), "p1", 1, pages(&[1, 2]));
        process.complete_instruction();
        assert_eq!(process.current_page(), Page::new(2));
        process.complete_instruction();
        assert_eq!(process.current_page(), None);
        assert_eq!(process.run_length(), 2);
    }

    #[test]
    fn test_preempt_keeps_ready_time() {
        let mut process = Process::new(ProcessId(1), "p1", 1, pages(&[1, 2]));
        process.record_fault(0, 6);
        process.complete_instruction();
        process.preempt(7);
        assert_eq!(process.ready_time(), 6);
        assert_eq!(process.last_exit_time(), 7);
        assert_eq!(process.run_length(), 0);
    }

    #[test]
    fn test_sched_key() {
        let mut process = Process::new(ProcessId(2), "p2", 1, pages(&[1]));
        process.record_fault(4, 6);
        let key = process.sched_key();
        assert_eq!(key.id, ProcessId(2));
        assert_eq!(key.ready_time, 10);
        assert_eq!(key.last_exit_time, 4);
    }
}
