//! Tick-driven scheduling engine.
//!
//! One simulated CPU executes one instruction per tick. Processes live in a
//! single registry; each carries a [`ProcessState`] tag and sits in the index
//! list for that state, so membership in exactly one queue is enforced by
//! [`Scheduler::transition`] rather than by convention.

use crate::order::{SchedKey, select_next};
use crate::policy::{Admission, ReplacementPolicy};
use crate::process::{Process, ProcessState};
use crate::report::{ProcessSummary, Report};
use pagesim_common::{ProcessId, SimConfig, Tick};
use tracing::{debug, info, trace};

/// Scheduling parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum consecutive ticks before round-robin preemption.
    pub quantum: u32,
    /// Ticks between a page fault and the process becoming ready.
    pub swap_latency: Tick,
}

impl From<&SimConfig> for EngineConfig {
    fn from(config: &SimConfig) -> Self {
        Self {
            quantum: config.quantum,
            swap_latency: config.swap_latency,
        }
    }
}

/// A state transition recorded during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A ready process was picked and its next page admitted.
    Dispatch {
        pid: ProcessId,
        tick: Tick,
        admission: Admission,
    },
    /// The next page was not resident.
    Fault {
        pid: ProcessId,
        tick: Tick,
        ready_time: Tick,
    },
    /// A blocked process reached its ready time.
    Unblock { pid: ProcessId, tick: Tick },
    /// Quantum expired with the next page resident.
    Preempt {
        pid: ProcessId,
        tick: Tick,
        run_length: u32,
    },
    /// The trace was fully consumed.
    Finish {
        pid: ProcessId,
        tick: Tick,
        turnaround_time: Tick,
    },
}

/// Result of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Faulted,
    Continued,
    Preempted,
    Finished,
}

/// Round-robin scheduler over demand-paged processes.
pub struct Scheduler {
    policy: ReplacementPolicy,
    config: EngineConfig,
    tick: Tick,
    /// Registry of all processes; indices are stable for the run.
    processes: Vec<Process>,
    states: Vec<ProcessState>,
    new: Vec<usize>,
    ready: Vec<usize>,
    blocked: Vec<usize>,
    running: Option<usize>,
    finished: Vec<usize>,
    events: Vec<Event>,
}

impl Scheduler {
    /// Creates an idle scheduler.
    pub fn new(policy: ReplacementPolicy, config: EngineConfig) -> Self {
        Self {
            policy,
            config,
            tick: 0,
            processes: Vec::new(),
            states: Vec::new(),
            new: Vec::new(),
            ready: Vec::new(),
            blocked: Vec::new(),
            running: None,
            finished: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Runs `processes` to completion.
    ///
    /// The initial dispatch pass executes every process once at tick 0, which
    /// faults each one that has pages (frames start empty). The tick loop then
    /// advances until every process has finished.
    ///
    /// # Panics
    ///
    /// Panics if `processes` is empty, if the scheduler has already run, or if
    /// any process has no frames.
    pub fn run(&mut self, processes: Vec<Process>) {
        assert!(!processes.is_empty(), "scheduler needs at least one process");
        assert!(self.processes.is_empty(), "scheduler has already run");
        assert!(
            processes.iter().all(|p| p.frames().capacity() > 0),
            "every process needs at least one frame"
        );

        let total = processes.len();
        self.states = vec![ProcessState::New; total];
        self.new = (0..total).collect();
        self.processes = processes;

        info!(
            policy = %self.policy,
            processes = total,
            quantum = self.config.quantum,
            "starting simulation"
        );

        while let Some(position) = select_next(self.keys(&self.new)) {
            let idx = self.new[position];
            self.transition(idx, ProcessState::Running);
            self.execute_then_dispatch(idx);
        }

        while self.finished.len() < total {
            self.tick += 1;
            self.unblock();
            if let Some(idx) = self.running {
                self.execute_then_dispatch(idx);
            } else if !self.ready.is_empty() {
                self.dispatch();
            }
        }

        info!(
            policy = %self.policy,
            ticks = self.tick,
            faults = self.processes.iter().map(|p| p.fault_times().len()).sum::<usize>(),
            "simulation finished"
        );
    }

    /// Returns the replacement policy.
    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// Returns the current tick.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Returns true once every process has finished.
    pub fn is_complete(&self) -> bool {
        !self.processes.is_empty() && self.finished.len() == self.processes.len()
    }

    /// Returns all processes in registry order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Looks up a process by id.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id() == id)
    }

    /// Returns the state of a process by id.
    pub fn state(&self, id: ProcessId) -> Option<ProcessState> {
        let idx = self.processes.iter().position(|p| p.id() == id)?;
        Some(self.states[idx])
    }

    /// Returns the number of processes in a state.
    pub fn count(&self, state: ProcessState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// Returns every transition recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Builds the report for the finished processes, ordered by id.
    pub fn report(&self) -> Report {
        let processes = self
            .finished
            .iter()
            .map(|&idx| ProcessSummary::from_process(&self.processes[idx]))
            .collect();
        Report::new(self.policy, processes)
    }

    fn keys<'a>(&'a self, list: &'a [usize]) -> impl Iterator<Item = SchedKey> + 'a {
        list.iter().map(move |&idx| self.processes[idx].sched_key())
    }

    /// Moves blocked processes whose ready time is now into the ready queue.
    fn unblock(&mut self) {
        if self.tick == 0 {
            return;
        }
        let due: Vec<usize> = self
            .blocked
            .iter()
            .copied()
            .filter(|&idx| self.processes[idx].ready_time() == self.tick)
            .collect();
        for idx in due {
            trace!(pid = %self.processes[idx].id(), tick = self.tick, "unblocked");
            self.events.push(Event::Unblock {
                pid: self.processes[idx].id(),
                tick: self.tick,
            });
            self.transition(idx, ProcessState::Ready);
        }
    }

    /// Executes the process on the CPU; a fault hands the CPU to the next
    /// ready process within the same tick.
    fn execute_then_dispatch(&mut self, idx: usize) {
        if self.execute(idx) == Step::Faulted {
            self.dispatch();
        }
    }

    /// Picks ready processes, admits their next page and executes them,
    /// until one does not fault or the ready queue is empty.
    fn dispatch(&mut self) {
        while let Some(position) = select_next(self.keys(&self.ready)) {
            let idx = self.ready[position];
            self.transition(idx, ProcessState::Running);

            let process = &mut self.processes[idx];
            if let Some(page) = process.current_page() {
                let admission = self.policy.admit(&mut process.frames, page);
                if let Admission::Evicted { slot, victim } = admission {
                    debug!(pid = %process.id(), tick = self.tick, %page, %victim, slot, "evicted");
                }
                self.events.push(Event::Dispatch {
                    pid: process.id(),
                    tick: self.tick,
                    admission,
                });
            }

            if self.execute(idx) != Step::Faulted {
                break;
            }
        }
    }

    /// Executes the head instruction of the running process.
    fn execute(&mut self, idx: usize) -> Step {
        let tick = self.tick;
        let quantum = self.config.quantum;
        let process = &mut self.processes[idx];
        let pid = process.id();

        let Some(page) = process.current_page() else {
            process.finish(tick);
            self.events.push(Event::Finish {
                pid,
                tick,
                turnaround_time: tick,
            });
            self.transition(idx, ProcessState::Finished);
            return Step::Finished;
        };

        if !process.frames.touch(page) {
            process.record_fault(tick, self.config.swap_latency);
            let ready_time = process.ready_time();
            debug!(pid = %pid, tick, %page, ready_time, "page fault");
            self.events.push(Event::Fault {
                pid,
                tick,
                ready_time,
            });
            self.transition(idx, ProcessState::Blocked);
            return Step::Faulted;
        }

        trace!(pid = %pid, tick, %page, "hit");
        process.complete_instruction();
        let run_length = process.run_length();
        match process.current_page() {
            None => {
                let turnaround_time = tick + 1;
                process.finish(turnaround_time);
                debug!(pid = %pid, turnaround_time, "finished");
                self.events.push(Event::Finish {
                    pid,
                    tick,
                    turnaround_time,
                });
                self.transition(idx, ProcessState::Finished);
                Step::Finished
            }
            Some(next) if run_length >= quantum && process.frames.contains(next) => {
                process.preempt(tick);
                debug!(pid = %pid, tick, run_length, "quantum expired");
                self.events.push(Event::Preempt {
                    pid,
                    tick,
                    run_length,
                });
                self.transition(idx, ProcessState::Ready);
                Step::Preempted
            }
            // Within quantum, or the next page faults anyway.
            Some(_) => Step::Continued,
        }
    }

    /// Moves a process between state lists.
    ///
    /// # Panics
    ///
    /// Panics on a transition out of `Finished`, back into `New`, or into an
    /// occupied running slot.
    fn transition(&mut self, idx: usize, to: ProcessState) {
        let from = self.states[idx];
        if from == to {
            return;
        }

        match from {
            ProcessState::New => remove_index(&mut self.new, idx),
            ProcessState::Ready => remove_index(&mut self.ready, idx),
            ProcessState::Blocked => remove_index(&mut self.blocked, idx),
            ProcessState::Running => {
                assert_eq!(self.running, Some(idx), "running slot out of sync");
                self.running = None;
            }
            ProcessState::Finished => panic!("process index {idx} left the finished state"),
        }

        match to {
            ProcessState::New => panic!("process index {idx} cannot return to the initial set"),
            ProcessState::Ready => self.ready.push(idx),
            ProcessState::Blocked => self.blocked.push(idx),
            ProcessState::Running => {
                assert!(self.running.is_none(), "running slot already occupied");
                self.running = Some(idx);
            }
            ProcessState::Finished => self.finished.push(idx),
        }
        self.states[idx] = to;
    }
}

fn remove_index(list: &mut Vec<usize>, idx: usize) {
    let Some(position) = list.iter().position(|&i| i == idx) else {
        panic!("process index {idx} missing from its state list");
    };
    list.remove(position);
}
