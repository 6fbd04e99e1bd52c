//! Workload assembly and policy runs.

use crate::trace::Trace;
use pagesim_common::{Result, SimConfig, SimError};
use pagesim_core::{EngineConfig, Process, ReplacementPolicy, Report, Scheduler};
use std::path::Path;
use tracing::info;

/// The set of traces simulated under every policy.
#[derive(Debug, Clone)]
pub struct Workload {
    traces: Vec<Trace>,
}

impl Workload {
    /// Creates a workload from traces already in memory.
    pub fn from_traces(traces: Vec<Trace>) -> Result<Self> {
        if traces.is_empty() {
            return Err(SimError::NoTraces);
        }
        Ok(Self { traces })
    }

    /// Loads every trace file, in order.
    pub fn load<P: AsRef<Path>>(paths: &[P], config: &SimConfig) -> Result<Self> {
        let traces = paths
            .iter()
            .map(|p| Trace::load(p.as_ref(), config.max_pages_per_trace))
            .collect::<Result<Vec<_>>>()?;
        Self::from_traces(traces)
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Frames allocated to each process under `config`.
    pub fn frames_per_process(&self, config: &SimConfig) -> Result<usize> {
        config.frames_per_process(self.traces.len())
    }

    /// Builds fresh processes with empty frames for one run.
    pub fn processes(&self, frames: usize) -> Vec<Process> {
        self.traces
            .iter()
            .map(|t| Process::new(t.id, t.name.clone(), frames, t.pages.iter().copied()))
            .collect()
    }

    /// Simulates the workload under one policy.
    pub fn run(&self, policy: ReplacementPolicy, config: &SimConfig) -> Result<Report> {
        config.validate()?;
        let frames = self.frames_per_process(config)?;
        info!(%policy, frames_per_process = frames, "running workload");

        let mut scheduler = Scheduler::new(policy, EngineConfig::from(config));
        scheduler.run(self.processes(frames));
        Ok(scheduler.report())
    }

    /// Simulates the workload under each policy, returning reports in the
    /// order given. With `parallel`, each policy runs on its own thread; the
    /// runs share no state.
    pub fn run_all(
        &self,
        policies: &[ReplacementPolicy],
        config: &SimConfig,
        parallel: bool,
    ) -> Result<Vec<Report>> {
        if !parallel {
            return policies.iter().map(|&p| self.run(p, config)).collect();
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = policies
                .iter()
                .map(|&policy| scope.spawn(move || self.run(policy, config)))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(report) => report,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}
