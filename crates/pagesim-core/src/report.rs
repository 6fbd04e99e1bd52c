//! Per-policy result reports.

use crate::policy::ReplacementPolicy;
use crate::process::Process;
use pagesim_common::{ProcessId, Tick};
use std::fmt;

/// Separator printed between policy reports.
pub const REPORT_SEPARATOR: &str =
    "-----------------------------------------------------------------------------------";

const COLUMN_HEADER: &str = "PID\tProcess Name\t\tTurnaround Time\t\t# Faults\tFault Times";

/// Final statistics for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub id: ProcessId,
    pub name: String,
    pub turnaround_time: Tick,
    pub fault_times: Vec<Tick>,
}

impl ProcessSummary {
    /// Captures the final statistics of a process.
    pub fn from_process(process: &Process) -> Self {
        Self {
            id: process.id(),
            name: process.name().to_string(),
            turnaround_time: process.turnaround_time(),
            fault_times: process.fault_times().to_vec(),
        }
    }

    /// Returns the number of page faults.
    pub fn fault_count(&self) -> usize {
        self.fault_times.len()
    }
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faults = self
            .fault_times
            .iter()
            .map(Tick::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{}\t{}\t\t{}\t\t\t{}\t\t{{{}}}",
            self.id,
            self.name,
            self.turnaround_time,
            self.fault_count(),
            faults
        )
    }
}

/// Results of one policy run, ordered by ascending process id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    policy: ReplacementPolicy,
    processes: Vec<ProcessSummary>,
}

impl Report {
    /// Creates a report, sorting the summaries by id. Equal ids keep their
    /// given order.
    pub fn new(policy: ReplacementPolicy, mut processes: Vec<ProcessSummary>) -> Self {
        processes.sort_by_key(|p| p.id);
        Self { policy, processes }
    }

    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    pub fn processes(&self) -> &[ProcessSummary] {
        &self.processes
    }

    /// Looks up a summary by process id.
    pub fn get(&self, id: ProcessId) -> Option<&ProcessSummary> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Total page faults across all processes.
    pub fn total_faults(&self) -> usize {
        self.processes.iter().map(ProcessSummary::fault_count).sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.policy.label())?;
        writeln!(f, "{COLUMN_HEADER}")?;
        for process in &self.processes {
            writeln!(f, "{process}")?;
        }
        Ok(())
    }
}

/// Renders several reports the way the simulator prints them: each report
/// followed by a blank line, with a separator between reports.
pub fn render_comparison(reports: &[Report]) -> String {
    let mut out = String::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push_str(REPORT_SEPARATOR);
            out.push_str("\n\n");
        }
        out.push_str(&report.to_string());
        out.push('\n');
    }
    out
}
