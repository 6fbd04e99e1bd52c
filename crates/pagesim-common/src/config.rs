//! Configuration structures for the paging simulator.

use crate::error::{Result, SimError};
use crate::page::{MAX_PAGES_PER_TRACE, SWAP_LATENCY, Tick};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters shared by every policy run of one simulation.
///
/// Values are layered: defaults, then an optional JSON file, then
/// command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Total frames divided evenly between all processes.
    pub total_frames: u32,
    /// Maximum consecutive ticks a process may run before preemption.
    pub quantum: u32,
    /// Ticks between a page fault and the process becoming ready again.
    pub swap_latency: Tick,
    /// Pages retained per trace; later pages are dropped.
    pub max_pages_per_trace: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_frames: 0,
            quantum: 0,
            swap_latency: SWAP_LATENCY,
            max_pages_per_trace: MAX_PAGES_PER_TRACE,
        }
    }
}

impl SimConfig {
    /// Creates a configuration with default latency and trace limits.
    pub fn new(total_frames: u32, quantum: u32) -> Self {
        Self {
            total_frames,
            quantum,
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Checks the scheduling parameters.
    pub fn validate(&self) -> Result<()> {
        if self.quantum == 0 {
            return Err(invalid("quantum", self.quantum));
        }
        if self.swap_latency == 0 {
            return Err(invalid("swap_latency", self.swap_latency));
        }
        if self.max_pages_per_trace == 0 {
            return Err(invalid("max_pages_per_trace", self.max_pages_per_trace));
        }
        Ok(())
    }

    /// Returns the number of frames allocated to each of `trace_count` processes.
    pub fn frames_per_process(&self, trace_count: usize) -> Result<usize> {
        if trace_count == 0 {
            return Err(SimError::NoTraces);
        }
        let frames = self.total_frames as usize / trace_count;
        if frames == 0 {
            return Err(SimError::ConfigError(format!(
                "{} frames cannot be shared between {} processes",
                self.total_frames, trace_count
            )));
        }
        Ok(frames)
    }
}

fn invalid(name: &str, value: impl ToString) -> SimError {
    SimError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sim_config_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.total_frames, 0);
        assert_eq!(config.quantum, 0);
        assert_eq!(config.swap_latency, 6);
        assert_eq!(config.max_pages_per_trace, 50);
    }

    #[test]
    fn test_validate() {
        assert!(SimConfig::new(4, 3).validate().is_ok());

        let err = SimConfig::new(4, 0).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameter: quantum = 0");

        let config = SimConfig {
            swap_latency: 0,
            ..SimConfig::new(4, 3)
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_frames_per_process_floor_division() {
        let config = SimConfig::new(10, 3);
        assert_eq!(config.frames_per_process(1).unwrap(), 10);
        assert_eq!(config.frames_per_process(3).unwrap(), 3);
        assert_eq!(config.frames_per_process(4).unwrap(), 2);
    }

    #[test]
    fn test_frames_per_process_errors() {
        let config = SimConfig::new(2, 3);
        assert!(matches!(
            config.frames_per_process(0),
            Err(SimError::NoTraces)
        ));
        assert!(matches!(
            config.frames_per_process(3),
            Err(SimError::ConfigError(_))
        ));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"quantum": 4}"#).unwrap();
        assert_eq!(config.quantum, 4);
        assert_eq!(config.swap_latency, SWAP_LATENCY);
        assert_eq!(config.max_pages_per_trace, MAX_PAGES_PER_TRACE);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"total_frames": 12, "swap_latency": 9}}"#).unwrap();

        let config = SimConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.total_frames, 12);
        assert_eq!(config.swap_latency, 9);
        assert_eq!(config.quantum, 0);
    }

    #[test]
    fn test_from_json_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "quantum = 3").unwrap();

        let err = SimConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }
}
