//! File-backed workload tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pagesim_common::{ProcessId, SimConfig, SimError};
use pagesim_core::{ReplacementPolicy, render_comparison};
use pagesim_workload::{Trace, Workload, process_id_from_path};

/// Relative scratch directory, so trace paths carry only the random suffix
/// digits and not those of the system temp path.
fn tempdir() -> std::io::Result<TempDir> {
    tempfile::Builder::new().prefix("traces").tempdir_in(".")
}

fn id_of(path: &Path) -> ProcessId {
    process_id_from_path(path).unwrap()
}

fn write_trace(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn test_load_and_run_both_policies() {
    let dir = tempdir().unwrap();
    let p1 = write_trace(dir.path(), "process1.txt", &["1", "2", "3", "2", "1", "2", "end"]);
    let p2 = write_trace(dir.path(), "process2.txt", &["begin", "4", "5", "4", "6", "END"]);

    let config = SimConfig::new(4, 2);
    let workload = Workload::load(&[&p1, &p2], &config).unwrap();
    assert_eq!(workload.traces().len(), 2);
    assert_eq!(workload.traces()[1].pages.len(), 4);

    let reports = workload
        .run_all(&ReplacementPolicy::ALL, &config, false)
        .unwrap();
    assert_eq!(reports.len(), 2);
    for report in &reports {
        let ids: Vec<_> = report.processes().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![id_of(&p1), id_of(&p2)]);
        assert!(report.processes()[0].name.ends_with("process1.txt"));
    }

    let out = render_comparison(&reports);
    assert!(out.starts_with("LRU - Fixed:"));
    assert!(out.contains("Clock - Fixed:"));
}

#[test]
fn test_trace_limited_to_fifty_pages() {
    let dir = tempdir().unwrap();
    let lines: Vec<String> = (1..=75).map(|n| n.to_string()).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_trace(dir.path(), "process3.txt", &refs);

    let trace = Trace::load(&path, 50).unwrap();
    assert_eq!(trace.id, id_of(&path));
    assert!(trace.id.to_string().ends_with('3'));
    assert_eq!(trace.pages.len(), 50);
    assert_eq!(trace.pages[49].instruction(), 50);
}

#[test]
fn test_configured_page_limit() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "process4.txt", &["1", "2", "3", "4", "end"]);

    let config = SimConfig {
        max_pages_per_trace: 2,
        ..SimConfig::new(2, 1)
    };
    let workload = Workload::load(&[path], &config).unwrap();
    assert_eq!(workload.traces()[0].pages.len(), 2);
}

#[test]
fn test_missing_file_runs_as_empty_process() {
    let dir = tempdir().unwrap();
    let present = write_trace(dir.path(), "process1.txt", &["9", "end"]);
    let missing = dir.path().join("process2.txt");

    let config = SimConfig::new(2, 3);
    let ids = (id_of(&present), id_of(&missing));
    let workload = Workload::load(&[present, missing], &config).unwrap();
    let report = workload.run(ReplacementPolicy::Clock, &config).unwrap();

    let empty = report.get(ids.1).unwrap();
    assert!(empty.fault_times.is_empty());
    assert_eq!(empty.turnaround_time, 0);
    assert_eq!(report.get(ids.0).unwrap().turnaround_time, 7);
}

#[test]
fn test_bad_line_keeps_earlier_pages() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "process6.txt", &["3", "4", "x5y", "6", "end"]);

    let trace = Trace::load(&path, 50).unwrap();
    let pages: Vec<u32> = trace.pages.iter().map(|p| p.instruction()).collect();
    assert_eq!(pages, vec![3, 4]);
}

#[test]
fn test_name_without_digits_is_fatal() {
    let path = Path::new("traces/trace.txt");

    let err = Workload::load(&[path], &SimConfig::new(2, 1)).unwrap_err();
    assert!(matches!(err, SimError::MissingProcessId { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_too_few_frames_is_fatal() {
    let dir = tempdir().unwrap();
    let paths: Vec<PathBuf> = (1..=3)
        .map(|i| write_trace(dir.path(), &format!("process{i}.txt"), &["1", "end"]))
        .collect();

    let config = SimConfig::new(2, 1);
    let workload = Workload::load(&paths, &config).unwrap();
    let err = workload.run(ReplacementPolicy::Lru, &config).unwrap_err();
    assert!(matches!(err, SimError::ConfigError(_)));
}

#[test]
fn test_directory_digits_join_the_id() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("run2");
    fs::create_dir(&sub).unwrap();
    let path = write_trace(&sub, "process1.txt", &["4", "end"]);

    let trace = Trace::load(&path, 50).unwrap();
    assert_eq!(trace.name, path.display().to_string());
    assert!(trace.id.to_string().ends_with("21"));
    assert_eq!(trace.id, id_of(Path::new(&trace.name)));
}

#[test]
fn test_directory_digits_reorder_ties() {
    // process1 under run9 sorts after process2 under run1 once the
    // directory digits are part of the id.
    let dir = tempdir().unwrap();
    let run9 = dir.path().join("run9");
    let run1 = dir.path().join("run1");
    fs::create_dir(&run9).unwrap();
    fs::create_dir(&run1).unwrap();
    let a = write_trace(&run9, "process1.txt", &["5", "end"]);
    let b = write_trace(&run1, "process2.txt", &["5", "end"]);

    let config = SimConfig::new(2, 3);
    let workload = Workload::load(&[a.clone(), b.clone()], &config).unwrap();
    let report = workload.run(ReplacementPolicy::Lru, &config).unwrap();

    let order: Vec<ProcessId> = report.processes().iter().map(|p| p.id).collect();
    assert_eq!(order, vec![id_of(&b), id_of(&a)]);
    assert!(id_of(&b) < id_of(&a));
    // Both fault at tick 0 and become ready at 6; the lower id runs first.
    assert_eq!(report.get(id_of(&b)).unwrap().turnaround_time, 7);
    assert_eq!(report.get(id_of(&a)).unwrap().turnaround_time, 8);
}
