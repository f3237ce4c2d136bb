//! Live process table tests
//!
//! These run against the real OS table, so they only assert properties
//! that hold despite processes starting and exiting concurrently.

use getproc_tools::prelude::*;
use std::collections::HashSet;

#[test]
fn test_get_proc_includes_current_process() {
    let registry = default_registry().unwrap();
    let records = registry.execute("get-proc").unwrap();

    let current_pid = std::process::id();
    let current = records
        .iter()
        .find(|r| r.pid == current_pid)
        .expect("current process missing from snapshot");
    assert!(!current.name.is_empty());
}

#[cfg(unix)]
#[test]
fn test_repeated_queries_are_independent() {
    let tool = ProcessTool::new();
    let mut first = tool.list_processes().unwrap();

    let mut child = std::process::Command::new("sleep").arg("5").spawn().unwrap();
    let child_pid = child.id();
    let second = tool.list_processes();

    child.kill().unwrap();
    child.wait().unwrap();
    let second = second.unwrap();

    assert!(!first.iter().any(|r| r.pid == child_pid));
    assert!(second.iter().any(|r| r.pid == child_pid));

    let current_pid = std::process::id();
    let original_name = second
        .iter()
        .find(|r| r.pid == current_pid)
        .map(|r| r.name.clone())
        .unwrap();
    for record in first.iter_mut().filter(|r| r.pid == current_pid) {
        record.name = "renamed".to_string();
    }
    let current = second.iter().find(|r| r.pid == current_pid).unwrap();
    assert_eq!(current.name, original_name);
}

#[cfg(target_os = "linux")]
fn proc_pids() -> HashSet<u32> {
    std::fs::read_dir("/proc")
        .unwrap()
        .filter_map(|entry| entry.ok()?.file_name().to_str()?.parse().ok())
        .collect()
}

#[cfg(target_os = "linux")]
#[test]
fn test_pids_match_proc_table() {
    let before = proc_pids();
    let records = SysinfoSource::new().snapshot().unwrap();
    let after = proc_pids();

    let listed: HashSet<u32> = records.iter().map(|r| r.pid).collect();

    // Processes alive across the whole query must be listed.
    let missing: Vec<u32> = before
        .intersection(&after)
        .filter(|pid| !listed.contains(*pid))
        .copied()
        .collect();
    assert!(missing.is_empty(), "missing from snapshot: {:?}", missing);

    // Nothing may be listed that /proc never showed.
    let seen: HashSet<u32> = before.union(&after).copied().collect();
    let extra: Vec<u32> = listed.difference(&seen).copied().collect();
    assert!(extra.is_empty(), "not in /proc: {:?}", extra);
}

#[test]
fn test_pids_are_unique() {
    let records = SysinfoSource::new().snapshot().unwrap();
    let mut pids: Vec<u32> = records.iter().map(|r| r.pid).collect();
    pids.sort_unstable();
    pids.dedup();
    assert_eq!(pids.len(), records.len());
}

#[test]
fn test_mocked_denial_yields_no_records() {
    struct Denied;

    impl ProcessSource for Denied {
        fn snapshot(&self) -> Result<Vec<ProcessRecord>, PlatformQueryError> {
            Err(PlatformQueryError::PermissionDenied(
                "enumeration not permitted".to_string(),
            ))
        }
    }

    let mut registry = CommandRegistry::new();
    registry
        .register(Box::new(GetProcCommand::with_source(Denied)))
        .unwrap();

    let err = registry.execute("get-proc").unwrap_err();
    assert!(matches!(
        err,
        ToolError::PlatformQuery(PlatformQueryError::PermissionDenied(_))
    ));
    assert!(err.to_string().contains("enumeration not permitted"));
}
