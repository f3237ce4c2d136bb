use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use sysinfo::{PidExt, ProcessExt, System, SystemExt};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of the OS process-enumeration call.
#[derive(Debug, Error)]
pub enum PlatformQueryError {
    #[error("Process enumeration is not supported on this platform")]
    Unsupported,
    #[error("Process enumeration denied: {0}")]
    PermissionDenied(String),
    #[error("Process enumeration failed: {0}")]
    Os(#[from] io::Error),
}

// Process Records

/// Snapshot of one OS process at query time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub parent_pid: Option<u32>,
    pub status: String,
    pub memory_bytes: u64,
    pub virtual_memory_bytes: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub run_time_secs: u64,
    pub exe: Option<PathBuf>,
    pub cmd: Vec<String>,
    pub user_id: Option<String>,
}

impl ProcessRecord {
    /// Minimal record carrying only the identifying fields.
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            parent_pid: None,
            status: String::new(),
            memory_bytes: 0,
            virtual_memory_bytes: 0,
            start_time: None,
            run_time_secs: 0,
            exe: None,
            cmd: Vec::new(),
            user_id: None,
        }
    }

    fn from_sysinfo(process: &sysinfo::Process) -> Self {
        let exe = process.exe();
        Self {
            pid: process.pid().as_u32(),
            name: process.name().to_string(),
            parent_pid: process.parent().map(|pid| pid.as_u32()),
            status: process.status().to_string(),
            memory_bytes: process.memory(),
            virtual_memory_bytes: process.virtual_memory(),
            start_time: epoch_to_utc(process.start_time()),
            run_time_secs: process.run_time(),
            exe: (!exe.as_os_str().is_empty()).then(|| exe.to_path_buf()),
            cmd: process.cmd().to_vec(),
            user_id: process.user_id().map(uid_to_string),
        }
    }
}

fn epoch_to_utc(secs: u64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    let secs = i64::try_from(secs).ok()?;
    Utc.timestamp_opt(secs, 0).single()
}

#[cfg(unix)]
fn uid_to_string(uid: &sysinfo::Uid) -> String {
    (**uid).to_string()
}

#[cfg(not(unix))]
fn uid_to_string(uid: &sysinfo::Uid) -> String {
    format!("{:?}", uid)
}

// Process Enumeration

/// Anything that can produce the current OS process table.
pub trait ProcessSource: Send + Sync {
    fn snapshot(&self) -> Result<Vec<ProcessRecord>, PlatformQueryError>;
}

/// Process table backed by `sysinfo`. Builds a fresh `System` on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSource;

impl SysinfoSource {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "linux")]
    fn probe() -> Result<(), PlatformQueryError> {
        match std::fs::read_dir("/proc") {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(
                PlatformQueryError::PermissionDenied(format!("cannot read /proc: {}", e)),
            ),
            Err(e) => Err(PlatformQueryError::Os(e)),
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn probe() -> Result<(), PlatformQueryError> {
        Ok(())
    }
}

impl ProcessSource for SysinfoSource {
    fn snapshot(&self) -> Result<Vec<ProcessRecord>, PlatformQueryError> {
        if !System::IS_SUPPORTED {
            return Err(PlatformQueryError::Unsupported);
        }
        Self::probe()?;

        let mut system = System::new();
        system.refresh_processes();

        let records: Vec<ProcessRecord> = system
            .processes()
            .values()
            .map(ProcessRecord::from_sysinfo)
            .collect();

        // The calling process is always running, so an empty table means the
        // OS withheld it.
        if records.is_empty() {
            warn!("OS returned an empty process table");
            return Err(PlatformQueryError::PermissionDenied(
                "no processes are visible to the caller".to_string(),
            ));
        }

        Ok(records)
    }
}

pub struct ProcessTool {
    source: Box<dyn ProcessSource>,
}

impl ProcessTool {
    pub fn new() -> Self {
        Self::with_source(SysinfoSource::new())
    }

    pub fn with_source<S: ProcessSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Queries the source once. Records come back in source order.
    pub fn list_processes(&self) -> Result<Vec<ProcessRecord>, PlatformQueryError> {
        let processes = self.source.snapshot()?;
        debug!("Enumerated {} processes", processes.len());
        Ok(processes)
    }
}

impl Default for ProcessTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct StaticSource(pub Vec<ProcessRecord>);

    impl ProcessSource for StaticSource {
        fn snapshot(&self) -> Result<Vec<ProcessRecord>, PlatformQueryError> {
            Ok(self.0.clone())
        }
    }

    pub(crate) struct DeniedSource;

    impl ProcessSource for DeniedSource {
        fn snapshot(&self) -> Result<Vec<ProcessRecord>, PlatformQueryError> {
            Err(PlatformQueryError::Os(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "access denied",
            )))
        }
    }

    pub(crate) fn init_and_worker() -> Vec<ProcessRecord> {
        vec![ProcessRecord::new(1, "init"), ProcessRecord::new(42, "worker")]
    }

    #[test]
    fn test_list_processes_from_mock_table() {
        let tool = ProcessTool::with_source(StaticSource(init_and_worker()));
        let processes = tool.list_processes().unwrap();

        assert_eq!(processes.len(), 2);
        let mut pairs: Vec<(u32, &str)> =
            processes.iter().map(|p| (p.pid, p.name.as_str())).collect();
        pairs.sort();
        assert_eq!(pairs, vec![(1, "init"), (42, "worker")]);
    }

    #[test]
    fn test_list_processes_passes_error_through() {
        let tool = ProcessTool::with_source(DeniedSource);
        match tool.list_processes() {
            Err(PlatformQueryError::Os(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::PermissionDenied)
            }
            other => panic!("Expected OS error, got {:?}", other),
        }
    }

    #[test]
    fn test_sysinfo_source_sees_current_process() {
        let processes = SysinfoSource::new().snapshot().unwrap();
        let current_pid = std::process::id();
        assert!(processes.iter().any(|p| p.pid == current_pid));
    }

    #[test]
    fn test_epoch_zero_has_no_start_time() {
        assert_eq!(epoch_to_utc(0), None);
        let started = epoch_to_utc(1_700_000_000).unwrap();
        assert_eq!(started.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_record_serializes_stable_fields() {
        let value = serde_json::to_value(ProcessRecord::new(42, "worker")).unwrap();
        for field in [
            "pid",
            "name",
            "parent_pid",
            "status",
            "memory_bytes",
            "virtual_memory_bytes",
            "start_time",
            "run_time_secs",
            "exe",
            "cmd",
            "user_id",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["pid"], 42);
        assert_eq!(value["name"], "worker");
    }
}
