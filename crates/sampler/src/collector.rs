use sysinfo::{Pid, System};

use procwatch_common::record::SampleRecord;
use procwatch_common::time;

use crate::procfs;

/// Process metrics provider for a single pid.
///
/// The CPU percentage is the delta between successive refreshes of the owned
/// `System`, so the first collect after construction reports zero; all delta
/// state lives here, threaded through successive calls, never in globals.
pub struct ProcessCollector {
    sys: System,
    pid: Pid,
}

impl ProcessCollector {
    pub fn new(pid: u32) -> Self {
        Self {
            sys: System::new(),
            pid: Pid::from_u32(pid),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid.as_u32()
    }

    /// Takes one snapshot. Returns `None` once the process is gone; the
    /// caller treats that as end-of-run. `cpu_max`/`rss_max` are left at zero
    /// for the run loop to fill in from its running maxima.
    pub fn collect(&mut self, run_id: &str) -> Option<SampleRecord> {
        if !self.sys.refresh_process(self.pid) {
            return None;
        }
        let process = self.sys.process(self.pid)?;

        let disk = process.disk_usage();
        let counts = procfs::read_counts(self.pid.as_u32());

        Some(SampleRecord {
            run_id: run_id.to_string(),
            timestamp: time::iso_timestamp(),
            pid: self.pid.as_u32(),
            cpu_percent: f64::from(process.cpu_usage()).clamp(0.0, 100.0),
            rss_bytes: process.memory(),
            vms_bytes: process.virtual_memory(),
            threads: counts.threads,
            fds_open: counts.fds_open,
            read_bytes: disk.total_read_bytes,
            write_bytes: disk.total_written_bytes,
            cpu_max: 0.0,
            rss_max: 0,
        })
    }
}
