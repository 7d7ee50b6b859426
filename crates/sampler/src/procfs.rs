/// Thread and open-fd counts read straight from `/proc`; sysinfo exposes
/// neither. Zero/one fallbacks on other platforms and on read failure.
#[derive(Debug, Clone, Copy)]
pub struct ProcCounts {
    pub threads: u32,
    pub fds_open: u32,
}

impl Default for ProcCounts {
    fn default() -> Self {
        Self {
            threads: 1,
            fds_open: 0,
        }
    }
}

#[cfg(target_os = "linux")]
pub fn read_counts(pid: u32) -> ProcCounts {
    let mut counts = ProcCounts::default();

    if let Ok(status) = std::fs::read_to_string(format!("/proc/{pid}/status")) {
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("Threads:") {
                if let Ok(n) = rest.trim().parse() {
                    counts.threads = n;
                }
            }
        }
    }

    if let Ok(entries) = std::fs::read_dir(format!("/proc/{pid}/fd")) {
        counts.fds_open = entries.filter(|e| e.is_ok()).count() as u32;
    }

    counts
}

#[cfg(not(target_os = "linux"))]
pub fn read_counts(_pid: u32) -> ProcCounts {
    ProcCounts::default()
}
