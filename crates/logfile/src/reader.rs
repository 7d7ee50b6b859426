use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use procwatch_common::record::{LogEvent, SampleRecord};

/// Returns the most recent valid sample in the log, or `None` if the file is
/// absent, empty, or holds no parseable sample line.
///
/// Stateless: the path is opened fresh on every call — the file behind it may
/// have been replaced since the last one. Malformed and non-sample lines are
/// ignored.
pub fn latest(path: &Path) -> io::Result<Option<SampleRecord>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut newest = None;
    for line in BufReader::new(file).lines() {
        // A failed read cannot be followed by a complete record.
        let Ok(line) = line else { break };
        if let Ok(LogEvent::Sample(sample)) = serde_json::from_str(&line) {
            newest = Some(sample);
        }
    }
    Ok(newest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_line(n: u64) -> String {
        format!(
            "{{\"event\":\"sample\",\"run_id\":\"run_001\",\"timestamp\":\"2026-08-06T10:00:0{}Z\",\
             \"pid\":42,\"cpu_percent\":{}.0,\"rss_bytes\":1,\"vms_bytes\":2,\"threads\":1,\
             \"fds_open\":3,\"read_bytes\":0,\"write_bytes\":0,\"cpu_max\":99.0,\"rss_max\":1}}",
            n % 10,
            n
        )
    }

    #[test]
    fn absent_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(latest(&dir.path().join("missing.jsonl")).unwrap(), None);
    }

    #[test]
    fn empty_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");
        fs::write(&path, "").unwrap();
        assert_eq!(latest(&path).unwrap(), None);
    }

    #[test]
    fn stop_record_only_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");
        fs::write(
            &path,
            "{\"event\":\"stop\",\"timestamp\":\"2026-08-06T10:05:00Z\",\"samples\":0,\
             \"duration_seconds\":1.0,\"max_cpu_percent\":0.0,\"max_memory_rss\":0,\
             \"peak_open_files\":0,\"exit_code\":0}\n",
        )
        .unwrap();
        assert_eq!(latest(&path).unwrap(), None);
    }

    #[test]
    fn returns_last_sample_ignoring_trailing_stop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");
        let mut content = String::new();
        for n in 0..3 {
            content.push_str(&sample_line(n));
            content.push('\n');
        }
        content.push_str(
            "{\"event\":\"stop\",\"timestamp\":\"2026-08-06T10:05:00Z\",\"samples\":3,\
             \"duration_seconds\":3.0,\"max_cpu_percent\":2.0,\"max_memory_rss\":1,\
             \"peak_open_files\":3,\"exit_code\":0}\n",
        );
        fs::write(&path, content).unwrap();

        let sample = latest(&path).unwrap().unwrap();
        assert_eq!(sample.cpu_percent, 2.0);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");
        let content = format!("not json\n{}\n{{\"event\":\"sample\",\"trunc", sample_line(7));
        fs::write(&path, content).unwrap();

        let sample = latest(&path).unwrap().unwrap();
        assert_eq!(sample.cpu_percent, 7.0);
    }
}
