use serde::{Deserialize, Serialize};

/// One line of a sample log, discriminated by its `event` field.
///
/// Sample logs hold any number of `sample` lines followed by at most one
/// terminal `stop` line. Consumers skip lines that fail to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum LogEvent {
    Sample(SampleRecord),
    Stop(StopRecord),
}

/// One resource-usage snapshot of the monitored process.
///
/// Immutable once appended. `cpu_max` and `rss_max` are running maxima over
/// the run so far, carried on every sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleRecord {
    pub run_id: String,
    pub timestamp: String,
    pub pid: u32,
    pub cpu_percent: f64,
    pub rss_bytes: u64,
    pub vms_bytes: u64,
    pub threads: u32,
    pub fds_open: u32,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub cpu_max: f64,
    pub rss_max: u64,
}

/// Terminal summary written exactly once when a run ends cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopRecord {
    pub timestamp: String,
    pub samples: u64,
    pub duration_seconds: f64,
    pub max_cpu_percent: f64,
    pub max_memory_rss: u64,
    pub peak_open_files: u32,
    pub exit_code: i32,
}

/// A fired threshold alert.
///
/// `acknowledged_at` serializes as JSON null until an acknowledgement
/// workflow fills it in; the alert log itself is never rewritten by this
/// suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertRecord {
    pub alert_id: String,
    pub metric: String,
    pub run_id: String,
    pub triggered_at: String,
    pub value: f64,
    pub threshold: f64,
    pub duration_sec: f64,
    pub acknowledged: bool,
    pub acknowledged_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SampleRecord {
        SampleRecord {
            run_id: "run_001".into(),
            timestamp: "2026-08-06T10:00:00Z".into(),
            pid: 4242,
            cpu_percent: 12.5,
            rss_bytes: 64 * 1024 * 1024,
            vms_bytes: 256 * 1024 * 1024,
            threads: 8,
            fds_open: 32,
            read_bytes: 1024,
            write_bytes: 2048,
            cpu_max: 55.0,
            rss_max: 80 * 1024 * 1024,
        }
    }

    #[test]
    fn sample_line_carries_event_tag() {
        let json = serde_json::to_string(&LogEvent::Sample(sample())).unwrap();
        assert!(json.contains("\"event\":\"sample\""));

        let parsed: LogEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LogEvent::Sample(sample()));
    }

    #[test]
    fn stop_line_roundtrip() {
        let stop = StopRecord {
            timestamp: "2026-08-06T10:05:00Z".into(),
            samples: 300,
            duration_seconds: 300.4,
            max_cpu_percent: 97.1,
            max_memory_rss: 90 * 1024 * 1024,
            peak_open_files: 48,
            exit_code: 0,
        };
        let json = serde_json::to_string(&LogEvent::Stop(stop.clone())).unwrap();
        assert!(json.contains("\"event\":\"stop\""));
        assert_eq!(
            serde_json::from_str::<LogEvent>(&json).unwrap(),
            LogEvent::Stop(stop)
        );
    }

    #[test]
    fn unknown_event_fails_to_parse() {
        let line = r#"{"event":"heartbeat","timestamp":"2026-08-06T10:00:00Z"}"#;
        assert!(serde_json::from_str::<LogEvent>(line).is_err());
    }

    #[test]
    fn alert_roundtrip_preserves_null_acknowledgement() {
        let alert = AlertRecord {
            alert_id: "alert_1754474400_cpu_percent".into(),
            metric: "cpu_percent".into(),
            run_id: "run_001".into(),
            triggered_at: "2026-08-06T10:00:00Z".into(),
            value: 91.5,
            threshold: 80.0,
            duration_sec: 3.0,
            acknowledged: false,
            acknowledged_at: None,
        };

        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains("\"acknowledged_at\":null"));

        let parsed: AlertRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alert);
    }

    #[test]
    fn acknowledged_alert_keeps_timestamp() {
        let alert = AlertRecord {
            alert_id: "alert_1754474400_rss_bytes".into(),
            metric: "rss_bytes".into(),
            run_id: "run_001".into(),
            triggered_at: "2026-08-06T10:00:00Z".into(),
            value: 2e9,
            threshold: 1e9,
            duration_sec: 5.0,
            acknowledged: true,
            acknowledged_at: Some("2026-08-06T10:01:00Z".into()),
        };
        let json = serde_json::to_string(&alert).unwrap();
        let parsed: AlertRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alert);
    }
}
