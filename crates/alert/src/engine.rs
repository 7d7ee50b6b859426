use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use procwatch_common::alert_id::alert_id;
use procwatch_common::record::AlertRecord;
use procwatch_common::time;
use procwatch_logfile::append::append_line;

use crate::rules::AlertRule;

/// Seconds one sample is assumed to span when reporting an alert's duration.
/// `duration_sec` is therefore an approximation of the real streak length.
const NOMINAL_SAMPLE_INTERVAL_SECS: f64 = 1.0;

/// Rescans the whole sample log on every pass and appends an alert each time
/// a rule accumulates `duration_samples` consecutive violations.
///
/// Violation counters are scoped to a single pass; correctness across passes
/// rests on the log being strictly append-only, which keeps the recomputed
/// streaks (and their triggering line positions) stable. `emitted` remembers
/// which triggers this process has already written so an unchanged log never
/// produces duplicate alerts. The memory does not survive a restart: a
/// restarted daemon re-emits once for existing log content.
pub struct AlertEngine {
    rules: Vec<AlertRule>,
    alert_log: PathBuf,
    emitted: HashSet<(usize, usize)>,
}

impl AlertEngine {
    pub fn new(rules: Vec<AlertRule>, alert_log: impl Into<PathBuf>) -> Self {
        Self {
            rules,
            alert_log: alert_log.into(),
            emitted: HashSet::new(),
        }
    }

    pub fn rules(&self) -> &[AlertRule] {
        &self.rules
    }

    /// Runs one evaluation pass over `sample_log` from the beginning.
    ///
    /// Lines that fail to parse or are not `sample` events are skipped
    /// silently. A rule whose metric is absent or non-numeric in a sample is
    /// skipped for that line with its counter untouched. An unreadable log
    /// fails the pass; the caller retries next cycle.
    ///
    /// Returns the number of alerts appended.
    pub fn evaluate(&mut self, sample_log: &Path, run_id: &str) -> io::Result<usize> {
        let file = File::open(sample_log)?;

        let mut counters = vec![0u32; self.rules.len()];
        let mut appended = 0;

        for (line_idx, line) in BufReader::new(file).lines().enumerate() {
            let Ok(line) = line else { break };
            let Ok(sample) = serde_json::from_str::<Value>(&line) else {
                continue;
            };
            if sample.get("event").and_then(Value::as_str) != Some("sample") {
                continue;
            }

            for (rule_idx, rule) in self.rules.iter().enumerate() {
                let Some(value) = sample.get(&rule.metric).and_then(Value::as_f64) else {
                    continue;
                };

                if rule.operator.check(value, rule.threshold) {
                    counters[rule_idx] += 1;
                    if counters[rule_idx] >= rule.duration_samples {
                        if !self.emitted.contains(&(rule_idx, line_idx)) {
                            self.append_alert(rule, value, run_id)?;
                            self.emitted.insert((rule_idx, line_idx));
                            appended += 1;
                        }
                        // Reset so the same streak cannot re-trigger within
                        // this pass.
                        counters[rule_idx] = 0;
                    }
                } else {
                    counters[rule_idx] = 0;
                }
            }
        }

        Ok(appended)
    }

    fn append_alert(&self, rule: &AlertRule, value: f64, run_id: &str) -> io::Result<()> {
        let now = Utc::now();
        let record = AlertRecord {
            alert_id: alert_id(now.timestamp(), &rule.metric),
            metric: rule.metric.clone(),
            run_id: run_id.to_string(),
            triggered_at: time::format_timestamp(now),
            value,
            threshold: rule.threshold,
            duration_sec: f64::from(rule.duration_samples) * NOMINAL_SAMPLE_INTERVAL_SECS,
            acknowledged: false,
            acknowledged_at: None,
        };

        let json = serde_json::to_string(&record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        append_line(&self.alert_log, &json)?;

        tracing::info!(
            metric = %record.metric,
            value,
            threshold = rule.threshold,
            alert_id = %record.alert_id,
            "alert triggered"
        );
        Ok(())
    }
}
