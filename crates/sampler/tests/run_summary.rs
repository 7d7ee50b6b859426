use std::time::Duration;

use procwatch_common::record::LogEvent;
use procwatch_sampler::run::{run, SamplerOptions};

// A run whose target is already gone still ends with exactly one stop
// record and no samples.
#[tokio::test]
async fn vanished_process_writes_stop_summary_once() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run_gone.jsonl");

    run(SamplerOptions {
        pid: 999_999_999,
        run_id: "run_gone".into(),
        out: out.clone(),
        interval: Duration::from_millis(10),
    })
    .await
    .unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let events: Vec<LogEvent> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(events.len(), 1);
    match &events[0] {
        LogEvent::Stop(stop) => {
            assert_eq!(stop.samples, 0);
            assert_eq!(stop.exit_code, 0);
        }
        other => panic!("expected stop record, got {other:?}"),
    }
}
