use std::fmt::Write;

use procwatch_common::record::SampleRecord;

/// Renders one sample as Prometheus text exposition: a HELP line, a TYPE
/// line, and a `name value` line per metric.
pub fn render_sample(sample: &SampleRecord) -> String {
    let mut out = String::with_capacity(1024);

    write_block(
        &mut out,
        "procwatch_cpu_percent",
        "CPU usage percentage",
        "gauge",
        &format!("{:.2}", sample.cpu_percent),
    );
    write_block(
        &mut out,
        "procwatch_memory_rss_bytes",
        "Resident set size in bytes",
        "gauge",
        &sample.rss_bytes.to_string(),
    );
    write_block(
        &mut out,
        "procwatch_memory_vms_bytes",
        "Virtual memory size in bytes",
        "gauge",
        &sample.vms_bytes.to_string(),
    );
    write_block(
        &mut out,
        "procwatch_threads",
        "Thread count",
        "gauge",
        &sample.threads.to_string(),
    );
    write_block(
        &mut out,
        "procwatch_fds_open",
        "Open file descriptors",
        "gauge",
        &sample.fds_open.to_string(),
    );
    write_block(
        &mut out,
        "procwatch_io_read_bytes_total",
        "Cumulative bytes read",
        "counter",
        &sample.read_bytes.to_string(),
    );
    write_block(
        &mut out,
        "procwatch_io_write_bytes_total",
        "Cumulative bytes written",
        "counter",
        &sample.write_bytes.to_string(),
    );
    write_block(
        &mut out,
        "procwatch_cpu_max_percent",
        "Maximum CPU percentage observed",
        "gauge",
        &format!("{:.2}", sample.cpu_max),
    );
    write_block(
        &mut out,
        "procwatch_memory_rss_max_bytes",
        "Maximum resident set size observed",
        "gauge",
        &sample.rss_max.to_string(),
    );

    out
}

fn write_block(out: &mut String, name: &str, help: &str, mtype: &str, value: &str) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {mtype}");
    let _ = writeln!(out, "{name} {value}");
}
