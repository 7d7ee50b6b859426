use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Self::Greater),
            "<" => Ok(Self::Less),
            ">=" => Ok(Self::GreaterEqual),
            "<=" => Ok(Self::LessEqual),
            "==" => Ok(Self::Equal),
            _ => Err(format!("unknown compare operator: {s}")),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greater => write!(f, ">"),
            Self::Less => write!(f, "<"),
            Self::GreaterEqual => write!(f, ">="),
            Self::LessEqual => write!(f, "<="),
            Self::Equal => write!(f, "=="),
        }
    }
}

impl CompareOp {
    pub fn check(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Greater => value > threshold,
            Self::Less => value < threshold,
            Self::GreaterEqual => value >= threshold,
            Self::LessEqual => value <= threshold,
            // `==` is exact; continuous metrics rarely satisfy it.
            #[allow(clippy::float_cmp)]
            Self::Equal => value == threshold,
        }
    }
}

/// One threshold rule: fire after `duration_samples` consecutive samples
/// whose `metric` satisfies `operator` against `threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRule {
    pub metric: String,
    pub operator: CompareOp,
    pub threshold: f64,
    pub duration_samples: u32,
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

#[derive(Deserialize)]
struct RawConfig {
    rules: Vec<RawRule>,
}

#[derive(Deserialize)]
struct RawRule {
    metric: Option<String>,
    operator: Option<String>,
    threshold: Option<f64>,
    duration_samples: Option<u32>,
}

/// Loads the rule file. Errors here are fatal at process startup.
pub fn load_from_file(path: &Path) -> Result<Vec<AlertRule>, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Parses a JSON document of the form `{"rules": [...]}`.
///
/// For compatibility with existing rule files, a missing or unrecognized
/// operator falls back to `>` and missing numeric fields fall back to zero;
/// every such fallback is logged at warn. A rule without a metric name is
/// rejected outright.
pub fn load_from_str(json: &str) -> Result<Vec<AlertRule>, LoadError> {
    let raw: RawConfig = serde_json::from_str(json)?;
    raw.rules
        .into_iter()
        .enumerate()
        .map(|(idx, rule)| resolve(idx, rule))
        .collect()
}

fn resolve(idx: usize, raw: RawRule) -> Result<AlertRule, LoadError> {
    let metric = raw
        .metric
        .filter(|m| !m.is_empty())
        .ok_or_else(|| LoadError::Validation(format!("rule {idx}: metric is required")))?;

    let operator = match raw.operator.as_deref() {
        Some(op) => op.parse().unwrap_or_else(|_| {
            tracing::warn!(metric = %metric, operator = op, "unknown operator, defaulting to >");
            CompareOp::Greater
        }),
        None => {
            tracing::warn!(metric = %metric, "operator missing, defaulting to >");
            CompareOp::Greater
        }
    };

    let threshold = raw.threshold.unwrap_or_else(|| {
        tracing::warn!(metric = %metric, "threshold missing, defaulting to 0");
        0.0
    });

    let duration_samples = raw.duration_samples.unwrap_or_else(|| {
        tracing::warn!(metric = %metric, "duration_samples missing, defaulting to 0");
        0
    });

    Ok(AlertRule {
        metric,
        operator,
        threshold,
        duration_samples,
    })
}
