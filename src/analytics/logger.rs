use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Query log entry (JSONL analytics)
// ---------------------------------------------------------------------------

/// One line in the structured query log (`~/.nli/query-log.jsonl`).
///
/// Records every answered question: which bundle matched, where the SQL came
/// from, and how long the answer took. The reporter aggregates these for
/// `nli stats` and the web dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub timestamp: String,
    pub question: String,
    pub role: String,
    /// Matched bundle: `"regions"`, `"products"`, `"comparison"`, `"categories"`.
    pub bundle: String,
    /// Where the displayed SQL came from: `"canned"` or `"generated"`.
    #[serde(default = "default_sql_source")]
    pub sql_source: String,
    /// Whether insights were derived from the table rather than baked.
    #[serde(default)]
    pub derived: bool,
    pub elapsed_ms: u64,
}

fn default_sql_source() -> String {
    "canned".to_string()
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append one answered question to the query log.
///
/// Best-effort: failures are reported to the caller but every caller treats
/// them as non-fatal — a broken log must never break an answer.
pub fn log_query(
    config: &LoggingConfig,
    question: &str,
    role: &str,
    bundle: &str,
    sql_source: &str,
    derived: bool,
    elapsed_ms: u64,
) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let entry = QueryLogEntry {
        timestamp: Utc::now().to_rfc3339(),
        question: question.to_string(),
        role: role.to_string(),
        bundle: bundle.to_string(),
        sql_source: sql_source.to_string(),
        derived,
        elapsed_ms,
    };

    append_log_entry(config, &entry)
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all query log entries. Malformed lines are skipped; a missing file
/// reads as empty.
pub fn read_all_entries(config: &LoggingConfig) -> Vec<QueryLogEntry> {
    let Some(path) = query_log_path(config) else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<QueryLogEntry>(&line).ok())
        .collect()
}

/// Read entries from the last `days` days; all entries when `None`.
pub fn read_entries_since_days(config: &LoggingConfig, days: Option<u32>) -> Vec<QueryLogEntry> {
    let entries = read_all_entries(config);

    let Some(days) = days else {
        return entries;
    };

    let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();
    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_log_entry(config: &LoggingConfig, entry: &QueryLogEntry) -> Result<()> {
    let Some(path) = query_log_path(config) else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", serde_json::to_string(entry)?)?;

    Ok(())
}

/// Resolve the configured log path, expanding a leading `~`.
pub fn query_log_path(config: &LoggingConfig) -> Option<PathBuf> {
    let raw = &config.path;
    if let Some(rest) = raw.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(rest));
    }
    Some(PathBuf::from(raw))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
