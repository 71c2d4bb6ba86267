//! Cleaning and validation of generated SQL.
//!
//! Models wrap answers in markdown fences or prepend chatter despite the
//! prompt's instructions. [`clean_sql`] strips the wrapping;
//! [`check_sql_shape`] rejects anything that still doesn't look like a
//! query, so the caller can fall back to the canned SQL.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

/// Leading keyword a query must start with to count as SQL.
static SQL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(select|with)\b").expect("valid regex"));

/// Clean a raw model response into bare SQL.
///
/// - Extracts the body of a ```sql … ``` (or plain ``` … ```) fence when
///   one is present.
/// - Drops `--` comment lines and blank lines.
pub fn clean_sql(text: &str) -> String {
    let body = extract_fenced(text).unwrap_or(text);

    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The content of the first markdown code fence, if any.
fn extract_fenced(text: &str) -> Option<&str> {
    let after_open = if let Some(rest) = text.split_once("```sql") {
        rest.1
    } else {
        text.split_once("```")?.1
    };
    let inner = after_open.split_once("```").map_or(after_open, |(s, _)| s);
    Some(inner.trim())
}

/// Reject responses that do not look like a query.
pub fn check_sql_shape(sql: &str) -> Result<()> {
    if sql.trim().is_empty() {
        anyhow::bail!("generated SQL is empty");
    }
    if !SQL_SHAPE.is_match(sql) {
        anyhow::bail!("generated text does not start with a SQL keyword");
    }
    Ok(())
}
