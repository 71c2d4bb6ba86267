//! JSON API handlers for the chat demo.
//!
//! Each handler returns a `Response<Cursor<Vec<u8>>>` with JSON content.
//! `/api/ask` is the one the chat page lives on; the rest back the header
//! badges and the schema/stats views.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use tiny_http::{Response, StatusCode};

use crate::analytics::{logger, reporter};
use crate::answer::{self, Answer};
use crate::bundle::{EXAMPLE_QUESTIONS, Role};
use crate::config;
use crate::generator;
use crate::render;
use crate::schema;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /api/ask`.
#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default)]
    role: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response(value: &serde_json::Value) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(value).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(super::content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Build a JSON error response with the given status code.
fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(super::content_type_json())
        .with_status_code(StatusCode(status))
}

/// Parse a query parameter from a URL.
fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == name { Some(v) } else { None }
    })
}

/// The answer as the API's JSON shape: the serialized answer plus the
/// record list and a display-ready table (Title Case headers, formatted
/// cells) so the page doesn't re-implement the formatter.
fn answer_json(answer: &Answer) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(answer).context("failed to serialize answer")?;
    value["records"] = serde_json::Value::Array(answer.records());

    let headers: Vec<String> = answer
        .table
        .columns
        .iter()
        .map(|c| render::format_header(c))
        .collect();
    let rows: Vec<Vec<String>> = answer
        .table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| render::format_cell(&answer.table.columns[i], cell))
                .collect()
        })
        .collect();
    value["display_table"] = json!({ "headers": headers, "rows": rows });

    Ok(value)
}

// ---------------------------------------------------------------------------
// API handlers
// ---------------------------------------------------------------------------

/// `POST /api/ask` — answer a question.
///
/// Body: `{ "question": "...", "role": "Sales Manager" }`. The configured
/// simulated latency runs here, server-side, standing in for the backend
/// round trip the original demo faked in the page.
pub fn post_ask(body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: AskRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => return Ok(error_response(400, &format!("invalid JSON body: {e}"))),
    };
    if req.question.trim().is_empty() {
        return Ok(error_response(400, "question must not be empty"));
    }

    let cfg = config::load();
    let role = Role::parse(req.role.as_deref().unwrap_or(&cfg.general.default_role));

    answer::simulate_latency(&cfg);
    let answer = answer::answer(req.question.trim(), role, &cfg);

    json_response(&answer_json(&answer)?)
}

/// `GET /api/examples` — the example questions shown under the input box.
pub fn get_examples() -> Result<Response<Cursor<Vec<u8>>>> {
    let examples: Vec<serde_json::Value> = EXAMPLE_QUESTIONS
        .iter()
        .map(|(question, kind)| json!({ "question": question, "bundle": kind.to_string() }))
        .collect();
    json_response(&json!({ "examples": examples, "roles": Role::ALL.map(|r| r.to_string()) }))
}

/// `GET /api/schema?domain=sales` — schema text for a domain.
pub fn get_schema(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let cfg = config::load();
    let domain = query_param(url, "domain").unwrap_or(&cfg.general.default_domain);

    match schema::schema_text(domain) {
        Ok(text) => json_response(&json!({ "domain": domain, "schema": text })),
        Err(e) => Ok(error_response(400, &e.to_string())),
    }
}

/// `GET /api/stats?days=N` — question statistics.
pub fn get_stats(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let days = query_param(url, "days").and_then(|v| v.parse().ok());
    let cfg = config::load();
    let stats = reporter::compute_stats(&cfg.logging, days);

    let dist = &stats.bundle_distribution;
    json_response(&json!({
        "total_questions": stats.total_questions,
        "generated_sql": stats.generated_sql,
        "avg_elapsed_ms": stats.avg_elapsed_ms,
        "bundle_distribution": {
            "regions": dist.regions,
            "products": dist.products,
            "comparison": dist.comparison,
            "categories": dist.categories,
        },
        "roles": stats.role_counts.iter().map(|(role, count)| json!({
            "role": role,
            "count": count,
        })).collect::<Vec<_>>(),
        "recent": stats.recent.iter().map(|r| json!({
            "timestamp": r.timestamp,
            "question": r.question,
            "bundle": r.bundle,
        })).collect::<Vec<_>>(),
    }))
}

/// `GET /api/health` — component health summary.
pub fn get_health() -> Result<Response<Cursor<Vec<u8>>>> {
    let cfg = config::load();

    let config_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_exists = logger::query_log_path(&cfg.logging)
        .map(|p| p.exists())
        .unwrap_or(false);

    json_response(&json!({
        "generator_enabled": cfg.generator.enabled,
        "ollama_available": cfg.generator.enabled && generator::is_available(&cfg.generator),
        "derive_insights": cfg.answer.derive_insights,
        "simulate_latency_ms": cfg.answer.simulate_latency_ms,
        "domains": schema::domain_names(),
        "config_exists": config_exists,
        "log_exists": log_exists,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleKind;
    use crate::config::NliConfig;

    #[test]
    fn query_param_extracts_values() {
        assert_eq!(query_param("/api/stats?days=7", "days"), Some("7"));
        assert_eq!(query_param("/api/schema?a=b&domain=sales", "domain"), Some("sales"));
        assert_eq!(query_param("/api/stats", "days"), None);
        assert_eq!(query_param("/api/stats?days=", "days"), Some(""));
    }

    #[test]
    fn ask_request_deserializes_with_optional_role() {
        let req: AskRequest =
            serde_json::from_str(r#"{"question": "sales by region"}"#).unwrap();
        assert_eq!(req.question, "sales by region");
        assert!(req.role.is_none());

        let req: AskRequest =
            serde_json::from_str(r#"{"question": "q", "role": "Finance"}"#).unwrap();
        assert_eq!(req.role.as_deref(), Some("Finance"));
    }

    #[test]
    fn answer_json_carries_display_table() {
        let mut cfg = NliConfig::default();
        cfg.logging.enabled = false;
        let answer = answer::answer("compare north and south", Role::Analyst, &cfg);
        assert_eq!(answer.bundle, BundleKind::Comparison);

        let value = answer_json(&answer).unwrap();
        assert_eq!(value["display_table"]["headers"][0], "Region");
        assert_eq!(value["display_table"]["headers"][1], "Total Sales");
        assert_eq!(value["display_table"]["rows"][0][1], "$134,364.82");
        assert_eq!(value["records"][1]["region"], "North");
    }
}
