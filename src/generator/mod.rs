/// SQL generator — optional LLM path for the displayed query text.
///
/// When enabled, the assistant asks a local Ollama model to write the SQL
/// shown alongside an answer, instead of using the matched bundle's canned
/// query. The generated SQL is **display only** — nothing in this crate
/// executes it; the tabular results still come from the demo bundle.
///
/// # Feature flag
///
/// Disabled by default. Enable via:
///
/// - Environment variable: `NLI_GENERATOR=1`
/// - TOML config: `~/.nli/config.toml` → `[generator] enabled = true`
///
/// Any failure — Ollama unreachable, empty response, output that does not
/// look like SQL — makes the caller fall back to the canned query. There
/// are no retries.
use std::time::Instant;

use anyhow::Result;

pub mod client;
pub mod prompts;
pub mod validation;

use crate::bundle::Role;
use crate::config::schema::GeneratorConfig;
use crate::schema;
use client::{ChatMessage, OllamaClient};

/// Result of a successful SQL generation.
#[derive(Debug, Clone)]
pub struct GeneratedSql {
    /// The cleaned, validated SQL text.
    pub sql: String,
    /// Model name used for generation.
    pub model: String,
    /// Latency of the LLM call in milliseconds.
    pub latency_ms: u64,
}

/// Check whether the generator can be used right now: flag on, Ollama
/// reachable with at least one model loaded.
pub fn is_available(config: &GeneratorConfig) -> bool {
    if !config.enabled {
        return false;
    }
    OllamaClient::from_config(config).is_healthy()
}

/// Generate the display SQL for a question against a domain schema.
///
/// Returns `Err` when the generator is disabled, the domain is unknown, the
/// LLM call fails, or validation rejects the response. The caller treats any
/// error as "use the canned SQL".
pub fn generate_sql(
    config: &GeneratorConfig,
    domain: &str,
    question: &str,
    role: Role,
) -> Result<GeneratedSql> {
    if !config.enabled {
        anyhow::bail!("sql generator is disabled");
    }

    let schema_text = schema::schema_text(domain)?;
    let (system_msg, user_msg) = prompts::build_messages(&schema_text, question, role);
    let messages = vec![ChatMessage::system(system_msg), ChatMessage::user(user_msg)];

    let client = OllamaClient::from_config(config);
    let start = Instant::now();
    let raw = client.chat(&messages)?;
    let latency_ms = start.elapsed().as_millis() as u64;

    let sql = validation::clean_sql(&raw);
    validation::check_sql_shape(&sql)?;

    Ok(GeneratedSql {
        sql,
        model: client.model_name().to_string(),
        latency_ms,
    })
}
