/// Configuration schema and defaults for the whole assistant.
///
/// Defines the TOML-serializable structure with sections `[general]`,
/// `[answer]`, `[generator]`, `[render]`, and `[logging]`. Every field has
/// a built-in default; users only set what they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration. Maps directly to `~/.nli/config.toml` and
/// `.nli.toml`. Missing sections and fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NliConfig {
    pub general: GeneralConfig,
    pub answer: AnswerConfig,
    pub generator: GeneratorConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

/// Defaults applied when a command does not specify a role or domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Viewer persona used when `--role` is omitted.
    pub default_role: String,
    /// Data domain used when `--domain` is omitted.
    pub default_domain: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_role: "Analyst".to_string(),
            default_domain: "sales".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [answer]
// ---------------------------------------------------------------------------

/// Answer pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    /// Artificial delay standing in for a backend round trip, applied by the
    /// chat and web adapters. Zero disables it. Not cancellable, not retried.
    pub simulate_latency_ms: u64,
    /// Recompute narrative, key points, role insight, and chart kind from the
    /// matched bundle's table instead of returning the baked demo strings.
    pub derive_insights: bool,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            simulate_latency_ms: 1500,
            derive_insights: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [generator]
// ---------------------------------------------------------------------------

/// LLM SQL generator settings (display-only SQL via a local Ollama).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Whether SQL generation is enabled (default: false, opt-in).
    pub enabled: bool,
    /// Ollama model name.
    pub model: String,
    /// Ollama HTTP base URL.
    pub ollama_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "qwen2.5-coder:1.5b".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [render]
// ---------------------------------------------------------------------------

/// Terminal rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum data rows printed per answer before truncation.
    pub max_table_rows: usize,
    /// Whether terminal output uses color.
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_table_rows: 20,
            color: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Query log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether query logging is enabled.
    pub enabled: bool,
    /// Path to the query log file. `~` expands to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.nli/query-log.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl NliConfig {
    /// Annotated default config file content, written by `nli config init`.
    pub fn default_toml() -> String {
        r#"# nli Configuration
# Natural Language Insights
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (NLI_*)
#   2. Project config (.nli.toml in current directory)
#   3. User global config (~/.nli/config.toml)
#   4. Built-in defaults

[general]
default_role = "Analyst"       # Analyst | Sales Manager | Executive | Finance
default_domain = "sales"

[answer]
simulate_latency_ms = 1500     # Artificial "backend" delay in chat/web; 0 disables
derive_insights = false        # true: recompute narrative from the result table

[generator]
enabled = false                # Opt-in: set true or NLI_GENERATOR=1
model = "qwen2.5-coder:1.5b"
ollama_url = "http://localhost:11434"
timeout_ms = 30000

[render]
max_table_rows = 20
color = true

[logging]
enabled = true
path = "~/.nli/query-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
