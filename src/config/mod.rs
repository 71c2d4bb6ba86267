/// Configuration system for nli.
///
/// Layered hierarchy, later layers override earlier ones:
///
/// 1. **Built-in defaults** — [`schema::NliConfig::default()`]
/// 2. **User global config** — `~/.nli/config.toml`
/// 3. **Project local config** — `.nli.toml` in the current working directory
/// 4. **Environment variables** — `NLI_*` (highest precedence)
///
/// A malformed TOML file is ignored rather than aborting the command — the
/// assistant always answers, config or no config.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::NliConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration: defaults → global TOML → project
/// TOML → env vars. The single entry point for everything that needs config.
pub fn load() -> NliConfig {
    let mut config = NliConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Parse a TOML config file, if present and well-formed.
fn load_toml_file(path: Option<PathBuf>) -> Option<NliConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nli").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir().ok().map(|cwd| cwd.join(".nli.toml"))
}

/// Path to the global config file, for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Path to the project config file, for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `NLI_*` environment overrides (highest precedence layer).
///
/// - `NLI_ROLE` — default viewer role
/// - `NLI_DOMAIN` — default data domain
/// - `NLI_LATENCY_MS` — simulated backend delay
/// - `NLI_DERIVE_INSIGHTS` — recompute insights from data (`1`/`true`/`yes`/`on`)
/// - `NLI_GENERATOR` — enable the SQL generator
/// - `NLI_GENERATOR_MODEL` — Ollama model name
/// - `NLI_GENERATOR_URL` — Ollama endpoint URL
/// - `NLI_GENERATOR_TIMEOUT_MS` — generator request timeout
/// - `NLI_COLOR` — terminal color on/off
fn apply_env_overrides(config: &mut NliConfig) {
    if let Ok(val) = std::env::var("NLI_ROLE")
        && !val.is_empty()
    {
        config.general.default_role = val;
    }
    if let Ok(val) = std::env::var("NLI_DOMAIN")
        && !val.is_empty()
    {
        config.general.default_domain = val;
    }
    if let Ok(val) = std::env::var("NLI_LATENCY_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.answer.simulate_latency_ms = ms;
    }
    if let Ok(val) = std::env::var("NLI_DERIVE_INSIGHTS") {
        config.answer.derive_insights = is_truthy(&val);
    }

    if let Ok(val) = std::env::var("NLI_GENERATOR") {
        config.generator.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("NLI_GENERATOR_MODEL")
        && !val.is_empty()
    {
        config.generator.model = val;
    }
    if let Ok(val) = std::env::var("NLI_GENERATOR_URL")
        && !val.is_empty()
    {
        config.generator.ollama_url = val;
    }
    if let Ok(val) = std::env::var("NLI_GENERATOR_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.generator.timeout_ms = ms;
    }

    if let Ok(val) = std::env::var("NLI_COLOR") {
        config.render.color = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.nli/config.toml`.
///
/// Creates `~/.nli/` if needed. Errors if the file already exists unless
/// `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.nli/ directory")?;
    }

    fs::write(&path, NliConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set one config key in the global config file, creating it from defaults
/// when missing. Supports dotted keys like `generator.enabled`; the new
/// value is parsed to match the type of the existing value.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&NliConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML")?;
    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.is_empty() {
        anyhow::bail!("empty config key");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected a table above '{leaf}' in '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("YES"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn set_toml_value_updates_string() {
        let mut root: toml::Value = toml::from_str(
            r#"
[general]
default_role = "Analyst"
"#,
        )
        .unwrap();
        set_toml_value(&mut root, "general.default_role", "Executive").unwrap();

        let general = root.as_table().unwrap()["general"].as_table().unwrap();
        assert_eq!(general["default_role"].as_str(), Some("Executive"));
    }

    #[test]
    fn set_toml_value_updates_bool() {
        let mut root: toml::Value = toml::from_str(
            r#"
[generator]
enabled = false
"#,
        )
        .unwrap();
        set_toml_value(&mut root, "generator.enabled", "true").unwrap();

        let generator = root.as_table().unwrap()["generator"].as_table().unwrap();
        assert_eq!(generator["enabled"].as_bool(), Some(true));
    }

    #[test]
    fn set_toml_value_updates_integer() {
        let mut root: toml::Value = toml::from_str(
            r#"
[answer]
simulate_latency_ms = 1500
"#,
        )
        .unwrap();
        set_toml_value(&mut root, "answer.simulate_latency_ms", "0").unwrap();

        let answer = root.as_table().unwrap()["answer"].as_table().unwrap();
        assert_eq!(answer["simulate_latency_ms"].as_integer(), Some(0));
    }

    #[test]
    fn set_toml_value_rejects_unknown_section() {
        let mut root: toml::Value = toml::from_str(
            r#"
[general]
default_role = "Analyst"
"#,
        )
        .unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "value").is_err());
    }

    #[test]
    fn set_toml_value_rejects_bad_integer() {
        let mut root: toml::Value = toml::from_str(
            r#"
[answer]
simulate_latency_ms = 1500
"#,
        )
        .unwrap();
        assert!(set_toml_value(&mut root, "answer.simulate_latency_ms", "soon").is_err());
    }

    #[test]
    fn show_effective_config_round_trips() {
        let toml_str = show_effective_config().unwrap();
        let _: NliConfig = toml::from_str(&toml_str).unwrap();
    }
}
