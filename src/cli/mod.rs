//! CLI command implementations.
//!
//! Subcommand handlers for:
//! - `nli ask "question"` — one-shot answer, text or JSON
//! - `nli chat` — interactive session with role switching
//! - `nli schema` — print a domain schema
//! - `nli stats` — question statistics from the query log
//! - `nli health` — check config, generator, and log
//! - `nli config show|init|set|reset` — configuration management

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;

use crate::analytics::{logger, reporter};
use crate::answer::{self, Answer, SqlSource};
use crate::bundle::{BundleKind, EXAMPLE_QUESTIONS, Role};
use crate::config::{self, NliConfig};
use crate::generator;
use crate::render;
use crate::schema;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Load config and apply the terminal color setting.
fn load_config() -> NliConfig {
    let cfg = config::load();
    if !cfg.render.color {
        colored::control::set_override(false);
    }
    cfg
}

// ---------------------------------------------------------------------------
// nli ask
// ---------------------------------------------------------------------------

/// Answer one question and print it.
pub fn run_ask(
    question: &str,
    role: Option<&str>,
    domain: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut cfg = load_config();
    if let Some(domain) = domain {
        cfg.general.default_domain = domain.to_string();
    }
    let role = Role::parse(role.unwrap_or(&cfg.general.default_role));
    let answer = answer::answer(question, role, &cfg);

    match format {
        OutputFormat::Json => print_answer_json(&answer)?,
        _ => print_answer_text(&answer, &cfg),
    }

    Ok(())
}

fn print_answer_text(answer: &Answer, cfg: &NliConfig) {
    println!("{}", "NLI Answer".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Question:".bold(), answer.question);
    println!("  {} {}", "Role:    ".bold(), answer.role);
    println!(
        "  {} {}",
        "Bundle:  ".bold(),
        colorize_bundle(answer.bundle)
    );
    println!(
        "  {} {} — {}",
        "Chart:   ".bold(),
        answer.chart.kind,
        answer.chart.url.dimmed()
    );
    println!();

    println!("{}", answer.narrative);
    println!();

    println!("{}", "Key Points".bold().cyan());
    for point in &answer.key_points {
        println!("  • {point}");
    }
    println!();

    println!("{}", format!("Role Insight — {}", answer.role).bold().cyan());
    println!("  {}", answer.role_insight);
    println!();

    println!("{}", "Data".bold().cyan());
    for line in render::table_lines(&answer.table, cfg.render.max_table_rows) {
        println!("  {line}");
    }
    println!();

    let sql_label = match answer.sql_source {
        SqlSource::Canned => "SQL".to_string(),
        SqlSource::Generated => "SQL (generated)".to_string(),
    };
    println!("{}", sql_label.bold().cyan());
    for line in answer.sql.lines() {
        println!("  {}", line.dimmed());
    }

    if let Some(ref reason) = answer.fallback_reason {
        println!();
        println!("  {} {}", "Fallback:".bold(), reason.yellow());
    }
}

fn print_answer_json(answer: &Answer) -> Result<()> {
    let mut value = serde_json::to_value(answer)?;
    // The fixture-shaped record list alongside the columns/rows table.
    value["records"] = serde_json::Value::Array(answer.records());
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// nli chat
// ---------------------------------------------------------------------------

/// Interactive chat loop.
///
/// Outer loop picks the role; the inner loop answers questions until the
/// user types `change` (back to role selection) or `exit`.
pub fn run_chat(role: Option<&str>) -> Result<()> {
    let mut cfg = load_config();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", "=== Natural Language Insights ===".bold().cyan());
    println!("Ask about the demo sales data. Type 'exit' to quit.");
    println!();
    println!("{}", "Example questions:".bold());
    for (example, _) in EXAMPLE_QUESTIONS {
        println!("  • {example}");
    }
    println!();

    // A --role flag answers the first role prompt; later prompts (after
    // `change`) ask again.
    let mut preset_role = role.map(str::to_string);

    loop {
        let role = match preset_role.take() {
            Some(r) => Role::parse(&r),
            None => {
                let prompt = format!("User role (default: {}): ", cfg.general.default_role);
                match read_line(&mut lines, &prompt)? {
                    Some(input) if !input.is_empty() => Role::parse(&input),
                    Some(_) => Role::parse(&cfg.general.default_role),
                    None => return Ok(()),
                }
            }
        };

        // The domain only steers the SQL generator's schema; the demo
        // bundles answer regardless.
        let domain_prompt = format!("Data domain (default: {}): ", cfg.general.default_domain);
        match read_line(&mut lines, &domain_prompt)? {
            Some(input) if !input.is_empty() => cfg.general.default_domain = input,
            Some(_) => {}
            None => return Ok(()),
        }

        println!(
            "Answering as {} over the {} domain.",
            role.to_string().bold(),
            cfg.general.default_domain
        );

        loop {
            let Some(question) =
                read_line(&mut lines, "\nQuestion ('change' to switch role, 'exit' to quit): ")?
            else {
                return Ok(());
            };

            match question.to_lowercase().as_str() {
                "" => continue,
                "exit" | "quit" => return Ok(()),
                "change" => break,
                _ => {}
            }

            println!("{}", "Thinking…".dimmed());
            answer::simulate_latency(&cfg);

            let answer = answer::answer(&question, role, &cfg);
            println!();
            print_answer_text(&answer, &cfg);
        }
    }
}

/// Print a prompt and read one trimmed line. `None` on EOF.
fn read_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// nli schema
// ---------------------------------------------------------------------------

/// Print a domain schema.
pub fn run_schema(domain: Option<&str>) -> Result<()> {
    let cfg = load_config();
    let domain = domain.unwrap_or(&cfg.general.default_domain);
    let text = schema::schema_text(domain)?;

    println!("{}", format!("Schema — {domain}").bold().cyan());
    println!("{}", "=".repeat(50));
    println!("{text}");
    Ok(())
}

// ---------------------------------------------------------------------------
// nli stats
// ---------------------------------------------------------------------------

/// Show question statistics.
pub fn run_stats(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let cfg = load_config();
    let stats = reporter::compute_stats(&cfg.logging, days);

    if stats.total_questions == 0 {
        println!(
            "{}",
            "No data yet. Ask some questions to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_stats_json(&stats)?,
        OutputFormat::Csv => print_stats_csv(&stats),
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &reporter::Stats) {
    println!("{}", "NLI Question Report".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    println!("  {} {}", "Total questions:".bold(), stats.total_questions);
    println!("  {} {}", "Generated SQL:  ".bold(), stats.generated_sql);
    println!(
        "  {} {:.0} ms",
        "Avg answer time:".bold(),
        stats.avg_elapsed_ms
    );
    println!();

    let dist = &stats.bundle_distribution;
    println!("{}", "Bundle Distribution".bold().cyan());
    println!(
        "  Regions: {} ({:.0}%)  Products: {} ({:.0}%)  Comparison: {} ({:.0}%)  Categories: {} ({:.0}%)",
        dist.regions,
        dist.pct(dist.regions),
        dist.products,
        dist.pct(dist.products),
        dist.comparison,
        dist.pct(dist.comparison),
        dist.categories,
        dist.pct(dist.categories),
    );
    println!();

    if !stats.role_counts.is_empty() {
        println!("{}", "Questions by Role".bold().cyan());
        for (role, count) in &stats.role_counts {
            println!("  {:<16} {:>5}", role, count);
        }
        println!();
    }

    if !stats.recent.is_empty() {
        println!("{}", "Recent Questions".bold().cyan());
        for (i, recent) in stats.recent.iter().enumerate() {
            let line = format!(
                "  {:<12} {}",
                recent.bundle,
                truncate(&recent.question, 44)
            );
            if i % 2 == 0 {
                println!("{line}");
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
}

fn print_stats_json(stats: &reporter::Stats) -> Result<()> {
    let value = serde_json::json!({
        "total_questions": stats.total_questions,
        "generated_sql": stats.generated_sql,
        "avg_elapsed_ms": stats.avg_elapsed_ms,
        "bundle_distribution": {
            "regions": stats.bundle_distribution.regions,
            "products": stats.bundle_distribution.products,
            "comparison": stats.bundle_distribution.comparison,
            "categories": stats.bundle_distribution.categories,
        },
        "roles": stats.role_counts.iter().map(|(role, count)| serde_json::json!({
            "role": role,
            "count": count,
        })).collect::<Vec<_>>(),
        "recent": stats.recent.iter().map(|r| serde_json::json!({
            "timestamp": r.timestamp,
            "question": r.question,
            "bundle": r.bundle,
        })).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_stats_csv(stats: &reporter::Stats) {
    println!("bundle,count,pct");
    let dist = &stats.bundle_distribution;
    for (name, count) in [
        ("regions", dist.regions),
        ("products", dist.products),
        ("comparison", dist.comparison),
        ("categories", dist.categories),
    ] {
        println!("{},{},{:.1}", name, count, dist.pct(count));
    }
}

// ---------------------------------------------------------------------------
// nli health
// ---------------------------------------------------------------------------

/// Check system health: config files, generator, query log.
pub fn run_health() -> Result<()> {
    println!("{}", "NLI Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.nli/config.toml found"
        } else {
            "not found (run `nli config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".nli.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item(
        "Defaults",
        true,
        &format!(
            "role {}, domain {}",
            cfg.general.default_role, cfg.general.default_domain
        ),
    );
    print_health_item(
        "Insights",
        true,
        if cfg.answer.derive_insights {
            "derived from result tables"
        } else {
            "baked demo narratives"
        },
    );
    print_health_item(
        "Simulated latency",
        true,
        &format!("{} ms", cfg.answer.simulate_latency_ms),
    );

    print_health_item(
        "SQL generator",
        cfg.generator.enabled,
        if cfg.generator.enabled {
            "enabled"
        } else {
            "disabled (set NLI_GENERATOR=1 to enable)"
        },
    );
    if cfg.generator.enabled {
        let ollama_ok = generator::is_available(&cfg.generator);
        let detail = if ollama_ok {
            format!("reachable at {}", cfg.generator.ollama_url)
        } else {
            "not reachable — is Ollama running?".to_string()
        };
        print_health_item("Ollama", ollama_ok, &detail);
        print_health_item("Model", true, &cfg.generator.model);
    }

    let log_exists = logger::query_log_path(&cfg.logging)
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_entries = if log_exists {
        logger::read_all_entries(&cfg.logging).len()
    } else {
        0
    };
    print_health_item(
        "Query log",
        log_exists,
        &if log_exists {
            format!("{log_entries} entries")
        } else {
            "no log file yet".to_string()
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<20} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// nli config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective NLI Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.nli/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.nli/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".nli.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".nli.toml (not found)".dimmed());
    }
    println!("  {} {}", "·".dimmed(), "NLI_* environment variables".dimmed());

    Ok(())
}

/// Initialize a default config file at `~/.nli/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    println!("  {}", "Edit the file to customize nli behavior.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Colorize a bundle name.
fn colorize_bundle(kind: BundleKind) -> colored::ColoredString {
    let name = kind.to_string();
    match kind {
        BundleKind::Regions => name.green(),
        BundleKind::Products => name.blue(),
        BundleKind::Comparison => name.magenta(),
        BundleKind::Categories => name.yellow(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
