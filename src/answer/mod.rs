/// Answer pipeline — the assistant's one entry point.
///
/// Linear, mirroring the shape a real deployment would have:
///
/// 1. **Dispatch** the question to a demo bundle (keyword rules, total).
/// 2. **SQL**: the bundle's canned query, or the generator's output when the
///    LLM path is enabled and healthy. Generation failures fall back to the
///    canned query and the reason is kept for diagnostics.
/// 3. **Insights**: the bundle's baked narrative by default; with
///    `[answer] derive_insights = true`, the chart kind is re-recommended
///    from the question and the narrative recomputed from the table.
/// 4. **Assemble** the [`Answer`] and append one query-log entry.
///
/// There is no failure path out of this function — the default-match
/// dispatcher and the canned-SQL fallback make the pipeline total.
use std::time::Instant;

use serde::Serialize;

use crate::analytics::logger;
use crate::bundle::{Bundle, BundleKind, ChartRef, Role, Table};
use crate::config::NliConfig;
use crate::dispatch;
use crate::generator;
use crate::insights::{self, chart};

// ---------------------------------------------------------------------------
// Answer types
// ---------------------------------------------------------------------------

/// Where the displayed SQL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlSource {
    /// The matched bundle's canned query.
    Canned,
    /// The LLM generator wrote it.
    Generated,
}

impl std::fmt::Display for SqlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canned => write!(f, "canned"),
            Self::Generated => write!(f, "generated"),
        }
    }
}

/// A complete answer to one question.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    #[serde(serialize_with = "serialize_role_display")]
    pub role: Role,
    pub bundle: BundleKind,
    /// Display-only query text — never executed.
    pub sql: String,
    pub sql_source: SqlSource,
    pub chart: ChartRef,
    pub narrative: String,
    pub key_points: Vec<String>,
    pub role_insight: String,
    pub table: Table,
    /// Whether narrative text was derived from the table.
    pub derived: bool,
    /// Time spent building the answer (excludes the adapters' simulated
    /// latency).
    pub elapsed_ms: u64,
    /// Why the generator fell back to canned SQL, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

fn serialize_role_display<S: serde::Serializer>(role: &Role, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&role.to_string())
}

impl Answer {
    /// The table as an array of JSON records, preserving column order within
    /// each object — the fixture shape a real backend would return.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.table
            .rows
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (column, cell) in self.table.columns.iter().zip(row) {
                    let value = match cell {
                        crate::bundle::Cell::Text(s) => serde_json::Value::String(s.clone()),
                        crate::bundle::Cell::Number(n) => serde_json::json!(n),
                    };
                    obj.insert(column.clone(), value);
                }
                serde_json::Value::Object(obj)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Answer a question for a role under the given configuration.
pub fn answer(question: &str, role: Role, config: &NliConfig) -> Answer {
    let start = Instant::now();

    let kind = dispatch::dispatch(question);
    let bundle = Bundle::demo(kind);

    // SQL: generated when the LLM path is on, canned otherwise.
    let mut sql = bundle.sql.clone();
    let mut sql_source = SqlSource::Canned;
    let mut fallback_reason = None;
    if config.generator.enabled {
        match generator::generate_sql(
            &config.generator,
            &config.general.default_domain,
            question,
            role,
        ) {
            Ok(generated) => {
                sql = generated.sql;
                sql_source = SqlSource::Generated;
            }
            Err(err) => {
                let reason = format!("sql generation failed: {err:#}");
                eprintln!("[nli] {reason}");
                fallback_reason = Some(reason);
            }
        }
    }

    // Narrative: baked demo strings, or derived from the table.
    let (chart_ref, narrative, key_points, role_insight) = if config.answer.derive_insights {
        let kind_rec = chart::recommend(question, &bundle.table);
        let derived = insights::generate(&bundle.table, kind_rec, role);
        (
            ChartRef {
                kind: kind_rec,
                url: bundle.chart.url.clone(),
            },
            derived.summary,
            derived.key_points,
            derived.role_insight,
        )
    } else {
        (
            bundle.chart.clone(),
            bundle.narrative.clone(),
            bundle.key_points.clone(),
            bundle.role_insights.for_role(role).to_string(),
        )
    };

    let answer = Answer {
        question: question.to_string(),
        role,
        bundle: kind,
        sql,
        sql_source,
        chart: chart_ref,
        narrative,
        key_points,
        role_insight,
        table: bundle.table.clone(),
        derived: config.answer.derive_insights,
        elapsed_ms: start.elapsed().as_millis() as u64,
        fallback_reason,
    };

    if let Err(err) = logger::log_query(
        &config.logging,
        &answer.question,
        &answer.role.to_string(),
        &answer.bundle.to_string(),
        &answer.sql_source.to_string(),
        answer.derived,
        answer.elapsed_ms,
    ) {
        eprintln!("[nli] failed to write query log: {err:#}");
    }

    answer
}

/// Sleep for the configured simulated backend latency.
///
/// Called by the chat and web adapters around [`answer`] — the one
/// suspension point the demo has. Fixed duration, not cancellable.
pub fn simulate_latency(config: &NliConfig) {
    let ms = config.answer.simulate_latency_ms;
    if ms > 0 {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Config with logging off so tests never touch the filesystem.
    fn test_config() -> NliConfig {
        let mut config = NliConfig::default();
        config.logging.enabled = false;
        config
    }

    #[test]
    fn baked_answer_returns_fixture_strings() {
        let config = test_config();
        let answer = answer("What are the sales by region?", Role::Analyst, &config);

        assert_eq!(answer.bundle, BundleKind::Regions);
        assert_eq!(answer.sql_source, SqlSource::Canned);
        assert!(answer.narrative.starts_with("Analysis shows that North leads"));
        assert_eq!(answer.key_points.len(), 4);
        assert!(answer.role_insight.contains("regional performance differences"));
        assert!(!answer.derived);
        assert!(answer.fallback_reason.is_none());
    }

    #[test]
    fn derived_answer_recomputes_from_the_table() {
        let mut config = test_config();
        config.answer.derive_insights = true;

        let answer = answer("What are the sales by region?", Role::Analyst, &config);
        assert!(answer.derived);
        // With a four-segment single-value table and no keyword hints, the
        // recommender picks a pie, and the derived text follows the data —
        // South leads, not North.
        assert_eq!(answer.chart.kind, crate::bundle::ChartKind::Pie);
        assert!(answer.narrative.contains("South"));
        assert!(!answer.narrative.contains("North leads"));
    }

    #[test]
    fn role_selects_the_insight_string() {
        let config = test_config();
        let exec = answer("sales by region", Role::Executive, &config);
        assert!(exec.role_insight.starts_with("From an executive perspective"));

        let finance = answer("sales by region", Role::Finance, &config);
        assert!(finance.role_insight.starts_with("From a financial perspective"));
    }

    #[test]
    fn records_preserve_column_order_and_types() {
        let config = test_config();
        let answer = answer("compare north and south", Role::Analyst, &config);

        let records = answer.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["region"], "South");
        assert_eq!(records[0]["total_sales"], 134364.82);
    }

    #[test]
    fn answer_serializes_with_display_role() {
        let config = test_config();
        let answer = answer("top products by revenue", Role::SalesManager, &config);
        let json = serde_json::to_value(&answer).unwrap();

        assert_eq!(json["role"], "Sales Manager");
        assert_eq!(json["bundle"], "products");
        assert_eq!(json["sql_source"], "canned");
        assert_eq!(json["chart"]["kind"], "bar");
    }

    #[test]
    fn disabled_generator_never_sets_fallback_reason() {
        let config = test_config();
        let answer = answer("anything", Role::Analyst, &config);
        assert_eq!(answer.sql_source, SqlSource::Canned);
        assert!(answer.fallback_reason.is_none());
    }

    #[test]
    fn zero_latency_returns_immediately() {
        let mut config = test_config();
        config.answer.simulate_latency_ms = 0;
        let start = std::time::Instant::now();
        simulate_latency(&config);
        assert!(start.elapsed().as_millis() < 100);
    }
}
