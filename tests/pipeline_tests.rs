//! End-to-end answer pipeline tests.
//!
//! Exercise `answer::answer` the way the adapters call it, with an explicit
//! config (logging off so no test touches the home directory).

use nli::answer::{self, SqlSource};
use nli::bundle::{Bundle, BundleKind, ChartKind, Role};
use nli::config::NliConfig;

fn test_config() -> NliConfig {
    let mut config = NliConfig::default();
    config.logging.enabled = false;
    config
}

// ---------------------------------------------------------------------------
// Baked mode (default)
// ---------------------------------------------------------------------------

#[test]
fn baked_answers_return_the_fixture_verbatim() {
    let config = test_config();

    for (question, kind) in [
        ("What are the sales by region?", BundleKind::Regions),
        ("Show me the top 5 products by revenue", BundleKind::Products),
        ("Compare North and South sales", BundleKind::Comparison),
        ("What is the sales distribution by category?", BundleKind::Categories),
    ] {
        let answer = answer::answer(question, Role::Analyst, &config);
        let bundle = Bundle::demo(kind);

        assert_eq!(answer.bundle, kind);
        assert_eq!(answer.sql, bundle.sql);
        assert_eq!(answer.sql_source, SqlSource::Canned);
        assert_eq!(answer.narrative, bundle.narrative);
        assert_eq!(answer.key_points, bundle.key_points);
        assert_eq!(answer.chart.url, bundle.chart.url);
        assert_eq!(answer.table.rows.len(), bundle.table.rows.len());
        assert!(!answer.derived);
    }
}

#[test]
fn role_picks_the_matching_baked_insight() {
    let config = test_config();
    let bundle = Bundle::demo(BundleKind::Categories);

    for role in Role::ALL {
        let answer = answer::answer("sales by category", role, &config);
        assert_eq!(answer.role_insight, bundle.role_insights.for_role(role));
    }
}

#[test]
fn unmatched_questions_still_produce_a_full_answer() {
    let config = test_config();
    let answer = answer::answer("what's for lunch?", Role::Finance, &config);

    assert_eq!(answer.bundle, BundleKind::Regions);
    assert!(!answer.narrative.is_empty());
    assert!(!answer.key_points.is_empty());
    assert!(!answer.sql.is_empty());
}

// ---------------------------------------------------------------------------
// Derived mode
// ---------------------------------------------------------------------------

#[test]
fn derived_answers_recompute_narrative_and_chart() {
    let mut config = test_config();
    config.answer.derive_insights = true;

    let answer = answer::answer("What are the sales by region?", Role::Analyst, &config);
    assert!(answer.derived);
    // Shape heuristic: four segments, one value column → pie.
    assert_eq!(answer.chart.kind, ChartKind::Pie);
    // Derived text follows the data (South leads), not the baked narrative.
    assert!(answer.narrative.contains("South"));
    assert_ne!(answer.narrative, Bundle::demo(BundleKind::Regions).narrative);
    // The chart URL still points at the bundle's image.
    assert_eq!(answer.chart.url, Bundle::demo(BundleKind::Regions).chart.url);
}

#[test]
fn derived_comparison_respects_the_compare_keyword() {
    let mut config = test_config();
    config.answer.derive_insights = true;

    let answer = answer::answer("Compare North and South sales", Role::Analyst, &config);
    assert_eq!(answer.bundle, BundleKind::Comparison);
    assert_eq!(answer.chart.kind, ChartKind::Bar);
    assert!(answer.narrative.contains("South leads with $134,364.82"));
}

// ---------------------------------------------------------------------------
// Generator fallback
// ---------------------------------------------------------------------------

#[test]
fn disabled_generator_means_canned_sql_and_no_fallback_note() {
    let config = test_config();
    let answer = answer::answer("top products by revenue", Role::Analyst, &config);
    assert_eq!(answer.sql_source, SqlSource::Canned);
    assert!(answer.fallback_reason.is_none());
}

#[test]
fn unreachable_generator_falls_back_to_canned_sql() {
    let mut config = test_config();
    config.generator.enabled = true;
    // Nothing listens here; the request fails fast and the canned SQL wins.
    config.generator.ollama_url = "http://127.0.0.1:1".to_string();
    config.generator.timeout_ms = 200;

    let answer = answer::answer("sales by region", Role::Analyst, &config);
    assert_eq!(answer.sql_source, SqlSource::Canned);
    assert_eq!(answer.sql, Bundle::demo(BundleKind::Regions).sql);
    let reason = answer.fallback_reason.expect("fallback reason recorded");
    assert!(reason.starts_with("sql generation failed"));
}

// ---------------------------------------------------------------------------
// Serialization contract
// ---------------------------------------------------------------------------

#[test]
fn answer_json_has_the_fixture_shape() {
    let config = test_config();
    let answer = answer::answer("Compare North and South sales", Role::Executive, &config);

    let mut value = serde_json::to_value(&answer).unwrap();
    value["records"] = serde_json::Value::Array(answer.records());

    assert_eq!(value["question"], "Compare North and South sales");
    assert_eq!(value["role"], "Executive");
    assert_eq!(value["bundle"], "comparison");
    assert_eq!(value["chart"]["kind"], "bar");
    assert!(value["sql"].as_str().unwrap().starts_with("SELECT"));
    assert_eq!(value["table"]["columns"][1], "total_sales");
    assert_eq!(value["records"][0]["total_sales"], 134364.82);
    assert_eq!(value["records"][1]["region"], "North");
    assert!(value.get("fallback_reason").is_none());
}
