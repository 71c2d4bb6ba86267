//! Keyword dispatcher contract tests.
//!
//! The dispatcher is the demo's whole "query understanding" layer, so its
//! rule table is pinned down exhaustively here: each rule, the rule order,
//! and the default fallback.

use nli::bundle::{BundleKind, EXAMPLE_QUESTIONS};
use nli::dispatch::dispatch;

// ---------------------------------------------------------------------------
// Rule 1: region (without compare)
// ---------------------------------------------------------------------------

#[test]
fn region_inputs_match_the_regions_bundle() {
    assert_eq!(dispatch("sales by region"), BundleKind::Regions);
    assert_eq!(dispatch("What are the sales by region?"), BundleKind::Regions);
    assert_eq!(dispatch("regional performance"), BundleKind::Regions);
    assert_eq!(dispatch("REGION?"), BundleKind::Regions);
}

#[test]
fn region_with_compare_is_not_a_region_match() {
    assert_eq!(dispatch("compare regions"), BundleKind::Comparison);
    assert_eq!(dispatch("compare sales across region"), BundleKind::Comparison);
}

// ---------------------------------------------------------------------------
// Rule 2: product + (top | revenue)
// ---------------------------------------------------------------------------

#[test]
fn product_inputs_need_a_qualifier() {
    assert_eq!(dispatch("top products"), BundleKind::Products);
    assert_eq!(dispatch("product revenue"), BundleKind::Products);
    assert_eq!(
        dispatch("show me the top 5 products by revenue"),
        BundleKind::Products
    );
}

#[test]
fn bare_product_falls_through_to_the_default() {
    assert_eq!(dispatch("products"), BundleKind::Regions);
    assert_eq!(dispatch("tell me about the product"), BundleKind::Regions);
}

#[test]
fn revenue_without_product_is_not_a_product_match() {
    assert_eq!(dispatch("total revenue"), BundleKind::Regions);
}

// ---------------------------------------------------------------------------
// Rule 3: compare, or north + south
// ---------------------------------------------------------------------------

#[test]
fn compare_inputs_match_the_comparison_bundle() {
    assert_eq!(dispatch("compare anything at all"), BundleKind::Comparison);
    assert_eq!(dispatch("Compare North and South sales"), BundleKind::Comparison);
}

#[test]
fn north_and_south_together_match_comparison() {
    assert_eq!(dispatch("north vs south"), BundleKind::Comparison);
    assert_eq!(dispatch("is south beating north?"), BundleKind::Comparison);
}

#[test]
fn north_or_south_alone_does_not() {
    assert_eq!(dispatch("how is the north doing"), BundleKind::Regions);
    assert_eq!(dispatch("south results"), BundleKind::Regions);
}

// ---------------------------------------------------------------------------
// Rule 4: category | distribution
// ---------------------------------------------------------------------------

#[test]
fn category_inputs_match_the_categories_bundle() {
    assert_eq!(dispatch("sales by category"), BundleKind::Categories);
    assert_eq!(dispatch("category split"), BundleKind::Categories);
    assert_eq!(dispatch("show the distribution"), BundleKind::Categories);
    assert_eq!(
        dispatch("What is the sales distribution by category?"),
        BundleKind::Categories
    );
}

#[test]
fn earlier_rules_shadow_category() {
    // "region" wins before "category" is ever checked.
    assert_eq!(dispatch("category by region"), BundleKind::Regions);
    // "compare" wins before "distribution".
    assert_eq!(dispatch("compare the distribution"), BundleKind::Comparison);
}

// ---------------------------------------------------------------------------
// Rule 5: default
// ---------------------------------------------------------------------------

#[test]
fn anything_else_defaults_to_regions() {
    for input in [
        "",
        "   ",
        "hello",
        "what can you do?",
        "42",
        "produce revenue charts", // "produce" is not "product"
        "show me everything",
    ] {
        assert_eq!(dispatch(input), BundleKind::Regions, "input: {input:?}");
    }
}

#[test]
fn dispatch_never_panics_on_odd_input() {
    // Total function — anything in, a bundle out.
    let long = "x".repeat(10_000);
    for input in ["😀😀😀", "\0", "ネコ", long.as_str()] {
        let _ = dispatch(input);
    }
}

// ---------------------------------------------------------------------------
// Example questions
// ---------------------------------------------------------------------------

#[test]
fn shipped_example_questions_hit_their_bundles() {
    for (question, expected) in EXAMPLE_QUESTIONS {
        assert_eq!(dispatch(question), expected, "question: {question}");
    }
}
