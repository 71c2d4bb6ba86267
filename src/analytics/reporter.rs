//! Analytics reporter — aggregation over the query log.
//!
//! Reads the JSONL query log and computes the summaries behind `nli stats`
//! and `GET /api/stats`: totals, bundle and role distributions, SQL source
//! split, and the most recent questions.

use std::collections::HashMap;

use crate::analytics::logger::{self, QueryLogEntry};
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Aggregated stats
// ---------------------------------------------------------------------------

/// Summary statistics for `nli stats`.
#[derive(Debug)]
pub struct Stats {
    pub total_questions: usize,
    pub bundle_distribution: BundleDistribution,
    /// (role, count) pairs, most frequent first.
    pub role_counts: Vec<(String, usize)>,
    /// Questions answered with LLM-generated SQL.
    pub generated_sql: usize,
    pub avg_elapsed_ms: f64,
    /// Most recent questions, newest first.
    pub recent: Vec<RecentQuestion>,
}

/// How often each bundle matched.
#[derive(Debug, Default, PartialEq)]
pub struct BundleDistribution {
    pub regions: usize,
    pub products: usize,
    pub comparison: usize,
    pub categories: usize,
}

impl BundleDistribution {
    pub fn total(&self) -> usize {
        self.regions + self.products + self.comparison + self.categories
    }

    /// Percentage for one bundle; 0.0 when there is no data.
    pub fn pct(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (count as f64 / total as f64) * 100.0
        }
    }
}

/// One recently answered question.
#[derive(Debug, Clone)]
pub struct RecentQuestion {
    pub timestamp: String,
    pub question: String,
    pub bundle: String,
}

/// How many recent questions the stats carry.
const RECENT_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Stats computation
// ---------------------------------------------------------------------------

/// Compute aggregate stats, optionally filtered to the last `days` days.
pub fn compute_stats(config: &LoggingConfig, days: Option<u32>) -> Stats {
    let entries = logger::read_entries_since_days(config, days);
    build_stats(&entries)
}

fn build_stats(entries: &[QueryLogEntry]) -> Stats {
    if entries.is_empty() {
        return Stats {
            total_questions: 0,
            bundle_distribution: BundleDistribution::default(),
            role_counts: Vec::new(),
            generated_sql: 0,
            avg_elapsed_ms: 0.0,
            recent: Vec::new(),
        };
    }

    let total_questions = entries.len();
    let bundle_distribution = compute_bundle_distribution(entries);
    let role_counts = compute_role_counts(entries);
    let generated_sql = entries.iter().filter(|e| e.sql_source == "generated").count();
    let avg_elapsed_ms =
        entries.iter().map(|e| e.elapsed_ms).sum::<u64>() as f64 / total_questions as f64;

    let recent = entries
        .iter()
        .rev()
        .take(RECENT_LIMIT)
        .map(|e| RecentQuestion {
            timestamp: e.timestamp.clone(),
            question: e.question.clone(),
            bundle: e.bundle.clone(),
        })
        .collect();

    Stats {
        total_questions,
        bundle_distribution,
        role_counts,
        generated_sql,
        avg_elapsed_ms,
        recent,
    }
}

fn compute_bundle_distribution(entries: &[QueryLogEntry]) -> BundleDistribution {
    let mut dist = BundleDistribution::default();
    for entry in entries {
        match entry.bundle.as_str() {
            "products" => dist.products += 1,
            "comparison" => dist.comparison += 1,
            "categories" => dist.categories += 1,
            // Unknown bundle names from older logs count as the default.
            _ => dist.regions += 1,
        }
    }
    dist
}

/// Group entries by role, most frequent first; ties break alphabetically so
/// output is stable.
fn compute_role_counts(entries: &[QueryLogEntry]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.role.clone()).or_default() += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(question: &str, role: &str, bundle: &str, source: &str, ms: u64) -> QueryLogEntry {
        QueryLogEntry {
            timestamp: format!("2025-01-01T00:00:{:02}+00:00", ms % 60),
            question: question.to_string(),
            role: role.to_string(),
            bundle: bundle.to_string(),
            sql_source: source.to_string(),
            derived: false,
            elapsed_ms: ms,
        }
    }

    #[test]
    fn empty_log_produces_zeroed_stats() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_questions, 0);
        assert_eq!(stats.bundle_distribution, BundleDistribution::default());
        assert!(stats.recent.is_empty());
    }

    #[test]
    fn distribution_counts_each_bundle() {
        let entries = vec![
            entry("a", "Analyst", "regions", "canned", 10),
            entry("b", "Analyst", "products", "canned", 20),
            entry("c", "Executive", "products", "generated", 30),
            entry("d", "Finance", "categories", "canned", 40),
        ];
        let stats = build_stats(&entries);
        assert_eq!(stats.total_questions, 4);
        assert_eq!(stats.bundle_distribution.regions, 1);
        assert_eq!(stats.bundle_distribution.products, 2);
        assert_eq!(stats.bundle_distribution.categories, 1);
        assert_eq!(stats.generated_sql, 1);
        assert_eq!(stats.avg_elapsed_ms, 25.0);
    }

    #[test]
    fn unknown_bundle_names_count_as_regions() {
        let entries = vec![entry("a", "Analyst", "mystery", "canned", 0)];
        assert_eq!(build_stats(&entries).bundle_distribution.regions, 1);
    }

    #[test]
    fn role_counts_sort_by_frequency_then_name() {
        let entries = vec![
            entry("a", "Finance", "regions", "canned", 0),
            entry("b", "Analyst", "regions", "canned", 0),
            entry("c", "Finance", "regions", "canned", 0),
            entry("d", "Executive", "regions", "canned", 0),
        ];
        let stats = build_stats(&entries);
        assert_eq!(stats.role_counts[0], ("Finance".to_string(), 2));
        assert_eq!(stats.role_counts[1], ("Analyst".to_string(), 1));
        assert_eq!(stats.role_counts[2], ("Executive".to_string(), 1));
    }

    #[test]
    fn recent_lists_newest_first_and_caps_at_limit() {
        let entries: Vec<QueryLogEntry> = (0..8)
            .map(|i| entry(&format!("q{i}"), "Analyst", "regions", "canned", i))
            .collect();
        let stats = build_stats(&entries);
        assert_eq!(stats.recent.len(), RECENT_LIMIT);
        assert_eq!(stats.recent[0].question, "q7");
        assert_eq!(stats.recent[4].question, "q3");
    }

    #[test]
    fn bundle_pct_handles_zero_total() {
        let dist = BundleDistribution::default();
        assert_eq!(dist.pct(dist.regions), 0.0);
    }
}
