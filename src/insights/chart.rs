//! Chart-kind recommendation.
//!
//! Picks the chart family a result is best shown as, from question keywords
//! first and the table's shape second. Selection only — nothing here draws;
//! the kind feeds the insights engine and the chart reference on the answer.

use crate::bundle::{Cell, ChartKind, Table};

/// Recommend a chart kind for a question and its result table.
///
/// Keyword checks run first (a question that says "trend" wants a line even
/// if the data would also make a fine bar chart), then the table's shape
/// decides, and bar is the final default.
pub fn recommend(question: &str, table: &Table) -> ChartKind {
    let q = question.to_lowercase();

    const TIME_WORDS: [&str; 8] = [
        "trend",
        "over time",
        "by month",
        "by year",
        "by quarter",
        "monthly",
        "yearly",
        "quarterly",
    ];
    if TIME_WORDS.iter().any(|w| q.contains(w)) {
        return ChartKind::Line;
    }

    const COMPARE_WORDS: [&str; 5] = ["compare", "comparison", "versus", "vs", "difference between"];
    if COMPARE_WORDS.iter().any(|w| q.contains(w)) {
        return ChartKind::Bar;
    }

    const SHARE_WORDS: [&str; 8] = [
        "distribution",
        "proportion",
        "percentage",
        "share",
        "ratio",
        "breakdown",
        "composition",
        "spread",
    ];
    if SHARE_WORDS.iter().any(|w| q.contains(w)) {
        return ChartKind::Pie;
    }

    const CORRELATION_WORDS: [&str; 4] = ["correlation", "relationship", "scatter", "between"];
    if CORRELATION_WORDS.iter().any(|w| q.contains(w)) && table.column_count() >= 3 {
        return ChartKind::Scatter;
    }

    // Shape-based fallbacks.
    let numeric = table.numeric_columns();

    // One category column against one value column: pie for a handful of
    // segments, bar otherwise.
    if table.column_count() == 2 && numeric.len() == 1 {
        let category_col = table.category_column(numeric[0]);
        let distinct = distinct_labels(table, category_col);
        if (2..=6).contains(&distinct) {
            return ChartKind::Pie;
        }
        return ChartKind::Bar;
    }

    // A time-named column next to numbers reads as a series.
    let has_time_col = table.columns.iter().any(|c| {
        let lower = c.to_ascii_lowercase();
        lower.contains("date") || lower.contains("time") || lower.contains("year")
    });
    if has_time_col && !numeric.is_empty() {
        return ChartKind::Line;
    }

    if !numeric.is_empty() && table.column_count() >= 2 {
        return ChartKind::Bar;
    }

    ChartKind::Bar
}

fn distinct_labels(table: &Table, col: usize) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for row in &table.rows {
        let label = match row.get(col) {
            Some(Cell::Text(s)) => s.clone(),
            Some(Cell::Number(v)) => format!("{v}"),
            None => continue,
        };
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{Bundle, BundleKind};

    #[test]
    fn trend_questions_get_lines() {
        let table = &Bundle::demo(BundleKind::Regions).table;
        assert_eq!(recommend("sales trend by month", table), ChartKind::Line);
        assert_eq!(recommend("how did we do over time", table), ChartKind::Line);
    }

    #[test]
    fn comparison_questions_get_bars() {
        let table = &Bundle::demo(BundleKind::Comparison).table;
        assert_eq!(recommend("compare north and south", table), ChartKind::Bar);
        assert_eq!(recommend("north versus south", table), ChartKind::Bar);
    }

    #[test]
    fn share_questions_get_pies() {
        let table = &Bundle::demo(BundleKind::Categories).table;
        assert_eq!(
            recommend("what is the sales distribution by category?", table),
            ChartKind::Pie
        );
        assert_eq!(recommend("revenue breakdown", table), ChartKind::Pie);
    }

    #[test]
    fn small_two_column_tables_default_to_pie() {
        // No keyword hits: the shape heuristic sees one category column with
        // four distinct labels and picks a pie.
        let table = &Bundle::demo(BundleKind::Regions).table;
        assert_eq!(recommend("what are the sales?", table), ChartKind::Pie);
    }

    #[test]
    fn many_category_tables_fall_back_to_bar() {
        let table = Table {
            columns: vec!["city".to_string(), "orders".to_string()],
            rows: (0..9)
                .map(|i| {
                    vec![
                        Cell::Text(format!("city-{i}")),
                        Cell::Number(f64::from(i) * 10.0),
                    ]
                })
                .collect(),
        };
        assert_eq!(recommend("orders by city", &table), ChartKind::Bar);
    }
}
