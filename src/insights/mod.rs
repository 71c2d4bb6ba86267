//! Deterministic insights engine.
//!
//! Turns a result table into narrative text: a summary, a list of key
//! points, and one role-specific insight. The wording depends on the chart
//! kind the result is shown as — bar and pie results talk about leaders and
//! shares, line results about trends, scatter results about correlation.
//!
//! Everything is pure arithmetic over the table; no randomness, no clock.
//! Money columns (see [`crate::render::is_money_column`]) render as
//! currency inside the text, other numbers as grouped two-decimal values.

pub mod chart;

use crate::bundle::{Cell, ChartKind, Role, Table};
use crate::render::{format_amount, format_plain_number};

/// Generated narrative for one result table.
#[derive(Debug, Clone)]
pub struct Insights {
    pub summary: String,
    pub key_points: Vec<String>,
    pub role_insight: String,
}

/// Generate insights for a table shown as `kind`, addressed to `role`.
pub fn generate(table: &Table, kind: ChartKind, role: Role) -> Insights {
    let (summary, key_points) = match kind {
        ChartKind::Bar => bar_insights(table),
        ChartKind::Pie => pie_insights(table),
        ChartKind::Line => line_insights(table),
        ChartKind::Scatter => scatter_insights(table),
        ChartKind::Table => general_insights(table),
    };

    Insights {
        summary,
        key_points,
        role_insight: role_insight(table, role),
    }
}

// ---------------------------------------------------------------------------
// Bar charts — leaders, laggards, averages
// ---------------------------------------------------------------------------

fn bar_insights(table: &Table) -> (String, Vec<String>) {
    let Some(value_col) = table.numeric_column() else {
        return general_insights(table);
    };
    let category_col = table.category_column(value_col);
    let values = table.column_values(value_col);
    if values.is_empty() {
        return general_insights(table);
    }

    let value_name = &table.columns[value_col];
    let category_name = &table.columns[category_col];
    let fmt = |v: f64| format_amount(value_name, v);

    let total: f64 = values.iter().sum();
    let average = total / values.len() as f64;
    let (top_idx, top_val) = arg_max(&values);
    let (bottom_idx, bottom_val) = arg_min(&values);
    let top_label = table.label(top_idx, category_col);
    let bottom_label = table.label(bottom_idx, category_col);
    let top_pct = if total > 0.0 { top_val / total * 100.0 } else { 0.0 };

    let mut summary = format!(
        "Analysis shows that {top_label} leads with {} ({top_pct:.1}% of total), \
         while {bottom_label} has the lowest value at {}.",
        fmt(top_val),
        fmt(bottom_val),
    );

    if values.len() > 2 {
        let above: Vec<String> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > average)
            .map(|(i, _)| table.label(i, category_col))
            .collect();
        match above.len() {
            0 => {}
            1 => summary.push_str(&format!(
                " Only {} performs above the average of {}.",
                above[0],
                fmt(average)
            )),
            k => summary.push_str(&format!(
                " {k} out of {} categories perform above the average of {}.",
                values.len(),
                fmt(average)
            )),
        }
    }

    let mut key_points = vec![
        format!("Total {value_name}: {}", fmt(total)),
        format!("Average {value_name} per {category_name}: {}", fmt(average)),
        format!("Top performer: {top_label} with {}", fmt(top_val)),
        format!("Bottom performer: {bottom_label} with {}", fmt(bottom_val)),
    ];

    if bottom_val > 0.0 {
        let spread_pct = (top_val - bottom_val) / bottom_val * 100.0;
        if spread_pct > 100.0 {
            key_points.push(format!(
                "Wide performance gap: {spread_pct:.1}% difference between top and bottom performers"
            ));
        }
    }

    if values.len() >= 4 && median(&values) < average {
        key_points
            .push("Distribution is skewed, with a few high performers pulling up the average".to_string());
    }

    (summary, key_points)
}

// ---------------------------------------------------------------------------
// Pie charts — shares and concentration
// ---------------------------------------------------------------------------

fn pie_insights(table: &Table) -> (String, Vec<String>) {
    let Some(value_col) = table.numeric_column() else {
        return general_insights(table);
    };
    let category_col = table.category_column(value_col);
    let values = table.column_values(value_col);
    if values.is_empty() {
        return general_insights(table);
    }

    let value_name = &table.columns[value_col];
    let fmt = |v: f64| format_amount(value_name, v);

    let total: f64 = values.iter().sum();
    let pct = |v: f64| if total > 0.0 { v / total * 100.0 } else { 0.0 };

    // Indices sorted by value, largest first.
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(std::cmp::Ordering::Equal));

    let summary = if values.len() <= 3 {
        let segments: Vec<String> = (0..values.len())
            .map(|i| format!("{} ({:.1}%)", table.label(i, category_col), pct(values[i])))
            .collect();
        format!("The breakdown shows: {}.", segments.join(", "))
    } else {
        let first = order[0];
        let second = order[1];
        let combined = pct(values[first]) + pct(values[second]);
        let mut s = format!(
            "The top two categories, {} and {}, account for {combined:.1}% of the total.",
            table.label(first, category_col),
            table.label(second, category_col),
        );
        if combined > 75.0 {
            s.push_str(" This indicates a high concentration in these categories.");
        } else if combined < 40.0 {
            s.push_str(" This suggests a relatively even distribution across categories.");
        }
        s
    };

    let largest = order[0];
    let mut key_points = vec![
        format!("Total {value_name}: {}", fmt(total)),
        format!(
            "Largest segment: {} ({:.1}%)",
            table.label(largest, category_col),
            pct(values[largest])
        ),
        format!("Number of categories: {}", values.len()),
    ];

    if values.len() > 3 {
        let small = values.iter().filter(|v| pct(**v) < 5.0).count();
        if small > 0 {
            key_points.push(format!("{small} categories account for less than 5% each"));
        }
    }

    (summary, key_points)
}

// ---------------------------------------------------------------------------
// Line charts — trends over an ordered axis
// ---------------------------------------------------------------------------

fn line_insights(table: &Table) -> (String, Vec<String>) {
    let Some(value_col) = table.numeric_column() else {
        return general_insights(table);
    };
    let time_col = time_column(table, value_col);
    let value_name = &table.columns[value_col];
    let fmt = |v: f64| format_amount(value_name, v);

    // Row indices ordered by the time column.
    let mut order: Vec<usize> = (0..table.rows.len()).collect();
    order.sort_by(|&a, &b| table.rows[a][time_col].sort_key_cmp(&table.rows[b][time_col]));

    let series: Vec<f64> = order
        .iter()
        .filter_map(|&i| table.rows[i].get(value_col).and_then(Cell::as_number))
        .collect();
    if series.len() < 2 {
        return general_insights(table);
    }

    let earliest = series[0];
    let latest = series[series.len() - 1];
    let change = latest - earliest;
    let pct_change = if earliest != 0.0 { change / earliest * 100.0 } else { 0.0 };

    let trend = if pct_change > 5.0 {
        "upward"
    } else if pct_change < -5.0 {
        "downward"
    } else {
        "stable"
    };

    let (max_pos, max_val) = arg_max(&series);
    let max_label = table.label(order[max_pos], time_col);

    let mut summary = format!(
        "The data shows a {trend} trend with a {:.1}% {} from {} to {}.",
        pct_change.abs(),
        if pct_change >= 0.0 { "increase" } else { "decrease" },
        fmt(earliest),
        fmt(latest),
    );
    if max_val != latest && max_val != earliest {
        summary.push_str(&format!(
            " The highest point was {} at {max_label}.",
            fmt(max_val)
        ));
    }

    let mut key_points = vec![
        format!(
            "Overall change: {}{} ({pct_change:+.1}%)",
            if change >= 0.0 { "+" } else { "-" },
            fmt(change.abs())
        ),
        format!("Starting value: {}", fmt(earliest)),
        format!("Ending value: {}", fmt(latest)),
        format!("Peak value: {} at {max_label}", fmt(max_val)),
    ];

    if series.len() >= 4 {
        let mean = series.iter().sum::<f64>() / series.len() as f64;
        if mean != 0.0 {
            let cv = sample_std(&series) / mean * 100.0;
            if cv > 20.0 {
                key_points.push(format!("High volatility detected (CV: {cv:.1}%)"));
            } else if cv < 5.0 {
                key_points.push(format!(
                    "Very stable trend with minimal fluctuation (CV: {cv:.1}%)"
                ));
            }
        }
    }

    (summary, key_points)
}

/// First column whose name looks time-like; falls back to the first
/// non-value column.
fn time_column(table: &Table, value_col: usize) -> usize {
    table
        .columns
        .iter()
        .position(|c| {
            let lower = c.to_ascii_lowercase();
            lower.contains("date")
                || lower.contains("time")
                || lower.contains("month")
                || lower.contains("year")
        })
        .unwrap_or_else(|| table.category_column(value_col))
}

// ---------------------------------------------------------------------------
// Scatter plots — correlation between two numeric columns
// ---------------------------------------------------------------------------

fn scatter_insights(table: &Table) -> (String, Vec<String>) {
    let numeric = table.numeric_columns();
    if numeric.len() < 2 {
        return (
            "The scatter plot shows the relationship between two variables.".to_string(),
            Vec::new(),
        );
    }

    let (x_col, y_col) = (numeric[0], numeric[1]);
    let xs = table.column_values(x_col);
    let ys = table.column_values(y_col);
    let Some(r) = pearson(&xs, &ys) else {
        return (
            "The scatter plot shows the relationship between two variables.".to_string(),
            Vec::new(),
        );
    };

    let strength = if r.abs() > 0.7 {
        "strong"
    } else if r.abs() > 0.3 {
        "moderate"
    } else {
        "weak"
    };
    let direction = if r > 0.0 { "positive" } else { "negative" };
    let x_name = &table.columns[x_col];
    let y_name = &table.columns[y_col];

    let mut summary = format!(
        "There is a {strength} {direction} correlation ({r:.2}) between {x_name} and {y_name}."
    );
    if r > 0.5 {
        summary.push_str(&format!(
            " As {x_name} increases, {y_name} tends to increase as well."
        ));
    } else if r < -0.5 {
        summary.push_str(&format!(" As {x_name} increases, {y_name} tends to decrease."));
    } else {
        summary.push_str(" The relationship between these variables is not very pronounced.");
    }

    let mut key_points = vec![
        format!("Correlation coefficient: {r:.2}"),
        format!("Sample size: {} data points", xs.len()),
    ];

    let outliers = outlier_count(&xs, &ys);
    if outliers > 0 {
        key_points.push(format!(
            "Contains {outliers} potential outliers that may affect the correlation"
        ));
    }

    (summary, key_points)
}

/// Rows more than two standard deviations from the mean on either axis.
fn outlier_count(xs: &[f64], ys: &[f64]) -> usize {
    let beyond = |values: &[f64], v: f64| {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let std = sample_std(values);
        (v - mean).abs() > 2.0 * std
    };
    xs.iter()
        .zip(ys)
        .filter(|(x, y)| beyond(xs, **x) || beyond(ys, **y))
        .count()
}

// ---------------------------------------------------------------------------
// General fallback — plain profiling
// ---------------------------------------------------------------------------

fn general_insights(table: &Table) -> (String, Vec<String>) {
    let rows = table.row_count();
    let cols = table.column_count();

    let mut summary = format!("The query returned {rows} results with {cols} columns.");
    if let Some(value_col) = table.numeric_column() {
        let values = table.column_values(value_col);
        if !values.is_empty() {
            let total: f64 = values.iter().sum();
            let avg = total / values.len() as f64;
            let name = &table.columns[value_col];
            summary.push_str(&format!(
                " The total {name} is {} with an average of {}.",
                format_amount(name, total),
                format_amount(name, avg),
            ));
        }
    } else {
        summary.push_str(&format!(
            " The data contains categorical information across {}.",
            table.columns.join(", ")
        ));
    }

    let mut key_points = vec![
        format!("Number of records: {rows}"),
        format!("Number of columns: {cols}"),
    ];

    if let Some(first_col) = table.columns.first() {
        let mut seen: Vec<String> = Vec::new();
        for row in &table.rows {
            if let Some(cell) = row.first() {
                let label = match cell {
                    Cell::Text(s) => s.clone(),
                    Cell::Number(v) => format_plain_number(*v),
                };
                if !seen.contains(&label) {
                    seen.push(label);
                }
            }
        }
        key_points.push(format!("{} unique values in '{first_col}' column", seen.len()));
    }

    (summary, key_points)
}

// ---------------------------------------------------------------------------
// Role-specific insights
// ---------------------------------------------------------------------------

/// One sentence addressed to the viewer's role.
pub fn role_insight(table: &Table, role: Role) -> String {
    match role {
        Role::SalesManager => sales_manager_insight(table),
        Role::Executive => executive_insight(table),
        Role::Finance => finance_insight(table),
        Role::Analyst => format!(
            "Based on your role as {role}, these insights can help inform your specific \
             business decisions."
        ),
    }
}

fn sales_manager_insight(table: &Table) -> String {
    let generic = "As a Sales Manager, analyze which factors contribute to the top performers \
                   and apply those strategies more broadly."
        .to_string();

    let Some(value_col) = table.numeric_column() else {
        return generic;
    };
    let values = table.column_values(value_col);
    if values.is_empty() {
        return generic;
    }
    let (top_idx, _) = arg_max(&values);

    if let Some(region_col) = table.columns.iter().position(|c| c == "region") {
        let top_region = table.label(top_idx, region_col);
        return format!(
            "As a Sales Manager, focus on replicating the success in {top_region} across \
             other regions to maximize overall performance."
        );
    }

    if let Some(product_col) = table
        .columns
        .iter()
        .position(|c| c.to_ascii_lowercase().contains("product"))
    {
        let top_product = table.label(top_idx, product_col);
        return format!(
            "As a Sales Manager, consider expanding the marketing efforts for {top_product} \
             given its strong performance."
        );
    }

    generic
}

fn executive_insight(table: &Table) -> String {
    let prefix = "From an executive perspective, this data suggests ";

    let Some(value_col) = table.numeric_column() else {
        return format!(
            "{prefix}areas that warrant strategic review based on the categorical \
             distribution shown."
        );
    };
    let values = table.column_values(value_col);
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return format!("{prefix}areas that need strategic attention to improve overall performance.");
    }

    let (_, top_val) = arg_max(&values);
    let concentration = top_val / total * 100.0;
    if concentration > 40.0 {
        let value_name = &table.columns[value_col];
        format!(
            "{prefix}a potential concentration risk with {concentration:.1}% of total \
             {value_name} coming from a single source. Consider diversification strategies."
        )
    } else {
        format!(
            "{prefix}a balanced distribution that aligns with the company's diversification goals."
        )
    }
}

fn finance_insight(table: &Table) -> String {
    let Some(value_col) = table.numeric_column() else {
        return "From a financial perspective, further quantitative analysis would be \
                beneficial to assess the profitability implications."
            .to_string();
    };
    let values = table.column_values(value_col);
    if values.is_empty() {
        return "From a financial perspective, further quantitative analysis would be \
                beneficial to assess the profitability implications."
            .to_string();
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let below_avg = values.iter().filter(|v| **v < mean).count();
    if below_avg * 2 > values.len() {
        format!(
            "From a financial perspective, there's an opportunity to optimize resource \
             allocation since {below_avg} items are performing below average. Consider \
             reviewing the ROI of lower-performing categories."
        )
    } else {
        "From a financial perspective, the current distribution shows healthy performance \
         across most categories, suggesting effective resource allocation."
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Small statistics helpers
// ---------------------------------------------------------------------------

fn arg_max(values: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::MIN);
    for (i, v) in values.iter().enumerate() {
        if *v > best.1 {
            best = (i, *v);
        }
    }
    best
}

fn arg_min(values: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::MAX);
    for (i, v) in values.iter().enumerate() {
        if *v < best.1 {
            best = (i, *v);
        }
    }
    best
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n − 1 denominator).
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Pearson correlation; `None` when either side has no variance or the
/// series lengths differ.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{Bundle, BundleKind};

    fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    fn txt(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn num(v: f64) -> Cell {
        Cell::Number(v)
    }

    #[test]
    fn bar_insights_name_leader_and_laggard() {
        let regions = &Bundle::demo(BundleKind::Regions).table;
        let (summary, key_points) = bar_insights(regions);

        // Derived from the data, South leads — unlike the baked narrative.
        assert!(summary.contains("South leads with $134,364.82 (30.8% of total)"));
        assert!(summary.contains("West has the lowest value at $85,157.17"));
        assert!(summary.contains("2 out of 4 categories perform above the average of $108,907.54"));

        assert_eq!(key_points[0], "Total total_sales: $435,630.16");
        assert_eq!(key_points[1], "Average total_sales per region: $108,907.54");
        assert_eq!(key_points[2], "Top performer: South with $134,364.82");
        assert_eq!(key_points[3], "Bottom performer: West with $85,157.17");
    }

    #[test]
    fn bar_insights_flag_wide_gaps() {
        let t = table(
            &["team", "points"],
            vec![
                vec![txt("a"), num(300.0)],
                vec![txt("b"), num(100.0)],
                vec![txt("c"), num(50.0)],
            ],
        );
        let (_, key_points) = bar_insights(&t);
        assert!(
            key_points
                .iter()
                .any(|p| p.starts_with("Wide performance gap: 500.0%"))
        );
    }

    #[test]
    fn pie_insights_enumerate_small_breakdowns() {
        let categories = &Bundle::demo(BundleKind::Categories).table;
        let (summary, key_points) = pie_insights(categories);
        assert_eq!(
            summary,
            "The breakdown shows: Electronics (76.4%), Accessories (23.6%)."
        );
        assert_eq!(key_points[0], "Total total_sales: $435,630.16");
        assert_eq!(key_points[1], "Largest segment: Electronics (76.4%)");
        assert_eq!(key_points[2], "Number of categories: 2");
    }

    #[test]
    fn pie_insights_report_concentration_for_many_segments() {
        let t = table(
            &["name", "share"],
            vec![
                vec![txt("a"), num(50.0)],
                vec![txt("b"), num(30.0)],
                vec![txt("c"), num(16.0)],
                vec![txt("d"), num(4.0)],
            ],
        );
        let (summary, key_points) = pie_insights(&t);
        assert!(summary.contains("The top two categories, a and b, account for 80.0%"));
        assert!(summary.contains("high concentration"));
        assert!(key_points.iter().any(|p| p.contains("less than 5% each")));
    }

    #[test]
    fn line_insights_detect_trend_and_peak() {
        let t = table(
            &["month", "orders"],
            vec![
                vec![txt("2024-01"), num(100.0)],
                vec![txt("2024-02"), num(180.0)],
                vec![txt("2024-03"), num(240.0)],
                vec![txt("2024-04"), num(150.0)],
            ],
        );
        let (summary, key_points) = line_insights(&t);
        assert!(summary.starts_with("The data shows a upward trend with a 50.0% increase"));
        assert!(summary.contains("The highest point was 240 at 2024-03."));
        assert_eq!(key_points[0], "Overall change: +50 (+50.0%)");
        assert!(key_points.iter().any(|p| p.starts_with("High volatility")));
    }

    #[test]
    fn line_insights_sort_rows_before_measuring() {
        let t = table(
            &["month", "orders"],
            vec![
                vec![txt("2024-03"), num(300.0)],
                vec![txt("2024-01"), num(100.0)],
                vec![txt("2024-02"), num(200.0)],
            ],
        );
        let (summary, _) = line_insights(&t);
        // 100 → 300 after sorting by month, not 300 → 200 in row order.
        assert!(summary.contains("200.0% increase"), "summary: {summary}");
    }

    #[test]
    fn scatter_insights_measure_correlation() {
        let t = table(
            &["price", "units"],
            vec![
                vec![num(1.0), num(10.0)],
                vec![num(2.0), num(19.0)],
                vec![num(3.0), num(31.0)],
                vec![num(4.0), num(42.0)],
            ],
        );
        let (summary, key_points) = scatter_insights(&t);
        assert!(summary.starts_with("There is a strong positive correlation"));
        assert!(summary.contains("As price increases, units tends to increase as well."));
        assert_eq!(key_points[1], "Sample size: 4 data points");
    }

    #[test]
    fn scatter_without_two_numeric_columns_falls_back() {
        let t = table(&["region", "name"], vec![vec![txt("a"), txt("b")]]);
        let (summary, _) = scatter_insights(&t);
        assert_eq!(
            summary,
            "The scatter plot shows the relationship between two variables."
        );
    }

    #[test]
    fn general_insights_profile_the_table() {
        let regions = &Bundle::demo(BundleKind::Regions).table;
        let (summary, key_points) = general_insights(regions);
        assert!(summary.starts_with("The query returned 4 results with 2 columns."));
        assert!(summary.contains("total total_sales is $435,630.16"));
        assert!(key_points.contains(&"4 unique values in 'region' column".to_string()));
    }

    #[test]
    fn executive_sees_balance_in_regions_and_risk_in_categories() {
        let regions = &Bundle::demo(BundleKind::Regions).table;
        assert_eq!(
            executive_insight(regions),
            "From an executive perspective, this data suggests a balanced distribution \
             that aligns with the company's diversification goals."
        );

        // Electronics holds 76.4% — concentration risk.
        let categories = &Bundle::demo(BundleKind::Categories).table;
        let insight = executive_insight(categories);
        assert!(insight.contains("concentration risk with 76.4% of total total_sales"));
    }

    #[test]
    fn sales_manager_names_top_region_or_product() {
        let regions = &Bundle::demo(BundleKind::Regions).table;
        assert!(sales_manager_insight(regions).contains("success in South across"));

        let products = &Bundle::demo(BundleKind::Products).table;
        assert!(sales_manager_insight(products).contains("marketing efforts for Laptop Pro"));
    }

    #[test]
    fn finance_flags_below_average_majorities() {
        let t = table(
            &["team", "spend"],
            vec![
                vec![txt("a"), num(1000.0)],
                vec![txt("b"), num(10.0)],
                vec![txt("c"), num(20.0)],
                vec![txt("d"), num(30.0)],
            ],
        );
        let insight = finance_insight(&t);
        assert!(insight.contains("3 items are performing below average"));

        let regions = &Bundle::demo(BundleKind::Regions).table;
        assert!(finance_insight(regions).contains("healthy performance"));
    }

    #[test]
    fn analyst_gets_the_generic_sentence() {
        let regions = &Bundle::demo(BundleKind::Regions).table;
        let insight = role_insight(regions, Role::Analyst);
        assert!(insight.contains("Based on your role as Analyst"));
    }

    #[test]
    fn statistics_helpers() {
        assert_eq!(median(&[1.0, 3.0, 2.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert!((sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.138).abs() < 0.001);
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
        assert_eq!(pearson(&[1.0, 1.0], &[2.0, 3.0]), None);
    }
}
