//! Pure presentation formatting.
//!
//! Everything here is a function from data to strings — no I/O, no state.
//! The terminal and web adapters decide where the strings go.
//!
//! Money columns are recognized by name: any column containing `sales` or
//! `revenue` renders as US-dollar currency. Other numbers are grouped with
//! thousands separators. Headers are snake_case converted to Title Case.

use crate::bundle::{Cell, Table};

// ---------------------------------------------------------------------------
// Scalar formatting
// ---------------------------------------------------------------------------

/// Format a value as US-dollar currency: `123036.52` → `"$123,036.52"`.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", grouped_two_decimals(value.abs()))
}

/// Group a non-negative value with comma separators and two decimals:
/// `123036.52` → `"123,036.52"`. This is the number style used inside
/// narrative text regardless of column.
pub fn grouped_two_decimals(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}.{}", group_digits(int_part), frac_part)
}

/// Group a plain number. Whole numbers stay whole (`1200` → `"1,200"`),
/// fractional values keep two decimals.
pub fn format_plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}", group_digits(&format!("{}", value.abs() as u64)))
    } else {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}", grouped_two_decimals(value.abs()))
    }
}

/// Insert comma separators into a digit string.
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

/// Whether a column holds money, by naming convention.
pub fn is_money_column(column: &str) -> bool {
    let lower = column.to_ascii_lowercase();
    lower.contains("sales") || lower.contains("revenue")
}

/// Format a numeric value for a named column: currency for money columns,
/// grouped plain number otherwise.
pub fn format_amount(column: &str, value: f64) -> String {
    if is_money_column(column) {
        format_currency(value)
    } else {
        format_plain_number(value)
    }
}

/// Convert a snake_case column name to a Title Case label:
/// `"total_sales"` → `"Total Sales"`.
pub fn format_header(column: &str) -> String {
    column
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a single cell for display under a named column.
pub fn format_cell(column: &str, cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Number(n) => format_amount(column, *n),
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Render a table as aligned text lines: a Title Case header row, a dashed
/// rule, one line per row (numbers right-aligned), and a trailing
/// `… N more rows` marker when `max_rows` truncates the output.
pub fn table_lines(table: &Table, max_rows: usize) -> Vec<String> {
    let headers: Vec<String> = table.columns.iter().map(|c| format_header(c)).collect();

    let shown = table.rows.iter().take(max_rows);
    let formatted: Vec<Vec<String>> = shown
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| format_cell(&table.columns[i], cell))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &formatted {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(formatted.len() + 3);
    lines.push(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| pad_left_aligned(h, widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string(),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );

    for (row_idx, row) in formatted.iter().enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let numeric = matches!(table.rows[row_idx][i], Cell::Number(_));
                if numeric {
                    pad_right_aligned(cell, widths[i])
                } else {
                    pad_left_aligned(cell, widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    if table.rows.len() > max_rows {
        lines.push(format!("… {} more rows", table.rows.len() - max_rows));
    }

    lines
}

fn pad_left_aligned(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(len)))
}

fn pad_right_aligned(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{s}", " ".repeat(width.saturating_sub(len)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_and_keeps_cents() {
        assert_eq!(format_currency(123036.52), "$123,036.52");
        assert_eq!(format_currency(435630.16), "$435,630.16");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.9), "$999.90");
        assert_eq!(format_currency(1000.0), "$1,000.00");
    }

    #[test]
    fn currency_handles_negatives() {
        assert_eq!(format_currency(-11328.30), "-$11,328.30");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(format_currency(1234.567), "$1,234.57");
    }

    #[test]
    fn plain_numbers_group_thousands() {
        assert_eq!(format_plain_number(1200.0), "1,200");
        assert_eq!(format_plain_number(42.0), "42");
        assert_eq!(format_plain_number(1234567.0), "1,234,567");
        assert_eq!(format_plain_number(93071.65), "93,071.65");
    }

    #[test]
    fn header_title_cases_snake_case() {
        assert_eq!(format_header("total_sales"), "Total Sales");
        assert_eq!(format_header("region"), "Region");
        assert_eq!(format_header("product_name"), "Product Name");
        assert_eq!(format_header("total_revenue"), "Total Revenue");
    }

    #[test]
    fn money_columns_match_by_substring() {
        assert!(is_money_column("total_sales"));
        assert!(is_money_column("total_revenue"));
        assert!(is_money_column("sales_amount"));
        assert!(!is_money_column("quantity"));
        assert!(!is_money_column("region"));
    }

    #[test]
    fn cells_format_by_column() {
        assert_eq!(
            format_cell("total_sales", &Cell::Number(123036.52)),
            "$123,036.52"
        );
        assert_eq!(format_cell("quantity", &Cell::Number(1200.0)), "1,200");
        assert_eq!(
            format_cell("region", &Cell::Text("North".to_string())),
            "North"
        );
    }

    #[test]
    fn table_lines_align_and_format() {
        let table = Table {
            columns: vec!["region".to_string(), "total_sales".to_string()],
            rows: vec![
                vec![Cell::Text("North".to_string()), Cell::Number(123036.52)],
                vec![Cell::Text("South".to_string()), Cell::Number(134364.82)],
            ],
        };
        let lines = table_lines(&table, 20);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Region"));
        assert!(lines[0].contains("Total Sales"));
        assert!(lines[2].contains("$123,036.52"));
        assert!(lines[3].contains("$134,364.82"));
    }

    #[test]
    fn table_lines_truncate_with_marker() {
        let table = Table {
            columns: vec!["n".to_string()],
            rows: (0..10).map(|i| vec![Cell::Number(f64::from(i))]).collect(),
        };
        let lines = table_lines(&table, 3);
        assert_eq!(lines.last().unwrap(), "… 7 more rows");
    }
}
