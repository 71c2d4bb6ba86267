//! Demo result bundles — the static fixtures behind the offline assistant.
//!
//! A [`Bundle`] is everything the assistant returns for one matched question:
//! the display-only SQL text, a chart reference, a narrative with key points,
//! one insight string per viewer role, and the tabular records the narrative
//! was written about. Four bundles exist for the demo's sales domain and are
//! built once, immutable for the lifetime of the process.
//!
//! A real backend would satisfy the same shape: question in, bundle out.

use std::sync::LazyLock;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Bundle kinds and roles
// ---------------------------------------------------------------------------

/// The four demo result bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    /// Sales totals per region.
    Regions,
    /// Top products by revenue.
    Products,
    /// North vs. South head-to-head.
    Comparison,
    /// Sales share per product category.
    Categories,
}

impl BundleKind {
    /// All kinds, in fixture order. Regions first — it is also the
    /// dispatcher's default.
    pub const ALL: [BundleKind; 4] = [
        BundleKind::Regions,
        BundleKind::Products,
        BundleKind::Comparison,
        BundleKind::Categories,
    ];
}

impl std::fmt::Display for BundleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regions => write!(f, "regions"),
            Self::Products => write!(f, "products"),
            Self::Comparison => write!(f, "comparison"),
            Self::Categories => write!(f, "categories"),
        }
    }
}

/// Viewer personas. The set is closed: each bundle carries exactly one
/// insight string per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SalesManager,
    Executive,
    Finance,
    #[default]
    Analyst,
}

impl Role {
    /// Parse a role from user input. Accepts the display form and common
    /// separators; anything unrecognized falls back to [`Role::Analyst`],
    /// the original demo's default persona.
    pub fn parse(s: &str) -> Self {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "salesmanager" | "sales" => Self::SalesManager,
            "executive" | "exec" => Self::Executive,
            "finance" => Self::Finance,
            _ => Self::Analyst,
        }
    }

    pub const ALL: [Role; 4] = [
        Role::SalesManager,
        Role::Executive,
        Role::Finance,
        Role::Analyst,
    ];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SalesManager => write!(f, "Sales Manager"),
            Self::Executive => write!(f, "Executive"),
            Self::Finance => write!(f, "Finance"),
            Self::Analyst => write!(f, "Analyst"),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart reference
// ---------------------------------------------------------------------------

/// Chart family a result is best shown as. Selection only — no rendering
/// happens in this crate; the URL points at whatever image a deployment
/// serves for the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Table,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bar => write!(f, "bar"),
            Self::Line => write!(f, "line"),
            Self::Pie => write!(f, "pie"),
            Self::Scatter => write!(f, "scatter"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// A chart kind plus the image reference a client should display.
#[derive(Debug, Clone, Serialize)]
pub struct ChartRef {
    pub kind: ChartKind,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A single table cell. The demo data only ever holds text or numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Ordering used when sorting rows (time-series insights). Numbers sort
    /// numerically, text lexicographically, and numbers sort before text.
    pub fn sort_key_cmp(&self, other: &Cell) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Number(_), Cell::Text(_)) => Ordering::Less,
            (Cell::Text(_), Cell::Number(_)) => Ordering::Greater,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

/// An ordered sequence of flat records with named columns.
///
/// Column order is significant — it is the display order — so this is a
/// columns-plus-rows pair rather than a list of maps.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column whose cells are all numeric — the "value"
    /// column in a typical aggregate result.
    pub fn numeric_column(&self) -> Option<usize> {
        (0..self.columns.len()).find(|&i| {
            !self.rows.is_empty()
                && self
                    .rows
                    .iter()
                    .all(|row| matches!(row.get(i), Some(Cell::Number(_))))
        })
    }

    /// Index of the first non-numeric column after `skip` — the category
    /// labels paired with a value column. Falls back to column 0.
    pub fn category_column(&self, skip: usize) -> usize {
        (0..self.columns.len()).find(|&i| i != skip).unwrap_or(0)
    }

    /// All numeric column indices, in order. Scatter insights need two.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&i| {
                !self.rows.is_empty()
                    && self
                        .rows
                        .iter()
                        .all(|row| matches!(row.get(i), Some(Cell::Number(_))))
            })
            .collect()
    }

    /// The values of a numeric column. Non-numeric cells are skipped.
    pub fn column_values(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(Cell::as_number))
            .collect()
    }

    /// Render a cell as a plain label (for narrative text).
    pub fn label(&self, row: usize, col: usize) -> String {
        match self.rows.get(row).and_then(|r| r.get(col)) {
            Some(Cell::Text(s)) => s.clone(),
            Some(Cell::Number(n)) => format!("{n}"),
            None => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// One insight string per viewer role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleInsights {
    pub sales_manager: String,
    pub executive: String,
    pub finance: String,
    pub analyst: String,
}

impl RoleInsights {
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::SalesManager => &self.sales_manager,
            Role::Executive => &self.executive,
            Role::Finance => &self.finance,
            Role::Analyst => &self.analyst,
        }
    }
}

/// A complete canned answer: everything the assistant shows for one matched
/// question. Never created, mutated, or destroyed at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Bundle {
    /// The query text shown to the user. Display only — never executed.
    pub sql: String,
    pub chart: ChartRef,
    /// Narrative summary as shipped with the demo dataset.
    pub narrative: String,
    pub key_points: Vec<String>,
    pub role_insights: RoleInsights,
    pub table: Table,
}

impl Bundle {
    /// The demo bundle for a kind.
    pub fn demo(kind: BundleKind) -> &'static Bundle {
        match kind {
            BundleKind::Regions => &DEMO_BUNDLES.regions,
            BundleKind::Products => &DEMO_BUNDLES.products,
            BundleKind::Comparison => &DEMO_BUNDLES.comparison,
            BundleKind::Categories => &DEMO_BUNDLES.categories,
        }
    }
}

/// Example questions shown in the chat UI and `nli chat`, one per bundle.
pub const EXAMPLE_QUESTIONS: [(&str, BundleKind); 4] = [
    ("What are the sales by region?", BundleKind::Regions),
    ("Show me the top 5 products by revenue", BundleKind::Products),
    ("Compare North and South sales", BundleKind::Comparison),
    (
        "What is the sales distribution by category?",
        BundleKind::Categories,
    ),
];

// ---------------------------------------------------------------------------
// Demo fixture data
// ---------------------------------------------------------------------------

struct DemoBundles {
    regions: Bundle,
    products: Bundle,
    comparison: Bundle,
    categories: Bundle,
}

fn t(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn n(v: f64) -> Cell {
    Cell::Number(v)
}

static DEMO_BUNDLES: LazyLock<DemoBundles> = LazyLock::new(|| DemoBundles {
    regions: Bundle {
        sql: "SELECT region, SUM(sales_amount) as total_sales FROM sales \
              GROUP BY region ORDER BY total_sales DESC"
            .to_string(),
        chart: ChartRef {
            kind: ChartKind::Bar,
            url: "https://via.placeholder.com/600x400?text=Region+Sales+Chart".to_string(),
        },
        // The shipped narrative names North as the leader even though the
        // rows put South first — kept verbatim from the demo dataset.
        // `[answer] derive_insights = true` recomputes a consistent one.
        narrative: "Analysis shows that North leads with $123,036.52 (28.2% of total), \
                    while West has the lowest value at $85,157.17. 2 out of 4 regions \
                    perform above the average of $108,907.54."
            .to_string(),
        key_points: vec![
            "Total sales: $435,630.16".to_string(),
            "Average sales per region: $108,907.54".to_string(),
            "Top performer: North with $123,036.52".to_string(),
            "Bottom performer: West with $85,157.17".to_string(),
        ],
        role_insights: RoleInsights {
            sales_manager: "As a Sales Manager, focus on replicating the success in North \
                            across other regions to maximize overall performance."
                .to_string(),
            executive: "From an executive perspective, this data suggests a balanced \
                        distribution that aligns with the company's diversification goals."
                .to_string(),
            finance: "From a financial perspective, there's an opportunity to optimize \
                      resource allocation in the West region to improve overall performance."
                .to_string(),
            analyst: "The data indicates regional performance differences that warrant \
                      further analysis into contributing factors."
                .to_string(),
        },
        table: Table {
            columns: vec!["region".to_string(), "total_sales".to_string()],
            rows: vec![
                vec![t("North"), n(123036.52)],
                vec![t("South"), n(134364.82)],
                vec![t("East"), n(93071.65)],
                vec![t("West"), n(85157.17)],
            ],
        },
    },

    products: Bundle {
        sql: "SELECT product_name, SUM(sales_amount) as total_revenue FROM sales \
              GROUP BY product_name ORDER BY total_revenue DESC LIMIT 5"
            .to_string(),
        chart: ChartRef {
            kind: ChartKind::Bar,
            url: "https://via.placeholder.com/600x400?text=Product+Revenue+Chart".to_string(),
        },
        narrative: "The top product, Laptop Pro, generates $148,515.25 (34.1% of total \
                    revenue), significantly ahead of other products. There's a 62.7% gap \
                    between the top and bottom performers in the top 5."
            .to_string(),
        key_points: vec![
            "Top revenue generator: Laptop Pro with $148,515.25".to_string(),
            "Second best performer: Smartphone X with $112,546.80".to_string(),
            "Wide performance gap between products".to_string(),
        ],
        role_insights: RoleInsights {
            sales_manager: "As a Sales Manager, consider expanding the marketing efforts for \
                            Laptop Pro given its strong performance, while developing \
                            strategies to boost Monitor sales."
                .to_string(),
            executive: "The product revenue distribution shows a healthy primary product \
                        (Laptop Pro) with supporting products creating a diversified portfolio."
                .to_string(),
            finance: "Consider reviewing the pricing and margin strategy for the Monitor \
                      line to improve its revenue contribution."
                .to_string(),
            analyst: "A deeper analysis of product attributes and marketing strategies \
                      could reveal why certain products outperform others."
                .to_string(),
        },
        table: Table {
            columns: vec!["product_name".to_string(), "total_revenue".to_string()],
            rows: vec![
                vec![t("Laptop Pro"), n(148515.25)],
                vec![t("Smartphone X"), n(112546.80)],
                vec![t("Tablet Y"), n(97089.15)],
                vec![t("Desktop Z"), n(63124.30)],
                vec![t("Monitor"), n(55312.40)],
            ],
        },
    },

    comparison: Bundle {
        sql: "SELECT region, SUM(sales_amount) as total_sales FROM sales \
              WHERE region IN ('North', 'South') GROUP BY region \
              ORDER BY total_sales DESC"
            .to_string(),
        chart: ChartRef {
            kind: ChartKind::Bar,
            url: "https://via.placeholder.com/600x400?text=North+vs+South+Comparison".to_string(),
        },
        narrative: "South region leads with $134,364.82 in sales, outperforming North by \
                    $11,328.30 (9.2% higher). Together they account for 59.1% of total \
                    company sales."
            .to_string(),
        key_points: vec![
            "South region: $134,364.82".to_string(),
            "North region: $123,036.52".to_string(),
            "Difference: $11,328.30 (9.2%)".to_string(),
        ],
        role_insights: RoleInsights {
            sales_manager: "As Sales Manager, investigate what strategies are working well in \
                            the South region that could be applied to North to close the \
                            performance gap."
                .to_string(),
            executive: "The relatively small difference between these major regions indicates \
                        balanced regional performance, which reduces geographic risk."
                .to_string(),
            finance: "The 9.2% performance difference between regions suggests potential for \
                      optimization in resource allocation to the North region."
                .to_string(),
            analyst: "Further analysis of demographic differences and regional buying \
                      patterns could explain the performance variation."
                .to_string(),
        },
        table: Table {
            columns: vec!["region".to_string(), "total_sales".to_string()],
            rows: vec![
                vec![t("South"), n(134364.82)],
                vec![t("North"), n(123036.52)],
            ],
        },
    },

    categories: Bundle {
        sql: "SELECT product_category, SUM(sales_amount) as total_sales FROM sales \
              GROUP BY product_category"
            .to_string(),
        chart: ChartRef {
            kind: ChartKind::Pie,
            url: "https://via.placeholder.com/600x400?text=Category+Distribution+Chart"
                .to_string(),
        },
        narrative: "Electronics dominates with 76.4% ($332,869.35) of total sales, while \
                    Accessories accounts for 23.6% ($102,760.81). This indicates a strong \
                    concentration in the Electronics category."
            .to_string(),
        key_points: vec![
            "Electronics: $332,869.35 (76.4%)".to_string(),
            "Accessories: $102,760.81 (23.6%)".to_string(),
            "High concentration in Electronics category".to_string(),
        ],
        role_insights: RoleInsights {
            sales_manager: "As a Sales Manager, while Electronics drives most sales, consider \
                            growth opportunities in Accessories which may have higher margins \
                            or cross-selling potential."
                .to_string(),
            executive: "The heavy concentration in Electronics represents both a strength and \
                        potential risk. Consider strategic initiatives to grow the Accessories \
                        segment for greater balance."
                .to_string(),
            finance: "Given the sales distribution, ensure that resource allocation and \
                      inventory management align with the dominance of the Electronics \
                      category."
                .to_string(),
            analyst: "Further analysis of profit margins between categories would provide \
                      valuable context to this sales distribution."
                .to_string(),
        },
        table: Table {
            columns: vec!["product_category".to_string(), "total_sales".to_string()],
            rows: vec![
                vec![t("Electronics"), n(332869.35)],
                vec![t("Accessories"), n(102760.81)],
            ],
        },
    },
});

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
