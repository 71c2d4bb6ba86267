//! Domain schema definitions.
//!
//! A static registry of the data domains the assistant can talk about.
//! Each domain describes its tables, columns, and relationships; the text
//! rendering is what the SQL generator embeds in its prompt and what
//! `nli schema` prints.
//!
//! Only the sales domain ships today. Columns are described, not typed into
//! Rust — the schema exists to be read, not queried.

use std::sync::LazyLock;

use anyhow::{Result, bail};

/// A column: name, SQL type, one-line description.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub description: &'static str,
}

/// A table with ordered columns and an optional primary key.
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Option<&'static str>,
}

/// A foreign-key style relationship between two tables.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub from_table: &'static str,
    pub from_column: &'static str,
    pub to_table: &'static str,
    pub to_column: &'static str,
}

/// One queryable data domain.
#[derive(Debug, Clone)]
pub struct DomainSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub tables: Vec<TableDef>,
    pub relationships: Vec<Relationship>,
}

/// Look up a domain by name.
pub fn get(domain: &str) -> Result<&'static DomainSchema> {
    let lower = domain.to_ascii_lowercase();
    match DOMAINS.iter().find(|d| d.name == lower) {
        Some(schema) => Ok(schema),
        None => bail!(
            "unknown domain '{domain}' (available: {})",
            DOMAINS
                .iter()
                .map(|d| d.name)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Names of all registered domains.
pub fn domain_names() -> Vec<&'static str> {
    DOMAINS.iter().map(|d| d.name).collect()
}

/// Render a domain schema as indented text, suitable for both terminal
/// display and LLM prompts.
pub fn schema_text(domain: &str) -> Result<String> {
    let schema = get(domain)?;

    let mut text = format!("Domain: {}\n", schema.name);
    text.push_str(&format!("Description: {}\n\n", schema.description));

    for table in &schema.tables {
        text.push_str(&format!("Table: {}\n", table.name));
        text.push_str("Columns:\n");
        for col in &table.columns {
            text.push_str(&format!(
                "  - {} ({}): {}\n",
                col.name, col.sql_type, col.description
            ));
        }
        if let Some(pk) = table.primary_key {
            text.push_str(&format!("Primary Key: {pk}\n"));
        }
        text.push('\n');
    }

    if !schema.relationships.is_empty() {
        text.push_str("Relationships:\n");
        for rel in &schema.relationships {
            text.push_str(&format!(
                "  - {}.{} -> {}.{}\n",
                rel.from_table, rel.from_column, rel.to_table, rel.to_column
            ));
        }
    }

    Ok(text)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

static DOMAINS: LazyLock<Vec<DomainSchema>> = LazyLock::new(|| {
    vec![DomainSchema {
        name: "sales",
        description: "Sales transaction data",
        tables: vec![
            TableDef {
                name: "sales",
                columns: vec![
                    ColumnDef {
                        name: "sale_id",
                        sql_type: "INTEGER",
                        description: "Unique identifier for each sale",
                    },
                    ColumnDef {
                        name: "date",
                        sql_type: "DATE",
                        description: "Date of the sale",
                    },
                    ColumnDef {
                        name: "product_name",
                        sql_type: "TEXT",
                        description: "Name of the product sold",
                    },
                    ColumnDef {
                        name: "product_category",
                        sql_type: "TEXT",
                        description: "Category of the product",
                    },
                    ColumnDef {
                        name: "quantity",
                        sql_type: "INTEGER",
                        description: "Number of units sold",
                    },
                    ColumnDef {
                        name: "unit_price",
                        sql_type: "DECIMAL",
                        description: "Price per unit",
                    },
                    ColumnDef {
                        name: "sales_amount",
                        sql_type: "DECIMAL",
                        description: "Total sale amount (quantity * unit_price)",
                    },
                    ColumnDef {
                        name: "customer_id",
                        sql_type: "INTEGER",
                        description: "ID of the customer",
                    },
                    ColumnDef {
                        name: "region",
                        sql_type: "TEXT",
                        description: "Geographic region of the sale",
                    },
                    ColumnDef {
                        name: "sales_channel",
                        sql_type: "TEXT",
                        description: "Channel through which the sale was made",
                    },
                ],
                primary_key: Some("sale_id"),
            },
            TableDef {
                name: "customers",
                columns: vec![
                    ColumnDef {
                        name: "customer_id",
                        sql_type: "INTEGER",
                        description: "Unique identifier for each customer",
                    },
                    ColumnDef {
                        name: "customer_name",
                        sql_type: "TEXT",
                        description: "Name of the customer",
                    },
                    ColumnDef {
                        name: "segment",
                        sql_type: "TEXT",
                        description: "Customer segment (e.g., Consumer, Corporate)",
                    },
                    ColumnDef {
                        name: "region",
                        sql_type: "TEXT",
                        description: "Customer's region",
                    },
                ],
                primary_key: Some("customer_id"),
            },
        ],
        relationships: vec![Relationship {
            from_table: "sales",
            from_column: "customer_id",
            to_table: "customers",
            to_column: "customer_id",
        }],
    }]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_domain_resolves() {
        let schema = get("sales").unwrap();
        assert_eq!(schema.tables.len(), 2);
        assert_eq!(schema.tables[0].name, "sales");
        assert_eq!(schema.tables[1].name, "customers");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get("SALES").is_ok());
    }

    #[test]
    fn unknown_domain_errors_with_available_list() {
        let err = get("marketing").unwrap_err();
        assert!(err.to_string().contains("marketing"));
        assert!(err.to_string().contains("sales"));
    }

    #[test]
    fn schema_text_lists_tables_columns_and_relationships() {
        let text = schema_text("sales").unwrap();
        assert!(text.starts_with("Domain: sales\n"));
        assert!(text.contains("Table: sales\n"));
        assert!(text.contains("  - sales_amount (DECIMAL): Total sale amount"));
        assert!(text.contains("Primary Key: sale_id"));
        assert!(text.contains("  - sales.customer_id -> customers.customer_id"));
    }
}
