//! Natural Language Insights — an offline analytics assistant demo.
//!
//! A question comes in, a keyword dispatcher picks one of four demo result
//! bundles, and the answer pipeline assembles SQL (canned or LLM-generated,
//! display only), a chart reference, narrative insights, and the data table.
//! Adapters are thin: a terminal CLI/chat and an embedded web chat page.

pub mod analytics;
pub mod answer;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod generator;
pub mod insights;
pub mod render;
pub mod schema;
pub mod web;
