//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render command results as a tab-separated table or as JSON.
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//! - Missing values render as `N/A` in tables and `null` in JSON.
//! - An empty table prints a human message; empty JSON is `[]`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use splunk_sdk::Entity;

/// Placeholder for missing values in tables.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// A table under construction.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn render(&self, noun: &str) -> String {
        if self.rows.is_empty() {
            return format!("No {noun} found.\n");
        }
        let mut out = self.headers.join("\t");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}

/// `value` or the missing placeholder.
pub fn or_missing(value: Option<impl ToString>) -> String {
    value.map_or_else(|| DEFAULT_MISSING_VALUE.to_string(), |v| v.to_string())
}

#[derive(Serialize)]
struct EntityView<'a, T> {
    name: &'a str,
    path: String,
    content: &'a T,
}

/// JSON view of entities: their title, their resource path and their content.
pub fn entities_json<'a, T, I>(entities: I) -> Result<String>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a Entity<T>>,
{
    let views: Vec<_> = entities
        .into_iter()
        .map(|entity| EntityView {
            name: entity.title(),
            path: entity.name().to_string(),
            content: entity.content(),
        })
        .collect();
    to_json(&views)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    out.push('\n');
    Ok(out)
}
