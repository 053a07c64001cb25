//! Output formatting for listings and reports.
//!
//! The CLI renders every listing either as a plain-text table or as JSON;
//! this module provides the format switch, the JSON path, and a small
//! column-aligned table builder used by the human-readable path.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned plain text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

/// Serializes any report or listing DTO to pretty-printed JSON.
///
/// # Errors
///
/// Returns a validation error if serialization fails, which only happens
/// for non-string map keys and similar structural problems.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Validation {
        field: "output".into(),
        message: format!("cannot serialize to JSON: {e}"),
    })
}

/// A minimal column-aligned text table.
///
/// # Examples
///
/// ```
/// use innkeep::output::Table;
///
/// let mut table = Table::new(&["ROOM", "STATUS"]);
/// table.row(vec!["101".into(), "available".into()]);
/// table.row(vec!["204".into(), "cleaning".into()]);
/// let text = table.render();
/// assert!(text.starts_with("ROOM"));
/// assert!(text.contains("cleaning"));
/// ```
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers.
    #[must_use]
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing cells render empty; extra cells are kept.
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Returns true if no rows have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table with two-space column separation.
    #[must_use]
    pub fn render(&self) -> String {
        let columns = self
            .headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0));

        let mut widths = vec![0usize; columns];
        for (i, h) in self.headers.iter().enumerate() {
            widths[i] = widths[i].max(h.chars().count());
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let render_row = |cells: &[String]| -> String {
            let mut line = String::new();
            for i in 0..columns {
                let cell = cells.get(i).map_or("", String::as_str);
                if i + 1 == columns {
                    line.push_str(cell);
                } else {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    line.push_str(cell);
                    line.extend(std::iter::repeat(' ').take(pad + 2));
                }
            }
            line.trim_end().to_string()
        };

        let mut out = render_row(&self.headers);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_row(row));
            out.push('\n');
        }
        out
    }
}
