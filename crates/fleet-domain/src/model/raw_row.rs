//! Raw spreadsheet rows as produced by the loaders

use serde::{Deserialize, Serialize};

use crate::service::report::format_number;

/// A single cell of the first worksheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Positional cells of one sheet row
pub type RawRow = Vec<Cell>;

impl Cell {
    /// Shorthand for a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => write!(f, "{}", format_number(*n)),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}
