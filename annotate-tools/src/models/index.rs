use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// An index on a table, as reported by the schema-reflection collaborator.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    /// Column names the index covers, in index order.
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    /// Per-column sort direction, keyed by column name. Only columns with a
    /// recorded direction are rendered with one.
    #[serde(default)]
    pub orders: HashMap<String, IndexColumnOrder>,
    /// Partial-index predicate, if any.
    #[serde(default)]
    pub where_clause: Option<String>,
    /// Storage method, e.g. "btree". The default method is not rendered.
    #[serde(default)]
    pub using: Option<String>,
}

impl IndexDescription {
    pub fn new(name: &str, columns: &[&str]) -> Self {
        IndexDescription {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..crate::default()
        }
    }
}

impl Ord for IndexDescription {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl PartialOrd for IndexDescription {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexColumnOrder {
    Asc,
    Desc,
}

impl fmt::Display for IndexColumnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexColumnOrder::Asc => "ASC",
            IndexColumnOrder::Desc => "DESC",
        })
    }
}
