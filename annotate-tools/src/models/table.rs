use crate::models::{ColumnDescription, ForeignKeyDescription, IndexDescription};
use serde::{Deserialize, Serialize};

/// A table schema snapshot, the unit of input for one annotation run.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<ColumnDescription>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKeyDescription>,
    #[serde(default)]
    pub indexes: Vec<IndexDescription>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDescription>,
    /// Whether the table actually exists in the database. Index and
    /// foreign-key sections are only rendered for existing tables.
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub supports_foreign_keys: bool,
    #[serde(default)]
    pub supports_comments: bool,
}

impl TableDescription {
    pub fn new(name: &str) -> Self {
        TableDescription {
            name: name.to_string(),
            exists: true,
            supports_foreign_keys: true,
            supports_comments: true,
            ..crate::default()
        }
    }

    /// Membership test so composite primary keys attribute every member
    /// column.
    pub(crate) fn is_primary_key(&self, column_name: &str) -> bool {
        match &self.primary_key {
            Some(PrimaryKeyDescription::Single(name)) => name == column_name,
            Some(PrimaryKeyDescription::Composite(names)) => {
                names.iter().any(|name| name == column_name)
            }
            None => false,
        }
    }

    pub(crate) fn has_column_comments(&self) -> bool {
        self.supports_comments && self.columns.iter().any(|c| c.comment.is_some())
    }
}

/// Primary key of a table; a single column name or an ordered sequence of
/// names for composite keys.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKeyDescription {
    Single(String),
    Composite(Vec<String>),
}
