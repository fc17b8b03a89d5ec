use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A foreign-key constraint, as reported by the schema-reflection
/// collaborator.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct ForeignKeyDescription {
    /// Constraint name. May be empty, in which case the source column
    /// stands in for display purposes.
    #[serde(default)]
    pub name: String,
    /// Source column on the annotated table.
    pub column: String,
    /// Referenced table.
    pub to_table: String,
    /// Referenced column, normally the target's primary key.
    pub primary_key: String,
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyDescription {
    pub fn new(name: &str, column: &str, to_table: &str, primary_key: &str) -> Self {
        ForeignKeyDescription {
            name: name.to_string(),
            column: column.to_string(),
            to_table: to_table.to_string(),
            primary_key: primary_key.to_string(),
            ..crate::default()
        }
    }
}

impl Ord for ForeignKeyDescription {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for ForeignKeyDescription {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignKeyAction {
    Cascade,
    Restrict,
    Nullify,
    None,
}

impl fmt::Display for ForeignKeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForeignKeyAction::Cascade => "cascade",
            ForeignKeyAction::Restrict => "restrict",
            ForeignKeyAction::Nullify => "nullify",
            ForeignKeyAction::None => "none",
        })
    }
}
