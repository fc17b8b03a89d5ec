use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A single column of a table, as reported by the schema-reflection
/// collaborator. A read-only snapshot; nothing here is ever evaluated
/// against a live database.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    /// Logical type, e.g. "integer" or "jsonb". Falls back to `sql_type`
    /// when the reflection layer has no logical mapping.
    #[serde(default)]
    pub data_type: Option<String>,
    /// Raw type as declared by the database, e.g. "bigint unsigned".
    #[serde(default)]
    pub sql_type: String,
    pub is_nullable: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub limit: Option<ColumnLimit>,
    /// Only meaningful for decimal columns.
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub geometry: Option<GeometryDescription>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ColumnDescription {
    pub fn new(name: &str, data_type: &str) -> Self {
        ColumnDescription {
            name: name.to_string(),
            data_type: Some(data_type.to_string()),
            sql_type: data_type.to_string(),
            is_nullable: true,
            ..crate::default()
        }
    }

    /// The type string shown in annotations. Big-integer variants are
    /// normalized to "bigint" no matter how the database spells them.
    pub fn effective_type(&self) -> String {
        if is_bigint_sql_type(&self.sql_type) {
            "bigint".to_string()
        } else {
            self.data_type
                .clone()
                .unwrap_or_else(|| self.sql_type.clone())
        }
    }
}

fn is_bigint_sql_type(sql_type: &str) -> bool {
    match sql_type.strip_prefix("bigint") {
        Some(rest) => !rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

/// A column default, typed so it can be display-quoted without being
/// evaluated.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    /// Decimals keep the exact, non-normalized string the database reported.
    Decimal(String),
    Text(String),
    Array(Vec<DefaultValue>),
}

impl DefaultValue {
    /// Simple quoting for display inside a `default(...)` attribute.
    pub fn quote(&self) -> String {
        match self {
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Bool(true) => "TRUE".to_string(),
            DefaultValue::Bool(false) => "FALSE".to_string(),
            DefaultValue::Int(value) => value.to_string(),
            DefaultValue::Float(value) => value.to_string(),
            DefaultValue::Decimal(value) => value.clone(),
            DefaultValue::Text(value) => format!("{value:?}"),
            DefaultValue::Array(values) => {
                format!("[{}]", values.iter().map(|v| v.quote()).join(", "))
            }
        }
    }
}

/// Column length limit; composite types report one limit per part.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnLimit {
    Bytes(u32),
    Composite(Vec<u32>),
}

/// Spatial column details. `geometry_type` is printed verbatim;
/// `geometric_type` is a fallback type name that prints lower-cased.
#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryDescription {
    #[serde(default)]
    pub geometry_type: Option<String>,
    #[serde(default)]
    pub geometric_type: Option<String>,
    #[serde(default)]
    pub srid: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_bigint_variants() {
        let mut col = ColumnDescription::new("id", "integer");
        col.sql_type = "bigint".to_string();
        assert_eq!(col.effective_type(), "bigint");

        col.sql_type = "bigint unsigned".to_string();
        assert_eq!(col.effective_type(), "bigint");

        col.sql_type = "bigint(8)".to_string();
        assert_eq!(col.effective_type(), "bigint");
    }

    #[test]
    fn does_not_normalize_lookalike_types() {
        let mut col = ColumnDescription::new("id", "integer");
        col.sql_type = "biginteger".to_string();
        assert_eq!(col.effective_type(), "integer");
    }

    #[test]
    fn falls_back_to_sql_type_without_logical_type() {
        let col = ColumnDescription {
            name: "payload".to_string(),
            data_type: None,
            sql_type: "tsvector".to_string(),
            ..crate::default()
        };
        assert_eq!(col.effective_type(), "tsvector");
    }

    #[test]
    fn quotes_defaults_for_display() {
        assert_eq!(DefaultValue::Null.quote(), "NULL");
        assert_eq!(DefaultValue::Bool(true).quote(), "TRUE");
        assert_eq!(DefaultValue::Bool(false).quote(), "FALSE");
        assert_eq!(DefaultValue::Int(0).quote(), "0");
        assert_eq!(DefaultValue::Decimal("10.25".to_string()).quote(), "10.25");
        assert_eq!(DefaultValue::Text("{}".to_string()).quote(), "\"{}\"");
        assert_eq!(
            DefaultValue::Array(vec![
                DefaultValue::Text("a".to_string()),
                DefaultValue::Text("b".to_string()),
            ])
            .quote(),
            "[\"a\", \"b\"]"
        );
    }
}
