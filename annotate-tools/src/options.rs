use crate::{AnnotateToolsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Column types whose default value is not shown.
pub const NO_DEFAULT_COL_TYPES: &[&str] = &["json", "jsonb", "hstore"];

/// Column types whose limit is not shown.
/// Example: show "integer" instead of "integer(4)".
pub const NO_LIMIT_COL_TYPES: &[&str] = &["integer", "bigint", "boolean"];

/// Output dialect of the generated annotation block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Plain,
    Markdown,
    Rdoc,
    Yard,
}

impl FromStr for RenderFormat {
    type Err = AnnotateToolsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(RenderFormat::Plain),
            "markdown" => Ok(RenderFormat::Markdown),
            "rdoc" => Ok(RenderFormat::Rdoc),
            "yard" => Ok(RenderFormat::Yard),
            _ => Err(AnnotateToolsError::UnknownFormat(s.to_string())),
        }
    }
}

/// Where the annotation block is placed in the target file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilePosition {
    Top,
    #[default]
    Bottom,
}

/// The full, resolved option set for one generation/splice run.
///
/// Build with `Default` plus struct update syntax; pattern options are
/// compiled once here so formatting itself stays infallible.
#[derive(Debug, Clone, Default)]
pub struct AnnotationOptions {
    pub format: RenderFormat,
    pub position_in_file: FilePosition,
    pub show_indexes: bool,
    /// Annotate indexed-ness inline per column instead of a separate section.
    pub simple_indexes: bool,
    pub show_foreign_keys: bool,
    pub show_complete_foreign_keys: bool,
    pub with_comments: bool,
    pub sort_columns_alphabetically: bool,
    pub classified_sort: bool,
    /// Columns whose name matches are left out of the annotation.
    pub ignore_columns: Option<Regex>,
    /// An explicitly empty list hides no defaults at all.
    pub hide_default_column_types: Option<Vec<String>>,
    /// An explicitly empty list hides no limits at all.
    pub hide_limit_column_types: Option<Vec<String>>,
}

impl AnnotationOptions {
    /// Compiles and installs the ignored-columns pattern.
    /// Fails fast on an invalid pattern instead of degrading silently.
    pub fn set_ignore_columns(&mut self, pattern: &str) -> Result {
        self.ignore_columns = Some(Regex::new(pattern)?);
        Ok(())
    }

    pub(crate) fn hides_default_for(&self, col_type: &str) -> bool {
        match &self.hide_default_column_types {
            Some(types) => types.iter().any(|t| t == col_type),
            None => NO_DEFAULT_COL_TYPES.contains(&col_type),
        }
    }

    pub(crate) fn hides_limit_for(&self, col_type: &str) -> bool {
        match &self.hide_limit_column_types {
            Some(types) => types.iter().any(|t| t == col_type),
            None => NO_LIMIT_COL_TYPES.contains(&col_type),
        }
    }
}
