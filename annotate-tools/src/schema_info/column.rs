use crate::models::{ColumnDescription, ColumnLimit, TableDescription};
use crate::options::{AnnotationOptions, RenderFormat};
use crate::text_width::{display_width, pad_display_width};
use itertools::Itertools;

const MD_NAMES_OVERHEAD: usize = 6;
const MD_TYPE_ALLOWANCE: usize = 18;
const BARE_TYPE_ALLOWANCE: usize = 16;

/// Renders the column section: one line per column (two for yard), plus the
/// table header rows in the markdown dialect.
pub(crate) fn generate(table: &TableDescription, options: &AnnotationOptions) -> String {
    let cols = select_columns(table, options);
    let max_size = max_schema_info_width(table, &cols, options);

    let mut info = String::new();

    if options.format == RenderFormat::Markdown {
        info.push_str(&format!(
            "# {:<name_width$.name_width$} | {:<type_width$.type_width$} | {}\n",
            "Name",
            "Type",
            "Attributes",
            name_width = max_size + MD_NAMES_OVERHEAD,
            type_width = MD_TYPE_ALLOWANCE,
        ));
        info.push_str(&format!(
            "# {} | {} | {}\n",
            "-".repeat(max_size + MD_NAMES_OVERHEAD),
            "-".repeat(MD_TYPE_ALLOWANCE),
            "-".repeat(27),
        ));
    }

    for col in &cols {
        info.push_str(&generate_for_column(table, options, max_size, col));
    }

    info
}

fn generate_for_column(
    table: &TableDescription,
    options: &AnnotationOptions,
    max_size: usize,
    col: &ColumnDescription,
) -> String {
    let mut col_type = col.effective_type();
    let mut attrs: Vec<String> = Vec::new();

    if let Some(default) = &col.default {
        if !options.hides_default_for(&col_type) {
            attrs.push(format!("default({})", default.quote()));
        }
    }
    if col.unsigned {
        attrs.push("unsigned".to_string());
    }
    if !col.is_nullable {
        attrs.push("not null".to_string());
    }
    if table.is_primary_key(&col.name) {
        attrs.push("primary key".to_string());
    }

    if col_type == "decimal" {
        col_type.push_str(&format!(
            "({}, {})",
            opt_num(col.precision),
            opt_num(col.scale)
        ));
    } else if !matches!(col_type.as_str(), "spatial" | "geometry" | "geography")
        && options.format != RenderFormat::Yard
    {
        match &col.limit {
            // Composite limits become an attribute rather than a type suffix.
            Some(ColumnLimit::Composite(limits)) => {
                attrs.push(format!("({})", limits.iter().join(", ")));
            }
            Some(ColumnLimit::Bytes(limit)) => {
                if !options.hides_limit_for(&col_type) {
                    col_type.push_str(&format!("({limit})"));
                }
            }
            None => {}
        }
    }

    if col.is_array {
        attrs.push("is an Array".to_string());
    }

    if let Some(geometry) = &col.geometry {
        if let Some(geometry_type) = &geometry.geometry_type {
            attrs.push(format!("{}, {}", geometry_type, opt_num(geometry.srid)));
        } else if let Some(geometric_type) =
            geometry.geometric_type.as_ref().filter(|t| !t.is_empty())
        {
            attrs.push(format!(
                "{}, {}",
                geometric_type.to_lowercase(),
                opt_num(geometry.srid)
            ));
        }
    }

    if options.simple_indexes && table.exists {
        for index in table
            .indexes
            .iter()
            .filter(|index| index.columns.iter().any(|c| c == &col.name))
            .sorted()
        {
            let other_columns = index.columns.iter().filter(|c| *c != &col.name).join(", ");
            if other_columns.is_empty() {
                attrs.push("indexed".to_string());
            } else {
                attrs.push(format!("indexed => [{other_columns}]"));
            }
        }
    }

    let col_name = match &col.comment {
        Some(comment) if with_comments(table, options) => {
            format!("{}({})", col.name, comment)
        }
        _ => col.name.clone(),
    };

    match options.format {
        RenderFormat::Rdoc => {
            let mut type_and_attrs = attrs;
            type_and_attrs.insert(0, col_type);
            let line = format!(
                "# {:<width$.width$}<tt>{}</tt>",
                format!("*{col_name}*::"),
                type_and_attrs.join(", "),
                width = max_size,
            );
            format!("{}\n", line.trim_end())
        }
        RenderFormat::Yard => {
            let mapped = map_col_type_to_ruby_class(&col.effective_type()).unwrap_or_default();
            let ruby_class = if col.is_array {
                format!("Array<{mapped}>")
            } else {
                mapped.to_string()
            };
            format!("# @!attribute {col_name}\n#   @return [{ruby_class}]\n")
        }
        RenderFormat::Markdown => {
            let name_remainder = max_size as isize
                - col_name.chars().count() as isize
                - non_ascii_length(&col_name) as isize;
            let type_remainder =
                (MD_TYPE_ALLOWANCE as isize - 2) - col_type.chars().count() as isize;
            let line = format!(
                "# **`{}`**{} | `{}`{} | `{}`",
                col_name,
                spaces(name_remainder),
                col_type,
                spaces(type_remainder),
                attrs.join(", "),
            );
            // Empty attribute cells collapse from `` to nothing.
            let line = line.replace("``", "  ");
            format!("{}\n", line.trim_end())
        }
        RenderFormat::Plain => {
            let line = format!(
                "#  {}:{} {}",
                pad_display_width(&col_name, max_size),
                pad_display_width(&col_type, BARE_TYPE_ALLOWANCE),
                attrs.join(", "),
            );
            format!("{}\n", line.trim_end())
        }
    }
}

/// The option-filtered, option-sorted column sequence.
fn select_columns<'t>(
    table: &'t TableDescription,
    options: &AnnotationOptions,
) -> Vec<&'t ColumnDescription> {
    let mut cols: Vec<&ColumnDescription> = table.columns.iter().collect();

    if let Some(pattern) = &options.ignore_columns {
        cols.retain(|col| !pattern.is_match(&col.name));
    }

    if options.sort_columns_alphabetically {
        cols.sort_by(|a, b| a.name.cmp(&b.name));
    }
    if options.classified_sort {
        cols = classified_sort(cols);
    }

    cols
}

/// id first, plain columns next, `created_at`/`updated_at` after those,
/// `*_id` association columns last; alphabetical within each group.
fn classified_sort<'t>(cols: Vec<&'t ColumnDescription>) -> Vec<&'t ColumnDescription> {
    let mut id = None;
    let mut rest = Vec::new();
    let mut timestamps = Vec::new();
    let mut associations = Vec::new();

    for col in cols {
        if col.name == "id" {
            id = Some(col);
        } else if col.name == "created_at" || col.name == "updated_at" {
            timestamps.push(col);
        } else if col.name.ends_with("_id") {
            associations.push(col);
        } else {
            rest.push(col);
        }
    }

    for group in [&mut rest, &mut timestamps, &mut associations] {
        group.sort_by(|a, b| a.name.cmp(&b.name));
    }

    id.into_iter()
        .chain(rest)
        .chain(timestamps)
        .chain(associations)
        .collect()
}

fn max_schema_info_width(
    table: &TableDescription,
    cols: &[&ColumnDescription],
    options: &AnnotationOptions,
) -> usize {
    let mut max_size = if with_comments(table, options) {
        cols.iter()
            .map(|col| {
                col.name.chars().count()
                    + col.comment.as_deref().map(display_width).unwrap_or(0)
            })
            .max()
            .unwrap_or(0)
            + 2
    } else {
        cols.iter()
            .map(|col| col.name.chars().count())
            .max()
            .unwrap_or(0)
    };
    max_size += if options.format == RenderFormat::Rdoc { 5 } else { 1 };
    max_size
}

fn with_comments(table: &TableDescription, options: &AnnotationOptions) -> bool {
    options.with_comments && table.has_column_comments()
}

fn map_col_type_to_ruby_class(col_type: &str) -> Option<&'static str> {
    match col_type {
        "integer" => Some("Integer"),
        "float" => Some("Float"),
        "decimal" => Some("BigDecimal"),
        "datetime" | "timestamp" | "time" => Some("Time"),
        "date" => Some("Date"),
        "text" | "string" | "binary" | "inet" | "uuid" => Some("String"),
        "json" | "jsonb" => Some("Hash"),
        "boolean" => Some("Boolean"),
        _ => None,
    }
}

fn non_ascii_length(s: &str) -> usize {
    s.chars().filter(|c| !c.is_ascii()).count()
}

/// printf-style `%Ns` applied to a single space: N spaces for positive N,
/// |N| for negative, one space for zero.
fn spaces(n: isize) -> String {
    " ".repeat(n.unsigned_abs().max(1))
}

fn opt_num<T: ToString + Copy>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
