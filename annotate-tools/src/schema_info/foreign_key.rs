use crate::models::{ForeignKeyDescription, TableDescription};
use crate::options::{AnnotationOptions, RenderFormat};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

/// Auto-generated constraint names carry a trailing run of exactly 10 hex
/// digits; those collapse to `...` unless the full names were asked for.
static AUTO_GENERATED_FK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^fk_rails_[0-9a-f]{10}$").unwrap());

/// Renders the foreign-key section. Returns an empty string when the target
/// lacks foreign-key support or has none.
pub(crate) fn generate(table: &TableDescription, options: &AnnotationOptions) -> String {
    let markdown = options.format == RenderFormat::Markdown;
    let mut fk_info = if markdown {
        "#\n# ### Foreign Keys\n#\n".to_string()
    } else {
        "#\n# Foreign Keys\n#\n".to_string()
    };

    if !table.supports_foreign_keys || table.foreign_keys.is_empty() {
        return String::new();
    }

    let max_size = table
        .foreign_keys
        .iter()
        .map(|fk| display_name(fk, options).chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let sorted_keys = table
        .foreign_keys
        .iter()
        .sorted_by_key(|fk| (display_name(fk, options), fk.column.clone()));

    for fk in sorted_keys {
        let ref_info = format!("{} => {}.{}", fk.column, fk.to_table, fk.primary_key);

        let mut constraints_info = String::new();
        if let Some(on_delete) = fk.on_delete {
            constraints_info.push_str(&format!("ON DELETE => {on_delete} "));
        }
        if let Some(on_update) = fk.on_update {
            constraints_info.push_str(&format!("ON UPDATE => {on_update} "));
        }
        let constraints_info = constraints_info.trim();

        if markdown {
            let constraints = if constraints_info.is_empty() {
                String::new()
            } else {
                format!(" (_{constraints_info}_)")
            };
            fk_info.push_str(&format!(
                "# * `{}`{}:\n#     * **`{}`**\n",
                display_name(fk, options),
                constraints,
                ref_info,
            ));
        } else {
            let line = format!(
                "#  {:<width$.width$} {} {}",
                display_name(fk, options),
                format!("({ref_info})"),
                constraints_info,
                width = max_size,
            );
            fk_info.push_str(&format!("{}\n", line.trim_end()));
        }
    }

    fk_info
}

fn display_name(fk: &ForeignKeyDescription, options: &AnnotationOptions) -> String {
    if fk.name.trim().is_empty() {
        return fk.column.clone();
    }

    if !options.show_complete_foreign_keys && AUTO_GENERATED_FK_NAME.is_match(&fk.name) {
        "fk_rails_...".to_string()
    } else {
        fk.name.clone()
    }
}
