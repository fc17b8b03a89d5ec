use crate::models::{IndexDescription, TableDescription};
use crate::options::{AnnotationOptions, RenderFormat};
use itertools::Itertools;

/// Renders the index section. Returns an empty string when the table has no
/// indexes at all.
pub(crate) fn generate(table: &TableDescription, options: &AnnotationOptions) -> String {
    let markdown = options.format == RenderFormat::Markdown;
    let mut info = if markdown {
        "#\n# ### Indexes\n#\n".to_string()
    } else {
        "#\n# Indexes\n#\n".to_string()
    };

    if table.indexes.is_empty() {
        return String::new();
    }

    let max_size = table
        .indexes
        .iter()
        .map(|index| index.name.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    for index in table.indexes.iter().sorted() {
        if markdown {
            info.push_str(&markdown_line(index));
        } else {
            info.push_str(&plain_line(index, max_size));
        }
    }

    info
}

fn plain_line(index: &IndexDescription, max_size: usize) -> String {
    let line = format!(
        "#  {:<width$} {}{}{}{}",
        index.name,
        format!("({})", columns_info(index).join(",")),
        unique_info(index, false),
        where_info(index, false),
        using_info(index, false),
        width = max_size,
    );
    format!("{}\n", line.trim_end())
}

fn markdown_line(index: &IndexDescription) -> String {
    let details = format!(
        "{}{}{}",
        unique_info(index, true),
        where_info(index, true),
        using_info(index, true),
    );
    let details = details.trim();
    let details = if details.is_empty() {
        String::new()
    } else {
        format!(" ({details})")
    };

    format!(
        "# * `{}`{}:\n#     * **`{}`**\n",
        index.name,
        details,
        columns_info(index).join("`**\n#     * **`"),
    )
}

fn columns_info(index: &IndexDescription) -> Vec<String> {
    index
        .columns
        .iter()
        .map(|col| match index.orders.get(col) {
            Some(order) => format!("{col} {order}"),
            // Expression indexes can smuggle newlines into column strings.
            None => col.replace('\r', "\\r").replace('\n', "\\n"),
        })
        .collect()
}

fn unique_info(index: &IndexDescription, markdown: bool) -> String {
    if index.unique {
        format!(" {}", if markdown { "_unique_" } else { "UNIQUE" })
    } else {
        String::new()
    }
}

fn where_info(index: &IndexDescription, markdown: bool) -> String {
    match &index.where_clause {
        Some(predicate) if !predicate.trim().is_empty() => {
            format!(" {} {}", if markdown { "_where_" } else { "WHERE" }, predicate)
        }
        _ => String::new(),
    }
}

fn using_info(index: &IndexDescription, markdown: bool) -> String {
    match index.using.as_deref() {
        Some(method) if !method.is_empty() && method != "btree" => {
            format!(" {} {}", if markdown { "_using_" } else { "USING" }, method)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default;
    use crate::models::IndexColumnOrder;
    use indoc::indoc;

    fn table_with_indexes(indexes: Vec<IndexDescription>) -> TableDescription {
        TableDescription {
            indexes,
            ..TableDescription::new("users")
        }
    }

    #[test]
    fn returns_empty_without_indexes() {
        let table = table_with_indexes(vec![]);
        assert_eq!(generate(&table, &AnnotationOptions::default()), "");
    }

    #[test]
    fn renders_indexes_sorted_by_name() {
        let table = table_with_indexes(vec![
            IndexDescription::new("index_users_on_name", &["name"]),
            IndexDescription::new("index_users_on_email", &["email"]),
        ]);

        similar_asserts::assert_eq!(
            generate(&table, &AnnotationOptions::default()),
            indoc! {r#"
                #
                # Indexes
                #
                #  index_users_on_email  (email)
                #  index_users_on_name   (name)
            "#}
        );
    }

    #[test]
    fn renders_unique_predicate_and_method() {
        let mut index = IndexDescription::new("index_users_on_email", &["email"]);
        index.unique = true;
        index.where_clause = Some("(deleted_at IS NULL)".to_string());
        index.using = Some("gin".to_string());
        let table = table_with_indexes(vec![index]);

        let info = generate(&table, &AnnotationOptions::default());
        assert!(info.contains(
            "#  index_users_on_email  (email) UNIQUE WHERE (deleted_at IS NULL) USING gin"
        ));
    }

    #[test]
    fn default_btree_method_is_not_rendered() {
        let mut index = IndexDescription::new("index_users_on_email", &["email"]);
        index.using = Some("btree".to_string());
        let table = table_with_indexes(vec![index]);

        let info = generate(&table, &AnnotationOptions::default());
        assert!(!info.contains("USING"));
    }

    #[test]
    fn renders_per_column_order() {
        let mut index = IndexDescription::new("index_events_on_at", &["at", "kind"]);
        index
            .orders
            .insert("at".to_string(), IndexColumnOrder::Desc);
        let table = table_with_indexes(vec![index]);

        let info = generate(&table, &AnnotationOptions::default());
        assert!(info.contains("(at DESC,kind)"));
    }

    #[test]
    fn renders_markdown_nested_list() {
        let mut unique = IndexDescription::new("index_users_on_email", &["email"]);
        unique.unique = true;
        let plain = IndexDescription::new("index_users_on_name_and_email", &["name", "email"]);
        let table = table_with_indexes(vec![unique, plain]);

        let options = AnnotationOptions {
            format: RenderFormat::Markdown,
            ..default()
        };

        similar_asserts::assert_eq!(
            generate(&table, &options),
            indoc! {r#"
                #
                # ### Indexes
                #
                # * `index_users_on_email` (_unique_):
                #     * **`email`**
                # * `index_users_on_name_and_email`:
                #     * **`name`**
                #     * **`email`**
            "#}
        );
    }
}
