mod column;
mod foreign_key;
mod index;

use crate::models::TableDescription;
use crate::options::{AnnotationOptions, RenderFormat};

/// Literal end marker embedded in the rdoc footer. The locator recognizes
/// it as well, so rdoc blocks can be found and removed even though rdoc
/// hides the marker from rendered documentation.
pub const END_MARK: &str = "== Schema Information End";

/// Conventional header text for schema annotations. `generate_schema_info`
/// accepts any header, but the locator looks for this prefix when finding a
/// previously inserted block.
pub const DEFAULT_HEADER: &str = "== Schema Information";

/// Builds the whole annotation block for one table: header, table-name
/// line, column section, optional index and foreign-key sections, footer.
/// Every line is comment-prefixed; the result ends with a newline.
pub fn generate_schema_info(
    table: &TableDescription,
    header: &str,
    options: &AnnotationOptions,
) -> String {
    let mut info = format!("# {header}\n");
    info.push_str(&schema_header_text(table, options));

    info.push_str(&column::generate(table, options));

    if options.show_indexes && table.exists {
        info.push_str(&index::generate(table, options));
    }

    if options.show_foreign_keys && table.exists {
        info.push_str(&foreign_key::generate(table, options));
    }

    info.push_str(&schema_footer_text(options));
    info
}

fn schema_header_text(table: &TableDescription, options: &AnnotationOptions) -> String {
    let mut info = String::from("#\n");
    if options.format == RenderFormat::Markdown {
        info.push_str(&format!("# Table name: `{}`\n", table.name));
        info.push_str("#\n");
        info.push_str("# ### Columns\n");
    } else {
        info.push_str(&format!("# Table name: {}\n", table.name));
    }
    info.push_str("#\n");
    info
}

fn schema_footer_text(options: &AnnotationOptions) -> String {
    if options.format == RenderFormat::Rdoc {
        format!("#--\n# {END_MARK}\n#++\n")
    } else {
        "#\n".to_string()
    }
}
