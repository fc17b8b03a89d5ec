use crate::annotation_locator::{strip_annotation, AnnotationLocation};
use crate::magic_comments::extract_magic_comments;
use crate::options::{AnnotationOptions, FilePosition};

/// Splices an annotation block into `existing_text` at the configured
/// position, replacing any previously inserted block. Pure text in, text
/// out: the second element reports whether the result differs from the
/// input, so callers can skip the disk write entirely.
///
/// Magic comments always come out on top, a single blank line separates the
/// block from the content, and the result ends with exactly one newline.
pub fn insert_annotation(
    existing_text: &str,
    block: &str,
    options: &AnnotationOptions,
) -> (String, bool) {
    let (stripped, location) = strip_annotation(split_lines(existing_text));
    let (magic_comments, mut content) = extract_magic_comments(stripped);
    let block_lines = block_lines(block);

    let mut new_content: Vec<String>;
    if options.position_in_file == FilePosition::Top {
        new_content = magic_comments;
        if !new_content.is_empty() {
            new_content.push(String::new());
        }
        new_content.extend(block_lines);
        if content.first().map(String::as_str) != Some("") {
            new_content.push(String::new());
        }
        new_content.append(&mut content);
    } else {
        // A blank line must separate the content from the annotation.
        if content.last().map(String::as_str) != Some("") {
            content.push(String::new());
        }
        // The block is moving from the top of the file to the bottom, so
        // ditch the spacer the top placement left behind.
        if location == AnnotationLocation::Before
            && content.first().map(String::as_str) == Some("")
        {
            content.remove(0);
        }
        new_content = magic_comments;
        new_content.append(&mut content);
        new_content.extend(block_lines);
    }

    if new_content.last().map(String::as_str) != Some("") {
        new_content.push(String::new());
    }

    let new_text = new_content.join("\n");
    let changed = new_text != existing_text;
    (new_text, changed)
}

/// Removes a previously inserted annotation block, tidying the blank lines
/// the placement left behind. Returns the new text and whether anything
/// changed.
pub fn remove_annotation(existing_text: &str, _options: &AnnotationOptions) -> (String, bool) {
    let (mut content, location) = strip_annotation(split_lines(existing_text));

    match location {
        AnnotationLocation::Before => {
            while content.first().map(String::as_str) == Some("") {
                content.remove(0);
            }
        }
        AnnotationLocation::After => {
            while content.last().map(String::as_str) == Some("") {
                content.pop();
            }
        }
        // Blocks buried mid-file keep their surroundings untouched.
        AnnotationLocation::Middle | AnnotationLocation::Absent => {}
    }

    if content.last().map(String::as_str) != Some("") {
        content.push(String::new());
    }

    let new_text = content.join("\n");
    let changed = new_text != existing_text;
    (new_text, changed)
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|line| line.to_string()).collect()
}

/// The generated block ends with a newline; as a line sequence that trailing
/// empty entry is not part of the block.
fn block_lines(block: &str) -> Vec<String> {
    let mut lines = split_lines(block);
    if lines.last().map(String::as_str) == Some("") {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default;
    use crate::models::{ColumnDescription, PrimaryKeyDescription, TableDescription};
    use crate::schema_info::{generate_schema_info, DEFAULT_HEADER};
    use indoc::indoc;

    fn users_block(options: &AnnotationOptions) -> String {
        let mut id = ColumnDescription::new("id", "integer");
        id.is_nullable = false;
        let table = TableDescription {
            columns: vec![id],
            primary_key: Some(PrimaryKeyDescription::Single("id".to_string())),
            ..TableDescription::new("users")
        };
        generate_schema_info(&table, DEFAULT_HEADER, options)
    }

    const MODEL_FILE: &str = indoc! {r#"
        class User < ApplicationRecord
        end
    "#};

    #[test]
    fn inserts_at_the_bottom_by_default() {
        let options = AnnotationOptions::default();
        let (new_text, changed) = insert_annotation(MODEL_FILE, &users_block(&options), &options);

        assert!(changed);
        similar_asserts::assert_eq!(
            new_text,
            indoc! {r#"
                class User < ApplicationRecord
                end

                # == Schema Information
                #
                # Table name: users
                #
                #  id :integer          not null, primary key
                #
            "#}
        );
    }

    #[test]
    fn inserts_at_the_top_when_asked() {
        let options = AnnotationOptions {
            position_in_file: FilePosition::Top,
            ..default()
        };
        let (new_text, changed) = insert_annotation(MODEL_FILE, &users_block(&options), &options);

        assert!(changed);
        similar_asserts::assert_eq!(
            new_text,
            indoc! {r#"
                # == Schema Information
                #
                # Table name: users
                #
                #  id :integer          not null, primary key
                #

                class User < ApplicationRecord
                end
            "#}
        );
    }

    #[test]
    fn reinsertion_is_idempotent() {
        for position_in_file in [FilePosition::Top, FilePosition::Bottom] {
            let options = AnnotationOptions {
                position_in_file,
                ..default()
            };
            let block = users_block(&options);

            let (once, changed) = insert_annotation(MODEL_FILE, &block, &options);
            assert!(changed);
            let (twice, changed) = insert_annotation(&once, &block, &options);
            assert!(!changed, "position: {position_in_file:?}");
            similar_asserts::assert_eq!(once, twice);
        }
    }

    #[test]
    fn updates_a_stale_block_in_place() {
        let options = AnnotationOptions::default();
        let stale = indoc! {r#"
            class User < ApplicationRecord
            end

            # == Schema Information
            #
            # Table name: users
            #
            #  id :integer          not null
            #
        "#};

        let (new_text, changed) = insert_annotation(stale, &users_block(&options), &options);
        assert!(changed);
        assert!(new_text.contains("not null, primary key"));
        assert_eq!(new_text.matches("== Schema Information").count(), 1);
    }

    #[test]
    fn toggling_top_to_bottom_leaves_no_blank_pileup() {
        let top_options = AnnotationOptions {
            position_in_file: FilePosition::Top,
            ..default()
        };
        let bottom_options = AnnotationOptions::default();
        let block = users_block(&top_options);

        let (on_top, _) = insert_annotation(MODEL_FILE, &block, &top_options);
        let (on_bottom, _) = insert_annotation(&on_top, &block, &bottom_options);

        assert!(!on_bottom.contains("\n\n\n"));
        similar_asserts::assert_eq!(
            on_bottom,
            indoc! {r#"
                class User < ApplicationRecord
                end

                # == Schema Information
                #
                # Table name: users
                #
                #  id :integer          not null, primary key
                #
            "#}
        );
    }

    #[test]
    fn magic_comments_always_lead() {
        let file = indoc! {r#"
            # frozen_string_literal: true

            class User < ApplicationRecord
            end
        "#};

        for position_in_file in [FilePosition::Top, FilePosition::Bottom] {
            let options = AnnotationOptions {
                position_in_file,
                ..default()
            };
            let (new_text, _) = insert_annotation(file, &users_block(&options), &options);
            assert!(
                new_text.starts_with("# frozen_string_literal: true\n"),
                "position: {position_in_file:?}"
            );
            assert!(!new_text.contains("\n\n\n"));
        }
    }

    #[test]
    fn top_insertion_with_magic_comments_keeps_one_separator() {
        let file = indoc! {r#"
            # encoding: utf-8
            class User < ApplicationRecord
            end
        "#};
        let options = AnnotationOptions {
            position_in_file: FilePosition::Top,
            ..default()
        };

        let (new_text, _) = insert_annotation(file, &users_block(&options), &options);
        similar_asserts::assert_eq!(
            new_text,
            indoc! {r#"
                # encoding: utf-8

                # == Schema Information
                #
                # Table name: users
                #
                #  id :integer          not null, primary key
                #

                class User < ApplicationRecord
                end
            "#}
        );
    }

    #[test]
    fn removal_round_trips_to_the_original_text() {
        for position_in_file in [FilePosition::Top, FilePosition::Bottom] {
            let options = AnnotationOptions {
                position_in_file,
                ..default()
            };
            let block = users_block(&options);

            let (annotated, _) = insert_annotation(MODEL_FILE, &block, &options);
            let (restored, changed) = remove_annotation(&annotated, &options);
            assert!(changed, "position: {position_in_file:?}");
            similar_asserts::assert_eq!(restored, MODEL_FILE);
        }
    }

    #[test]
    fn removal_without_a_block_reports_unchanged() {
        let options = AnnotationOptions::default();
        let (new_text, changed) = remove_annotation(MODEL_FILE, &options);
        assert!(!changed);
        similar_asserts::assert_eq!(new_text, MODEL_FILE);
    }

    #[test]
    fn insertion_into_an_empty_file_is_just_the_block() {
        let top_options = AnnotationOptions {
            position_in_file: FilePosition::Top,
            ..default()
        };
        let block = users_block(&top_options);

        let (new_text, changed) = insert_annotation("", &block, &top_options);
        assert!(changed);
        similar_asserts::assert_eq!(new_text, block);

        // Bottom placement keeps the empty line the empty file consists of.
        let bottom_options = AnnotationOptions::default();
        let (new_text, changed) = insert_annotation("", &block, &bottom_options);
        assert!(changed);
        similar_asserts::assert_eq!(new_text, format!("\n{block}"));
    }

    #[test]
    fn files_without_trailing_newline_are_normalized() {
        let options = AnnotationOptions::default();
        let block = users_block(&options);

        let (new_text, _) = insert_annotation("class User\nend", &block, &options);
        assert!(new_text.ends_with("#\n"));
        assert!(new_text.starts_with("class User\nend\n\n# == Schema Information\n"));
    }
}
