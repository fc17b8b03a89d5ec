use once_cell::sync::Lazy;
use regex::Regex;

/// Interpreter directive comments that must stay pinned to the top of a
/// file: encoding declarations in their various spellings and
/// frozen-string-literal declarations.
static MAGIC_COMMENT_MATCHER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(^#\s*encoding:.*)|(^# coding:.*)|(^# -\*- coding:.*)|(^# -\*- encoding\s?:.*)|(^#\s*frozen_string_literal:.+)|(^# -\*- frozen_string_literal\s*:.+-\*-)",
    )
    .unwrap()
});

/// Splits a line sequence into (magic comments, everything else), both in
/// original order. Magic comment lines come back trimmed.
pub(crate) fn extract_magic_comments(lines: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut magic_comments = Vec::new();
    let mut rest = Vec::new();

    for line in lines {
        if MAGIC_COMMENT_MATCHER.is_match(&line) {
            magic_comments.push(line.trim().to_string());
        } else {
            rest.push(line);
        }
    }

    (magic_comments, rest)
}
