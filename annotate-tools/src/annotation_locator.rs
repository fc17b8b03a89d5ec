use crate::magic_comments::extract_magic_comments;
use crate::schema_info::END_MARK;
use once_cell::sync::Lazy;
use regex::Regex;

/// Where a previously inserted annotation block was found in a file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnnotationLocation {
    /// At the top of the file (ignoring magic comments).
    Before,
    /// At the bottom of the file.
    After,
    /// Buried somewhere in the middle.
    Middle,
    Absent,
}

/// Opening marker of an annotation block: a comment line whose text starts
/// with the schema-information header, in either the plain (`==`) or
/// markdown (`##`) spelling.
static BEGIN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#\s*(==|##) schema info").unwrap());

static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#").unwrap());

/// Removes a previously inserted annotation block from `lines` and reports
/// where it was.
///
/// Only the first marker occurrence opens a block; any later marker passes
/// through as ordinary content. The block extends over the following
/// comment run and stops early at the literal end mark, so an rdoc block
/// directly followed by unrelated comments is not over-consumed. The single
/// blank line that separated the block from the content is dropped with it.
pub(crate) fn strip_annotation(lines: Vec<String>) -> (Vec<String>, AnnotationLocation) {
    #[derive(Eq, PartialEq)]
    enum Mode {
        Content,
        Block,
        // The end mark was consumed; only the rdoc `#++` closer may follow.
        AfterEndMark,
        // The block is over; one separating blank line is dropped with it.
        Exiting,
    }

    let mut remaining: Vec<String> = Vec::new();
    let mut mode = Mode::Content;
    let mut annotation_seen = false;
    // 1-based line number of the begin marker, 0 while unseen.
    let mut marker_line = 0usize;

    for (index, line) in lines.into_iter().enumerate() {
        if mode == Mode::Block {
            if line.contains(END_MARK) {
                mode = Mode::AfterEndMark;
                continue;
            }
            if COMMENT_LINE.is_match(&line) {
                continue;
            }
            mode = Mode::Exiting;
        }

        if mode == Mode::AfterEndMark {
            mode = Mode::Exiting;
            if line.trim() == "#++" {
                continue;
            }
        }

        if mode == Mode::Exiting {
            mode = Mode::Content;
            if line.is_empty() {
                continue;
            }
            remaining.push(line);
            continue;
        }

        if !annotation_seen && BEGIN_MARKER.is_match(&line) {
            annotation_seen = true;
            mode = Mode::Block;
            marker_line = index + 1;
        } else {
            remaining.push(line);
        }
    }

    let location = location_of(marker_line, &remaining);
    (remaining, location)
}

fn location_of(marker_line: usize, remaining: &[String]) -> AnnotationLocation {
    if marker_line == 0 {
        return AnnotationLocation::Absent;
    }
    if marker_line == 1 {
        return AnnotationLocation::Before;
    }

    // Magic comments do not count when deciding whether the block sat at
    // the bottom of the file.
    let (_, content) = extract_magic_comments(remaining.to_vec());
    if marker_line >= content.len() {
        AnnotationLocation::After
    } else {
        AnnotationLocation::Middle
    }
}
