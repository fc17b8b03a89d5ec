/// Display width of a string as used for column alignment.
///
/// Codepoints that encode to 3 bytes in utf-8 count as 2 cells, everything
/// else counts as 1. This approximates East-Asian wide characters well
/// enough that annotations line up across locales.
pub fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if c.len_utf8() == 3 { 2 } else { 1 })
        .sum()
}

/// Right-pads `s` with spaces to `width` display cells.
///
/// If `s` is already wider than `width` it is truncated to `width` raw
/// characters instead. Truncation counts characters while padding counts
/// display cells; the asymmetry is intentional and load-bearing for the
/// plain dialect.
pub fn pad_display_width(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current < width {
        let mut padded = String::with_capacity(s.len() + (width - current));
        padded.push_str(s);
        for _ in 0..(width - current) {
            padded.push(' ');
        }
        padded
    } else {
        s.chars().take(width).collect()
    }
}
