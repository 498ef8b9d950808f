// src/util/text.rs
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"[ \t\u{a0}]+").expect("Failed to compile whitespace regex");
}

/// Extract the first non-empty line of free text, with runs of blanks
/// collapsed to single spaces.
///
/// # Examples
///
/// ```
/// use notesview::util::text::first_line;
///
/// assert_eq!(first_line("\n  Buy   milk\nand eggs"), "Buy milk");
/// ```
pub fn first_line(text: &str) -> String {
    text.lines()
        .map(|line| WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned())
        .find(|line| !line.is_empty())
        .unwrap_or_default()
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut shortened: String = text.chars().take(width - 1).collect();
    shortened.push('…');
    shortened
}

/// Table cell for a description: first line, truncated, with a marker when
/// more lines follow
pub fn preview(text: &str, width: usize) -> String {
    let line = first_line(text);
    let more = text.trim().lines().count() > 1;
    if more && line.chars().count() < width {
        truncate(&format!("{} …", line), width)
    } else {
        truncate(&line, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_single_line_when_extracting_first_line_then_returns_trimmed_text() {
        assert_eq!(first_line("  Groceries  "), "Groceries");
    }

    #[test]
    fn given_leading_blank_lines_when_extracting_first_line_then_skips_them() {
        assert_eq!(first_line("\n\n  \nSecond\nThird"), "Second");
    }

    #[test]
    fn given_tabs_and_spaces_when_extracting_first_line_then_collapses_runs() {
        assert_eq!(first_line("a \t\t b    c"), "a b c");
    }

    #[test]
    fn given_empty_text_when_extracting_first_line_then_returns_empty_string() {
        assert_eq!(first_line(""), "");
    }

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly10!", 10, "exactly10!")]
    #[case("a bit too long", 10, "a bit too…")]
    #[case("äöüäöüäöü", 4, "äöü…")]
    #[case("anything", 0, "")]
    fn test_truncate(#[case] input: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(truncate(input, width), expected);
    }

    #[test]
    fn given_multiline_text_when_previewing_then_marks_continuation() {
        assert_eq!(preview("first\nsecond", 20), "first …");
    }

    #[test]
    fn given_long_single_line_when_previewing_then_truncates() {
        assert_eq!(preview("a very long description indeed", 10), "a very lo…");
    }
}
