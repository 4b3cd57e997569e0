use std::sync::LazyLock;

use regex::Regex;

static CUE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}(:\d{2})?[.,]\d{3}\s*-->\s*\d{1,2}:\d{2}(:\d{2})?[.,]\d{3}")
        .expect("cue timing pattern is valid")
});
static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("inline tag pattern is valid"));

/// Flattens SRT/WebVTT caption files into plain transcript text.
///
/// Cue numbers, timing lines, the `WEBVTT` header and inline markup are
/// dropped; consecutive duplicate lines (rolling captions) are collapsed.
/// Only meant for caption files: digit-only and repeated lines in ordinary
/// prose would be lost.
pub fn format_captions(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with("WEBVTT")
            || trimmed.starts_with("NOTE")
            || CUE_TIMING.is_match(trimmed)
            || trimmed.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }

        let stripped = INLINE_TAG.replace_all(trimmed, "");
        let mut collapsed = String::with_capacity(stripped.len());
        collapse_internal_whitespace(&stripped, &mut collapsed);

        if collapsed.is_empty() || lines.last() == Some(&collapsed) {
            continue;
        }
        lines.push(collapsed);
    }

    lines.join("\n")
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.trim().chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
