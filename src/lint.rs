//! Markdown lint fixes
//!
//! Line-level repairs for the usual markdownlint complaints found in exported
//! notes. Everything here is a pure function over the document; fenced code
//! blocks pass through untouched.

use std::borrow::Cow;
use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants as C;

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)(?:[-*+]|\d+[.)])(?:[ \t]|$)").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(\S.*)$").unwrap());
// Balanced parentheses stay inside the URL, as in wiki article names
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://(?:[^\s<>\[\]()"'`]|\([^\s<>\[\]()"'`]*\))+"#).unwrap()
});
static BARE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+").unwrap());
// Code spans, autolinks/inline html and inline links or images
static PROTECTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`]*`|<[^<>\s]+>|!?\[[^\]]*\]\([^)]*\)|\]\([^)]*\)").unwrap());

const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Apply every lint fix to a Markdown document.
///
/// When list items use four-space steps, list lines and their indented
/// continuation lines are re-indented to two-space steps. Fenced blocks nested
/// in such a list keep their original indent.
///
/// The result ends with exactly one newline unless the document is blank.
pub fn fix_markdown(doc: &str) -> String {
    let halve_list_indent = uses_four_space_lists(doc);
    let mut headings = HeadingState::default();
    let mut fence = FenceTracker::default();
    let mut in_list = false;
    let mut out: Vec<String> = Vec::new();

    for line in doc.lines() {
        if fence.skip(line) {
            out.push(line.to_string());
            continue;
        }

        let mut fixed = fix_trailing_whitespace(line);
        if halve_list_indent {
            if LIST_ITEM.is_match(&fixed) {
                in_list = true;
                fixed = halve_indent(&fixed);
            } else if in_list && fixed.starts_with(' ') {
                fixed = halve_indent(&fixed);
            } else if !fixed.is_empty() {
                in_list = false;
            }
        }
        if let Some(heading) = headings.fix(&fixed) {
            fixed = heading;
        }
        fixed = wrap_bare_links(&fixed).into_owned();
        out.push(fixed);
    }

    while out.last().map(|l| l.is_empty()).unwrap_or(false) {
        out.pop();
    }
    if out.is_empty() {
        return String::new();
    }

    let mut result = out.join("\n");
    result.push('\n');
    result
}

/// Strip trailing whitespace, keeping (and normalizing) a two-space hard break
pub fn fix_trailing_whitespace(line: &str) -> String {
    let body = line.trim_end();
    if body.is_empty() {
        return String::new();
    }
    let tail = &line[body.len()..];
    if tail.len() >= C::HARD_BREAK.len() && tail.chars().all(|c| c == ' ') {
        format!("{}{}", body, C::HARD_BREAK)
    } else {
        body.to_string()
    }
}

/// Remove trailing punctuation from heading text
pub fn strip_heading_punctuation(text: &str) -> &str {
    let stripped = text.trim_end_matches(C::HEADING_TRAILING_PUNCTUATION).trim_end();
    if stripped.is_empty() {
        text
    } else {
        stripped
    }
}

/// Wrap bare URLs and e-mail addresses in angle brackets
pub fn wrap_bare_links(line: &str) -> Cow<'_, str> {
    if !line.contains("://") && !line.contains('@') {
        return Cow::Borrowed(line);
    }

    let protected: Vec<Range<usize>> = PROTECTED.find_iter(line).map(|m| m.range()).collect();
    let url_matches: Vec<Range<usize>> = BARE_URL.find_iter(line).map(|m| m.range()).collect();
    let mut spans: Vec<Range<usize>> = Vec::new();

    for raw in &url_matches {
        let scheme_end = line[raw.clone()].find("://").map(|i| raw.start + i + 3).unwrap_or(raw.start);
        let mut end = raw.end;
        while end > scheme_end + 1 && line[..end].ends_with(URL_TRAILING_PUNCTUATION) {
            end -= 1;
        }
        let span = raw.start..end;
        if is_wrappable(line, &span, &protected) {
            spans.push(span);
        }
    }

    for m in BARE_EMAIL.find_iter(line) {
        let span = m.range();
        if overlaps_any(&span, &url_matches) || preceded_by(line, span.start, ':') {
            continue;
        }
        if is_wrappable(line, &span, &protected) {
            spans.push(span);
        }
    }

    if spans.is_empty() {
        return Cow::Borrowed(line);
    }

    spans.sort_by_key(|s| s.start);
    let mut result = String::with_capacity(line.len() + spans.len() * 2);
    let mut last = 0;
    for span in spans {
        result.push_str(&line[last..span.start]);
        result.push('<');
        result.push_str(&line[span.clone()]);
        result.push('>');
        last = span.end;
    }
    result.push_str(&line[last..]);
    Cow::Owned(result)
}

fn is_wrappable(line: &str, span: &Range<usize>, protected: &[Range<usize>]) -> bool {
    if overlaps_any(span, protected) {
        return false;
    }
    let before = line[..span.start].chars().next_back();
    let after = line[span.end..].chars().next();
    !matches!(before, Some('[' | '(' | '<')) && !matches!(after, Some(']' | '(' | ')' | '>'))
}

fn overlaps_any(span: &Range<usize>, others: &[Range<usize>]) -> bool {
    others.iter().any(|o| o.start < span.end && span.start < o.end)
}

fn preceded_by(line: &str, index: usize, c: char) -> bool {
    line[..index].ends_with(c)
}

/// Opening or closing fence marker (``` or ~~~ run) of a line, if any
fn fence_marker(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let fence_char = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run = trimmed.chars().take_while(|c| *c == fence_char).count();
    if run >= 3 {
        Some(fence_char.to_string().repeat(run))
    } else {
        None
    }
}

/// Whether list items are indented in four-space steps
fn uses_four_space_lists(doc: &str) -> bool {
    let mut fence = FenceTracker::default();
    let mut min_indent: Option<usize> = None;

    for line in doc.lines() {
        if fence.skip(line) {
            continue;
        }
        if let Some(caps) = LIST_ITEM.captures(line) {
            let indent = caps[1].len();
            if indent > 0 {
                min_indent = Some(min_indent.map_or(indent, |m| m.min(indent)));
            }
        }
    }

    min_indent.map(|m| m >= 4).unwrap_or(false)
}

fn halve_indent(line: &str) -> String {
    let indent = line.len() - line.trim_start_matches(' ').len();
    format!("{}{}", " ".repeat(indent / 2), &line[indent..])
}

/// Fenced code block state. A block closes only on a run of the same
/// character at least as long as the one that opened it.
#[derive(Default)]
struct FenceTracker {
    open: Option<String>,
}

impl FenceTracker {
    /// Feed one line; true when it is a fence line or inside a block
    fn skip(&mut self, line: &str) -> bool {
        let Some(marker) = fence_marker(line) else {
            return self.open.is_some();
        };
        match self.open.as_deref().map(|open| marker.starts_with(open)) {
            Some(true) => self.open = None,
            Some(false) => {}
            None => self.open = Some(marker),
        }
        true
    }
}

/// Heading level clamping and duplicate disambiguation across a document
#[derive(Default)]
struct HeadingState {
    previous_level: Option<usize>,
    seen: HashSet<String>,
}

impl HeadingState {
    fn fix(&mut self, line: &str) -> Option<String> {
        let caps = HEADING.captures(line)?;
        let mut level = caps[1].len();
        let text = strip_heading_punctuation(caps[2].trim_end());

        if let Some(previous) = self.previous_level {
            if level > previous + 1 {
                level = previous + 1;
            }
        }
        self.previous_level = Some(level);

        let mut unique = text.to_string();
        if self.seen.contains(&unique) {
            let mut n = 2;
            while self.seen.contains(&format!("{} {}", text, n)) {
                n += 1;
            }
            unique = format!("{} {}", text, n);
        }
        self.seen.insert(unique.clone());

        Some(format!("{} {}", "#".repeat(level), unique))
    }
}
