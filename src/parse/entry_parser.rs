use std::collections::{BTreeMap, BTreeSet};

use crate::model::keys::{SectionKey, normalize_title};

/// Marker that opens and closes a fenced code block
const FENCE: &str = "```";

/// Sections and tags read out of one log entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Section titles in order of appearance
    pub sections: Vec<String>,
    /// Tag titles in order of appearance
    pub tags: Vec<String>,
    /// Tags grouped under the nearest preceding section. A section with no
    /// tags still gets an (empty) entry; tags before any header land in
    /// `SectionKey::Root`.
    pub tags_per_section: BTreeMap<SectionKey, BTreeSet<String>>,
}

impl ParsedEntry {
    pub fn is_empty(&self) -> bool {
        self.tags_per_section.is_empty()
    }
}

/// Parse a log entry.
///
/// Lines are trimmed and lower-cased before matching. Anything inside a
/// fenced code block is ignored. With `skip_first_line`, a header on the
/// very first line is a title, not a section; tags are read from every line.
pub fn parse_entry(text: &str, skip_first_line: bool) -> ParsedEntry {
    let mut entry = ParsedEntry::default();
    let mut current = SectionKey::Root;

    for (idx, line) in content_lines(text) {
        if let Some(title) = section_title(&line) {
            if idx == 0 && skip_first_line {
                continue;
            }
            entry.sections.push(title.to_string());
            current = SectionKey::Named(title.to_string());
            entry.tags_per_section.entry(current.clone()).or_default();
        } else if let Some(title) = tag_title(&line) {
            entry.tags.push(title.to_string());
            entry
                .tags_per_section
                .entry(current.clone())
                .or_default()
                .insert(title.to_string());
        }
    }

    entry
}

/// Section titles only, in order of appearance
pub fn read_section_titles(text: &str, skip_first_line: bool) -> Vec<String> {
    parse_entry(text, skip_first_line).sections
}

/// Tag titles only, in order of appearance
pub fn read_tag_titles(text: &str) -> Vec<String> {
    parse_entry(text, false).tags
}

/// Normalized lines outside fenced code blocks, with their original line index
fn content_lines(text: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    let mut in_fence = false;
    text.lines().enumerate().filter_map(move |(idx, raw)| {
        let line = normalize_title(raw);
        if line.starts_with(FENCE) {
            in_fence = !in_fence;
        }
        if in_fence {
            None
        } else {
            Some((idx, line))
        }
    })
}

/// `# title`. Deeper headers (`## title`) are not sections.
fn section_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    if title.is_empty() { None } else { Some(title) }
}

/// `* title`, optionally followed by `(annotation)` and/or `: body`.
/// Titles are limited to ASCII letters, digits and spaces; anything else
/// means the line is not a tag.
fn tag_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('*')?;
    let body = rest.trim_start();
    if body.len() == rest.len() {
        return None;
    }

    let title_len = body
        .find(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '))
        .unwrap_or(body.len());
    let (title, tail) = body.split_at(title_len);
    if !is_tag_tail(tail) {
        return None;
    }

    let title = title.trim();
    if title.is_empty() { None } else { Some(title) }
}

/// What may follow a tag title: nothing, `: body`, `(note)`, or `(note): body`
fn is_tag_tail(tail: &str) -> bool {
    if tail.is_empty() || tail.starts_with(':') {
        return true;
    }
    if !tail.starts_with('(') {
        return false;
    }
    if tail.len() >= 3 && tail.ends_with(')') {
        return true;
    }
    tail.match_indices(':')
        .any(|(pos, _)| pos >= 3 && tail[..pos].ends_with(')'))
}
