use serde::Serialize;

use crate::io::scratchpad::Scratchpad;
use crate::model::keys::{SectionKey, TagKey};
use crate::ops::events::{NearbyEvent, RecentAndUpcoming};
use crate::ops::search::SearchHit;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SectionJson {
    pub section: String,
    /// True for the tags-before-any-header bucket
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub root: bool,
    pub days: usize,
}

#[derive(Serialize)]
pub struct TagJson {
    pub tag: String,
    pub days: usize,
}

#[derive(Serialize)]
pub struct DatesJson {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub dates: Vec<String>,
}

#[derive(Serialize)]
pub struct EntryJson {
    pub date: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct ScratchpadJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    pub lines: usize,
}

#[derive(Serialize)]
pub struct ScratchpadTextJson {
    pub name: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub date: String,
    pub line: usize,
    pub text: String,
}

#[derive(Serialize)]
pub struct EventGroupJson<'a> {
    pub group: &'a str,
    pub events: &'a [NearbyEvent],
}

#[derive(Serialize)]
pub struct EventsJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<&'a str>,
    pub groups: Vec<EventGroupJson<'a>>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn section_to_json(section: &SectionKey, days: usize) -> SectionJson {
    SectionJson {
        section: section.label().to_string(),
        root: *section == SectionKey::Root,
        days,
    }
}

pub fn tag_to_json(tag: &TagKey, days: usize) -> TagJson {
    TagJson {
        tag: tag.label().to_string(),
        days,
    }
}

pub fn scratchpad_to_json(pad: &Scratchpad) -> ScratchpadJson {
    ScratchpadJson {
        name: pad.name.clone(),
        modified: pad.modified.map(|d| d.to_string()),
        lines: pad.text.lines().count(),
    }
}

pub fn hit_to_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        date: hit.date.to_string(),
        line: hit.line_number,
        text: hit.line.clone(),
    }
}

pub fn events_to_json(events: &RecentAndUpcoming) -> EventsJson<'_> {
    EventsJson {
        today: events.today.as_deref(),
        groups: events
            .groups
            .iter()
            .map(|(group, events)| EventGroupJson { group, events })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `ideas.md  2024-03-05`, the date left off when unknown
pub fn format_scratchpad(pad: &Scratchpad) -> String {
    match pad.modified {
        Some(date) => format!("{}  {}", pad.name, date),
        None => pad.name.clone(),
    }
}

/// `2024-03-05:12: the line`
pub fn format_hit(hit: &SearchHit) -> String {
    format!("{}:{}: {}", hit.date, hit.line_number, hit.line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn section_json_marks_root() {
        let json = serde_json::to_string(&section_to_json(&SectionKey::Root, 2)).unwrap();
        assert_eq!(json, r#"{"section":"<no section>","root":true,"days":2}"#);
        let json = serde_json::to_string(&section_to_json(&SectionKey::named("Work"), 1)).unwrap();
        assert_eq!(json, r#"{"section":"work","days":1}"#);
    }

    #[test]
    fn hit_formatting() {
        let hit = SearchHit {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            line_number: 12,
            line: "the line".into(),
            spans: vec![4..8],
        };
        assert_eq!(format_hit(&hit), "2024-03-05:12: the line");
        let json = serde_json::to_string(&hit_to_json(&hit)).unwrap();
        assert_eq!(json, r#"{"date":"2024-03-05","line":12,"text":"the line"}"#);
    }

    #[test]
    fn scratchpad_rows() {
        let mut pad = Scratchpad {
            name: "ideas.md".into(),
            text: "one\ntwo\n".into(),
            modified: NaiveDate::from_ymd_opt(2024, 3, 5),
        };
        assert_eq!(format_scratchpad(&pad), "ideas.md  2024-03-05");
        let json = serde_json::to_string(&scratchpad_to_json(&pad)).unwrap();
        assert_eq!(json, r#"{"name":"ideas.md","modified":"2024-03-05","lines":2}"#);

        pad.modified = None;
        assert_eq!(format_scratchpad(&pad), "ideas.md");
    }
}
