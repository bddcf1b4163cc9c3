use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::date::{Dates, MonthDay};

/// A recurring yearly event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub name: String,
    pub date: MonthDay,
}

/// Events grouped by name (birthdays, holidays, ...), in config order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEvents {
    groups: IndexMap<String, Vec<CalendarEvent>>,
}

impl CalendarEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: &str, event: CalendarEvent) {
        self.groups.entry(group.to_string()).or_default().push(event);
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[CalendarEvent])> {
        self.groups.iter().map(|(g, events)| (g.as_str(), events.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|events| events.is_empty())
    }

    /// Every day some event falls on
    pub fn event_dates(&self) -> Dates {
        self.groups
            .values()
            .flatten()
            .map(|event| event.date)
            .collect()
    }

    pub fn is_event_day(&self, day: MonthDay) -> bool {
        self.groups.values().flatten().any(|event| event.date == day)
    }
}

/// One event near today
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearbyEvent {
    pub name: String,
    pub date: MonthDay,
    /// Negative for past events
    pub days_away: i64,
}

impl NearbyEvent {
    /// `"today"`, `"in 3 days"` or `"3 days ago"`
    pub fn distance_label(&self) -> String {
        match self.days_away {
            0 => "today".to_string(),
            n if n < 0 => format!("{} days ago", -n),
            n => format!("in {} days", n),
        }
    }

    /// List row, e.g. `" - Ana 05.11. (in 3 days)"`
    pub fn list_text(&self) -> String {
        format!(" - {} {} ({})", self.name, self.date, self.distance_label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentAndUpcoming {
    /// Groups with at least one nearby event, in config order
    pub groups: Vec<(String, Vec<NearbyEvent>)>,
    /// `"group - name"` of an event falling on today, for the title bar
    pub today: Option<String>,
}

impl RecentAndUpcoming {
    pub fn event_count(&self) -> usize {
        self.groups.iter().map(|(_, events)| events.len()).sum()
    }
}

/// Events within `window` days of `today`, counted within today's year.
/// Events that do not exist this year (Feb 29) are skipped.
pub fn recent_and_upcoming(
    events: &CalendarEvents,
    today: NaiveDate,
    window: u32,
) -> RecentAndUpcoming {
    let today_md = MonthDay::of(today);
    let mut result = RecentAndUpcoming::default();

    for (group, group_events) in events.groups() {
        let mut nearby = Vec::new();
        for event in group_events {
            let Some(date) = event.date.in_year(today.year()) else {
                continue;
            };
            let days_away = (date - today).num_days();
            if days_away.unsigned_abs() > u64::from(window) {
                continue;
            }
            if event.date == today_md {
                result.today = Some(format!("{} - {}", group, event.name));
            }
            nearby.push(NearbyEvent {
                name: event.name.clone(),
                date: event.date,
                days_away,
            });
        }
        if !nearby.is_empty() {
            result.groups.push((group.to_string(), nearby));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(name: &str, day: u32, month: u32) -> CalendarEvent {
        CalendarEvent {
            name: name.to_string(),
            date: MonthDay::new(month, day),
        }
    }

    fn sample() -> CalendarEvents {
        let mut events = CalendarEvents::new();
        events.push("holidays", event("New Year", 1, 1));
        events.push("birthdays", event("Ana", 20, 3));
        events.push("birthdays", event("Ivo", 10, 3));
        events.push("birthdays", event("Far", 1, 9));
        events
    }

    #[test]
    fn window_and_labels() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let nearby = recent_and_upcoming(&sample(), today, 14);

        assert_eq!(nearby.groups.len(), 1);
        let (group, items) = &nearby.groups[0];
        assert_eq!(group, "birthdays");
        let texts: Vec<_> = items.iter().map(NearbyEvent::list_text).collect();
        assert_eq!(
            texts,
            vec![" - Ana 20.03. (in 5 days)", " - Ivo 10.03. (5 days ago)"]
        );
        assert_eq!(nearby.today, None);
        assert_eq!(nearby.event_count(), 2);
    }

    #[test]
    fn todays_event_is_reported() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let nearby = recent_and_upcoming(&sample(), today, 0);
        assert_eq!(nearby.today.as_deref(), Some("holidays - New Year"));
        assert_eq!(nearby.groups[0].1[0].distance_label(), "today");
    }

    #[test]
    fn leap_day_event_skipped_in_common_years() {
        let mut events = CalendarEvents::new();
        events.push("odd", event("Leap", 29, 2));
        let today = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert!(recent_and_upcoming(&events, today, 30).groups.is_empty());
        let leap = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(recent_and_upcoming(&events, leap, 30).event_count(), 1);
    }

    #[test]
    fn event_days() {
        let events = sample();
        assert!(events.is_event_day(MonthDay::new(3, 10)));
        assert!(!events.is_event_day(MonthDay::new(3, 11)));
        assert_eq!(events.event_dates().len(), 4);
        assert!(CalendarEvents::new().is_empty());
    }
}
