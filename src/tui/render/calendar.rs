use chrono::{Datelike, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::date::{MonthDay, days_in_month, first_weekday_column, is_weekend, month_name};
use crate::tui::app::{App, Focus};

use super::pane;

const MONTH_W: u16 = 23;
const MONTH_H: u16 = 9;

const WEEK_MONDAY: &str = "Mo Tu We Th Fr Sa Su";
const WEEK_SUNDAY: &str = "Su Mo Tu We Th Fr Sa";

/// Render the year calendar, scrolled so the cursor's month is visible
pub fn render_calendar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = pane(
        format!(" {} ", app.year()),
        app.focus == Focus::Calendar,
        theme,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let cols = [4u16, 3, 2, 1]
        .into_iter()
        .find(|&c| c * MONTH_W <= inner.width)
        .unwrap_or(1);
    let visible_rows = (inner.height / MONTH_H).max(1);
    let cursor_row = (app.cursor.month0() as u16) / cols;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    for month in 1..=12u32 {
        let index = month as u16 - 1;
        let row = index / cols;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let cell = Rect {
            x: inner.x + (index % cols) * MONTH_W,
            y: inner.y + (row - first_row) * MONTH_H,
            width: MONTH_W - 2,
            height: MONTH_H - 1,
        }
        .intersection(inner);
        if cell.is_empty() {
            continue;
        }
        frame.render_widget(Paragraph::new(month_lines(app, month)), cell);
    }
}

fn month_lines(app: &App, month: u32) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let year = app.year();

    let title_style = if app.cursor.month() == month {
        Style::default()
            .fg(theme.text_bright)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let header = if app.sunday_start {
        WEEK_SUNDAY
    } else {
        WEEK_MONDAY
    };

    let mut lines = vec![
        Line::styled(month_name(month), title_style).alignment(Alignment::Center),
        Line::styled(header, Style::default().fg(theme.dim)),
    ];

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut column = first_weekday_column(year, month, app.sunday_start);
    if column > 0 {
        spans.push(Span::raw("   ".repeat(column as usize)));
    }
    for day in 1..=days_in_month(year, month) {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        spans.push(Span::styled(format!("{:>2}", day), day_style(app, date)));
        spans.push(Span::raw(" "));
        column += 1;
        if column == 7 {
            lines.push(Line::from(std::mem::take(&mut spans)));
            column = 0;
        }
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

fn day_style(app: &App, date: NaiveDate) -> Style {
    let theme = &app.theme;
    let day = MonthDay::of(date);
    let highlighted = app
        .journal
        .highlighted_dates()
        .is_some_and(|dates| dates.contains(&day));

    let mut style = if date == app.today {
        Style::default().fg(theme.today).add_modifier(Modifier::BOLD)
    } else if highlighted {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else if app.event_days.contains(&day) {
        Style::default().fg(theme.event)
    } else if is_weekend(date) {
        Style::default().fg(theme.weekend)
    } else {
        Style::default().fg(theme.text)
    };

    style = if app.journal.index().has_document(day) {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style.add_modifier(Modifier::DIM)
    };
    if date == app.cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}
