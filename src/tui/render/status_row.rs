use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, Mode, Screen};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the bottom status row: errors or confirm prompts on the left,
/// key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width as usize;
    let base = Style::default().bg(theme.background);

    let line = match (app.mode, &app.confirm_state) {
        (Mode::Prompt, _) => {
            let (label, input) = app
                .prompt_state
                .as_ref()
                .map(|p| (p.label.as_str(), p.input.as_str()))
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    format!(" {}: ", label),
                    base.fg(theme.text_bright).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{}_", input), base.fg(theme.text)),
            ])
        }
        (Mode::Confirm, Some(confirm)) => Line::from(vec![
            Span::styled(
                format!(" {}", confirm.message),
                base.fg(theme.text_bright).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" y/n", base.fg(theme.highlight)),
        ]),
        _ => {
            let message = app
                .status_message
                .as_deref()
                .map(|m| format!(" {}", m))
                .unwrap_or_default();
            let hints = match app.screen {
                Screen::Journal => key_hints(app.focus),
                Screen::Scratchpads => SCRATCHPAD_HINTS,
            };
            let room = width.saturating_sub(display_width(&message));
            if display_width(hints) + 1 <= room {
                let gap = room - display_width(hints);
                Line::from(vec![
                    Span::styled(message, base.fg(theme.error)),
                    Span::styled(" ".repeat(gap), base),
                    Span::styled(hints, base.fg(theme.dim)),
                ])
            } else {
                Line::styled(truncate_to_width(&message, width), base.fg(theme.error))
            }
        }
    };

    frame.render_widget(Paragraph::new(line).style(base), area);
}

const SCRATCHPAD_HINTS: &str = "enter open  d delete  r rename  s journal  q quit ";

fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Calendar => {
            "enter edit  d delete  t today  +/- year  s scratchpads  tab focus  q quit "
        }
        Focus::Sections | Focus::Tags => "j/k move  enter calendar  tab focus  q quit ",
        Focus::Preview => "j/k scroll  tab focus  q quit ",
    }
}
