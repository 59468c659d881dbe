//! Field rendering utilities for forms

use crate::state::{FieldValue, FormField, TimeSlot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field using FormField from the domain layer.
///
/// `is_locked` dims the field while a booking is in flight.
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, is_locked: bool) {
    let accent = if is_locked { Color::Gray } else { Color::Cyan };

    let mut style = if is_active {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if field.has_invalid_date() {
        style = style.fg(Color::Red);
    }

    let border_style = if is_active {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let is_placeholder = display_value.is_empty() && !is_active;
    let display_str = if is_placeholder {
        field.placeholder().to_string()
    } else {
        display_value
    };

    let cursor = if is_active && !is_locked { "▌" } else { "" };

    let content = match &field.value {
        FieldValue::Text(_) if field.is_multiline => {
            let mut lines: Vec<Line> = display_str
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), style)))
                .collect();
            if display_str.ends_with('\n') {
                lines.push(Line::from(""));
            }
            if !cursor.is_empty() {
                if let Some(last) = lines.last_mut() {
                    last.spans
                        .push(Span::styled(cursor, Style::default().fg(accent)));
                } else {
                    lines.push(Line::from(Span::styled(cursor, Style::default().fg(accent))));
                }
            }
            Paragraph::new(lines)
        }
        // The slot is picked with arrows, so show every slot instead of a cursor
        FieldValue::Time(selected) if is_active && !is_locked => {
            let mut spans = Vec::new();
            for slot in TimeSlot::all() {
                let slot_style = if Some(slot) == *selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(slot.to_string(), slot_style));
                spans.push(Span::raw(" "));
            }
            Paragraph::new(Line::from(spans))
        }
        _ => Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(accent)),
        ])),
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a line of key hints (e.g. "Tab: next field")
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
