//! Toast notifications stacked in the top-right corner

use super::dialog::wrap_text;
use crate::state::{Notifications, ToastKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TOAST_WIDTH: u16 = 36;

/// Render every visible toast, newest at the top
pub fn render_toasts(frame: &mut Frame, notifications: &Notifications) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let mut y = area.y + 1;

    for toast in notifications.iter().collect::<Vec<_>>().into_iter().rev() {
        let (icon, color) = match toast.kind {
            ToastKind::Success => ("✓", Color::Green),
            ToastKind::Error => ("✗", Color::Red),
        };

        let lines: Vec<Line> = wrap_text(&format!("{icon} {}", toast.message), text_width)
            .into_iter()
            .map(Line::from)
            .collect();
        let height = lines.len() as u16 + 2;
        if y + height > area.bottom() {
            break;
        }

        let toast_area = Rect {
            x: area.right().saturating_sub(width + 1),
            y,
            width,
            height,
        };
        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                ),
            toast_area,
        );
        y += height;
    }
}
