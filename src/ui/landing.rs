//! Landing screen shown behind the booking modal

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Appointments ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(inner);

    // Dim the background while the modal is open
    let accent = if app.state.current_view.is_form_view() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let key_style = Style::default().fg(accent).add_modifier(Modifier::BOLD);

    let content = vec![
        Line::from(Span::styled(
            "Schedule a visit",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("b", key_style),
            Span::raw(" or "),
            Span::styled("Enter", key_style),
            Span::raw(" to book an appointment"),
        ]),
        Line::from(vec![
            Span::styled("q", key_style),
            Span::raw(" to quit"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
}
