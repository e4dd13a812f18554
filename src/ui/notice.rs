use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{GOLD, key_hint};
use crate::utils::centered_rect;

/// Modal message drawn over the current screen; dismissed with Enter/Esc.
pub fn draw_notice(f: &mut Frame, message: &str) {
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(message).style(Style::default().fg(Color::White)),
        Line::from(""),
        Line::from([key_hint("Enter/Esc", " OK")].concat()),
    ];
    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
                .title("Aviso"),
        );
    f.render_widget(notice, area);
}
