use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use super::GOLD;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub fn draw_loading(f: &mut Frame, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(f.area());

    let text = vec![
        Line::from(spinner_frame(tick)).style(Style::default().fg(GOLD)),
        Line::from(""),
        Line::from("Consultando a inteligência Tarkia...")
            .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Line::from("Preparando suas perguntas personalizadas.")
            .style(Style::default().fg(Color::Gray)),
    ];
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        chunks[1],
    );
}
