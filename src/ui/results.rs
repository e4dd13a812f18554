use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{GOLD, key_hint};
use crate::app::App;
use crate::ui::layout::calculate_results_chunks;

pub fn draw_results(f: &mut Frame, app: &App) {
    let (Some(result), Some(card)) = (app.result(), app.card()) else {
        return;
    };
    let layout = calculate_results_chunks(f.area());

    let header = Paragraph::new("TARKIA INTELLIGENCE")
        .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD));
    f.render_widget(outer, layout.content_area);

    let title = Paragraph::new(card.tier.title())
        .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default());
    f.render_widget(title, layout.title_area);

    let score = Paragraph::new(format!(
        "Você acertou {} de {} questões",
        result.score, result.total
    ))
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center);
    f.render_widget(score, layout.score_area);

    let message = Paragraph::new(format!("\"{}\"", card.tier.message()))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT));
    f.render_widget(message, layout.message_area);

    let next_step = Paragraph::new(vec![
        Line::from(Span::styled(
            "PRÓXIMO PASSO",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "\"Não voe sozinho. Voe com a bússola certa.\"",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Próximo Passo"));
    f.render_widget(next_step, layout.next_step_area);

    let share_label = if app.is_sharing() {
        " Gerando...  "
    } else {
        " Compartilhar Resultado  "
    };
    let footer = Paragraph::new(Line::from(
        [
            key_hint("s", share_label),
            key_hint("r", " Refazer Quiz  "),
            key_hint("q", " Sair"),
        ]
        .concat(),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("© Tarkia.ae - Dubai, UAE"));
    f.render_widget(footer, layout.footer_area);
}
