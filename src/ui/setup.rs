use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{GOLD, NAVY, key_hint};
use crate::app::App;
use crate::models::Difficulty;
use crate::ui::layout::calculate_setup_chunks;
use crate::utils::truncate_string;

pub fn draw_setup(f: &mut Frame, app: &App) {
    let layout = calculate_setup_chunks(f.area());

    let header = Paragraph::new("TARKIA")
        .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(GOLD)));
    f.render_widget(header, layout.header_area);

    let hero = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("O novo mapa da "),
            Span::styled(
                "LIBERDADE FINANCEIRA",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Teste seus conhecimentos sobre como estruturar negócios e patrimônio em Dubai com segurança fiscal e jurídica.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("◆ Internacionalização", Style::default().fg(GOLD)),
            Span::styled(
                "  Expanda fronteiras com segurança",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("◆ Holding Patrimonial", Style::default().fg(GOLD)),
            Span::styled(
                "  Proteção e eficiência fiscal",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    let hero = Paragraph::new(hero)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Prepare-se para o Quiz"));
    f.render_widget(hero, layout.hero_area);

    let mut levels = Vec::new();
    for (i, level) in Difficulty::ALL.iter().enumerate() {
        if i > 0 {
            levels.push(Span::raw("   "));
        }
        let style = if *level == app.difficulty() {
            Style::default()
                .fg(NAVY)
                .bg(GOLD)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        levels.push(Span::styled(format!(" {} {} ", i + 1, level.label()), style));
    }
    let difficulty = Paragraph::new(Line::from(levels))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Nível de Dificuldade")
                .title_style(Style::default().fg(GOLD)),
        );
    f.render_widget(difficulty, layout.difficulty_area);

    let start = Paragraph::new(format!(
        "Iniciar Desafio ({} Questões) →",
        app.question_count()
    ))
    .style(Style::default().fg(NAVY).bg(GOLD).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(start, layout.start_area);

    let help = Paragraph::new(Line::from(
        [
            key_hint("←/→", " Dificuldade  "),
            key_hint("Enter", " Iniciar  "),
            key_hint("q/Ctrl+C", " Sair"),
        ]
        .concat(),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Baseado no eBook oficial da Tarkia")
            .title_bottom(source_preview(app, layout.help_area.width)),
    );
    f.render_widget(help, layout.help_area);
}

fn source_preview(app: &App, width: u16) -> Line<'static> {
    let first = app.source_text().lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let room = usize::from(width.saturating_sub(12));
    Line::from(Span::styled(
        format!(" Fonte: {} ", truncate_string(first.trim(), room)),
        Style::default().fg(Color::DarkGray),
    ))
}
