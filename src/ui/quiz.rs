use std::time::Instant;

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

use super::{GOLD, key_hint};
use crate::app::App;
use crate::session::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;

/// How an option is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Wrong,
    Dimmed,
}

pub fn option_state(session: &QuizSession, index: usize) -> OptionState {
    let Some(question) = session.current_question() else {
        return OptionState::Idle;
    };
    let selected = session.selected_option();
    if session.is_answered() {
        if index == question.correct_index {
            OptionState::Correct
        } else if Some(index) == selected {
            OptionState::Wrong
        } else {
            OptionState::Dimmed
        }
    } else if Some(index) == selected {
        OptionState::Selected
    } else {
        OptionState::Idle
    }
}

fn option_item(index: usize, text: &str, state: OptionState) -> ListItem<'_> {
    let letter = (b'A' + index as u8) as char;
    let (marker, style) = match state {
        OptionState::Idle => ("  ", Style::default()),
        OptionState::Selected => (
            "▶ ",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ),
        OptionState::Correct => (
            "✔ ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        OptionState::Wrong => (
            "✘ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        OptionState::Dimmed => ("  ", Style::default().fg(Color::DarkGray)),
    };
    ListItem::new(Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{}. ", letter), style),
        Span::styled(text, style),
    ]))
}

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let Some(question) = session.current_question() else {
        return;
    };
    let layout = calculate_quiz_chunks(f.area());
    let number = session.current_index() + 1;
    let total = session.total();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Questão {} de {}", number, total),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Tarkia Intelligence", Style::default().fg(GOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(GOLD))
        .ratio(number as f64 / total as f64)
        .label("");
    f.render_widget(progress, layout.progress_area);

    let border = if app.is_shaking(Instant::now()) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(GOLD)
    };
    let question_widget = Paragraph::new(Text::from(question.text.as_str()))
        .wrap(Wrap { trim: true })
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(question_widget, layout.question_area);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| option_item(i, option, option_state(session, i)))
        .collect();
    let options = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(options, layout.options_area);

    if session.is_answered() {
        let feedback = Text::from(vec![
            Line::from(Span::styled(
                "Feedback do Especialista",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(question.explanation.as_str()),
        ]);
        let feedback = Paragraph::new(feedback)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(feedback, layout.feedback_area);
    } else {
        let hint = Paragraph::new("Selecione uma alternativa para continuar.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, layout.feedback_area);
    }

    let enter_label = if !session.is_answered() {
        " Confirmar Resposta  "
    } else if session.is_last_question() {
        " Ver Resultado  "
    } else {
        " Próxima  "
    };
    let help = Paragraph::new(Line::from(
        [
            key_hint("↑/↓", " Navegar  "),
            key_hint("1-4", " Escolher  "),
            key_hint("Enter", enter_label),
            key_hint("Ctrl+C", " Sair"),
        ]
        .concat(),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sample_questions;

    fn states(session: &QuizSession) -> Vec<OptionState> {
        (0..4).map(|i| option_state(session, i)).collect()
    }

    #[test]
    fn test_selected_option_is_highlighted() {
        let mut session = QuizSession::new(sample_questions(1)).unwrap();
        assert!(states(&session).iter().all(|s| *s == OptionState::Idle));
        session.select_option(2);
        assert_eq!(states(&session)[2], OptionState::Selected);
    }

    #[test]
    fn test_wrong_answer_marks_both() {
        // question 0 is correct at index 0
        let mut session = QuizSession::new(sample_questions(1)).unwrap();
        session.select_option(3);
        session.confirm_answer();
        assert_eq!(
            states(&session),
            vec![
                OptionState::Correct,
                OptionState::Dimmed,
                OptionState::Dimmed,
                OptionState::Wrong
            ]
        );
    }

    #[test]
    fn test_correct_answer_dims_the_rest() {
        let mut session = QuizSession::new(sample_questions(1)).unwrap();
        session.select_option(0);
        session.confirm_answer();
        let states = states(&session);
        assert_eq!(states[0], OptionState::Correct);
        assert!(!states.contains(&OptionState::Wrong));
    }
}
