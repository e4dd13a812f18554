pub mod layout;
mod loading;
mod notice;
mod quiz;
mod results;
mod setup;

use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::app::App;
use crate::models::AppState;

pub use layout::{calculate_quiz_chunks, calculate_results_chunks, calculate_setup_chunks};
pub use loading::draw_loading;
pub use notice::draw_notice;
pub use quiz::{OptionState, draw_quiz, option_state};
pub use results::draw_results;
pub use setup::draw_setup;

pub const GOLD: Color = Color::Rgb(0xC5, 0xA5, 0x72);
pub const NAVY: Color = Color::Rgb(0x0B, 0x23, 0x41);

fn key_hint(key: &'static str, label: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::from(label),
    ]
}

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen() {
        AppState::Setup => draw_setup(f, app),
        AppState::Loading => draw_loading(f, app.spinner_tick()),
        AppState::Quiz => draw_quiz(f, app),
        AppState::Results => draw_results(f, app),
    }
    if let Some(message) = app.notice() {
        draw_notice(f, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::models::{Difficulty, GenerationResponse, PrimaryFont, QuizConfig};
    use crate::session::sample_questions;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn app() -> App {
        App::new(QuizConfig {
            source_text: content::TARKIA_EBOOK_TEXT.to_string(),
            difficulty: Difficulty::Medium,
            question_count: 3,
            theme_color: content::THEME_COLOR.to_string(),
            primary_font: PrimaryFont::Serif,
        })
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_setup_screen() {
        let screen = render(&app());
        assert!(screen.contains("Nível de Dificuldade"));
        assert!(screen.contains("Médio"));
        assert!(screen.contains("Iniciar Desafio (3 Questões)"));
    }

    #[test]
    fn test_loading_screen() {
        let mut app = app();
        app.start_quiz();
        let screen = render(&app);
        assert!(screen.contains("Consultando a inteligência Tarkia..."));
    }

    #[test]
    fn test_quiz_screen_shows_feedback_after_confirm() {
        let mut app = app();
        app.start_quiz();
        app.on_generation(GenerationResponse::Ready {
            questions: sample_questions(3),
        });
        let screen = render(&app);
        assert!(screen.contains("Questão 1 de 3"));
        assert!(screen.contains("Pergunta 1?"));
        assert!(!screen.contains("Feedback do Especialista"));

        app.select_option(0);
        app.confirm_or_advance();
        let screen = render(&app);
        assert!(screen.contains("Feedback do Especialista"));
        assert!(screen.contains("Explicação 1"));
        assert!(screen.contains("Próxima"));
    }

    #[test]
    fn test_results_screen_and_notice() {
        let mut app = app();
        app.start_quiz();
        app.on_generation(GenerationResponse::Ready {
            questions: sample_questions(1),
        });
        app.select_option(0);
        app.confirm_or_advance();
        app.confirm_or_advance();

        let screen = render(&app);
        assert!(screen.contains("Você acertou 1 de 1 questões"));
        assert!(screen.contains("Visionário Internacional"));
        assert!(screen.contains("Compartilhar Resultado"));

        app.on_export(crate::card::ExportOutcome::Failed {
            notice: content::SHARE_FAILED_NOTICE.to_string(),
        });
        let screen = render(&app);
        assert!(screen.contains("Aviso"));
    }
}
