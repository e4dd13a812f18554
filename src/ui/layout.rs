use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub progress_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
    // Sub-layout for content area
    pub title_area: Rect,
    pub score_area: Rect,
    pub message_area: Rect,
    pub next_step_area: Rect,
}

pub struct SetupLayout {
    pub header_area: Rect,
    pub hero_area: Rect,
    pub difficulty_area: Rect,
    pub start_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(10),
            Constraint::Percentage(30),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        progress_area: chunks[1],
        question_area: chunks[2],
        options_area: chunks[3],
        feedback_area: chunks[4],
        help_area: chunks[5],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(3),
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(chunks[1]);

    ResultsLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
        title_area: content_chunks[0],
        score_area: content_chunks[1],
        message_area: content_chunks[2],
        next_step_area: content_chunks[3],
    }
}

pub fn calculate_setup_chunks(area: Rect) -> SetupLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    SetupLayout {
        header_area: chunks[0],
        hero_area: chunks[1],
        difficulty_area: chunks[2],
        start_area: chunks[3],
        help_area: chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_layout() {
        let area = Rect::new(0, 0, 100, 60);
        let layout = calculate_quiz_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.progress_area.height, 1);
        assert_eq!(layout.options_area.height, 10);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.question_area.height >= 4);
        assert!(layout.feedback_area.height > 0);
    }

    #[test]
    fn test_results_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_results_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 3);
        // margin 1 leaves 38 rows, minus header and footer
        assert_eq!(layout.content_area.height, 32);

        assert_eq!(layout.title_area.height, 3);
        assert_eq!(layout.score_area.height, 2);
        assert_eq!(layout.next_step_area.height, 4);
        assert_eq!(layout.message_area.height, 32 - 9);
    }

    #[test]
    fn test_setup_layout() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = calculate_setup_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.difficulty_area.height, 3);
        assert_eq!(layout.start_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.hero_area.height, 28 - 12);
    }
}
