use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

use crate::card::{ExportOutcome, ResultCard, ShareGate, ShareTicket};
use crate::content;
use crate::models::{AppState, Difficulty, GenerationResponse, QuizConfig, QuizResult};
use crate::session::{Advance, Ignored, QuizSession, SessionEvent, Transition};

/// How long the question card stays red after a wrong answer.
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Side effect requested by the controller; carried out by the event loop.
#[derive(Debug)]
pub enum Action {
    None,
    Generate(QuizConfig),
    Export {
        card: ResultCard,
        ticket: ShareTicket,
    },
    Quit,
}

#[derive(Debug)]
pub struct App {
    screen: AppState,
    difficulty: Difficulty,
    template: QuizConfig,
    session: Option<QuizSession>,
    result: Option<QuizResult>,
    card: Option<ResultCard>,
    notice: Option<String>,
    shake_until: Option<Instant>,
    share_gate: ShareGate,
    spinner_tick: usize,
    events: Option<Sender<SessionEvent>>,
}

impl App {
    /// `template` supplies everything but the difficulty for each quiz.
    pub fn new(template: QuizConfig) -> Self {
        Self {
            screen: AppState::Setup,
            difficulty: template.difficulty,
            template,
            session: None,
            result: None,
            card: None,
            notice: None,
            shake_until: None,
            share_gate: ShareGate::new(),
            spinner_tick: 0,
            events: None,
        }
    }

    /// Sessions created from now on report answers to `events`.
    pub fn with_events(mut self, events: Sender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn screen(&self) -> AppState {
        self.screen
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn question_count(&self) -> usize {
        self.template.question_count
    }

    pub fn source_text(&self) -> &str {
        &self.template.source_text
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn card(&self) -> Option<&ResultCard> {
        self.card.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_sharing(&self) -> bool {
        self.share_gate.is_busy()
    }

    pub fn spinner_tick(&self) -> usize {
        self.spinner_tick
    }

    pub fn is_shaking(&self, now: Instant) -> bool {
        self.shake_until.is_some_and(|until| now < until)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.screen == AppState::Setup {
            self.difficulty = difficulty;
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
        if !self.is_shaking(Instant::now()) {
            self.shake_until = None;
        }
    }

    /// SETUP -> LOADING. Returns the request to hand to the question source.
    pub fn start_quiz(&mut self) -> Transition<QuizConfig> {
        if self.screen != AppState::Setup {
            return Transition::Ignored(Ignored::NotActive);
        }
        let config = QuizConfig {
            difficulty: self.difficulty,
            ..self.template.clone()
        };
        self.notice = None;
        self.screen = AppState::Loading;
        info!(
            difficulty = self.difficulty.label(),
            count = config.question_count,
            "quiz requested"
        );
        Transition::Applied(config)
    }

    /// LOADING -> QUIZ on success, LOADING -> SETUP with a notice otherwise.
    pub fn on_generation(&mut self, response: GenerationResponse) -> Transition {
        if self.screen != AppState::Loading {
            warn!("generation response outside of loading screen dropped");
            return Transition::Ignored(Ignored::NotActive);
        }

        let session = match response {
            GenerationResponse::Ready { questions } => QuizSession::new(questions),
            GenerationResponse::Failed { error } => Err(error),
        };

        match session {
            Ok(session) => {
                let session = match &self.events {
                    Some(events) => session.with_events(events.clone()),
                    None => session,
                };
                self.session = Some(session);
                self.screen = AppState::Quiz;
            }
            Err(error) => {
                warn!(%error, "back to setup");
                self.session = None;
                self.notice = Some(content::GENERATION_FAILED_NOTICE.to_string());
                self.screen = AppState::Setup;
            }
        }
        Transition::Applied(())
    }

    pub fn select_option(&mut self, index: usize) -> Transition {
        match self.active_session() {
            Some(session) => session.select_option(index),
            None => Transition::Ignored(Ignored::NotActive),
        }
    }

    pub fn cycle_selection(&mut self, delta: isize) -> Transition {
        match self.active_session() {
            Some(session) => session.cycle_selection(delta),
            None => Transition::Ignored(Ignored::NotActive),
        }
    }

    /// Confirm when unanswered, advance when answered.
    pub fn confirm_or_advance(&mut self) -> Transition {
        let Some(session) = self.active_session() else {
            return Transition::Ignored(Ignored::NotActive);
        };

        if !session.is_answered() {
            return match session.confirm_answer() {
                Transition::Applied(outcome) => {
                    if !outcome.correct {
                        self.shake_until = Some(Instant::now() + SHAKE_DURATION);
                    }
                    Transition::Applied(())
                }
                Transition::Ignored(reason) => Transition::Ignored(reason),
            };
        }

        match session.advance() {
            Transition::Applied(Advance::Next(index)) => {
                debug!(index, "next question");
                self.shake_until = None;
                Transition::Applied(())
            }
            Transition::Applied(Advance::Finished(result)) => {
                self.finish(result);
                Transition::Applied(())
            }
            Transition::Ignored(reason) => Transition::Ignored(reason),
        }
    }

    /// QUIZ -> RESULTS.
    fn finish(&mut self, result: QuizResult) {
        match ResultCard::from_result(&result) {
            Ok(card) => self.card = Some(card),
            Err(error) => warn!(%error, "no result card for this quiz"),
        }
        self.result = Some(result);
        self.shake_until = None;
        self.screen = AppState::Results;
    }

    /// RESULTS -> SETUP, discarding the session.
    pub fn restart(&mut self) -> Transition {
        if self.screen != AppState::Results {
            return Transition::Ignored(Ignored::NotActive);
        }
        if let Some(mut session) = self.session.take() {
            session.restart();
        }
        self.result = None;
        self.card = None;
        self.screen = AppState::Setup;
        info!("quiz restarted");
        Transition::Applied(())
    }

    /// Start exporting the result card unless an export is already running.
    pub fn share(&mut self) -> Option<Action> {
        if self.screen != AppState::Results {
            return None;
        }
        let card = self.card?;
        let Some(ticket) = self.share_gate.try_acquire() else {
            debug!("share already in progress");
            return None;
        };
        Some(Action::Export { card, ticket })
    }

    /// Outcomes arriving after the results screen was left are only logged.
    pub fn on_export(&mut self, outcome: ExportOutcome) {
        debug!(?outcome, "export finished");
        if self.screen != AppState::Results {
            debug!("export outcome for a discarded result dropped");
            return;
        }
        if let Some(notice) = outcome.notice() {
            self.notice = Some(notice.to_string());
        }
    }

    fn active_session(&mut self) -> Option<&mut QuizSession> {
        if self.screen != AppState::Quiz {
            return None;
        }
        self.session.as_mut()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if self.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_notice();
            }
            return Action::None;
        }

        match self.screen {
            AppState::Setup => self.handle_setup_key(key.code),
            AppState::Loading => Action::None,
            AppState::Quiz => {
                self.handle_quiz_key(key.code);
                Action::None
            }
            AppState::Results => self.handle_results_key(key.code),
        }
    }

    fn handle_setup_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab => {
                self.set_difficulty(self.difficulty.previous())
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                self.set_difficulty(self.difficulty.next())
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.set_difficulty(Difficulty::ALL[index]);
            }
            KeyCode::Enter => {
                if let Some(config) = self.start_quiz().applied() {
                    return Action::Generate(config);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn handle_quiz_key(&mut self, code: KeyCode) {
        let transition = match code {
            KeyCode::Up | KeyCode::Char('k') => self.cycle_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.cycle_selection(1),
            KeyCode::Char(c @ '1'..='4') => self.select_option(c as usize - '1' as usize),
            KeyCode::Char(c @ 'a'..='d') => self.select_option(c as usize - 'a' as usize),
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm_or_advance(),
            _ => return,
        };
        if let Transition::Ignored(reason) = transition {
            debug!(?reason, ?code, "key ignored");
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('s') | KeyCode::Enter => self.share().unwrap_or(Action::None),
            KeyCode::Char('r') => {
                self.restart();
                Action::None
            }
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}
