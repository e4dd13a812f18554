use crossbeam_channel::Sender;
use tracing::{debug, info};

use crate::error::QuizError;
use crate::models::{Question, QuizResult};

/// Where the current question stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    Selected(usize),
    Answered { selected: usize, correct: bool },
    Finished,
    /// No questions loaded (after `restart`).
    Idle,
}

/// Outcome of a guarded transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T = ()> {
    Applied(T),
    Ignored(Ignored),
}

impl<T> Transition<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Transition::Applied(value) => Some(value),
            Transition::Ignored(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    AlreadyAnswered,
    NoSelection,
    NotAnswered,
    OptionOutOfRange,
    NotActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_index: usize,
    pub selected: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    Finished(QuizResult),
}

/// Notifications for observers such as the answer cue. Sent only after the
/// session state is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    AnswerConfirmed(AnswerOutcome),
    Finished { score: usize, total: usize },
}

#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    phase: Phase,
    answers: Vec<usize>,
    score: usize,
    events: Option<Sender<SessionEvent>>,
}

impl QuizSession {
    /// Start a session over `questions`, kept in the order received.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Configuration(
                "a quiz session needs at least one question".into(),
            ));
        }
        Ok(Self {
            questions,
            current_index: 0,
            phase: Phase::AwaitingSelection,
            answers: Vec::new(),
            score: 0,
            events: None,
        })
    }

    pub fn with_events(mut self, events: Sender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Finished | Phase::Idle => None,
            _ => self.questions.get(self.current_index),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_option(&self) -> Option<usize> {
        match self.phase {
            Phase::Selected(index) => Some(index),
            Phase::Answered { selected, .. } => Some(selected),
            _ => None,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.phase, Phase::Answered { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn select_option(&mut self, index: usize) -> Transition {
        let Some(question) = self.current_question() else {
            return Transition::Ignored(Ignored::NotActive);
        };
        if self.is_answered() {
            return Transition::Ignored(Ignored::AlreadyAnswered);
        }
        if index >= question.options.len() {
            return Transition::Ignored(Ignored::OptionOutOfRange);
        }
        self.phase = Phase::Selected(index);
        Transition::Applied(())
    }

    /// Move the selection cursor by `delta`, wrapping around the options.
    pub fn cycle_selection(&mut self, delta: isize) -> Transition {
        let Some(question) = self.current_question() else {
            return Transition::Ignored(Ignored::NotActive);
        };
        let len = question.options.len() as isize;
        if len == 0 {
            return Transition::Ignored(Ignored::OptionOutOfRange);
        }
        let next = match self.selected_option() {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.select_option(next as usize)
    }

    pub fn confirm_answer(&mut self) -> Transition<AnswerOutcome> {
        let selected = match self.phase {
            Phase::Selected(index) => index,
            Phase::AwaitingSelection => return Transition::Ignored(Ignored::NoSelection),
            Phase::Answered { .. } => return Transition::Ignored(Ignored::AlreadyAnswered),
            Phase::Finished | Phase::Idle => return Transition::Ignored(Ignored::NotActive),
        };
        let correct = self.questions[self.current_index].is_correct(selected);

        self.answers.push(selected);
        if correct {
            self.score += 1;
        }
        self.phase = Phase::Answered { selected, correct };

        let outcome = AnswerOutcome {
            question_index: self.current_index,
            selected,
            correct,
        };
        debug!(
            question = self.current_index,
            selected, correct, score = self.score, "answer confirmed"
        );
        self.notify(SessionEvent::AnswerConfirmed(outcome));
        Transition::Applied(outcome)
    }

    pub fn advance(&mut self) -> Transition<Advance> {
        if !self.is_answered() {
            return Transition::Ignored(match self.phase {
                Phase::Finished | Phase::Idle => Ignored::NotActive,
                _ => Ignored::NotAnswered,
            });
        }

        if self.is_last_question() {
            self.phase = Phase::Finished;
            let result = QuizResult {
                answers: self.answers.clone(),
                score: self.score,
                total: self.questions.len(),
            };
            info!(score = result.score, total = result.total, "quiz finished");
            self.notify(SessionEvent::Finished {
                score: result.score,
                total: result.total,
            });
            return Transition::Applied(Advance::Finished(result));
        }

        self.current_index += 1;
        self.phase = Phase::AwaitingSelection;
        Transition::Applied(Advance::Next(self.current_index))
    }

    /// Drop all questions and answers. The caller must fetch a new question
    /// list before quizzing again.
    pub fn restart(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.score = 0;
        self.phase = Phase::Idle;
    }

    fn notify(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            // observer may be gone; scoring does not depend on it
            let _ = events.try_send(event);
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| Question {
            id: format!("q-{}-0", i),
            text: format!("Pergunta {}?", i + 1),
            options: vec![
                "Opção A".to_string(),
                "Opção B".to_string(),
                "Opção C".to_string(),
                "Opção D".to_string(),
            ],
            correct_index: i % 4,
            explanation: format!("Explicação {}", i + 1),
        })
        .collect()
}
