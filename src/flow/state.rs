use crate::i18n::Translations;
use crate::models::{ImageData, Session};

/// Failures surfaced to the user after returning to an input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowFailure {
    AnalyzeFailed,
    AdviceFailed,
}

impl FlowFailure {
    pub fn message(&self, t: &Translations) -> &'static str {
        match self {
            FlowFailure::AnalyzeFailed => t.error_analyze,
            FlowFailure::AdviceFailed => t.error_advice,
        }
    }
}

/// The single state of a journey. Each step carries only the data valid in that step.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Upload {
        error: Option<FlowFailure>,
    },
    AnalyzingImage {
        image: ImageData,
    },
    AwaitingAnswers {
        image: ImageData,
        questions: Vec<String>,
        answers: Vec<String>,
        error: Option<FlowFailure>,
    },
    GeneratingAdvice {
        image: ImageData,
        questions: Vec<String>,
        answers: Vec<String>,
    },
    ShowingAdvice {
        session: Session,
    },
    Archive {
        selected: Option<String>,
    },
}

impl Default for FlowState {
    fn default() -> Self {
        FlowState::Upload { error: None }
    }
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Upload { .. } => "upload",
            FlowState::AnalyzingImage { .. } => "analyzing",
            FlowState::AwaitingAnswers { .. } => "questions",
            FlowState::GeneratingAdvice { .. } => "generating",
            FlowState::ShowingAdvice { .. } => "advice",
            FlowState::Archive { .. } => "archive",
        }
    }

    /// True while a generation request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            FlowState::AnalyzingImage { .. } | FlowState::GeneratingAdvice { .. }
        )
    }

    pub fn error(&self) -> Option<FlowFailure> {
        match self {
            FlowState::Upload { error } | FlowState::AwaitingAnswers { error, .. } => *error,
            _ => None,
        }
    }
}

/// An answer counts only if it has non-whitespace content.
pub fn all_answered(answers: &[String]) -> bool {
    !answers.is_empty() && answers.iter().all(|a| !a.trim().is_empty())
}
