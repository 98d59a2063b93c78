use super::state::{all_answered, FlowFailure, FlowState};
use crate::api::response::EXPECTED_QUESTION_COUNT;
use crate::api::AdviceService;
use crate::error::{LensError, Result};
use crate::i18n::{translations, Translations};
use crate::models::{ImageData, Language, Session};
use crate::store::{load_language, save_language, HistoryStore, KeyValueStore};
use colored::*;

/// Owns the current step and drives it through the generation service and the archive.
///
/// Every operation takes `&mut self`, so at most one request can be in flight.
/// Operations called from a step that does not accept them return
/// [`LensError::InvalidTransition`] and leave the state untouched.
pub struct FlowController<A: AdviceService, S: KeyValueStore> {
    service: A,
    history: HistoryStore<S>,
    language: Language,
    state: FlowState,
    verbose: bool,
}

impl<A: AdviceService, S: KeyValueStore> FlowController<A, S> {
    /// Start at the upload step, with the language read from the history's storage.
    pub fn new(service: A, history: HistoryStore<S>) -> Self {
        let language = load_language(history.storage());
        Self {
            service,
            history,
            language,
            state: FlowState::default(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn service(&self) -> &A {
        &self.service
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translations(&self) -> &'static Translations {
        translations(self.language)
    }

    pub fn history(&self) -> &[Session] {
        self.history.sessions()
    }

    /// Localized message for the error attached to the current step.
    pub fn error_message(&self) -> Option<&'static str> {
        self.state
            .error()
            .map(|failure| failure.message(self.translations()))
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.language = language;
        save_language(self.history.storage(), language)
    }

    pub fn toggle_language(&mut self) -> Result<Language> {
        let next = self.language.toggle();
        self.set_language(next)?;
        Ok(next)
    }

    /// Upload -> AnalyzingImage.
    pub fn select_image(&mut self, image: ImageData) -> Result<()> {
        if !matches!(self.state, FlowState::Upload { .. }) {
            return Err(self.invalid("select an image"));
        }
        self.log("image selected, analyzing");
        self.state = FlowState::AnalyzingImage { image };
        Ok(())
    }

    /// AnalyzingImage -> AwaitingAnswers, or back to Upload with an error.
    pub async fn analyze(&mut self) -> Result<()> {
        let image = match &self.state {
            FlowState::AnalyzingImage { image } => image.clone(),
            _ => return Err(self.invalid("analyze an image")),
        };

        let outcome = self
            .service
            .request_questions(&image, self.language)
            .await
            .and_then(|set| {
                if set.questions.len() == EXPECTED_QUESTION_COUNT && all_answered(&set.questions) {
                    Ok(set.questions)
                } else {
                    Err(LensError::GenerationError(format!(
                        "Expected {} non-blank questions, got {}",
                        EXPECTED_QUESTION_COUNT,
                        set.questions.len()
                    )))
                }
            });

        self.state = match outcome {
            Ok(questions) => {
                self.log("questions received");
                let answers = vec![String::new(); questions.len()];
                FlowState::AwaitingAnswers {
                    image,
                    questions,
                    answers,
                    error: None,
                }
            }
            Err(e) => {
                self.log(&format!("question generation failed: {}", e));
                FlowState::Upload {
                    error: Some(FlowFailure::AnalyzeFailed),
                }
            }
        };
        Ok(())
    }

    /// Select an image and wait for its questions.
    pub async fn upload(&mut self, image: ImageData) -> Result<()> {
        self.select_image(image)?;
        self.analyze().await
    }

    /// Edit one draft answer.
    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let from = self.state.name();
        match &mut self.state {
            FlowState::AwaitingAnswers { answers, .. } => {
                let slot = answers.get_mut(index).ok_or_else(|| {
                    LensError::Other(format!("No question number {}", index + 1))
                })?;
                *slot = text.into();
                Ok(())
            }
            _ => Err(LensError::InvalidTransition {
                from,
                action: "edit an answer",
            }),
        }
    }

    /// AwaitingAnswers -> GeneratingAdvice, rejected while any answer is blank.
    pub fn submit_answers(&mut self) -> Result<()> {
        let (image, questions, answers) = match &self.state {
            FlowState::AwaitingAnswers {
                image,
                questions,
                answers,
                ..
            } => {
                if !all_answered(answers) {
                    return Err(LensError::IncompleteAnswers);
                }
                (image.clone(), questions.clone(), answers.clone())
            }
            _ => return Err(self.invalid("submit answers")),
        };

        self.log("answers submitted, generating advice");
        self.state = FlowState::GeneratingAdvice {
            image,
            questions,
            answers,
        };
        Ok(())
    }

    /// GeneratingAdvice -> ShowingAdvice (archiving the session), or back to
    /// AwaitingAnswers with an error and the answers intact.
    pub async fn generate_advice(&mut self) -> Result<()> {
        let (image, questions, answers) = match &self.state {
            FlowState::GeneratingAdvice {
                image,
                questions,
                answers,
            } => (image.clone(), questions.clone(), answers.clone()),
            _ => return Err(self.invalid("generate advice")),
        };

        let outcome = self
            .service
            .request_advice(&image, &questions, &answers, self.language)
            .await;

        self.state = match outcome {
            Ok(advice) => {
                let session = Session::new(&image, questions, answers, advice, self.language);
                if let Err(e) = self.history.append_and_save(session.clone()) {
                    eprintln!(
                        "{}",
                        format!("Warning: Failed to save session: {}", e).yellow()
                    );
                }
                self.log(&format!("session {} archived", session.id));
                FlowState::ShowingAdvice { session }
            }
            Err(e) => {
                self.log(&format!("advice generation failed: {}", e));
                FlowState::AwaitingAnswers {
                    image,
                    questions,
                    answers,
                    error: Some(FlowFailure::AdviceFailed),
                }
            }
        };
        Ok(())
    }

    /// Submit the current answers and wait for the advice.
    pub async fn submit(&mut self) -> Result<()> {
        self.submit_answers()?;
        self.generate_advice().await
    }

    /// Discard any in-progress journey and return to Upload.
    pub fn reset(&mut self) -> Result<()> {
        if self.state.is_busy() {
            return Err(self.invalid("start over"));
        }
        self.state = FlowState::default();
        Ok(())
    }

    /// Open the archive list. Only available while the archive has entries.
    pub fn view_history(&mut self) -> Result<()> {
        if self.state.is_busy() {
            return Err(self.invalid("open the archive"));
        }
        if self.history.is_empty() {
            return Err(LensError::EmptyHistory);
        }
        self.state = FlowState::Archive { selected: None };
        Ok(())
    }

    /// Show one archived session. The record itself is never modified.
    pub fn select_session(&mut self, id: &str) -> Result<&Session> {
        if !matches!(self.state, FlowState::Archive { .. }) {
            return Err(self.invalid("open an archived session"));
        }
        if self.history.get(id).is_none() {
            return Err(LensError::SessionNotFound(id.to_string()));
        }
        self.state = FlowState::Archive {
            selected: Some(id.to_string()),
        };
        self.history
            .get(id)
            .ok_or_else(|| LensError::SessionNotFound(id.to_string()))
    }

    pub fn selected_session(&self) -> Option<&Session> {
        match &self.state {
            FlowState::Archive {
                selected: Some(id),
            } => self.history.get(id),
            _ => None,
        }
    }

    /// Remove one archived session; an emptied archive falls back to Upload.
    pub fn delete_session(&mut self, id: &str) -> Result<()> {
        let selected = match &self.state {
            FlowState::Archive { selected } => selected.clone(),
            _ => return Err(self.invalid("delete a session")),
        };

        self.history.remove(id)?;
        self.log(&format!("session {} deleted", id));

        self.state = if self.history.is_empty() {
            FlowState::default()
        } else {
            FlowState::Archive {
                selected: selected.filter(|s| s != id),
            }
        };
        Ok(())
    }

    /// Erase the whole archive and return to Upload. Confirmation is the caller's job.
    pub fn clear_history(&mut self) -> Result<()> {
        if !matches!(self.state, FlowState::Archive { .. }) {
            return Err(self.invalid("clear the archive"));
        }
        self.history.clear()?;
        self.log("archive cleared");
        self.state = FlowState::default();
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> LensError {
        LensError::InvalidTransition {
            from: self.state.name(),
            action,
        }
    }

    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", format!("[flow] {}", message).dimmed());
        }
    }
}
