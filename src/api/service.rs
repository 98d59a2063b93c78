use crate::error::Result;
use crate::models::{AdviceResult, ImageData, Language, QuestionSet};
use std::future::Future;

/// The two generation calls the flow depends on.
pub trait AdviceService {
    /// Exactly three non-blank reflective questions about the image.
    fn request_questions(
        &self,
        image: &ImageData,
        language: Language,
    ) -> impl Future<Output = Result<QuestionSet>> + Send;

    fn request_advice(
        &self,
        image: &ImageData,
        questions: &[String],
        answers: &[String],
        language: Language,
    ) -> impl Future<Output = Result<AdviceResult>> + Send;
}
