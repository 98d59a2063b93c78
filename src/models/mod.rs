mod image;
mod language;
mod session;

pub use image::ImageData;
pub use language::Language;
pub use session::{AdviceResult, QuestionSet, Session};
