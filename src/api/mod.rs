pub mod client;
pub mod models;
pub mod prompts;
pub mod response;
pub mod service;

pub use client::GeminiClient;
pub use models::GenerateContentRequest;
pub use service::AdviceService;
