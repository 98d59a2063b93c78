use crate::api::models::{
    Content, ErrorWrapper, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
use crate::api::prompts::{
    advice_prompt, advice_schema, questions_prompt, questions_schema, to_service_schema,
};
use crate::api::response::{extract_text, parse_advice, parse_questions};
use crate::api::service::AdviceService;
use crate::config::Config;
use crate::error::{LensError, Result};
use crate::models::{AdviceResult, ImageData, Language, QuestionSet};
use colored::*;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_endpoint: String,
    model: String,
    verbose: bool,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| LensError::ConfigError("GEMINI_API_KEY environment variable not set".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| LensError::ConfigError(format!("Invalid API key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            api_endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
            verbose: config.verbose,
        })
    }

    pub fn url(&self) -> String {
        format!("{}/{}:generateContent", self.api_endpoint, self.model)
    }

    /// Send one image plus prompt and return the reply text
    async fn generate(&self, image: &ImageData, prompt: String, schema: &Value) -> Result<String> {
        let request_body = build_request(image, prompt, schema);

        if self.verbose {
            eprintln!("{}", format!("[AI] Using model: {}", self.model).dimmed());
            eprintln!("{}", "[AI] Making API request...".dimmed());
        }

        let response = self.client.post(self.url()).json(&request_body).send().await?;

        if self.verbose {
            eprintln!(
                "{}",
                format!("[AI] Response status: {}", response.status()).dimmed()
            );
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LensError::ApiError {
                status,
                message: api_error_message(&error_text),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed)
    }
}

impl AdviceService for GeminiClient {
    async fn request_questions(&self, image: &ImageData, language: Language) -> Result<QuestionSet> {
        let text = self
            .generate(image, questions_prompt(language), &questions_schema())
            .await?;
        parse_questions(&text)
    }

    async fn request_advice(
        &self,
        image: &ImageData,
        questions: &[String],
        answers: &[String],
        language: Language,
    ) -> Result<AdviceResult> {
        let text = self
            .generate(
                image,
                advice_prompt(questions, answers, language),
                &advice_schema(),
            )
            .await?;
        parse_advice(&text)
    }
}

pub fn build_request(image: &ImageData, prompt: String, schema: &Value) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
                Part::Text { text: prompt },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: to_service_schema(schema),
        },
    }
}

/// Prefer the service's structured error message over the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{}: {}", status_text, msg)
            }
        })
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_shape() {
        let image = ImageData::new("image/png", "AAAA");
        let request = build_request(&image, "hello".to_string(), &questions_schema());
        let value = serde_json::to_value(&request).unwrap();

        let parts = &value["contents"][0]["parts"];
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AAAA");
        assert_eq!(parts[1]["text"], "hello");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_api_error_message_prefers_structured_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "INVALID_ARGUMENT: API key not valid");
        assert_eq!(api_error_message("plain failure"), "plain failure");
    }
}
