use crate::api::models::GenerateContentResponse;
use crate::api::prompts::{advice_schema, questions_schema};
use crate::error::{LensError, Result};
use crate::models::{AdviceResult, QuestionSet};
use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const EXPECTED_QUESTION_COUNT: usize = 3;

/// Pull the first text part out of a generateContent reply
pub fn extract_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        return Err(LensError::GenerationError(format!(
            "Request was blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or_else(|| LensError::GenerationError("No candidates in response".to_string()))?;

    let finish_reason = candidate.finish_reason.clone();
    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty());

    text.ok_or_else(|| match finish_reason {
        Some(reason) => {
            LensError::GenerationError(format!("Response contained no text (finish reason {})", reason))
        }
        None => LensError::GenerationError("Response contained no text".to_string()),
    })
}

/// Strip a surrounding ``` or ```json fence if the model added one
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parse reply text as JSON, validate it against `schema`, then deserialize
pub fn parse_structured<T: DeserializeOwned>(text: &str, schema: &Value) -> Result<T> {
    let instance: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| LensError::GenerationError(format!("Reply is not valid JSON: {}", e)))?;

    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| LensError::Other(format!("Invalid response schema: {}", e)))?;

    if let Err(errors) = compiled.validate(&instance) {
        let error_messages: Vec<String> = errors
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        return Err(LensError::GenerationError(format!(
            "Reply does not match the expected shape: {}",
            error_messages.join("; ")
        )));
    }

    serde_json::from_value(instance)
        .map_err(|e| LensError::GenerationError(format!("Reply could not be decoded: {}", e)))
}

pub fn parse_questions(text: &str) -> Result<QuestionSet> {
    let mut set: QuestionSet = parse_structured(text, &questions_schema())?;
    set.questions = set
        .questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .collect();

    if set.questions.len() != EXPECTED_QUESTION_COUNT || set.questions.iter().any(|q| q.is_empty()) {
        return Err(LensError::GenerationError(format!(
            "Expected {} non-blank questions",
            EXPECTED_QUESTION_COUNT
        )));
    }
    Ok(set)
}

pub fn parse_advice(text: &str) -> Result<AdviceResult> {
    parse_structured(text, &advice_schema())
}
