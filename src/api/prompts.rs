use crate::models::Language;
use serde_json::{json, Value};

pub fn questions_prompt(language: Language) -> String {
    format!(
        "You are a professional minimalist consultant. Analyze this image and generate 3 deep, \
         reflective questions that will help the user decide the fate of the item(s) or the state \
         of the space shown. Focus on utility, joy, and frequency of use.\n\
         IMPORTANT: Your output MUST be in {}. Output only JSON.",
        language.prompt_name()
    )
}

pub fn advice_prompt(questions: &[String], answers: &[String], language: Language) -> String {
    let context = questions
        .iter()
        .zip(answers.iter())
        .map(|(q, a)| format!("Q: {}\nA: {}", q, a))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Based on the attached image and the user's following answers to minimalist questions, \
         provide a summary of the situation, 3-5 actionable minimalist tips, and a short \
         philosophical reflection.\n\n\
         USER ANSWERS:\n{}\n\n\
         IMPORTANT: Your output MUST be in {}. Return the result in JSON format.",
        context,
        language.prompt_name()
    )
}

/// JSON Schema (Draft 7) for the question reply.
pub fn questions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 3,
                "maxItems": 3,
                "description": "Exactly 3 minimalist questions."
            }
        },
        "required": ["questions"]
    })
}

/// JSON Schema (Draft 7) for the advice reply.
pub fn advice_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "tips": {
                "type": "array",
                "items": { "type": "string" }
            },
            "philosophicalReflection": { "type": "string" }
        },
        "required": ["summary", "tips", "philosophicalReflection"]
    })
}

/// Convert a JSON Schema into the OpenAPI subset the service accepts, which spells types in upper case.
pub fn to_service_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_service_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_service_schema).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_prompt_pairs_answers() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        let answers = vec!["A1".to_string(), "A2".to_string()];
        let prompt = advice_prompt(&questions, &answers, Language::En);

        assert!(prompt.contains("Q: Q1\nA: A1\n\nQ: Q2\nA: A2"));
        assert!(prompt.contains("MUST be in English"));
    }

    #[test]
    fn test_questions_prompt_names_language() {
        assert!(questions_prompt(Language::Zh).contains("MUST be in Chinese"));
    }

    #[test]
    fn test_service_schema_uppercases_types_only() {
        let converted = to_service_schema(&questions_schema());
        assert_eq!(converted["type"], "OBJECT");
        assert_eq!(converted["properties"]["questions"]["type"], "ARRAY");
        assert_eq!(converted["properties"]["questions"]["items"]["type"], "STRING");
        assert_eq!(converted["required"][0], "questions");
        assert_eq!(
            converted["properties"]["questions"]["description"],
            "Exactly 3 minimalist questions."
        );
    }
}
