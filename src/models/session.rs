use super::{ImageData, Language};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub summary: String,
    pub tips: Vec<String>,
    #[serde(rename = "philosophicalReflection")]
    pub reflection: String,
}

/// One completed journey, as persisted in the archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Data URL of the uploaded image.
    pub image: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub advice: AdviceResult,
    pub language: Language,
}

impl Session {
    pub fn new(
        image: &ImageData,
        questions: Vec<String>,
        answers: Vec<String>,
        advice: AdviceResult,
        language: Language,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now_millis(),
            image: image.to_data_url(),
            questions,
            answers,
            advice,
            language,
        }
    }

    /// Question/answer pairs in the order they were asked.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

/// Current time truncated to the millisecond precision the archive stores.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_reads_archived_json() {
        let raw = json!({
            "id": "1717000000000",
            "timestamp": 1717000000000i64,
            "image": "data:image/jpeg;base64,AAAA",
            "questions": ["Q1", "Q2", "Q3"],
            "answers": ["A1", "A2", "A3"],
            "advice": {
                "summary": "S",
                "tips": ["T1"],
                "philosophicalReflection": "R"
            },
            "language": "zh"
        });

        let session: Session = serde_json::from_value(raw).unwrap();
        assert_eq!(session.id, "1717000000000");
        assert_eq!(session.created_at.timestamp_millis(), 1717000000000);
        assert_eq!(session.advice.reflection, "R");
        assert_eq!(session.language, Language::Zh);
    }

    #[test]
    fn test_session_writes_original_field_names() {
        let image = ImageData::new("image/png", "AAAA");
        let advice = AdviceResult {
            summary: "S".to_string(),
            tips: vec![],
            reflection: "R".to_string(),
        };
        let session = Session::new(
            &image,
            vec!["Q".to_string()],
            vec!["A".to_string()],
            advice,
            Language::En,
        );

        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("timestamp").unwrap().is_i64());
        assert_eq!(value["advice"]["philosophicalReflection"], "R");
        assert_eq!(value["language"], "en");
        assert_eq!(value["image"], "data:image/png;base64,AAAA");
    }
}
