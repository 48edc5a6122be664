//! Request and response payloads of the tutor backend.
//!
//! These mirror the JSON bodies of `POST /api/chat` and
//! `POST /api/get_questions`. Unknown response fields are ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TutorError;
use crate::session::ChatMode;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub mode: ChatMode,
}

/// Reply of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatReply {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }
}

/// Kind of practice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Programming problem, possibly with test cases and hints.
    #[default]
    Coding,
    /// Multiple choice, with an option list.
    Mcq,
    /// Open-ended question.
    Subjective,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [QuestionKind::Coding, QuestionKind::Mcq, QuestionKind::Subjective];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Coding => "coding",
            QuestionKind::Mcq => "mcq",
            QuestionKind::Subjective => "subjective",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coding" => Ok(QuestionKind::Coding),
            "mcq" => Ok(QuestionKind::Mcq),
            "subjective" => Ok(QuestionKind::Subjective),
            _ => Err(TutorError::UnknownQuestionKind(s.to_string())),
        }
    }
}

/// Difficulty requested for a practice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Body of `POST /api/get_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
}

/// A generated practice question.
///
/// Only `question` and `options` are rendered; the remaining fields are kept
/// so callers can inspect whatever the generator produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PracticeQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Input/output pair attached to a coding question.
///
/// Generators emit either strings or structured values here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: serde_json::Value,
    #[serde(default)]
    pub output: serde_json::Value,
}

/// Reply of `POST /api/get_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub question: Option<PracticeQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_format() {
        let request = ChatRequest {
            message: "Hello".to_string(),
            mode: ChatMode::Practice,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Hello", "mode": "practice"}));
    }

    #[test]
    fn test_question_request_uses_type_field() {
        let request = QuestionRequest {
            subject: "Programming".to_string(),
            kind: QuestionKind::Mcq,
            difficulty: Difficulty::Medium,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"subject": "Programming", "type": "mcq", "difficulty": "medium"})
        );
    }

    #[test]
    fn test_chat_reply_tolerates_missing_fields() {
        let reply: ChatReply = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!reply.success);
        assert!(reply.response.is_none());

        let reply: ChatReply = serde_json::from_str(r#"{"success": true, "response": "Hi!", "extra": 1}"#).unwrap();
        assert_eq!(reply, ChatReply::ok("Hi!"));
    }

    #[test]
    fn test_question_reply_with_generator_extras() {
        let body = r#"{
            "success": true,
            "question": {
                "question": "Reverse a string",
                "test_cases": [{"input": "abc", "output": "cba"}],
                "hints": ["Use two pointers"],
                "correct_answer": "ignored"
            }
        }"#;
        let reply: QuestionReply = serde_json::from_str(body).unwrap();
        let question = reply.question.unwrap();
        assert_eq!(question.question.as_deref(), Some("Reverse a string"));
        assert!(question.options.is_none());
        assert_eq!(question.test_cases[0].output, "cba");
        assert_eq!(question.hints, vec!["Use two pointers".to_string()]);
    }

    #[test]
    fn test_question_kind_parse() {
        assert_eq!("MCQ".parse::<QuestionKind>().unwrap(), QuestionKind::Mcq);
        assert!("essay".parse::<QuestionKind>().is_err());
    }
}
