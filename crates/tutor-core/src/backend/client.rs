//! Backend client trait.

use async_trait::async_trait;

use super::model::{ChatReply, ChatRequest, QuestionReply, QuestionRequest};
use crate::error::Result;

/// Client for the tutor backend endpoints.
///
/// Implementations return `Err` only when no well-formed reply was obtained
/// (connection failure, timeout, undecodable body). A reply carrying
/// `success: false` is returned as `Ok` and interpreted by the caller.
#[async_trait]
pub trait TutorBackend: Send + Sync {
    /// `POST /api/chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// `POST /api/get_questions`
    async fn get_question(&self, request: &QuestionRequest) -> Result<QuestionReply>;
}
