//! Tutor backend contract.
//!
//! - `model`: request/response payloads (`ChatRequest`, `QuestionReply`, ...)
//! - `client`: the `TutorBackend` trait implemented by HTTP clients and mocks

mod client;
mod model;

pub use client::TutorBackend;
pub use model::{
    ChatReply, ChatRequest, Difficulty, PracticeQuestion, QuestionKind, QuestionReply,
    QuestionRequest, TestCase,
};
