//! LLM integration: the chat-completion client and the interview feedback
//! summarizer built on top of it.
//!
//! The model endpoint is treated as opaque and unreliable; every consumer
//! of [`FeedbackSummarizer`] gets a canned fallback summary when the call
//! or the response parse fails, never an error.

pub mod client;
pub mod summarizer;

pub use client::{LlmClient, LlmError};
pub use summarizer::{FeedbackSummarizer, SummaryReport};
