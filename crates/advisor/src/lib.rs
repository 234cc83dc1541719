//! Natural-language spending advice from a generative-language model.
//!
//! The model is reached through the [`Assistant`] trait; [`GeminiClient`]
//! is the production implementation. [`reply_to_chat`] and [`analyze`] never
//! fail: any error is logged and turned into [`FALLBACK_REPLY`].

use async_trait::async_trait;
use engine::SpendingAnalysis;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiClient};
pub use error::AdvisorError;
pub use prompt::{FALLBACK_REPLY, SYSTEM_PROMPT, analysis_prompt, chat_prompt, full_prompt};

mod client;
mod error;
mod prompt;

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Sends `prompt` (with the system prompt prepended) and returns the
    /// model's text.
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Used when no API key is configured; every request gets the fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAssistant;

#[async_trait]
impl Assistant for DisabledAssistant {
    async fn complete(&self, _prompt: &str) -> Result<String, AdvisorError> {
        Err(AdvisorError::NotConfigured)
    }
}

async fn complete_or_fallback(
    assistant: &dyn Assistant,
    prompt: Result<String, AdvisorError>,
) -> String {
    let outcome = match prompt {
        Ok(prompt) => assistant.complete(&prompt).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(reply) => reply,
        Err(AdvisorError::NotConfigured) => {
            tracing::warn!("assistant request without a configured model");
            FALLBACK_REPLY.to_string()
        }
        Err(err) => {
            tracing::error!("assistant request failed: {err}");
            FALLBACK_REPLY.to_string()
        }
    }
}

/// Answers a free-text question.
pub async fn reply_to_chat(assistant: &dyn Assistant, query: &str) -> String {
    complete_or_fallback(assistant, Ok(chat_prompt(query))).await
}

/// Comments on an unnecessary-spend analysis.
pub async fn analyze(assistant: &dyn Assistant, analysis: &SpendingAnalysis) -> String {
    complete_or_fallback(assistant, analysis_prompt(analysis)).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recording {
        prompts: Mutex<Vec<String>>,
        reply: Option<String>,
    }

    #[async_trait]
    impl Assistant for Recording {
        async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(AdvisorError::EmptyReply)
        }
    }

    #[tokio::test]
    async fn chat_forwards_wrapped_query() {
        let assistant = Recording {
            prompts: Mutex::new(Vec::new()),
            reply: Some("Track your food spending.".to_string()),
        };
        let reply = reply_to_chat(&assistant, "tips?").await;
        assert_eq!(reply, "Track your food spending.");
        assert_eq!(
            assistant.prompts.lock().unwrap()[0],
            "Answer this user query within the domain of our website: \"tips?\". Be concise (max 100 words)."
        );
    }

    #[tokio::test]
    async fn failures_become_fallback_reply() {
        let assistant = Recording {
            prompts: Mutex::new(Vec::new()),
            reply: None,
        };
        assert_eq!(reply_to_chat(&assistant, "hi").await, FALLBACK_REPLY);
        assert_eq!(reply_to_chat(&DisabledAssistant, "hi").await, FALLBACK_REPLY);
    }
}
