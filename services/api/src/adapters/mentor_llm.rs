//! services/api/src/adapters/mentor_llm.rs
//!
//! This module contains the adapter for the mentor LLM.
//! It implements the `MentorModelService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use mentor_core::ports::{MentorModelService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `MentorModelService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiMentorAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiMentorAdapter {
    /// Creates a new `OpenAiMentorAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `MentorModelService` Trait Implementation
//=========================================================================================

#[async_trait]
impl MentorModelService for OpenAiMentorAdapter {
    /// Sends the fully rendered mentor prompt as a single user message and
    /// returns the text of the first choice.
    async fn generate(&self, prompt: &str) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Model(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Model(
                    "Mentor LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Model(
                "Mentor LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}
