//! The scripted/LLM-backed inventory assistant.
//!
//! A small set of inputs is intercepted locally with scripted replies; every
//! other message goes to a hosted inference API as a single-shot text
//! completion, authenticated by a static bearer token. Remote failures never
//! propagate to the caller: they become a fixed error line in the transcript,
//! with the underlying cause logged.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Hosted single-shot completion endpoint used when no script matches.
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/blenderbot-400M-distill";

const NO_RESPONSE_REPLY: &str = "No response from the model";
const ERROR_REPLY: &str = "Error fetching response from the API";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Ordered transcript of one chat session.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.messages.push(ChatMessage { sender, text });
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct Generated {
    generated_text: String,
}

#[derive(Clone, Debug)]
pub struct Assistant {
    client: Client,
    api_url: String,
    api_key: String,
}

impl Assistant {
    pub fn new(client: Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Scripted intercepts, matched case-insensitively before any network
    /// call is made.
    fn scripted_reply(input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        if input == "hi" {
            Some("Hi, how can I help you organize today?")
        } else if input.contains("when should i buy toilet paper") {
            Some("In about two weeks, your 2 rolls will run out!")
        } else if input.contains("how much toilet paper do i have") {
            Some("You currently have 2 rolls of toilet paper left.")
        } else if input.contains("how many rolls per week") {
            Some("You typically use 1 roll per week.")
        } else {
            None
        }
    }

    async fn remote_reply(&self, input: &str) -> Result<String, AssistantError> {
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: input })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AssistantError::Server { status, message });
        }

        let generations = resp.json::<Vec<Generated>>().await?;
        Ok(generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_else(|| NO_RESPONSE_REPLY.to_string()))
    }

    /// Append the user's message and the assistant's reply to the transcript.
    ///
    /// Blank input (after trimming) is a no-op. No retry on failure.
    pub async fn ask(&self, conversation: &mut Conversation, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        conversation.push(Sender::User, input.to_string());

        let reply = match Self::scripted_reply(input) {
            Some(reply) => reply.to_string(),
            None => match self.remote_reply(input).await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!("assistant request failed: {err}");
                    ERROR_REPLY.to_string()
                }
            },
        };
        conversation.push(Sender::Bot, reply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> Assistant {
        Assistant::new(
            Client::new(),
            DEFAULT_API_URL.to_string(),
            String::from("test-key"),
        )
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let assistant = assistant();
        let mut conversation = Conversation::default();
        assistant.ask(&mut conversation, "   ").await;
        assert!(conversation.messages().is_empty());
    }

    #[tokio::test]
    async fn greeting_is_answered_locally() {
        let assistant = assistant();
        let mut conversation = Conversation::default();
        assistant.ask(&mut conversation, "Hi").await;

        let messages = conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "Hi");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, "Hi, how can I help you organize today?");
    }

    #[tokio::test]
    async fn toilet_paper_heuristics_match_by_substring() {
        let assistant = assistant();
        let mut conversation = Conversation::default();
        assistant
            .ask(&mut conversation, "So, when should I buy toilet paper?")
            .await;
        assistant
            .ask(&mut conversation, "And how many rolls per week do I use?")
            .await;

        let messages = conversation.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(
            messages[1].text,
            "In about two weeks, your 2 rolls will run out!"
        );
        assert_eq!(messages[3].text, "You typically use 1 roll per week.");
    }

    #[test]
    fn unscripted_input_falls_through() {
        assert!(Assistant::scripted_reply("what's in my pantry?").is_none());
    }
}
