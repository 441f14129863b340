//! LLM (Bedrock Converse) client module
//!
//! A [`ConversationClient`] performs one round trip per call: it sends the
//! whole conversation, appends the model's reply turn and hands back the
//! reply text. The transport sits behind [`CompletionBackend`].

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types::{
    ContentBlock as BedrockContentBlock, ConversationRole, InferenceConfiguration, Message,
    SystemContentBlock,
};
use tracing::info;

use crate::core::models::{ContentBlock, Conversation, ConversationTurn, Role};
use crate::errors::SummarizerError;
use crate::prompt::{MAX_OUTPUT_TOKENS, SYSTEM_PROMPT, TEMPERATURE};

/// Fixed parameters attached to every completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceSettings {
    pub model_id: String,
    pub system_prompt: String,
    pub max_tokens: i32,
    pub temperature: f32,
}

impl InferenceSettings {
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// A text-completion capability.
///
/// `Ok(None)` means the service answered but its output carried no message.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn converse(
        &self,
        turns: &[ConversationTurn],
        settings: &InferenceSettings,
    ) -> Result<Option<ConversationTurn>, SummarizerError>;
}

pub struct ConversationClient<B> {
    backend: B,
    settings: InferenceSettings,
}

impl<B: CompletionBackend> ConversationClient<B> {
    pub fn new(backend: B, settings: InferenceSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Sends `conversation`, appends the reply turn to it and returns the
    /// reply's first text block.
    ///
    /// # Errors
    ///
    /// [`SummarizerError::NoReply`] when the response has no message, or the
    /// backend's own error when the call fails. The conversation is left
    /// untouched on error.
    pub async fn call_and_append(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, SummarizerError> {
        #[cfg(feature = "debug-logs")]
        info!(
            "Using Bedrock conversation: {}",
            serde_json::to_string(conversation).unwrap_or_default()
        );

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model_id = %self.settings.model_id,
            turns = conversation.turns().len(),
            "Calling completion backend"
        );

        let reply = self
            .backend
            .converse(conversation.turns(), &self.settings)
            .await?
            .ok_or(SummarizerError::NoReply)?;

        let text = reply.first_text();
        conversation.push(reply);
        Ok(text)
    }
}

/// [`CompletionBackend`] over the Bedrock Converse API.
#[derive(Clone)]
pub struct BedrockBackend {
    client: BedrockClient,
}

impl BedrockBackend {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: BedrockClient::new(config),
        }
    }
}

#[async_trait]
impl CompletionBackend for BedrockBackend {
    async fn converse(
        &self,
        turns: &[ConversationTurn],
        settings: &InferenceSettings,
    ) -> Result<Option<ConversationTurn>, SummarizerError> {
        let messages = turns
            .iter()
            .map(to_bedrock_message)
            .collect::<Result<Vec<_>, _>>()?;

        let inference = InferenceConfiguration::builder()
            .max_tokens(settings.max_tokens)
            .temperature(settings.temperature)
            .build();

        let response = self
            .client
            .converse()
            .model_id(&settings.model_id)
            .system(SystemContentBlock::Text(settings.system_prompt.clone()))
            .set_messages(Some(messages))
            .inference_config(inference)
            .send()
            .await
            .map_err(|e| SummarizerError::Bedrock(DisplayErrorContext(&e).to_string()))?;

        if let Some(usage) = response.usage() {
            info!(
                input_tokens = usage.input_tokens(),
                output_tokens = usage.output_tokens(),
                stop_reason = %response.stop_reason().as_str(),
                "Bedrock converse completed"
            );
        }

        Ok(response
            .output()
            .and_then(|output| output.as_message().ok())
            .map(from_bedrock_message))
    }
}

fn to_bedrock_message(turn: &ConversationTurn) -> Result<Message, SummarizerError> {
    let role = match turn.role {
        Role::User => ConversationRole::User,
        Role::Assistant => ConversationRole::Assistant,
    };

    // Opaque blocks cannot be sent back; only text is ever produced here.
    let content = turn
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text(text) => Some(BedrockContentBlock::Text(text.clone())),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>();

    Message::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|e| SummarizerError::Bedrock(format!("Failed to build message: {e}")))
}

fn from_bedrock_message(message: &Message) -> ConversationTurn {
    let role = match message.role() {
        ConversationRole::User => Role::User,
        _ => Role::Assistant,
    };

    let content = message
        .content()
        .iter()
        .map(|block| match block {
            BedrockContentBlock::Text(text) => ContentBlock::Text(text.clone()),
            _ => ContentBlock::Other,
        })
        .collect();

    ConversationTurn { role, content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned replies and records what it was sent.
    struct ScriptedBackend {
        replies: Mutex<Vec<Result<Option<ConversationTurn>, SummarizerError>>>,
        seen: Mutex<Vec<Vec<ConversationTurn>>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<Option<ConversationTurn>, SummarizerError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn converse(
            &self,
            turns: &[ConversationTurn],
            _settings: &InferenceSettings,
        ) -> Result<Option<ConversationTurn>, SummarizerError> {
            self.seen.lock().unwrap().push(turns.to_vec());
            self.replies.lock().unwrap().remove(0)
        }
    }

    #[test]
    fn test_settings_use_fixed_inference_parameters() {
        let settings = InferenceSettings::for_model("deepseek.v3-v1:0");
        assert_eq!(settings.max_tokens, 1024);
        assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(settings.system_prompt, SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn test_call_and_append_returns_text_and_grows_conversation() {
        let backend = ScriptedBackend::new(vec![Ok(Some(ConversationTurn::assistant_text(
            "SUMMARY",
        )))]);
        let client = ConversationClient::new(backend, InferenceSettings::for_model("m"));
        let mut conversation = Conversation::with_user_text("notes");

        let text = client.call_and_append(&mut conversation).await.unwrap();

        assert_eq!(text, "SUMMARY");
        assert_eq!(conversation.turns().len(), 2);
        assert_eq!(
            conversation.last(),
            Some(&ConversationTurn::assistant_text("SUMMARY"))
        );
        let seen = client.backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![ConversationTurn::user_text("notes")]);
    }

    #[tokio::test]
    async fn test_missing_message_is_no_reply() {
        let backend = ScriptedBackend::new(vec![Ok(None)]);
        let client = ConversationClient::new(backend, InferenceSettings::for_model("m"));
        let mut conversation = Conversation::with_user_text("notes");

        let err = client.call_and_append(&mut conversation).await.unwrap_err();

        assert!(matches!(err, SummarizerError::NoReply));
        assert_eq!(conversation.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_without_text_is_empty_string() {
        let reply = ConversationTurn {
            role: Role::Assistant,
            content: vec![ContentBlock::Other],
        };
        let backend = ScriptedBackend::new(vec![Ok(Some(reply))]);
        let client = ConversationClient::new(backend, InferenceSettings::for_model("m"));
        let mut conversation = Conversation::with_user_text("notes");

        let text = client.call_and_append(&mut conversation).await.unwrap();

        assert_eq!(text, "");
        assert_eq!(conversation.turns().len(), 2);
    }

    #[test]
    fn test_bedrock_message_mapping_keeps_text_and_marks_other_blocks() {
        let message = Message::builder()
            .role(ConversationRole::Assistant)
            .content(BedrockContentBlock::Text("hello".to_string()))
            .build()
            .unwrap();

        let turn = from_bedrock_message(&message);
        assert_eq!(turn, ConversationTurn::assistant_text("hello"));

        let back = to_bedrock_message(&turn).unwrap();
        assert_eq!(back.role(), &ConversationRole::Assistant);
        assert_eq!(back.content().len(), 1);
    }
}
