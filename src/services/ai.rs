use crate::config::ChatSettings;
use crate::services::assistant::{ChatAssistant, ChatRole, ChatTurn};
use anyhow::{anyhow, Result};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs, Role,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use tokio::time::{sleep, Duration};

const MAX_RETRIES: u64 = 3;
// Only the most recent turns are replayed to keep prompts small.
const MAX_HISTORY_TURNS: usize = 12;

const SYSTEM_PROMPT: &str = "You are a friendly Ayurvedic wellness assistant for a consumer health app. \
Give short, practical lifestyle suggestions (sleep, stress, diet, movement, herbs). \
Do not diagnose or prescribe medication. Suggest booking a consultation with one of our doctors \
when symptoms sound persistent or serious.";

/// Chat completions against any OpenAI-compatible endpoint (Groq by default).
#[derive(Clone)]
pub struct AiService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl AiService {
    pub fn new(api_key: String, settings: &ChatSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.api_base.clone());
        let client = Client::with_config(config);
        Self {
            client,
            model: settings.model.clone(),
        }
    }

    fn build_messages(
        message: &str,
        history: &[ChatTurn],
    ) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = vec![ChatCompletionRequestMessage::System(
            ChatCompletionRequestSystemMessage {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
                name: None,
            },
        )];

        let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
        for turn in history.iter().skip(skip) {
            if turn.content.trim().is_empty() {
                continue;
            }
            let msg = match turn.role {
                ChatRole::User => user_message(&turn.content),
                ChatRole::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(turn.content.clone())
                        .build()?,
                ),
            };
            messages.push(msg);
        }

        messages.push(user_message(message));
        Ok(messages)
    }
}

fn user_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
        role: Role::User,
        content: ChatCompletionRequestUserMessageContent::Text(text.to_string()),
        name: None,
    })
}

#[async_trait]
impl ChatAssistant for AiService {
    async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        let mut retries = 0;
        loop {
            let request = CreateChatCompletionRequestArgs::default()
                .model(self.model.as_str())
                .messages(Self::build_messages(message, history)?)
                .build()?;

            match self.client.chat().create(request).await {
                Ok(resp) => {
                    return resp
                        .choices
                        .first()
                        .and_then(|c| c.message.content.clone())
                        .ok_or_else(|| anyhow!("chat completion returned no content"));
                }
                Err(err) => {
                    retries += 1;
                    if retries > MAX_RETRIES {
                        return Err(anyhow!("chat completion error: {err}"));
                    }
                    tracing::debug!("Chat completion attempt {} failed: {}", retries, err);
                    sleep(Duration::from_millis(500 * retries)).await;
                }
            }
        }
    }
}
