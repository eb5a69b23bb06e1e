//! Section generation through the Bedrock Converse API.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use tracing::info;

use crate::error::GenerationError;
use crate::pipeline::SectionGenerator;

pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an occupational therapist writing one section \
of a functional capacity report. The user message contains the structured findings for that \
section inside a <section> block. Write clear, objective clinical prose based only on those \
findings. Do not invent measurements, diagnoses or history. Return the section body only, \
without a heading.";

/// Build a Bedrock runtime client for `region` from the default credential
/// chain.
pub async fn build_client(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}

pub struct BedrockSectionGenerator {
    client: Client,
    model_id: String,
    system_prompt: String,
}

impl BedrockSectionGenerator {
    pub fn new(client: Client, model_id: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait]
impl SectionGenerator for BedrockSectionGenerator {
    #[tracing::instrument(skip(self, payload), fields(model_id = %self.model_id))]
    async fn generate(&self, section_id: &str, payload: &str) -> Result<String, GenerationError> {
        let text = invoke_converse(&self.client, &self.model_id, &self.system_prompt, payload).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        info!(section_id, chars = text.len(), "section text received");
        Ok(text)
    }
}

/// Send one system prompt and one user message; return the concatenated
/// text blocks of the reply.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<String, GenerationError> {
    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .messages(
            Message::builder()
                .role(ConversationRole::User)
                .content(ContentBlock::Text(user_message.to_string()))
                .build()
                .map_err(|e| GenerationError::Invocation(e.to_string()))?,
        )
        .send()
        .await
        .map_err(|e| GenerationError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| GenerationError::ResponseParse("no message in response".to_string()))?;

    Ok(output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join(""))
}
