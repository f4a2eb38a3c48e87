//! Azure OpenAI probe client
//!
//! Exercises the two completion surfaces the quickstarts depend on: the
//! newer Responses API (region-gated, the usual 404 suspect) and the
//! stable Chat Completions API used as the fallback. One attempt each,
//! never retried.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::models::config::OpenAiConfig;
use crate::models::errors::{ProbeError, ProbeResult};
use crate::models::types::AccessToken;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, USER_AGENT};

/// A chat turn sent to either surface
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Responses surface payload. Some service builds flatten the text into
/// `output_text`, others only ship the `output` item list; accept both.
#[derive(Debug, Deserialize)]
struct ResponsesReply {
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    text: Option<String>,
}

impl ResponsesReply {
    fn text(self) -> Option<String> {
        if let Some(text) = self.output_text {
            return Some(text);
        }
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .find_map(|c| c.text)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub struct AzureOpenAiClient {
    endpoint: String,
    api_version: String,
    token: AccessToken,
    client: reqwest::Client,
}

impl AzureOpenAiClient {
    pub fn new(config: &OpenAiConfig, token: AccessToken) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token,
            client,
        })
    }

    /// Probe the Responses surface with a minimal request.
    /// A 404 here means the surface does not exist at this endpoint.
    pub async fn responses_probe(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> ProbeResult<String> {
        let url = format!("{}/openai/responses", self.endpoint);
        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(&self.token.token)
            .json(&json!({ "model": model, "input": messages }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let reply: ResponsesReply = response.json().await?;
        reply
            .text()
            .ok_or_else(|| ProbeError::invalid_response("responses payload carried no text"))
    }

    /// The stable fallback surface; works in every region
    pub async fn chat_completions(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> ProbeResult<String> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, model
        );
        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.api_version.as_str())])
            .bearer_auth(&self.token.token)
            .json(&json!({ "messages": messages }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::from_status(status.as_u16(), &body));
        }

        let reply: ChatCompletionsReply = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProbeError::invalid_response("chat completion carried no content"))
    }
}
