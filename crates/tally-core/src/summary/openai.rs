use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TallyError;
use crate::summary::config::SummaryConfig;
use crate::summary::{SummaryReport, SummaryRequest, Summarizer};

const SYSTEM_PROMPT: &str = "You are a data analyst expert who provides clear, concise summaries \
of spreadsheet data. Reply with a JSON object with exactly these keys: \
\"summary\" (a short narrative string), \
\"top_projects\" (an array of objects with \"name\" and \"amount\"), \
\"notes\" (an array of short strings).";

/// Summarization backend using an OpenAI-compatible chat completions API.
pub struct OpenAiSummarizer {
    config: SummaryConfig,
    client: Client,
}

impl OpenAiSummarizer {
    pub fn new(config: SummaryConfig) -> Result<Self, TallyError> {
        config.api_key()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TallyError::Summary(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

fn build_chat_request<'a>(
    config: &'a SummaryConfig,
    request: &SummaryRequest,
) -> Result<ChatRequest<'a>, TallyError> {
    let data = serde_json::to_string_pretty(request)?;
    Ok(ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: SYSTEM_PROMPT.into(),
            },
            ChatMessage {
                role: "user".into(),
                content: format!(
                    "Summarize the project totals extracted from '{}'. \
                     Highlight the largest projects and anything notable.\n\n{data}",
                    request.source_name
                ),
            },
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        response_format: ResponseFormat {
            kind: "json_object",
        },
    })
}

/// Pull the structured report out of a chat completions response body.
fn parse_chat_response(body: &str) -> Result<SummaryReport, TallyError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| TallyError::Summary(format!("malformed response: {e}")))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TallyError::Summary("response contained no choices".into()))?;
    serde_json::from_str(strip_code_fence(&choice.message.content))
        .map_err(|e| TallyError::Summary(format!("response content is not a summary object: {e}")))
}

/// Some models wrap JSON in a ```json fence even when asked not to.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<SummaryReport, TallyError> {
        let body = build_chat_request(&self.config, request)?;
        let url = self.config.completions_url();
        debug!(%url, model = %self.config.model, projects = request.top_projects.len(), "requesting summary");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key()?)
            .json(&body)
            .send()
            .map_err(|e| TallyError::Summary(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| TallyError::Summary(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(TallyError::SummaryHttp {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_chat_response(&text)
    }

    fn backend_name(&self) -> &str {
        "openai"
    }
}
