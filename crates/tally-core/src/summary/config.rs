use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TallyError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings for the summarization backend.
///
/// Passed explicitly to whichever component makes the call. Every field has
/// a default, so a config file only needs the values it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Bearer token. Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// How many of the largest projects to send.
    pub top_n: usize,
    pub timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            top_n: 10,
            timeout_secs: 60,
        }
    }
}

impl SummaryConfig {
    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let content = std::fs::read_to_string(path).map_err(|e| TallyError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| TallyError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Result<&str, TallyError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(TallyError::MissingApiKey)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
