//! Wire types for the Ollama-compatible generate API
//!
//! These model the local service's JSON contract: a flat request body with the
//! sampling parameters alongside the prompt, and newline-delimited JSON chunks
//! in streaming mode.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sampling and runtime parameters sent with every generate request.
///
/// Overrides are replace-not-merge: a caller either supplies a full set or the
/// client falls back to its construction-time defaults. There is no field-wise
/// merging of a partial override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling threshold
    pub top_p: f64,

    /// Top-k sampling cutoff
    pub top_k: u32,

    /// Context window size in tokens
    pub num_ctx: u32,

    /// Penalty applied to repeated tokens
    pub repeat_penalty: f64,

    /// Sampling seed
    pub seed: i64,

    /// CPU threads used for inference
    pub num_thread: u32,

    /// GPU layers offloaded (0 disables GPU)
    pub num_gpu: u32,

    /// Prompt batch size
    pub num_batch: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            num_ctx: 2048,
            repeat_penalty: 1.1,
            seed: 42,
            num_thread: 4,
            num_gpu: 1,
            num_batch: 8,
        }
    }
}

/// Client construction settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the model service API, e.g. `http://localhost:11434/api`
    pub base_url: String,

    /// Model identifier passed on every request
    pub model: String,

    /// Default sampling parameters
    pub params: ModelParams,

    /// Minimum interval enforced between consecutive requests
    pub min_request_interval: Duration,

    /// Default wait ceiling for a non-streaming response
    pub request_timeout: Duration,

    /// How long a `list_models` result stays cached
    pub tags_cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/api".to_string(),
            model: "nezahatkorkmaz/deepseek-v3:latest".to_string(),
            params: ModelParams::default(),
            min_request_interval: Duration::from_millis(100),
            request_timeout: Duration::from_secs(30),
            tags_cache_ttl: Duration::from_secs(60),
        }
    }
}

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Conversation context echoed back for multi-turn continuity. Omitted
    /// entirely when no prior exchange produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,

    #[serde(flatten)]
    pub params: ModelParams,
}

/// Response body for a non-streaming `POST /generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Generated text; the service may omit it, which is not an error
    #[serde(default)]
    pub response: String,

    /// New conversation context, replacing any stored one wholesale
    #[serde(default)]
    pub context: Option<Vec<i64>>,

    #[serde(default)]
    pub done: bool,
}

/// One newline-delimited JSON object from a streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub response: String,

    #[serde(default)]
    pub done: bool,
}

/// Response body for `GET /tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One installed model entry in the registry listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

/// Response body for `GET /version`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_params_defaults() {
        let params = ModelParams::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_k, 40);
        assert_eq!(params.num_ctx, 2048);
        assert_eq!(params.seed, 42);
    }

    #[test]
    fn test_generate_request_omits_absent_fields() {
        let req = GenerateRequest {
            model: "test".to_string(),
            prompt: "hello".to_string(),
            stream: false,
            system: None,
            context: None,
            params: ModelParams::default(),
        };

        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("system").is_none());
        assert!(body.get("context").is_none());
        assert_eq!(body["model"], "test");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_generate_request_flattens_params() {
        let req = GenerateRequest {
            model: "test".to_string(),
            prompt: "hello".to_string(),
            stream: true,
            system: Some("be brief".to_string()),
            context: Some(vec![1, 2, 3]),
            params: ModelParams::default(),
        };

        let body = serde_json::to_value(&req).unwrap();
        // Sampling parameters sit at the top level, not under a nested key
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["num_batch"], 8);
        assert_eq!(body["system"], "be brief");
        assert_eq!(body["context"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_generate_response_tolerates_missing_fields() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.response, "");
        assert!(resp.context.is_none());
        assert!(!resp.done);
    }

    #[test]
    fn test_tags_response_parses_names() {
        let resp: TagsResponse =
            serde_json::from_str(r#"{"models": [{"name": "llama2"}, {"name": "mistral"}]}"#).unwrap();
        let names: Vec<_> = resp.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["llama2", "mistral"]);
    }
}
