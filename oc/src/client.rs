//! Client for the local generative model service
//!
//! [`OllamaClient`] is the single point of contact with the service. It hides
//! request construction, conversation-context continuity, rate limiting, and
//! timeout recovery from callers. One instance carries one conversation; see
//! the crate docs for the serialization requirements.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::OllamaError;
use crate::fallback::canned_fallback;
use crate::stream::ReplyStream;
use crate::types::{
    ClientConfig, GenerateRequest, GenerateResponse, ModelParams, TagsResponse, VersionResponse,
};

/// Per-call settings for a non-streaming [`OllamaClient::generate`].
#[derive(Default)]
pub struct GenerateOptions {
    /// Full replacement for the default parameter set (replace-not-merge)
    pub params: Option<ModelParams>,

    /// Override of the default response-wait ceiling
    pub timeout: Option<Duration>,

    /// Invoked instead of the canned keyword fallback when the request times out
    pub fallback: Option<Box<dyn Fn() -> String + Send + Sync>>,
}

impl GenerateOptions {
    /// Set a full replacement parameter set for this call
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Override the response-wait ceiling for this call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supply a callback to answer in place of the canned fallback on timeout
    pub fn with_fallback(mut self, fallback: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }
}

impl std::fmt::Debug for GenerateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateOptions")
            .field("params", &self.params)
            .field("timeout", &self.timeout)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

/// Cached `list_models` result with its fetch time.
#[derive(Debug, Clone)]
struct TagsCache {
    fetched_at: Instant,
    models: Vec<String>,
}

/// Client for the local Ollama-compatible generate API.
///
/// Mutating methods take `&mut self`: the rate-limit timestamp, conversation
/// context, and models cache are deliberately unsynchronized. One instance
/// serves one conversation; concurrent callers serialize externally.
#[derive(Debug)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    defaults: ModelParams,
    min_interval: Duration,
    request_timeout: Duration,
    tags_ttl: Duration,

    /// Opaque dialogue state echoed back to the service until reset or replaced
    context: Option<Vec<i64>>,
    last_dispatch: Option<Instant>,
    tags_cache: Option<TagsCache>,
}

impl OllamaClient {
    /// Create a client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: ClientConfig) -> Result<Self, OllamaError> {
        debug!(base_url = %config.base_url, model = %config.model, "from_config: called");
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            defaults: config.params,
            min_interval: config.min_request_interval,
            request_timeout: config.request_timeout,
            tags_ttl: config.tags_cache_ttl,
            context: None,
            last_dispatch: None,
            tags_cache: None,
        })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The stored conversation context, if a prior exchange produced one
    pub fn context(&self) -> Option<&[i64]> {
        self.context.as_deref()
    }

    /// Generate a complete reply (non-streaming).
    ///
    /// Waits out the rate-limit interval, sends the prompt with the stored
    /// conversation context, and replaces that context with the one the
    /// service returns. On timeout this resolves to the fallback answer
    /// instead of failing.
    ///
    /// # Errors
    ///
    /// `Service` on a non-2xx answer, `Transport` on a non-timeout network
    /// failure, `Json` on an unparseable success body. A timeout is never an
    /// error.
    pub async fn generate(
        &mut self,
        prompt: &str,
        system: Option<&str>,
        mut opts: GenerateOptions,
    ) -> Result<String, OllamaError> {
        debug!(prompt_len = prompt.len(), has_system = system.is_some(), "generate: called");
        self.throttle().await;

        let body = self.build_request(prompt, system, opts.params.take(), false);
        let timeout = opts.timeout.unwrap_or(self.request_timeout);

        let response = match self
            .http
            .post(format!("{}/generate", self.base_url))
            .timeout(timeout)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return Ok(self.recover_from_timeout(prompt, &opts));
            }
            Err(e) => return Err(OllamaError::Transport(e)),
        };
        self.last_dispatch = Some(Instant::now());

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = %status, "generate: service error");
            return Err(OllamaError::Service {
                status: status.as_u16(),
                message,
            });
        }

        // The overall timeout also covers reading the body
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) if e.is_timeout() => {
                return Ok(self.recover_from_timeout(prompt, &opts));
            }
            Err(e) => return Err(OllamaError::Transport(e)),
        };
        let parsed: GenerateResponse = serde_json::from_str(&text)?;

        if let Some(context) = parsed.context {
            debug!(tokens = context.len(), "generate: replacing conversation context");
            self.context = Some(context);
        }

        Ok(parsed.response)
    }

    /// Generate a reply as a lazy stream of text fragments.
    ///
    /// Applies the same rate limiting and request shaping as [`generate`], but
    /// returns a [`ReplyStream`] the caller drains one fragment at a time.
    /// Streaming has no timeout fallback and leaves the stored conversation
    /// context untouched.
    ///
    /// # Errors
    ///
    /// `Service` on a non-2xx answer, `Transport` on a network failure.
    ///
    /// [`generate`]: OllamaClient::generate
    pub async fn generate_stream(
        &mut self,
        prompt: &str,
        system: Option<&str>,
        params: Option<ModelParams>,
    ) -> Result<ReplyStream, OllamaError> {
        debug!(prompt_len = prompt.len(), "generate_stream: called");
        self.throttle().await;

        let body = self.build_request(prompt, system, params, true);

        let response = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&body)
            .send()
            .await?;
        self.last_dispatch = Some(Instant::now());

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = %status, "generate_stream: service error");
            return Err(OllamaError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ReplyStream::new(Box::pin(response.bytes_stream())))
    }

    /// Forget the stored conversation context. The next request starts a fresh
    /// dialogue.
    pub fn reset_conversation(&mut self) {
        debug!("reset_conversation: called");
        self.context = None;
    }

    /// List the model names installed in the service registry.
    ///
    /// The result is cached for the configured TTL; the registry changes
    /// rarely within one session, so calls inside the window skip the network.
    ///
    /// # Errors
    ///
    /// `Service` on a non-2xx answer, `Transport` on a network failure.
    pub async fn list_models(&mut self) -> Result<Vec<String>, OllamaError> {
        if let Some(ref cache) = self.tags_cache {
            if cache.fetched_at.elapsed() < self.tags_ttl {
                debug!(models = cache.models.len(), "list_models: cache hit");
                return Ok(cache.models.clone());
            }
        }

        debug!("list_models: fetching registry");
        let response = self.http.get(format!("{}/tags", self.base_url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let tags: TagsResponse = serde_json::from_str(&text)?;
        let models: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();

        self.tags_cache = Some(TagsCache {
            fetched_at: Instant::now(),
            models: models.clone(),
        });

        Ok(models)
    }

    /// Fetch the raw metadata object for a model (default: the configured one).
    ///
    /// # Errors
    ///
    /// `Service` on a non-2xx answer, `Transport` on a network failure, `Json`
    /// on an unparseable body.
    pub async fn model_info(&self, model: Option<&str>) -> Result<serde_json::Value, OllamaError> {
        let name = model.unwrap_or(&self.model);
        debug!(%name, "model_info: called");

        let response = self
            .http
            .post(format!("{}/show", self.base_url))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Probe the service version endpoint, confirming it is reachable.
    ///
    /// # Errors
    ///
    /// `Service` on a non-2xx answer, `Transport` when nothing is listening.
    pub async fn version(&self) -> Result<String, OllamaError> {
        let response = self.http.get(format!("{}/version", self.base_url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let version: VersionResponse = serde_json::from_str(&text)?;
        Ok(version.version)
    }

    /// Block until the minimum interval since the last dispatch has elapsed.
    async fn throttle(&mut self) {
        if let Some(last) = self.last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "throttle: pacing request");
                tokio::time::sleep(wait).await;
            }
        }
    }

    /// Assemble the request body: caller's full parameter set or the defaults,
    /// plus the stored conversation context when one exists.
    fn build_request(
        &self,
        prompt: &str,
        system: Option<&str>,
        params: Option<ModelParams>,
        stream: bool,
    ) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream,
            system: system.map(str::to_string),
            context: self.context.clone(),
            params: params.unwrap_or_else(|| self.defaults.clone()),
        }
    }

    /// Resolve a timed-out request to a local answer.
    fn recover_from_timeout(&self, prompt: &str, opts: &GenerateOptions) -> String {
        warn!("generate: request timed out, answering from fallback");
        match opts.fallback {
            Some(ref callback) => callback(),
            None => canned_fallback(prompt).to_string(),
        }
    }
}
