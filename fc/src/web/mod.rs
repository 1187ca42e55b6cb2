//! Web chat backend
//!
//! A minimal HTTP surface for the browser frontend: one chat route and a
//! health probe. The chat route drives the streaming generate path and
//! concatenates every fragment before responding, trading latency for a
//! complete reply.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::{Context, Result};
use ollamaclient::OllamaClient;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::prompts::TemplateResolver;

/// Reply used when the stream produced no text at all
const EMPTY_REPLY: &str = "I couldn't generate a response. Please try again.";

/// Message used when the caller sent nothing to respond to
const NO_INPUT: &str = "No message or analysis provided";

/// Placeholder message when only an analysis was sent
const DEFAULT_MESSAGE: &str = "Tell me about this fossil";

/// Shared route state.
///
/// The client carries per-conversation state; the mutex is the external
/// serialization it requires.
#[derive(Clone)]
pub struct AppState {
    client: Arc<Mutex<OllamaClient>>,
    resolver: Arc<TemplateResolver>,
}

impl AppState {
    pub fn new(client: OllamaClient, resolver: TemplateResolver) -> Self {
        Self {
            client: Arc::new(Mutex::new(client)),
            resolver: Arc::new(resolver),
        }
    }
}

/// Classification result handed over by the image classifier collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub class: String,
    pub confidence: f64,
}

/// `POST /chat` request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,

    pub analysis: Option<Analysis>,
}

/// `POST /chat` response body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    error: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the web backend
///
/// This is the main entry point for `fc serve`.
pub async fn serve(config: &Config, bind: Option<&str>) -> Result<()> {
    let client = OllamaClient::from_config(config.client_config())
        .map_err(|e| eyre::eyre!("Failed to create model service client: {}", e))?;
    let resolver = TemplateResolver::new(&config.template.active).with_variables(config.template.variables.clone());

    let addr = bind.unwrap_or(&config.web.bind);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;

    info!(%addr, "web backend listening");
    println!("Luistert op http://{}", addr);

    axum::serve(listener, router(AppState::new(client, resolver)))
        .await
        .context("Web server failed")?;

    Ok(())
}

/// Finalized plain-text reply for one web chat message.
///
/// With a caller-supplied system prompt the message travels as-is; without
/// one the active template supplies the pair. Drives the streaming path and
/// concatenates every fragment before returning.
pub async fn chat_response(state: &AppState, user_message: &str, system_prompt: Option<&str>) -> Result<String> {
    let (system, user) = match system_prompt {
        Some(system) => (system.to_string(), user_message.to_string()),
        None => {
            let prompt = state.resolver.format_prompt(user_message)?;
            (prompt.system, prompt.user)
        }
    };

    debug!(message_len = user.len(), "chat_response: dispatching");

    // Hold the lock only to dispatch; the stream owns its connection
    let stream = {
        let mut client = state.client.lock().await;
        client.generate_stream(&user, Some(&system), None).await?
    };

    let text = stream.collect_text().await?;
    let text = text.trim();

    if text.is_empty() {
        debug!("chat_response: stream produced no text");
        return Ok(EMPTY_REPLY.to_string());
    }

    Ok(text.to_string())
}

/// Answer one chat message with a finalized plain-text reply.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ErrorReply>)> {
    let message = request.message.trim();
    if message.is_empty() && request.analysis.is_none() {
        return Err(bad_request(NO_INPUT));
    }

    let message = if message.is_empty() { DEFAULT_MESSAGE } else { message };

    // A classification result steers the model directly; otherwise the active
    // template takes over inside chat_response
    let system = request.analysis.as_ref().map(|analysis| {
        format!(
            "You are analyzing a fossil identified as {} with {}% confidence. \
             Provide detailed information about this fossil type.",
            analysis.class, analysis.confidence
        )
    });

    let response = chat_response(&state, message, system.as_deref())
        .await
        .map_err(internal_error)?;

    Ok(Json(ChatReply {
        response,
        analysis: request.analysis,
    }))
}

/// Report whether the model service answers its version probe.
async fn health(State(state): State<AppState>) -> StatusCode {
    let client = state.client.lock().await;
    match client.version().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            debug!(error = %e, "health: model service unreachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorReply>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorReply {
            error: message.to_string(),
        }),
    )
}

fn internal_error(e: impl std::fmt::Display) -> (StatusCode, Json<ErrorReply>) {
    error!(error = %e, "chat: request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorReply { error: e.to_string() }),
    )
}
