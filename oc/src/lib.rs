//! OllamaClient - client for a local Ollama-compatible model service
//!
//! Owns the HTTP conversation with the local generative model service:
//! request shaping, rolling conversation-context threading, rate limiting,
//! buffered and streamed response consumption, and a deterministic canned
//! fallback when the service does not answer in time.
//!
//! # Concurrency
//!
//! A client instance carries one conversation. The rate-limit timestamp, the
//! conversation context, and the models cache are plain `&mut self` state with
//! no internal synchronization; concurrent callers must serialize externally
//! (one instance per conversation, or a lock around the shared one).
//!
//! # Example
//!
//! ```ignore
//! use ollamaclient::{ClientConfig, GenerateOptions, OllamaClient};
//!
//! let mut client = OllamaClient::from_config(ClientConfig::default())?;
//! let reply = client
//!     .generate("Wat is een ammoniet?", Some("Je bent een fossielenexpert."), GenerateOptions::default())
//!     .await?;
//! ```

mod client;
mod error;
pub mod fallback;
mod stream;
mod types;

pub use client::{GenerateOptions, OllamaClient};
pub use error::OllamaError;
pub use stream::ReplyStream;
pub use types::{ClientConfig, GenerateRequest, GenerateResponse, ModelParams, ModelTag, StreamChunk, TagsResponse};
