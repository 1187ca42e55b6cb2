//! fossilchat - advisory chat over a local generative model service
//!
//! A small demonstration application: a fossil-classification advisor and a
//! firefighting-strategy advisor sharing one model service client, exposed
//! through a terminal chat loop and a minimal web backend.
//!
//! # Modules
//!
//! - [`chat`] - interactive terminal chat loop
//! - [`check`] - service preflight check
//! - [`cli`] - command-line interface
//! - [`config`] - configuration types and loading
//! - [`prompts`] - prompt templates and resolution
//! - [`web`] - web chat backend

pub mod chat;
pub mod check;
pub mod cli;
pub mod config;
pub mod prompts;
pub mod web;

// Re-export commonly used types
pub use cli::{Cli, Command};
pub use config::{Config, ServiceConfig, TemplateConfig, WebConfig};
pub use prompts::{RenderedPrompt, TemplateError, TemplateResolver};
pub use web::{chat_response, Analysis, AppState, ChatReply, ChatRequest};
