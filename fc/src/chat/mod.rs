//! Interactive terminal chat
//!
//! A read-eval-print loop over the non-streaming generate path, with slash
//! commands and a cosmetic loading animation while a call is outstanding.

mod session;
mod spinner;

pub use session::ChatSession;
pub use spinner::Spinner;

use eyre::Result;
use ollamaclient::OllamaClient;

use crate::config::Config;
use crate::prompts::TemplateResolver;

/// Run the interactive chat loop
///
/// This is the main entry point for `fc chat`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    let client = OllamaClient::from_config(config.client_config())
        .map_err(|e| eyre::eyre!("Failed to create model service client: {}", e))?;

    let resolver = TemplateResolver::new(&config.template.active).with_variables(config.template.variables.clone());

    let mut session = ChatSession::new(client, resolver, config.chat_timeout());
    session.run().await
}
