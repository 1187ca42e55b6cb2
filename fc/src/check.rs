//! Service preflight check
//!
//! Verifies that the model service is reachable and the configured model is
//! installed before a chat session starts, printing actionable hints when it
//! is not.

use colored::Colorize;
use eyre::Result;
use ollamaclient::OllamaClient;

use crate::config::Config;

/// Probe the service and the configured model.
///
/// Returns `Ok(false)` when a check fails; the failure itself is rendered to
/// the user, not returned as an error.
pub async fn run_setup_check(config: &Config) -> Result<bool> {
    let mut client = OllamaClient::from_config(config.client_config())
        .map_err(|e| eyre::eyre!("Failed to create model service client: {}", e))?;
    let model = &config.service.model;

    println!("Controleren of Ollama draait...");
    match client.version().await {
        Ok(version) => {
            println!("{} Ollama draait (versie {}).", "OK".green(), version);
        }
        Err(e) => {
            tracing::debug!(error = %e, "setup check: version probe failed");
            println!("{} Ollama draait niet.", "Fout:".red());
            println!("Start Ollama en probeer het opnieuw.");
            return Ok(false);
        }
    }

    println!("Controleren of model '{}' beschikbaar is...", model);
    let models = match client.list_models().await {
        Ok(models) => models,
        Err(e) => {
            tracing::debug!(error = %e, "setup check: registry listing failed");
            println!("{} Model '{}' is niet beschikbaar.", "Fout:".red(), model);
            return Ok(false);
        }
    };

    if !models.iter().any(|m| m == model) {
        println!("{} Model '{}' is niet beschikbaar.", "Fout:".red(), model);

        if !models.is_empty() {
            println!();
            println!("Beschikbare modellen:");
            for name in &models {
                println!("  - {}", name);
            }
        }

        println!();
        println!("Je kunt het downloaden met: ollama pull {}", model);

        if let Some(base_model) = model.rsplit('/').next().filter(|_| model.contains('/')) {
            println!();
            println!("Opmerking: je gebruikt een aangepaste modelvariant.");
            println!("Als je problemen ondervindt, probeer dan het basismodel:");
            println!("  ollama pull {}", base_model);
            println!("Werk vervolgens de modelnaam in de configuratie bij.");
        }

        return Ok(false);
    }

    println!("{} Model '{}' is beschikbaar.", "OK".green(), model);
    println!();
    println!("{}", "Alle controles geslaagd! Je kunt nu chatten met het model.".green());
    Ok(true)
}
