//! Chat session management

use std::time::Duration;

use colored::Colorize;
use eyre::Result;
use ollamaclient::{GenerateOptions, OllamaClient};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::spinner::Spinner;
use crate::prompts::TemplateResolver;

/// Outcome of a slash command
enum SlashResult {
    Continue,
    Quit,
}

/// Interactive chat session
pub struct ChatSession {
    client: OllamaClient,
    resolver: TemplateResolver,
    timeout: Duration,
}

impl ChatSession {
    /// Create a new chat session
    pub fn new(client: OllamaClient, resolver: TemplateResolver, timeout: Duration) -> Self {
        Self {
            client,
            resolver,
            timeout,
        }
    }

    /// Run the chat main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        // A failed turn is reported, never fatal to the session
                        if let Err(e) = self.respond(input).await {
                            println!("{} {}", "Fout:".red(), e);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "Onderbroken. Type /exit om te stoppen.".yellow());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Tot ziens!");
        Ok(())
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", self.resolver.title().bright_cyan().bold());
        println!("Gebruikt model: {}", self.client.model().green());
        println!("Type {} voor beschikbare commando's", "/help".yellow());
        println!();
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" => {
                self.print_help();
                SlashResult::Continue
            }
            "/exit" | "/quit" => SlashResult::Quit,
            "/reset" => {
                self.client.reset_conversation();
                println!("{}", "Gesprek gereset".green());
                SlashResult::Continue
            }
            _ => {
                println!("{} Onbekend commando: {}", "?".yellow(), cmd);
                self.print_help();
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Beschikbare Commando's:".bright_cyan());
        println!("  {:18} Toon dit help bericht", "/help".yellow());
        println!("  {:18} Reset het gesprek", "/reset".yellow());
        println!("  {:18} Verlaat de applicatie", "/exit of /quit".yellow());
        println!();
    }

    /// Format the input through the active template and print the reply
    async fn respond(&mut self, input: &str) -> Result<()> {
        let prompt = self.resolver.format_prompt(input)?;

        let spinner = Spinner::start("Bezig met analyseren...");
        let result = self
            .client
            .generate(
                &prompt.user,
                Some(&prompt.system),
                GenerateOptions::default().with_timeout(self.timeout),
            )
            .await;
        spinner.stop();

        let reply = result?;

        println!();
        println!("{}", "Advies:".bright_cyan());
        println!("{}", "-".repeat(50).dimmed());
        println!("{}", reply);
        println!("{}", "-".repeat(50).dimmed());

        Ok(())
    }
}
