//! Prompt template resolution
//!
//! Turns a raw user message into the finalized (system, user) prompt pair for
//! the active template, substituting the live input and any registered custom
//! variables into the user format string.

use std::collections::HashMap;

use handlebars::Handlebars;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::templates::{get_template, PromptTemplate};

/// Errors from prompt formatting
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The format string references a variable that was never supplied.
    /// Indicates a configuration defect, not a runtime condition.
    #[error("template references a variable that was never supplied: {0}")]
    MissingVariable(String),

    #[error("template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// A finalized (system, user) prompt pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Resolves user messages against the template selected at construction.
pub struct TemplateResolver {
    template: PromptTemplate,
    variables: HashMap<String, String>,
    hbs: Handlebars<'static>,
}

impl TemplateResolver {
    /// Create a resolver for the named template. An unknown name falls back
    /// to the default template rather than failing.
    pub fn new(template_name: &str) -> Self {
        let template = get_template(template_name);
        debug!(requested = %template_name, resolved = %template.name, "TemplateResolver::new");

        Self {
            template,
            variables: HashMap::new(),
            hbs: Handlebars::new(),
        }
    }

    /// Register extra substitution variables for the user format string.
    pub fn with_variables(mut self, variables: HashMap<String, String>) -> Self {
        self.variables = variables;
        self
    }

    /// Name of the resolved template
    pub fn template_name(&self) -> &str {
        self.template.name
    }

    /// Display title of the resolved template
    pub fn title(&self) -> &str {
        self.template.title
    }

    /// Format the user message into the finalized (system, user) pair.
    ///
    /// # Errors
    ///
    /// `MissingVariable` when the format string references a variable that is
    /// neither `user_input` nor registered; `Render` on a malformed format
    /// string.
    pub fn format_prompt(&self, user_input: &str) -> Result<RenderedPrompt, TemplateError> {
        let mut data = Map::new();
        data.insert("user_input".to_string(), Value::String(user_input.to_string()));
        for (key, value) in &self.variables {
            data.insert(key.clone(), Value::String(value.clone()));
        }

        for variable in referenced_variables(&self.template.user_format) {
            if !data.contains_key(&variable) {
                return Err(TemplateError::MissingVariable(variable));
            }
        }

        let user = self.hbs.render_template(&self.template.user_format, &data)?;

        Ok(RenderedPrompt {
            system: self.template.system.clone(),
            user,
        })
    }
}

impl std::fmt::Debug for TemplateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateResolver")
            .field("template", &self.template.name)
            .field("variables", &self.variables.keys())
            .finish()
    }
}

/// Plain variable names referenced by a format string.
///
/// Only simple `{{name}}` substitutions count; block helpers, partials, and
/// comments are left for the rendering engine.
fn referenced_variables(format: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = format;

    while let Some(start) = rest.find("{{") {
        rest = &rest[start + 2..];
        let Some(end) = rest.find("}}") else { break };
        let name = rest[..end].trim();
        rest = &rest[end + 2..];

        if !name.is_empty()
            && name.chars().all(|c| c.is_alphanumeric() || c == '_')
            && !variables.iter().any(|v| v == name)
        {
            variables.push(name.to_string());
        }
    }

    variables
}
