//! Prompt templates and resolution
//!
//! Maps a named conversation mode to a (system, user) prompt pair and
//! substitutes the live user input into it. The per-variant template
//! duplication of earlier incarnations collapses here into one resolver
//! selected by the `template.active` config key.

mod knowledge;
mod resolver;
mod templates;

pub use knowledge::{knowledge_summary, Strategy, STRATEGIES};
pub use resolver::{RenderedPrompt, TemplateError, TemplateResolver};
pub use templates::{builtin_templates, get_template, list_templates, PromptTemplate, DEFAULT_TEMPLATE};
