//! Built-in prompt templates
//!
//! Each template pairs a fully resolved system prompt with a user-message
//! format string. The advisory template bakes the strategy knowledge base
//! into its system prompt here, at definition time.

use super::knowledge::knowledge_summary;

/// Name of the template used when no (or an unknown) name is configured.
pub const DEFAULT_TEMPLATE: &str = "fossil-advice";

/// A named (system, user-format) prompt pair.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: &'static str,

    /// Short display title for the terminal UI
    pub title: &'static str,

    /// Fully resolved instruction text sent as the system prompt
    pub system: String,

    /// User-message format string with a `{{user_input}}` slot
    pub user_format: String,
}

const FOSSIL_SYSTEM: &str = "You are an expert on fossil classification. You will receive a fossil class prediction and its accuracy percentage from an image classification AI.

Your first response must always follow this structure:
1. Clearly state the predicted fossil class and its accuracy percentage.
2. Explain what the given accuracy means in terms of reliability (based on the accuracy ranges below).
3. Provide informative and accessible details about the predicted fossil class.
4. Try to contain the length of your response to 15 sentences.

After this initial response, continue the conversation naturally. Answer the user's follow-up questions, provide guidance, and help them understand more about their fossil, fossil hunting, classification tips, or anything related. Stay in your role as a helpful and knowledgeable fossil advisor.

Use the following guide to explain accuracy reliability:

0-50%: Very low accuracy. Let the user know the confidence is below 50%, which means the model is just as likely to be wrong as right. Avoid confirming the class and instead encourage the user to retake the photo. Suggestions: improve lighting, avoid background clutter, use higher resolution, better angle or focus.

60-70%: Still low confidence. Show the prediction, but clearly explain that it is incorrect a lot of the time. Reiterate that the result should be taken with caution and encourage the user to upload a better image with the same improvement tips as above.

70-80%: More often right than wrong. Mention this, but also suggest that the user compare their photo with other known images of this fossil class to be more certain.

80-95%: Fairly confident. You can say the prediction is likely correct, though there's still a chance it's not. Proceed to explain the fossil class assuming it's correct.

95-100%: High confidence. You may state that you are confident the prediction is correct. Then explain the fossil class and what the user can do with it (e.g., record it, report it, preserve it, etc.).

Always be clear, informative, and supportive. Help the user feel encouraged, even when the model's confidence is low, and keep the tone friendly and curious.";

const BRANDWEER_SYSTEM_HEADER: &str = "Je bent een adviseur voor brandweerstrategie. Je krijgt een situatiebeschrijving van een bevelvoerder en adviseert welke van de vier inzetstrategie\u{eb}n het meest geschikt is. Onderbouw je advies met de doelen, criteria en risico's uit de kennisbank hieronder, en noem de belangrijkste technieken. Houd je antwoord beknopt en praktisch bruikbaar.

Kennisbank:

";

/// All built-in templates.
pub fn builtin_templates() -> Vec<PromptTemplate> {
    vec![fossil_advice(), brandweer_advies()]
}

/// Look a template up by name, falling back to the default for unknown names.
pub fn get_template(name: &str) -> PromptTemplate {
    builtin_templates()
        .into_iter()
        .find(|t| t.name == name)
        .unwrap_or_else(fossil_advice)
}

/// Names of all built-in templates.
pub fn list_templates() -> Vec<&'static str> {
    builtin_templates().into_iter().map(|t| t.name).collect()
}

fn fossil_advice() -> PromptTemplate {
    PromptTemplate {
        name: "fossil-advice",
        title: "Fossiel Advies",
        system: FOSSIL_SYSTEM.to_string(),
        user_format: "{{user_input}}".to_string(),
    }
}

fn brandweer_advies() -> PromptTemplate {
    PromptTemplate {
        name: "brandweer-advies",
        title: "Brandweer Strategie Advies",
        system: format!("{}{}", BRANDWEER_SYSTEM_HEADER, knowledge_summary()),
        user_format: "{{user_input}}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let template = get_template("bestaat-niet");
        assert_eq!(template.name, DEFAULT_TEMPLATE);
        assert_eq!(template.system, get_template(DEFAULT_TEMPLATE).system);
    }

    #[test]
    fn test_advisory_system_prompt_embeds_knowledge() {
        let template = get_template("brandweer-advies");
        assert!(template.system.contains("Kennisbank"));
        assert!(template.system.contains("Defensieve buiteninzet"));
        assert!(template.system.contains("- Flashover"));
    }

    #[test]
    fn test_every_template_has_user_input_slot() {
        for template in builtin_templates() {
            assert!(
                template.user_format.contains("{{user_input}}"),
                "template {} lacks the user_input slot",
                template.name
            );
        }
    }
}
