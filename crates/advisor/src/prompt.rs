use engine::SpendingAnalysis;

use crate::AdvisorError;

/// Prepended to every prompt.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant for the website 'SpendoSense'. \
- Answer only based on the website's content. \
- If the question is about finance, spending, or data analysis, provide analysis and practical improvement tips. \
- Do not leak user IDs. \
- Suggest alternative investment avenues where relevant. \
- If asked about SpendoSense, finance, expenses, assets, or productivity, answer appropriately. \
- If unsure, reply: \"I'm sorry, but I can only answer questions related to SpendoSense.\" \
- Use proper grammar and answer general questions within SpendoSense's domain without explicitly mentioning it.";

/// Returned to the user whenever the model cannot be reached or answers
/// with nothing usable.
pub const FALLBACK_REPLY: &str = "I'm sorry, but I couldn't process your request at the moment.";

/// The text actually sent to the model.
pub fn full_prompt(user_prompt: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nUser Query: {user_prompt}")
}

pub fn chat_prompt(query: &str) -> String {
    format!(
        "Answer this user query within the domain of our website: \"{}\". Be concise (max 100 words).",
        query.trim()
    )
}

/// Serializes the analysis (which holds no user id) into the prompt.
pub fn analysis_prompt(analysis: &SpendingAnalysis) -> Result<String, AdvisorError> {
    let json = serde_json::to_string(analysis).map_err(AdvisorError::Prompt)?;
    Ok(format!("Analyze this user's spending pattern: {json}"))
}
