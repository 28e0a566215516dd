//! Prompt templates for the two supported operations.
//!
//! The wording is deliberately stable: the briefing template pairs with a
//! structured-output schema, and downstream rendering assumes exactly the
//! three briefing fields the schema requires.

use crate::types::ContentEntry;
use serde_json::{json, Value};

/// Briefing prompt: asks for a modern-relevance analysis, three takeaways,
/// and one challenge question for the day's excerpt.
pub fn briefing_prompt(entry: &ContentEntry) -> String {
    format!(
        "Analyze this excerpt from today's reading and provide a modern executive briefing.\n\
         \n\
         Title: {title}\n\
         Text: {body}\n\
         Action: {action}\n\
         \n\
         I need:\n\
         1. Modern Relevance: 2 sentences on why this specific advice is critical for leaders today (2025+).\n\
         2. Key Takeaways: 3 short, punchy bullet points extracting the core value.\n\
         3. Challenge Question: One provocative question to ask oneself based on this text.\n",
        title = entry.title,
        body = entry.body,
        action = entry.action_point,
    )
}

/// Structured-output schema attached to briefing requests. Field names must
/// match [`crate::types::Briefing`]'s wire shape.
pub fn briefing_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "modernRelevance": { "type": "STRING" },
            "keyTakeaways": { "type": "ARRAY", "items": { "type": "STRING" } },
            "challengeQuestion": { "type": "STRING" }
        },
        "required": ["modernRelevance", "keyTakeaways", "challengeQuestion"]
    })
}

/// Insight prompt: embeds the full entry plus the user's (often dictated)
/// query, and pins the response style.
pub fn insight_prompt(entry: &ContentEntry, query: &str) -> String {
    format!(
        "You are a wise and insightful management consultant, deeply energetic about the ideas in today's reading.\n\
         \n\
         Here is today's excerpt:\n\
         Title: {title}\n\
         Subheading: {subheading}\n\
         Body: {body}\n\
         Action Point: {action}\n\
         \n\
         The user has spoken the following query/thought via voice input:\n\
         \"{query}\"\n\
         \n\
         Please provide a response that:\n\
         1. Directly answers the user's query.\n\
         2. Relates the user's query specifically to the provided excerpt.\n\
         3. Uses relevant examples from history or current events to illustrate the connection between the excerpt and the user's situation.\n\
         4. Keep the tone professional yet conversational.\n",
        title = entry.title,
        subheading = entry.subheading,
        body = entry.body,
        action = entry.action_point,
        query = query,
    )
}
