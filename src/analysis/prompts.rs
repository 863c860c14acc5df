//! Prompt templates for quote analysis

pub const SYSTEM_PROMPT: &str = r#"You are a literary analyst. For the quote you are given, respond with ONLY a valid JSON object and nothing else, using exactly these keys:
{
  "sentiment": number between 0 and 1 (0 = very negative, 1 = very positive),
  "intensity": number between 0 and 1 (emotional intensity),
  "complexity": number between 0 and 1 (linguistic and conceptual complexity),
  "agency": number between 0 and 1 (how strongly the speaker acts rather than being acted upon),
  "themes": array of exactly three one-word themes
}"#;

/// User message embedding the quote verbatim
pub fn user_prompt(quote: &str) -> String {
    format!("Analyze this quote: \"{}\"", quote)
}
