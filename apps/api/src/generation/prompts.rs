// Prompt constants for report generation.
// Reuses the JSON-only fragment from llm_client::prompts.

/// System prompt for report generation. `{json_only}` is filled from `JSON_ONLY_SYSTEM`.
pub const REPORT_SYSTEM_TEMPLATE: &str = "You are an expert research analyst who writes \
    thorough, well-structured reports for a general professional audience. {json_only}";

/// Report prompt template. Replace `{topic}` before sending.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Write a comprehensive report on the topic "{topic}".

The report must be at least 1500 words in total, spread across exactly six sections:

- introduction: define the topic, why it matters, and what the report covers. Substantial.
- history: origins, key milestones, and how thinking or technology evolved to where it is now.
- benefits: concrete advantages with examples, data or case studies; impact on society,
  industry and individuals.
- challenges: technical, ethical and social problems and criticisms, with their nuances.
- currentTrends: the latest developments, recent research and events shaping the topic today.
- futureScope: a reasoned forecast for the next decade, including likely innovations and
  long-term implications.

Write explanatory prose that goes beyond surface-level description. Separate paragraphs
within a section with a blank line.

Return a JSON object with this EXACT shape (no extra fields, every value a non-empty string):
{
  "report": {
    "introduction": "...",
    "history": "...",
    "benefits": "...",
    "challenges": "...",
    "currentTrends": "...",
    "futureScope": "..."
  }
}"#;
