//! The suggest-note-ideas flow: typed input, prompt, and validated output.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::SuggestError;

/// Number of ideas the prompt asks for.
pub const IDEA_COUNT: usize = 5;

/// Request for note ideas.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestNoteIdeasInput {
    /// The category to suggest ideas for.
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    /// Free text of the notes already in the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_notes: Option<String>,
}

impl SuggestNoteIdeasInput {
    /// Validate against the input schema. A whitespace-only category is
    /// rejected like an empty one.
    pub fn check(&self) -> Result<(), SuggestError> {
        self.validate()
            .map_err(|e| SuggestError::InvalidInput(e.to_string()))?;
        if self.category.trim().is_empty() {
            return Err(SuggestError::InvalidInput(
                "category must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn current_notes(&self) -> Option<&str> {
        self.current_notes
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Validated model output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SuggestNoteIdeasOutput {
    pub ideas: Vec<String>,
}

/// Render the prompt sent to the model.
pub fn render_prompt(input: &SuggestNoteIdeasInput) -> String {
    let mut prompt = String::from(
        "You are a creative assistant helping users come up with note ideas for their categories.\n\n",
    );
    prompt.push_str(&format!("Category: {}\n\n", input.category.trim()));

    if let Some(notes) = input.current_notes() {
        prompt.push_str("Current Notes:\n");
        prompt.push_str(notes);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!(
        "Suggest {IDEA_COUNT} distinct and creative note ideas for this category. \
         The ideas should be short and concise.\n\
         Respond with a JSON object of the form {{\"ideas\": [\"...\"]}}."
    ));
    prompt
}

/// The JSON schema the model is asked to answer with.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "ideas": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["ideas"]
    })
}

/// Parse raw model text into [`SuggestNoteIdeasOutput`].
///
/// The text must be a JSON object whose `ideas` field is an array of strings.
/// Anything else is rejected; nothing is coerced.
pub fn parse_model_output(raw: &str) -> Result<SuggestNoteIdeasOutput, SuggestError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| SuggestError::InvalidResponse(format!("not JSON: {e}")))?;

    let ideas = value
        .get("ideas")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            SuggestError::InvalidResponse("missing `ideas` array".into())
        })?;

    let ideas = ideas
        .iter()
        .map(|idea| {
            idea.as_str().map(str::to_string).ok_or_else(|| {
                SuggestError::InvalidResponse("`ideas` must contain only strings".into())
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SuggestNoteIdeasOutput { ideas })
}
