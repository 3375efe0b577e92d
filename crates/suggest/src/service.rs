//! Suggestion requests and their lifecycle.

use std::sync::Arc;

use crate::error::SuggestError;
use crate::flow::{parse_model_output, render_prompt, SuggestNoteIdeasInput, SuggestNoteIdeasOutput};
use crate::model::IdeaModel;

/// Lifecycle of one suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionState {
    Idle,
    Requesting,
    Success(Vec<String>),
    Failed(String),
}

impl SuggestionState {
    /// Start a request from any state.
    pub fn begin(self) -> Self {
        SuggestionState::Requesting
    }

    /// Settle a request with its outcome.
    pub fn finish(self, outcome: &Result<SuggestNoteIdeasOutput, SuggestError>) -> Self {
        if self != SuggestionState::Requesting {
            return self;
        }
        match outcome {
            Ok(output) => SuggestionState::Success(output.ideas.clone()),
            Err(err) => SuggestionState::Failed(err.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuggestionState::Idle => "idle",
            SuggestionState::Requesting => "requesting",
            SuggestionState::Success(_) => "success",
            SuggestionState::Failed(_) => "failed",
        }
    }
}

/// Runs suggest-note-ideas requests against the configured model.
///
/// With no model configured every request fails with
/// [`SuggestError::NotConfigured`].
#[derive(Clone)]
pub struct SuggestionService {
    model: Option<Arc<dyn IdeaModel>>,
}

impl SuggestionService {
    pub fn new(model: Arc<dyn IdeaModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn suggest_note_ideas(
        &self,
        input: &SuggestNoteIdeasInput,
    ) -> Result<SuggestNoteIdeasOutput, SuggestError> {
        let state = SuggestionState::Idle;
        input.check()?;

        let model = self.model.as_ref().ok_or(SuggestError::NotConfigured)?;

        let state = state.begin();
        tracing::debug!(
            model = model.name(),
            category = %input.category,
            state = state.label(),
            "Requesting note ideas"
        );

        let outcome = match model.generate(&render_prompt(input)).await {
            Ok(raw) => parse_model_output(&raw),
            Err(e) => Err(e),
        };

        let state = state.finish(&outcome);
        match &state {
            SuggestionState::Success(ideas) => {
                tracing::info!(count = ideas.len(), state = state.label(), "Note ideas generated");
            }
            SuggestionState::Failed(reason) => {
                tracing::error!(error = %reason, state = state.label(), "Note idea generation failed");
            }
            _ => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;

    struct StubModel {
        reply: Result<String, SuggestError>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        fn replying(reply: Result<&str, SuggestError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl IdeaModel for StubModel {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn input(category: &str) -> SuggestNoteIdeasInput {
        SuggestNoteIdeasInput {
            category: category.to_string(),
            current_notes: Some("Pizza".to_string()),
        }
    }

    #[tokio::test]
    async fn returns_validated_ideas() {
        let stub = StubModel::replying(Ok(r#"{"ideas":["Tacos","Ramen"]}"#));
        let service = SuggestionService::new(stub.clone());

        let out = service.suggest_note_ideas(&input("Food")).await.unwrap();
        assert_eq!(out.ideas, vec!["Tacos", "Ramen"]);

        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Category: Food"));
        assert!(prompts[0].contains("Pizza"));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_model() {
        let stub = StubModel::replying(Ok(r#"{"ideas":[]}"#));
        let service = SuggestionService::new(stub.clone());

        let result = service.suggest_note_ideas(&input(" ")).await;
        assert_matches!(result, Err(SuggestError::InvalidInput(_)));
        assert!(stub.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_service_fails() {
        let service = SuggestionService::unconfigured();
        assert!(!service.is_configured());
        assert_matches!(
            service.suggest_note_ideas(&input("Food")).await,
            Err(SuggestError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn malformed_model_output_is_rejected() {
        let stub = StubModel::replying(Ok(r#"{"ideas":[1,2,3]}"#));
        let service = SuggestionService::new(stub);
        assert_matches!(
            service.suggest_note_ideas(&input("Food")).await,
            Err(SuggestError::InvalidResponse(_))
        );
    }

    #[tokio::test]
    async fn model_errors_pass_through() {
        let stub = StubModel::replying(Err(SuggestError::Upstream {
            status: 429,
            body: "quota".into(),
        }));
        let service = SuggestionService::new(stub);
        assert_matches!(
            service.suggest_note_ideas(&input("Food")).await,
            Err(SuggestError::Upstream { status: 429, .. })
        );
    }

    #[test]
    fn state_transitions() {
        let requesting = SuggestionState::Idle.begin();
        assert_eq!(requesting, SuggestionState::Requesting);

        let ok = Ok(SuggestNoteIdeasOutput {
            ideas: vec!["a".into()],
        });
        assert_eq!(
            requesting.clone().finish(&ok),
            SuggestionState::Success(vec!["a".into()])
        );

        let failed = requesting.finish(&Err(SuggestError::NotConfigured));
        assert_matches!(failed, SuggestionState::Failed(ref msg) if msg.contains("not configured"));

        // Settling without a request in flight changes nothing.
        assert_eq!(SuggestionState::Idle.finish(&ok), SuggestionState::Idle);

        // A settled state can start a new request.
        assert_eq!(
            SuggestionState::Success(vec![]).begin(),
            SuggestionState::Requesting
        );
    }
}
