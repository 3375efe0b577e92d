//! Note idea suggestions backed by a hosted language model.
//!
//! - [`flow`] -- input/output types, prompt rendering and output validation.
//! - [`model`] -- the [`model::IdeaModel`] seam and the Gemini client.
//! - [`service`] -- [`service::SuggestionService`] and its request state machine.

pub mod error;
pub mod flow;
pub mod model;
pub mod service;

pub use error::SuggestError;
pub use flow::{SuggestNoteIdeasInput, SuggestNoteIdeasOutput};
pub use model::{GeminiConfig, GeminiModel, IdeaModel};
pub use service::{SuggestionService, SuggestionState};
