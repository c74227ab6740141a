//! `scribe-ai` implements the completion lifecycle: bounded context
//! extraction from the editing surface, deterministic prompt construction,
//! one chat-completion request against an OpenAI-compatible endpoint,
//! response sanitization, and the single-slot inline preview with its
//! accept/discard transitions.
//!
//! The visual side of the preview is behind the [`PreviewRenderer`] trait so
//! the state machine can be exercised without a UI host; the editor command
//! surface lives in [`EditorSession`].

mod client;
mod context;
mod engine;
mod error;
mod prompt;
mod sanitize;
mod session;

pub mod preview;

pub use client::ChatClient;
pub use context::{extract, language_tag, ContextWindow};
pub use engine::CompletionEngine;
pub use error::CompletionError;
pub use prompt::{CompletionRequest, PromptBuilder};
pub use preview::{Anchor, Preview, PreviewController, PreviewRenderer};
pub use sanitize::sanitize;
pub use session::EditorSession;

pub use tokio_util::sync::CancellationToken;
