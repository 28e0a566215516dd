//! daybrief-core — the prompt proxy behind the daily-reading experience.
//!
//! Two operations, one upstream: a structured executive **briefing** and a
//! free-text **insight**, each built from a [`ContentEntry`] and forwarded to
//! the Gemini `generateContent` API. The single upstream call is wrapped in
//! bounded exponential backoff that retries only on transient overload.
//! Nothing is cached or persisted; every invocation is independent.

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod proxy;
pub mod retry;
pub mod types;

pub use error::{DaybriefError, Result};
pub use gemini::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use proxy::PromptProxy;
pub use retry::RetryPolicy;
pub use types::{Briefing, ContentEntry, ProxyRequest, ProxyResponse};
