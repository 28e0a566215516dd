//! The prompt proxy: translates a validated [`ProxyRequest`] into exactly
//! one upstream completion call (plus retries on transient overload) and
//! shapes the result.
//!
//! The proxy surfaces the full typed error taxonomy; the coarse original
//! degradation (briefing → `None`, insight → apology string) belongs to the
//! presentation boundary and lives in `daybrief-client`.

use crate::error::{DaybriefError, Result};
use crate::gemini::GeminiClient;
use crate::prompt;
use crate::retry::RetryPolicy;
use crate::types::{Briefing, ContentEntry, ProxyRequest, ProxyResponse};
use tracing::debug;

/// Stateless request handler. Holds a shared Gemini client and retry policy;
/// nothing is retained between invocations.
#[derive(Debug, Clone)]
pub struct PromptProxy {
    client: GeminiClient,
    retry: RetryPolicy,
}

impl PromptProxy {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Dispatch one request to the matching operation.
    pub async fn handle(&self, request: ProxyRequest) -> Result<ProxyResponse> {
        match request {
            ProxyRequest::Briefing { entry } => {
                self.briefing(&entry).await.map(ProxyResponse::Briefing)
            }
            ProxyRequest::Insight { entry, query } => {
                self.insight(&entry, &query).await.map(ProxyResponse::Insight)
            }
        }
    }

    /// Generate a structured executive briefing for one entry.
    ///
    /// Attaches the briefing output schema, then parses the returned text as
    /// [`Briefing`]. An empty or schema-violating response is a
    /// [`DaybriefError::Generation`] failure, never a panic or a partial
    /// result.
    pub async fn briefing(&self, entry: &ContentEntry) -> Result<Briefing> {
        debug!(title = %entry.title, "generating briefing");
        let prompt = prompt::briefing_prompt(entry);
        let schema = prompt::briefing_schema();

        let text = self
            .retry
            .run(|| self.client.generate(&prompt, Some(schema.clone())))
            .await?;

        parse_briefing(&text)
    }

    /// Answer a free-text query about one entry. No structured schema; the
    /// raw response text is the result.
    ///
    /// An empty query fails with [`DaybriefError::MissingQuery`] before any
    /// upstream call is made.
    pub async fn insight(&self, entry: &ContentEntry, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(DaybriefError::MissingQuery);
        }

        debug!(title = %entry.title, "generating insight");
        let prompt = prompt::insight_prompt(entry, query);
        self.retry.run(|| self.client.generate(&prompt, None)).await
    }
}

fn parse_briefing(text: &str) -> Result<Briefing> {
    if text.trim().is_empty() {
        return Err(DaybriefError::Generation(
            "upstream returned an empty briefing".to_string(),
        ));
    }
    serde_json::from_str(text).map_err(|e| {
        DaybriefError::Generation(format!("briefing did not match the expected shape: {e}"))
    })
}
