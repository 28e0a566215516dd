//! Rust client for the daybrief proxy server.
//!
//! Thin wrapper over the server's HTTP API with the presentation-boundary
//! degradation the reading UI expects: a failed briefing yields `None` (the
//! UI renders an explicit failure state), a failed insight yields a
//! user-readable apology string instead of raw error text. Callers that want
//! the real error use the `try_*` variants.
//!
//! # Example
//! ```rust,no_run
//! use daybrief_client::DaybriefClient;
//! use daybrief_core::ContentEntry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = DaybriefClient::new("http://localhost:8787");
//!     let entry = ContentEntry {
//!         date: "January 1".into(),
//!         title: "Managing Oneself".into(),
//!         subheading: String::new(),
//!         body: "Effective executives know where their time goes.".into(),
//!         action_point: "Track one week of your time.".into(),
//!         source: String::new(),
//!     };
//!
//!     if let Some(briefing) = client.daily_briefing(&entry).await {
//!         println!("{}", briefing.modern_relevance);
//!     }
//!     let answer = client.insight(&entry, "How do I start?").await;
//!     println!("{answer}");
//! }
//! ```

use daybrief_core::{Briefing, ContentEntry};
use serde_json::{json, Value};

const INSIGHT_UNAVAILABLE: &str =
    "I apologize, I couldn't generate an insight at this moment.";
const CONNECTION_TROUBLE: &str =
    "I'm having trouble connecting to my knowledge base right now. Please try again later.";

/// A connected daybrief client.
pub struct DaybriefClient {
    base_url: String,
    http: reqwest::Client,
}

impl DaybriefClient {
    /// `base_url` is the server root, e.g. `"http://localhost:8787"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch a structured briefing, or the server's error.
    pub async fn try_briefing(&self, entry: &ContentEntry) -> anyhow::Result<Briefing> {
        let result = self
            .post_generate(json!({ "action": "briefing", "entry": entry }))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Fetch an insight answer, or the server's error.
    pub async fn try_insight(
        &self,
        entry: &ContentEntry,
        query: &str,
    ) -> anyhow::Result<Option<String>> {
        let result = self
            .post_generate(json!({
                "action": "insight",
                "entry": entry,
                "userQuery": query,
            }))
            .await?;
        Ok(result.as_str().map(str::to_string))
    }

    /// Briefing with UI degradation: any failure is `None`, never a partial
    /// result.
    pub async fn daily_briefing(&self, entry: &ContentEntry) -> Option<Briefing> {
        self.try_briefing(entry).await.ok()
    }

    /// Insight with UI degradation: transport or server failures become a
    /// connection apology, an absent result becomes a generation apology.
    pub async fn insight(&self, entry: &ContentEntry, query: &str) -> String {
        match self.try_insight(entry, query).await {
            Ok(Some(text)) => text,
            Ok(None) => INSIGHT_UNAVAILABLE.to_string(),
            Err(_) => CONNECTION_TROUBLE.to_string(),
        }
    }

    async fn post_generate(&self, body: Value) -> anyhow::Result<Value> {
        let url = format!("{}/api/generate", self.base_url);
        let resp = self.http.post(&url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body: Value = resp.json().await.unwrap_or(Value::Null);
            let err = body["error"].as_str().unwrap_or("API request failed");
            anyhow::bail!("daybrief server error {}: {}", status, err);
        }

        let body: Value = resp.json().await?;
        Ok(body["result"].clone())
    }
}
