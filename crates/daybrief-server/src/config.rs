use clap::Args;
use daybrief_core::{DaybriefError, GeminiClient, PromptProxy, RetryPolicy};
use std::net::SocketAddr;

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// HTTP listen address
    #[arg(long, env = "DAYBRIEF_HTTP_ADDR", default_value = "0.0.0.0:8787")]
    pub http_addr: SocketAddr,

    /// Gemini API key (falls back to the legacy API_KEY env var)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model to call
    #[arg(long, env = "DAYBRIEF_MODEL", default_value = daybrief_core::DEFAULT_MODEL)]
    pub model: String,

    /// Upstream API base URL
    #[arg(long, env = "DAYBRIEF_UPSTREAM_URL", default_value = daybrief_core::DEFAULT_BASE_URL)]
    pub upstream_url: String,

    /// Total attempts per upstream call (retries on transient overload only)
    #[arg(long, env = "DAYBRIEF_RETRY_ATTEMPTS", default_value = "3")]
    pub retry_attempts: u32,
}

impl ServeConfig {
    /// Resolve the upstream credential, failing fast before any network
    /// call. `--api-key`/`GEMINI_API_KEY` wins over the legacy `API_KEY`.
    pub fn resolved_key(&self) -> daybrief_core::Result<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("API_KEY").ok().filter(|k| !k.is_empty()))
            .ok_or(DaybriefError::MissingApiKey)
    }

    /// Build the proxy this server fronts.
    pub fn proxy(&self) -> daybrief_core::Result<PromptProxy> {
        let client = GeminiClient::new(self.resolved_key()?)
            .with_model(&self.model)
            .with_base_url(&self.upstream_url);
        Ok(PromptProxy::new(client).with_retry(RetryPolicy::new(self.retry_attempts)))
    }
}
