use crate::error::{DaybriefError, Result};
use serde::{Deserialize, Serialize};

/// One curated daily reading excerpt, supplied whole by the external
/// catalogue. Read-only to this crate; nothing here mutates or stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Calendar-date key, e.g. "January 1".
    #[serde(default)]
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub subheading: String,
    pub body: String,
    pub action_point: String,
    #[serde(default)]
    pub source: String,
}

/// Structured executive briefing for one entry. Either fully populated or
/// absent — a failed request never yields a partial briefing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Briefing {
    pub modern_relevance: String,
    pub key_takeaways: Vec<String>,
    pub challenge_question: String,
}

/// A validated proxy operation. The wire body `{action, entry, userQuery?}`
/// converts through [`ProxyRequest::from_parts`] so that "query required for
/// insight" is enforced once, before any upstream call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ProxyRequest {
    Briefing {
        entry: ContentEntry,
    },
    Insight {
        entry: ContentEntry,
        #[serde(rename = "userQuery")]
        query: String,
    },
}

impl ProxyRequest {
    /// Build a request from the loose wire fields.
    ///
    /// Unknown actions and a missing or blank `userQuery` for the insight
    /// action are validation failures, not silently tolerated.
    pub fn from_parts(
        action: &str,
        entry: ContentEntry,
        user_query: Option<String>,
    ) -> Result<Self> {
        match action {
            "briefing" => Ok(ProxyRequest::Briefing { entry }),
            "insight" => {
                let query = user_query.unwrap_or_default();
                if query.trim().is_empty() {
                    return Err(DaybriefError::MissingQuery);
                }
                Ok(ProxyRequest::Insight { entry, query })
            }
            other => Err(DaybriefError::InvalidAction(other.to_string())),
        }
    }

    pub fn entry(&self) -> &ContentEntry {
        match self {
            ProxyRequest::Briefing { entry } => entry,
            ProxyRequest::Insight { entry, .. } => entry,
        }
    }
}

/// Proxy result, serialized as the bare value inside the server's
/// `{"result": ...}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProxyResponse {
    Briefing(Briefing),
    Insight(String),
}
