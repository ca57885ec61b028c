//! Remediation advice for an audit result.

use std::sync::Arc;

use serde_json::Value;

use crate::advisory::client::{AdvisoryError, ChatMessage, InferenceClient};
use crate::audit::record::FoundHeaders;

const SYSTEM_PROMPT: &str =
    "You are a web security expert. Analyze missing HTTP security headers and provide concise advice.";

/// Builds the advisory prompt and runs it through the inference client.
#[derive(Clone)]
pub struct AdvisoryGenerator {
    client: Arc<dyn InferenceClient>,
}

impl AdvisoryGenerator {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Ask for explanation, suggestions and warnings.
    ///
    /// The returned value is passed through untouched; its fields are not
    /// checked.
    pub async fn advise(
        &self,
        target_url: &str,
        headers_found: &FoundHeaders,
        missing: &[String],
    ) -> Result<Value, AdvisoryError> {
        let messages = build_messages(target_url, headers_found, missing);
        self.client.complete_json(&messages).await
    }
}

/// The two-message prompt for one audit.
pub fn build_messages(
    target_url: &str,
    headers_found: &FoundHeaders,
    missing: &[String],
) -> Vec<ChatMessage> {
    let present = serde_json::to_string(headers_found).unwrap_or_else(|_| "{}".to_string());

    let user = format!(
        "Audit results for {target_url}:\n\
         Present headers: {present}\n\
         Missing headers: {missing}\n\
         \n\
         Provide:\n\
         1. Short explanation of missing items.\n\
         2. Suggested values.\n\
         3. Likely breakage warnings.\n\
         Keep it concise and formatted as JSON with keys: \"explanation\", \"suggestions\", \"warnings\".",
        missing = missing.join(", "),
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}
