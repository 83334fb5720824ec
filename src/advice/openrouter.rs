//! HTTP client for an OpenRouter-style chat-completion endpoint.
//!
//! One POST per advice request, bearer-authenticated, JSON body
//! `{ model, messages: [{ role: "user", content }] }`. Advice text is the
//! first choice's `message.content`; any other successfully received
//! shape degrades to a pretty-printed dump of the payload.

use serde::Serialize;

use super::prompt::build_advice_prompt;
use super::{AdviceProvider, ProviderError};
use crate::config::AdviceConfig;

/// Chat-completion client for the advice service.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl OpenRouterClient {
    /// Create a client from resolved configuration.
    pub fn new(config: &AdviceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// The model requested on every call.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The endpoint this client posts to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Request body for the chat-completion endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl AdviceProvider for OpenRouterClient {
    async fn advice(&self, symptom_text: &str) -> Result<String, ProviderError> {
        let prompt = build_advice_prompt(symptom_text);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Connection(self.api_url.clone())
                } else if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ResponseBody(e.to_string()))?;

        Ok(extract_advice(&payload))
    }
}

/// Pull the advice text out of a chat-completion payload.
///
/// Reads `choices[0].message.content`, trimmed. When that shape is absent
/// or the text is empty, returns a pretty-printed dump of the whole
/// payload instead — the caller always receives something to display.
fn extract_advice(payload: &serde_json::Value) -> String {
    payload
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
        })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> OpenRouterClient {
        OpenRouterClient::new(&AdviceConfig::with_api_key("sk-test"))
    }

    #[test]
    fn client_uses_configured_endpoint_and_model() {
        let client = test_client();
        assert_eq!(client.api_url(), crate::config::DEFAULT_API_URL);
        assert_eq!(client.model(), crate::config::DEFAULT_MODEL);
    }

    #[test]
    fn client_trims_trailing_slash() {
        let mut config = AdviceConfig::with_api_key("sk-test");
        config.api_url = "https://example.test/v1/chat/completions/".into();
        let client = OpenRouterClient::new(&config);
        assert_eq!(client.api_url(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn request_body_matches_wire_shape() {
        let body = ChatRequest {
            model: "openai/gpt-3.5-turbo",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "openai/gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "hello" }]
            })
        );
    }

    #[test]
    fn extract_advice_reads_first_choice() {
        let payload = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  Rest and fluids.  " } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(extract_advice(&payload), "Rest and fluids.");
    }

    #[test]
    fn extract_advice_dumps_unexpected_shape() {
        let payload = json!({ "error": { "message": "model overloaded" } });
        let advice = extract_advice(&payload);
        assert!(advice.contains("model overloaded"));
        // Pretty-printed, not an empty string
        assert!(advice.contains('\n'));
    }

    #[test]
    fn extract_advice_dumps_when_content_empty() {
        let payload = json!({
            "choices": [{ "message": { "role": "assistant", "content": "   " } }]
        });
        let advice = extract_advice(&payload);
        assert!(advice.contains("choices"));
        assert!(!advice.trim().is_empty());
    }

    #[test]
    fn extract_advice_dumps_empty_choices() {
        let payload = json!({ "choices": [] });
        assert!(extract_advice(&payload).contains("choices"));
    }
}
