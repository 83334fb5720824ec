//! Advice generation — the trait seam, provider errors, and the mock
//! provider used by tests.
//!
//! The orchestrator talks to an `AdviceProvider`; the real implementation
//! is `OpenRouterClient` (one outbound chat-completion call per symptom
//! submission), the test implementation is `MockAdviceProvider`.

use std::sync::atomic::{AtomicUsize, Ordering};

pub mod openrouter;
pub mod prompt;

pub use openrouter::OpenRouterClient;

// ═══════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════

/// Network/transport/protocol failures from the advice call.
///
/// A successfully received payload in an unexpected shape is NOT one of
/// these — it degrades to a raw dump of the payload instead, so the
/// caller always has something to display.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Cannot reach advice service at {0}")]
    Connection(String),
    #[error("Advice request timed out after {0}s")]
    Timeout(u64),
    #[error("Advice service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Failed to read response body: {0}")]
    ResponseBody(String),
}

// ═══════════════════════════════════════════
// AdviceProvider
// ═══════════════════════════════════════════

/// Trait for obtaining guidance on a symptom description.
///
/// Sends exactly one request per call; no retry. The call is the
/// session's only suspension point.
#[allow(async_fn_in_trait)]
pub trait AdviceProvider {
    async fn advice(&self, symptom_text: &str) -> Result<String, ProviderError>;
}

// ═══════════════════════════════════════════
// Mock provider for tests
// ═══════════════════════════════════════════

/// Configurable advice provider — canned response or failure, with a
/// call counter.
pub struct MockAdviceProvider {
    behavior: MockBehavior,
    /// Yield once before answering, so a second action can interleave
    /// with the in-flight call in single-threaded tests.
    yield_first: bool,
    calls: AtomicUsize,
}

enum MockBehavior {
    Respond(String),
    Fail,
}

impl MockAdviceProvider {
    /// Always answers with the given text.
    pub fn respond(text: &str) -> Self {
        Self {
            behavior: MockBehavior::Respond(text.to_string()),
            yield_first: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with an HTTP 500.
    pub fn failing() -> Self {
        Self {
            behavior: MockBehavior::Fail,
            yield_first: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers with the given text after yielding to the scheduler once.
    pub fn respond_after_yield(text: &str) -> Self {
        Self {
            yield_first: true,
            ..Self::respond(text)
        }
    }

    /// How many advice requests this provider has received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AdviceProvider for MockAdviceProvider {
    async fn advice(&self, _symptom_text: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        match &self.behavior {
            MockBehavior::Respond(text) => Ok(text.clone()),
            MockBehavior::Fail => Err(ProviderError::Http {
                status: 500,
                body: "Internal Server Error".to_string(),
            }),
        }
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_configured_response() {
        let provider = MockAdviceProvider::respond("rest and fluids");
        let advice = provider.advice("fever").await.unwrap();
        assert_eq!(advice, "rest and fluids");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn mock_failure_is_a_provider_error() {
        let provider = MockAdviceProvider::failing();
        let err = provider.advice("fever").await.unwrap_err();
        assert!(matches!(err, ProviderError::Http { status: 500, .. }));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn mock_counts_every_call() {
        let provider = MockAdviceProvider::respond("ok");
        for _ in 0..3 {
            provider.advice("fever").await.unwrap();
        }
        assert_eq!(provider.calls(), 3);
    }

    #[test]
    fn provider_error_display() {
        let err = ProviderError::Http {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(
            err.to_string(),
            "Advice service returned HTTP 429: rate limited"
        );

        let err = ProviderError::Timeout(60);
        assert!(err.to_string().contains("60s"));
    }
}
