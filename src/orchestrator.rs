//! Coordinates session state, the advice provider, and the event log —
//! every user trigger lands here.
//!
//! Symptom submission is the one async path:
//!
//! ```text
//! Idle → Submitting → (Success | Failed) → Idle
//! ```
//!
//! Entry is guarded (non-empty input, not busy); both exits restore Idle
//! through the RAII `SubmissionGuard`, so the busy flag is cleared and the
//! input buffer reset no matter how the provider call ends. Report upload
//! and doctor opinion are synchronous and free to interleave with an
//! in-flight submission.

use serde::{Deserialize, Serialize};

use crate::advice::AdviceProvider;
use crate::events::{EventLog, HealthEvent};
use crate::i18n::{self, Language};
use crate::session::{Role, SessionState, SessionView, Tab};

// ═══════════════════════════════════════════
// Outcomes
// ═══════════════════════════════════════════

/// Typed result of a symptom submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Advice received and recorded on the timeline.
    Advised,
    /// Provider failed; the fallback warning is cached, nothing recorded.
    Failed,
    /// Guard refused the submission; no state changed.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    Busy,
}

/// Everything the presentation layer renders: session snapshot plus the
/// full ordered timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantView {
    pub session: SessionView,
    pub events: Vec<HealthEvent>,
}

// ═══════════════════════════════════════════
// Orchestrator
// ═══════════════════════════════════════════

/// Session-scoped coordinator. Owns the state and the log; generic over
/// the advice provider so tests inject a mock through the trait seam.
pub struct Orchestrator<P: AdviceProvider> {
    provider: P,
    session: SessionState,
    log: EventLog,
}

impl<P: AdviceProvider> Orchestrator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            session: SessionState::new(),
            log: EventLog::new(),
        }
    }

    /// Session state, for input-buffer edits and rendering.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // ── Symptom submission ──────────────────────────────────

    /// Submit the buffered symptom text to the advice provider.
    ///
    /// Rejected (no event, no state change) when the trimmed buffer is
    /// empty or a request is already outstanding — rejected, not queued.
    /// On success the exchange lands on the timeline and `last_advice`
    /// caches the returned text. On provider failure `last_advice` holds
    /// the fixed warning and the timeline is untouched: it records only
    /// completed advice exchanges, so a failed consultation leaves no
    /// trace there.
    pub async fn submit_symptom(&self) -> SubmitOutcome {
        let symptoms = self.session.symptom_input().trim().to_string();
        if symptoms.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyInput);
        }
        let Some(_guard) = self.session.begin_submission() else {
            return SubmitOutcome::Rejected(RejectReason::Busy);
        };

        match self.provider.advice(&symptoms).await {
            Ok(advice) => {
                self.log.append(HealthEvent::symptom(symptoms, advice.clone()));
                self.session.set_last_advice(advice);
                SubmitOutcome::Advised
            }
            Err(e) => {
                tracing::warn!(error = %e, "Advice request failed");
                self.session.set_last_advice(i18n::ADVICE_UNAVAILABLE);
                SubmitOutcome::Failed
            }
        }
        // _guard drops here: busy cleared, input buffer reset
    }

    // ── Report upload ───────────────────────────────────────

    /// Record a report upload from a selected file's name.
    ///
    /// Only the name is used — file contents are never read. A cancelled
    /// selection (`None`) is not an error; the template embeds a literal
    /// "undefined" placeholder, as the upload field reports it. Returns
    /// the rendered message.
    pub fn upload_report(&self, file_name: Option<&str>) -> String {
        let name = file_name.unwrap_or("undefined");
        let message = (i18n::phrases(self.session.language()).report_uploaded)(name);
        self.log.append(HealthEvent::report(message.clone()));
        self.session.set_last_report(message.clone());
        message
    }

    // ── Doctor opinion ──────────────────────────────────────

    /// Record a doctor's-opinion event. Returns the rendered message.
    pub fn request_doctor_opinion(&self) -> String {
        let message = (i18n::phrases(self.session.language()).doctor_opinion)();
        self.log.append(HealthEvent::doctor_opinion(message.clone()));
        self.session.set_last_opinion(message.clone());
        message
    }

    // ── Pure state setters (no timeline effect) ─────────────

    pub fn set_role(&self, role: Role) {
        self.session.set_role(role);
    }

    pub fn set_language(&self, language: Language) {
        self.session.set_language(language);
    }

    pub fn set_active_tab(&self, tab: Tab) {
        self.session.set_active_tab(tab);
    }

    // ── Rendered outputs ────────────────────────────────────

    /// Ordered timeline snapshot.
    pub fn timeline(&self) -> Vec<HealthEvent> {
        self.log.snapshot()
    }

    /// True while no health records exist yet.
    pub fn timeline_is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Full render snapshot: session state plus the timeline.
    pub fn view(&self) -> AssistantView {
        AssistantView {
            session: self.session.view(),
            events: self.log.snapshot(),
        }
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
