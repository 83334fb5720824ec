//! Per-session state: role, language, active tab, the symptom input
//! buffer, the busy flag gating advice requests, and the most-recent-value
//! caches behind the rendered views.
//!
//! `SessionState` uses interior mutability so the orchestrator can hand
//! out `&self` entry points while a submission is in flight. Nothing here
//! survives the session — there is no persistence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

// ═══════════════════════════════════════════
// Role / Tab
// ═══════════════════════════════════════════

/// Who is using the session. Informational — no logic branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Patient,
    Family,
    Doctor,
}

impl Role {
    /// Parse a user-supplied selector, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Some(Self::Patient),
            "family" => Some(Self::Family),
            "doctor" => Some(Self::Doctor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "Patient"),
            Self::Family => write!(f, "Family Member"),
            Self::Doctor => write!(f, "Doctor"),
        }
    }
}

/// Which view the user is looking at. Pure state — no timeline effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Symptoms,
    Reports,
    Opinion,
    Timeline,
}

impl Tab {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symptoms" => Some(Self::Symptoms),
            "reports" => Some(Self::Reports),
            "opinion" => Some(Self::Opinion),
            "timeline" => Some(Self::Timeline),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════
// SessionState
// ═══════════════════════════════════════════

/// Session-scoped mutable state, discarded on termination.
pub struct SessionState {
    /// In-flight symptom text. Cleared on every submission exit path.
    symptom_input: Mutex<String>,
    /// True while an advice request is outstanding. Gates new submissions.
    busy: AtomicBool,
    role: RwLock<Role>,
    language: RwLock<Language>,
    active_tab: RwLock<Tab>,
    /// Most-recent-value caches — written only right after the matching
    /// event append (or, for advice, on provider failure).
    last_advice: Mutex<Option<String>>,
    last_report: Mutex<Option<String>>,
    last_opinion: Mutex<Option<String>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            symptom_input: Mutex::new(String::new()),
            busy: AtomicBool::new(false),
            role: RwLock::new(Role::default()),
            language: RwLock::new(Language::default()),
            active_tab: RwLock::new(Tab::default()),
            last_advice: Mutex::new(None),
            last_report: Mutex::new(None),
            last_opinion: Mutex::new(None),
        }
    }

    // ── Symptom input buffer ────────────────────────────────

    pub fn set_symptom_input(&self, text: impl Into<String>) {
        if let Ok(mut input) = self.symptom_input.lock() {
            *input = text.into();
        }
    }

    pub fn symptom_input(&self) -> String {
        self.symptom_input
            .lock()
            .map(|input| input.clone())
            .unwrap_or_default()
    }

    // ── Busy gating ─────────────────────────────────────────

    /// Is an advice request outstanding?
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Try to enter the Submitting state. Returns a guard whose `Drop`
    /// restores Idle (busy cleared, input buffer reset) on every exit
    /// path, or `None` if a request is already outstanding.
    ///
    /// The compare-exchange keeps at most one advice call outstanding
    /// even under rapid repeated triggering.
    pub fn begin_submission(&self) -> Option<SubmissionGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(SubmissionGuard { session: self })
    }

    // ── Selectors ───────────────────────────────────────────

    pub fn role(&self) -> Role {
        self.role.read().map(|r| *r).unwrap_or_default()
    }

    pub fn set_role(&self, role: Role) {
        if let Ok(mut current) = self.role.write() {
            *current = role;
        }
    }

    pub fn language(&self) -> Language {
        self.language.read().map(|l| *l).unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) {
        if let Ok(mut current) = self.language.write() {
            *current = language;
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab.read().map(|t| *t).unwrap_or_default()
    }

    pub fn set_active_tab(&self, tab: Tab) {
        if let Ok(mut current) = self.active_tab.write() {
            *current = tab;
        }
    }

    // ── Most-recent-value caches ────────────────────────────

    pub fn last_advice(&self) -> Option<String> {
        self.last_advice.lock().map(|v| v.clone()).unwrap_or(None)
    }

    pub fn set_last_advice(&self, advice: impl Into<String>) {
        if let Ok(mut cache) = self.last_advice.lock() {
            *cache = Some(advice.into());
        }
    }

    pub fn last_report(&self) -> Option<String> {
        self.last_report.lock().map(|v| v.clone()).unwrap_or(None)
    }

    pub fn set_last_report(&self, report: impl Into<String>) {
        if let Ok(mut cache) = self.last_report.lock() {
            *cache = Some(report.into());
        }
    }

    pub fn last_opinion(&self) -> Option<String> {
        self.last_opinion.lock().map(|v| v.clone()).unwrap_or(None)
    }

    pub fn set_last_opinion(&self, opinion: impl Into<String>) {
        if let Ok(mut cache) = self.last_opinion.lock() {
            *cache = Some(opinion.into());
        }
    }

    /// Snapshot of everything the presentation layer renders from
    /// session state.
    pub fn view(&self) -> SessionView {
        SessionView {
            role: self.role(),
            language: self.language(),
            active_tab: self.active_tab(),
            busy: self.is_busy(),
            symptom_input: self.symptom_input(),
            last_advice: self.last_advice(),
            last_report: self.last_report(),
            last_opinion: self.last_opinion(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════
// SubmissionGuard — RAII Idle restoration
// ═══════════════════════════════════════════

/// RAII token for the Submitting state.
///
/// Dropping the guard clears the busy flag and resets the symptom input
/// buffer, so the session returns to Idle on success, failure, and any
/// early return alike.
pub struct SubmissionGuard<'a> {
    session: &'a SessionState,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.session.set_symptom_input("");
        self.session.busy.store(false, Ordering::Release);
    }
}

// ═══════════════════════════════════════════
// SessionView
// ═══════════════════════════════════════════

/// Read-only session snapshot for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub role: Role,
    pub language: Language,
    pub active_tab: Tab,
    pub busy: bool,
    pub symptom_input: String,
    pub last_advice: Option<String>,
    pub last_report: Option<String>,
    pub last_opinion: Option<String>,
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_defaults() {
        let session = SessionState::new();
        assert_eq!(session.role(), Role::Patient);
        assert_eq!(session.language(), Language::English);
        assert_eq!(session.active_tab(), Tab::Symptoms);
        assert!(!session.is_busy());
        assert!(session.symptom_input().is_empty());
        assert!(session.last_advice().is_none());
        assert!(session.last_report().is_none());
        assert!(session.last_opinion().is_none());
    }

    #[test]
    fn begin_submission_sets_busy_until_dropped() {
        let session = SessionState::new();
        session.set_symptom_input("fever");

        let guard = session.begin_submission().unwrap();
        assert!(session.is_busy());

        drop(guard);
        assert!(!session.is_busy());
        assert!(session.symptom_input().is_empty());
    }

    #[test]
    fn second_submission_rejected_while_busy() {
        let session = SessionState::new();
        let _guard = session.begin_submission().unwrap();
        assert!(session.begin_submission().is_none());
    }

    #[test]
    fn submission_can_restart_after_guard_drop() {
        let session = SessionState::new();
        drop(session.begin_submission().unwrap());
        assert!(session.begin_submission().is_some());
    }

    #[test]
    fn guard_clears_input_on_every_exit_path() {
        let session = SessionState::new();
        session.set_symptom_input("dizzy spells");

        // Simulates an early return while Submitting
        {
            let _guard = session.begin_submission().unwrap();
            assert_eq!(session.symptom_input(), "dizzy spells");
        }
        assert!(session.symptom_input().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn selectors_are_pure_state() {
        let session = SessionState::new();
        session.set_role(Role::Doctor);
        session.set_language(Language::Hindi);
        session.set_active_tab(Tab::Timeline);

        assert_eq!(session.role(), Role::Doctor);
        assert_eq!(session.language(), Language::Hindi);
        assert_eq!(session.active_tab(), Tab::Timeline);
    }

    #[test]
    fn caches_hold_most_recent_value() {
        let session = SessionState::new();
        session.set_last_advice("first");
        session.set_last_advice("second");
        assert_eq!(session.last_advice().as_deref(), Some("second"));

        session.set_last_report("report msg");
        session.set_last_opinion("opinion msg");
        assert_eq!(session.last_report().as_deref(), Some("report msg"));
        assert_eq!(session.last_opinion().as_deref(), Some("opinion msg"));
    }

    #[test]
    fn view_reflects_current_state() {
        let session = SessionState::new();
        session.set_symptom_input("cough");
        session.set_language(Language::Hindi);
        session.set_last_advice("rest");

        let view = session.view();
        assert_eq!(view.symptom_input, "cough");
        assert_eq!(view.language, Language::Hindi);
        assert_eq!(view.last_advice.as_deref(), Some("rest"));
        assert!(!view.busy);
    }

    #[test]
    fn role_parse_and_display() {
        assert_eq!(Role::parse("patient"), Some(Role::Patient));
        assert_eq!(Role::parse("Family"), Some(Role::Family));
        assert_eq!(Role::parse("DOCTOR"), Some(Role::Doctor));
        assert_eq!(Role::parse("nurse"), None);
        assert_eq!(Role::Family.to_string(), "Family Member");
    }

    #[test]
    fn tab_parse() {
        assert_eq!(Tab::parse("symptoms"), Some(Tab::Symptoms));
        assert_eq!(Tab::parse("Timeline"), Some(Tab::Timeline));
        assert_eq!(Tab::parse("settings"), None);
    }

    #[test]
    fn concurrent_readers_do_not_block() {
        use std::sync::Arc;
        use std::thread;

        let session = Arc::new(SessionState::new());
        let mut handles = vec![];
        for _ in 0..10 {
            let session = Arc::clone(&session);
            handles.push(thread::spawn(move || {
                assert_eq!(session.role(), Role::Patient);
                assert!(!session.is_busy());
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
