//! Health events and the append-only EventLog — the single source of truth
//! for the timeline view.
//!
//! Events are created exclusively by the orchestrator when a user action
//! completes, never mutated afterwards, and never removed. Ordering is the
//! insertion sequence; the timestamp on each event is display-only.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

// ═══════════════════════════════════════════
// Event types
// ═══════════════════════════════════════════

/// What kind of user action an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Symptom,
    Report,
    DoctorOpinion,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symptom => write!(f, "Symptom"),
            Self::Report => write!(f, "Report"),
            Self::DoctorOpinion => write!(f, "Doctor Opinion"),
        }
    }
}

/// One immutable record of a completed user action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEvent {
    pub id: Uuid,
    pub kind: EventKind,
    /// Primary display text: symptom description, report summary,
    /// or opinion text.
    pub value: String,
    /// AI-generated guidance. Present only for Symptom events.
    pub advice: Option<String>,
    /// When the event was recorded (display only — ordering is by
    /// insertion sequence).
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

impl HealthEvent {
    /// A completed symptom consultation: the user's description plus the
    /// advice the provider returned.
    pub fn symptom(value: impl Into<String>, advice: impl Into<String>) -> Self {
        Self::new(EventKind::Symptom, value.into(), Some(advice.into()))
    }

    /// A report-upload summary message.
    pub fn report(value: impl Into<String>) -> Self {
        Self::new(EventKind::Report, value.into(), None)
    }

    /// A doctor's-opinion message.
    pub fn doctor_opinion(value: impl Into<String>) -> Self {
        Self::new(EventKind::DoctorOpinion, value.into(), None)
    }

    fn new(kind: EventKind, value: String, advice: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            value,
            advice,
            recorded_at: chrono::Utc::now(),
        }
    }
}

// ═══════════════════════════════════════════
// EventLog
// ═══════════════════════════════════════════

/// Append-only, insertion-ordered event log.
///
/// Interior Mutex so that synchronous actions (report upload, doctor
/// opinion) can append while a symptom submission is awaiting the advice
/// provider. `append` never fails and `snapshot` reflects the log at read
/// time — the log may grow after a snapshot is taken.
pub struct EventLog {
    entries: Mutex<Vec<HealthEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append an event, preserving insertion order. O(1) amortized.
    pub fn append(&self, event: HealthEvent) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(event);
        }
    }

    /// Ordered read-only snapshot of all events.
    pub fn snapshot(&self) -> Vec<HealthEvent> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// True while no health records exist yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_log_is_empty() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let log = EventLog::new();
        log.append(HealthEvent::symptom("fever", "rest and fluids"));
        log.append(HealthEvent::report("Report a.pdf uploaded."));
        log.append(HealthEvent::doctor_opinion("Monitor blood pressure."));

        let events = log.snapshot();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Symptom);
        assert_eq!(events[1].kind, EventKind::Report);
        assert_eq!(events[2].kind, EventKind::DoctorOpinion);
    }

    #[test]
    fn only_symptom_events_carry_advice() {
        let symptom = HealthEvent::symptom("cough", "likely viral");
        let report = HealthEvent::report("Report x.png uploaded.");
        let opinion = HealthEvent::doctor_opinion("Send updates.");

        assert_eq!(symptom.advice.as_deref(), Some("likely viral"));
        assert!(report.advice.is_none());
        assert!(opinion.advice.is_none());
    }

    #[test]
    fn snapshot_is_stable_without_intervening_appends() {
        let log = EventLog::new();
        log.append(HealthEvent::symptom("headache", "hydrate"));
        log.append(HealthEvent::doctor_opinion("Rest."));

        let first = log.snapshot();
        let second = log.snapshot();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.value, b.value);
        }
    }

    #[test]
    fn snapshot_does_not_observe_later_appends() {
        let log = EventLog::new();
        log.append(HealthEvent::report("Report one.pdf uploaded."));
        let snapshot = log.snapshot();

        log.append(HealthEvent::report("Report two.pdf uploaded."));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn appends_from_multiple_threads_all_land() {
        use std::sync::Arc;
        use std::thread;

        let log = Arc::new(EventLog::new());
        let mut handles = vec![];
        for i in 0..8 {
            let log = Arc::clone(&log);
            handles.push(thread::spawn(move || {
                log.append(HealthEvent::report(format!("Report {i}.pdf uploaded.")));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 8);
    }

    #[test]
    fn event_kind_display_matches_timeline_labels() {
        assert_eq!(EventKind::Symptom.to_string(), "Symptom");
        assert_eq!(EventKind::Report.to_string(), "Report");
        assert_eq!(EventKind::DoctorOpinion.to_string(), "Doctor Opinion");
    }

    #[test]
    fn events_serialize_for_the_frontend() {
        let event = HealthEvent::symptom("fever and cough", "Likely viral.");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"Symptom\""));
        assert!(json.contains("fever and cough"));
        assert!(json.contains("Likely viral."));
    }
}
