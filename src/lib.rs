//! Arogya — personal health-tracking assistant.
//!
//! Free-text symptoms are sent to a remote chat-completion service for
//! guidance; report uploads and doctor opinions are captured as events;
//! everything lands on one append-only health timeline. The presentation
//! layer is external — this crate exposes the orchestrated core plus a
//! minimal CLI binary that stands in for it.

pub mod advice;
pub mod config;
pub mod events;
pub mod i18n;
pub mod orchestrator;
pub mod session;
