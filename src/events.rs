//! Event System
//!
//! Events published by the dashboard loader and displayed in the activity log

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

/// Which part of the console produced an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// The workspace list fetch.
    Workspaces,
    /// The cost data fetch.
    Costs,
    /// Route changes.
    Navigation,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

/// Sends events to whoever renders the activity log.
///
/// Events are mirrored to the `log` facade so they also reach any installed logger.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let level: log::Level = event.log_level.into();
        log::log!(
            target: "tre_console::events",
            level,
            "{}: {}",
            event.source,
            event.msg
        );
        // A closed receiver means the UI is gone; nothing left to inform.
        let _ = self.sender.send(event).await;
    }

    pub async fn send_workspaces_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::new(Source::Workspaces, message, event_type, log_level))
            .await;
    }

    pub async fn send_costs_event(&self, message: String, event_type: EventType, log_level: LogLevel) {
        self.send_event(Event::new(Source::Costs, message, event_type, log_level))
            .await;
    }

    /// Non-blocking variant for callers outside an async context (the UI loop).
    pub fn try_send_navigation_event(&self, message: String) {
        let event = Event::new(
            Source::Navigation,
            message,
            EventType::Refresh,
            LogLevel::Info,
        );
        let _ = self.sender.try_send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source_and_message() {
        let event = Event::new(
            Source::Costs,
            "Loaded 3 cost records".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        let rendered = event.to_string();
        assert!(rendered.starts_with("Success ["));
        assert!(rendered.ends_with("Costs: Loaded 3 cost records"));
    }

    #[test]
    fn test_warnings_are_always_displayed() {
        let event = Event::new(
            Source::Workspaces,
            "Failed".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        assert!(event.should_display());
    }

    #[tokio::test]
    async fn test_sender_delivers_events_in_order() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        sender
            .send_workspaces_event("first".to_string(), EventType::Refresh, LogLevel::Info)
            .await;
        sender
            .send_costs_event("second".to_string(), EventType::Success, LogLevel::Info)
            .await;

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.source, Source::Workspaces);
        assert_eq!(second.source, Source::Costs);
        assert_eq!(second.msg, "second");
    }

    #[tokio::test]
    async fn test_sender_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        sender
            .send_costs_event("dropped".to_string(), EventType::Error, LogLevel::Warn)
            .await;
        sender.try_send_navigation_event("dropped too".to_string());
    }
}
