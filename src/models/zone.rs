use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An irrigation zone: numeric id plus a descriptive label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub label: String,
}

impl Zone {
    pub fn new(id: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Short form of the label, e.g. "Zone 1" from "Zone 1 - North Field".
    pub fn short_name(&self) -> &str {
        self.label.split(" - ").next().unwrap_or(&self.label)
    }

    pub fn defaults() -> Vec<Zone> {
        vec![
            Zone::new(1, "Zone 1 - North Field"),
            Zone::new(2, "Zone 2 - South Field"),
            Zone::new(3, "Zone 3 - East Garden"),
            Zone::new(4, "Zone 4 - West Orchard"),
        ]
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventAction {
    Start,
    Complete,
    Stop,
    Error,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::Start => "Start",
            EventAction::Complete => "Complete",
            EventAction::Stop => "Stop",
            EventAction::Error => "Error",
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in the irrigation event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationEvent {
    pub timestamp: DateTime<Utc>,
    pub zone: String,
    pub action: EventAction,
    pub details: String,
}

impl IrrigationEvent {
    pub fn new(zone: impl Into<String>, action: EventAction, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            zone: zone.into(),
            action,
            details: details.into(),
        }
    }
}

impl std::fmt::Display for IrrigationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.zone,
            self.action,
            self.details
        )
    }
}

/// Newest-first log of irrigation events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<IrrigationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: IrrigationEvent) {
        self.events.insert(0, event);
    }

    pub fn latest(&self) -> Option<&IrrigationEvent> {
        self.events.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IrrigationEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_short_name_strips_description() {
        let zone = Zone::new(1, "Zone 1 - North Field");
        assert_eq!(zone.short_name(), "Zone 1");

        let plain = Zone::new(9, "Greenhouse");
        assert_eq!(plain.short_name(), "Greenhouse");
    }

    #[test]
    fn default_zones() {
        let zones = Zone::defaults();
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].id, 1);
        assert_eq!(zones[3].label, "Zone 4 - West Orchard");
    }

    #[test]
    fn event_log_is_newest_first() {
        let mut log = EventLog::new();
        log.record(IrrigationEvent::new(
            "Zone 1",
            EventAction::Start,
            "50 L/min, 15 min",
        ));
        log.record(IrrigationEvent::new(
            "Zone 1",
            EventAction::Stop,
            "Manually stopped",
        ));

        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().unwrap().action, EventAction::Stop);
        assert_eq!(log.iter().last().unwrap().action, EventAction::Start);
    }

    #[test]
    fn event_display_includes_zone_and_details() {
        let event = IrrigationEvent::new("Zone 2", EventAction::Complete, "Full cycle completed");
        let text = event.to_string();
        assert!(text.contains("Zone 2"));
        assert!(text.contains("Complete"));
        assert!(text.contains("Full cycle completed"));
    }
}
