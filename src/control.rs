use crate::error::{FieldOpsError, Result};
use crate::models::{EventAction, EventLog, IrrigationEvent, Zone};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const FLOW_MIN_LPM: u32 = 10;
pub const FLOW_MAX_LPM: u32 = 100;
pub const DURATION_MIN_MINUTES: u32 = 1;
pub const DURATION_MAX_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemMode {
    Auto,
    Manual,
}

impl SystemMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemMode::Auto => "Auto",
            SystemMode::Manual => "Manual",
        }
    }
}

impl std::fmt::Display for SystemMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A countdown-timed watering of one zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationRun {
    pub zone: Zone,
    pub flow_lpm: u32,
    pub duration_min: u32,
    remaining_secs: u32,
}

impl IrrigationRun {
    fn new(zone: Zone, flow_lpm: u32, duration_min: u32) -> Self {
        Self {
            zone,
            flow_lpm,
            duration_min,
            remaining_secs: duration_min * 60,
        }
    }

    pub fn total_secs(&self) -> u32 {
        self.duration_min * 60
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Fraction of the cycle completed, 0.0 at start to 1.0 when done.
    pub fn progress(&self) -> f64 {
        1.0 - self.remaining_secs as f64 / self.total_secs() as f64
    }

    /// Remaining time as MM:SS.
    pub fn remaining_display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

/// Owns the system mode, the active run (at most one), and the event
/// log. Auto mode hands control to the (external) scheduler and rejects
/// manual starts; it never starts runs of its own here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationController {
    mode: SystemMode,
    active: Option<IrrigationRun>,
    events: EventLog,
}

impl IrrigationController {
    pub fn new() -> Self {
        Self {
            mode: SystemMode::Manual,
            active: None,
            events: EventLog::new(),
        }
    }

    pub fn mode(&self) -> SystemMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SystemMode) {
        self.mode = mode;
    }

    pub fn active(&self) -> Option<&IrrigationRun> {
        self.active.as_ref()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn status(&self) -> &'static str {
        if self.active.is_some() {
            "Irrigation Active"
        } else {
            match self.mode {
                SystemMode::Manual => "Manual Mode Active",
                SystemMode::Auto => "Auto Mode - System Managed",
            }
        }
    }

    /// Start a manual run. Flow and duration are clamped to the valve's
    /// supported ranges.
    pub fn start(&mut self, zone: Zone, flow_lpm: u32, duration_min: u32) -> Result<()> {
        if self.mode == SystemMode::Auto {
            self.events.record(IrrigationEvent::new(
                zone.short_name(),
                EventAction::Error,
                "Start rejected - Auto Mode",
            ));
            return Err(FieldOpsError::InvalidData(
                "cannot start a manual run in Auto mode".into(),
            ));
        }
        if self.active.is_some() {
            self.events.record(IrrigationEvent::new(
                zone.short_name(),
                EventAction::Error,
                "Start rejected - run already active",
            ));
            return Err(FieldOpsError::InvalidData(
                "an irrigation run is already active".into(),
            ));
        }

        let flow_lpm = flow_lpm.clamp(FLOW_MIN_LPM, FLOW_MAX_LPM);
        let duration_min = duration_min.clamp(DURATION_MIN_MINUTES, DURATION_MAX_MINUTES);

        info!(
            zone = %zone.label,
            flow_lpm,
            duration_min,
            "starting irrigation run"
        );
        self.events.record(IrrigationEvent::new(
            zone.short_name(),
            EventAction::Start,
            format!("{} L/min, {} min", flow_lpm, duration_min),
        ));
        self.active = Some(IrrigationRun::new(zone, flow_lpm, duration_min));
        Ok(())
    }

    /// Advance the active run by `elapsed_secs`. Completes the run and
    /// logs it once the countdown reaches zero; a no-op when idle.
    pub fn tick(&mut self, elapsed_secs: u32) {
        let Some(run) = self.active.as_mut() else {
            return;
        };

        run.remaining_secs = run.remaining_secs.saturating_sub(elapsed_secs);
        if run.remaining_secs == 0 {
            let zone = run.zone.short_name().to_string();
            info!(zone = %zone, "irrigation run complete");
            self.events.record(IrrigationEvent::new(
                zone,
                EventAction::Complete,
                "Full cycle completed",
            ));
            self.active = None;
        }
    }

    /// Stop the active run before its cycle finishes.
    pub fn stop(&mut self) -> Result<()> {
        let Some(run) = self.active.take() else {
            return Err(FieldOpsError::NotFound("no active irrigation run".into()));
        };

        let zone = run.zone.short_name().to_string();
        info!(zone = %zone, remaining = run.remaining_secs, "irrigation run stopped");
        self.events.record(IrrigationEvent::new(
            zone,
            EventAction::Stop,
            "Manually stopped",
        ));
        Ok(())
    }

    pub fn progress(&self) -> f64 {
        self.active.as_ref().map(|r| r.progress()).unwrap_or(0.0)
    }

    pub fn remaining_display(&self) -> String {
        match &self.active {
            Some(run) => run.remaining_display(),
            None => "00:00".to_string(),
        }
    }
}

impl Default for IrrigationController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> Zone {
        Zone::new(1, "Zone 1 - North Field")
    }

    #[test]
    fn auto_mode_rejects_manual_starts() {
        let mut ctl = IrrigationController::new();
        ctl.set_mode(SystemMode::Auto);
        assert_eq!(ctl.status(), "Auto Mode - System Managed");

        let err = ctl.start(zone(), 50, 15).unwrap_err();
        assert!(matches!(err, FieldOpsError::InvalidData(_)));
        assert!(ctl.active().is_none());

        let event = ctl.events().latest().unwrap();
        assert_eq!(event.action, EventAction::Error);
        assert_eq!(event.zone, "Zone 1");
        assert_eq!(event.details, "Start rejected - Auto Mode");
    }

    #[test]
    fn start_logs_event_and_activates() {
        let mut ctl = IrrigationController::new();
        assert_eq!(ctl.status(), "Manual Mode Active");

        ctl.start(zone(), 50, 15).unwrap();
        assert_eq!(ctl.status(), "Irrigation Active");

        let run = ctl.active().unwrap();
        assert_eq!(run.remaining_secs(), 900);
        assert_eq!(run.remaining_display(), "15:00");
        assert!(ctl.progress().abs() < f64::EPSILON);

        let event = ctl.events().latest().unwrap();
        assert_eq!(event.action, EventAction::Start);
        assert_eq!(event.zone, "Zone 1");
        assert_eq!(event.details, "50 L/min, 15 min");
    }

    #[test]
    fn second_start_is_rejected_while_active() {
        let mut ctl = IrrigationController::new();
        ctl.start(zone(), 50, 15).unwrap();
        assert!(ctl.start(Zone::new(2, "Zone 2 - South Field"), 30, 5).is_err());

        // The rejection is logged against the zone that asked for water;
        // the original run keeps going.
        let event = ctl.events().latest().unwrap();
        assert_eq!(event.action, EventAction::Error);
        assert_eq!(event.zone, "Zone 2");
        assert_eq!(event.details, "Start rejected - run already active");
        assert!(ctl.active().is_some());
    }

    #[test]
    fn flow_and_duration_clamp_to_valve_ranges() {
        let mut ctl = IrrigationController::new();
        ctl.start(zone(), 500, 90).unwrap();
        let run = ctl.active().unwrap();
        assert_eq!(run.flow_lpm, FLOW_MAX_LPM);
        assert_eq!(run.duration_min, DURATION_MAX_MINUTES);

        ctl.stop().unwrap();
        ctl.start(zone(), 0, 0).unwrap();
        let run = ctl.active().unwrap();
        assert_eq!(run.flow_lpm, FLOW_MIN_LPM);
        assert_eq!(run.duration_min, DURATION_MIN_MINUTES);
    }

    #[test]
    fn tick_counts_down_and_completes() {
        let mut ctl = IrrigationController::new();
        ctl.start(zone(), 50, 1).unwrap();

        ctl.tick(30);
        let run = ctl.active().unwrap();
        assert_eq!(run.remaining_secs(), 30);
        assert!((ctl.progress() - 0.5).abs() < 1e-9);
        assert_eq!(ctl.remaining_display(), "00:30");

        ctl.tick(30);
        assert!(ctl.active().is_none());
        assert_eq!(ctl.remaining_display(), "00:00");

        let event = ctl.events().latest().unwrap();
        assert_eq!(event.action, EventAction::Complete);
        assert_eq!(event.details, "Full cycle completed");
    }

    #[test]
    fn progress_is_monotone_over_ticks() {
        let mut ctl = IrrigationController::new();
        ctl.start(zone(), 50, 2).unwrap();
        let mut last = ctl.progress();
        while ctl.active().is_some() {
            ctl.tick(10);
            let p = ctl.progress();
            if ctl.active().is_some() {
                assert!(p >= last);
                last = p;
            }
        }
    }

    #[test]
    fn overshooting_tick_still_completes_cleanly() {
        let mut ctl = IrrigationController::new();
        ctl.start(zone(), 50, 1).unwrap();
        ctl.tick(10_000);
        assert!(ctl.active().is_none());
        assert_eq!(ctl.events().latest().unwrap().action, EventAction::Complete);
    }

    #[test]
    fn manual_stop_logs_stop_event() {
        let mut ctl = IrrigationController::new();
        ctl.start(zone(), 50, 15).unwrap();
        ctl.tick(60);
        ctl.stop().unwrap();

        assert!(ctl.active().is_none());
        let event = ctl.events().latest().unwrap();
        assert_eq!(event.action, EventAction::Stop);
        assert_eq!(event.details, "Manually stopped");
    }

    #[test]
    fn stop_without_active_run_is_not_found() {
        let mut ctl = IrrigationController::new();
        assert!(matches!(
            ctl.stop().unwrap_err(),
            FieldOpsError::NotFound(_)
        ));
    }

    #[test]
    fn tick_is_noop_when_idle() {
        let mut ctl = IrrigationController::new();
        ctl.tick(60);
        assert!(ctl.events().is_empty());
        assert!(ctl.progress().abs() < f64::EPSILON);
    }
}
