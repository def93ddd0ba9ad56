use serde::{Deserialize, Serialize};

/// Categorical irrigation recommendation, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DecisionKind {
    DoNotIrrigate,
    Monitor,
    IrrigateSoon,
    IrrigateImmediately,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::DoNotIrrigate => "Do Not Irrigate",
            DecisionKind::Monitor => "Monitor",
            DecisionKind::IrrigateSoon => "Irrigate Soon",
            DecisionKind::IrrigateImmediately => "Irrigate Immediately",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace([' ', '-'], "").as_str() {
            "donotirrigate" => Some(DecisionKind::DoNotIrrigate),
            "monitor" => Some(DecisionKind::Monitor),
            "irrigatesoon" => Some(DecisionKind::IrrigateSoon),
            "irrigateimmediately" => Some(DecisionKind::IrrigateImmediately),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DecisionKind::DoNotIrrigate => "✗",
            DecisionKind::Monitor => "→",
            DecisionKind::IrrigateSoon => "⚠",
            DecisionKind::IrrigateImmediately => "!",
        }
    }
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of evaluating one sensor reading: the recommendation, a
/// human-readable justification, and a 0-100 irrigation intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationDecision {
    pub kind: DecisionKind,
    pub reason: String,
    pub amount: f64,
}

impl IrrigationDecision {
    pub fn new(kind: DecisionKind, reason: impl Into<String>, amount: f64) -> Self {
        Self {
            kind,
            reason: reason.into(),
            amount,
        }
    }

    /// Amount as a 0.0-1.0 fraction, suitable for progress displays.
    pub fn progress_fraction(&self) -> f64 {
        self.amount / 100.0
    }

    pub fn calls_for_water(&self) -> bool {
        matches!(
            self.kind,
            DecisionKind::IrrigateSoon | DecisionKind::IrrigateImmediately
        )
    }
}

impl std::fmt::Display for IrrigationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.1}%): {}",
            self.kind.as_str(),
            self.amount,
            self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_orders_by_urgency() {
        assert!(DecisionKind::DoNotIrrigate < DecisionKind::Monitor);
        assert!(DecisionKind::Monitor < DecisionKind::IrrigateSoon);
        assert!(DecisionKind::IrrigateSoon < DecisionKind::IrrigateImmediately);
    }

    #[test]
    fn kind_round_trips_through_labels() {
        for kind in [
            DecisionKind::DoNotIrrigate,
            DecisionKind::Monitor,
            DecisionKind::IrrigateSoon,
            DecisionKind::IrrigateImmediately,
        ] {
            assert_eq!(DecisionKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(DecisionKind::from_str("water everything"), None);
    }

    #[test]
    fn progress_fraction_scales_amount() {
        let decision =
            IrrigationDecision::new(DecisionKind::IrrigateImmediately, "dry soil", 96.0);
        assert!((decision.progress_fraction() - 0.96).abs() < 1e-9);
        assert!(decision.calls_for_water());

        let idle = IrrigationDecision::new(DecisionKind::Monitor, "adequate", 0.0);
        assert!((idle.progress_fraction()).abs() < 1e-9);
        assert!(!idle.calls_for_water());
    }
}
