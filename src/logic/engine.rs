use crate::models::{DecisionKind, IrrigationDecision, SensorReading};

pub const MOISTURE_LOW: f64 = 30.0;
pub const MOISTURE_MEDIUM: f64 = 50.0;
pub const MOISTURE_HIGH: f64 = 70.0;
pub const TEMP_LOW: f64 = 15.0;
pub const TEMP_HIGH: f64 = 30.0;
pub const RAINFALL_THRESHOLD: f64 = 5.0;

/// Evaluate one sensor reading against the irrigation rule cascade.
///
/// Rules are checked in order and the first match wins. Recent rainfall
/// above the threshold vetoes irrigation outright, before any moisture
/// check. The function is pure and total: it accepts any f64 inputs and
/// performs no range validation.
pub fn decide(reading: &SensorReading) -> IrrigationDecision {
    if reading.rainfall > RAINFALL_THRESHOLD {
        return IrrigationDecision::new(
            DecisionKind::DoNotIrrigate,
            format!(
                "Recent rainfall of {:.1}mm exceeds threshold ({:.1}mm)",
                reading.rainfall, RAINFALL_THRESHOLD
            ),
            0.0,
        );
    }

    let moisture = reading.soil_moisture;
    let temp = reading.temperature;

    let (kind, reason, mut amount): (DecisionKind, String, f64) = if moisture < MOISTURE_LOW {
        let base = format!(
            "Soil moisture critically low at {:.1}% (below {:.1}%)",
            moisture, MOISTURE_LOW
        );
        if temp > TEMP_HIGH {
            (
                DecisionKind::IrrigateImmediately,
                format!("{} and high temperature", base),
                80.0,
            )
        } else if temp < TEMP_LOW {
            (
                DecisionKind::IrrigateImmediately,
                format!("{} with low temperature", base),
                50.0,
            )
        } else {
            (DecisionKind::IrrigateImmediately, base, 65.0)
        }
    } else if moisture < MOISTURE_MEDIUM {
        let base = format!(
            "Soil moisture low at {:.1}% (below {:.1}%)",
            moisture, MOISTURE_MEDIUM
        );
        if temp > TEMP_HIGH {
            (
                DecisionKind::IrrigateSoon,
                format!("{} with high temperature", base),
                60.0,
            )
        } else {
            (DecisionKind::IrrigateSoon, base, 40.0)
        }
    } else if moisture < MOISTURE_HIGH {
        (
            DecisionKind::Monitor,
            format!(
                "Soil moisture adequate at {:.1}% (between {:.1}% and {:.1}%)",
                moisture, MOISTURE_MEDIUM, MOISTURE_HIGH
            ),
            0.0,
        )
    } else {
        (
            DecisionKind::DoNotIrrigate,
            format!(
                "Soil moisture high at {:.1}% (above {:.1}%)",
                moisture, MOISTURE_HIGH
            ),
            0.0,
        )
    };

    // The hot-weather multiplier stacks on top of the branch bases,
    // including the 80.0 hot branch above (80 -> 96). Do not fold the
    // two adjustments together; callers depend on the compounded values.
    if amount > 0.0 && temp > TEMP_HIGH {
        amount = (amount * 1.2).min(100.0);
    }

    IrrigationDecision::new(kind, reason, amount)
}
