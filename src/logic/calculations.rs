use crate::models::{SensorReading, Trend};
use serde::{Deserialize, Serialize};

/// Calculate average air temperature over a period
pub fn average_temperature(readings: &[SensorReading]) -> Option<f64> {
    average(readings.iter().map(|r| r.temperature))
}

/// Calculate average soil moisture over a period
pub fn average_soil_moisture(readings: &[SensorReading]) -> Option<f64> {
    average(readings.iter().map(|r| r.soil_moisture))
}

/// Calculate average relative humidity over a period
pub fn average_humidity(readings: &[SensorReading]) -> Option<f64> {
    average(readings.iter().map(|r| r.humidity))
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Calculate total rainfall over a period, ignoring negative sensor glitches
pub fn total_rainfall(readings: &[SensorReading]) -> f64 {
    readings
        .iter()
        .map(|r| r.rainfall)
        .filter(|mm| *mm >= 0.0)
        .sum()
}

/// Direction of soil moisture over a series ordered oldest to newest.
/// Compares the mean of the first half with the mean of the second half;
/// a shift of more than 2 percentage points counts as a trend.
pub fn moisture_trend(readings: &[SensorReading]) -> Trend {
    if readings.len() < 4 {
        return Trend::Unknown;
    }

    let mid = readings.len() / 2;
    let early = average_soil_moisture(&readings[..mid]);
    let late = average_soil_moisture(&readings[mid..]);

    match (early, late) {
        (Some(e), Some(l)) if l - e > 2.0 => Trend::Rising,
        (Some(e), Some(l)) if e - l > 2.0 => Trend::Falling,
        (Some(_), Some(_)) => Trend::Stable,
        _ => Trend::Unknown,
    }
}

/// Aggregate view of a reading series for reports and JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub avg_temperature: Option<f64>,
    pub avg_soil_moisture: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub total_rainfall_mm: f64,
    pub moisture_trend: Trend,
}

pub fn summarize(readings: &[SensorReading]) -> SeriesSummary {
    SeriesSummary {
        avg_temperature: average_temperature(readings),
        avg_soil_moisture: average_soil_moisture(readings),
        avg_humidity: average_humidity(readings),
        total_rainfall_mm: total_rainfall(readings),
        moisture_trend: moisture_trend(readings),
    }
}
