use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot of environmental sensor values for a field location.
/// Readings are built once (by the simulator or a caller) and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    /// Air temperature in °C
    pub temperature: f64,
    /// Volumetric soil moisture, 0-100%
    pub soil_moisture: f64,
    /// Relative humidity, 0-100%
    pub humidity: f64,
    /// Recent rainfall in mm
    pub rainfall: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Light intensity in lux
    pub light_intensity: f64,
    pub location: String,
}

impl SensorReading {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            temperature: 24.0,
            soil_moisture: 42.0,
            humidity: 65.0,
            rainfall: 0.0,
            wind_speed: 12.0,
            light_intensity: 8500.0,
            location: location.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = celsius;
        self
    }

    pub fn with_soil_moisture(mut self, percent: f64) -> Self {
        self.soil_moisture = percent;
        self
    }

    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = percent;
        self
    }

    pub fn with_rainfall(mut self, mm: f64) -> Self {
        self.rainfall = mm;
        self
    }

    pub fn with_wind_speed(mut self, kmh: f64) -> Self {
        self.wind_speed = kmh;
        self
    }

    pub fn with_light_intensity(mut self, lux: f64) -> Self {
        self.light_intensity = lux;
        self
    }

    pub fn moisture_status(&self) -> MoistureStatus {
        MoistureStatus::classify(self.soil_moisture)
    }
}

impl std::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reading at {}: {:.1}°C, {:.1}% moisture",
            self.timestamp.format("%H:%M:%S"),
            self.temperature,
            self.soil_moisture
        )
    }
}

/// Soil moisture status bands used for at-a-glance reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoistureStatus {
    CriticalDry,
    Low,
    Optimal,
    High,
    Excessive,
}

impl MoistureStatus {
    pub fn classify(moisture: f64) -> Self {
        if moisture < 30.0 {
            MoistureStatus::CriticalDry
        } else if moisture < 45.0 {
            MoistureStatus::Low
        } else if moisture <= 65.0 {
            MoistureStatus::Optimal
        } else if moisture <= 80.0 {
            MoistureStatus::High
        } else {
            MoistureStatus::Excessive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureStatus::CriticalDry => "Critical - Extremely Dry",
            MoistureStatus::Low => "Warning - Low Moisture",
            MoistureStatus::Optimal => "Optimal Moisture Level",
            MoistureStatus::High => "High Moisture Level",
            MoistureStatus::Excessive => "Warning - Excessive Moisture",
        }
    }
}

impl std::fmt::Display for MoistureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a measured series over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "↑ Rising",
            Trend::Falling => "↓ Falling",
            Trend::Stable => "→ Stable",
            Trend::Unknown => "? Unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// In-memory log of recent readings, newest first, capped at 10 entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingLog {
    entries: Vec<SensorReading>,
}

impl ReadingLog {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reading: SensorReading) {
        self.entries.insert(0, reading);
        self.entries.truncate(Self::CAPACITY);
    }

    pub fn latest(&self) -> Option<&SensorReading> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SensorReading> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moisture_band_edges() {
        assert_eq!(MoistureStatus::classify(29.9), MoistureStatus::CriticalDry);
        assert_eq!(MoistureStatus::classify(30.0), MoistureStatus::Low);
        assert_eq!(MoistureStatus::classify(44.9), MoistureStatus::Low);
        assert_eq!(MoistureStatus::classify(45.0), MoistureStatus::Optimal);
        assert_eq!(MoistureStatus::classify(65.0), MoistureStatus::Optimal);
        assert_eq!(MoistureStatus::classify(65.1), MoistureStatus::High);
        assert_eq!(MoistureStatus::classify(80.0), MoistureStatus::High);
        assert_eq!(MoistureStatus::classify(80.1), MoistureStatus::Excessive);
    }

    #[test]
    fn moisture_status_display() {
        assert_eq!(
            MoistureStatus::CriticalDry.as_str(),
            "Critical - Extremely Dry"
        );
        assert_eq!(MoistureStatus::Optimal.as_str(), "Optimal Moisture Level");
        assert!(MoistureStatus::Excessive.as_str().contains("Excessive"));
    }

    #[test]
    fn reading_display_format() {
        let ts = "2026-08-30T14:03:22Z".parse::<DateTime<Utc>>().unwrap();
        let reading = SensorReading::new("Field A - North")
            .with_timestamp(ts)
            .with_temperature(24.0)
            .with_soil_moisture(42.0);
        assert_eq!(
            reading.to_string(),
            "Reading at 14:03:22: 24.0°C, 42.0% moisture"
        );
    }

    #[test]
    fn reading_builder_defaults() {
        let reading = SensorReading::new("Field B - East");
        assert_eq!(reading.location, "Field B - East");
        assert!((reading.temperature - 24.0).abs() < f64::EPSILON);
        assert!((reading.soil_moisture - 42.0).abs() < f64::EPSILON);
        assert!((reading.rainfall - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reading_log_caps_at_ten_newest_first() {
        let mut log = ReadingLog::new();
        assert!(log.is_empty());
        assert!(log.latest().is_none());

        for i in 0..12 {
            log.record(SensorReading::new("Field A - North").with_soil_moisture(i as f64));
        }

        assert_eq!(log.len(), ReadingLog::CAPACITY);
        // Newest entry is first
        assert!((log.latest().unwrap().soil_moisture - 11.0).abs() < f64::EPSILON);
        // Oldest two entries were dropped
        let oldest = log.iter().last().unwrap();
        assert!((oldest.soil_moisture - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reading_log_clear() {
        let mut log = ReadingLog::new();
        log.record(SensorReading::new("Field A - North"));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
