use crate::error::{FieldOpsError, Result};
use crate::models::Zone;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub station: StationConfig,
    pub locations: Vec<String>,
    pub zones: Vec<Zone>,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationConfig {
    pub name: String,
    pub default_location: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Seconds between generated readings in `simulate`
    pub interval_secs: u64,
    /// Points in a generated daily history
    pub history_points: usize,
    /// Fixed RNG seed for reproducible runs; omit for entropy
    pub seed: Option<u64>,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FieldOpsError::Config(format!(
                "Config file not found at {:?}. Run `fieldops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FieldOpsError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| FieldOpsError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Load the config if one exists in any standard location, falling
    /// back to the built-in defaults otherwise.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            Ok(Self::default())
        }
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("fieldops").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| FieldOpsError::Config("Cannot determine config directory".into()))?
            .join("fieldops")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/fieldops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FieldOpsError::Config("Cannot determine config directory".into()))?
            .join("fieldops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up FieldOps!");
        println!();

        println!("Station");
        let station_name: String = Input::new()
            .with_prompt("  Station name")
            .default("Demo Farm Station".into())
            .interact_text()
            .map_err(|e| FieldOpsError::Config(format!("Input error: {}", e)))?;

        let defaults = Config::default();
        let default_location: String = Input::new()
            .with_prompt("  Default field location")
            .default(defaults.station.default_location.clone())
            .interact_text()
            .map_err(|e| FieldOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Simulation");
        let interval_secs: u64 = Input::new()
            .with_prompt("  Seconds between simulated readings")
            .default(3)
            .interact_text()
            .map_err(|e| FieldOpsError::Config(format!("Input error: {}", e)))?;

        let history_points: usize = Input::new()
            .with_prompt("  Daily history points")
            .default(24)
            .interact_text()
            .map_err(|e| FieldOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            station: StationConfig {
                name: station_name,
                default_location,
            },
            locations: defaults.locations,
            zones: defaults.zones,
            simulation: SimulationConfig {
                interval_secs,
                history_points,
                seed: None,
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FieldOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# FieldOps Configuration\n# Generated by `fieldops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Sanity checks for `fieldops check`.
    pub fn validate(&self) -> Result<()> {
        if self.station.name.trim().is_empty() {
            return Err(FieldOpsError::Config("station name is empty".into()));
        }
        if self.locations.is_empty() {
            return Err(FieldOpsError::Config("no field locations configured".into()));
        }
        if self.zones.is_empty() {
            return Err(FieldOpsError::Config("no irrigation zones configured".into()));
        }
        if !self.locations.contains(&self.station.default_location) {
            return Err(FieldOpsError::Config(format!(
                "default location '{}' is not in the locations list",
                self.station.default_location
            )));
        }
        if self.simulation.interval_secs == 0 {
            return Err(FieldOpsError::Config(
                "simulation interval must be at least 1 second".into(),
            ));
        }
        if self.simulation.history_points == 0 {
            return Err(FieldOpsError::Config(
                "daily history needs at least one point".into(),
            ));
        }
        Ok(())
    }

    pub fn zone(&self, id: u32) -> Result<&Zone> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .ok_or_else(|| FieldOpsError::NotFound(format!("zone {} is not configured", id)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: StationConfig {
                name: "Demo Farm Station".into(),
                default_location: "Field A - North".into(),
            },
            locations: vec![
                "Field A - North".into(),
                "Field A - South".into(),
                "Field B - East".into(),
                "Field B - West".into(),
            ],
            zones: Zone::defaults(),
            simulation: SimulationConfig {
                interval_secs: 3,
                history_points: 24,
                seed: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validation_rejects_empty_zones_and_locations() {
        let mut config = Config::default();
        config.zones.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.locations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_unknown_default_location() {
        let mut config = Config::default();
        config.station.default_location = "Field Z".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_interval() {
        let mut config = Config::default();
        config.simulation.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zone_lookup_by_id() {
        let config = Config::default();
        assert_eq!(config.zone(3).unwrap().label, "Zone 3 - East Garden");
        assert!(matches!(
            config.zone(99).unwrap_err(),
            FieldOpsError::NotFound(_)
        ));
    }

    #[test]
    fn env_var_substitution() {
        std::env::set_var("FIELDOPS_TEST_STATION", "North Station");
        let substituted =
            Config::substitute_env_vars("station:\n  name: ${FIELDOPS_TEST_STATION}\n");
        assert!(substituted.contains("North Station"));

        // Unset variables keep the placeholder
        let untouched = Config::substitute_env_vars("name: ${FIELDOPS_UNSET_VAR_XYZ}\n");
        assert!(untouched.contains("${FIELDOPS_UNSET_VAR_XYZ}"));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.station.name, config.station.name);
        assert_eq!(parsed.zones.len(), config.zones.len());
        assert_eq!(parsed.simulation.interval_secs, 3);
    }
}
