use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fieldops", version, about = "Smart irrigation decision toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one sensor reading and print the irrigation decision
    Decide {
        /// Soil moisture in percent
        #[arg(long)]
        soil_moisture: f64,

        /// Air temperature in °C
        #[arg(long)]
        temperature: f64,

        /// Relative humidity in percent
        #[arg(long)]
        humidity: Option<f64>,

        /// Recent rainfall in mm
        #[arg(long)]
        rainfall: Option<f64>,

        /// Wind speed in km/h
        #[arg(long)]
        wind_speed: Option<f64>,

        /// Light intensity in lux
        #[arg(long)]
        light: Option<f64>,

        /// Field location label (defaults to the configured station default)
        #[arg(long)]
        location: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate randomized readings and run each through the decision engine
    Simulate {
        /// Number of readings to generate
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// Seconds to wait between readings (0 for no delay)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Fixed RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Field location label
        #[arg(long)]
        location: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a daily-cycle moisture history with a summary
    History {
        /// Number of hourly points (defaults to the configured value)
        #[arg(long)]
        points: Option<usize>,

        /// Fixed RNG seed for a reproducible series
        #[arg(long)]
        seed: Option<u64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Simulate a manual irrigation run on one zone
    Run {
        /// Zone id to water
        #[arg(long)]
        zone: u32,

        /// Flow rate in L/min (10-100)
        #[arg(long, default_value_t = 50)]
        flow: u32,

        /// Duration in minutes (1-60)
        #[arg(long, default_value_t = 15)]
        duration: u32,

        /// Run the countdown instantly instead of in real time
        #[arg(long)]
        fast: bool,

        /// Stop the run manually after this many seconds
        #[arg(long)]
        stop_after: Option<u32>,
    },

    /// Re-run interactive setup
    Init,

    /// Validate config and print a summary
    Check,
}
