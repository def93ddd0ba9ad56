mod cli;
mod config;
mod control;
mod error;
mod logic;
mod models;
mod sim;

use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use control::IrrigationController;
use error::Result;
use models::ReadingLog;
use sim::{SensorSimulator, SensorValues};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flags
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let result = match cli.command {
        Commands::Init => run_init(),
        Commands::Check => run_check(cli.config),
        Commands::Decide {
            soil_moisture,
            temperature,
            humidity,
            rainfall,
            wind_speed,
            light,
            location,
            json,
        } => run_decide(
            cli.config,
            SensorValues {
                temperature: Some(temperature),
                soil_moisture: Some(soil_moisture),
                humidity,
                rainfall,
                wind_speed,
                light_intensity: light,
            },
            location,
            json,
        ),
        Commands::Simulate {
            count,
            interval_secs,
            seed,
            location,
            json,
        } => run_simulate(cli.config, count, interval_secs, seed, location, json),
        Commands::History { points, seed, json } => run_history(cli.config, points, seed, json),
        Commands::Run {
            zone,
            flow,
            duration,
            fast,
            stop_after,
        } => run_irrigation(cli.config, zone, flow, duration, fast, stop_after),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_init() -> Result<()> {
    let (config, path) = Config::setup_interactive()?;
    println!(
        "Station '{}' configured with {} zones ({})",
        config.station.name,
        config.zones.len(),
        path.display()
    );
    Ok(())
}

fn run_check(config_override: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_override)?;
    config.validate()?;

    println!("Config OK");
    println!("  Station:    {}", config.station.name);
    println!(
        "  Locations:  {} (default: {})",
        config.locations.len(),
        config.station.default_location
    );
    println!("  Zones:      {}", config.zones.len());
    for zone in &config.zones {
        println!("    {} - {}", zone.id, zone.label);
    }
    println!(
        "  Simulation: every {}s, {} history points",
        config.simulation.interval_secs, config.simulation.history_points
    );
    Ok(())
}

fn run_decide(
    config_override: Option<PathBuf>,
    values: SensorValues,
    location: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::load_or_default(config_override)?;
    let location = location.unwrap_or(config.station.default_location);

    let simulator = SensorSimulator::new();
    let reading = simulator.manual_reading(&values, &location);
    let decision = logic::decide(&reading);

    if json {
        let output = serde_json::json!({
            "reading": reading,
            "moisture_status": reading.moisture_status(),
            "decision": decision,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", reading);
        println!("Moisture: {}", reading.moisture_status());
        println!(
            "Decision: {} {}",
            decision.kind.symbol(),
            decision.kind
        );
        println!("Reason:   {}", decision.reason);
        println!("Amount:   {:.1}%", decision.amount);
    }
    Ok(())
}

fn build_simulator(seed: Option<u64>, config: &Config) -> SensorSimulator {
    match seed.or(config.simulation.seed) {
        Some(s) => SensorSimulator::seeded(s),
        None => SensorSimulator::new(),
    }
}

fn run_simulate(
    config_override: Option<PathBuf>,
    count: usize,
    interval_secs: Option<u64>,
    seed: Option<u64>,
    location: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::load_or_default(config_override)?;
    let location = location.unwrap_or_else(|| config.station.default_location.clone());
    let interval = interval_secs.unwrap_or(config.simulation.interval_secs);

    let mut simulator = build_simulator(seed, &config);
    let mut log = ReadingLog::new();
    let mut results = Vec::with_capacity(count);

    for i in 0..count {
        if i > 0 && interval > 0 && !json {
            std::thread::sleep(Duration::from_secs(interval));
        }

        let reading = simulator.random_reading(&location);
        let decision = logic::decide(&reading);
        log.record(reading.clone());

        if !json {
            println!("{}", reading);
            println!(
                "  {} {} ({:.1}%) - {}",
                decision.kind.symbol(),
                decision.kind,
                decision.amount,
                decision.reason
            );
        }
        results.push((reading, decision));
    }

    if json {
        let output: Vec<_> = results
            .iter()
            .map(|(reading, decision)| {
                serde_json::json!({ "reading": reading, "decision": decision })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(latest) = log.latest() {
        println!();
        println!(
            "Logged {} of {} readings, latest at {}",
            log.len(),
            count,
            latest.timestamp.format("%H:%M:%S")
        );
    }
    Ok(())
}

fn run_history(
    config_override: Option<PathBuf>,
    points: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let config = Config::load_or_default(config_override)?;
    let points = points.unwrap_or(config.simulation.history_points);
    let location = config.station.default_location.clone();

    let mut simulator = build_simulator(seed, &config);
    let history = simulator.daily_history(points, &location);
    let summary = logic::calculations::summarize(&history);

    if json {
        let output = serde_json::json!({
            "location": location,
            "readings": history,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Daily history for {}", location);
    for reading in &history {
        println!(
            "  {}  {:5.1}°C  {:5.1}%  {}",
            reading.timestamp.format("%H:%M"),
            reading.temperature,
            reading.soil_moisture,
            reading.moisture_status()
        );
    }

    println!();
    println!("Summary");
    if let Some(t) = summary.avg_temperature {
        println!("  Avg temperature: {:.1}°C", t);
    }
    if let Some(m) = summary.avg_soil_moisture {
        println!("  Avg moisture:    {:.1}%", m);
    }
    if let Some(h) = summary.avg_humidity {
        println!("  Avg humidity:    {:.1}%", h);
    }
    println!("  Total rainfall:  {:.1}mm", summary.total_rainfall_mm);
    println!("  Moisture trend:  {}", summary.moisture_trend);
    Ok(())
}

fn run_irrigation(
    config_override: Option<PathBuf>,
    zone_id: u32,
    flow: u32,
    duration: u32,
    fast: bool,
    stop_after: Option<u32>,
) -> Result<()> {
    let config = Config::load_or_default(config_override)?;
    let zone = config.zone(zone_id)?.clone();

    let mut controller = IrrigationController::new();
    controller.start(zone, flow, duration)?;
    println!(
        "{} - {} remaining",
        controller.status(),
        controller.remaining_display()
    );

    if fast {
        match stop_after {
            Some(secs) => {
                controller.tick(secs);
                if controller.active().is_some() {
                    controller.stop()?;
                }
            }
            None => {
                let total = controller
                    .active()
                    .map(|run| run.total_secs())
                    .unwrap_or(0);
                controller.tick(total);
            }
        }
    } else {
        let mut elapsed = 0;
        while controller.active().is_some() {
            std::thread::sleep(Duration::from_secs(1));
            controller.tick(1);
            elapsed += 1;

            if controller.active().is_some() {
                println!(
                    "  {:3.0}% - {} remaining",
                    controller.progress() * 100.0,
                    controller.remaining_display()
                );
                if stop_after == Some(elapsed) {
                    controller.stop()?;
                }
            }
        }
    }

    println!();
    println!("Events");
    for event in controller.events().iter() {
        println!("  {}", event);
    }
    println!("{}", controller.status());
    Ok(())
}
