use clap::Parser;
use diversion_engine::core::report::{self, ReportFormat};
use diversion_engine::utils::error::ErrorSeverity;
use diversion_engine::utils::{logger, validation::Validate};
use diversion_engine::{DiversionEngine, FleetEvaluator, MetSampler, ScenarioConfig};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scenario-runner")]
#[command(about = "Run diversion selection for every flight in a TOML scenario")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of compact text
    #[arg(long)]
    json_logs: bool,

    /// Override output format from config
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Override concurrent_flights from config
    #[arg(long)]
    concurrent_flights: Option<usize>,

    /// Dry run - show what would be evaluated without running the engine
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting scenario runner");
    tracing::info!("📁 Loading scenario from: {}", args.config);

    let mut config = match ScenarioConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 套用命令列覆蓋設定
    if let Some(concurrent) = args.concurrent_flights {
        config
            .engine
            .get_or_insert(diversion_engine::config::toml_config::EngineConfig {
                concurrent_flights: None,
            })
            .concurrent_flights = Some(concurrent);
        tracing::info!("🔧 concurrent_flights overridden to: {}", concurrent);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Scenario loaded and validated successfully");
    let format = args.format.unwrap_or_else(|| config.output_format());

    display_scenario_summary(&config, format);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no evaluation will occur");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let registry = config.registry()?;
    let engine = Arc::new(DiversionEngine::new(Arc::new(registry)));
    let sampler: Arc<dyn MetSampler> = Arc::new(config.met_sampler());
    let fleet = FleetEvaluator::new(engine, sampler, config.concurrent_flights());

    let outcomes = fleet.evaluate(config.flight_contexts()?).await;

    let mut worst: Option<ErrorSeverity> = None;
    let mut critical_flights = Vec::new();
    for outcome in &outcomes {
        println!("=== {} ===", outcome.flight_id);
        match &outcome.result {
            Ok(selection) => {
                println!("{}", report::render(selection, format)?);
                if selection.is_fuel_critical() {
                    critical_flights.push(outcome.flight_id.as_str());
                }
            }
            Err(e) => {
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                    outcome.flight_id,
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}: {}", outcome.flight_id, e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                worst = worst.max(Some(e.severity()));
            }
        }
        println!();
    }

    if !critical_flights.is_empty() {
        tracing::warn!("🚨 Fuel-critical flights: {}", critical_flights.join(", "));
    }

    let exit_code = match worst {
        None | Some(ErrorSeverity::Low) => 0,
        Some(ErrorSeverity::Medium) => 2,
        Some(ErrorSeverity::High) => 1,
        Some(ErrorSeverity::Critical) => 3,
    };
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_scenario_summary(config: &ScenarioConfig, format: ReportFormat) {
    println!("📋 Scenario Summary:");
    println!("  Scenario: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        println!("  Description: {}", description);
    }
    println!(
        "  Weather: {:03.0}°/{:.0} kt, ISA {:+.1}°C, variability {:.2}",
        config.weather.wind_direction_deg,
        config.weather.wind_speed_kt,
        config.weather.isa_deviation_c,
        config.weather.variability.unwrap_or(0.0)
    );
    println!("  Flights: {}", config.flights.len());
    println!("  Concurrent Flights: {}", config.concurrent_flights());
    println!("  Format: {:?}", format);
    println!();
}

fn perform_dry_run(config: &ScenarioConfig) -> anyhow::Result<()> {
    let registry = config.registry()?;

    println!("🔍 Dry Run Analysis:");
    for flight in &config.flights {
        println!();
        println!("✈️ {} ({})", flight.id, flight.aircraft_type);
        match registry.try_lookup(&flight.aircraft_type) {
            Ok(profile) => println!(
                "  Profile: {} kt CAS at FL{}, {:.0} kg/h, reserve {:.0} kg",
                profile.cruise_speed_kt,
                profile.cruise_altitude_ft / 100,
                profile.fuel_flow_kg_per_hr,
                profile.fuel_reserve_kg
            ),
            Err(_) => println!(
                "  ⚠️ Unknown type, will use {} profile",
                registry.default_profile().identifier
            ),
        }
        println!(
            "  Position: {:.4}, {:.4}  Fuel: {:.0} kg",
            flight.latitude_deg, flight.longitude_deg, flight.fuel_on_board_kg
        );
        match (&flight.region, &flight.alternates) {
            (Some(region), _) => {
                let names: Vec<&str> = region.alternates().iter().map(|w| w.name.as_str()).collect();
                println!("  Candidates ({}): {}", region, names.join(", "));
            }
            (None, Some(list)) => {
                let names: Vec<&str> = list.iter().map(|w| w.name.as_str()).collect();
                println!("  Candidates (explicit): {}", names.join(", "));
            }
            (None, None) => println!("  Candidates: none"),
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for per-alternate detail during a real run.");
    Ok(())
}
