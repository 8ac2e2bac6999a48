use clap::Parser;
use diversion_engine::core::report;
use diversion_engine::utils::error::ErrorSeverity;
use diversion_engine::utils::{logger, validation::Validate};
use diversion_engine::{CliConfig, DiversionEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting diversion-engine CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let engine = DiversionEngine::default();
    let sampler = config.met_sampler();

    let outcome = config
        .flight_context()
        .and_then(|flight| engine.find_for_flight(&flight, &sampler))
        .and_then(|outcome| report::render(&outcome, config.format).map(|text| (outcome, text)));

    match outcome {
        Ok((outcome, text)) => {
            println!("{}", text);
            if outcome.is_fuel_critical() {
                tracing::warn!("🚨 Fuel-critical: no alternate reachable");
                // 燃油危急不是錯誤，但以退出碼提醒呼叫端
                std::process::exit(4);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Diversion query failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
