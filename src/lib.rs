pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::ScenarioConfig;

pub use crate::core::{
    engine::DiversionEngine,
    evaluator::RouteEvaluator,
    fleet::FleetEvaluator,
    met::SyntheticMetSampler,
    performance::PerformanceRegistry,
    report::ReportFormat,
    selector::AlternateSelector,
};
pub use domain::model::{
    AircraftProfile, CandidateSource, DiversionResult, FlightContext, FlightOutcome, MetSample,
    RouteRegion, SelectionOutcome, Waypoint,
};
pub use domain::ports::MetSampler;
pub use utils::error::{DiversionError, Result};
