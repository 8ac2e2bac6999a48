pub mod engine;
pub mod evaluator;
pub mod fleet;
pub mod met;
pub mod navigator;
pub mod performance;
pub mod regions;
pub mod report;
pub mod selector;

pub use crate::domain::model::{
    AircraftProfile, CandidateSource, DiversionResult, FlightContext, FlightOutcome, MetSample,
    RouteRegion, SelectionOutcome, Waypoint,
};
pub use crate::domain::ports::MetSampler;
pub use crate::utils::error::Result;
