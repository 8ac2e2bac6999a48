use crate::core::evaluator::RouteEvaluator;
use crate::core::performance::PerformanceRegistry;
use crate::core::selector::AlternateSelector;
use crate::domain::model::{
    CandidateSource, DiversionResult, FlightContext, RouteRegion, SelectionOutcome, Waypoint,
};
use crate::domain::ports::MetSampler;
use crate::utils::error::Result;
use std::sync::Arc;

/// Entry point for dashboard backends and scenario simulators.
///
/// Resolves the aircraft type through the registry, then delegates to the evaluator or
/// selector. Holds no per-call state, so one engine can serve any number of flights.
#[derive(Debug, Clone)]
pub struct DiversionEngine {
    registry: Arc<PerformanceRegistry>,
    evaluator: RouteEvaluator,
    selector: AlternateSelector,
}

impl DiversionEngine {
    pub fn new(registry: Arc<PerformanceRegistry>) -> Self {
        Self {
            registry,
            evaluator: RouteEvaluator::new(),
            selector: AlternateSelector::new(),
        }
    }

    pub fn registry(&self) -> &PerformanceRegistry {
        &self.registry
    }

    pub fn evaluate_route<M: MetSampler + ?Sized>(
        &self,
        aircraft_type: &str,
        current_lat: f64,
        current_lon: f64,
        fuel_on_board_kg: f64,
        alternate: &Waypoint,
        met_sampler: &M,
    ) -> Result<DiversionResult> {
        let profile = self.registry.lookup(aircraft_type);
        self.evaluator.evaluate(
            &profile,
            current_lat,
            current_lon,
            fuel_on_board_kg,
            alternate,
            met_sampler,
        )
    }

    pub fn find_optimal_alternate<M: MetSampler + ?Sized>(
        &self,
        aircraft_type: &str,
        current_lat: f64,
        current_lon: f64,
        fuel_on_board_kg: f64,
        alternates: &[Waypoint],
        met_sampler: &M,
    ) -> Result<SelectionOutcome> {
        let profile = self.registry.lookup(aircraft_type);
        tracing::debug!(
            "Selecting among {} alternates for {} at ({:.4}, {:.4}) with {:.1} kg",
            alternates.len(),
            profile.identifier,
            current_lat,
            current_lon,
            fuel_on_board_kg
        );
        self.selector.select_best(
            &profile,
            current_lat,
            current_lon,
            fuel_on_board_kg,
            alternates,
            met_sampler,
        )
    }

    pub fn find_optimal_alternate_for_region<M: MetSampler + ?Sized>(
        &self,
        aircraft_type: &str,
        current_lat: f64,
        current_lon: f64,
        fuel_on_board_kg: f64,
        region: RouteRegion,
        met_sampler: &M,
    ) -> Result<SelectionOutcome> {
        self.find_optimal_alternate(
            aircraft_type,
            current_lat,
            current_lon,
            fuel_on_board_kg,
            region.alternates(),
            met_sampler,
        )
    }

    pub fn find_for_flight<M: MetSampler + ?Sized>(
        &self,
        flight: &FlightContext,
        met_sampler: &M,
    ) -> Result<SelectionOutcome> {
        let alternates: &[Waypoint] = match &flight.candidates {
            CandidateSource::Region(region) => region.alternates(),
            CandidateSource::Explicit(list) => list.as_slice(),
        };
        self.find_optimal_alternate(
            &flight.aircraft_type,
            flight.latitude_deg,
            flight.longitude_deg,
            flight.fuel_on_board_kg,
            alternates,
            met_sampler,
        )
    }
}

impl Default for DiversionEngine {
    fn default() -> Self {
        Self::new(PerformanceRegistry::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::met::SyntheticMetSampler;
    use crate::core::performance::DEFAULT_PROFILE_ID;
    use crate::utils::error::DiversionError;

    #[test]
    fn test_unknown_type_still_evaluates() {
        let engine = DiversionEngine::default();
        let egll = Waypoint::new("EGLL", 51.4706, -0.4619).unwrap();
        let calm = SyntheticMetSampler::calm();

        let unknown = engine
            .evaluate_route("NOPE", 50.0, -2.0, 8000.0, &egll, &calm)
            .unwrap();
        let default = engine
            .evaluate_route(DEFAULT_PROFILE_ID, 50.0, -2.0, 8000.0, &egll, &calm)
            .unwrap();
        assert_eq!(unknown, default);
    }

    #[test]
    fn test_region_and_explicit_candidates_agree() {
        let engine = DiversionEngine::default();
        let sampler = SyntheticMetSampler::new(260.0, 35.0, 2.0);

        let by_region = engine
            .find_optimal_alternate_for_region("A320", 50.5, 1.0, 6000.0, RouteRegion::European, &sampler)
            .unwrap();
        let flight = FlightContext {
            flight_id: "BAW123".to_string(),
            aircraft_type: "A320".to_string(),
            latitude_deg: 50.5,
            longitude_deg: 1.0,
            fuel_on_board_kg: 6000.0,
            candidates: CandidateSource::Explicit(RouteRegion::European.alternates().to_vec()),
        };
        let explicit = engine.find_for_flight(&flight, &sampler).unwrap();

        assert_eq!(by_region, explicit);
        assert_eq!(by_region.all.len(), 6);
    }

    #[test]
    fn test_empty_explicit_list_errors() {
        let engine = DiversionEngine::default();
        let flight = FlightContext {
            flight_id: "EMPTY".to_string(),
            aircraft_type: "B738".to_string(),
            latitude_deg: 50.0,
            longitude_deg: 0.0,
            fuel_on_board_kg: 6000.0,
            candidates: CandidateSource::Explicit(vec![]),
        };
        assert!(matches!(
            engine.find_for_flight(&flight, &SyntheticMetSampler::calm()),
            Err(DiversionError::NoAlternatesAvailable)
        ));
    }
}
