use crate::core::evaluator::RouteEvaluator;
use crate::domain::model::{AircraftProfile, DiversionResult, SelectionOutcome, Waypoint};
use crate::domain::ports::MetSampler;
use crate::utils::error::{DiversionError, Result};

/// Applies the alternate selection policy over a candidate list.
///
/// - reachable candidates exist: lowest `fuel_required_kg` wins
/// - none reachable: highest (least negative) `remaining_fuel_kg` wins
///
/// Ties go to the candidate listed first. `all` keeps the input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternateSelector {
    evaluator: RouteEvaluator,
}

impl AlternateSelector {
    pub fn new() -> Self {
        Self {
            evaluator: RouteEvaluator::new(),
        }
    }

    pub fn select_best<M: MetSampler + ?Sized>(
        &self,
        profile: &AircraftProfile,
        current_lat: f64,
        current_lon: f64,
        fuel_on_board_kg: f64,
        alternates: &[Waypoint],
        met_sampler: &M,
    ) -> Result<SelectionOutcome> {
        if alternates.is_empty() {
            return Err(DiversionError::NoAlternatesAvailable);
        }

        let all = alternates
            .iter()
            .map(|alternate| {
                self.evaluator.evaluate(
                    profile,
                    current_lat,
                    current_lon,
                    fuel_on_board_kg,
                    alternate,
                    met_sampler,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let best_index = pick_best(&all).ok_or(DiversionError::NoAlternatesAvailable)?;
        let best = &all[best_index];

        if best.reachable {
            tracing::info!(
                "✅ Best alternate {} ({:.1} nm, {:.1} kg required, {:.1} kg remaining)",
                best.alternate.name,
                best.distance_nm,
                best.fuel_required_kg,
                best.remaining_fuel_kg
            );
        } else {
            tracing::warn!(
                "🚨 No reachable alternate among {} candidates; least-bad is {} ({:.1} kg short)",
                all.len(),
                best.alternate.name,
                -best.remaining_fuel_kg
            );
        }

        let best = best.clone();
        Ok(SelectionOutcome {
            best,
            best_index,
            all,
        })
    }
}

/// 先比較可達者的需求油量；全部不可達時改取剩餘油量最多者
fn pick_best(results: &[DiversionResult]) -> Option<usize> {
    let mut best_reachable: Option<usize> = None;
    let mut least_bad: Option<usize> = None;

    for (index, result) in results.iter().enumerate() {
        if result.reachable {
            // 嚴格小於：同值時保留先出現者
            if best_reachable.map_or(true, |b| result.fuel_required_kg < results[b].fuel_required_kg) {
                best_reachable = Some(index);
            }
        } else if least_bad.map_or(true, |b| result.remaining_fuel_kg > results[b].remaining_fuel_kg) {
            least_bad = Some(index);
        }
    }

    best_reachable.or(least_bad)
}
