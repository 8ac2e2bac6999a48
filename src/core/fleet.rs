use crate::core::engine::DiversionEngine;
use crate::domain::model::{FlightContext, FlightOutcome};
use crate::domain::ports::MetSampler;
use crate::utils::error::DiversionError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const DEFAULT_CONCURRENT_FLIGHTS: usize = 4;

/// Runs one selection per flight on the blocking pool.
///
/// Flights are independent; a failure is reported in that flight's outcome and the rest
/// of the batch still runs. Outcomes come back in input order.
pub struct FleetEvaluator {
    engine: Arc<DiversionEngine>,
    sampler: Arc<dyn MetSampler>,
    concurrent_flights: usize,
}

impl FleetEvaluator {
    pub fn new(
        engine: Arc<DiversionEngine>,
        sampler: Arc<dyn MetSampler>,
        concurrent_flights: usize,
    ) -> Self {
        Self {
            engine,
            sampler,
            concurrent_flights: concurrent_flights.max(1),
        }
    }

    pub fn concurrent_flights(&self) -> usize {
        self.concurrent_flights
    }

    pub async fn evaluate(&self, flights: Vec<FlightContext>) -> Vec<FlightOutcome> {
        let started = Instant::now();
        let total = flights.len();
        tracing::info!(
            "🛫 Evaluating {} flights ({} at a time)",
            total,
            self.concurrent_flights
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrent_flights));
        let flight_ids: Vec<String> = flights.iter().map(|f| f.flight_id.clone()).collect();
        let mut tasks = JoinSet::new();

        for (index, flight) in flights.into_iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let sampler = Arc::clone(&self.sampler);
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                // Semaphore 不會被關閉
                let _permit = semaphore.acquire_owned().await;
                let result = tokio::task::spawn_blocking(move || {
                    let result = engine.find_for_flight(&flight, &*sampler);
                    FlightOutcome {
                        flight_id: flight.flight_id,
                        result,
                    }
                })
                .await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<FlightOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(outcome))) => slots[index] = Some(outcome),
                Ok((index, Err(e))) => {
                    tracing::error!("❌ Flight {} worker failed: {}", flight_ids[index], e);
                    slots[index] = Some(FlightOutcome {
                        flight_id: flight_ids[index].clone(),
                        result: Err(DiversionError::TaskError {
                            message: e.to_string(),
                        }),
                    });
                }
                Err(e) => tracing::error!("❌ Fleet task failed: {}", e),
            }
        }

        // 外層任務失敗時 index 未知，補上錯誤結果
        let outcomes: Vec<FlightOutcome> = slots
            .into_iter()
            .zip(flight_ids)
            .map(|(slot, flight_id)| {
                slot.unwrap_or_else(|| FlightOutcome {
                    flight_id,
                    result: Err(DiversionError::TaskError {
                        message: "worker did not report a result".to_string(),
                    }),
                })
            })
            .collect();

        let critical = outcomes
            .iter()
            .filter(|o| matches!(&o.result, Ok(outcome) if outcome.is_fuel_critical()))
            .count();
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        tracing::info!(
            "⏱️ Fleet evaluation finished in {:?}: {} flights, {} fuel-critical, {} failed",
            started.elapsed(),
            total,
            critical,
            failed
        );

        outcomes
    }
}
