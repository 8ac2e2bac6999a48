use crate::core::navigator::normalize_degrees;
use crate::domain::model::MetSample;
use crate::domain::ports::MetSampler;
use serde::{Deserialize, Serialize};

const MAX_DIRECTION_PERTURBATION_DEG: f64 = 10.0;
const MAX_SPEED_PERTURBATION_KT: f64 = 5.0;
const MAX_ISA_PERTURBATION_C: f64 = 2.0;

/// Deterministic stand-in for a live weather feed.
///
/// Each sample is the base wind/temperature plus bounded, position-derived perturbations
/// (at most ±10°, ±5 kt and ±2 °C when `variability` is 1.0). Altitude is accepted for
/// interface parity but does not change the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticMetSampler {
    pub base_wind_direction_deg: f64,
    pub base_wind_speed_kt: f64,
    pub base_isa_deviation_c: f64,
    /// 擾動比例，0.0 = 完全穩定，1.0 = 最大擾動
    pub variability: f64,
}

impl SyntheticMetSampler {
    /// Non-finite base values are carried into every sample and rejected by `MetSample::validate`.
    pub fn new(base_wind_direction_deg: f64, base_wind_speed_kt: f64, base_isa_deviation_c: f64) -> Self {
        Self {
            base_wind_direction_deg,
            base_wind_speed_kt,
            base_isa_deviation_c,
            variability: 1.0,
        }
    }

    /// Same base values everywhere, no perturbation.
    pub fn steady(base_wind_direction_deg: f64, base_wind_speed_kt: f64, base_isa_deviation_c: f64) -> Self {
        Self::new(base_wind_direction_deg, base_wind_speed_kt, base_isa_deviation_c)
            .with_variability(0.0)
    }

    pub fn calm() -> Self {
        Self::steady(0.0, 0.0, 0.0)
    }

    pub fn with_variability(mut self, variability: f64) -> Self {
        self.variability = if variability.is_finite() {
            variability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

impl Default for SyntheticMetSampler {
    fn default() -> Self {
        Self::calm()
    }
}

impl MetSampler for SyntheticMetSampler {
    fn sample(&self, latitude_deg: f64, longitude_deg: f64, _altitude_ft: i32) -> MetSample {
        let lat = latitude_deg.to_radians();
        let lon = longitude_deg.to_radians();
        let scale = self.variability;

        let direction = self.base_wind_direction_deg
            + scale * MAX_DIRECTION_PERTURBATION_DEG * (3.0 * lat).sin();
        let speed = self.base_wind_speed_kt + scale * MAX_SPEED_PERTURBATION_KT * (2.0 * lon).cos();
        let isa = self.base_isa_deviation_c + scale * MAX_ISA_PERTURBATION_C * (lat + lon).sin();

        MetSample {
            wind_direction_deg: normalize_degrees(direction),
            // f64::max 會把 NaN 變成 0，這裡保留 NaN 交給呼叫端驗證
            wind_speed_kt: if speed < 0.0 { 0.0 } else { speed },
            isa_deviation_c: isa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_sampler_returns_base_values() {
        let sampler = SyntheticMetSampler::steady(270.0, 30.0, 5.0);
        for (lat, lon) in [(59.0, -26.0), (51.5, -42.3), (-33.0, 151.0)] {
            let sample = sampler.sample(lat, lon, 41000);
            assert_eq!(sample.wind_direction_deg, 270.0);
            assert_eq!(sample.wind_speed_kt, 30.0);
            assert_eq!(sample.isa_deviation_c, 5.0);
        }
    }

    #[test]
    fn test_sampler_is_deterministic() {
        let sampler = SyntheticMetSampler::new(250.0, 40.0, -3.0);
        let a = sampler.sample(54.0, -30.0, 37000);
        let b = sampler.sample(54.0, -30.0, 37000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_perturbations_stay_bounded() {
        let sampler = SyntheticMetSampler::new(180.0, 20.0, 0.0);
        let mut lat = -89.0;
        while lat <= 89.0 {
            let mut lon = -179.0;
            while lon <= 179.0 {
                let s = sampler.sample(lat, lon, 35000);
                assert!((170.0..=190.0).contains(&s.wind_direction_deg));
                assert!((15.0..=25.0).contains(&s.wind_speed_kt));
                assert!((-2.0..=2.0).contains(&s.isa_deviation_c));
                lon += 7.0;
            }
            lat += 7.0;
        }
    }

    #[test]
    fn test_output_range_contract_near_north_and_calm() {
        // 基準風向 355° + 擾動會跨過 360°
        let sampler = SyntheticMetSampler::new(355.0, 2.0, 0.0);
        let mut lat = -80.0;
        while lat <= 80.0 {
            for lon in [-170.0, -90.0, 0.0, 90.0, 170.0] {
                let s = sampler.sample(lat, lon, 30000);
                assert!((0.0..360.0).contains(&s.wind_direction_deg));
                assert!(s.wind_speed_kt >= 0.0);
            }
            lat += 5.0;
        }
    }

    #[test]
    fn test_variability_is_clamped() {
        assert_eq!(SyntheticMetSampler::calm().with_variability(4.0).variability, 1.0);
        assert_eq!(SyntheticMetSampler::calm().with_variability(-1.0).variability, 0.0);
        assert_eq!(SyntheticMetSampler::calm().with_variability(f64::NAN).variability, 0.0);
    }

    #[test]
    fn test_non_finite_base_values_fail_validation() {
        use crate::utils::validation::Validate;

        assert!(SyntheticMetSampler::steady(270.0, 30.0, 5.0).sample(54.0, -30.0, 35000).validate().is_ok());
        for sampler in [
            SyntheticMetSampler::new(f64::NAN, 30.0, 0.0),
            SyntheticMetSampler::new(270.0, f64::NAN, 0.0),
            SyntheticMetSampler::new(270.0, 30.0, f64::NEG_INFINITY),
        ] {
            assert!(sampler.sample(54.0, -30.0, 35000).validate().is_err());
        }
    }
}
