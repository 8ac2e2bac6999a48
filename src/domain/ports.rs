use crate::domain::model::MetSample;

/// Wind/temperature source consulted once per evaluated route.
///
/// Implementations must return `wind_speed_kt >= 0` and a direction in `[0, 360)`.
/// A network-backed sampler owns its own retry policy; the engine calls it synchronously.
pub trait MetSampler: Send + Sync {
    fn sample(&self, latitude_deg: f64, longitude_deg: f64, altitude_ft: i32) -> MetSample;
}

impl<T: MetSampler + ?Sized> MetSampler for &T {
    fn sample(&self, latitude_deg: f64, longitude_deg: f64, altitude_ft: i32) -> MetSample {
        (**self).sample(latitude_deg, longitude_deg, altitude_ft)
    }
}

impl<T: MetSampler + ?Sized> MetSampler for std::sync::Arc<T> {
    fn sample(&self, latitude_deg: f64, longitude_deg: f64, altitude_ft: i32) -> MetSample {
        (**self).sample(latitude_deg, longitude_deg, altitude_ft)
    }
}
