use crate::core::navigator;
use crate::domain::model::{AircraftProfile, DiversionResult, Waypoint};
use crate::domain::ports::MetSampler;
use crate::utils::error::Result;
use crate::utils::validation::{validate_latitude, validate_longitude, validate_non_negative, Validate};

/// Ground speed never drops below this, whatever the headwind.
pub const MIN_GROUND_SPEED_KT: f64 = 100.0;

/// Empirical CAS → TAS correction: +2% per 1000 ft, then +2% per 15 °C above ISA.
///
/// Deliberately simplified (not a density-altitude conversion); kept as-is so results match
/// the figures operations staff already compare against.
pub fn true_airspeed_kt(cas_kt: f64, altitude_ft: i32, isa_deviation_c: f64) -> f64 {
    cas_kt * (1.0 + 0.02 * f64::from(altitude_ft) / 1000.0) * (1.0 + 0.02 * isa_deviation_c / 15.0)
}

/// Along-track wind component. Positive means tailwind.
///
/// `wind_direction_deg` is where the wind blows from, so wind from 270° on a 090° track is a
/// full tailwind.
pub fn tailwind_component_kt(wind_direction_deg: f64, wind_speed_kt: f64, track_deg: f64) -> f64 {
    wind_speed_kt * (wind_direction_deg - track_deg + 180.0).to_radians().cos()
}

/// 四捨五入到小數點後一位，並把 -0.0 正規化為 0.0
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}

/// Computes the reachability/fuel verdict for one alternate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteEvaluator;

impl RouteEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate<M: MetSampler + ?Sized>(
        &self,
        profile: &AircraftProfile,
        current_lat: f64,
        current_lon: f64,
        fuel_on_board_kg: f64,
        alternate: &Waypoint,
        met_sampler: &M,
    ) -> Result<DiversionResult> {
        profile.validate()?;
        validate_latitude("current.latitude_deg", current_lat)?;
        validate_longitude("current.longitude_deg", current_lon)?;
        validate_non_negative("fuel_on_board_kg", fuel_on_board_kg)?;

        let (alt_lat, alt_lon) = (alternate.latitude_deg, alternate.longitude_deg);
        let distance = navigator::distance_nm(current_lat, current_lon, alt_lat, alt_lon)?;
        let track = navigator::initial_course_deg(current_lat, current_lon, alt_lat, alt_lon)?;

        // 取中點天氣：座標簡單平均，不做大圓中點
        let mid_lat = (current_lat + alt_lat) / 2.0;
        let mid_lon = (current_lon + alt_lon) / 2.0;
        let met = met_sampler.sample(mid_lat, mid_lon, profile.cruise_altitude_ft);
        // NaN 會被 ground speed 下限吃掉，必須先擋下
        met.validate()?;

        let tas = true_airspeed_kt(
            profile.cruise_speed_kt,
            profile.cruise_altitude_ft,
            met.isa_deviation_c,
        );
        let tailwind = tailwind_component_kt(met.wind_direction_deg, met.wind_speed_kt, track);
        let raw_ground_speed = tas + tailwind;
        let ground_speed = raw_ground_speed.max(MIN_GROUND_SPEED_KT);

        let time_hr = distance / ground_speed;
        let fuel_required = time_hr * profile.fuel_flow_kg_per_hr + profile.fuel_reserve_kg;
        let remaining = fuel_on_board_kg - fuel_required;

        let remaining_fuel_kg = round1(remaining);
        // 以輸出值判斷，保證 reachable 與 remaining_fuel_kg 的正負號一致
        let reachable = remaining_fuel_kg >= 0.0;

        let mut notes = vec![
            format!("track {:03.0}°", track),
            if tailwind >= 0.0 {
                format!("tailwind {:.1} kt", tailwind)
            } else {
                format!("headwind {:.1} kt", -tailwind)
            },
            format!("ISA {:+.1}°C", met.isa_deviation_c),
        ];
        if raw_ground_speed < MIN_GROUND_SPEED_KT {
            notes.push(format!(
                "ground speed floored at {:.0} kt (computed {:.1} kt)",
                MIN_GROUND_SPEED_KT, raw_ground_speed
            ));
        }
        if !reachable {
            notes.push(format!("INSUFFICIENT FUEL: short by {:.1} kg", -remaining_fuel_kg));
        }

        tracing::debug!(
            "{} -> {}: {:.1} nm, GS {:.1} kt, fuel {:.1} kg, remaining {:.1} kg",
            profile.identifier,
            alternate.name,
            distance,
            ground_speed,
            fuel_required,
            remaining
        );

        Ok(DiversionResult {
            alternate: alternate.clone(),
            distance_nm: round1(distance),
            ground_speed_kt: round1(ground_speed),
            time_hr: round1(time_hr),
            fuel_required_kg: round1(fuel_required),
            remaining_fuel_kg,
            reachable,
            notes: notes.join("; "),
        })
    }
}
