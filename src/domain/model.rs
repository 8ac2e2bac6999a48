use crate::utils::error::{DiversionError, Result};
use crate::utils::validation::{
    validate_finite, validate_latitude, validate_longitude, validate_non_empty_string,
    validate_non_negative, validate_positive, Validate,
};
use serde::{Deserialize, Serialize};

/// 機型性能資料 (巡航速度以 CAS 為基準)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    pub identifier: String,
    pub cruise_speed_kt: f64,
    pub cruise_altitude_ft: i32,
    pub fuel_flow_kg_per_hr: f64,
    pub fuel_reserve_kg: f64,
}

impl AircraftProfile {
    pub fn new(
        identifier: impl Into<String>,
        cruise_speed_kt: f64,
        cruise_altitude_ft: i32,
        fuel_flow_kg_per_hr: f64,
        fuel_reserve_kg: f64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            cruise_speed_kt,
            cruise_altitude_ft,
            fuel_flow_kg_per_hr,
            fuel_reserve_kg,
        }
    }
}

impl Validate for AircraftProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile.identifier", &self.identifier)?;
        validate_positive("profile.cruise_speed_kt", self.cruise_speed_kt)?;
        validate_positive("profile.fuel_flow_kg_per_hr", self.fuel_flow_kg_per_hr)?;
        validate_non_negative("profile.fuel_reserve_kg", self.fuel_reserve_kg)?;
        if self.cruise_altitude_ft < 0 {
            return Err(DiversionError::invalid_input(
                "profile.cruise_altitude_ft",
                self.cruise_altitude_ft,
                "Cruise altitude cannot be negative",
            ));
        }
        Ok(())
    }
}

/// 候補機場 (ICAO 代碼 + 座標)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Waypoint {
    /// Builds a waypoint after checking its coordinates.
    pub fn new(name: impl Into<String>, latitude_deg: f64, longitude_deg: f64) -> Result<Self> {
        let waypoint = Self {
            name: name.into(),
            latitude_deg,
            longitude_deg,
        };
        waypoint.validate()?;
        Ok(waypoint)
    }
}

impl Validate for Waypoint {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("waypoint.name", &self.name)?;
        validate_latitude("waypoint.latitude_deg", self.latitude_deg)?;
        validate_longitude("waypoint.longitude_deg", self.longitude_deg)
    }
}

/// One wind/temperature observation. Direction is where the wind blows FROM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetSample {
    pub wind_direction_deg: f64,
    pub wind_speed_kt: f64,
    pub isa_deviation_c: f64,
}

impl Validate for MetSample {
    fn validate(&self) -> Result<()> {
        validate_finite("met.wind_direction_deg", self.wind_direction_deg)?;
        if !(0.0..360.0).contains(&self.wind_direction_deg) {
            return Err(DiversionError::invalid_input(
                "met.wind_direction_deg",
                self.wind_direction_deg,
                "Wind direction must be in [0, 360)",
            ));
        }
        validate_non_negative("met.wind_speed_kt", self.wind_speed_kt)?;
        validate_finite("met.isa_deviation_c", self.isa_deviation_c)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversionResult {
    pub alternate: Waypoint,
    pub distance_nm: f64,
    pub ground_speed_kt: f64,
    pub time_hr: f64,
    pub fuel_required_kg: f64,
    pub remaining_fuel_kg: f64,
    /// Judged on the rounded `remaining_fuel_kg`, so a shortfall under 0.05 kg still counts as reachable.
    pub reachable: bool,
    pub notes: String,
}

/// 選擇結果：最佳備降場 + 全部評估結果 (保持輸入順序)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub best: DiversionResult,
    /// `all` 中最佳結果的位置
    pub best_index: usize,
    pub all: Vec<DiversionResult>,
}

impl SelectionOutcome {
    /// True when not even the best alternate can be reached with fuel above reserve.
    pub fn is_fuel_critical(&self) -> bool {
        !self.best.reachable
    }

    pub fn is_best(&self, index: usize) -> bool {
        index == self.best_index
    }

    pub fn reachable_count(&self) -> usize {
        self.all.iter().filter(|r| r.reachable).count()
    }
}

/// 航路區域，由呼叫端明確指定 (不再從航路字串猜測)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum RouteRegion {
    #[serde(alias = "transatlantic", alias = "nat")]
    #[cfg_attr(feature = "cli", value(alias = "transatlantic", alias = "nat"))]
    NorthAtlantic,
    #[serde(alias = "europe", alias = "eur")]
    #[cfg_attr(feature = "cli", value(alias = "europe", alias = "eur"))]
    European,
}

impl std::fmt::Display for RouteRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteRegion::NorthAtlantic => write!(f, "north-atlantic"),
            RouteRegion::European => write!(f, "european"),
        }
    }
}

impl std::str::FromStr for RouteRegion {
    type Err = DiversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north-atlantic" | "north_atlantic" | "transatlantic" | "nat" => {
                Ok(RouteRegion::NorthAtlantic)
            }
            "european" | "europe" | "eur" => Ok(RouteRegion::European),
            other => Err(DiversionError::invalid_input(
                "route_region",
                other,
                "Expected one of: north-atlantic, european",
            )),
        }
    }
}

/// Where a flight's candidate alternates come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateSource {
    Region(RouteRegion),
    Explicit(Vec<Waypoint>),
}

/// 單一航班的查詢內容
#[derive(Debug, Clone, PartialEq)]
pub struct FlightContext {
    pub flight_id: String,
    pub aircraft_type: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub fuel_on_board_kg: f64,
    pub candidates: CandidateSource,
}

#[derive(Debug)]
pub struct FlightOutcome {
    pub flight_id: String,
    pub result: Result<SelectionOutcome>,
}
