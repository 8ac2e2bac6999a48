use crate::core::fleet::DEFAULT_CONCURRENT_FLIGHTS;
use crate::core::met::SyntheticMetSampler;
use crate::core::performance::PerformanceRegistry;
use crate::core::report::ReportFormat;
use crate::domain::model::{AircraftProfile, CandidateSource, FlightContext, RouteRegion, Waypoint};
use crate::utils::error::{DiversionError, Result};
use crate::utils::validation::{
    validate_latitude, validate_longitude, validate_non_empty_string, validate_non_negative,
    validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // 常數樣式，必定可編譯
    Regex::new(r"\$\{([^}]+)\}").unwrap()
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    pub weather: WeatherConfig,
    pub engine: Option<EngineConfig>,
    pub output: Option<OutputConfig>,
    pub aircraft_profiles: Option<Vec<AircraftProfile>>,
    pub flights: Vec<FlightConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub wind_direction_deg: f64,
    pub wind_speed_kt: f64,
    pub isa_deviation_c: f64,
    pub variability: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub concurrent_flights: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<ReportFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    pub id: String,
    pub aircraft_type: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub fuel_on_board_kg: f64,
    pub region: Option<RouteRegion>,
    pub alternates: Option<Vec<Waypoint>>,
}

impl FlightConfig {
    pub fn candidates(&self) -> Result<CandidateSource> {
        match (&self.region, &self.alternates) {
            (Some(_), Some(_)) => Err(DiversionError::ConfigValidationError {
                field: format!("flights.{}", self.id),
                message: "Set either region or alternates, not both".to_string(),
            }),
            (Some(region), None) => Ok(CandidateSource::Region(*region)),
            (None, Some(list)) => Ok(CandidateSource::Explicit(list.clone())),
            (None, None) => Err(DiversionError::ConfigValidationError {
                field: format!("flights.{}", self.id),
                message: "A flight needs a region or an alternates list".to_string(),
            }),
        }
    }

    pub fn to_context(&self) -> Result<FlightContext> {
        Ok(FlightContext {
            flight_id: self.id.clone(),
            aircraft_type: self.aircraft_type.clone(),
            latitude_deg: self.latitude_deg,
            longitude_deg: self.longitude_deg,
            fuel_on_board_kg: self.fuel_on_board_kg,
            candidates: self.candidates()?,
        })
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DiversionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析情境
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DiversionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FUEL_KG})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;

        validate_range("weather.wind_direction_deg", self.weather.wind_direction_deg, 0.0, 360.0)?;
        validate_non_negative("weather.wind_speed_kt", self.weather.wind_speed_kt)?;
        validate_range("weather.isa_deviation_c", self.weather.isa_deviation_c, -60.0, 60.0)?;
        if let Some(variability) = self.weather.variability {
            validate_range("weather.variability", variability, 0.0, 1.0)?;
        }

        if let Some(concurrent) = self.engine.as_ref().and_then(|e| e.concurrent_flights) {
            validate_positive_number("engine.concurrent_flights", concurrent, 1)?;
        }

        for profile in self.aircraft_profiles.iter().flatten() {
            profile.validate()?;
        }

        if self.flights.is_empty() {
            return Err(DiversionError::ConfigValidationError {
                field: "flights".to_string(),
                message: "Scenario has no flights".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for flight in &self.flights {
            validate_non_empty_string("flights.id", &flight.id)?;
            if !seen.insert(flight.id.as_str()) {
                return Err(DiversionError::ConfigValidationError {
                    field: "flights.id".to_string(),
                    message: format!("Duplicate flight id '{}'", flight.id),
                });
            }
            validate_non_empty_string("flights.aircraft_type", &flight.aircraft_type)?;
            validate_latitude("flights.latitude_deg", flight.latitude_deg)?;
            validate_longitude("flights.longitude_deg", flight.longitude_deg)?;
            validate_non_negative("flights.fuel_on_board_kg", flight.fuel_on_board_kg)?;
            // 空的 alternates 清單留給引擎回報 NoAlternatesAvailable
            for alternate in flight.alternates.iter().flatten() {
                alternate.validate()?;
            }
            flight.candidates()?;
        }

        Ok(())
    }

    pub fn met_sampler(&self) -> SyntheticMetSampler {
        SyntheticMetSampler::new(
            self.weather.wind_direction_deg,
            self.weather.wind_speed_kt,
            self.weather.isa_deviation_c,
        )
        .with_variability(self.weather.variability.unwrap_or(0.0))
    }

    /// Built-in performance table plus this scenario's custom profiles.
    pub fn registry(&self) -> Result<PerformanceRegistry> {
        PerformanceRegistry::with_profiles(self.aircraft_profiles.clone().unwrap_or_default())
    }

    pub fn concurrent_flights(&self) -> usize {
        self.engine
            .as_ref()
            .and_then(|e| e.concurrent_flights)
            .unwrap_or(DEFAULT_CONCURRENT_FLIGHTS)
    }

    pub fn output_format(&self) -> ReportFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn flight_contexts(&self) -> Result<Vec<FlightContext>> {
        self.flights.iter().map(FlightConfig::to_context).collect()
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[scenario]
name = "nat-diversion"
description = "Mid-Atlantic diversion drill"

[weather]
wind_direction_deg = 270.0
wind_speed_kt = 30.0
isa_deviation_c = 5.0

[engine]
concurrent_flights = 2

[output]
format = "csv"

[[aircraft_profiles]]
identifier = "E2E"
cruise_speed_kt = 485.0
cruise_altitude_ft = 41000
fuel_flow_kg_per_hr = 2800.0
fuel_reserve_kg = 5000.0

[[flights]]
id = "NAT001"
aircraft_type = "E2E"
latitude_deg = 54.0
longitude_deg = -30.0
fuel_on_board_kg = 20000.0
alternates = [
    { name = "BIKF", latitude_deg = 64.13, longitude_deg = -21.94 },
    { name = "CYQX", latitude_deg = 48.94, longitude_deg = -54.57 },
]

[[flights]]
id = "EUR002"
aircraft_type = "A320"
latitude_deg = 50.5
longitude_deg = 1.0
fuel_on_board_kg = 6000.0
region = "european"
"#;

    #[test]
    fn test_parse_basic_scenario() {
        let config = ScenarioConfig::from_toml_str(BASIC).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.scenario.name, "nat-diversion");
        assert_eq!(config.concurrent_flights(), 2);
        assert_eq!(config.output_format(), ReportFormat::Csv);
        assert_eq!(config.met_sampler().variability, 0.0);

        let flights = config.flight_contexts().unwrap();
        assert_eq!(flights.len(), 2);
        assert!(matches!(flights[0].candidates, CandidateSource::Explicit(ref l) if l.len() == 2));
        assert_eq!(flights[1].candidates, CandidateSource::Region(RouteRegion::European));

        let registry = config.registry().unwrap();
        assert_eq!(registry.lookup("E2E").fuel_reserve_kg, 5000.0);
    }

    #[test]
    fn test_region_aliases() {
        let toml_content = BASIC.replace("region = \"european\"", "region = \"transatlantic\"");
        let config = ScenarioConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.flights[1].region, Some(RouteRegion::NorthAtlantic));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DIVERSION_TEST_FUEL_KG", "12345.0");
        let toml_content = BASIC.replace("fuel_on_board_kg = 6000.0", "fuel_on_board_kg = ${DIVERSION_TEST_FUEL_KG}");

        let config = ScenarioConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.flights[1].fuel_on_board_kg, 12345.0);

        std::env::remove_var("DIVERSION_TEST_FUEL_KG");
    }

    #[test]
    fn test_invalid_flight_position_fails_validation() {
        let toml_content = BASIC.replace("latitude_deg = 50.5", "latitude_deg = 95.0");
        let config = ScenarioConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DiversionError::InvalidInputError { .. })
        ));
    }

    #[test]
    fn test_negative_fuel_flow_profile_fails_validation() {
        let toml_content = BASIC.replace("fuel_flow_kg_per_hr = 2800.0", "fuel_flow_kg_per_hr = -2800.0");
        let config = ScenarioConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
        assert!(config.registry().is_err());
    }

    #[test]
    fn test_region_and_alternates_conflict() {
        let toml_content = BASIC.replace(
            "fuel_on_board_kg = 20000.0\n",
            "fuel_on_board_kg = 20000.0\nregion = \"nat\"\n",
        );
        let config = ScenarioConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DiversionError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_duplicate_flight_ids() {
        let toml_content = BASIC.replace("id = \"EUR002\"", "id = \"NAT001\"");
        let config = ScenarioConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = ScenarioConfig::from_toml_str("[scenario\nname = ");
        assert!(matches!(
            result,
            Err(DiversionError::ConfigValidationError { ref field, .. }) if field == "toml_parsing"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = ScenarioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.flights[0].id, "NAT001");
    }
}
