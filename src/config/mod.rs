pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::met::SyntheticMetSampler;
#[cfg(feature = "cli")]
use crate::core::report::ReportFormat;
#[cfg(feature = "cli")]
use crate::domain::model::{CandidateSource, FlightContext, RouteRegion, Waypoint};
#[cfg(feature = "cli")]
use crate::utils::error::{DiversionError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_latitude, validate_longitude, validate_non_empty_string, validate_non_negative,
    validate_range, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "diversion-engine")]
#[command(about = "Pick the best diversion alternate for one flight")]
pub struct CliConfig {
    #[arg(long, default_value = "A320")]
    pub aircraft_type: String,

    /// Current latitude in degrees (south negative)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Current longitude in degrees (west negative)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    #[arg(long)]
    pub fuel_kg: f64,

    /// Regional candidate list
    #[arg(long, value_enum)]
    pub region: Option<RouteRegion>,

    /// Explicit alternate as NAME:LAT:LON, repeatable
    #[arg(long = "alternate", value_parser = parse_alternate, allow_hyphen_values = true)]
    pub alternates: Vec<Waypoint>,

    #[arg(long, default_value = "270", allow_hyphen_values = true)]
    pub wind_dir: f64,

    #[arg(long, default_value = "0")]
    pub wind_speed: f64,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub isa_dev: f64,

    /// Disable position-derived weather perturbation
    #[arg(long)]
    pub steady: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn met_sampler(&self) -> SyntheticMetSampler {
        if self.steady {
            SyntheticMetSampler::steady(self.wind_dir, self.wind_speed, self.isa_dev)
        } else {
            SyntheticMetSampler::new(self.wind_dir, self.wind_speed, self.isa_dev)
        }
    }

    pub fn candidates(&self) -> Result<CandidateSource> {
        match (self.region, self.alternates.is_empty()) {
            (Some(_), false) => Err(DiversionError::ConfigValidationError {
                field: "region".to_string(),
                message: "Use either --region or --alternate, not both".to_string(),
            }),
            (Some(region), true) => Ok(CandidateSource::Region(region)),
            (None, false) => Ok(CandidateSource::Explicit(self.alternates.clone())),
            (None, true) => Err(DiversionError::NoAlternatesAvailable),
        }
    }

    pub fn flight_context(&self) -> Result<FlightContext> {
        Ok(FlightContext {
            flight_id: "cli".to_string(),
            aircraft_type: self.aircraft_type.clone(),
            latitude_deg: self.lat,
            longitude_deg: self.lon,
            fuel_on_board_kg: self.fuel_kg,
            candidates: self.candidates()?,
        })
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("aircraft_type", &self.aircraft_type)?;
        validate_latitude("lat", self.lat)?;
        validate_longitude("lon", self.lon)?;
        validate_non_negative("fuel_kg", self.fuel_kg)?;
        validate_range("wind_dir", self.wind_dir, 0.0, 360.0)?;
        validate_non_negative("wind_speed", self.wind_speed)?;
        validate_range("isa_dev", self.isa_dev, -60.0, 60.0)?;
        self.candidates().map(|_| ())
    }
}

/// 解析 NAME:LAT:LON
#[cfg(feature = "cli")]
pub fn parse_alternate(value: &str) -> std::result::Result<Waypoint, String> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("expected NAME:LAT:LON, got '{}'", value));
    }
    let lat: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude '{}': {}", parts[1], e))?;
    let lon: f64 = parts[2]
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude '{}': {}", parts[2], e))?;
    Waypoint::new(parts[0].trim(), lat, lon).map_err(|e| e.to_string())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alternate() {
        let wp = parse_alternate("BIKF:64.13:-21.94").unwrap();
        assert_eq!(wp.name, "BIKF");
        assert_eq!(wp.longitude_deg, -21.94);
        assert!(parse_alternate("BIKF:64.13").is_err());
        assert!(parse_alternate("BIKF:north:-21.94").is_err());
        assert!(parse_alternate("BIKF:99:-21.94").is_err());
    }

    #[test]
    fn test_cli_parsing_with_region() {
        let config = CliConfig::parse_from([
            "diversion-engine",
            "--aircraft-type",
            "B77W",
            "--lat",
            "54.0",
            "--lon",
            "-30.0",
            "--fuel-kg",
            "20000",
            "--region",
            "transatlantic",
            "--wind-speed",
            "30",
            "--steady",
        ]);
        assert!(config.validate().is_ok());
        assert_eq!(config.candidates().unwrap(), CandidateSource::Region(RouteRegion::NorthAtlantic));
        assert_eq!(config.format, ReportFormat::Text);
        assert_eq!(config.met_sampler().variability, 0.0);
    }

    #[test]
    fn test_cli_requires_candidates() {
        let config = CliConfig::parse_from([
            "diversion-engine",
            "--lat",
            "54.0",
            "--lon",
            "-30.0",
            "--fuel-kg",
            "20000",
        ]);
        assert!(matches!(
            config.validate(),
            Err(DiversionError::NoAlternatesAvailable)
        ));
    }

    #[test]
    fn test_cli_explicit_alternates() {
        let config = CliConfig::parse_from([
            "diversion-engine",
            "--lat",
            "54.0",
            "--lon",
            "-30.0",
            "--fuel-kg",
            "20000",
            "--alternate",
            "BIKF:64.13:-21.94",
            "--alternate",
            "CYQX:48.94:-54.57",
            "--format",
            "json",
        ]);
        assert!(config.validate().is_ok());
        let flight = config.flight_context().unwrap();
        match flight.candidates {
            CandidateSource::Explicit(list) => assert_eq!(list.len(), 2),
            other => panic!("unexpected candidates {:?}", other),
        }
    }
}
