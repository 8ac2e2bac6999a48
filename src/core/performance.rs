use crate::domain::model::AircraftProfile;
use crate::utils::error::{DiversionError, Result};
use crate::utils::validation::Validate;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Type identifier of the profile returned for unknown aircraft.
pub const DEFAULT_PROFILE_ID: &str = "DEFAULT";

// (type, CAS kt, cruise ft, fuel flow kg/h, fixed reserve kg)
const BUILTIN_PROFILES: &[(&str, f64, i32, f64, f64)] = &[
    ("A320", 450.0, 37000, 2500.0, 2000.0),
    ("A321", 450.0, 37000, 2800.0, 2200.0),
    ("A333", 470.0, 39000, 5800.0, 4500.0),
    ("A359", 488.0, 41000, 5800.0, 5000.0),
    ("B738", 453.0, 37000, 2530.0, 2000.0),
    ("B752", 460.0, 39000, 3400.0, 2800.0),
    ("B77W", 490.0, 41000, 7500.0, 6000.0),
    ("B789", 488.0, 41000, 5400.0, 5000.0),
];

/// Narrow-body figures, used when the requested type is not in the table.
fn default_profile() -> AircraftProfile {
    AircraftProfile::new(DEFAULT_PROFILE_ID, 450.0, 35000, 2600.0, 2500.0)
}

static BUILTIN: LazyLock<Arc<PerformanceRegistry>> =
    LazyLock::new(|| Arc::new(PerformanceRegistry::from_table()));

/// 機型性能表，建立後唯讀，可安全地跨執行緒共享
#[derive(Debug, Clone)]
pub struct PerformanceRegistry {
    profiles: HashMap<String, AircraftProfile>,
    default: AircraftProfile,
}

impl PerformanceRegistry {
    /// Shared instance holding the built-in table.
    pub fn builtin() -> Arc<PerformanceRegistry> {
        Arc::clone(&BUILTIN)
    }

    fn from_table() -> Self {
        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|&(id, speed, altitude, flow, reserve)| {
                (
                    id.to_string(),
                    AircraftProfile::new(id, speed, altitude, flow, reserve),
                )
            })
            .collect();

        Self {
            profiles,
            default: default_profile(),
        }
    }

    /// Built-in table extended (or overridden) by the given profiles.
    pub fn with_profiles(extra: impl IntoIterator<Item = AircraftProfile>) -> Result<Self> {
        let mut registry = Self::from_table();
        for profile in extra {
            profile.validate()?;
            let key = normalize_type(&profile.identifier);
            tracing::debug!("Registering aircraft profile {}", key);
            registry.profiles.insert(key, profile);
        }
        Ok(registry)
    }

    /// Strict lookup; unknown types are an error.
    pub fn try_lookup(&self, aircraft_type: &str) -> Result<&AircraftProfile> {
        self.profiles
            .get(&normalize_type(aircraft_type))
            .ok_or_else(|| DiversionError::UnknownAircraftError {
                aircraft_type: aircraft_type.to_string(),
            })
    }

    /// Always returns a profile. Unknown types fall back to the default profile with a warning.
    pub fn lookup(&self, aircraft_type: &str) -> AircraftProfile {
        match self.try_lookup(aircraft_type) {
            Ok(profile) => profile.clone(),
            Err(e) => {
                tracing::warn!(
                    "⚠️ {}; falling back to {} profile",
                    e,
                    self.default.identifier
                );
                self.default.clone()
            }
        }
    }

    pub fn default_profile(&self) -> &AircraftProfile {
        &self.default
    }

    pub fn known_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl Default for PerformanceRegistry {
    fn default() -> Self {
        Self::from_table()
    }
}

fn normalize_type(aircraft_type: &str) -> String {
    aircraft_type.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_type() {
        let registry = PerformanceRegistry::default();
        let profile = registry.lookup("B77W");
        assert_eq!(profile.identifier, "B77W");
        assert_eq!(profile.cruise_altitude_ft, 41000);
        assert_eq!(profile.fuel_flow_kg_per_hr, 7500.0);
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let registry = PerformanceRegistry::default();
        assert_eq!(registry.lookup("  a320 ").identifier, "A320");
    }

    #[test]
    fn test_unknown_type_falls_back_to_default() {
        let registry = PerformanceRegistry::default();
        let profile = registry.lookup("C172");
        assert_eq!(profile.identifier, DEFAULT_PROFILE_ID);
        assert_eq!(&profile, registry.default_profile());
        assert!(matches!(
            registry.try_lookup("C172"),
            Err(DiversionError::UnknownAircraftError { .. })
        ));
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let registry = PerformanceRegistry::builtin();
        for id in registry.known_types() {
            assert!(registry.try_lookup(id).unwrap().validate().is_ok(), "{}", id);
        }
        assert!(registry.default_profile().validate().is_ok());
    }

    #[test]
    fn test_with_profiles_overrides_and_extends() {
        let registry = PerformanceRegistry::with_profiles(vec![
            AircraftProfile::new("e2e", 485.0, 41000, 2800.0, 5000.0),
            AircraftProfile::new("A320", 440.0, 36000, 2400.0, 1900.0),
        ])
        .unwrap();
        assert_eq!(registry.lookup("E2E").cruise_speed_kt, 485.0);
        assert_eq!(registry.lookup("A320").cruise_speed_kt, 440.0);
    }

    #[test]
    fn test_with_profiles_rejects_invalid_profile() {
        let result = PerformanceRegistry::with_profiles(vec![AircraftProfile::new(
            "BAD", 450.0, 37000, 0.0, 2000.0,
        )]);
        assert!(matches!(
            result,
            Err(DiversionError::InvalidInputError { .. })
        ));
    }
}
