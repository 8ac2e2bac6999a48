use crate::domain::model::{RouteRegion, Waypoint};
use std::sync::LazyLock;

const NORTH_ATLANTIC: &[(&str, f64, f64)] = &[
    ("BIKF", 64.13, -21.94),
    ("CYQX", 48.94, -54.57),
    ("LPLA", 38.7618, -27.0908),
    ("EINN", 52.7020, -8.9248),
    ("BGSF", 67.0122, -50.7116),
    ("CYYT", 47.6186, -52.7519),
];

const EUROPEAN: &[(&str, f64, f64)] = &[
    ("EGLL", 51.4706, -0.4619),
    ("LFPG", 49.0097, 2.5479),
    ("EHAM", 52.3105, 4.7683),
    ("EDDF", 50.0379, 8.5622),
    ("EBBR", 50.9014, 4.4844),
    ("EIDW", 53.4213, -6.2701),
];

fn build(table: &[(&str, f64, f64)]) -> Vec<Waypoint> {
    table
        .iter()
        .map(|&(name, lat, lon)| Waypoint {
            name: name.to_string(),
            latitude_deg: lat,
            longitude_deg: lon,
        })
        .collect()
}

static NORTH_ATLANTIC_ALTERNATES: LazyLock<Vec<Waypoint>> = LazyLock::new(|| build(NORTH_ATLANTIC));
static EUROPEAN_ALTERNATES: LazyLock<Vec<Waypoint>> = LazyLock::new(|| build(EUROPEAN));

impl RouteRegion {
    /// Fixed candidate list for this region.
    pub fn alternates(&self) -> &'static [Waypoint] {
        match self {
            RouteRegion::NorthAtlantic => &NORTH_ATLANTIC_ALTERNATES,
            RouteRegion::European => &EUROPEAN_ALTERNATES,
        }
    }
}
