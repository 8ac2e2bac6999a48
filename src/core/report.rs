use crate::domain::model::{DiversionResult, SelectionOutcome};
use crate::utils::error::{DiversionError, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
    Tsv,
}

impl std::str::FromStr for ReportFormat {
    type Err = DiversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "tsv" => Ok(ReportFormat::Tsv),
            other => Err(DiversionError::invalid_input(
                "output.format",
                other,
                "Valid formats: text, json, csv, tsv",
            )),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    fuel_critical: bool,
    best_index: usize,
    best: &'a DiversionResult,
    all: &'a [DiversionResult],
}

#[derive(Serialize)]
struct ReportRow<'a> {
    alternate: &'a str,
    latitude_deg: f64,
    longitude_deg: f64,
    distance_nm: f64,
    ground_speed_kt: f64,
    time_hr: f64,
    fuel_required_kg: f64,
    remaining_fuel_kg: f64,
    reachable: bool,
    best: bool,
    notes: &'a str,
}

pub fn render(outcome: &SelectionOutcome, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(outcome)),
        ReportFormat::Json => render_json(outcome),
        ReportFormat::Csv => render_delimited(outcome, b','),
        ReportFormat::Tsv => render_delimited(outcome, b'\t'),
    }
}

fn render_text(outcome: &SelectionOutcome) -> String {
    let mut lines = Vec::with_capacity(outcome.all.len() + 3);
    if outcome.is_fuel_critical() {
        lines.push(format!(
            "🚨 FUEL CRITICAL: no alternate reachable, least-bad is {} ({:.1} kg short)",
            outcome.best.alternate.name, -outcome.best.remaining_fuel_kg
        ));
    }
    lines.push(format!(
        "  {:<6} {:>8} {:>7} {:>6} {:>10} {:>10}  {}",
        "ALT", "DIST nm", "GS kt", "TIME h", "REQ kg", "REM kg", "REACH"
    ));
    for (index, result) in outcome.all.iter().enumerate() {
        let marker = if outcome.is_best(index) { '*' } else { ' ' };
        lines.push(format!(
            "{} {:<6} {:>8.1} {:>7.1} {:>6.1} {:>10.1} {:>10.1}  {}",
            marker,
            result.alternate.name,
            result.distance_nm,
            result.ground_speed_kt,
            result.time_hr,
            result.fuel_required_kg,
            result.remaining_fuel_kg,
            if result.reachable { "yes" } else { "NO" }
        ));
    }
    lines.push(format!("Best: {} ({})", outcome.best.alternate.name, outcome.best.notes));
    lines.join("\n")
}

fn render_json(outcome: &SelectionOutcome) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        fuel_critical: outcome.is_fuel_critical(),
        best_index: outcome.best_index,
        best: &outcome.best,
        all: &outcome.all,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_delimited(outcome: &SelectionOutcome, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for (index, result) in outcome.all.iter().enumerate() {
        writer.serialize(ReportRow {
            alternate: &result.alternate.name,
            latitude_deg: result.alternate.latitude_deg,
            longitude_deg: result.alternate.longitude_deg,
            distance_nm: result.distance_nm,
            ground_speed_kt: result.ground_speed_kt,
            time_hr: result.time_hr,
            fuel_required_kg: result.fuel_required_kg,
            remaining_fuel_kg: result.remaining_fuel_kg,
            reachable: result.reachable,
            best: outcome.is_best(index),
            notes: &result.notes,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DiversionError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| DiversionError::ConfigurationError {
        message: format!("report is not valid UTF-8: {}", e),
    })
}
