use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::error::IngestError;
use crate::ingest::IngestReport;
use crate::types::{IngestConfig, IngestOutcome, TrainingSeries};

/// Leser inn konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> Result<IngestConfig, IngestError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("Fant ikke konfig på {}, bruker default", path.display());
        return Ok(IngestConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let de = &mut serde_json::Deserializer::from_str(&contents);
    let cfg: IngestConfig = serde_path_to_error::deserialize(de)
        .map_err(|e| IngestError::Config(format!("{}: {} at {}", path.display(), e.inner(), e.path())))?;
    info!("Konfig lastet fra {}", path.display());
    Ok(cfg)
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &IngestConfig, path: impl AsRef<Path>) -> Result<(), IngestError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Konfig lagret til {}", path.display());
    Ok(())
}

/// Skriver samme JSON-dokument som `ingest_json` til disk.
pub fn save_series_json(outcome: &IngestOutcome, path: impl AsRef<Path>) -> Result<(), IngestError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&IngestReport::from_outcome(outcome))?;
    std::fs::write(path, json).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub const CSV_HEADER: [&str; 8] = [
    "t_offset_s",
    "elevation_m",
    "lat",
    "lon",
    "distance_km",
    "speed_kmh",
    "power_w",
    "hr_bpm",
];

/// Én rad per sample for chart-laget. Manglende lat/lon blir tomme felt.
pub fn write_series_csv<W: Write>(series: &TrainingSeries, writer: W) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CSV_HEADER)?;
    for s in series.samples() {
        let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        w.write_record([
            s.t_offset_s.to_string(),
            s.elevation_m.to_string(),
            opt(s.lat),
            opt(s.lon),
            s.distance_km.to_string(),
            s.speed_kmh.to_string(),
            s.power_w.to_string(),
            s.hr_bpm.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
