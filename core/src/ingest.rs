//! Pipeline: filnavn + bytes → sniff → uttrekk → distanse → fart → serie.

use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::distance::fill_distance;
use crate::error::IngestError;
use crate::extract::extractor_for;
use crate::sniff::{decode_text, parse_document, sniff_format};
use crate::speed::derive_speed;
use crate::telemetry;
use crate::types::{
    DerivationStats, Format, IngestConfig, IngestOutcome, RawSample, SessionSummary,
    TrainingSeries,
};

/// Ingest med default-konfig.
pub fn ingest_bytes(file_name: &str, bytes: &[u8]) -> Result<IngestOutcome, IngestError> {
    ingest_bytes_with(file_name, bytes, &IngestConfig::default())
}

pub fn ingest_bytes_with(
    file_name: &str,
    bytes: &[u8],
    cfg: &IngestConfig,
) -> Result<IngestOutcome, IngestError> {
    run(file_name, bytes, cfg).map_err(|e| {
        warn!("{file_name}: {e}");
        telemetry::file_rejected(e.reason());
        e
    })
}

fn run(file_name: &str, bytes: &[u8], cfg: &IngestConfig) -> Result<IngestOutcome, IngestError> {
    // 1️⃣ Format før noe som helst parses
    let format = sniff_format(file_name)?;
    telemetry::file_accepted(format.as_str());

    // 2️⃣ Markup
    let text = decode_text(bytes)?;
    let doc = parse_document(text)?;

    // 3️⃣ Rå samples
    let mut samples = extractor_for(format).extract(&doc, cfg);
    telemetry::trackpoints(format.as_str(), samples.len());
    if samples.is_empty() {
        info!("{file_name}: ingen trackpoints ({format})");
        return Ok(IngestOutcome::Empty { format, file_name: file_name.to_string() });
    }

    // 4️⃣ Fallbacks (hopper over innspilte verdier)
    let derivation = derive_missing(&mut samples, cfg);
    telemetry::derived("distance", derivation.distance_filled);
    telemetry::derived("speed", derivation.speed_derived);

    info!(
        "{file_name}: {} samples ({format}), distance filled={}, speed derived={}",
        samples.len(),
        derivation.distance_filled,
        derivation.speed_derived
    );

    Ok(IngestOutcome::Samples(TrainingSeries::new(
        format,
        file_name.to_string(),
        samples,
        derivation,
    )))
}

/// Distanse først, fart etterpå (fart trenger ferdig distanse).
pub fn derive_missing(samples: &mut [RawSample], cfg: &IngestConfig) -> DerivationStats {
    let distance_filled = fill_distance(samples);
    let speed_derived = derive_speed(samples, cfg.max_speed_kmh);
    DerivationStats { distance_filled, speed_derived }
}

/// Leser fila fra disk og kjører pipeline. Filnavnet brukes til sniffing.
pub fn ingest_path(path: impl AsRef<Path>, cfg: &IngestConfig) -> Result<IngestOutcome, IngestError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    ingest_bytes_with(&name, &bytes, cfg)
}

/// Flat variant: bare samples. Tom fil → tom Vec.
pub fn parse_training_file(file_name: &str, bytes: &[u8]) -> Result<Vec<RawSample>, IngestError> {
    ingest_bytes(file_name, bytes).map(IngestOutcome::into_samples)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Ok,
    Empty,
}

/// JSON-dokumentet presentasjonslaget får.
#[derive(Debug, Serialize)]
pub struct IngestReport<'a> {
    pub status: IngestStatus,
    pub format: Format,
    pub file_name: &'a str,
    pub samples: &'a [RawSample],
    pub summary: SessionSummary,
    pub derivation: DerivationStats,
}

impl<'a> IngestReport<'a> {
    pub fn from_outcome(outcome: &'a IngestOutcome) -> Self {
        match outcome {
            IngestOutcome::Samples(series) => IngestReport {
                status: IngestStatus::Ok,
                format: series.format(),
                file_name: series.file_name(),
                samples: series.samples(),
                summary: series.summary(),
                derivation: series.derivation(),
            },
            IngestOutcome::Empty { format, file_name } => IngestReport {
                status: IngestStatus::Empty,
                format: *format,
                file_name,
                samples: &[],
                summary: SessionSummary::default(),
                derivation: DerivationStats::default(),
            },
        }
    }
}

pub fn ingest_json(file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let outcome = ingest_bytes(file_name, bytes)?;
    Ok(serde_json::to_string(&IngestReport::from_outcome(&outcome))?)
}
