use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::summarize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Gpx,
    Tcx,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Gpx => "gpx",
            Format::Tcx => "tcx",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hvor en verdi kommer fra: lest direkte fra fila, eller beregnet av oss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Recorded,
    #[default]
    Derived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawSample {
    pub t_offset_s: f64,      // sekunder fra første sample
    pub elevation_m: f64,     // meter
    pub lat: Option<f64>,     // grader (kun GPX)
    pub lon: Option<f64>,     // grader (kun GPX)
    pub distance_km: f64,     // akkumulert
    pub speed_kmh: f64,       // km/t
    pub power_w: f64,         // watt, 0 hvis mangler
    pub hr_bpm: f64,          // bpm, 0 hvis mangler
    #[serde(default)]
    pub distance_src: Source,
    #[serde(default)]
    pub speed_src: Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub total_distance_km: f64,
    pub elevation_gain_m: f64,
    pub avg_speed_kmh: f64,
    pub max_power_w: f64,
    pub tss: f64,
    pub duration_s: f64,
    pub avg_power_w: f64,
    pub normalized_power_w: f64,
    pub intensity_factor: f64,
    pub avg_hr_bpm: f64,
    pub sample_count: usize,
}

/// Hvor mange samples som gikk gjennom fallback-banene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DerivationStats {
    pub distance_filled: usize,
    pub speed_derived: usize,
}

/// Ferdig tidsserie for én fil. Bygges av pipeline og leveres read-only.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSeries {
    format: Format,
    file_name: String,
    samples: Vec<RawSample>,
    derivation: DerivationStats,
}

impl TrainingSeries {
    pub(crate) fn new(
        format: Format,
        file_name: String,
        samples: Vec<RawSample>,
        derivation: DerivationStats,
    ) -> Self {
        Self { format, file_name, samples, derivation }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    pub fn derivation(&self) -> DerivationStats {
        self.derivation
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        summarize(&self.samples)
    }

    pub fn into_samples(self) -> Vec<RawSample> {
        self.samples
    }
}

/// Resultat av et vellykket kall. `Empty` betyr "ingen data", ikke "parse feilet".
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    Samples(TrainingSeries),
    Empty { format: Format, file_name: String },
}

impl IngestOutcome {
    pub fn format(&self) -> Format {
        match self {
            IngestOutcome::Samples(s) => s.format(),
            IngestOutcome::Empty { format, .. } => *format,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, IngestOutcome::Empty { .. })
    }

    pub fn series(&self) -> Option<&TrainingSeries> {
        match self {
            IngestOutcome::Samples(s) => Some(s),
            IngestOutcome::Empty { .. } => None,
        }
    }

    /// Oppsummering; alle felt 0 for tom fil.
    pub fn summary(&self) -> SessionSummary {
        self.series().map(TrainingSeries::summary).unwrap_or_default()
    }

    pub fn into_samples(self) -> Vec<RawSample> {
        match self {
            IngestOutcome::Samples(s) => s.into_samples(),
            IngestOutcome::Empty { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IngestConfig {
    /// Ekstra feltnavn som prøves etter de innebygde (f.eks. "ns5:hr").
    #[serde(default)]
    pub extra_hr_fields: Vec<String>,
    #[serde(default)]
    pub extra_power_fields: Vec<String>,
    #[serde(default)]
    pub extra_speed_fields: Vec<String>,
    /// Øvre grense for *beregnet* fart (km/t). None = ingen grense.
    #[serde(default)]
    pub max_speed_kmh: Option<f64>,
}
