//! Trackpoint-uttrekk: én variant per kildeformat, samme kontrakt.

use chrono::{DateTime, NaiveDateTime, Utc};
use roxmltree::Document;

use crate::types::{Format, IngestConfig, RawSample};

pub mod gpx;
pub mod tcx;

pub use gpx::GpxExtractor;
pub use tcx::TcxExtractor;

/// Produserer en ordnet sample-sekvens fra et ferdig parset dokument.
///
/// Distanse/fart som ikke finnes i kilden markeres `Source::Derived` og
/// fylles senere av `distance`/`speed`; extractoren trenger ikke kjenne til det.
pub trait TrackpointExtractor {
    fn format(&self) -> Format;
    fn extract(&self, doc: &Document<'_>, cfg: &IngestConfig) -> Vec<RawSample>;
}

static GPX: GpxExtractor = GpxExtractor;
static TCX: TcxExtractor = TcxExtractor;

pub fn extractor_for(format: Format) -> &'static dyn TrackpointExtractor {
    match format {
        Format::Gpx => &GPX,
        Format::Tcx => &TCX,
    }
}

/// Tidsnullpunkt for sekvensen. Settes av første record med tidsstempel
/// og sendes eksplisitt gjennom uttrekket.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrigin {
    origin: Option<DateTime<Utc>>,
}

impl TimeOrigin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<DateTime<Utc>> {
        self.origin
    }

    /// Offset i sekunder for `ts`. Første tidsstempel blir origin (offset 0).
    /// Manglende tidsstempel gir 0 (ingen interpolering).
    pub fn offset_s(&mut self, ts: Option<DateTime<Utc>>) -> f64 {
        let Some(ts) = ts else { return 0.0 };
        let base = *self.origin.get_or_insert(ts);
        (ts - base).num_milliseconds() as f64 / 1000.0
    }
}

/// ISO-8601 med sone, inkl. basic offset (`+0000`) og minuttpresisjon.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// ISO-8601. Uten sone tolkes tiden som UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // `Z` → `+0000` så %z dekker begge
    let zoned = match raw.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(rest) => format!("{rest}+0000"),
        None => raw.to_string(),
    };
    ZONED_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(&zoned, f).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|naive| naive.and_utc())
        })
}
