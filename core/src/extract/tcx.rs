use log::{debug, trace};
use roxmltree::{Document, Node};

use super::{parse_timestamp, TimeOrigin, TrackpointExtractor};
use crate::fields::{descendant_f64, descendant_text, first_descendant, name_matches, FieldChain};
use crate::types::{Format, IngestConfig, RawSample, Source};

pub const POWER_FIELDS: &[&str] = &["Watts", "ns3:Watts"];
/// Fart i m/s, enten direkte under Trackpoint eller i TPX-extension.
pub const SPEED_FIELDS: &[&str] = &["Speed", "ns3:Speed"];

const MS_TO_KMH: f64 = 3.6;

/// Distansebærende variant: `DistanceMeters` og evt. `Speed` brukes som de er.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcxExtractor;

/// `<HeartRateBpm><Value>141</Value></HeartRateBpm>`
fn heart_rate(pt: Node<'_, '_>) -> Option<f64> {
    first_descendant(pt, "HeartRateBpm").and_then(|wrapper| descendant_f64(wrapper, "Value"))
}

impl TrackpointExtractor for TcxExtractor {
    fn format(&self) -> Format {
        Format::Tcx
    }

    fn extract(&self, doc: &Document<'_>, cfg: &IngestConfig) -> Vec<RawSample> {
        let power =
            FieldChain::new(POWER_FIELDS.iter().copied()).extended(&cfg.extra_power_fields);
        let speed =
            FieldChain::new(SPEED_FIELDS.iter().copied()).extended(&cfg.extra_speed_fields);
        let extra_hr = FieldChain::new(cfg.extra_hr_fields.iter().cloned());

        let mut origin = TimeOrigin::new();
        let mut out = Vec::new();

        for pt in doc.descendants().filter(|n| name_matches(*n, "Trackpoint")) {
            let raw_time = descendant_text(pt, "Time");
            let ts = raw_time.and_then(parse_timestamp);
            if ts.is_none() {
                debug!("Trackpoint #{} uten gyldig tid ({raw_time:?}), offset 0", out.len());
            }

            let (distance_km, distance_src) = match descendant_f64(pt, "DistanceMeters") {
                Some(m) => (m / 1000.0, Source::Recorded),
                None => (0.0, Source::Derived),
            };
            let (speed_kmh, speed_src) = match speed.first_f64(pt) {
                Some(ms) => (ms * MS_TO_KMH, Source::Recorded),
                None => (0.0, Source::Derived),
            };

            let sample = RawSample {
                t_offset_s: origin.offset_s(ts),
                elevation_m: descendant_f64(pt, "AltitudeMeters").unwrap_or(0.0),
                lat: None,
                lon: None,
                distance_km,
                speed_kmh,
                power_w: power.f64_or_zero(pt),
                hr_bpm: heart_rate(pt).or_else(|| extra_hr.first_f64(pt)).unwrap_or(0.0),
                distance_src,
                speed_src,
            };
            trace!("tcx sample {:?}", sample);
            out.push(sample);
        }

        out
    }
}
