use log::{debug, trace};
use roxmltree::Document;

use super::{parse_timestamp, TimeOrigin, TrackpointExtractor};
use crate::fields::{attr_f64, descendant_f64, descendant_text, name_matches, FieldChain};
use crate::types::{Format, IngestConfig, RawSample, Source};

/// Puls ligger i TrackPointExtension, med prefiks som varierer mellom eksportører.
pub const HR_FIELDS: &[&str] = &["gpxtpx:hr", "ns3:hr", "hr"];
pub const POWER_FIELDS: &[&str] = &["power", "gpxpx:PowerInWatts", "ns3:power"];

/// Posisjonsbasert variant: lat/lon på `trkpt`, distanse og fart beregnes senere.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpxExtractor;

impl TrackpointExtractor for GpxExtractor {
    fn format(&self) -> Format {
        Format::Gpx
    }

    fn extract(&self, doc: &Document<'_>, cfg: &IngestConfig) -> Vec<RawSample> {
        let hr = FieldChain::new(HR_FIELDS.iter().copied()).extended(&cfg.extra_hr_fields);
        let power =
            FieldChain::new(POWER_FIELDS.iter().copied()).extended(&cfg.extra_power_fields);

        let mut origin = TimeOrigin::new();
        let mut out = Vec::new();

        for pt in doc.descendants().filter(|n| name_matches(*n, "trkpt")) {
            let lat = attr_f64(pt, "lat");
            let lon = attr_f64(pt, "lon");
            if lat.is_none() || lon.is_none() {
                debug!("trkpt #{} mangler lat/lon, bruker 0", out.len());
            }

            let raw_time = descendant_text(pt, "time");
            let ts = raw_time.and_then(parse_timestamp);
            if ts.is_none() {
                debug!("trkpt #{} uten gyldig tid ({raw_time:?}), offset 0", out.len());
            }

            let sample = RawSample {
                t_offset_s: origin.offset_s(ts),
                elevation_m: descendant_f64(pt, "ele").unwrap_or(0.0),
                lat: Some(lat.unwrap_or(0.0)),
                lon: Some(lon.unwrap_or(0.0)),
                distance_km: 0.0,
                speed_kmh: 0.0,
                power_w: power.f64_or_zero(pt),
                hr_bpm: hr.f64_or_zero(pt),
                distance_src: Source::Derived,
                speed_src: Source::Derived,
            };
            trace!("gpx sample {:?}", sample);
            out.push(sample);
        }

        out
    }
}
