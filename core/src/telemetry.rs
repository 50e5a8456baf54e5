//! Prosess-globale tellere for ingestion (prometheus tekstformat).

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

fn counter_vec(name: &str, help: &str, labels: &[&str]) -> IntCounterVec {
    let c = IntCounterVec::new(Opts::new(name, help), labels).expect("valid metric opts");
    REGISTRY.register(Box::new(c.clone())).expect("metric registered once");
    c
}

static FILES_TOTAL: Lazy<IntCounterVec> =
    Lazy::new(|| counter_vec("ridefile_files_total", "Files accepted by the sniffer", &["format"]));

static REJECTED_TOTAL: Lazy<IntCounterVec> =
    Lazy::new(|| counter_vec("ridefile_rejected_total", "Files rejected before producing samples", &["reason"]));

static TRACKPOINTS_TOTAL: Lazy<IntCounterVec> =
    Lazy::new(|| counter_vec("ridefile_trackpoints_total", "Trackpoints extracted", &["format"]));

static DERIVED_TOTAL: Lazy<IntCounterVec> =
    Lazy::new(|| counter_vec("ridefile_derived_total", "Samples filled by a fallback", &["field"]));

static DOCUMENTS_PARSED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::new("ridefile_documents_parsed_total", "XML parse attempts")
        .expect("valid metric opts");
    REGISTRY.register(Box::new(c.clone())).expect("metric registered once");
    c
});

pub fn file_accepted(format: &str) {
    FILES_TOTAL.with_label_values(&[format]).inc();
}

pub fn file_rejected(reason: &str) {
    REJECTED_TOTAL.with_label_values(&[reason]).inc();
}

pub fn document_parse_attempted() {
    DOCUMENTS_PARSED_TOTAL.inc();
}

pub fn trackpoints(format: &str, n: usize) {
    TRACKPOINTS_TOTAL.with_label_values(&[format]).inc_by(n as u64);
}

pub fn derived(field: &str, n: usize) {
    DERIVED_TOTAL.with_label_values(&[field]).inc_by(n as u64);
}

pub fn documents_parsed() -> u64 {
    DOCUMENTS_PARSED_TOTAL.get()
}

pub fn rejected(reason: &str) -> u64 {
    REJECTED_TOTAL.with_label_values(&[reason]).get()
}

/// Alle tellere i prometheus tekstformat.
pub fn gather_text() -> String {
    // sørg for at alle familier finnes selv før første fil
    Lazy::force(&FILES_TOTAL);
    Lazy::force(&REJECTED_TOTAL);
    Lazy::force(&TRACKPOINTS_TOTAL);
    Lazy::force(&DERIVED_TOTAL);
    Lazy::force(&DOCUMENTS_PARSED_TOTAL);

    let mut buf = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&REGISTRY.gather(), &mut buf) {
        log::warn!("kunne ikke encode metrics: {e}");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
