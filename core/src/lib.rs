pub mod cli;
pub mod distance;
pub mod error;
pub mod extract;
pub mod fields;
pub mod ingest;
pub mod metrics;
pub mod sniff;
pub mod speed;
pub mod storage;
pub mod telemetry;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use distance::{fill_distance, haversine_km};
pub use error::IngestError;
pub use extract::{extractor_for, GpxExtractor, TcxExtractor, TrackpointExtractor};
pub use ingest::{
    derive_missing, ingest_bytes, ingest_bytes_with, ingest_json, ingest_path,
    parse_training_file, IngestReport,
};
pub use metrics::summarize;
pub use sniff::sniff_format;
pub use speed::derive_speed;
pub use storage::{load_config, save_config, save_series_json, write_series_csv};
pub use types::{
    DerivationStats, Format, IngestConfig, IngestOutcome, RawSample, SessionSummary, Source,
    TrainingSeries,
};
