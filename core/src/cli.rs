use crate::types::{IngestOutcome, SessionSummary, TrainingSeries};

/// Rapport-tekst for én økt (samme tall som dashboardet viser).
pub fn format_session_report(series: &TrainingSeries) -> String {
    let s: SessionSummary = series.summary();
    let mut out = String::new();
    out.push_str(&format!("--- Session Report: {} ({}) ---\n", series.file_name(), series.format()));
    out.push_str(&format!("Samples: {}\n", s.sample_count));
    out.push_str(&format!("Duration: {}\n", format_duration(s.duration_s)));
    out.push_str(&format!("Distance: {:.1} km\n", s.total_distance_km));
    out.push_str(&format!("Avg speed: {:.1} km/h\n", s.avg_speed_kmh));
    out.push_str(&format!("Elevation gain: {:.0} m\n", s.elevation_gain_m));
    out.push_str(&format!("Avg power: {:.0} W (NP~{:.0} W, IF {:.2})\n", s.avg_power_w, s.normalized_power_w, s.intensity_factor));
    out.push_str(&format!("Max power: {:.0} W\n", s.max_power_w));
    out.push_str(&format!("Avg HR: {:.0} bpm\n", s.avg_hr_bpm));
    out.push_str(&format!("TSS: {:.0}\n", s.tss));
    out
}

pub fn print_session_report(outcome: &IngestOutcome) {
    match outcome {
        IngestOutcome::Samples(series) => print!("{}", format_session_report(series)),
        IngestOutcome::Empty { file_name, .. } => println!("No trackpoints found in {file_name}."),
    }
}

/// h:mm:ss
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 { secs.round() as u64 } else { 0 };
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
