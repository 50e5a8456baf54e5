use ordered_float::OrderedFloat;

use crate::types::{RawSample, SessionSummary};

/// Fast referanse-FTP (W). Ingen per-bruker konfig ennå.
pub const FTP_REFERENCE_W: f64 = 250.0;

/// Forenklet NP-faktor: NP ≈ snittwatt × 1.05.
pub const NP_FACTOR: f64 = 1.05;

/// Varighet (s) = offset på siste sample. Negative verdier (tid som går
/// bakover i fila) regnes som 0.
pub fn duration_s(samples: &[RawSample]) -> f64 {
    samples.last().map(|s| s.t_offset_s.max(0.0)).unwrap_or(0.0)
}

pub fn total_distance_km(samples: &[RawSample]) -> f64 {
    samples.last().map(|s| s.distance_km).unwrap_or(0.0)
}

/// Snittfart = total distanse / total tid. 0 hvis tiden er 0.
pub fn avg_speed_kmh(samples: &[RawSample]) -> f64 {
    let hours = duration_s(samples) / 3600.0;
    if hours > 0.0 { total_distance_km(samples) / hours } else { 0.0 }
}

/// Sum av positive høydeendringer mellom nabosamples. Nedoverbakker teller 0.
pub fn elevation_gain_m(samples: &[RawSample]) -> f64 {
    samples
        .windows(2)
        .map(|w| (w[1].elevation_m - w[0].elevation_m).max(0.0))
        .sum()
}

pub fn max_power_w(samples: &[RawSample]) -> f64 {
    samples
        .iter()
        .map(|s| OrderedFloat(s.power_w))
        .max()
        .map(|m| m.into_inner())
        .unwrap_or(0.0)
}

/// Snitt over alle samples (manglende watt er lagret som 0 og teller med).
pub fn avg_power_w(samples: &[RawSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.power_w).sum::<f64>() / samples.len() as f64
}

/// Snittpuls over samples med puls > 0.
pub fn avg_hr_bpm(samples: &[RawSample]) -> f64 {
    let mut sum = 0.0;
    let mut cnt = 0usize;
    for s in samples {
        if s.hr_bpm > 0.0 {
            sum += s.hr_bpm;
            cnt += 1;
        }
    }
    if cnt == 0 { 0.0 } else { sum / cnt as f64 }
}

/// Forenklet Normalized Power (ikke 30s/^4-varianten).
pub fn normalized_power(avg_power_w: f64) -> f64 {
    avg_power_w * NP_FACTOR
}

/// IF = NP/FTP
pub fn intensity_factor(np: f64, ftp: f64) -> f64 {
    if ftp > 0.0 { np / ftp } else { 0.0 }
}

/// TSS = (sek × NP × IF) / (FTP × 3600) × 100, avrundet. Ikke-endelig → 0.
pub fn training_stress_score(duration_s: f64, np: f64, r#if: f64, ftp: f64) -> f64 {
    let tss = ((duration_s * np * r#if) / (ftp * 3600.0) * 100.0).round();
    if tss.is_finite() { tss } else { 0.0 }
}

/// Oppsummering av en ferdig serie. Tom serie → alle felt 0.
pub fn summarize(samples: &[RawSample]) -> SessionSummary {
    if samples.is_empty() {
        return SessionSummary::default();
    }

    let duration = duration_s(samples);
    let avg_p = avg_power_w(samples);
    let np = normalized_power(avg_p);
    let r#if = intensity_factor(np, FTP_REFERENCE_W);

    SessionSummary {
        total_distance_km: total_distance_km(samples),
        elevation_gain_m: elevation_gain_m(samples),
        avg_speed_kmh: avg_speed_kmh(samples),
        max_power_w: max_power_w(samples),
        tss: training_stress_score(duration, np, r#if, FTP_REFERENCE_W),
        duration_s: duration,
        avg_power_w: avg_p,
        normalized_power_w: np,
        intensity_factor: r#if,
        avg_hr_bpm: avg_hr_bpm(samples),
        sample_count: samples.len(),
    }
}
