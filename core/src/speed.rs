use crate::types::{RawSample, Source};

/// Fart (km/t) fra to (distanse km, tid s)-punkter. None når Δt ≤ 0.
/// Negativ distanse-delta gir 0, aldri negativ fart.
pub fn speed_kmh(d0_km: f64, d1_km: f64, t0_s: f64, t1_s: f64) -> Option<f64> {
    let dt_h = (t1_s - t0_s) / 3600.0;
    if !dt_h.is_finite() || dt_h <= 0.0 {
        return None;
    }
    let v = ((d1_km - d0_km) / dt_h).max(0.0);
    if v.is_finite() { Some(v) } else { None }
}

/// Deriverer fart for samples uten innspilt fart.
///
/// - første sample: 0
/// - Δt ≤ 0 (eller urimelig verdi over `max_speed_kmh`): forrige fart bæres videre
///
/// Returnerer antall samples som fikk beregnet fart.
pub fn derive_speed(samples: &mut [RawSample], max_speed_kmh: Option<f64>) -> usize {
    let mut derived = 0;
    for i in 0..samples.len() {
        if samples[i].speed_src == Source::Recorded {
            continue;
        }
        let v = if i == 0 {
            0.0
        } else {
            let (prev, cur) = (&samples[i - 1], &samples[i]);
            match speed_kmh(prev.distance_km, cur.distance_km, prev.t_offset_s, cur.t_offset_s) {
                Some(v) if max_speed_kmh.map_or(true, |cap| v <= cap) => v,
                Some(v) => {
                    log::debug!("sample #{i}: {v:.1} km/t over grensen, bærer forrige fart");
                    prev.speed_kmh
                }
                None => prev.speed_kmh,
            }
        };
        samples[i].speed_kmh = v;
        derived += 1;
    }
    derived
}
