use crate::types::{RawSample, Source};

/// Jordradius (km) for haversine.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Storsirkelavstand (km) mellom to punkter i grader.
/// Identiske punkter gir eksakt 0.0.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // avrundingsstøy kan gi a litt utenfor [0, 1] → NaN i sqrt
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Fyller akkumulert distanse for samples merket `Source::Derived`.
///
/// Kun nabopar (i-1, i) summeres. Uten posisjon på begge sider bæres forrige
/// verdi videre, så serien aldri går ned. Innspilte distanser røres ikke.
/// Returnerer antall samples som ble fylt.
pub fn fill_distance(samples: &mut [RawSample]) -> usize {
    let mut filled = 0;
    for i in 0..samples.len() {
        if samples[i].distance_src == Source::Recorded {
            continue;
        }
        let d = if i == 0 {
            0.0
        } else {
            let (prev, cur) = (&samples[i - 1], &samples[i]);
            let step = match (prev.lat, prev.lon, cur.lat, cur.lon) {
                (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) => {
                    haversine_km(lat1, lon1, lat2, lon2)
                }
                _ => 0.0,
            };
            prev.distance_km + step
        };
        samples[i].distance_km = d;
        filled += 1;
    }
    filled
}
