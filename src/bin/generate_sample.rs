//! Write a synthetic GeoJSON summary feed for offline use:
//!
//! ```text
//! cargo run --bin generate_sample -- sample_feed.geojson
//! cargo run -- --feed-file sample_feed.geojson
//! ```

use anyhow::{Context, Result};
use serde_json::{json, Value};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Rough centres of well-known seismic zones: (name, lon, lat, spread in degrees).
const ZONES: &[(&str, f64, f64, f64)] = &[
    ("Southern California", -117.0, 34.0, 1.5),
    ("Central Alaska", -150.0, 62.0, 3.0),
    ("Honshu, Japan", 141.0, 37.0, 2.5),
    ("Sumatra, Indonesia", 97.0, 2.0, 3.0),
    ("Central Chile", -71.5, -33.0, 2.0),
    ("Central Italy", 13.0, 42.5, 1.0),
    ("Tonga", -174.5, -20.0, 2.0),
    ("Hawaii", -155.3, 19.4, 0.5),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Gutenberg–Richter style magnitude: exponential above `min_mag`.
    fn magnitude(&mut self, min_mag: f64) -> f64 {
        let u = self.next_f64().max(1e-15);
        let m = min_mag - u.ln() / std::f64::consts::LN_10;
        (m * 10.0).round() / 10.0
    }
}

fn event(rng: &mut SimpleRng, id: usize, now_ms: i64) -> Value {
    let (zone, lon0, lat0, spread) = ZONES[(rng.next_u64() % ZONES.len() as u64) as usize];
    let lon = rng.gauss(lon0, spread).clamp(-180.0, 180.0);
    let lat = rng.gauss(lat0, spread).clamp(-90.0, 90.0);
    let depth = (rng.next_f64() * 70.0 * 10.0).round() / 10.0;
    let mag = rng.magnitude(1.0);
    let age_ms = (rng.next_f64() * 30.0 * MILLIS_PER_DAY) as i64;
    let place = format!("{:.0} km from {zone}", rng.next_f64() * 80.0 + 1.0);

    json!({
        "type": "Feature",
        "properties": {
            "mag": mag,
            "place": place,
            "time": now_ms - age_ms,
            "title": format!("M {mag:.1} - {place}"),
            "type": "earthquake"
        },
        "geometry": { "type": "Point", "coordinates": [lon, lat, depth] },
        "id": format!("sample{id:05}")
    })
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_feed.geojson".to_string());

    let mut rng = SimpleRng::new(42);
    let now_ms = chrono::Utc::now().timestamp_millis();
    let count = 2_000;

    let features: Vec<Value> = (0..count).map(|i| event(&mut rng, i, now_ms)).collect();
    let feed = json!({
        "type": "FeatureCollection",
        "metadata": {
            "generated": now_ms,
            "title": "Synthetic Magnitude 1.0+ Earthquakes, Past Month",
            "count": count
        },
        "features": features
    });

    let text = serde_json::to_string_pretty(&feed).context("serialising feed")?;
    std::fs::write(&output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {count} events to {output_path}");
    Ok(())
}
