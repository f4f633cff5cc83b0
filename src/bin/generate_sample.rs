use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

const SAMPLES: usize = 5000;
const SIGNAL_FILE: &str = "PIBPIF_sample.dat";
const BACKGROUND_FILE: &str = "PIBPIF_sample_background.dat";

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
}

/// Dark-level offsets of the two channels.
const BACKGROUND_LEVEL: (f64, f64) = (0.35, 0.20);

fn background_row(rng: &mut SimpleRng) -> (f64, f64) {
    (
        rng.gauss(BACKGROUND_LEVEL.0, 0.01),
        rng.gauss(BACKGROUND_LEVEL.1, 0.008),
    )
}

/// A slow oscillation with an occasional pulse on channel B.
fn signal_row(i: usize, rng: &mut SimpleRng) -> (f64, f64) {
    let t = i as f64 / SAMPLES as f64;
    let pib = 1.5 + 0.4 * (2.0 * std::f64::consts::PI * 6.0 * t).sin() + 0.3 * t;
    let pulse = if i % 700 < 40 { 0.8 } else { 0.0 };
    let pif = 0.9 + 0.2 * (2.0 * std::f64::consts::PI * 3.5 * t).cos() + pulse;
    let (bg_a, bg_b) = background_row(rng);
    (pib + bg_a + rng.gauss(0.0, 0.02), pif + bg_b + rng.gauss(0.0, 0.015))
}

fn write_pair_file(path: &str, title: &str, rows: &[(f64, f64)]) -> Result<(), Box<dyn Error>> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "{title}")?;
    writeln!(file, "PIB,PIF")?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for (a, b) in rows {
        writer.write_record([format!("{a:.6}"), format!("{b:.6}")])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let signal: Vec<(f64, f64)> = (0..SAMPLES).map(|i| signal_row(i, &mut rng)).collect();
    let background: Vec<(f64, f64)> = (0..SAMPLES).map(|_| background_row(&mut rng)).collect();

    write_pair_file(SIGNAL_FILE, "# sample signal, synthetic", &signal)
        .expect("Failed to write signal file");
    write_pair_file(BACKGROUND_FILE, "# sample background, synthetic", &background)
        .expect("Failed to write background file");

    println!("Wrote {SAMPLES} rows each to {SIGNAL_FILE} and {BACKGROUND_FILE}");
}
