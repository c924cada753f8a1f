use anyhow::{Context, Result};

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

/// Format a value, leaving roughly `missing_rate` of cells blank.
fn cell(rng: &mut SimpleRng, value: f64, missing_rate: f64) -> String {
    if rng.next_f64() < missing_rate {
        String::new()
    } else {
        format!("{value:.2}")
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let groups = ["control", "treatment_a", "treatment_b"];
    let n_rows = 200;

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "subject_id",
        "group",
        "age",
        "height_cm",
        "weight_kg",
        "resting_hr",
        "score",
    ])?;

    for id in 0..n_rows {
        let group = groups[id % groups.len()];
        let age = 20.0 + (rng.next_f64() * 50.0).floor();
        let height = rng.gauss(172.0, 9.0);
        // Weight tracks height; heart rate drifts with age.
        let weight = 0.9 * height - 85.0 + rng.gauss(0.0, 7.0);
        let resting_hr = 58.0 + 0.25 * age + rng.gauss(0.0, 5.0);
        let score = match group {
            "treatment_a" => rng.gauss(62.0, 10.0),
            "treatment_b" => rng.gauss(70.0, 12.0),
            _ => rng.gauss(55.0, 10.0),
        };

        writer.write_record([
            id.to_string(),
            group.to_string(),
            format!("{age:.0}"),
            cell(&mut rng, height, 0.03),
            cell(&mut rng, weight, 0.05),
            cell(&mut rng, resting_hr, 0.02),
            cell(&mut rng, score, 0.04),
        ])?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {n_rows} rows to {output_path}");
    Ok(())
}
