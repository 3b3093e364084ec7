use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic launch table with the columns the dashboard reads.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output CSV path
    #[arg(default_value = "spacex_launch_dash.csv")]
    out: PathBuf,

    /// Number of launches to generate
    #[arg(long, default_value_t = 56)]
    launches: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    launch_site: &'a str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'a str,
}

/// (site, relative launch frequency)
const SITES: [(&str, u64); 4] = [
    ("CCAFS LC-40", 26),
    ("KSC LC-39A", 13),
    ("VAFB SLC-4E", 10),
    ("CCAFS SLC-40", 7),
];

/// (category, mean payload kg, payload std-dev, success probability)
const BOOSTERS: [(&str, f64, f64, f64); 5] = [
    ("v1.0", 300.0, 250.0, 0.2),
    ("v1.1", 2500.0, 1200.0, 0.35),
    ("FT", 4500.0, 2000.0, 0.7),
    ("B4", 5000.0, 2500.0, 0.5),
    ("B5", 4000.0, 1500.0, 0.95),
];

/// SplitMix64 stream; deterministic for a given seed.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximately normal: Irwin-Hall sum of twelve uniforms.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = (0..12).map(|_| self.unit()).sum::<f64>() - 6.0;
        mean + std_dev * z
    }

    fn weighted<'a>(&mut self, choices: &[(&'a str, u64)]) -> &'a str {
        let total: u64 = choices.iter().map(|(_, w)| w).sum();
        let mut pick = self.next_u64() % total;
        for &(name, w) in choices {
            if pick < w {
                return name;
            }
            pick -= w;
        }
        choices[choices.len() - 1].0
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = Rng(args.seed);
    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    for i in 0..args.launches {
        // Later flights fly newer boosters.
        let era = (i * BOOSTERS.len() / args.launches.max(1)).min(BOOSTERS.len() - 1);
        let (category, mean, std_dev, p_success) = BOOSTERS[era];

        let payload = rng.normal(mean, std_dev).clamp(0.0, 9600.0).round();
        let class = u8::from(rng.unit() < p_success);

        writer
            .serialize(Row {
                flight_number: i + 1,
                launch_site: rng.weighted(&SITES),
                class,
                payload_mass_kg: payload,
                booster_version: format!("F9 {category}  B{:04}", 1000 + i),
                booster_category: category,
            })
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} launches to {}", args.launches, args.out.display());
    Ok(())
}
