use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use salary_dashboard::data::model::POSITIONS;

/// One synthetic player-season, in the column order of the real dataset.
#[derive(Debug, Serialize)]
struct SampleRow {
    year: i64,
    player: String,
    salary: i64,
    pos: &'static str,
    team: &'static str,
}

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const TEAMS: [&str; 10] = [
    "ATL", "BOS", "CHN", "LAN", "NYA", "OAK", "PIT", "SEA", "SFN", "TEX",
];

/// Log-normal salaries whose median and league minimum grow with the year.
fn salary_for(year: i64, rng: &mut SimpleRng) -> i64 {
    let t = (year - 1991) as f64;
    let league_min = 100_000.0 + 18_000.0 * t;
    let median_log = (450_000.0 * 1.07f64.powf(t)).ln();
    let salary = rng.gauss(median_log, 1.1).exp().max(league_min);
    (salary / 1_000.0).round() as i64 * 1_000
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    let mut player_id = 0;
    for year in 1988..=2017 {
        for &team in &TEAMS {
            for _ in 0..25 {
                rows.push(SampleRow {
                    year,
                    player: format!("player{player_id:05}"),
                    salary: salary_for(year, rng),
                    pos: rng.pick(&POSITIONS),
                    team,
                });
                player_id += 1;
            }
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("player", DataType::Utf8, false),
        Field::new("salary", DataType::Int64, true),
        Field::new("pos", DataType::Utf8, false),
        Field::new("team", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.player.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.salary))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.pos))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.team))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let csv_path = "baseball-salaries-simplified.csv";
    let parquet_path = "baseball-salaries-simplified.parquet";
    write_csv(&rows, csv_path)?;
    write_parquet(&rows, parquet_path)?;

    println!(
        "Wrote {} player-seasons to {csv_path} and {parquet_path}",
        rows.len()
    );
    Ok(())
}
