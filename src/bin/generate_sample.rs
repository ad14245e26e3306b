//! Write a small sales table as `sample_sales.csv` and `sample_sales.json`.
//!
//! Usage: `generate_sample [OUT_DIR]` (defaults to the current directory).

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// SplitMix64: enough randomness for demo data, stable across runs.
struct SplitMix {
    seed: u64,
}

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One sales line. `units` is text so a few cells can be malformed.
#[derive(Debug, Serialize)]
struct SaleRow {
    order_id: u32,
    region: &'static str,
    product: &'static str,
    units: String,
    revenue: f64,
}

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const PRODUCTS: [(&str, f64); 3] = [("Widget", 2.5), ("Gadget", 12.0), ("Gizmo", 40.0)];
const ROWS: u32 = 60;

fn generate_rows(rng: &mut SplitMix) -> Vec<SaleRow> {
    (1..=ROWS)
        .map(|order_id| {
            let region = *rng.pick(&REGIONS);
            let &(product, price) = rng.pick(&PRODUCTS);
            let units = 1 + (rng.unit() * 50.0) as u32;
            // Roughly one row in twelve carries an unparseable unit count.
            let units_cell = if rng.next_u64() % 12 == 0 {
                "n/a".to_string()
            } else {
                units.to_string()
            };
            SaleRow {
                order_id,
                region,
                product,
                units: units_cell,
                revenue: (units as f64 * price * 100.0).round() / 100.0,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SplitMix { seed: 42 };
    let rows = generate_rows(&mut rng);

    let csv_path = out_dir.join("sample_sales.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV writer")?;
    log::info!("Wrote {} rows to {}", rows.len(), csv_path.display());

    let json_path = out_dir.join("sample_sales.json");
    let file = std::fs::File::create(&json_path)
        .with_context(|| format!("creating {}", json_path.display()))?;
    serde_json::to_writer_pretty(file, &rows).context("writing JSON")?;
    log::info!("Wrote {} rows to {}", rows.len(), json_path.display());

    println!(
        "Wrote {} sales rows to {} and {}",
        rows.len(),
        csv_path.display(),
        json_path.display()
    );
    Ok(())
}
