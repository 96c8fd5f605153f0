//! Render a large nested report collection to a CSV file.
//!
//! Mirrors a production reporting payload: each report carries scalars, a
//! thirteen-wide letter sequence, a braced pair of subreports, and a nested
//! subreport flattened into the parent row. Rendering runs in parallel and
//! appends to a file in the system temp directory.
//!
//! Run with: cargo run --release --example report_demo -- [count]

use anyhow::Result;
use rowmill::testing::sample_reports;
use rowmill::{CsvSettings, Renderer};
use std::time::Instant;

fn main() -> Result<()> {
    let count = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(200_000);

    // Same layout the reference payload uses: flattened letter columns.
    let settings: CsvSettings = serde_json::from_str(r#"{ "flatten_arrays": true }"#)?;
    let renderer = Renderer::new(settings);

    let out = std::env::temp_dir().join("rowmill_report_demo.csv");
    let _ = std::fs::remove_file(&out); // the renderer appends

    println!("📄 Report Rendering Demo\n");
    println!("Building {count} reports...");
    let reports = sample_reports(count);

    println!("Rendering in parallel...");
    let timer = Instant::now();
    let rows = renderer.render_to_path(&reports, &out)?;
    let elapsed = timer.elapsed();

    println!("  ✓ Wrote {rows} rows to {} in {elapsed:?}", out.display());
    Ok(())
}
