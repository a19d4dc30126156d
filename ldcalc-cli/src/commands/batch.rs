use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ldcalc::LandingInputs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::load;

pub fn run(
    data_dir: Option<PathBuf>,
    input: PathBuf,
    output: Option<PathBuf>,
    chart: bool,
) -> Result<()> {
    let dir = load::resolve_data_dir(data_dir)?;
    let tables = load::load_tables(&dir)?;

    let file = File::open(&input).context("failed to open input file")?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    // Find the scenario columns by header name
    let headers = reader.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("column '{}' not found in {}", name, input.display()))
    };
    let pa_idx = col("pressure_alt")?;
    let oat_idx = col("oat")?;
    let weight_idx = col("weight")?;
    let wind_idx = col("wind")?;

    // Collect records for the progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    let total = records.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    // Prepare output
    let output_path = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_distances.csv", stem))
    });
    let output_file = File::create(&output_path).context("failed to create output file")?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(output_file));

    // Write header
    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.extend([
        "baseline_ft",
        "weight_adjusted_ft",
        "wind_adjusted_ft",
        "over_obstacle_ft",
        "over_obstacle_m",
    ]);
    writer.write_record(&new_headers)?;

    // Process records
    for (i, record) in records.iter().enumerate() {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .with_context(|| format!("row {}: missing {}", i + 1, name))
        };
        let inputs = LandingInputs {
            pressure_alt_ft: field(pa_idx, "pressure_alt")?
                .parse()
                .with_context(|| format!("row {}: invalid pressure_alt", i + 1))?,
            oat_c: field(oat_idx, "oat")?
                .parse()
                .with_context(|| format!("row {}: invalid oat", i + 1))?,
            weight_lb: field(weight_idx, "weight")?
                .parse()
                .with_context(|| format!("row {}: invalid weight", i + 1))?,
            wind_kt: field(wind_idx, "wind")?
                .parse()
                .with_context(|| format!("row {}: invalid wind", i + 1))?,
        };

        let est = if chart {
            tables.estimate_chart(&inputs)
        } else {
            tables.estimate(&inputs)
        }
        .with_context(|| format!("row {}: estimation failed", i + 1))?;

        let distances = [
            format!("{:.1}", est.baseline_ft),
            format!("{:.1}", est.weight_adjusted_ft),
            format!("{:.1}", est.wind_adjusted_ft),
            format!("{:.1}", est.over_obstacle_ft),
            format!("{:.2}", est.over_obstacle_m),
        ];
        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.extend(distances.iter().map(String::as_str));
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    writer.flush()?;
    pb.finish_with_message("done");
    println!("Wrote {} scenario(s) to {}", total, output_path.display());

    Ok(())
}
