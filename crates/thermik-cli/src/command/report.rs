use std::{fs, io, path::PathBuf};

use anyhow::Context;
use clap::Args;
use thermik_analysis::pilot::FlightRow;

use crate::{input::InputArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub input: InputArg,

    /// Directory for `data.json` and the per-pilot `pilot<id>.json` bundles
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Write the per-flight table as CSV to this path (`-` for stdout)
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let (_, report) = arg.input.run_analysis()?;

    fs::create_dir_all(&arg.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            arg.output_dir.display()
        )
    })?;

    Output::save_json(&report.index, &arg.output_dir.join("data.json"))?;
    for bundle in &report.pilots {
        let path = arg
            .output_dir
            .join(format!("pilot{}.json", bundle.pilot.summary.pilot_id));
        Output::save_json(bundle, &path)?;
    }
    tracing::info!(
        pilots = report.pilots.len(),
        dir = %arg.output_dir.display(),
        "wrote report bundles"
    );

    if let Some(csv_path) = &arg.csv {
        let output = Output::create(csv_path)?;
        let display_path = output.to_string();
        let mut writer = csv::Writer::from_writer(output);
        write_flight_rows(&report.flight_rows, &mut writer)
            .with_context(|| format!("Failed to write flight CSV to {display_path}"))?;
        tracing::info!(rows = report.flight_rows.len(), path = %display_path, "wrote flight table");
    }

    Ok(())
}

fn write_flight_rows<W: io::Write>(
    rows: &[FlightRow],
    writer: &mut csv::Writer<W>,
) -> anyhow::Result<()> {
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
