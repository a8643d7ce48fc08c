//! The `modelrank grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use modelrank_core::engine::grade;
use modelrank_core::report::GradeReport;

use super::SourceArgs;

pub async fn execute(
    input: Option<String>,
    input_file: Option<PathBuf>,
    source: SourceArgs,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let input = match (input, input_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read input file: {}", path.display()))?,
        (None, None) => anyhow::bail!("either --input or --input-file is required"),
    };

    let source = source.into_source()?;
    let report = grade(&input, source.as_ref()).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    println!("{}", report.summary());

    let mut table = Table::new();
    table.set_header(vec!["Rule", "Points", "Detail"]);
    for outcome in &report.score.outcomes {
        table.add_row(vec![
            Cell::new(outcome.rule),
            Cell::new(format!("{}/{}", outcome.points, outcome.rule.weight())),
            Cell::new(&outcome.detail),
        ]);
    }
    println!("{table}");

    println!(
        "Ranked {} of {} models created before {} ({})",
        report.ranked_size, report.catalog_size, report.claim.cutoff, report.source
    );
}
