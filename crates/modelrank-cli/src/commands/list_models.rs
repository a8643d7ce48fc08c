//! The `modelrank list-models` command.

use anyhow::Result;

use modelrank_core::model::RankedCatalog;
use modelrank_core::parser::parse_cutoff_date;

use super::SourceArgs;

pub async fn execute(before: Option<String>, source: SourceArgs) -> Result<()> {
    use comfy_table::{Cell, Table};

    let cutoff = before
        .as_deref()
        .map(parse_cutoff_date)
        .transpose()
        .map_err(|_| anyhow::anyhow!("invalid --before date, expected e.g. \"1 January 2024\""))?;

    let source = source.into_source()?;
    let records = source.list_models().await?;
    let total = records.len();

    let ranked = match cutoff {
        Some(date) => RankedCatalog::build(records, date),
        None => RankedCatalog::rank(records),
    };

    if ranked.is_empty() {
        println!("No models found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Index", "Model", "Created (UTC)"]);
    for (index, record) in ranked.iter().enumerate() {
        let created = record
            .created_at()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| record.created.to_string());
        table.add_row(vec![Cell::new(index), Cell::new(&record.id), Cell::new(created)]);
    }
    println!("{table}");

    match cutoff {
        Some(date) => println!("{} of {total} models created before {date}", ranked.len()),
        None => println!("{total} models"),
    }

    Ok(())
}
