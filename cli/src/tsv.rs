//! Loads the lichess ECO reference files (a.tsv through e.tsv).
//!
//! Each file is tab-separated with a header line; the column order is
//! taken from the header, so files with or without the extra `uci`
//! column work. All five groups are merged into one row list, the
//! catalog adds the synthetic Start row itself.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};
use opening_graph::OpeningRow;

const ECO_GROUPS: [&str; 5] = ["a", "b", "c", "d", "e"];

pub fn load_reference_rows(eco_dir: &Path) -> anyhow::Result<Vec<OpeningRow>> {
    let mut rows = Vec::new();
    for group in ECO_GROUPS {
        let path = eco_dir.join(format!("{group}.tsv"));
        let file = File::open(&path)
            .with_context(|| format!("Can not open reference file {}", path.display()))?;
        read_rows(BufReader::new(file), &mut rows)
            .with_context(|| format!("Corrupt reference file {}", path.display()))?;
    }
    Ok(rows)
}

fn read_rows(reader: impl BufRead, rows: &mut Vec<OpeningRow>) -> anyhow::Result<()> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => bail!("reference file is empty"),
    };
    let columns: Vec<&str> = header.split('\t').collect();
    let column = |label: &str| {
        columns
            .iter()
            .position(|c| *c == label)
            .with_context(|| format!("missing column '{label}'"))
    };
    let epd_column = column("epd")?;
    let name_column = column("name")?;
    let pgn_column = columns.iter().position(|c| *c == "pgn");

    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let Some(epd) = fields.get(epd_column) else {
            continue;
        };
        // Rows without a name are invalid; the catalog drops them too,
        // but there is no point carrying them out of the loader.
        let name = fields.get(name_column).copied().unwrap_or("");
        if name.is_empty() {
            continue;
        }
        let pgn = pgn_column
            .and_then(|i| fields.get(i))
            .filter(|pgn| !pgn.is_empty())
            .map(|pgn| pgn.to_string());
        rows.push(OpeningRow {
            epd: epd.to_string(),
            name: name.to_string(),
            pgn,
        });
    }
    Ok(())
}
