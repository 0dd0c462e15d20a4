//! Writes the result tables as CSV, tagged by the number of games.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use opening_graph::TransitionGraph;

/// Writes `adjacency_matrix_{n}.csv`: first line is the empty corner
/// cell plus the destination names, then one line per source row.
pub fn write_adjacency_matrix(
    graph: &TransitionGraph,
    out_dir: &Path,
    n_games: u64,
) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(format!("adjacency_matrix_{n_games}.csv"));
    let mut file = File::create(&path)
        .with_context(|| format!("Can not create {}", path.display()))?;

    let mut header = String::new();
    for name in graph.names() {
        header.push(',');
        header.push_str(&csv_field(name));
    }
    header.push('\n');
    file.write_all(header.as_bytes())?;

    for (name, row) in graph.rows() {
        let mut line = csv_field(name);
        for count in row {
            line.push(',');
            line.push_str(&count.to_string());
        }
        line.push('\n');
        file.write_all(line.as_bytes())?;
    }
    file.flush()?;
    Ok(path)
}

/// Writes `occurrences_{n}.csv`: total incoming transitions per name.
pub fn write_occurrences(
    graph: &TransitionGraph,
    out_dir: &Path,
    n_games: u64,
) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(format!("occurrences_{n_games}.csv"));
    let mut file = File::create(&path)
        .with_context(|| format!("Can not create {}", path.display()))?;

    file.write_all(b"Id,Occurrences\n")?;
    for (name, sum) in graph.occurrences() {
        let line = format!("{},{}\n", csv_field(name), sum);
        file.write_all(line.as_bytes())?;
    }
    file.flush()?;
    Ok(path)
}

/// Opening names may contain commas ("Sicilian, Najdorf"), so quote
/// when needed.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
