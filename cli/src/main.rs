//! Command line entry point: builds the opening catalog from the ECO
//! reference files, streams games out of a PGN file and writes the
//! pruned transition matrix and occurrence totals as CSV.

mod output;
mod tsv;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use opening_graph::{
    reduce_to_visits, OpeningCatalog, PositionExtractor, TransitionGraph, DEFAULT_HORIZON,
};
use pgn_reader::Reader;

#[derive(Parser, Debug)]
#[command(about = r#"Builds the opening transposition graph of a PGN game collection.

Reads the lichess ECO reference files (a.tsv .. e.tsv), classifies the
openings each game passes through and writes the transition counts as
adjacency_matrix_{n}.csv plus occurrences_{n}.csv."#)]
struct Cli {
    #[arg(help = "PGN file with the games to analyze.")]
    games_file: PathBuf,

    #[arg(long, default_value_t = 100, help = "Number of games to analyze.")]
    games: u64,

    #[arg(long, default_value = "files", help = "Directory with the ECO tsv files.")]
    eco_dir: PathBuf,

    #[arg(long, default_value = "results", help = "Directory for the csv output.")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = DEFAULT_HORIZON, help = "Half-moves examined per game.")]
    horizon: usize,
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    let rows = tsv::load_reference_rows(&cli.eco_dir)?;
    let catalog = OpeningCatalog::build(rows);
    info!(
        "Opening catalog holds {} positions, {} distinct names",
        catalog.len(),
        catalog.names().len()
    );
    info!("Longest line: {} halfmoves", catalog.longest_reference_line());

    let file = File::open(&cli.games_file)
        .with_context(|| format!("Can not open games file {}", cli.games_file.display()))?;
    let mut reader = Reader::new(BufReader::new(file));
    let mut extractor = PositionExtractor::new(cli.horizon);

    let mut graph = TransitionGraph::new(catalog.names());
    while graph.games_folded() < cli.games {
        match reader.read_game(&mut extractor)? {
            Some(positions) => {
                let visits = reduce_to_visits(&positions, &catalog);
                graph.fold(&visits);
                if graph.games_folded() % 1000 == 0 {
                    info!("Analyzed {} games", graph.games_folded());
                }
            }
            // Running out of games before the requested count is fine.
            None => break,
        }
    }

    let n_games = graph.games_folded();
    let graph = graph.prune();

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Can not create {}", cli.out_dir.display()))?;
    let matrix_path = output::write_adjacency_matrix(&graph, &cli.out_dir, n_games)?;
    output::write_occurrences(&graph, &cli.out_dir, n_games)?;

    info!(
        "Analyzed {} games, {} openings reached, results in {}",
        n_games,
        graph.names().len(),
        matrix_path.display()
    );
    Ok(())
}

fn init_logger() {
    use simplelog::*;

    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();
}
