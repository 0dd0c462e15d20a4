//! The opening catalog: an immutable mapping from canonical position
//! key to opening name, built once from the lichess ECO reference rows
//! and read-only afterwards.
//!
//! Names are shortened during construction so the resulting graph nodes
//! stay readable: well known openings are abbreviated ("Queen's Gambit
//! Declined" becomes "QGD") and the trailing " Opening", " Variation",
//! " Game" and " Defense" suffixes are stripped.

use fxhash::{FxHashMap, FxHashSet};
use lazy_static::lazy_static;

use crate::epd::{replay_san_line, START_EPD};

/// Name of the synthetic root entry bound to the initial position.
pub const START_NAME: &str = "Start";

/// EPD after 1. d4 d5. The ECO data files this position under a generic
/// queen's pawn label that collides with several other 1. d4 openings,
/// so it gets renamed before normalization.
const CLOSED_GAME_EPD: &str = "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -";

lazy_static! {
    /// Abbreviation table, sorted longest key first. Substring
    /// replacement with the longer, more specific key must win over a
    /// shorter key it contains: "Queen's Gambit Declined" becomes "QGD"
    /// and never "QG Declined".
    static ref ABBREVIATIONS: Vec<(&'static str, &'static str)> = {
        let mut table = vec![
            ("King's Indian Attack", "KIA"),
            ("King's Indian Defense", "KID"),
            ("Queen's Gambit", "QG"),
            ("Queen's Gambit Declined", "QGD"),
            ("Queen's Gambit Accepted", "QGA"),
            ("King's Gambit", "KG"),
            ("King's Gambit Declined", "KGD"),
            ("King's Gambit Accepted", "KGA"),
            ("Ruy Lopez", "RL"),
        ];
        table.sort_by_key(|(long, _)| std::cmp::Reverse(long.len()));
        table
    };
}

const STRIPPED_SUFFIXES: [&str; 4] = [" Opening", " Variation", " Game", " Defense"];

/// One reference-data row as delivered by the loader.
pub struct OpeningRow {
    pub epd: String,
    pub name: String,
    /// Reference move line in SAN, if the data carries one.
    pub pgn: Option<String>,
}

pub struct OpeningEntry {
    pub name: String,
    pub pgn: Option<String>,
}

pub struct OpeningCatalog {
    by_epd: FxHashMap<String, OpeningEntry>,
    /// Distinct post-normalization names in first-seen row order.
    names: Vec<String>,
}

impl OpeningCatalog {
    /// Builds the catalog from reference rows. Rows without a name are
    /// dropped, the 1. d4 d5 position is renamed, names are shortened
    /// and the synthetic Start entry is appended. On duplicate keys the
    /// last row wins.
    pub fn build(rows: Vec<OpeningRow>) -> Self {
        let mut by_epd = FxHashMap::default();
        let mut names = Vec::new();
        let mut seen_names = FxHashSet::default();

        let start_row = OpeningRow {
            epd: START_EPD.to_string(),
            name: START_NAME.to_string(),
            pgn: None,
        };

        for row in rows.into_iter().chain(std::iter::once(start_row)) {
            if row.name.is_empty() {
                continue;
            }
            let raw_name = if row.epd == CLOSED_GAME_EPD {
                "Closed Game".to_string()
            } else {
                row.name
            };
            let name = shorten_name(&raw_name);
            if seen_names.insert(name.clone()) {
                names.push(name.clone());
            }
            by_epd.insert(row.epd, OpeningEntry { name, pgn: row.pgn });
        }

        OpeningCatalog { by_epd, names }
    }

    /// Returns the opening name bound to the position key. Unknown
    /// positions are the normal case, not an error.
    pub fn lookup(&self, epd: &str) -> Option<&str> {
        self.by_epd.get(epd).map(|entry| entry.name.as_str())
    }

    /// Distinct opening names, Start included.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.by_epd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_epd.is_empty()
    }

    /// Longest reference line over all entries, in half-moves. Entries
    /// without a parseable line are skipped. Purely diagnostic.
    pub fn longest_reference_line(&self) -> usize {
        self.by_epd
            .values()
            .filter_map(|entry| entry.pgn.as_deref())
            .filter_map(|line| replay_san_line(line).ok())
            .map(|boards| boards.len())
            .max()
            .unwrap_or(0)
    }
}

/// Applies the abbreviation table, then strips a trailing descriptive
/// suffix from the shortened name. Order matters: "QGD Variation" only
/// exists after the abbreviation step.
pub fn shorten_name(name: &str) -> String {
    let mut name = name.to_string();
    for (long, short) in ABBREVIATIONS.iter() {
        if name.contains(long) {
            name = name.replace(long, short);
        }
    }
    for suffix in STRIPPED_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.to_string();
        }
    }
    name
}
