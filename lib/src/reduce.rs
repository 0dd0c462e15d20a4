//! Reduces a game's position sequence to its opening visits.

use crate::catalog::{OpeningCatalog, START_NAME};

/// Walks the position sequence against the catalog and returns the
/// deduplicated sequence of opening names the game passed through.
///
/// The walk starts at the implicit "Start" opening. Positions the
/// catalog does not know are skipped, and a name equal to the current
/// one does not produce a new visit, so the result never contains two
/// consecutive equal names and never contains "Start" itself.
pub fn reduce_to_visits(positions: &[String], catalog: &OpeningCatalog) -> Vec<String> {
    let mut visits = Vec::new();
    let mut current = START_NAME;
    for epd in positions {
        if let Some(name) = catalog.lookup(epd) {
            if name != current {
                visits.push(name.to_string());
                current = name;
            }
        }
    }
    visits
}
