//! The transition graph: a square count matrix over opening names.
//!
//! Each game contributes one increment per visit, from the previously
//! visited opening (initially the synthetic root "Start") to the new
//! one. Folding is cell-wise additive, so games can be sharded over
//! independent graphs and merged afterwards without changing the
//! result. Pruning happens once at the end and drops every opening
//! that was never reached as a destination.

use fxhash::FxHashMap;

use crate::catalog::START_NAME;

pub struct TransitionGraph {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    /// counts[from][to], row = source, column = destination.
    counts: Vec<Vec<u32>>,
    games_folded: u64,
}

impl TransitionGraph {
    /// Creates the zeroed matrix over the given names and seeds the
    /// root self-loop `Start -> Start = 1`. The seed is independent of
    /// the number of games folded later, so a run over zero games still
    /// prunes down to the single Start node.
    pub fn new(names: &[String]) -> Self {
        let mut unique = Vec::new();
        let mut index = FxHashMap::default();
        for name in names {
            if !index.contains_key(name) {
                index.insert(name.clone(), unique.len());
                unique.push(name.clone());
            }
        }
        if !index.contains_key(START_NAME) {
            index.insert(START_NAME.to_string(), unique.len());
            unique.push(START_NAME.to_string());
        }

        let n = unique.len();
        let mut counts = vec![vec![0u32; n]; n];
        let start = index[START_NAME];
        counts[start][start] = 1;

        TransitionGraph {
            names: unique,
            index,
            counts,
            games_folded: 0,
        }
    }

    /// Folds one game's visit sequence into the matrix. The cursor
    /// starts at Start; every visit increments one cell and advances
    /// the cursor. An empty sequence contributes nothing.
    pub fn fold(&mut self, visits: &[String]) {
        let mut last = self.index[START_NAME];
        for name in visits {
            // Visit names come from the catalog the matrix was built
            // over; anything else is ignored.
            if let Some(&next) = self.index.get(name) {
                self.counts[last][next] += 1;
                last = next;
            }
        }
        self.games_folded += 1;
    }

    /// Cell-wise addition of a graph folded over a disjoint set of
    /// games. The duplicated root seed is counted only once, so merging
    /// shards equals folding everything into one graph.
    pub fn merge(&mut self, other: &TransitionGraph) {
        for (i, from) in other.names.iter().enumerate() {
            let Some(&si) = self.index.get(from) else {
                continue;
            };
            for (j, count) in other.counts[i].iter().enumerate() {
                if *count == 0 {
                    continue;
                }
                if let Some(&sj) = self.index.get(&other.names[j]) {
                    self.counts[si][sj] += count;
                }
            }
        }
        let start = self.index[START_NAME];
        self.counts[start][start] -= 1;
        self.games_folded += other.games_folded;
    }

    /// Drops every name whose incoming column is all zero, keeping
    /// Start unconditionally as the graph root. Rows and columns are
    /// restricted together, relative name order is preserved.
    pub fn prune(&self) -> TransitionGraph {
        let survivors: Vec<usize> = (0..self.names.len())
            .filter(|&j| {
                self.names[j] == START_NAME || self.counts.iter().any(|row| row[j] != 0)
            })
            .collect();

        let names: Vec<String> = survivors.iter().map(|&j| self.names[j].clone()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let counts = survivors
            .iter()
            .map(|&i| survivors.iter().map(|&j| self.counts[i][j]).collect())
            .collect();

        TransitionGraph {
            names,
            index,
            counts,
            games_folded: self.games_folded,
        }
    }

    /// Incoming-transition totals per opening name (column sums), the
    /// derived "occurrences" table.
    pub fn occurrences(&self) -> Vec<(&str, u64)> {
        self.names
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let sum = self.counts.iter().map(|row| u64::from(row[j])).sum();
                (name.as_str(), sum)
            })
            .collect()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Transition count between two names, zero when either is absent.
    pub fn count(&self, from: &str, to: &str) -> u32 {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&i), Some(&j)) => self.counts[i][j],
            _ => 0,
        }
    }

    /// Rows in name order, for the output sink.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().map(Vec::as_slice))
    }

    pub fn games_folded(&self) -> u64 {
        self.games_folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn visits(list: &[&str]) -> Vec<String> {
        names(list)
    }

    #[test]
    fn the_root_self_loop_is_seeded_once() {
        let graph = TransitionGraph::new(&names(&["Start", "Italian"]));
        assert_eq!(graph.count("Start", "Start"), 1);
        assert_eq!(graph.count("Start", "Italian"), 0);
    }

    #[test]
    fn start_is_added_when_missing_from_the_name_list() {
        let graph = TransitionGraph::new(&names(&["Italian"]));
        assert_eq!(graph.count("Start", "Start"), 1);
    }

    #[test]
    fn fold_walks_from_start_through_the_visits() {
        let mut graph = TransitionGraph::new(&names(&["Start", "King's Pawn", "Open"]));
        graph.fold(&visits(&["King's Pawn", "Open"]));

        assert_eq!(graph.count("Start", "King's Pawn"), 1);
        assert_eq!(graph.count("King's Pawn", "Open"), 1);
        assert_eq!(graph.count("Start", "Open"), 0);
        assert_eq!(graph.games_folded(), 1);
    }

    #[test]
    fn transpositions_hit_the_same_cell() {
        let mut graph = TransitionGraph::new(&names(&["Start", "QGD"]));
        // Two games reaching QGD through different move orders produce
        // the same visit sequence and therefore the same increment.
        graph.fold(&visits(&["QGD"]));
        graph.fold(&visits(&["QGD"]));
        assert_eq!(graph.count("Start", "QGD"), 2);
    }

    #[test]
    fn an_empty_game_only_counts_as_folded() {
        let mut graph = TransitionGraph::new(&names(&["Start", "Italian"]));
        graph.fold(&[]);
        assert_eq!(graph.count("Start", "Start"), 1);
        assert_eq!(graph.count("Start", "Italian"), 0);
        assert_eq!(graph.games_folded(), 1);
    }

    #[test]
    fn conservation_one_increment_per_visit() {
        let mut graph = TransitionGraph::new(&names(&["Start", "A", "B", "C"]));
        let sequence = visits(&["A", "B", "A", "C"]);
        graph.fold(&sequence);

        let total: u64 = graph.occurrences().iter().map(|(_, sum)| sum).sum();
        // The root seed plus one incoming edge per visit.
        assert_eq!(total, 1 + sequence.len() as u64);
    }

    #[test]
    fn pruning_drops_unreached_names_but_keeps_start() {
        let mut graph = TransitionGraph::new(&names(&["Start", "A", "Unreached"]));
        graph.fold(&visits(&["A"]));

        let pruned = graph.prune();
        assert_eq!(pruned.names(), &names(&["Start", "A"]));
        assert_eq!(pruned.count("Start", "A"), 1);
        assert_eq!(pruned.count("Start", "Start"), 1);
    }

    #[test]
    fn pruning_zero_games_leaves_only_start() {
        let graph = TransitionGraph::new(&names(&["Start", "A", "B"])).prune();
        assert_eq!(graph.names(), &names(&["Start"]));
        assert_eq!(graph.count("Start", "Start"), 1);
    }

    #[test]
    fn a_source_only_name_is_removed_entirely() {
        // "A" would only appear as a source if its own incoming edge
        // vanished, e.g. after partial data. Build that shape by hand.
        let mut graph = TransitionGraph::new(&names(&["Start", "A", "B"]));
        let a = graph.index["A"];
        let b = graph.index["B"];
        graph.counts[a][b] = 3;

        let pruned = graph.prune();
        assert!(!pruned.names().contains(&"A".to_string()));
        // Its outgoing edge disappears with it.
        assert_eq!(pruned.count("A", "B"), 0);
    }

    #[test]
    fn pruning_is_idempotent() {
        let mut graph = TransitionGraph::new(&names(&["Start", "A", "B", "C"]));
        graph.fold(&visits(&["A", "B"]));
        graph.fold(&visits(&["B"]));

        let once = graph.prune();
        let twice = once.prune();
        assert_eq!(once.names(), twice.names());
        for (from, row) in once.rows() {
            for (to, count) in once.names().iter().zip(row) {
                assert_eq!(*count, twice.count(from, to));
            }
        }
    }

    #[test]
    fn merge_equals_sequential_folding() {
        let all = names(&["Start", "A", "B"]);
        let games = [visits(&["A", "B"]), visits(&["B"]), visits(&["A"])];

        let mut sequential = TransitionGraph::new(&all);
        for game in &games {
            sequential.fold(game);
        }

        let mut shard_one = TransitionGraph::new(&all);
        shard_one.fold(&games[0]);
        let mut shard_two = TransitionGraph::new(&all);
        shard_two.fold(&games[1]);
        shard_two.fold(&games[2]);
        shard_one.merge(&shard_two);

        assert_eq!(shard_one.games_folded(), sequential.games_folded());
        for (from, row) in sequential.rows() {
            for (to, count) in sequential.names().iter().zip(row) {
                assert_eq!(*count, shard_one.count(from, to), "{from} -> {to}");
            }
        }
    }

    #[quickcheck]
    fn fold_order_does_not_matter(seed: Vec<Vec<u8>>) -> bool {
        let all = names(&["Start", "A", "B", "C", "D"]);
        let letters = ["A", "B", "C", "D"];
        let games: Vec<Vec<String>> = seed
            .iter()
            .map(|game| {
                game.iter()
                    .map(|b| letters[(*b % 4) as usize].to_string())
                    .collect()
            })
            .collect();

        let mut forward = TransitionGraph::new(&all);
        for game in &games {
            forward.fold(game);
        }
        let mut backward = TransitionGraph::new(&all);
        for game in games.iter().rev() {
            backward.fold(game);
        }

        let equal = forward.rows().zip(backward.rows()).all(|((_, a), (_, b))| a == b);
        equal
    }
}
