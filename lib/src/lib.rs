//! Classifies chess games by the named openings their early moves pass
//! through and aggregates the transitions between those openings into a
//! weighted directed graph. Transpositions are handled naturally: two
//! move orders reaching the same canonical position count as the same
//! opening.
//!
//! The pipeline is: build an [`OpeningCatalog`] from reference rows,
//! extract the canonical position sequence of each game with
//! [`PositionExtractor`], reduce it to a sequence of opening visits with
//! [`reduce_to_visits`], and fold all visit sequences into a
//! [`TransitionGraph`], which is pruned once at the end.

pub mod catalog;
pub mod epd;
pub mod extract;
pub mod graph;
pub mod reduce;

pub use catalog::{OpeningCatalog, OpeningRow, START_NAME};
pub use extract::{PositionExtractor, DEFAULT_HORIZON};
pub use graph::TransitionGraph;
pub use reduce::reduce_to_visits;

#[derive(thiserror::Error, Debug)]
pub enum OpeningGraphError {
    #[error("The SAN token can not be parsed: {0}")]
    SanNotParseable(String),
    #[error("The SAN move is not legal in its position: {0}")]
    SanNotPlayable(String),
}
