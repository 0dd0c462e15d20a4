//! Extracts the canonical position sequence of a single game.
//!
//! [`PositionExtractor`] is a `pgn-reader` visitor: the driver pulls one
//! game at a time out of a PGN stream and receives the EPD after each
//! half-move of the mainline, truncated to the horizon. Annotated side
//! variations are skipped by the reader.

use std::ops::ControlFlow;

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use shakmaty::{Chess, Position};

use crate::epd::canonical_epd;

/// Default horizon: 36 half-moves, i.e. the first 18 moves.
pub const DEFAULT_HORIZON: usize = 36;

pub struct PositionExtractor {
    horizon: usize,
}

impl PositionExtractor {
    pub fn new(horizon: usize) -> Self {
        Self { horizon }
    }
}

impl Default for PositionExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON)
    }
}

/// Replay state for the game currently being read.
pub struct GameWalk {
    board: Chess,
    positions: Vec<String>,
    /// Set once a mainline move fails to apply; everything after it is
    /// untrustworthy and stays unrecorded.
    dead: bool,
}

impl Visitor for PositionExtractor {
    type Tags = ();
    type Movetext = GameWalk;
    type Output = Vec<String>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _tags: &mut Self::Tags,
        _name: &[u8],
        _value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(GameWalk {
            board: Chess::default(),
            positions: Vec::with_capacity(self.horizon),
            dead: false,
        })
    }

    fn san(&mut self, walk: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        if walk.dead || walk.positions.len() >= self.horizon {
            return ControlFlow::Continue(());
        }
        // Trust the replay; a move that does not apply ends the
        // recorded prefix of this game.
        match san_plus.san.to_move(&walk.board) {
            Ok(mv) => match walk.board.clone().play(mv) {
                Ok(next) => {
                    walk.board = next;
                    walk.positions.push(canonical_epd(&walk.board));
                }
                Err(_) => walk.dead = true,
            },
            Err(_) => walk.dead = true,
        }
        ControlFlow::Continue(())
    }

    fn begin_variation(
        &mut self,
        _walk: &mut Self::Movetext,
    ) -> ControlFlow<Self::Output, Skip> {
        // Only the mainline counts; annotated side lines are skipped.
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, walk: Self::Movetext) -> Self::Output {
        walk.positions
    }
}
