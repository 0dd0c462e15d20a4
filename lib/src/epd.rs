//! Canonical position keys for the catalog and the game walk.
//!
//! A key is an EPD string: piece placement, side to move, castling
//! rights and en passant target. The move counters are dropped so that
//! two move orders reaching the same board produce the same key, which
//! is exactly what makes transpositions visible.

use shakmaty::{fen::Fen, san::San, Chess, EnPassantMode, Position};

use crate::OpeningGraphError;

/// EPD of the initial chess position. The catalog binds this key to the
/// synthetic "Start" entry.
pub const START_EPD: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

/// Renders the first four FEN fields of a position. The en passant
/// square is only included when a legal en passant capture exists,
/// matching the convention of the lichess reference data.
pub fn canonical_epd(board: &Chess) -> String {
    let fen = Fen::from_position(board, EnPassantMode::Legal);
    let fen_str = fen.to_string();
    fen_str
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replays a SAN move-text line from the initial position and returns
/// the board after each half-move. Move numbers ("1.") and result
/// markers are skipped; an unparseable or illegal move is an error.
pub fn replay_san_line(line: &str) -> Result<Vec<Chess>, OpeningGraphError> {
    let mut board = Chess::default();
    let mut boards = Vec::new();
    for token in line.split_whitespace() {
        if token == "*" || token.ends_with('.') {
            continue;
        }
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            // Move numbers and results like "1-0" or "1/2-1/2".
            continue;
        }
        let san: San = token
            .parse()
            .map_err(|_| OpeningGraphError::SanNotParseable(token.to_string()))?;
        let mv = san
            .to_move(&board)
            .map_err(|_| OpeningGraphError::SanNotPlayable(token.to_string()))?;
        board = board
            .play(mv)
            .map_err(|_| OpeningGraphError::SanNotPlayable(token.to_string()))?;
        boards.push(board.clone());
    }
    Ok(boards)
}
