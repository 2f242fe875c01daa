//! Text notation for boards and moves.
//!
//! Board text is 9 characters in cell index order: `.` empty, `x`/`X` player
//! one, `o`/`O` player two. Move text is a file letter `a`-`c` followed by a
//! rank digit `1`-`3`, case-insensitive on the letter.

use crate::bitboard::{Move, Player, Position, BOARD_SIZE, CELLS};

pub fn parse_position(text: &str) -> Option<Position> {
    let bytes = text.as_bytes();
    if bytes.len() != CELLS {
        return None;
    }
    let mut position = Position::EMPTY;
    for (m, &c) in bytes.iter().enumerate() {
        position = match c {
            b'x' | b'X' => position.play(Player::One, m),
            b'o' | b'O' => position.play(Player::Two, m),
            b'.' => position,
            _ => return None,
        };
    }
    Some(position)
}

/// Inverse of [`parse_position`]. `None` if the masks overlap or use bits
/// outside the board.
pub fn format_position(position: Position) -> Option<String> {
    if !position.is_legal() {
        return None;
    }
    let one = position.mask(Player::One);
    let two = position.mask(Player::Two);
    let text = (0..CELLS)
        .map(|m| {
            let bit = 1 << m;
            if one & bit != 0 {
                Player::One.to_char()
            } else if two & bit != 0 {
                Player::Two.to_char()
            } else {
                '.'
            }
        })
        .collect();
    Some(text)
}

/// Parse a coordinate without looking at the board.
pub fn parse_cell(text: &str) -> Option<Move> {
    let &[file, rank] = text.as_bytes() else {
        return None;
    };
    let col = file.to_ascii_lowercase().checked_sub(b'a')? as usize;
    let row = rank.checked_sub(b'1')? as usize;
    if col >= BOARD_SIZE || row >= BOARD_SIZE {
        return None;
    }
    Some(row * BOARD_SIZE + col)
}

/// Parse a coordinate that is also a legal move on `position`.
pub fn parse_move(position: Position, text: &str) -> Option<Move> {
    parse_cell(text).filter(|&m| position.is_legal_move(m))
}

pub fn format_move(m: Move) -> Option<String> {
    if m >= CELLS {
        return None;
    }
    let file = (b'a' + (m % BOARD_SIZE) as u8) as char;
    let rank = (b'1' + (m / BOARD_SIZE) as u8) as char;
    Some([file, rank].iter().collect())
}

pub fn parse_player(text: &str) -> Option<Player> {
    match text {
        "x" | "X" | "1" => Some(Player::One),
        "o" | "O" | "2" => Some(Player::Two),
        _ => None,
    }
}
