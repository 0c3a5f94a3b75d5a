//! Replay codec: move sequences packed two per nibble, carried as hex text.
//!
//! A pair of moves `(m1, m2)` maps to nibble `4 * index(m1) + index(m2)` over
//! the order L, R, D, U. Odd-length sequences get an implicit trailing `D`.
//!
//! | nibble | moves | nibble | moves | nibble | moves | nibble | moves |
//! |--------|-------|--------|-------|--------|-------|--------|-------|
//! | 0 | LL | 4 | RL | 8 | DL | C | UL |
//! | 1 | LR | 5 | RR | 9 | DR | D | UR |
//! | 2 | LD | 6 | RD | A | DD | E | UD |
//! | 3 | LU | 7 | RU | B | DU | F | UU |
//!
//! ```
//! use hatetris_replay::{decode, encode};
//! use hatetris_types::Move;
//!
//! let moves = [Move::Down, Move::Down, Move::Left];
//! let text = encode(&moves);
//! assert_eq!(text, "A2");
//! assert_eq!(decode(&text), vec![Move::Down, Move::Down, Move::Left, Move::Down]);
//! ```

pub use hatetris_types as types;

use types::Move;

/// Hex digits per group in encoded text.
pub const GROUP_LEN: usize = 4;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Pack moves into nibbles, one nibble per output byte.
pub fn pack(moves: &[Move]) -> Vec<u8> {
    moves
        .chunks(2)
        .map(|pair| {
            let first = pair[0];
            let second = pair.get(1).copied().unwrap_or(Move::Down);
            first.index() * 4 + second.index()
        })
        .collect()
}

/// Expand nibbles back to moves. Only the low four bits of each byte count.
pub fn unpack(nibbles: &[u8]) -> Vec<Move> {
    let mut moves = Vec::with_capacity(nibbles.len() * 2);
    for &nibble in nibbles {
        moves.push(Move::from_index((nibble >> 2) & 0b11));
        moves.push(Move::from_index(nibble & 0b11));
    }
    moves
}

/// Encode moves as uppercase hex, grouped in fours separated by spaces.
pub fn encode(moves: &[Move]) -> String {
    let nibbles = pack(moves);
    let mut out = String::with_capacity(nibbles.len() + nibbles.len() / GROUP_LEN);
    for (i, nibble) in nibbles.iter().enumerate() {
        if i > 0 && i % GROUP_LEN == 0 {
            out.push(' ');
        }
        out.push(HEX_DIGITS[*nibble as usize] as char);
    }
    out
}

/// Decode hex replay text. Characters that are not hex digits are skipped.
pub fn decode(text: &str) -> Vec<Move> {
    let nibbles: Vec<u8> = text
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    unpack(&nibbles)
}

/// Render moves as their letters, e.g. `"LRDU"`.
pub fn to_letters(moves: &[Move]) -> String {
    moves.iter().map(|m| m.as_char()).collect()
}
