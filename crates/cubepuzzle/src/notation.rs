//! Standard cube notation, such as `R U R' U2 M`.
//!
//! Outer layer turns are named by face (`R`, `L`, `U`, `D`, `F`, `B`) and are
//! clockwise as seen looking at that face. The slice turns `M`, `E`, and `S`
//! follow `L`, `D`, and `F` respectively and only exist on the 3x3x3. A `'`
//! suffix inverts a turn and a `2` suffix doubles it.

use cubemath::{Axis, Sign};
use itertools::Itertools;

use crate::{CubeSize, Twist};

/// Error produced when parsing notation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum NotationError {
    #[error("unknown move {0:?}")]
    UnknownMove(String),
    #[error("invalid suffix {suffix:?} in move {token:?}")]
    InvalidSuffix { token: String, suffix: String },
    #[error("move {token:?} does not exist on a {size} cube")]
    UnsupportedMove { token: String, size: CubeSize },
}

/// Move symbols and the twist that each one names when not inverted.
const SYMBOLS: [(char, Twist); 9] = [
    ('R', Twist::new(Axis::X, 1, Sign::Neg)),
    ('L', Twist::new(Axis::X, -1, Sign::Pos)),
    ('U', Twist::new(Axis::Y, 1, Sign::Neg)),
    ('D', Twist::new(Axis::Y, -1, Sign::Pos)),
    ('F', Twist::new(Axis::Z, 1, Sign::Neg)),
    ('B', Twist::new(Axis::Z, -1, Sign::Pos)),
    ('M', Twist::new(Axis::X, 0, Sign::Pos)),
    ('E', Twist::new(Axis::Y, 0, Sign::Pos)),
    ('S', Twist::new(Axis::Z, 0, Sign::Neg)),
];

/// Returns the twist named by a move symbol, without any suffix.
pub fn symbol_to_twist(symbol: char) -> Option<Twist> {
    SYMBOLS
        .iter()
        .find(|(c, _)| *c == symbol)
        .map(|&(_, twist)| twist)
}

/// Returns the move symbol for a twist and whether it is inverted, or `None`
/// if the twist has no name.
pub fn twist_to_symbol(twist: Twist) -> Option<(char, bool)> {
    SYMBOLS.iter().find_map(|&(c, base)| {
        (base.axis == twist.axis && base.layer == twist.layer)
            .then_some((c, base.direction != twist.direction))
    })
}

/// Parses a whitespace-separated sequence of moves for a cube of the given
/// size.
pub fn parse_twists(s: &str, size: CubeSize) -> Result<Vec<Twist>, NotationError> {
    let mut twists = vec![];
    for token in s.split_whitespace() {
        let mut chars = token.chars();
        let symbol = chars.next().unwrap_or_default();
        let suffix = chars.as_str();

        let base = symbol_to_twist(symbol)
            .ok_or_else(|| NotationError::UnknownMove(token.to_owned()))?;
        if !base.is_valid_for(size) {
            return Err(NotationError::UnsupportedMove {
                token: token.to_owned(),
                size,
            });
        }

        let (count, inverse) = match suffix {
            "" => (1, false),
            "'" => (1, true),
            "2" => (2, false),
            "2'" | "'2" => (2, true),
            _ => {
                return Err(NotationError::InvalidSuffix {
                    token: token.to_owned(),
                    suffix: suffix.to_owned(),
                });
            }
        };
        let twist = if inverse { base.rev() } else { base };
        twists.extend(std::iter::repeat_n(twist, count));
    }
    Ok(twists)
}

/// Formats a sequence of twists as notation. Consecutive pairs of identical
/// twists are written as double turns.
pub fn format_twists(twists: &[Twist]) -> String {
    let mut tokens = vec![];
    for (twist, group) in &twists.iter().chunk_by(|t| **t) {
        let n = group.count();
        let single = twist.to_string();
        let double = match twist_to_symbol(twist) {
            Some((symbol, false)) => format!("{symbol}2"),
            Some((symbol, true)) => format!("{symbol}2'"),
            None => format!("{single} {single}"),
        };
        tokens.extend(std::iter::repeat_n(double, n / 2));
        if n % 2 == 1 {
            tokens.push(single);
        }
    }
    tokens.join(" ")
}
