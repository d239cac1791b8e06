//! Keyboard bindings for twists.

use std::fmt;

use cubepuzzle::notation::parse_twists;
use cubepuzzle::{CubeSize, Twist};

/// Key that performs a twist. Holding shift performs the inverse twist.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Keybind {
    /// Lowercase key name.
    pub key: char,
    /// Twist in standard notation.
    pub notation: &'static str,
    /// Whether the twist only exists on the 3x3x3.
    pub slice: bool,
}
impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { key, notation, .. } = self;
        write!(f, "{key} = {notation}, shift+{key} = {notation}'")
    }
}

/// Keys bound to twists.
pub const KEYBINDS: &[Keybind] = &[
    Keybind::face('r', "R"),
    Keybind::face('l', "L"),
    Keybind::face('u', "U"),
    Keybind::face('d', "D"),
    Keybind::face('f', "F"),
    Keybind::face('b', "B"),
    Keybind::slice('m', "M"),
    Keybind::slice('e', "E"),
    Keybind::slice('s', "S"),
];

impl Keybind {
    const fn face(key: char, notation: &'static str) -> Self {
        Self {
            key,
            notation,
            slice: false,
        }
    }
    const fn slice(key: char, notation: &'static str) -> Self {
        Self {
            key,
            notation,
            slice: true,
        }
    }
}

/// Returns the keybinds that apply to a cube of the given size.
pub fn keybinds_for(size: CubeSize) -> impl Iterator<Item = &'static Keybind> {
    KEYBINDS
        .iter()
        .filter(move |bind| !bind.slice || size == CubeSize::Three)
}

/// Returns the twist bound to `key`, or `None` if the key is unbound or its
/// twist does not exist on a cube of the given size.
pub fn twist_for_key(key: char, shift: bool, size: CubeSize) -> Option<Twist> {
    let key = key.to_ascii_lowercase();
    let bind = keybinds_for(size).find(|bind| bind.key == key)?;
    let twist = match parse_twists(bind.notation, size) {
        Ok(twists) => *twists.first()?,
        Err(e) => {
            log::trace!("ignoring key {key:?}: {e}");
            return None;
        }
    };
    Some(if shift { twist.rev() } else { twist })
}
