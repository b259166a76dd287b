use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cherry,
    Bell,
    Lemon,
    Orange,
    Star,
    Skull,
}

impl Symbol {
    pub const ALL: [Symbol; 6] = [
        Symbol::Cherry,
        Symbol::Bell,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Star,
        Symbol::Skull,
    ];

    pub fn from_index(i: u8) -> Self {
        match i % 6 {
            0 => Symbol::Cherry,
            1 => Symbol::Bell,
            2 => Symbol::Lemon,
            3 => Symbol::Orange,
            4 => Symbol::Star,
            _ => Symbol::Skull,
        }
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::Cherry => 0,
            Symbol::Bell => 1,
            Symbol::Lemon => 2,
            Symbol::Orange => 3,
            Symbol::Star => 4,
            Symbol::Skull => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Cherry => "Cherry",
            Symbol::Bell => "Bell",
            Symbol::Lemon => "Lemon",
            Symbol::Orange => "Orange",
            Symbol::Star => "Star",
            Symbol::Skull => "Skull",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Symbol::Cherry => "🍒",
            Symbol::Bell => "🔔",
            Symbol::Lemon => "🍋",
            Symbol::Orange => "🍊",
            Symbol::Star => "⭐",
            Symbol::Skull => "💀",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
