use crate::symbols::Symbol;
use serde::{Deserialize, Serialize};

/// Award and penalty amounts, all in minor currency units (pence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paytable {
    /// Deducted from the balance before the draw is evaluated.
    pub spin_cost: i64,
    pub three_of_a_kind: i64,
    /// Paid instead of `three_of_a_kind` when all three reels show
    /// `jackpot_symbol`.
    pub jackpot: i64,
    pub jackpot_symbol: Symbol,
    pub two_of_a_kind: i64,
    /// Deducted (floored at zero) when exactly two skulls land.
    pub two_skull_penalty: i64,
}

impl Default for Paytable {
    fn default() -> Self {
        Self {
            spin_cost: 20,
            three_of_a_kind: 100,
            jackpot: 500,
            jackpot_symbol: Symbol::Bell,
            two_of_a_kind: 50,
            two_skull_penalty: 100,
        }
    }
}
