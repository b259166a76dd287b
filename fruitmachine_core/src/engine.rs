use crate::{
    paytable::Paytable,
    rng::ReelRng,
    state::{LifetimeStats, RunState},
    symbols::Symbol,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("insufficient funds: balance {balance} below spin cost {cost}")]
    InsufficientFunds { balance: i64, cost: i64 },
}

/// Which payout rule fired for a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    ThreeSkulls,
    TwoSkulls,
    Jackpot,
    ThreeOfAKind,
    TwoOfAKind,
    NoWin,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(
            self,
            Outcome::Jackpot | Outcome::ThreeOfAKind | Outcome::TwoOfAKind
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::ThreeSkulls => "three skulls",
            Outcome::TwoSkulls => "two skulls",
            Outcome::Jackpot => "jackpot",
            Outcome::ThreeOfAKind => "three of a kind",
            Outcome::TwoOfAKind => "two of a kind",
            Outcome::NoWin => "no win",
        })
    }
}

/// One fully resolved round, as handed back to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    pub symbols: [Symbol; 3],
    pub outcome: Outcome,
    pub balance_before: i64,
    pub balance_after: i64,
    /// The remaining balance no longer covers a spin; the run is over.
    pub bust: bool,
}

/// Draw three reel symbols, independently and uniformly.
pub fn draw_symbols(rng: &mut ReelRng) -> [Symbol; 3] {
    let floats = rng.next_floats(3);
    let mut drawn = [Symbol::Cherry; 3];
    for (slot, f) in drawn.iter_mut().zip(floats) {
        let idx = ((f * Symbol::ALL.len() as f64).floor() as usize) % Symbol::ALL.len();
        *slot = Symbol::ALL[idx];
    }
    drawn
}

fn has_three_of_a_kind(symbols: &[Symbol; 3]) -> bool {
    symbols[0] == symbols[1] && symbols[1] == symbols[2]
}

fn has_two_of_a_kind(symbols: &[Symbol; 3]) -> bool {
    symbols[0] == symbols[1] || symbols[1] == symbols[2] || symbols[0] == symbols[2]
}

fn count_symbol(symbols: &[Symbol; 3], symbol: Symbol) -> usize {
    symbols.iter().filter(|s| **s == symbol).count()
}

/// Resolve a draw against the paytable, returning the post-spin balance and
/// the rule that fired. The spin cost comes off the balance before the draw
/// is evaluated; skull penalties take precedence over wins.
pub fn resolve_spin(
    symbols: &[Symbol; 3],
    paytable: &Paytable,
    balance: i64,
) -> Result<(i64, Outcome), EngineError> {
    if balance < paytable.spin_cost {
        return Err(EngineError::InsufficientFunds {
            balance,
            cost: paytable.spin_cost,
        });
    }
    let mut money = balance - paytable.spin_cost;

    let skull_count = count_symbol(symbols, Symbol::Skull);
    let outcome = if skull_count >= 3 {
        money = 0;
        Outcome::ThreeSkulls
    } else if skull_count == 2 {
        money = (money - paytable.two_skull_penalty).max(0);
        Outcome::TwoSkulls
    } else if has_three_of_a_kind(symbols) {
        if symbols[0] == paytable.jackpot_symbol {
            money += paytable.jackpot;
            Outcome::Jackpot
        } else {
            money += paytable.three_of_a_kind;
            Outcome::ThreeOfAKind
        }
    } else if has_two_of_a_kind(symbols) && count_symbol(symbols, Symbol::Skull) == 0 {
        // a lone skull alongside a matching pair still pays; the extra skull
        // check only matters for a pair of skulls, already handled above
        money += paytable.two_of_a_kind;
        Outcome::TwoOfAKind
    } else {
        Outcome::NoWin
    };

    Ok((money, outcome))
}

/// Fold one resolved spin into the running statistics. `pre` and `post` are
/// the balances either side of the spin; the caller stores `post` on the run.
pub fn apply_outcome(run: &mut RunState, lifetime: &mut LifetimeStats, pre: i64, post: i64) {
    run.spin_count += 1;
    lifetime.total_spins += 1;
    lifetime.highest_spin_count = lifetime.highest_spin_count.max(run.spin_count);
    run.max_balance = run.max_balance.max(post);
    lifetime.all_time_highest_balance = lifetime.all_time_highest_balance.max(post);
    if post > pre {
        lifetime.total_money_earned += post - pre;
    }
}

/// Convenience: draw, resolve and apply one full round. On
/// `InsufficientFunds` nothing is drawn and no state is touched.
pub fn play_round(
    rng: &mut ReelRng,
    run: &mut RunState,
    lifetime: &mut LifetimeStats,
    paytable: &Paytable,
) -> Result<RoundRecord, EngineError> {
    let before = run.balance;
    if before < paytable.spin_cost {
        return Err(EngineError::InsufficientFunds {
            balance: before,
            cost: paytable.spin_cost,
        });
    }

    let symbols = draw_symbols(rng);
    let (after, outcome) = resolve_spin(&symbols, paytable, before)?;
    run.balance = after;
    apply_outcome(run, lifetime, before, after);

    let bust = after < paytable.spin_cost;
    debug!(?symbols, %outcome, balance = after, bust = bust, "round resolved");

    Ok(RoundRecord {
        symbols,
        outcome,
        balance_before: before,
        balance_after: after,
        bust,
    })
}
