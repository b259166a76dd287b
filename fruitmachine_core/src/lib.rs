pub mod engine;
pub mod paytable;
pub mod rng;
pub mod state;
pub mod store;
pub mod symbols;

pub use crate::engine::{
    apply_outcome, draw_symbols, play_round, resolve_spin, EngineError, Outcome, RoundRecord,
};
pub use crate::paytable::Paytable;
pub use crate::rng::{derive_floats, derive_hash_hex, ReelRng};
pub use crate::state::{LifetimeStats, RunState, STARTING_BALANCE};
pub use crate::store::{SaveStore, StoreError, DEFAULT_SAVE_FILE};
pub use crate::symbols::Symbol;
