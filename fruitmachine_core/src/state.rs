use serde::{Deserialize, Serialize};

/// Balance handed to every fresh run, in pence.
pub const STARTING_BALANCE: i64 = 100;

/// State of one play session, discarded on bust or claim. The serde names
/// match the `Current` section of the save document; fields absent from a
/// loaded document fall back to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(rename = "Money", default)]
    pub balance: i64,
    #[serde(rename = "Spins", default)]
    pub spin_count: u32,
    #[serde(rename = "MaxMoney", default)]
    pub max_balance: i64,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            balance: STARTING_BALANCE,
            spin_count: 0,
            max_balance: STARTING_BALANCE,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cumulative statistics surviving across runs. The serde names match the
/// `Overall` section of the save document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    #[serde(rename = "TotalSpins", default)]
    pub total_spins: u32,
    /// Sum of all positive balance deltas. Losses never subtract from this.
    #[serde(rename = "TotalMoneyEarnt", default)]
    pub total_money_earned: i64,
    #[serde(rename = "HighestSpin", default)]
    pub highest_spin_count: u32,
    #[serde(rename = "AllTimeHighestMoney", default)]
    pub all_time_highest_balance: i64,
    #[serde(rename = "Runs", default)]
    pub runs_played: u32,
}

impl LifetimeStats {
    pub fn record_run_started(&mut self) {
        self.runs_played += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_run() {
        let run = RunState::new();
        assert_eq!(run.balance, STARTING_BALANCE);
        assert_eq!(run.spin_count, 0);
        assert_eq!(run.max_balance, STARTING_BALANCE);
    }

    #[test]
    fn lifetime_starts_zeroed() {
        let stats = LifetimeStats::default();
        assert_eq!(stats.total_spins, 0);
        assert_eq!(stats.runs_played, 0);
    }

    #[test]
    fn run_serde_names() {
        let run = RunState {
            balance: 580,
            spin_count: 4,
            max_balance: 580,
        };
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["Money"], 580);
        assert_eq!(json["Spins"], 4);
        assert_eq!(json["MaxMoney"], 580);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let run: RunState = serde_json::from_str(r#"{"Money": 40}"#).unwrap();
        assert_eq!(run.balance, 40);
        assert_eq!(run.spin_count, 0);
        assert_eq!(run.max_balance, 0);

        let stats: LifetimeStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, LifetimeStats::default());
    }
}
