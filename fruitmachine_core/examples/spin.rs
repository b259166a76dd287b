use fruitmachine_core::{play_round, EngineError, LifetimeStats, Paytable, ReelRng, RunState};

fn main() {
    // Example end-to-end session
    let mut rng = ReelRng::new("example-seed");
    let paytable = Paytable::default();
    let mut run = RunState::new();
    let mut lifetime = LifetimeStats::default();
    lifetime.record_run_started();

    println!("seed fingerprint: {}", rng.seed_hash_hex());
    loop {
        match play_round(&mut rng, &mut run, &mut lifetime, &paytable) {
            Ok(record) => {
                let reels: Vec<&str> = record.symbols.iter().map(|s| s.name()).collect();
                println!(
                    "spin {:>3}: {:?} -> {} (balance {}p)",
                    run.spin_count, reels, record.outcome, record.balance_after
                );
                if record.bust {
                    println!("bust after {} spins", run.spin_count);
                    break;
                }
            }
            Err(EngineError::InsufficientFunds { balance, cost }) => {
                println!("cannot spin: {balance}p left, {cost}p needed");
                break;
            }
        }
    }
    println!(
        "lifetime: {} spins, {}p earned, best balance {}p",
        lifetime.total_spins, lifetime.total_money_earned, lifetime.all_time_highest_balance
    );
}
