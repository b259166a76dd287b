use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use fruitmachine_core::{
    play_round, EngineError, LifetimeStats, Outcome, Paytable, ReelRng, RoundRecord, RunState,
    SaveStore, DEFAULT_SAVE_FILE,
};

#[derive(Parser)]
#[command(name = "fruitmachine", about = "The Fruit Machine, at the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Save file path, default game_save.json
    #[arg(long, value_parser, env = "FRUIT_SAVE_FILE")]
    save_file: Option<PathBuf>,
    /// Pin the reel seed for a reproducible session
    #[arg(long, env = "FRUIT_SEED")]
    seed: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sit down at the machine (the default)
    Play,
    /// Print lifetime statistics from the save file
    Stats,
    /// Clear the saved run, keeping lifetime statistics
    Reset {
        /// Wipe lifetime statistics as well
        #[arg(long)]
        all: bool,
    },
}

/// Which screen the session is on.
enum Screen {
    Menu,
    Playing,
    Ended,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let store = SaveStore::new(
        cli.save_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE)),
    );

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let seed = cli
                .seed
                .unwrap_or_else(|| format!("session-{}", Utc::now().timestamp_millis()));
            run_game(&store, seed)
        }
        Commands::Stats => {
            let (_, lifetime) = store.load();
            print_lifetime(&lifetime);
            Ok(())
        }
        Commands::Reset { all } => {
            if all {
                store.wipe()?;
                println!("Save file removed.");
            } else {
                store.clear_run()?;
                println!("Saved run cleared; lifetime statistics kept.");
            }
            Ok(())
        }
    }
}

fn run_game(store: &SaveStore, seed: String) -> anyhow::Result<()> {
    let paytable = Paytable::default();
    let mut rng = ReelRng::new(seed);
    info!(seed_hash = %rng.seed_hash_hex(), "session seed fingerprint");

    let (_, mut lifetime) = store.load();
    let mut run = RunState::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut screen = Screen::Menu;

    loop {
        match screen {
            Screen::Menu => {
                lifetime.record_run_started();
                println!();
                println!("=== The Fruit Machine ===");
                let resumable = store.has_resumable_run();
                if resumable {
                    println!("[p]lay  [c]ontinue  [s]tats  [q]uit");
                } else {
                    println!("[p]lay  [s]tats  [q]uit");
                }
                match read_choice(&mut lines) {
                    Some(choice) => match choice.as_str() {
                        "p" | "play" => {
                            run = RunState::new();
                            screen = Screen::Playing;
                        }
                        "c" | "continue" if resumable => {
                            let (saved, saved_lifetime) = store.load();
                            if let Some(saved_run) = saved {
                                run = saved_run;
                                lifetime = saved_lifetime;
                                println!(
                                    "Resuming with {} after {} spins.",
                                    pounds(run.balance),
                                    run.spin_count
                                );
                                screen = Screen::Playing;
                            } else {
                                println!("Nothing to continue.");
                            }
                        }
                        "s" | "stats" => print_lifetime(&lifetime),
                        "q" | "quit" | "exit" => break,
                        other => println!("Unknown choice: {other}"),
                    },
                    None => break,
                }
            }
            Screen::Playing => {
                println!(
                    "Balance: {}   [s]pin ({} a go)  [c]laim  [q]uit",
                    pounds(run.balance),
                    pounds(paytable.spin_cost)
                );
                match read_choice(&mut lines) {
                    Some(choice) => match choice.as_str() {
                        "s" | "spin" => {
                            match play_round(&mut rng, &mut run, &mut lifetime, &paytable) {
                                Ok(record) => {
                                    print_round(&record);
                                    if let Err(err) = store.save(&run, &lifetime) {
                                        warn!(%err, "failed to save game state");
                                    }
                                    if record.bust {
                                        println!("Out of money!");
                                        if let Err(err) = store.clear_run() {
                                            warn!(%err, "failed to clear saved run");
                                        }
                                        screen = Screen::Ended;
                                    }
                                }
                                Err(EngineError::InsufficientFunds { .. }) => {
                                    println!("Insufficient funds!");
                                    if let Err(err) = store.save(&run, &lifetime) {
                                        warn!(%err, "failed to save game state");
                                    }
                                }
                            }
                        }
                        "c" | "claim" => {
                            if run.balance > 0 {
                                run.max_balance = run.max_balance.max(run.balance);
                                println!("Claimed {}.", pounds(run.balance));
                                if let Err(err) = store.clear_run() {
                                    warn!(%err, "failed to clear saved run");
                                }
                                screen = Screen::Ended;
                            }
                        }
                        "q" | "quit" | "exit" => break,
                        other => println!("Unknown choice: {other}"),
                    },
                    None => break,
                }
            }
            Screen::Ended => {
                print_game_over(&run, &lifetime);
                println!("[m]enu  [q]uit");
                match read_choice(&mut lines) {
                    Some(choice) => match choice.as_str() {
                        "m" | "menu" => {
                            run = RunState::new();
                            screen = Screen::Menu;
                        }
                        "q" | "quit" | "exit" => break,
                        other => println!("Unknown choice: {other}"),
                    },
                    None => break,
                }
            }
        }
    }

    Ok(())
}

fn read_choice(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    print!("> ");
    let _ = io::stdout().flush();
    let line = lines.next()?.ok()?;
    Some(line.trim().to_lowercase())
}

fn print_round(record: &RoundRecord) {
    let reels: Vec<&str> = record.symbols.iter().map(|s| s.emoji()).collect();
    println!("  {} | {} | {}", reels[0], reels[1], reels[2]);
    println!("  {}", outcome_line(record.outcome));
}

fn outcome_line(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::ThreeSkulls => "Game Over - Three skulls!",
        Outcome::TwoSkulls => "Lost £1 - Two skulls!",
        Outcome::Jackpot => "Jackpot! Won £5!",
        Outcome::ThreeOfAKind => "Won £1 - Three of a kind!",
        Outcome::TwoOfAKind => "Won 50p - Two of a kind!",
        Outcome::NoWin => "No win this time.",
    }
}

fn print_lifetime(lifetime: &LifetimeStats) {
    println!("All Time Stats:");
    println!("  Total Spins: {}", lifetime.total_spins);
    println!(
        "  Total Money Earned: {}",
        pounds(lifetime.total_money_earned)
    );
    println!(
        "  Highest Spins in One Game: {}",
        lifetime.highest_spin_count
    );
    println!(
        "  All-Time Highest Balance: {}",
        pounds(lifetime.all_time_highest_balance)
    );
    println!("  Runs Completed: {}", lifetime.runs_played);
}

fn print_game_over(run: &RunState, lifetime: &LifetimeStats) {
    println!();
    println!("=== Game Over! ===");
    println!("Current Game:");
    println!("  Total Spins: {}", run.spin_count);
    println!("  Final Balance: {}", pounds(run.balance));
    println!("  Highest Balance: {}", pounds(run.max_balance));
    println!();
    print_lifetime(lifetime);
}

fn pounds(pence: i64) -> String {
    format!("£{}.{:02}", pence / 100, pence % 100)
}
