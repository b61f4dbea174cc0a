use blackjack_montecarlo::game::Outcome;
use blackjack_montecarlo::rng::GameRng;
use blackjack_montecarlo::simulation::{
    sweep, Decision, GameEngine, RuleConfig, SimulationReport, SimulationRunner, SWEEP_SIZES,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "blackjack-montecarlo")]
#[command(about = "Monte Carlo Blackjack Simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Rule configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log every round's game state
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a batch of rounds (default)
    Run {
        /// Number of rounds to simulate
        #[arg(short, long, default_value = "10000")]
        num_games: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run independent batches of 100, 1000 and 10000 rounds
    Sweep,

    /// Play rounds interactively against the dealer
    Play,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = match &cli.config {
        Some(path) => match RuleConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ Failed to load rules from '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => RuleConfig::default(),
    };

    match cli.command {
        Some(Commands::Run { num_games, json }) => {
            run_simulation(config, num_games, cli.seed, cli.verbose, json);
        }
        Some(Commands::Sweep) => run_sweep(config, cli.seed),
        Some(Commands::Play) => play_interactive(config, cli.seed),
        None => run_simulation(config, 10_000, cli.seed, cli.verbose, false),
    }
}

fn run_simulation(config: RuleConfig, num_games: usize, seed: Option<u64>, verbose: bool, json: bool) {
    let rng = GameRng::new(seed);
    let used_seed = rng.seed();
    let mut engine = GameEngine::new(rng, config);

    let progress = if json || verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(num_games as u64)
    };
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} rounds ({per_sec})") {
        progress.set_style(style);
    }

    let start = std::time::Instant::now();
    let result = SimulationRunner::new()
        .verbose(verbose)
        .run_with(&mut engine, num_games, |_, _| progress.inc(1));
    progress.finish_and_clear();
    let elapsed = start.elapsed();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("✗ Simulation aborted: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        print_json(&report, used_seed);
        return;
    }

    println!("\nBLACKJACK SIMULATION RESULTS");
    println!("Seed: {}", used_seed);
    println!("{:-<48}", "");
    print!("{}", report);
    println!("{:-<48}", "");
    println!(
        "Simulation completed in {:.2?} ({:.0} rounds/sec)",
        elapsed,
        num_games as f64 / elapsed.as_secs_f64()
    );
}

fn print_json(report: &SimulationReport, seed: u64) {
    let document = serde_json::json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "seed": seed,
        "report": report,
    });
    match serde_json::to_string_pretty(&document) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("✗ Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_sweep(config: RuleConfig, seed: Option<u64>) {
    let start = std::time::Instant::now();
    let reports = match sweep(config, seed, &SWEEP_SIZES) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("✗ Sweep aborted: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nBLACKJACK SIMULATION RESULTS");
    println!("{:-<48}", "");
    for report in &reports {
        print!("{}", report);
        println!("{:-<48}", "");
    }
    println!("Completed in {:.2?}", start.elapsed());
}

/// Read one trimmed, lowercased line; None on EOF or read failure
fn read_line(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_lowercase()),
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

fn play_interactive(config: RuleConfig, seed: Option<u64>) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut engine = GameEngine::new(GameRng::new(seed), config);

    println!("Welcome to Blackjack!");
    loop {
        let result = engine.play_round_with(|hand| {
            println!("Your hand: {}", hand);
            loop {
                prompt("Do you want to 'hit' or 'stand'? ");
                let Some(line) = read_line(&mut input) else {
                    return Decision::Stand;
                };
                match Decision::parse(&line) {
                    Some(decision) => return decision,
                    None => println!("Invalid input. Please type 'hit' or 'stand'."),
                }
            }
        });

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("✗ Round aborted: {}", e);
                std::process::exit(1);
            }
        };

        println!("\nFinal Game State:");
        print!("{}", engine);
        match outcome {
            Outcome::PlayerWin if engine.config().is_bust(engine.dealer().total_value()) => {
                println!("Dealer busted! You win!")
            }
            Outcome::PlayerWin => println!("You win!"),
            Outcome::DealerWin if engine.config().is_bust(engine.player().total_value()) => {
                println!("You busted! Dealer wins.")
            }
            Outcome::DealerWin => println!("Dealer wins!"),
            Outcome::Draw => println!("It's a draw!"),
        }

        prompt("\nWould you like to play again? (yes/no): ");
        if read_line(&mut input).as_deref() != Some("yes") {
            println!("Thanks for playing!");
            break;
        }
    }
}
