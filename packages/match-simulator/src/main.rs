//! Match simulator CLI - fast in-memory matches through the scoring engine.
//!
//! Useful for eyeballing scoring distributions and for fuzzing the
//! score/undo round trip with `--undo-rate`.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use courtside::config::env::default_format;
use courtside::{MatchFormat, Slot};
use metrics::build_match_metrics;
use output::OutputWriter;
use simulator::{MatchResult, SimSettings, Simulator};
use tracing::{info, warn};
use types::{Lineup, MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Fast in-memory match simulator for the courtside scoring engine")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Best-of set count (odd); COURTSIDE_DEFAULT_SETS or 3 when absent
    #[arg(long)]
    sets: Option<u8>,

    /// Singles or doubles lineups
    #[arg(long, default_value = "singles")]
    lineup: Lineup,

    /// Base seed; match n uses seed + n. Random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that the serving side wins a point
    #[arg(long, default_value = "0.62", value_parser = parse_probability)]
    hold_probability: f64,

    /// Probability that each point is undone and replayed
    #[arg(long, default_value = "0.0", value_parser = parse_probability)]
    undo_rate: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress JSONL output
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "basic")]
    metrics_level: MetricsLevel,
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let p: f64 = raw.parse().map_err(|e| format!("not a number: {e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is outside 0.0..=1.0"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    if args.json_logs {
        courtside::telemetry::init_tracing(filter);
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // reject unusable formats before writing any output
    let format = match args.sets {
        Some(sets) => MatchFormat::new(sets)?,
        None => default_format()?,
    };
    let settings = SimSettings {
        sets: format.sets(),
        lineup: args.lineup,
        hold_probability: args.hold_probability,
        undo_rate: args.undo_rate,
    };
    if args.show_output {
        info!(matches = args.matches, ?settings, "starting match simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for match_id in 1..=args.matches {
        let match_start = Instant::now();
        let seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(match_id)),
            None => rand::random(),
        };

        match Simulator::new(seed, settings).simulate_match() {
            Ok(result) => {
                let duration_ms = match_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_match_metrics(
                    match_id,
                    seed,
                    settings,
                    args.matches,
                    &result,
                    duration_ms,
                    &args.metrics_level,
                );
                if let Err(e) = output_writer.write_match(&metrics) {
                    warn!(match_id, error = %e, "failed to write metrics");
                }
                if args.verbose {
                    info!(match_id, score = %result.summary.match_score, "match completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(match_id, seed, error = %e, "match failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let (jsonl_path, csv_path) = (jsonl_path.cloned(), csv_path.cloned());
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        if let Some(path) = csv_path {
            info!("Summary CSV written to: {}", path.display());
        }
        print_summary(&results, errors, elapsed, args.matches);
    }

    if errors > 0 {
        return Err(format!("{errors} of {} matches failed", args.matches).into());
    }
    Ok(())
}

fn print_summary(results: &[MatchResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    let n = results.len() as f64;

    let mut wins = [0u32; 2];
    let mut points = 0usize;
    let mut tiebreaks = 0usize;
    let mut undos = 0usize;
    for result in results {
        if let Some(winner) = result.summary.score.winner {
            wins[winner.index()] += 1;
        }
        points += result.points_played;
        tiebreaks += result.tiebreaks;
        undos += result.undos;
    }

    println!("Average points per match: {:.1}", points as f64 / n);
    println!("Tiebreaks: {tiebreaks}");
    println!("Undo round trips checked: {undos}");

    println!("\n=== Results by Side ===");
    for slot in Slot::BOTH {
        let won = wins[slot.index()];
        println!(
            "Side {slot}: wins={won} ({:.1}%)",
            f64::from(won) / n * 100.0
        );
    }
}
