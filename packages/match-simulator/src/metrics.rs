//! Per-match metrics for JSONL and CSV output.

use courtside::{MatchSummary, Slot};
use serde::Serialize;

use crate::simulator::{MatchResult, SimSettings};
use crate::types::{Lineup, MetricsLevel};

/// Complete match metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetrics {
    pub match_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: MatchResultMetrics,
    pub sides: [SideMetrics; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MatchSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub sets: u8,
    pub doubles: bool,
    pub hold_probability: f64,
    pub undo_rate: f64,
    pub total_matches: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResultMetrics {
    pub winner: Option<Slot>,
    pub match_score: String,
    pub set_score: [u8; 2],
    pub points_played: usize,
    pub tiebreaks: usize,
    pub undos: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SideMetrics {
    pub id: String,
    pub points_won: u32,
    pub aces: u32,
    pub double_faults: u32,
    pub winners: u32,
    pub unforced_errors: u32,
    pub service_games_won: u32,
    pub service_games_played: u32,
    pub breaks: u32,
    /// Share of first-serve points won, 0.0 when none were played.
    pub first_serve_won_pct: f64,
}

fn pct(won: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(won) / f64::from(total) * 100.0
    }
}

/// Build metrics from a simulated match.
pub fn build_match_metrics(
    match_id: u32,
    seed: u64,
    settings: SimSettings,
    total_matches: u32,
    result: &MatchResult,
    duration_ms: f64,
    level: &MetricsLevel,
) -> MatchMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let summary = &result.summary;
    let sides = summary.participants.clone().map(|p| {
        let line = &p.stats.line;
        SideMetrics {
            id: p.info.id,
            points_won: line.points_won,
            aces: line.serving.aces,
            double_faults: line.serving.double_faults,
            winners: line.rally.winners,
            unforced_errors: line.rally.unforced_errors,
            service_games_won: line.serving.service_games_won,
            service_games_played: line.serving.service_games_played,
            breaks: line.returning.return_games_won,
            first_serve_won_pct: pct(
                line.serving.first_serve_points_won,
                line.serving.first_serve_total,
            ),
        }
    });

    MatchMetrics {
        match_id,
        seed,
        timestamp,
        config: RunConfig {
            sets: settings.sets,
            doubles: settings.lineup == Lineup::Doubles,
            hold_probability: settings.hold_probability,
            undo_rate: settings.undo_rate,
            total_matches,
        },
        result: MatchResultMetrics {
            winner: summary.score.winner,
            match_score: summary.match_score.clone(),
            set_score: summary.score.sets,
            points_played: result.points_played,
            tiebreaks: result.tiebreaks,
            undos: result.undos,
            duration_ms,
        },
        sides,
        summary: match level {
            MetricsLevel::Basic => None,
            MetricsLevel::Detailed => Some(summary.clone()),
        },
    }
}

/// Flat CSV row (one per match).
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub match_id: u32,
    pub seed: u64,
    pub winner: u8,
    pub match_score: String,
    pub points_played: usize,
    pub tiebreaks: usize,
    pub undos: usize,
    pub side1_aces: u32,
    pub side2_aces: u32,
    pub side1_double_faults: u32,
    pub side2_double_faults: u32,
    pub side1_breaks: u32,
    pub side2_breaks: u32,
}

impl From<&MatchMetrics> for CsvSummaryRow {
    fn from(metrics: &MatchMetrics) -> Self {
        let [one, two] = &metrics.sides;
        CsvSummaryRow {
            match_id: metrics.match_id,
            seed: metrics.seed,
            winner: metrics.result.winner.map_or(0, Slot::number),
            match_score: metrics.result.match_score.clone(),
            points_played: metrics.result.points_played,
            tiebreaks: metrics.result.tiebreaks,
            undos: metrics.result.undos,
            side1_aces: one.aces,
            side2_aces: two.aces,
            side1_double_faults: one.double_faults,
            side2_double_faults: two.double_faults,
            side1_breaks: one.breaks,
            side2_breaks: two.breaks,
        }
    }
}
