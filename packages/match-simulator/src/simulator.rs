//! In-memory match simulator.
//!
//! Points are drawn from a seeded RNG and fed through the engine's public
//! scoring API. With a non-zero undo rate every so often a point is removed
//! and replayed, and the scoreboard is checked to be unchanged by the trip.

use courtside::domain::summary::ScoreSummary;
use courtside::{
    summarize, DomainError, Match, MatchConfig, MatchFormat, MatchSummary, Member, Outcome,
    Participant, Player, PointCall, Seat, Slot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::types::Lineup;

/// Safety valve for rally settings that never finish a tiebreak.
const MAX_POINTS: usize = 20_000;

#[derive(Debug)]
pub enum SimError {
    Setup(DomainError),
    /// Undo followed by the same point did not restore the scoreboard.
    RoundTrip { point: usize },
    /// The match did not finish within `MAX_POINTS`.
    Stalled,
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Setup(e) => write!(f, "match setup failed: {e}"),
            SimError::RoundTrip { point } => {
                write!(f, "score/undo round trip diverged at point {point}")
            }
            SimError::Stalled => write!(f, "match unfinished after {MAX_POINTS} points"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<DomainError> for SimError {
    fn from(e: DomainError) -> Self {
        SimError::Setup(e)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimSettings {
    pub sets: u8,
    pub lineup: Lineup,
    /// Chance the serving side wins a point.
    pub hold_probability: f64,
    /// Chance each scored point is undone and replayed.
    pub undo_rate: f64,
}

/// Result of simulating a complete match.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub summary: MatchSummary,
    pub points_played: usize,
    pub tiebreaks: usize,
    pub undos: usize,
}

pub struct Simulator {
    rng: StdRng,
    settings: SimSettings,
}

impl Simulator {
    pub fn new(seed: u64, settings: SimSettings) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            settings,
        }
    }

    pub fn simulate_match(mut self) -> Result<MatchResult, SimError> {
        let mut m = Match::new(config(self.settings)?)?;
        let mut undos = 0;
        let mut points = 0;

        while !m.is_complete() {
            if points >= MAX_POINTS {
                return Err(SimError::Stalled);
            }
            let Some(server) = m.current_server().map(|s| s.slot()) else {
                break;
            };
            let call = self.draw_point(server, m.is_doubles());

            let before = (self.settings.undo_rate > 0.0).then(|| summarize(&m).score);
            m.score_call(call);
            points += 1;

            if let Some(before) = before {
                if self.rng.random_bool(self.settings.undo_rate) {
                    undos += 1;
                    check_round_trip(&mut m, call, &before, points)?;
                }
            }
        }

        let summary = summarize(&m);
        let tiebreaks = m
            .completed_sets()
            .iter()
            .filter(|set| set.tiebreak().is_some())
            .count();
        debug!(score = %summary.match_score, points = m.point_count(), "match simulated");

        Ok(MatchResult {
            points_played: m.point_count(),
            tiebreaks,
            undos,
            summary,
        })
    }

    fn draw_point(&mut self, server: Slot, doubles: bool) -> PointCall {
        let server_wins = self.rng.random_bool(self.settings.hold_probability);
        let winner = if server_wins { server } else { server.other() };
        let roll: f64 = self.rng.random();

        let outcome = if server_wins {
            match roll {
                r if r < 0.08 => Outcome::Ace,
                r if r < 0.18 => Outcome::ServiceWinner,
                r if r < 0.38 => Outcome::Winner,
                r if r < 0.53 => Outcome::ForcedError,
                r if r < 0.70 => Outcome::UnforcedError,
                _ => Outcome::Regular,
            }
        } else {
            match roll {
                r if r < 0.05 => Outcome::DoubleFault,
                r if r < 0.13 => Outcome::ReturnWinner,
                r if r < 0.33 => Outcome::Winner,
                r if r < 0.48 => Outcome::ForcedError,
                r if r < 0.68 => Outcome::UnforcedError,
                _ => Outcome::Regular,
            }
        };

        let mut call = PointCall::new(winner, outcome);
        match outcome {
            Outcome::Ace => {}
            Outcome::DoubleFault => call = call.on_first_serve(false),
            _ => call = call.on_first_serve(self.rng.random_bool(0.62)),
        }

        if doubles {
            // the player who struck the shot, or made the error
            let side = match outcome {
                Outcome::Ace | Outcome::DoubleFault | Outcome::ServiceWinner => None,
                Outcome::UnforcedError => Some(winner.other()),
                _ => Some(winner),
            };
            if let Some(slot) = side {
                let member = if self.rng.random_bool(0.5) {
                    Member::A
                } else {
                    Member::B
                };
                call = call.scored_by(Seat::new(slot, member));
            }
        }
        call
    }
}

fn check_round_trip(
    m: &mut Match,
    call: PointCall,
    before: &ScoreSummary,
    point: usize,
) -> Result<(), SimError> {
    if m.remove_point().is_none() {
        return Err(SimError::RoundTrip { point });
    }
    if summarize(m).score != *before {
        warn!(point, "scoreboard changed across score and undo");
        return Err(SimError::RoundTrip { point });
    }
    m.score_call(call);
    Ok(())
}

fn config(settings: SimSettings) -> Result<MatchConfig, DomainError> {
    let format = MatchFormat::new(settings.sets)?;
    let config = match settings.lineup {
        Lineup::Singles => MatchConfig::new(
            Participant::single("p1", "Player One"),
            Participant::single("p2", "Player Two"),
            format,
        ),
        Lineup::Doubles => MatchConfig::new(
            Participant::team(
                "t1",
                "Team One",
                Player::new("t1a", "One A"),
                Player::new("t1b", "One B"),
            ),
            Participant::team(
                "t2",
                "Team Two",
                Player::new("t2a", "Two A"),
                Player::new("t2b", "Two B"),
            ),
            format,
        ),
    };
    Ok(config)
}
