//! Persisted form of a match and the replay that turns it back into one.

use serde::{Deserialize, Serialize};

use crate::config::format::MatchConfig;
use crate::domain::game::Game;
use crate::domain::match_play::{Match, PointCall};
use crate::domain::point::Point;
use crate::domain::serving::ServeTurn;
use crate::domain::set::Set;
use crate::domain::sides::Slot;
use crate::domain::stats::StatsBook;
use crate::domain::tiebreak::Tiebreak;
use crate::errors::domain::DomainError;

/// JSON-compatible snapshot written after every mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub config: MatchConfig,
    pub current_set_index: usize,
    pub current_game_index: usize,
    /// Completed sets.
    pub sets: Vec<SetRecord>,
    /// Completed games of the active set.
    pub games: Vec<GameRecord>,
    /// Points of the active game or tiebreak.
    pub points: Vec<Point>,
    pub in_tiebreak: bool,
    pub winner: Option<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_rotation: Option<Vec<String>>,
    pub current_server_id: Option<String>,
    pub set_score: [u8; 2],
    pub game_score: [u8; 2],
    pub point_score: [u16; 2],
    pub statistics: StatsBook,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub score: [u8; 2],
    pub winner: Option<Slot>,
    pub games: Vec<GameRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreak: Option<TiebreakRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub server_id: Option<String>,
    pub score: [u16; 2],
    pub winner: Option<Slot>,
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TiebreakRecord {
    /// Server of the first tiebreak point.
    pub server_id: Option<String>,
    pub score: [u16; 2],
    pub winner: Option<Slot>,
    pub points: Vec<Point>,
}

/// Capture the current state of `m`.
pub fn capture(m: &Match) -> MatchSnapshot {
    let set = m.current_set();
    let points = match (set.tiebreak(), set.game()) {
        (Some(tiebreak), _) => tiebreak.points().to_vec(),
        (None, Some(game)) => game.points().to_vec(),
        (None, None) => Vec::new(),
    };

    MatchSnapshot {
        config: m.config().clone(),
        current_set_index: m.completed_sets().len(),
        current_game_index: set.games().len(),
        sets: m
            .completed_sets()
            .iter()
            .map(|s| set_record(m, s))
            .collect(),
        games: set.games().iter().map(|g| game_record(m, g)).collect(),
        points,
        in_tiebreak: set.in_tiebreak(),
        winner: m.winner(),
        serving_rotation: m
            .rotation_ids()
            .map(|ids| ids.into_iter().map(str::to_owned).collect()),
        current_server_id: m.current_server_id().map(str::to_owned),
        set_score: m.set_score(),
        game_score: m.current_games(),
        point_score: m.current_points(),
        statistics: m.stats().clone(),
    }
}

fn server_id(m: &Match, serve: ServeTurn) -> Option<String> {
    match serve.seat() {
        Some(seat) => m.player_id(seat).map(str::to_owned),
        None => Some(m.participant(serve.slot()).id.clone()),
    }
}

fn game_record(m: &Match, game: &Game) -> GameRecord {
    GameRecord {
        server_id: server_id(m, game.serve()),
        score: game.raw_score(),
        winner: game.winner(),
        points: game.points().to_vec(),
    }
}

fn tiebreak_record(m: &Match, tiebreak: &Tiebreak) -> TiebreakRecord {
    TiebreakRecord {
        server_id: server_id(m, tiebreak.opening()),
        score: tiebreak.score(),
        winner: tiebreak.winner(),
        points: tiebreak.points().to_vec(),
    }
}

fn set_record(m: &Match, set: &Set) -> SetRecord {
    SetRecord {
        score: set.score(),
        winner: set.winner(),
        games: set.games().iter().map(|g| game_record(m, g)).collect(),
        tiebreak: set.tiebreak().map(|t| tiebreak_record(m, t)),
    }
}

/// Points of a snapshot in play order.
fn recorded_points(snap: &MatchSnapshot) -> impl Iterator<Item = &Point> {
    snap.sets
        .iter()
        .flat_map(|set| {
            set.games
                .iter()
                .flat_map(|g| g.points.iter())
                .chain(set.tiebreak.iter().flat_map(|t| t.points.iter()))
        })
        .chain(snap.games.iter().flat_map(|g| g.points.iter()))
        .chain(snap.points.iter())
}

/// Rebuild a match by replaying every recorded point, then check the
/// replayed scores against the stored ones.
pub fn rebuild(snap: &MatchSnapshot) -> Result<Match, DomainError> {
    let mut m = Match::new(snap.config.clone())?;

    for (n, point) in recorded_points(snap).enumerate() {
        let call = PointCall {
            winner: point.winner(),
            outcome: point.outcome(),
            scorer: point.scoring_player(),
            first_serve: Some(!point.fault()),
        };
        if !m.apply_call(call) {
            return Err(DomainError::restore(format!(
                "point {n} was rejected during replay"
            )));
        }
    }

    let checks = [
        ("set score", m.set_score() == snap.set_score),
        ("game score", m.current_games() == snap.game_score),
        ("point score", m.current_points() == snap.point_score),
        ("tiebreak flag", m.in_tiebreak() == snap.in_tiebreak),
        ("winner", m.winner() == snap.winner),
        (
            "current server",
            m.current_server_id() == snap.current_server_id.as_deref(),
        ),
    ];
    if let Some((what, _)) = checks.iter().find(|(_, ok)| !ok) {
        return Err(DomainError::restore(format!(
            "replayed {what} does not match the snapshot"
        )));
    }

    let expected: Vec<&str> = m.participants().iter().map(|p| p.id.as_str()).collect();
    let stored: Vec<&str> = snap
        .statistics
        .entries()
        .iter()
        .map(|(id, _)| id.as_str())
        .collect();
    if expected != stored {
        return Err(DomainError::restore(format!(
            "statistics are keyed by {stored:?}, expected {expected:?}"
        )));
    }
    m.replace_stats(snap.statistics.clone());

    Ok(m)
}
