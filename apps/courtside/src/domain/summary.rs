//! Read-only scoreboard projection, recomputed on demand and never stored.

use serde::{Deserialize, Serialize};

use crate::domain::game::DisplayScore;
use crate::domain::match_play::Match;
use crate::domain::participants::Participant;
use crate::domain::set::Set;
use crate::domain::sides::Slot;
use crate::domain::stats::ParticipantStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Singles,
    Doubles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryMeta {
    pub match_type: MatchType,
    pub sets: u8,
    pub status: MatchStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub slot: Slot,
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub sets: [u8; 2],
    pub games: [u8; 2],
    pub points: [DisplayScore; 2],
    pub raw_points: [u16; 2],
    pub in_tiebreak: bool,
    pub server: Option<ServerInfo>,
    pub winner: Option<Slot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub info: Participant,
    pub stats: ParticipantStats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetSummary {
    /// 1-based set number.
    pub number: usize,
    pub games: [u8; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreak: Option<[u16; 2]>,
    pub winner: Option<Slot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub meta: SummaryMeta,
    pub score: ScoreSummary,
    pub participants: [ParticipantSummary; 2],
    pub match_score: String,
    pub set_history: Vec<SetSummary>,
}

/// Entry point: project the scoreboard for `m`.
pub fn summarize(m: &Match) -> MatchSummary {
    let meta = SummaryMeta {
        match_type: if m.is_doubles() {
            MatchType::Doubles
        } else {
            MatchType::Singles
        },
        sets: m.format().sets(),
        status: if m.is_complete() {
            MatchStatus::Completed
        } else {
            MatchStatus::InProgress
        },
    };

    let participants = Slot::BOTH.map(|slot| {
        let info = m.participant(slot).clone();
        let stats = m.stats().get(&info.id).cloned().unwrap_or_default();
        ParticipantSummary { info, stats }
    });

    MatchSummary {
        meta,
        score: score_summary(m),
        participants,
        match_score: match_score_string(m),
        set_history: m
            .completed_sets()
            .iter()
            .enumerate()
            .map(|(i, set)| SetSummary {
                number: i + 1,
                games: set.score(),
                tiebreak: set.tiebreak().map(|t| t.score()),
                winner: set.winner(),
            })
            .collect(),
    }
}

fn score_summary(m: &Match) -> ScoreSummary {
    let set = m.current_set();
    let raw_points = m.current_points();
    let points = match (set.tiebreak(), set.game()) {
        (Some(tiebreak), _) => tiebreak.score().map(DisplayScore::Points),
        (None, Some(game)) => game.display_score(),
        (None, None) => [DisplayScore::LOVE; 2],
    };

    let server = m.current_server().and_then(|serve| {
        let slot = serve.slot();
        let (id, name) = match serve.seat() {
            Some(seat) => {
                let player = m.participant(slot).player(seat.member)?;
                (player.id.clone(), player.name.clone())
            }
            None => {
                let participant = m.participant(slot);
                (participant.id.clone(), participant.name.clone())
            }
        };
        Some(ServerInfo { slot, id, name })
    });

    ScoreSummary {
        sets: m.set_score(),
        games: m.current_games(),
        points,
        raw_points,
        in_tiebreak: m.in_tiebreak(),
        server,
        winner: m.winner(),
    }
}

fn set_score_text(set: &Set) -> String {
    let [one, two] = set.score();
    let mut text = format!("{one}-{two}");
    if let Some(tiebreak) = set.tiebreak().filter(|t| t.winner().is_some()) {
        let [a, b] = tiebreak.score();
        text.push_str(&format!("({})", a.min(b)));
    }
    text
}

/// Score line such as `"6-3, 4-6, 7-6(5), 2-0"`, from slot 1's side.
///
/// The active set is listed while the match is in progress.
pub fn match_score_string(m: &Match) -> String {
    let mut parts: Vec<String> = m.completed_sets().iter().map(set_score_text).collect();
    if !m.is_complete() {
        parts.push(set_score_text(m.current_set()));
    }
    parts.join(", ")
}
