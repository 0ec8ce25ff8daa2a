//! Per-participant and per-player statistics.
//!
//! Counters only ever move forward: removing a point does not roll them back.
//! Team records always cover their players' records plus events that were
//! not attributed to an individual.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::participants::Participant;
use crate::domain::point::Outcome;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingStats {
    pub aces: u32,
    pub double_faults: u32,
    pub service_winners: u32,
    /// Points played on a first serve.
    pub first_serve_total: u32,
    pub first_serve_points_won: u32,
    /// Points played on a second serve (double faults included).
    pub second_serve_total: u32,
    pub second_serve_points_won: u32,
    pub service_games_played: u32,
    pub service_games_won: u32,
    pub break_points_faced: u32,
    pub break_points_saved: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturningStats {
    pub points_won_on_return: u32,
    pub return_winners: u32,
    pub return_games_played: u32,
    pub return_games_won: u32,
    pub break_point_opportunities: u32,
    pub break_points_converted: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyStats {
    pub winners: u32,
    pub unforced_errors: u32,
    /// Errors forced out of the opponent.
    pub forced_errors: u32,
}

/// Counters for one side or one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub points_won: u32,
    pub points_played: u32,
    pub serving: ServingStats,
    pub returning: ReturningStats,
    pub rally: RallyStats,
}

impl StatLine {
    fn count_serve(&mut self, first_serve: bool, won: bool) {
        if first_serve {
            self.serving.first_serve_total += 1;
            if won {
                self.serving.first_serve_points_won += 1;
            }
        } else {
            self.serving.second_serve_total += 1;
            if won {
                self.serving.second_serve_points_won += 1;
            }
        }
    }

    /// Serve totals for a point this line served, from the serving side's view.
    fn count_served_point(&mut self, won: bool, outcome: Outcome, first_serve: bool) {
        match outcome {
            Outcome::Ace => {
                if won {
                    self.count_serve(true, true);
                }
            }
            Outcome::DoubleFault => {
                if !won {
                    self.serving.second_serve_total += 1;
                }
            }
            Outcome::ServiceWinner => {
                if won {
                    self.count_serve(first_serve, true);
                }
            }
            Outcome::ReturnWinner => {
                if !won {
                    self.count_serve(first_serve, false);
                }
            }
            _ => self.count_serve(first_serve, won),
        }
    }

    fn count_return_point(&mut self, role: Role) {
        if role.receiving && role.won {
            self.returning.points_won_on_return += 1;
        }
    }

    /// Apply one point to this line from the perspective of `role`.
    fn attribute(&mut self, role: Role, outcome: Outcome, first_serve: bool) {
        self.points_played += 1;
        if role.won {
            self.points_won += 1;
        }
        if role.serving {
            self.count_served_point(role.won, outcome, first_serve);
        }

        match outcome {
            Outcome::Ace => {
                if role.won {
                    self.serving.aces += 1;
                }
            }
            Outcome::DoubleFault => {
                if role.won {
                    self.count_return_point(role);
                } else {
                    self.serving.double_faults += 1;
                }
            }
            Outcome::ServiceWinner => {
                if role.won {
                    self.serving.service_winners += 1;
                }
            }
            Outcome::ReturnWinner => {
                if role.won {
                    self.returning.return_winners += 1;
                    self.count_return_point(role);
                }
            }
            Outcome::Winner => {
                if role.won {
                    self.rally.winners += 1;
                }
                self.count_return_point(role);
            }
            Outcome::UnforcedError => {
                if !role.won {
                    self.rally.unforced_errors += 1;
                }
                self.count_return_point(role);
            }
            Outcome::ForcedError => {
                if role.won {
                    self.rally.forced_errors += 1;
                }
                self.count_return_point(role);
            }
            Outcome::Regular => self.count_return_point(role),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Role {
    won: bool,
    /// This line served the point.
    serving: bool,
    /// This line's side received the point. A server's partner is neither.
    receiving: bool,
}

/// A side's record, with nested player records for teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    #[serde(flatten)]
    pub line: StatLine,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<(String, StatLine)>,
}

impl ParticipantStats {
    fn for_participant(participant: &Participant) -> Self {
        Self {
            line: StatLine::default(),
            players: participant
                .players()
                .map(|players| {
                    players
                        .iter()
                        .map(|p| (p.id.clone(), StatLine::default()))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&StatLine> {
        self.players
            .iter()
            .find(|(id, _)| id == player_id)
            .map(|(_, line)| line)
    }

    fn player_mut(&mut self, player_id: &str) -> Option<&mut StatLine> {
        self.players
            .iter_mut()
            .find(|(id, _)| id == player_id)
            .map(|(_, line)| line)
    }
}

/// Inputs for one scored point, keyed by participant and player ids.
#[derive(Debug, Clone, Copy)]
pub struct PointRecord<'a> {
    pub winner_id: &'a str,
    pub loser_id: &'a str,
    pub outcome: Outcome,
    pub server_id: &'a str,
    /// Doubles player who served the point.
    pub server_player_id: Option<&'a str>,
    /// Player who struck the deciding shot or owns the fault (doubles).
    pub scorer_id: Option<&'a str>,
    pub first_serve: Option<bool>,
}

/// Ordered `[participant_id, stats]` records for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsBook {
    entries: Vec<(String, ParticipantStats)>,
}

impl StatsBook {
    pub fn new(participants: &[Participant; 2]) -> Self {
        Self {
            entries: participants
                .iter()
                .map(|p| (p.id.clone(), ParticipantStats::for_participant(p)))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(String, ParticipantStats)] {
        &self.entries
    }

    pub fn get(&self, participant_id: &str) -> Option<&ParticipantStats> {
        self.entries
            .iter()
            .find(|(id, _)| id == participant_id)
            .map(|(_, stats)| stats)
    }

    fn get_mut(&mut self, participant_id: &str) -> Option<&mut ParticipantStats> {
        let found = self
            .entries
            .iter_mut()
            .find(|(id, _)| id == participant_id)
            .map(|(_, stats)| stats);
        if found.is_none() {
            warn!(participant_id, "statistics update for unknown participant");
        }
        found
    }

    /// Update winner and loser records for one point, plus the personal
    /// records of the scorer and the serving player.
    pub fn record_point(&mut self, record: PointRecord<'_>) {
        let first_serve = record.first_serve.unwrap_or(true);
        for (id, won) in [(record.winner_id, true), (record.loser_id, false)] {
            let serving = id == record.server_id;
            let Some(stats) = self.get_mut(id) else {
                continue;
            };
            stats.line.attribute(
                Role {
                    won,
                    serving,
                    receiving: !serving,
                },
                record.outcome,
                first_serve,
            );

            if let Some(pid) = record.scorer_id {
                if let Some(player) = stats.player_mut(pid) {
                    let role = Role {
                        won,
                        serving: record.server_player_id == Some(pid),
                        receiving: !serving,
                    };
                    player.attribute(role, record.outcome, first_serve);
                }
            }
            // serve totals stay with the server when someone else is credited
            if let Some(pid) = record.server_player_id {
                if record.scorer_id != Some(pid) {
                    if let Some(server) = stats.player_mut(pid) {
                        server.count_served_point(won, record.outcome, first_serve);
                    }
                }
            }
        }
    }

    /// A completed standard game, from the server's point of view.
    pub fn record_service_game(&mut self, server_id: &str, receiver_id: &str, held: bool) {
        if let Some(server) = self.get_mut(server_id) {
            server.line.serving.service_games_played += 1;
            if held {
                server.line.serving.service_games_won += 1;
            }
        }
        if let Some(receiver) = self.get_mut(receiver_id) {
            receiver.line.returning.return_games_played += 1;
            if !held {
                receiver.line.returning.return_games_won += 1;
            }
        }
    }

    /// A point played with the receiver one point from the game.
    pub fn record_break_point(&mut self, server_id: &str, receiver_id: &str, converted: bool) {
        if let Some(server) = self.get_mut(server_id) {
            server.line.serving.break_points_faced += 1;
            if !converted {
                server.line.serving.break_points_saved += 1;
            }
        }
        if let Some(receiver) = self.get_mut(receiver_id) {
            receiver.line.returning.break_point_opportunities += 1;
            if converted {
                receiver.line.returning.break_points_converted += 1;
            }
        }
    }
}
