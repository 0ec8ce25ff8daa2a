//! Domain layer: pure scoring logic for racket-sport matches.

pub mod game;
pub mod match_play;
pub mod participants;
pub mod point;
pub mod rules;
pub mod serving;
pub mod set;
pub mod sides;
pub mod snapshot;
pub mod stats;
pub mod summary;
pub mod tiebreak;

#[cfg(test)]
mod tests_doubles;
#[cfg(test)]
mod tests_game;
#[cfg(test)]
mod tests_match;
#[cfg(test)]
mod tests_props_rules;
#[cfg(test)]
mod tests_summary;

// Re-exports for ergonomics
pub use game::{DisplayScore, Game, ScoreLabel};
pub use match_play::{Match, PointCall};
pub use participants::{Participant, ParticipantKind, Player, TeamPlayers};
pub use point::{Outcome, Point};
pub use serving::{Rotation, ServeTurn, Server};
pub use set::Set;
pub use sides::{Member, Seat, Slot};
pub use snapshot::MatchSnapshot;
pub use stats::{ParticipantStats, StatLine, StatsBook};
pub use summary::{summarize, MatchSummary};
pub use tiebreak::Tiebreak;
