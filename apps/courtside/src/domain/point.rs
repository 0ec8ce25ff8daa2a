use serde::{Deserialize, Serialize};

use crate::domain::serving::Server;
use crate::domain::sides::{Seat, Slot};

/// How a point ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Ace,
    DoubleFault,
    ServiceWinner,
    ReturnWinner,
    Winner,
    UnforcedError,
    ForcedError,
    Regular,
}

impl Outcome {
    pub const ALL: [Outcome; 8] = [
        Outcome::Ace,
        Outcome::DoubleFault,
        Outcome::ServiceWinner,
        Outcome::ReturnWinner,
        Outcome::Winner,
        Outcome::UnforcedError,
        Outcome::ForcedError,
        Outcome::Regular,
    ];

    /// Outcomes decided on the serve itself; the server owns them in doubles.
    pub const fn is_serve_decided(self) -> bool {
        matches!(
            self,
            Outcome::Ace | Outcome::DoubleFault | Outcome::ServiceWinner
        )
    }
}

/// A scored point. Immutable once created by a game or tiebreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    winner: Slot,
    outcome: Outcome,
    fault: bool,
    server: Server,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scoring_player: Option<Seat>,
}

impl Point {
    /// A double fault always counts as following a fault.
    pub fn new(
        winner: Slot,
        outcome: Outcome,
        fault: bool,
        server: Server,
        scoring_player: Option<Seat>,
    ) -> Self {
        Self {
            winner,
            outcome,
            fault: fault || outcome == Outcome::DoubleFault,
            server,
            scoring_player,
        }
    }

    pub fn winner(&self) -> Slot {
        self.winner
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the point was played on a second serve.
    pub fn fault(&self) -> bool {
        self.fault
    }

    pub fn server(&self) -> Server {
        self.server
    }

    pub fn scoring_player(&self) -> Option<Seat> {
        self.scoring_player
    }
}
