use serde::{Deserialize, Serialize};

use crate::domain::sides::Member;

/// An individual player inside a doubles team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPlayers {
    pub a: Player,
    pub b: Player,
}

impl TeamPlayers {
    pub fn get(&self, member: Member) -> &Player {
        match member {
            Member::A => &self.a,
            Member::B => &self.b,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        [&self.a, &self.b].into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParticipantKind {
    Single,
    Team { players: TeamPlayers },
}

/// One side of a match: a single player or a doubles pair.
///
/// Records are built and validated by callers; the engine only reads the
/// id, the kind and the team players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn single(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ParticipantKind::Single,
        }
    }

    pub fn team(id: impl Into<String>, name: impl Into<String>, a: Player, b: Player) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ParticipantKind::Team {
                players: TeamPlayers { a, b },
            },
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self.kind, ParticipantKind::Team { .. })
    }

    pub fn players(&self) -> Option<&TeamPlayers> {
        match &self.kind {
            ParticipantKind::Single => None,
            ParticipantKind::Team { players } => Some(players),
        }
    }

    pub fn player(&self, member: Member) -> Option<&Player> {
        self.players().map(|players| players.get(member))
    }
}
