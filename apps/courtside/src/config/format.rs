use serde::{Deserialize, Serialize};

use crate::domain::participants::Participant;
use crate::domain::serving::{Rotation, ServeTurn};
use crate::domain::sides::{Seat, Slot};
use crate::errors::domain::{DomainError, ValidationKind};

/// Best-of-N sets. Serialises as the set count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MatchFormat {
    sets: u8,
}

impl MatchFormat {
    /// Rejects zero and even set counts; an even count has no majority rule.
    pub fn new(sets: u8) -> Result<Self, DomainError> {
        if sets == 0 {
            return Err(DomainError::validation(
                ValidationKind::ZeroSets,
                "a match needs at least one set",
            ));
        }
        if sets % 2 == 0 {
            return Err(DomainError::validation(
                ValidationKind::EvenSetCount,
                format!("set count must be odd, got {sets}"),
            ));
        }
        Ok(Self { sets })
    }

    pub const fn best_of_three() -> Self {
        Self { sets: 3 }
    }

    pub const fn best_of_five() -> Self {
        Self { sets: 5 }
    }

    pub fn sets(&self) -> u8 {
        self.sets
    }

    /// Sets one side needs to take the match.
    pub fn sets_to_win(&self) -> u8 {
        self.sets / 2 + 1
    }
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self::best_of_three()
    }
}

impl TryFrom<u8> for MatchFormat {
    type Error = DomainError;

    fn try_from(sets: u8) -> Result<Self, Self::Error> {
        Self::new(sets)
    }
}

impl From<MatchFormat> for u8 {
    fn from(format: MatchFormat) -> Self {
        format.sets
    }
}

/// Everything needed to start a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub participants: [Participant; 2],
    pub format: MatchFormat,
    /// Doubles serving order; the standard order when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[Seat; 4]>,
}

impl MatchConfig {
    pub fn new(one: Participant, two: Participant, format: MatchFormat) -> Self {
        Self {
            participants: [one, two],
            format,
            rotation: None,
        }
    }

    pub fn with_rotation(mut self, order: [Seat; 4]) -> Self {
        self.rotation = Some(order);
        self
    }

    pub fn participant(&self, slot: Slot) -> &Participant {
        &self.participants[slot.index()]
    }

    pub fn is_doubles(&self) -> bool {
        self.participants[0].is_team()
    }

    /// Validate the lineup and produce the serve holder for the first point.
    pub fn opening_serve(&self) -> Result<ServeTurn, DomainError> {
        let [one, two] = &self.participants;
        if one.is_team() != two.is_team() {
            return Err(DomainError::validation(
                ValidationKind::MismatchedParticipants,
                format!(
                    "slot 1 ({}) and slot 2 ({}) must both be singles players or both be teams",
                    one.id, two.id
                ),
            ));
        }
        if one.id == two.id {
            return Err(DomainError::validation(
                ValidationKind::DuplicateParticipantId,
                format!("both slots use participant id {}", one.id),
            ));
        }

        if !one.is_team() {
            if self.rotation.is_some() {
                return Err(DomainError::validation(
                    ValidationKind::RotationForSingles,
                    "serving rotation only applies to doubles",
                ));
            }
            return Ok(ServeTurn::singles(Slot::One));
        }

        let mut player_ids: Vec<&str> = self
            .participants
            .iter()
            .filter_map(Participant::players)
            .flat_map(|players| players.iter().map(|p| p.id.as_str()))
            .collect();
        player_ids.sort_unstable();
        player_ids.dedup();
        if player_ids.len() != 4 {
            return Err(DomainError::validation(
                ValidationKind::DuplicateParticipantId,
                "doubles players must have four distinct ids",
            ));
        }

        let rotation = match self.rotation {
            Some(order) => Rotation::new(order)?,
            None => Rotation::standard(),
        };
        Ok(ServeTurn::doubles(rotation))
    }
}
