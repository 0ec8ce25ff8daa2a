use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// One of the two competing sides. Serialises as `1` / `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::One, Slot::Two];

    /// Array index for per-side pairs such as `[u8; 2]`.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    #[inline]
    pub const fn other(self) -> Slot {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }

    /// 1-based slot number as shown to callers.
    #[inline]
    pub const fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        slot.number()
    }
}

impl TryFrom<u8> for Slot {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::One),
            2 => Ok(Slot::Two),
            other => Err(DomainError::validation(
                ValidationKind::InvalidSlot,
                format!("slot must be 1 or 2, got {other}"),
            )),
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.number())
    }
}

/// Position of a player inside a doubles team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    A,
    B,
}

/// An individual doubles player, addressed by side and team position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub slot: Slot,
    pub member: Member,
}

impl Seat {
    pub const fn new(slot: Slot, member: Member) -> Self {
        Self { slot, member }
    }
}
