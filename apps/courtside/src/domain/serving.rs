//! Serve holder bookkeeping for singles and doubles.
//!
//! Singles alternates a slot; doubles walks a fixed four-player order. Both
//! are carried by [`ServeTurn`] so that rotation data only ever exists on the
//! doubles variant.

use serde::{Deserialize, Serialize};

use crate::domain::rules::ROTATION_LEN;
use crate::domain::sides::{Member, Seat, Slot};
use crate::errors::domain::{DomainError, ValidationKind};

/// Fixed doubles serving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    order: [Seat; ROTATION_LEN as usize],
}

impl Rotation {
    /// Side 1 player A, side 2 player A, side 1 player B, side 2 player B.
    pub const fn standard() -> Self {
        Self {
            order: [
                Seat::new(Slot::One, Member::A),
                Seat::new(Slot::Two, Member::A),
                Seat::new(Slot::One, Member::B),
                Seat::new(Slot::Two, Member::B),
            ],
        }
    }

    /// Custom order. Every player must appear once and sides must alternate.
    pub fn new(order: [Seat; ROTATION_LEN as usize]) -> Result<Self, DomainError> {
        for (i, seat) in order.iter().enumerate() {
            if order[..i].contains(seat) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidRotation,
                    format!("player {seat:?} appears twice in the serving order"),
                ));
            }
        }
        let alternates = order
            .iter()
            .zip(order.iter().cycle().skip(1))
            .all(|(a, b)| a.slot != b.slot);
        if !alternates {
            return Err(DomainError::validation(
                ValidationKind::InvalidRotation,
                "serving order must alternate between sides",
            ));
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> &[Seat; ROTATION_LEN as usize] {
        &self.order
    }

    #[inline]
    pub fn seat_at(&self, index: u8) -> Seat {
        self.order[usize::from(index % ROTATION_LEN)]
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::standard()
    }
}

/// Who holds serve right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServeTurn {
    Singles { slot: Slot },
    Doubles { rotation: Rotation, index: u8 },
}

impl ServeTurn {
    pub const fn singles(slot: Slot) -> Self {
        ServeTurn::Singles { slot }
    }

    pub const fn doubles(rotation: Rotation) -> Self {
        ServeTurn::Doubles { rotation, index: 0 }
    }

    /// Serving side.
    pub fn slot(&self) -> Slot {
        match self {
            ServeTurn::Singles { slot } => *slot,
            ServeTurn::Doubles { rotation, index } => rotation.seat_at(*index).slot,
        }
    }

    /// Serving player; doubles only.
    pub fn seat(&self) -> Option<Seat> {
        match self {
            ServeTurn::Singles { .. } => None,
            ServeTurn::Doubles { rotation, index } => Some(rotation.seat_at(*index)),
        }
    }

    /// Serve holder `steps` changes later.
    pub fn advanced(self, steps: u16) -> Self {
        match self {
            ServeTurn::Singles { slot } => {
                let slot = if steps % 2 == 0 { slot } else { slot.other() };
                ServeTurn::Singles { slot }
            }
            ServeTurn::Doubles { rotation, index } => {
                // steps is reduced first so the sum cannot overflow
                let step = (steps % u16::from(ROTATION_LEN)) as u8;
                ServeTurn::Doubles {
                    rotation,
                    index: (index + step) % ROTATION_LEN,
                }
            }
        }
    }

    #[inline]
    pub fn next(self) -> Self {
        self.advanced(1)
    }

    /// Identity frozen into a point record.
    pub fn server(&self) -> Server {
        match self.seat() {
            Some(seat) => Server::Player(seat),
            None => Server::Side(self.slot()),
        }
    }
}

/// Serving identity at the time a point was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    Side(Slot),
    Player(Seat),
}

impl Server {
    pub fn slot(&self) -> Slot {
        match self {
            Server::Side(slot) => *slot,
            Server::Player(seat) => seat.slot,
        }
    }
}
