//! Tiebreak scoring: first to seven, win by two, serve changes by point parity.

use serde::{Deserialize, Serialize};

use crate::domain::point::{Outcome, Point};
use crate::domain::rules::{tiebreak_serve_switches, tiebreak_winner};
use crate::domain::serving::ServeTurn;
use crate::domain::sides::{Seat, Slot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiebreak {
    /// Serve holder for the first point.
    opening: ServeTurn,
    /// Serve holder for the next point.
    serve: ServeTurn,
    score: [u16; 2],
    winner: Option<Slot>,
    points: Vec<Point>,
}

impl Tiebreak {
    pub fn new(opening: ServeTurn) -> Self {
        Self {
            opening,
            serve: opening,
            score: [0; 2],
            winner: None,
            points: Vec::new(),
        }
    }

    pub fn score_point(
        &mut self,
        winner: Slot,
        outcome: Outcome,
        fault: bool,
        scoring_player: Option<Seat>,
    ) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.points.push(Point::new(
            winner,
            outcome,
            fault,
            self.serve.server(),
            scoring_player,
        ));
        self.score[winner.index()] += 1;
        self.recompute();
        true
    }

    pub fn remove_point(&mut self) -> Option<Point> {
        let point = self.points.pop()?;
        let side = &mut self.score[point.winner().index()];
        debug_assert!(*side > 0, "tiebreak score out of step with point list");
        *side = side.saturating_sub(1);
        self.recompute();
        Some(point)
    }

    // Serve holder is re-derived from the opening server on every change, so
    // removing several points in a row lands on the right player.
    fn recompute(&mut self) {
        self.winner = tiebreak_winner(self.score);
        self.serve = self.opening.advanced(tiebreak_serve_switches(self.total()));
    }

    pub fn total(&self) -> u16 {
        self.score[0] + self.score[1]
    }

    pub fn opening(&self) -> ServeTurn {
        self.opening
    }

    pub fn serve(&self) -> ServeTurn {
        self.serve
    }

    pub fn score(&self) -> [u16; 2] {
        self.score
    }

    pub fn winner(&self) -> Option<Slot> {
        self.winner
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
