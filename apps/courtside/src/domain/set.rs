//! Set orchestration: active game or tiebreak, completed games, set winner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::game::Game;
use crate::domain::point::{Outcome, Point};
use crate::domain::rules::{set_winner, starts_tiebreak};
use crate::domain::serving::ServeTurn;
use crate::domain::sides::{Seat, Slot};
use crate::domain::tiebreak::Tiebreak;

/// Result of one step of the undo walk.
enum UndoStep {
    /// A point was popped; the walk is over.
    Removed(Point),
    /// A completed game was reopened; walk again.
    Crossed,
    /// Nothing left to remove in this set.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    score: [u8; 2],
    /// Absent while a tiebreak is being played.
    game: Option<Game>,
    games: Vec<Game>,
    tiebreak: Option<Tiebreak>,
    winner: Option<Slot>,
}

impl Set {
    pub fn new(serve: ServeTurn) -> Self {
        Self {
            score: [0; 2],
            game: Some(Game::new(serve)),
            games: Vec::new(),
            tiebreak: None,
            winner: None,
        }
    }

    /// Forward a point to the active tiebreak or game.
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
        let scored = match (self.tiebreak.as_mut(), self.game.as_mut()) {
            (Some(tiebreak), _) => tiebreak.score_point(winner, outcome, fault, scoring_player),
            (None, Some(game)) => game.score_point(winner, outcome, fault, scoring_player),
            (None, None) => {
                debug_assert!(false, "set has neither a game nor a tiebreak");
                false
            }
        };
        if scored {
            self.update_set();
        }
        scored
    }

    /// Remove the most recent point in this set, reopening a completed game
    /// or leaving a not-yet-started tiebreak when needed.
    pub fn remove_point(&mut self) -> Option<Point> {
        let removed = loop {
            match self.undo_step() {
                UndoStep::Removed(point) => break Some(point),
                UndoStep::Crossed => continue,
                UndoStep::Exhausted => break None,
            }
        };
        self.update_set();
        removed
    }

    fn undo_step(&mut self) -> UndoStep {
        if let Some(tiebreak) = self.tiebreak.as_mut() {
            if !tiebreak.is_empty() {
                let had_winner = tiebreak.winner();
                let Some(point) = tiebreak.remove_point() else {
                    return UndoStep::Exhausted;
                };
                if let (Some(winner), None) = (had_winner, tiebreak.winner()) {
                    self.take_back_game(winner);
                    self.winner = None;
                }
                return UndoStep::Removed(point);
            }

            // At the very start of the tiebreak: step back into the 6-5 / 5-6 game.
            self.tiebreak = None;
            return self.reopen_last_game();
        }

        match self.game.as_ref() {
            Some(game) if !game.is_empty() => {}
            _ => return self.reopen_last_game(),
        }
        match self.game.as_mut().and_then(Game::remove_point) {
            Some(point) => UndoStep::Removed(point),
            None => UndoStep::Exhausted,
        }
    }

    fn reopen_last_game(&mut self) -> UndoStep {
        let Some(last) = self.games.pop() else {
            return UndoStep::Exhausted;
        };
        match last.winner() {
            Some(winner) => self.take_back_game(winner),
            None => debug_assert!(false, "archived game without a winner"),
        }
        debug!(games = ?self.score, "reopened completed game");
        self.game = Some(last);
        UndoStep::Crossed
    }

    fn take_back_game(&mut self, winner: Slot) {
        let games = &mut self.score[winner.index()];
        debug_assert!(*games > 0, "set score out of step with game history");
        *games = games.saturating_sub(1);
    }

    /// Re-derive set state after any forward or backward point.
    fn update_set(&mut self) {
        if let Some(tiebreak) = self.tiebreak.as_ref() {
            match tiebreak.winner() {
                Some(winner) => {
                    if self.winner.is_none() {
                        self.score[winner.index()] += 1;
                        self.winner = Some(winner);
                        debug!(%winner, games = ?self.score, "tiebreak decided set");
                    }
                }
                None => self.winner = None,
            }
            return;
        }

        let Some(game) = self.game.as_ref() else {
            debug_assert!(false, "set has neither a game nor a tiebreak");
            return;
        };

        if let Some(winner) = game.winner() {
            let next = game.serve().next();
            if let Some(done) = self.game.replace(Game::new(next)) {
                self.games.push(done);
            }
            self.score[winner.index()] += 1;
            debug!(%winner, games = ?self.score, "game complete");

            if starts_tiebreak(self.score) {
                self.game = None;
                self.tiebreak = Some(Tiebreak::new(next));
                debug!("tiebreak started");
            }
        }

        self.winner = set_winner(self.score);
    }

    /// Serve holder for the next point in this set.
    pub fn current_serve(&self) -> Option<ServeTurn> {
        match (&self.tiebreak, &self.game) {
            (Some(tiebreak), _) => Some(tiebreak.serve()),
            (None, Some(game)) => Some(game.serve()),
            (None, None) => None,
        }
    }

    /// Serve holder for the first game of the following set.
    ///
    /// After a tiebreak this is the turn after the tiebreak's opening server;
    /// otherwise it is the server already assigned to the fresh active game.
    pub fn next_set_serve(&self) -> Option<ServeTurn> {
        match (&self.tiebreak, &self.game) {
            (Some(tiebreak), _) => Some(tiebreak.opening().next()),
            (None, Some(game)) => Some(game.serve()),
            (None, None) => None,
        }
    }

    /// No points anywhere in this set.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
            && self.tiebreak.as_ref().is_none_or(Tiebreak::is_empty)
            && self.game.as_ref().is_none_or(Game::is_empty)
    }

    /// Every point of the set in the order it was played.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.games
            .iter()
            .flat_map(|game| game.points())
            .chain(self.game.iter().flat_map(|game| game.points()))
            .chain(self.tiebreak.iter().flat_map(|tiebreak| tiebreak.points()))
    }

    pub fn point_count(&self) -> usize {
        self.points().count()
    }

    pub fn score(&self) -> [u8; 2] {
        self.score
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn tiebreak(&self) -> Option<&Tiebreak> {
        self.tiebreak.as_ref()
    }

    pub fn in_tiebreak(&self) -> bool {
        self.tiebreak.is_some()
    }

    pub fn winner(&self) -> Option<Slot> {
        self.winner
    }
}
