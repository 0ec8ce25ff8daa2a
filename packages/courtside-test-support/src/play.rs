//! Scripted play through the public scoring API.

use courtside::{Match, Outcome, Slot};

pub fn win_points(m: &mut Match, slot: Slot, n: usize) {
    for _ in 0..n {
        assert!(m.score_point(slot, Outcome::Regular), "point rejected");
    }
}

/// Win a game from love-all.
pub fn win_game(m: &mut Match, slot: Slot) {
    win_points(m, slot, 4);
}

pub fn win_games(m: &mut Match, slot: Slot, n: usize) {
    for _ in 0..n {
        win_game(m, slot);
    }
}

/// Win a set from 0-0.
pub fn win_set(m: &mut Match, slot: Slot) {
    win_games(m, slot, 6);
}

/// Alternate games from 0-0 to 6-6.
pub fn reach_tiebreak(m: &mut Match) {
    for _ in 0..6 {
        win_game(m, Slot::One);
        win_game(m, Slot::Two);
    }
}
