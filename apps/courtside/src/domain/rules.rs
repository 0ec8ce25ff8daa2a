use crate::domain::sides::Slot;

pub const POINTS_TO_WIN_GAME: u16 = 4;
pub const POINTS_TO_WIN_TIEBREAK: u16 = 7;
pub const GAMES_TO_WIN_SET: u8 = 6;
/// Games score at which a set is decided by a tiebreak.
pub const TIEBREAK_AT: [u8; 2] = [6, 6];
pub const WIN_MARGIN: u16 = 2;
pub const ROTATION_LEN: u8 = 4;

/// Display values for raw game points 0..=3.
pub const POINT_CALLS: [u16; 4] = [0, 15, 30, 40];

/// Side that has reached `threshold` while leading by at least two.
pub fn leader_with_margin(score: [u16; 2], threshold: u16) -> Option<Slot> {
    let [one, two] = score;
    if one >= threshold && one >= two + WIN_MARGIN {
        Some(Slot::One)
    } else if two >= threshold && two >= one + WIN_MARGIN {
        Some(Slot::Two)
    } else {
        None
    }
}

pub fn game_winner(raw: [u16; 2]) -> Option<Slot> {
    leader_with_margin(raw, POINTS_TO_WIN_GAME)
}

pub fn tiebreak_winner(score: [u16; 2]) -> Option<Slot> {
    leader_with_margin(score, POINTS_TO_WIN_TIEBREAK)
}

/// Standard set win (no tiebreak): six games with a two-game margin.
pub fn set_winner(games: [u8; 2]) -> Option<Slot> {
    leader_with_margin(
        [u16::from(games[0]), u16::from(games[1])],
        u16::from(GAMES_TO_WIN_SET),
    )
}

pub fn starts_tiebreak(games: [u8; 2]) -> bool {
    games == TIEBREAK_AT
}

/// Match winner once one side holds more than half of the configured sets.
pub fn match_winner(set_score: [u8; 2], sets: u8) -> Option<Slot> {
    let half = sets / 2;
    Slot::BOTH
        .into_iter()
        .find(|slot| set_score[slot.index()] > half)
}

/// Serve switches that have happened after `total` tiebreak points.
///
/// The serve changes after the first point and then after every odd total.
#[inline]
pub fn tiebreak_serve_switches(total: u16) -> u16 {
    total.div_ceil(2)
}
