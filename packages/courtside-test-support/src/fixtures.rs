//! Match configurations used across integration tests.

use courtside::{MatchConfig, MatchFormat, Participant, Player};

pub fn singles_config(sets: u8) -> MatchConfig {
    MatchConfig::new(
        Participant::single("p1", "Ada"),
        Participant::single("p2", "Bo"),
        MatchFormat::new(sets).expect("odd set count"),
    )
}

pub fn doubles_config(sets: u8) -> MatchConfig {
    MatchConfig::new(
        Participant::team(
            "t1",
            "Blue",
            Player::new("t1a", "Ann"),
            Player::new("t1b", "Bea"),
        ),
        Participant::team(
            "t2",
            "Red",
            Player::new("t2a", "Cai"),
            Player::new("t2b", "Dee"),
        ),
        MatchFormat::new(sets).expect("odd set count"),
    )
}
