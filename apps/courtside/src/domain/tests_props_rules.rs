//! Property tests for win thresholds and serve order.
//!
//! - A tiebreak exists exactly when the active set stands at 6-6
//! - Games, sets and matches are only won with the required margin
//! - Game servers advance one turn per game, across sets and tiebreaks
//! - Tiebreak serve changes after point 1, then every two points

use proptest::prelude::*;

use crate::domain::match_play::Match;
use crate::domain::rules::tiebreak_serve_switches;
use crate::domain::serving::ServeTurn;
use crate::domain::test_state_helpers::{doubles_config, singles_config};
use crate::domain::{test_gens, test_prelude, Outcome};

fn new_match(doubles: bool, sets: u8) -> Match {
    let config = if doubles {
        doubles_config(sets)
    } else {
        singles_config(sets)
    };
    Match::new(config).expect("valid config")
}

/// Serve holder of every game plus each tiebreak opener, in play order.
fn serve_sequence(m: &Match) -> Vec<ServeTurn> {
    let mut turns = Vec::new();
    for set in m.completed_sets() {
        turns.extend(set.games().iter().map(|g| g.serve()));
        turns.extend(set.tiebreak().map(|t| t.opening()));
    }
    let set = m.current_set();
    turns.extend(set.games().iter().map(|g| g.serve()));
    turns.extend(m.current_server().filter(|_| !set.in_tiebreak()));
    turns.extend(set.tiebreak().map(|t| t.opening()));
    turns
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: tiebreak iff 6-6 in the active set.
    #[test]
    fn prop_tiebreak_only_at_six_all(
        doubles in any::<bool>(),
        calls in test_gens::point_calls(500),
    ) {
        let mut m = new_match(doubles, 5);
        for call in calls {
            m.score_call(call);
            prop_assert_eq!(m.in_tiebreak(), m.current_games() == [6, 6]);
        }
        for set in m.completed_sets() {
            let [a, b] = set.score();
            prop_assert_eq!(set.tiebreak().is_some(), a.max(b) == 7 && a.min(b) == 6);
        }
    }

    /// Property: winners always hold the threshold and the margin.
    #[test]
    fn prop_winners_need_margin(
        doubles in any::<bool>(),
        sets in prop_oneof![Just(1u8), Just(3u8), Just(5u8)],
        winners in test_gens::lopsided_winners(600),
    ) {
        let mut m = new_match(doubles, sets);
        for winner in winners {
            m.score_point(winner, Outcome::Regular);
        }

        for set in m.completed_sets().iter().chain(std::iter::once(m.current_set())) {
            for game in set.games() {
                let winner = game.winner().expect("archived game has a winner");
                let raw = game.raw_score();
                let (w, l) = (raw[winner.index()], raw[winner.other().index()]);
                prop_assert!(w >= 4 && w >= l + 2, "game {raw:?}");
            }
            if let Some(winner) = set.winner() {
                let score = set.score();
                let (w, l) = (score[winner.index()], score[winner.other().index()]);
                match set.tiebreak() {
                    Some(tiebreak) => {
                        prop_assert_eq!((w, l), (7, 6));
                        prop_assert_eq!(tiebreak.winner(), Some(winner));
                        let t = tiebreak.score();
                        let (tw, tl) = (t[winner.index()], t[winner.other().index()]);
                        prop_assert!(tw >= 7 && tw >= tl + 2, "tiebreak {t:?}");
                    }
                    None => prop_assert!(w >= 6 && w >= l + 2, "set {score:?}"),
                }
            }
        }

        match m.winner() {
            Some(winner) => prop_assert_eq!(m.set_score()[winner.index()], sets / 2 + 1),
            None => prop_assert!(m.set_score().iter().all(|&s| s <= sets / 2)),
        }
    }

    /// Property: one serve turn per game; period 2 in singles, 4 in doubles.
    #[test]
    fn prop_serve_advances_one_turn_per_game(
        doubles in any::<bool>(),
        winners in test_gens::lopsided_winners(600),
    ) {
        let mut m = new_match(doubles, 5);
        for winner in winners {
            m.score_point(winner, Outcome::Regular);
        }
        let turns = serve_sequence(&m);
        for pair in turns.windows(2) {
            prop_assert_eq!(pair[1], pair[0].next());
        }
        let period = if doubles { 4 } else { 2 };
        for pair in turns.windows(period + 1) {
            prop_assert_eq!(pair[0], pair[period]);
        }
    }

    /// Property: tiebreak points are served by opener, then pairs in turn.
    #[test]
    fn prop_tiebreak_serve_by_parity(
        doubles in any::<bool>(),
        calls in test_gens::point_calls(900),
    ) {
        let mut m = new_match(doubles, 5);
        for call in calls {
            m.score_call(call);
        }
        for set in m.completed_sets().iter().chain(std::iter::once(m.current_set())) {
            let Some(tiebreak) = set.tiebreak() else { continue };
            for (n, point) in tiebreak.points().iter().enumerate() {
                let n = u16::try_from(n).expect("short tiebreak");
                let expected = tiebreak.opening().advanced(tiebreak_serve_switches(n));
                prop_assert_eq!(point.server(), expected.server());
            }
        }
    }
}
