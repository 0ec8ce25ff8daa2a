use crate::config::format::MatchFormat;
use crate::domain::match_play::Match;
use crate::domain::serving::ServeTurn;
use crate::domain::snapshot::MatchSnapshot;
use crate::domain::test_state_helpers::{
    reach_tiebreak, singles, singles_config, win_game, win_games, win_points, win_set,
};
use crate::domain::{DisplayScore, Member, Outcome, Participant, Player, PointCall, Seat, Slot};
use crate::errors::domain::ValidationKind;
use crate::persistence::{MatchStore, MemoryStore, StoreError};
use crate::MatchConfig;

const ONE: Slot = Slot::One;
const TWO: Slot = Slot::Two;

#[test]
fn first_game_to_slot_one_flips_the_server() {
    let mut m = singles();
    assert_eq!(m.current_server(), Some(ServeTurn::singles(ONE)));
    win_points(&mut m, ONE, 4);

    assert_eq!(m.current_games(), [1, 0]);
    assert_eq!(m.current_points(), [0, 0]);
    assert_eq!(m.current_set().games()[0].winner(), Some(ONE));
    assert_eq!(m.current_server(), Some(ServeTurn::singles(TWO)));
    assert_eq!(m.current_server_id(), Some("p2"));
}

#[test]
fn advantage_label_depends_on_who_serves() {
    let mut m = singles();
    win_points(&mut m, ONE, 3);
    win_points(&mut m, TWO, 3);
    let game = m.current_set().game().expect("active game");
    assert_eq!(game.display_score(), [DisplayScore::DEUCE; 2]);
    win_points(&mut m, ONE, 1);
    let game = m.current_set().game().expect("active game");
    assert_eq!(game.display_score(), [DisplayScore::AD_IN, DisplayScore::DASH]);

    // second game: slot 2 serves, so slot 1 leading is AD-OUT
    let mut m = singles();
    win_game(&mut m, TWO);
    win_points(&mut m, ONE, 3);
    win_points(&mut m, TWO, 3);
    win_points(&mut m, ONE, 1);
    let game = m.current_set().game().expect("active game");
    assert_eq!(game.display_score(), [DisplayScore::AD_OUT, DisplayScore::DASH]);
}

#[test]
fn six_all_goes_to_a_tiebreak_that_decides_the_set() {
    let mut m = singles();
    reach_tiebreak(&mut m);
    assert!(m.in_tiebreak());
    assert_eq!(m.current_games(), [6, 6]);

    win_points(&mut m, TWO, 7);
    assert!(!m.in_tiebreak());
    assert_eq!(m.set_score(), [0, 1]);
    let done = &m.completed_sets()[0];
    assert_eq!(done.score(), [6, 7]);
    assert_eq!(done.winner(), Some(TWO));
    assert_eq!(done.tiebreak().map(|t| t.score()), Some([0, 7]));
    // slot 1 served first in the tiebreak, so slot 2 opens the next set
    assert_eq!(m.current_server(), Some(ServeTurn::singles(TWO)));
}

#[test]
fn serve_carries_across_sets() {
    // 6-3 is nine games; slot 2 serves the tenth
    let mut m = singles();
    win_games(&mut m, TWO, 3);
    win_games(&mut m, ONE, 6);
    assert_eq!(m.set_score(), [1, 0]);
    assert_eq!(m.current_server(), Some(ServeTurn::singles(TWO)));
}

#[test]
fn undo_of_match_point_reopens_the_match() {
    let mut m = singles();
    win_set(&mut m, ONE);
    win_games(&mut m, ONE, 5);
    win_points(&mut m, ONE, 3);
    assert_eq!(m.current_points(), [3, 0]);

    win_points(&mut m, ONE, 1);
    assert_eq!(m.winner(), Some(ONE));
    assert_eq!(m.set_score(), [2, 0]);
    assert!(m.is_complete());

    let removed = m.remove_point().expect("match point removed");
    assert_eq!(removed.winner(), ONE);
    assert_eq!(m.winner(), None);
    assert_eq!(m.set_score(), [1, 0]);
    assert_eq!(m.current_games(), [5, 0]);
    assert_eq!(m.current_points(), [3, 0]);
    assert_eq!(m.completed_sets().len(), 1);

    m.remove_point();
    assert_eq!(m.set_score(), [1, 0]);
    assert_eq!(m.current_games(), [5, 0]);
    assert_eq!(m.current_points(), [2, 0]);
}

#[test]
fn completed_match_ignores_points() {
    let mut m = singles();
    win_set(&mut m, TWO);
    win_set(&mut m, TWO);
    assert_eq!(m.winner(), Some(TWO));
    let before = m.point_count();

    assert!(!m.score_point(ONE, Outcome::Ace));
    assert_eq!(m.point_count(), before);
    assert_eq!(m.set_score(), [0, 2]);
}

#[test]
fn undo_crosses_set_boundary() {
    let mut m = singles();
    win_set(&mut m, ONE);
    assert_eq!(m.set_score(), [1, 0]);
    assert!(m.current_set().is_empty());

    m.remove_point();
    assert_eq!(m.set_score(), [0, 0]);
    assert!(m.completed_sets().is_empty());
    assert_eq!(m.current_games(), [5, 0]);
    assert_eq!(m.current_points(), [3, 0]);
    // the sixth game was served by slot 2
    assert_eq!(m.current_server(), Some(ServeTurn::singles(TWO)));
}

#[test]
fn undo_everything_then_nothing() {
    let mut m = singles();
    win_games(&mut m, ONE, 2);
    win_points(&mut m, TWO, 2);
    let mut removed = 0;
    while m.remove_point().is_some() {
        removed += 1;
    }
    assert_eq!(removed, 10);
    assert_eq!(m.point_count(), 0);
    assert_eq!(m.current_server(), Some(ServeTurn::singles(ONE)));
    assert!(m.remove_point().is_none());
}

#[test]
fn single_set_match() {
    let mut m = Match::new(singles_config(1)).unwrap();
    win_set(&mut m, TWO);
    assert_eq!(m.winner(), Some(TWO));
}

#[test]
fn construction_rejects_mixed_lineups() {
    let config = MatchConfig::new(
        Participant::single("p1", "Ada"),
        Participant::team("t2", "Red", Player::new("a", "A"), Player::new("b", "B")),
        MatchFormat::default(),
    );
    let err = Match::new(config).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::MismatchedParticipants)
    );
}

#[test]
fn scorer_is_ignored_in_singles() {
    let mut m = singles();
    let call = PointCall::new(ONE, Outcome::Winner).scored_by(Seat::new(ONE, Member::A));
    assert!(m.score_call(call));
    let point = m.points().next().copied().expect("one point");
    assert_eq!(point.scoring_player(), None);
}

struct FailingStore;

impl MatchStore for FailingStore {
    fn save(&self, _snapshot: &MatchSnapshot) -> Result<(), StoreError> {
        Err(StoreError::Locked("always".into()))
    }

    fn load(&self) -> Result<Option<MatchSnapshot>, StoreError> {
        Ok(None)
    }
}

#[test]
fn failed_saves_do_not_disturb_scoring() {
    let mut m = Match::with_store(singles_config(3), Box::new(FailingStore)).unwrap();
    win_game(&mut m, ONE);
    win_points(&mut m, TWO, 2);
    assert_eq!(m.current_games(), [1, 0]);
    assert_eq!(m.current_points(), [0, 2]);
    assert!(m.remove_point().is_some());
    assert_eq!(m.current_points(), [0, 1]);
}

#[test]
fn every_mutation_saves_once() {
    let store = MemoryStore::new();
    let mut m = Match::with_store(singles_config(3), Box::new(store.clone())).unwrap();
    assert_eq!(store.save_count(), 1);

    win_points(&mut m, ONE, 3);
    assert_eq!(store.save_count(), 4);
    m.remove_point();
    assert_eq!(store.save_count(), 5);
    assert_eq!(store.latest().map(|s| s.point_score), Some([2, 0]));

    // no-op removal on an empty match does not save
    let mut fresh = Match::with_store(singles_config(3), Box::new(store.clone())).unwrap();
    let saves = store.save_count();
    assert!(fresh.remove_point().is_none());
    assert_eq!(store.save_count(), saves);
}
