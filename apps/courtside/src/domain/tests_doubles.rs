use crate::config::format::MatchFormat;
use crate::domain::match_play::Match;
use crate::domain::test_state_helpers::{
    doubles, doubles_config, reach_tiebreak, win_game, win_points,
};
use crate::domain::{Member, Outcome, Participant, Player, PointCall, Seat, Server, Slot};
use crate::errors::domain::ValidationKind;
use crate::MatchConfig;

const ONE: Slot = Slot::One;
const TWO: Slot = Slot::Two;

#[test]
fn rotation_starts_with_side_one_player_a() {
    let m = doubles();
    assert_eq!(
        m.rotation_ids(),
        Some(vec!["t1a", "t2a", "t1b", "t2b"])
    );
    assert_eq!(m.current_server_id(), Some("t1a"));
}

#[test]
fn server_advances_one_place_per_game() {
    let mut m = doubles();
    let mut servers = Vec::new();
    for i in 0..9 {
        servers.push(m.current_server_id().map(str::to_owned));
        win_game(&mut m, if i % 2 == 0 { ONE } else { TWO });
    }
    let expected = ["t1a", "t2a", "t1b", "t2b", "t1a", "t2a", "t1b", "t2b", "t1a"];
    assert_eq!(
        servers,
        expected.map(|id| Some(id.to_owned())).to_vec()
    );
}

#[test]
fn rotation_continues_into_the_next_set() {
    let mut m = doubles();
    for _ in 0..6 {
        win_game(&mut m, ONE);
    }
    assert_eq!(m.set_score(), [1, 0]);
    // six games served, the seventh server is third in the order
    assert_eq!(m.current_server_id(), Some("t1b"));
}

#[test]
fn tiebreak_walks_the_rotation_by_point_parity() {
    let mut m = doubles();
    reach_tiebreak(&mut m);
    assert!(m.in_tiebreak());
    // twelve games: back to the first server
    let mut servers = vec![m.current_server_id().map(str::to_owned)];
    for _ in 0..5 {
        win_points(&mut m, ONE, 1);
        servers.push(m.current_server_id().map(str::to_owned));
    }
    let expected = ["t1a", "t2a", "t2a", "t1b", "t1b", "t2b"];
    assert_eq!(servers, expected.map(|id| Some(id.to_owned())).to_vec());

    win_points(&mut m, ONE, 2);
    assert_eq!(m.set_score(), [1, 0]);
    // the player after the tiebreak opener starts the next set
    assert_eq!(m.current_server_id(), Some("t2a"));
}

#[test]
fn undo_in_tiebreak_restores_server() {
    let mut m = doubles();
    reach_tiebreak(&mut m);
    win_points(&mut m, TWO, 3);
    assert_eq!(m.current_server_id(), Some("t1b"));
    m.remove_point();
    m.remove_point();
    assert_eq!(m.current_server_id(), Some("t2a"));
    m.remove_point();
    assert_eq!(m.current_server_id(), Some("t1a"));
    // one more leaves the tiebreak and lands on the 6-5 game's server
    m.remove_point();
    assert!(!m.in_tiebreak());
    assert_eq!(m.current_server_id(), Some("t2b"));
}

#[test]
fn custom_rotation_is_honoured() {
    let order = [
        Seat::new(TWO, Member::B),
        Seat::new(ONE, Member::A),
        Seat::new(TWO, Member::A),
        Seat::new(ONE, Member::B),
    ];
    let m = Match::new(doubles_config(3).with_rotation(order)).unwrap();
    assert_eq!(m.rotation_ids(), Some(vec!["t2b", "t1a", "t2a", "t1b"]));
    assert_eq!(m.current_server_id(), Some("t2b"));
}

#[test]
fn rotation_must_alternate_sides() {
    let order = [
        Seat::new(ONE, Member::A),
        Seat::new(ONE, Member::B),
        Seat::new(TWO, Member::A),
        Seat::new(TWO, Member::B),
    ];
    let err = Match::new(doubles_config(3).with_rotation(order)).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidRotation));
}

#[test]
fn duplicate_player_ids_are_rejected() {
    let config = MatchConfig::new(
        Participant::team("t1", "Blue", Player::new("x", "X"), Player::new("y", "Y")),
        Participant::team("t2", "Red", Player::new("x", "X"), Player::new("z", "Z")),
        MatchFormat::default(),
    );
    let err = Match::new(config).unwrap_err();
    assert_eq!(
        err.validation_kind(),
        Some(&ValidationKind::DuplicateParticipantId)
    );
}

#[test]
fn points_remember_serving_player_and_scorer() {
    let mut m = doubles();
    let volley = Seat::new(TWO, Member::B);
    assert!(m.score_call(PointCall::new(TWO, Outcome::Winner).scored_by(volley)));
    let point = m.points().next().copied().expect("point");
    assert_eq!(point.server(), Server::Player(Seat::new(ONE, Member::A)));
    assert_eq!(point.scoring_player(), Some(volley));
    assert_eq!(m.seat_of("t2b"), Some(volley));
    assert_eq!(m.seat_of("nobody"), None);
}
