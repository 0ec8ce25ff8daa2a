use crate::domain::game::{display_for, DisplayScore, Game};
use crate::domain::serving::{Rotation, ServeTurn, Server};
use crate::domain::{Member, Outcome, Seat, Slot};

fn game_served_by(slot: Slot) -> Game {
    Game::new(ServeTurn::singles(slot))
}

fn play(game: &mut Game, winners: &[Slot]) {
    for &w in winners {
        assert!(game.score_point(w, Outcome::Regular, false, None));
    }
}

const ONE: Slot = Slot::One;
const TWO: Slot = Slot::Two;

#[test]
fn calls_follow_love_fifteen_thirty_forty() {
    let mut game = game_served_by(ONE);
    assert_eq!(game.display_score(), [DisplayScore::Points(0); 2]);
    play(&mut game, &[ONE, TWO, ONE, ONE]);
    assert_eq!(
        game.display_score(),
        [DisplayScore::Points(40), DisplayScore::Points(15)]
    );
    assert_eq!(game.raw_score(), [3, 1]);
    assert_eq!(game.winner(), None);
}

#[test]
fn four_straight_points_win_the_game() {
    let mut game = game_served_by(ONE);
    play(&mut game, &[ONE; 4]);
    assert_eq!(game.winner(), Some(ONE));
    assert_eq!(game.display_score(), [DisplayScore::DASH; 2]);
    // further points are refused
    assert!(!game.score_point(TWO, Outcome::Regular, false, None));
    assert_eq!(game.points().len(), 4);
}

#[test]
fn forty_all_is_deuce() {
    let mut game = game_served_by(ONE);
    play(&mut game, &[ONE, ONE, ONE, TWO, TWO, TWO]);
    assert_eq!(game.display_score(), [DisplayScore::DEUCE; 2]);
}

#[test]
fn advantage_is_called_from_the_server() {
    // slot 1 serving, slot 1 leads → AD-IN
    let mut game = game_served_by(ONE);
    play(&mut game, &[ONE, ONE, ONE, TWO, TWO, TWO, ONE]);
    assert_eq!(game.display_score(), [DisplayScore::AD_IN, DisplayScore::DASH]);

    // slot 2 serving, slot 1 leads → AD-OUT
    let mut game = game_served_by(TWO);
    play(&mut game, &[ONE, ONE, ONE, TWO, TWO, TWO, ONE]);
    assert_eq!(game.display_score(), [DisplayScore::AD_OUT, DisplayScore::DASH]);

    // back to deuce, then receiver advantage on the other side
    play(&mut game, &[TWO]);
    assert_eq!(game.display_score(), [DisplayScore::DEUCE; 2]);
    play(&mut game, &[TWO]);
    assert_eq!(game.display_score(), [DisplayScore::DASH, DisplayScore::AD_IN]);
    assert_eq!(game.winner(), None);
}

#[test]
fn four_three_never_wins() {
    assert_eq!(
        display_for([4, 3], ONE),
        [DisplayScore::AD_IN, DisplayScore::DASH]
    );
    let mut game = game_served_by(TWO);
    play(&mut game, &[ONE, ONE, ONE, TWO, TWO, TWO, ONE]);
    assert_eq!(game.winner(), None);
    play(&mut game, &[ONE]);
    assert_eq!(game.winner(), Some(ONE));
}

#[test]
fn removing_the_winning_point_reopens_the_game() {
    let mut game = game_served_by(ONE);
    play(&mut game, &[ONE, ONE, TWO, ONE, ONE]);
    assert_eq!(game.winner(), Some(ONE));

    let removed = game.remove_point().expect("a point to remove");
    assert_eq!(removed.winner(), ONE);
    assert_eq!(game.winner(), None);
    assert_eq!(
        game.display_score(),
        [DisplayScore::Points(40), DisplayScore::Points(15)]
    );
}

#[test]
fn remove_on_empty_game_is_noop() {
    let mut game = game_served_by(ONE);
    assert!(game.remove_point().is_none());
    assert_eq!(game.raw_score(), [0, 0]);
}

#[test]
fn points_record_the_server() {
    let mut game = Game::new(ServeTurn::doubles(Rotation::standard()).next());
    let scorer = Seat::new(TWO, Member::B);
    assert!(game.score_point(ONE, Outcome::Winner, true, Some(scorer)));
    let point = game.points()[0];
    assert_eq!(point.server(), Server::Player(Seat::new(TWO, Member::A)));
    assert_eq!(point.scoring_player(), Some(scorer));
    assert!(point.fault());
}

#[test]
fn break_point_detection_uses_the_receiver() {
    let mut game = game_served_by(ONE);
    play(&mut game, &[TWO, TWO]);
    assert!(!game.is_break_point());
    play(&mut game, &[TWO]);
    // 0-40
    assert!(game.is_break_point());
    play(&mut game, &[ONE, ONE, ONE]);
    // deuce
    assert!(!game.is_break_point());
    play(&mut game, &[TWO]);
    // advantage receiver
    assert!(game.is_break_point());
    play(&mut game, &[ONE, ONE]);
    // advantage server
    assert!(!game.is_break_point());
}
