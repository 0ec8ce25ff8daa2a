use serde_json::json;

use crate::domain::match_play::Match;
use crate::domain::summary::{match_score_string, summarize, MatchStatus, MatchType};
use crate::domain::test_state_helpers::{
    doubles, reach_tiebreak, singles, singles_config, win_games, win_points, win_set,
};
use crate::domain::{DisplayScore, Slot};

const ONE: Slot = Slot::One;
const TWO: Slot = Slot::Two;

#[test]
fn fresh_match_summary() {
    let m = singles();
    let summary = summarize(&m);
    assert_eq!(summary.meta.match_type, MatchType::Singles);
    assert_eq!(summary.meta.sets, 3);
    assert_eq!(summary.meta.status, MatchStatus::InProgress);
    assert_eq!(summary.score.sets, [0, 0]);
    assert_eq!(summary.score.points, [DisplayScore::LOVE; 2]);
    let server = summary.score.server.expect("server");
    assert_eq!((server.slot, server.id.as_str(), server.name.as_str()), (ONE, "p1", "Ada"));
    assert_eq!(summary.match_score, "0-0");
    assert!(summary.set_history.is_empty());
}

#[test]
fn score_string_lists_sets_and_tiebreak_loser() {
    let mut m = Match::new(singles_config(5)).unwrap();
    win_games(&mut m, TWO, 3);
    win_games(&mut m, ONE, 6);
    win_games(&mut m, ONE, 4);
    win_games(&mut m, TWO, 6);
    reach_tiebreak(&mut m);
    win_points(&mut m, ONE, 5);
    win_points(&mut m, TWO, 5);
    win_points(&mut m, ONE, 2);
    win_games(&mut m, ONE, 2);

    assert_eq!(match_score_string(&m), "6-3, 4-6, 7-6(5), 2-0");

    let history = summarize(&m).set_history;
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].number, 3);
    assert_eq!(history[2].tiebreak, Some([7, 5]));
    assert_eq!(history[1].winner, Some(TWO));
    assert_eq!(history[0].tiebreak, None);
}

#[test]
fn completed_match_drops_the_empty_set() {
    let mut m = singles();
    win_set(&mut m, TWO);
    win_set(&mut m, TWO);
    let summary = summarize(&m);
    assert_eq!(summary.meta.status, MatchStatus::Completed);
    assert_eq!(summary.score.winner, Some(TWO));
    assert_eq!(summary.match_score, "0-6, 0-6");
}

#[test]
fn tiebreak_points_show_as_numbers() {
    let mut m = singles();
    reach_tiebreak(&mut m);
    win_points(&mut m, TWO, 3);
    let score = summarize(&m).score;
    assert!(score.in_tiebreak);
    assert_eq!(score.points, [DisplayScore::Points(0), DisplayScore::Points(3)]);
    assert_eq!(score.raw_points, [0, 3]);
}

#[test]
fn doubles_summary_names_the_serving_player() {
    let mut m = doubles();
    win_games(&mut m, ONE, 1);
    let summary = summarize(&m);
    assert_eq!(summary.meta.match_type, MatchType::Doubles);
    let server = summary.score.server.expect("server");
    assert_eq!(server.slot, TWO);
    assert_eq!(server.id, "t2a");
    assert_eq!(server.name, "Cai");
}

#[test]
fn summary_json_shape() {
    let mut m = singles();
    win_points(&mut m, ONE, 3);
    win_points(&mut m, TWO, 3);
    let value = serde_json::to_value(summarize(&m)).unwrap();

    assert_eq!(value["meta"]["match_type"], "singles");
    assert_eq!(value["meta"]["status"], "in_progress");
    assert_eq!(value["score"]["points"], json!(["DEUCE", "DEUCE"]));
    assert_eq!(value["score"]["raw_points"], json!([3, 3]));
    assert_eq!(value["participants"][0]["info"]["id"], "p1");
    assert_eq!(value["participants"][1]["stats"]["points_won"], json!(3));
    assert_eq!(value["match_score"], "0-0");
}
