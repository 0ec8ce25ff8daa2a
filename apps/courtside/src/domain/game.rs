//! Standard (non-tiebreak) game scoring.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::point::{Outcome, Point};
use crate::domain::rules::{game_winner, POINT_CALLS, POINTS_TO_WIN_GAME};
use crate::domain::serving::ServeTurn;
use crate::domain::sides::{Seat, Slot};

/// Non-numeric game calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    #[serde(rename = "DEUCE")]
    Deuce,
    #[serde(rename = "AD-IN")]
    AdIn,
    #[serde(rename = "AD-OUT")]
    AdOut,
    #[serde(rename = "-")]
    Dash,
}

/// Human-facing score for one side: a number or a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayScore {
    Points(u16),
    Label(ScoreLabel),
}

impl DisplayScore {
    pub const LOVE: DisplayScore = DisplayScore::Points(0);
    pub const DEUCE: DisplayScore = DisplayScore::Label(ScoreLabel::Deuce);
    pub const AD_IN: DisplayScore = DisplayScore::Label(ScoreLabel::AdIn);
    pub const AD_OUT: DisplayScore = DisplayScore::Label(ScoreLabel::AdOut);
    pub const DASH: DisplayScore = DisplayScore::Label(ScoreLabel::Dash);
}

impl Display for DisplayScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DisplayScore::Points(n) => write!(f, "{n}"),
            DisplayScore::Label(ScoreLabel::Deuce) => write!(f, "DEUCE"),
            DisplayScore::Label(ScoreLabel::AdIn) => write!(f, "AD-IN"),
            DisplayScore::Label(ScoreLabel::AdOut) => write!(f, "AD-OUT"),
            DisplayScore::Label(ScoreLabel::Dash) => write!(f, "-"),
        }
    }
}

/// Display pair for a raw game score.
///
/// Advantage is called from the server's point of view: AD-IN when the
/// serving side leads, AD-OUT when the receiver does.
pub fn display_for(raw: [u16; 2], server: Slot) -> [DisplayScore; 2] {
    let call = |n: u16| {
        POINT_CALLS
            .get(usize::from(n))
            .map_or(DisplayScore::DASH, |&value| DisplayScore::Points(value))
    };
    let [one, two] = raw;

    if one >= 3 && one == two {
        return [DisplayScore::DEUCE; 2];
    }

    let leader = if one > two { Slot::One } else { Slot::Two };
    let lead = raw[leader.index()];
    let trail = raw[leader.other().index()];

    if lead < POINTS_TO_WIN_GAME {
        return [call(one), call(two)];
    }
    if lead - trail > 1 {
        return [DisplayScore::DASH; 2];
    }

    let mut display = [DisplayScore::DASH; 2];
    display[leader.index()] = if leader == server {
        DisplayScore::AD_IN
    } else {
        DisplayScore::AD_OUT
    };
    display
}

/// One standard game: fixed server, points to four with a two-point margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    serve: ServeTurn,
    raw_score: [u16; 2],
    display_score: [DisplayScore; 2],
    winner: Option<Slot>,
    points: Vec<Point>,
}

impl Game {
    pub fn new(serve: ServeTurn) -> Self {
        Self {
            serve,
            raw_score: [0; 2],
            display_score: [DisplayScore::LOVE; 2],
            winner: None,
            points: Vec::new(),
        }
    }

    /// Record a point. Returns `false` (and changes nothing) once the game is won.
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
        self.raw_score[winner.index()] += 1;
        self.recompute();
        true
    }

    /// Pop the last point. Clears the winner when the game is no longer decided.
    pub fn remove_point(&mut self) -> Option<Point> {
        let point = self.points.pop()?;
        let side = &mut self.raw_score[point.winner().index()];
        debug_assert!(*side > 0, "raw score out of step with point list");
        *side = side.saturating_sub(1);
        self.recompute();
        Some(point)
    }

    fn recompute(&mut self) {
        self.display_score = display_for(self.raw_score, self.serve.slot());
        self.winner = game_winner(self.raw_score);
    }

    /// Whether the receiver would win the game by winning the next point.
    pub fn is_break_point(&self) -> bool {
        if self.winner.is_some() {
            return false;
        }
        let server = self.serve.slot();
        let served = self.raw_score[server.index()];
        let received = self.raw_score[server.other().index()];
        (received == 3 && served < 3) || (received > 3 && received == served + 1)
    }

    pub fn serve(&self) -> ServeTurn {
        self.serve
    }

    pub fn raw_score(&self) -> [u16; 2] {
        self.raw_score
    }

    pub fn display_score(&self) -> [DisplayScore; 2] {
        self.display_score
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
